//! quizify-server configuration
//!
//! Each setting resolves as: command line / environment → config.toml →
//! compiled default.

use clap::Parser;
use quizify_common::config::{RootFolderResolver, TomlConfig};
use std::path::PathBuf;
use std::time::Duration;

use crate::ai::gemini::DEFAULT_MODEL;
use crate::{IngestSettings, DEFAULT_MAX_UPLOAD_BYTES, DEFAULT_QUESTION_COUNT};

pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_AI_TIMEOUT_SECS: u64 = 60;

/// Command-line arguments for quizify-server
#[derive(Parser, Debug, Default)]
#[command(name = "quizify-server")]
#[command(about = "Generates quiz questions from lecture PDFs and grades answers")]
#[command(version)]
pub struct Args {
    /// Port to listen on
    #[arg(short, long, env = "QUIZIFY_PORT")]
    pub port: Option<u16>,

    /// Address to bind
    #[arg(long, env = "QUIZIFY_BIND")]
    pub bind: Option<String>,

    /// Folder holding questions.db (also read from QUIZIFY_ROOT_FOLDER)
    #[arg(short, long)]
    pub root_folder: Option<PathBuf>,

    /// Path to config.toml
    #[arg(short, long, env = "QUIZIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Gemini model name
    #[arg(long, env = "QUIZIFY_MODEL")]
    pub model: Option<String>,

    /// Keep questions in memory instead of SQLite
    #[arg(long)]
    pub in_memory: bool,
}

/// Fully resolved server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
    pub root_folder: PathBuf,
    pub gemini_api_key: Option<String>,
    pub model: String,
    pub ai_timeout: Duration,
    pub ingest: IngestSettings,
    pub in_memory: bool,
}

impl ServerConfig {
    /// Merge arguments over the TOML file over compiled defaults
    pub fn resolve(args: Args, toml: &TomlConfig) -> Self {
        let root_folder = RootFolderResolver::new()
            .with_cli_arg(args.root_folder)
            .with_toml(toml)
            .resolve();

        let max_upload_bytes = toml
            .max_upload_mb
            .map(|mb| mb * 1024 * 1024)
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);

        Self {
            bind: args
                .bind
                .or_else(|| toml.bind.clone())
                .unwrap_or_else(|| DEFAULT_BIND.to_string()),
            port: args.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            root_folder,
            gemini_api_key: args.gemini_api_key.or_else(|| toml.gemini_api_key.clone()),
            model: args
                .model
                .or_else(|| toml.model.clone())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            ai_timeout: Duration::from_secs(toml.ai_timeout_secs.unwrap_or(DEFAULT_AI_TIMEOUT_SECS)),
            ingest: IngestSettings {
                question_count: toml.question_count.unwrap_or(DEFAULT_QUESTION_COUNT),
                max_upload_bytes,
            },
            in_memory: args.in_memory,
        }
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_overrides() {
        let config = ServerConfig::resolve(
            Args {
                root_folder: Some(PathBuf::from("/tmp/quizify-test")),
                ..Default::default()
            },
            &TomlConfig::default(),
        );

        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.listen_addr(), "0.0.0.0:3000");
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.ai_timeout, Duration::from_secs(60));
        assert_eq!(config.ingest.question_count, 10);
        assert!(config.gemini_api_key.is_none());
    }

    #[test]
    fn test_args_override_toml() {
        let toml = TomlConfig {
            port: Some(8080),
            model: Some("gemini-1.5-pro".to_string()),
            gemini_api_key: Some("from-toml".to_string()),
            question_count: Some(5),
            max_upload_mb: Some(2),
            ..Default::default()
        };
        let args = Args {
            port: Some(9000),
            root_folder: Some(PathBuf::from("/tmp/quizify-test")),
            ..Default::default()
        };

        let config = ServerConfig::resolve(args, &toml);

        assert_eq!(config.port, 9000);
        assert_eq!(config.model, "gemini-1.5-pro");
        assert_eq!(config.gemini_api_key.as_deref(), Some("from-toml"));
        assert_eq!(config.ingest.question_count, 5);
        assert_eq!(config.ingest.max_upload_bytes, 2 * 1024 * 1024);
        assert_eq!(config.root_folder, PathBuf::from("/tmp/quizify-test"));
    }

    #[test]
    fn test_args_parse_flags() {
        let args = Args::try_parse_from([
            "quizify-server",
            "--port",
            "4000",
            "--in-memory",
            "--model",
            "gemini-2.0-flash",
        ])
        .unwrap();

        assert_eq!(args.port, Some(4000));
        assert!(args.in_memory);
        assert_eq!(args.model.as_deref(), Some("gemini-2.0-flash"));
    }
}
