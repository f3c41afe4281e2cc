//! Response schema sent with every generation request
//!
//! Gemini constrains its JSON output to this shape. The model can still
//! return something else, so output is always run through
//! `quizify_common::validate` before it is stored.

use serde_json::{json, Value};

/// Schema for a lecture plus its multiple-choice questions
pub fn question_response_schema() -> Value {
    json!({
        "description": "Schema for generating multiple-choice questions based on lecture resources",
        "type": "OBJECT",
        "properties": {
            "lectureTitle": {
                "type": "STRING",
                "description": "Title of the lecture",
                "nullable": false
            },
            "lectureContent": {
                "type": "STRING",
                "description": "Main content of the lecture used as the basis for generating questions",
                "nullable": false
            },
            "questions": {
                "type": "ARRAY",
                "description": "List of multiple-choice questions generated from the lecture",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "questionText": {
                            "type": "STRING",
                            "description": "The text of the question",
                            "nullable": false
                        },
                        "questionType": {
                            "type": "STRING",
                            "description": "Type of question, which is restricted to multiple-choice",
                            "enum": ["multiple-choice"],
                            "nullable": false
                        },
                        "choices": {
                            "type": "ARRAY",
                            "description": "List of answer choices for the multiple-choice question",
                            "items": { "type": "STRING" },
                            "nullable": false
                        },
                        "correctAnswer": {
                            "type": "STRING",
                            "description": "The correct answer for the question",
                            "nullable": false
                        },
                        "difficultyLevel": {
                            "type": "STRING",
                            "description": "Difficulty level of the question",
                            "enum": ["easy", "medium", "hard"],
                            "nullable": false
                        }
                    },
                    "required": ["questionText", "questionType", "choices", "correctAnswer", "difficultyLevel"]
                }
            },
            "metadata": {
                "type": "OBJECT",
                "description": "Additional metadata about the lecture or question generation process",
                "properties": {
                    "dateCreated": {
                        "type": "STRING",
                        "description": "Date when the lecture was added",
                        "nullable": false
                    }
                },
                "required": ["dateCreated"]
            }
        },
        "required": ["lectureTitle", "lectureContent", "questions"]
    })
}
