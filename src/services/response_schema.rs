//! Declared output schema for the analysis response.
//!
//! Uses the OpenAPI subset understood by Gemini's `responseSchema`. The
//! overall viability score is deliberately absent: it is derived locally.

use serde_json::{json, Value};

/// Top-level fields every response must carry.
pub const REQUIRED_FIELDS: [&str; 16] = [
    "passion",
    "mission",
    "profession",
    "vocation",
    "ikigaiStatement",
    "ikigaiDescription",
    "keyInsight",
    "pivotPoint",
    "signaturePhrase",
    "contradictions",
    "viability",
    "risks",
    "minimalistIkigai",
    "realityTests",
    "timeline",
    "timelineContext",
];

fn string(description: &str) -> Value {
    json!({ "type": "STRING", "description": description })
}

fn string_list(description: &str) -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" }, "description": description })
}

fn sub_score() -> Value {
    json!({ "type": "INTEGER", "description": "Score out of 10", "minimum": 0, "maximum": 10 })
}

fn phase() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "objective": string("Objective containing a number (KPI)"),
            "actions": { "type": "ARRAY", "items": { "type": "STRING" } }
        },
        "required": ["objective", "actions"]
    })
}

/// Build the schema sent alongside every analysis prompt.
pub fn analysis_response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "passion": string("Passion summary (love + good at)"),
            "mission": string("Mission summary (love + world needs)"),
            "profession": string("Profession summary (good at + paid for)"),
            "vocation": string("Vocation summary (world needs + paid for)"),
            "ikigaiStatement": string("Central statement, pragmatic and inspiring"),
            "ikigaiDescription": string("Dense analysis. No vague poetry."),

            "keyInsight": string("The rational 'wow' sentence"),
            "pivotPoint": string("The condition without which success is impossible"),
            "signaturePhrase": string("A short identity phrase"),

            "contradictions": string_list("Internal tensions"),

            "viability": {
                "type": "OBJECT",
                "properties": {
                    "reasoning": { "type": "STRING" },
                    "breakdown": {
                        "type": "OBJECT",
                        "properties": {
                            "motivation": sub_score(),
                            "skills": sub_score(),
                            "market": sub_score(),
                            "time": sub_score(),
                            "financial": sub_score()
                        },
                        "required": ["motivation", "skills", "market", "time", "financial"]
                    }
                },
                "required": ["reasoning", "breakdown"]
            },

            "risks": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": {
                            "type": "STRING",
                            "enum": ["Structural", "Personal", "Strategic"]
                        },
                        "description": string("Behavioural description, not clinical.")
                    },
                    "required": ["category", "description"]
                }
            },

            "minimalistIkigai": { "type": "STRING" },
            "realityTests": { "type": "ARRAY", "items": { "type": "STRING" } },

            "timelineContext": { "type": "STRING" },
            "timeline": {
                "type": "OBJECT",
                "properties": {
                    "week1": phase(),
                    "month1": phase(),
                    "month3": phase()
                },
                "required": ["week1", "month1", "month3"]
            }
        },
        "required": REQUIRED_FIELDS
    })
}
