//! Schedule row types exchanged with the planning backend.

use serde::{Deserialize, Serialize};

/// An item extracted from the uploaded syllabus (exam, deadline, class
/// meeting). Immutable once parsed; read-only context for generation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FixedScheduleItem {
    pub date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    pub summary: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

/// One row of an AI-generated weekly plan.
///
/// The backend emits capitalized field names; the whole set is replaced on
/// every generation call, so these rows are a proposal, not a log.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerScheduleItem {
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "Day", skip_serializing_if = "Option::is_none")]
    pub day: Option<String>,
    #[serde(rename = "Start_Time", skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(rename = "End_Time", skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(rename = "Task")]
    pub task: String,
    #[serde(rename = "Category", skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}
