//! The planning backend as seen from the client.
//!
//! Request/response shapes only; transport lives in `aura-client`. Session
//! tests substitute an in-process stub.

use crate::schedule::{FixedScheduleItem, PlannerScheduleItem};
use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Raw syllabus bytes handed to the parsing endpoint.
#[derive(Debug, Clone)]
pub struct SyllabusUpload {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GenerateScheduleRequest {
    pub fixed_schedule: Vec<FixedScheduleItem>,
    pub goals: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback_constraints: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previous_schedule: Option<Vec<PlannerScheduleItem>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GenerateScheduleResponse {
    #[serde(default)]
    pub schedule: Vec<PlannerScheduleItem>,
    #[serde(default)]
    pub reasoning: Option<String>,
}

/// Payload for both calendar sync and ICS rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRequest {
    pub schedule: Vec<PlannerScheduleItem>,
    pub fixed_schedule: Vec<FixedScheduleItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SyncResult {
    #[serde(default)]
    pub message: String,
    #[serde(rename = "eventsCreated")]
    pub events_created: u32,
}

/// Operations the planning session consumes from the external service.
///
/// Every call may fail; the session reduces failures to a user-facing string
/// and leaves its prior state intact.
#[allow(async_fn_in_trait)]
pub trait PlanningService {
    async fn parse_syllabus(&self, upload: &SyllabusUpload) -> Result<Vec<FixedScheduleItem>>;

    async fn analyze_goals(&self, description: &str) -> Result<String>;

    async fn analyze_feedback(&self, feedback: &str) -> Result<String>;

    async fn generate_schedule(
        &self,
        request: &GenerateScheduleRequest,
    ) -> Result<GenerateScheduleResponse>;

    async fn sync_to_calendar(&self, request: &ExportRequest) -> Result<SyncResult>;

    /// Render the schedule as an opaque ICS text payload. The client never
    /// interprets its bytes.
    async fn render_ics(&self, request: &ExportRequest) -> Result<String>;
}
