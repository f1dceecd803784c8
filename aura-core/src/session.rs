//! Planning-session state machine: the upload → goals → review wizard.
//!
//! Drives the external planning service and publishes accepted results into
//! the [`EventStore`]. External failures never propagate past the action that
//! issued the call; they become a user-facing error string and leave every
//! other session field untouched.

use crate::reconcile::to_calendar_events;
use crate::schedule::{FixedScheduleItem, PlannerScheduleItem};
use crate::service::{
    ExportRequest, GenerateScheduleRequest, PlanningService, SyllabusUpload, SyncResult,
};
use crate::store::EventStore;

/// Wizard steps, forward-only except for the reset to Upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    Upload,
    Goals,
    Review,
}

impl WizardStep {
    /// The explicit transition table. Anything else is rejected.
    pub fn permits(self, next: WizardStep) -> bool {
        matches!(
            (self, next),
            (WizardStep::Upload, WizardStep::Goals)
                | (WizardStep::Goals, WizardStep::Review)
                | (_, WizardStep::Upload)
        )
    }
}

/// The planning wizard's working state.
///
/// Owns the in-progress draft (`fixed_schedule`, `schedule`, goals) for the
/// duration of the wizard; the committed [`EventStore`] only receives a
/// converted copy at accept time.
#[derive(Debug)]
pub struct PlanningSession<S> {
    service: S,
    step: WizardStep,
    fixed_schedule: Vec<FixedScheduleItem>,
    goals_input: String,
    goals_summary: String,
    schedule: Vec<PlannerScheduleItem>,
    schedule_notes: String,
    feedback_input: String,
    feedback_constraints: Option<String>,
    loading_message: String,
    error: String,
}

impl<S: PlanningService> PlanningSession<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            step: WizardStep::Upload,
            fixed_schedule: Vec::new(),
            goals_input: String::new(),
            goals_summary: String::new(),
            schedule: Vec::new(),
            schedule_notes: String::new(),
            feedback_input: String::new(),
            feedback_constraints: None,
            loading_message: String::new(),
            error: String::new(),
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn fixed_schedule(&self) -> &[FixedScheduleItem] {
        &self.fixed_schedule
    }

    pub fn schedule(&self) -> &[PlannerScheduleItem] {
        &self.schedule
    }

    pub fn has_schedule(&self) -> bool {
        !self.schedule.is_empty()
    }

    pub fn goals_summary(&self) -> &str {
        &self.goals_summary
    }

    pub fn schedule_notes(&self) -> &str {
        &self.schedule_notes
    }

    pub fn feedback_constraints(&self) -> Option<&str> {
        self.feedback_constraints.as_deref()
    }

    pub fn loading_message(&self) -> &str {
        &self.loading_message
    }

    pub fn error(&self) -> &str {
        &self.error
    }

    /// True while an external call is in flight. Gates every mutating action.
    pub fn is_busy(&self) -> bool {
        !self.loading_message.is_empty()
    }

    pub fn set_goals_input(&mut self, text: impl Into<String>) {
        self.goals_input = text.into();
    }

    pub fn set_feedback_input(&mut self, text: impl Into<String>) {
        self.feedback_input = text.into();
    }

    pub fn feedback_input(&self) -> &str {
        &self.feedback_input
    }

    fn advance(&mut self, next: WizardStep) {
        if self.step.permits(next) {
            self.step = next;
        }
    }

    fn fail(&mut self, err: anyhow::Error) {
        self.error = format!("{err:#}");
    }

    /// Upload step: parse the syllabus. An empty parse result is an error
    /// (nothing actionable); the session stays in Upload.
    pub async fn upload_syllabus(&mut self, upload: SyllabusUpload) {
        if self.is_busy() {
            return;
        }
        self.error.clear();
        self.loading_message = "Parsing syllabus...".to_string();
        match self.service.parse_syllabus(&upload).await {
            Ok(parsed) if parsed.is_empty() => {
                self.error = "No events found in the syllabus.".to_string();
            }
            Ok(parsed) => {
                self.fixed_schedule = parsed;
                self.advance(WizardStep::Goals);
            }
            Err(err) => self.fail(err),
        }
        self.loading_message.clear();
    }

    /// Goals step: summarize the goals text, then immediately run the first
    /// generation with no constraints and no previous schedule.
    pub async fn analyze_goals(&mut self) {
        if self.is_busy() {
            return;
        }
        if self.goals_input.trim().is_empty() {
            self.error = "Please describe your course goals before continuing.".to_string();
            return;
        }
        self.error.clear();
        self.loading_message = "Analyzing goals...".to_string();
        match self.service.analyze_goals(&self.goals_input).await {
            Ok(summary) => {
                self.goals_summary = summary;
                self.advance(WizardStep::Review);
                self.loading_message.clear();
                let goals = self.goals_summary.clone();
                self.generate(goals, None, Vec::new()).await;
            }
            Err(err) => {
                self.fail(err);
                self.loading_message.clear();
            }
        }
    }

    /// Review action: re-run generation with the current goals, constraints,
    /// and the current schedule as incremental-revision context.
    pub async fn regenerate(&mut self) {
        if self.is_busy() || self.step != WizardStep::Review {
            return;
        }
        let goals = self.effective_goals();
        let constraints = self.feedback_constraints.clone();
        let previous = self.schedule.clone();
        self.generate(goals, constraints, previous).await;
    }

    /// Review action: derive constraints from the feedback text, store them,
    /// and regenerate with them. The feedback input is cleared only after a
    /// successful analysis.
    pub async fn apply_feedback(&mut self) {
        if self.is_busy() || self.step != WizardStep::Review {
            return;
        }
        if self.feedback_input.trim().is_empty() {
            self.error = "Please enter feedback before refining the schedule.".to_string();
            return;
        }
        self.error.clear();
        self.loading_message = "Processing feedback...".to_string();
        match self.service.analyze_feedback(&self.feedback_input).await {
            Ok(constraints) => {
                self.feedback_constraints = Some(constraints.clone());
                self.loading_message.clear();
                let goals = self.effective_goals();
                let previous = self.schedule.clone();
                self.generate(goals, Some(constraints), previous).await;
                self.feedback_input.clear();
            }
            Err(err) => {
                self.fail(err);
                self.loading_message.clear();
            }
        }
    }

    /// Review action: sync the schedule externally, then convert it and
    /// merge the events into `store`. Returns the sync outcome on success;
    /// the wizard is done afterwards.
    pub async fn accept(&mut self, store: &mut EventStore) -> Option<SyncResult> {
        if self.is_busy() || self.step != WizardStep::Review || self.schedule.is_empty() {
            return None;
        }
        self.error.clear();
        self.loading_message = "Syncing events to Google Calendar...".to_string();
        let request = ExportRequest {
            schedule: self.schedule.clone(),
            fixed_schedule: self.fixed_schedule.clone(),
        };
        let outcome = match self.service.sync_to_calendar(&request).await {
            Ok(result) => {
                store.add_events(to_calendar_events(&self.schedule));
                Some(result)
            }
            Err(err) => {
                self.fail(err);
                None
            }
        };
        self.loading_message.clear();
        outcome
    }

    /// Review action: fetch the ICS rendering as an opaque downloadable
    /// payload. Never touches the event store.
    pub async fn download_ics(&mut self) -> Option<String> {
        if self.is_busy() || self.step != WizardStep::Review || self.schedule.is_empty() {
            return None;
        }
        self.error.clear();
        self.loading_message = "Creating ICS file...".to_string();
        let request = ExportRequest {
            schedule: self.schedule.clone(),
            fixed_schedule: self.fixed_schedule.clone(),
        };
        let outcome = match self.service.render_ics(&request).await {
            Ok(payload) => Some(payload),
            Err(err) => {
                self.fail(err);
                None
            }
        };
        self.loading_message.clear();
        outcome
    }

    /// Start over: back to Upload with every session field cleared.
    pub fn reset(&mut self) {
        self.advance(WizardStep::Upload);
        self.fixed_schedule.clear();
        self.goals_input.clear();
        self.goals_summary.clear();
        self.schedule.clear();
        self.schedule_notes.clear();
        self.feedback_input.clear();
        self.feedback_constraints = None;
        self.loading_message.clear();
        self.error.clear();
    }

    fn effective_goals(&self) -> String {
        if self.goals_summary.is_empty() {
            self.goals_input.clone()
        } else {
            self.goals_summary.clone()
        }
    }

    async fn generate(
        &mut self,
        goals: String,
        constraints: Option<String>,
        previous: Vec<PlannerScheduleItem>,
    ) {
        self.loading_message = "Generating schedule...".to_string();
        self.error.clear();
        let request = GenerateScheduleRequest {
            fixed_schedule: self.fixed_schedule.clone(),
            goals,
            feedback_constraints: constraints,
            previous_schedule: (!previous.is_empty()).then_some(previous),
        };
        match self.service.generate_schedule(&request).await {
            Ok(response) => {
                self.schedule = response.schedule;
                self.schedule_notes = response.reasoning.unwrap_or_default();
            }
            Err(err) => self.fail(err),
        }
        self.loading_message.clear();
    }
}
