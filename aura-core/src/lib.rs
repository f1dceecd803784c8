//! aura-core: planning-session state machine and event reconciliation for
//! the Aura schedule planner.

pub mod event;
pub mod reconcile;
pub mod schedule;
pub mod service;
pub mod session;
pub mod store;
pub mod time;

pub use event::{CalendarEvent, ExtendedProps, Recurrence, assign_id};
pub use reconcile::to_calendar_events;
pub use schedule::{FixedScheduleItem, PlannerScheduleItem};
pub use service::{
    ExportRequest, GenerateScheduleRequest, GenerateScheduleResponse, PlanningService,
    SyllabusUpload, SyncResult,
};
pub use session::{PlanningSession, WizardStep};
pub use store::EventStore;
pub use time::{ALL_DAY, normalize_time};
