mod phone;
mod pipeline;
mod poller;
mod registry;
mod scheduler;

pub use phone::extract_phone_number;
pub use pipeline::{ScheduleOutcome, SchedulingPipeline};
pub use poller::{run_calendar_check, start_poller};
pub use registry::{DedupPolicy, EventRegistry};
pub use scheduler::{CallDispatcher, CallScheduler, ScheduledCall};
