use super::phone::extract_phone_number;
use super::registry::{DedupPolicy, EventRegistry};
use super::scheduler::{CallScheduler, ScheduledCall};
use crate::components::google_calendar::models::CalendarEvent;
use crate::components::google_calendar::time::get_event_start;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, info, warn};

/// Result of running one event through the scheduling decision sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// A call job was submitted
    Scheduled(ScheduledCall),
    /// A call for this event was already scheduled earlier
    AlreadyScheduled,
    /// The description holds no dial-in number
    NoPhoneNumber,
    /// All-day event, or no usable start timestamp
    NoStartTime,
    /// The call time has already passed; there is no retroactive call
    AlreadyStarted,
}

/// Decides, for each fetched event, whether to schedule a reminder call
///
/// Owns the dedup registry and the job scheduler; both the periodic poll
/// and the manual force-check drive the same instance.
pub struct SchedulingPipeline {
    registry: EventRegistry,
    scheduler: CallScheduler,
    policy: DedupPolicy,
}

impl SchedulingPipeline {
    pub fn new(scheduler: CallScheduler, policy: DedupPolicy) -> Self {
        Self {
            registry: EventRegistry::new(),
            scheduler,
            policy,
        }
    }

    /// The instant the reminder call goes out for a given meeting start
    pub fn call_time_for(start: DateTime<Utc>) -> DateTime<Utc> {
        start - Duration::minutes(1)
    }

    /// Number of events with a scheduled call so far
    pub fn scheduled_count(&self) -> usize {
        self.registry.len()
    }

    /// Number of call jobs handed to the scheduler since startup
    pub fn submitted_count(&self) -> u64 {
        self.scheduler.submitted_count()
    }

    /// Run one event through the decision sequence against the current time
    pub fn process_event(&self, event: &CalendarEvent) -> ScheduleOutcome {
        self.process_event_at(event, Utc::now())
    }

    /// Decision sequence with an explicit "now"
    pub fn process_event_at(&self, event: &CalendarEvent, now: DateTime<Utc>) -> ScheduleOutcome {
        let phone = extract_phone_number(event.description.as_deref());

        let key = self.policy.dedup_key(event, phone.as_deref());
        if self.registry.is_scheduled(&key) {
            return ScheduleOutcome::AlreadyScheduled;
        }

        let Some(meeting_phone) = phone else {
            return ScheduleOutcome::NoPhoneNumber;
        };

        let start = match get_event_start(event) {
            Ok(Some(start)) => start,
            Ok(None) => return ScheduleOutcome::NoStartTime,
            Err(e) => {
                warn!("Ignoring event '{}': {}", event.id, e);
                return ScheduleOutcome::NoStartTime;
            }
        };

        let run_at = Self::call_time_for(start);
        if run_at <= now {
            return ScheduleOutcome::AlreadyStarted;
        }

        let call = ScheduledCall {
            run_at,
            meeting_phone,
            event_name: event.display_name().to_string(),
        };
        // Mark only after the job exists, so a failed submission would not
        // silently swallow the event
        self.scheduler.submit(call.clone());
        self.registry.mark_scheduled(key);

        ScheduleOutcome::Scheduled(call)
    }

    /// Process a fetch batch, logging every decision
    ///
    /// Returns the number of newly scheduled calls.
    pub fn process_events(&self, events: &[CalendarEvent]) -> usize {
        let mut scheduled = 0;

        for event in events {
            match self.process_event(event) {
                ScheduleOutcome::Scheduled(call) => {
                    info!(
                        "Scheduled call for event '{}' at {} UTC (meeting phone: {})",
                        event.display_name(),
                        call.run_at,
                        call.meeting_phone
                    );
                    scheduled += 1;
                }
                ScheduleOutcome::AlreadyScheduled => {}
                ScheduleOutcome::NoPhoneNumber => {
                    debug!("No dial-in number in event '{}'", event.display_name());
                }
                ScheduleOutcome::NoStartTime => {
                    info!(
                        "Skipping event '{}': no start timestamp",
                        event.display_name()
                    );
                }
                ScheduleOutcome::AlreadyStarted => {
                    info!(
                        "Skipping event '{}': call time already passed",
                        event.display_name()
                    );
                }
            }
        }

        scheduled
    }
}
