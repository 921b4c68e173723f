// Export components
pub mod google_calendar;
pub mod scheduling;
pub mod twilio_call;

// Re-export Google Calendar handle
pub use google_calendar::GoogleCalendarHandle;
// Re-export Twilio call handle
pub use twilio_call::TwilioCallHandle;
