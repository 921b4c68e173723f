mod calendar_mock;
mod web_tests;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - calendar_mock: Mocking the Google Calendar source for testing
// - scheduling_tests: The event-to-call pipeline and the one-shot scheduler
// - web_tests: The web handlers, the Twilio webhook and the manual check
