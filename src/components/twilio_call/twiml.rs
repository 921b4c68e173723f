use crate::config::DEFAULT_EVENT_NAME;

/// Ring timeout for the meeting leg, in seconds
const DIAL_TIMEOUT_SECS: u32 = 20;

/// Pause between the announcement and the dial, masking connect setup
const CONNECT_PAUSE_SECS: u32 = 3;

/// Escape XML-reserved characters for element and attribute content
fn xml_escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// TwiML that announces the event and bridges the call to the meeting line
///
/// Missing parameters degrade instead of failing: the announcement falls
/// back to a generic event name and an absent meeting phone yields an empty
/// dial target. The document is always well-formed, so Twilio never sees a
/// malformed callback response.
pub fn bridge_response(
    meeting_phone: Option<&str>,
    event_name: Option<&str>,
    caller_id: &str,
) -> String {
    let event_name = match event_name {
        Some(name) if !name.is_empty() => name,
        _ => DEFAULT_EVENT_NAME,
    };

    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<Response>
    <Say voice="alice">Hello, you have an upcoming event: {}. Please wait while we connect you.</Say>
    <Pause length="{}"/>
    <Dial callerId="{}" timeout="{}">{}</Dial>
</Response>"#,
        xml_escape(event_name),
        CONNECT_PAUSE_SECS,
        xml_escape(caller_id),
        DIAL_TIMEOUT_SECS,
        xml_escape(meeting_phone.unwrap_or("")),
    )
}
