use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // North American numbers as they get pasted into meeting invites:
    // optional +1, optional parenthesized area code, space or hyphen
    // separators between the 3-3-4 digit groups.
    static ref PHONE_PATTERN: Regex =
        Regex::new(r"\+?1?\s*-?\(?\d{3}\)?\s*-?\s*\d{3}\s*-?\s*\d{4}")
            .expect("phone pattern must compile");
}

/// Extract the first dial-in number from free text, exactly as written
///
/// Descriptions with several numbers are not disambiguated; the first match
/// wins. Empty or absent text yields `None`.
pub fn extract_phone_number(text: Option<&str>) -> Option<String> {
    let text = text?;
    if text.is_empty() {
        return None;
    }
    PHONE_PATTERN.find(text).map(|m| m.as_str().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_common_formats() {
        assert_eq!(
            extract_phone_number(Some("Call-in: +1 (415) 555-0132")),
            Some("+1 (415) 555-0132".to_string())
        );
        assert_eq!(
            extract_phone_number(Some("415-555-0132")),
            Some("415-555-0132".to_string())
        );
        assert_eq!(
            extract_phone_number(Some("4155550132")),
            Some("4155550132".to_string())
        );
        assert_eq!(
            extract_phone_number(Some("dial 555-123-4567 to join")),
            Some("555-123-4567".to_string())
        );
    }

    #[test]
    fn test_returns_first_match_verbatim() {
        let text = "Primary: 415-555-0132, backup: 415-555-0199";
        assert_eq!(
            extract_phone_number(Some(text)),
            Some("415-555-0132".to_string())
        );
    }

    #[test]
    fn test_no_number_yields_none() {
        assert_eq!(extract_phone_number(Some("no number here")), None);
        assert_eq!(extract_phone_number(Some("")), None);
        assert_eq!(extract_phone_number(None), None);
        // Too few digits to be a subscriber number
        assert_eq!(extract_phone_number(Some("room 555-12")), None);
    }
}
