use std::collections::BTreeMap;

/// Keyword → (key, message) table consulted by [`format_error`].
const KNOWN_ERRORS: [(&str, &str, &str); 4] = [
    ("name", "Taken_name", "Name Already Taken"),
    ("email", "Taken_email", "Email Already Taken"),
    ("hashedPassword", "Incorrect_password", "Incorrect Password"),
    ("record not found", "No_record", "No Record Found"),
];

/// Turn an error description into a client-facing detail map.
///
/// Every keyword found in `description` contributes one entry; when none
/// match, the map holds a single `Incorrect_details` entry. Each call
/// builds a fresh map.
pub fn format_error(description: &str) -> BTreeMap<String, String> {
    let mut details: BTreeMap<String, String> = KNOWN_ERRORS
        .iter()
        .filter(|(keyword, _, _)| description.contains(keyword))
        .map(|(_, key, message)| (key.to_string(), message.to_string()))
        .collect();

    if details.is_empty() {
        details.insert(
            "Incorrect_details".to_string(),
            "Incorrect Details".to_string(),
        );
    }

    details
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_taken() {
        let details = format_error("This email is already registered");
        assert_eq!(details.len(), 1);
        assert_eq!(details["Taken_email"], "Email Already Taken");
    }

    #[test]
    fn test_multiple_keywords() {
        let details = format_error("name and email conflict");
        assert_eq!(details.len(), 2);
        assert!(details.contains_key("Taken_name"));
        assert!(details.contains_key("Taken_email"));
    }

    #[test]
    fn test_password_and_missing_record() {
        assert!(format_error("hashedPassword mismatch").contains_key("Incorrect_password"));
        assert!(format_error("record not found").contains_key("No_record"));
    }

    #[test]
    fn test_calls_do_not_share_state() {
        let first = format_error("email taken");
        let second = format_error("something else");

        assert!(first.contains_key("Taken_email"));
        assert!(!second.contains_key("Taken_email"));
        assert_eq!(second.len(), 1);
        assert!(second.contains_key("Incorrect_details"));
    }
}
