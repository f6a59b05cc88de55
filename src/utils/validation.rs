//! Input validation utilities

/// Sanitize string input (remove control characters, trim whitespace)
pub fn sanitize_string(input: &str) -> String {
    input
        .chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect::<String>()
        .trim()
        .to_string()
}

/// Normalize an email address for lookups and storage
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_string() {
        assert_eq!(sanitize_string("  Round 2019-05 \u{0007}"), "Round 2019-05");
        assert_eq!(sanitize_string("line\nbreak"), "line\nbreak");
    }

    #[test]
    fn test_normalize_email() {
        assert_eq!(normalize_email(" Foo@Bar.com "), "foo@bar.com");
    }
}
