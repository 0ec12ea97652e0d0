#![forbid(unsafe_code)]

//! Recipient address validation.
//!
//! This is shape validation, not deliverability: one `@`, a non-empty
//! local part without whitespace, and a dotted domain whose labels are
//! alphanumeric-or-hyphen. Anything fancier belongs to the transport.

/// Whether the string looks like a sendable email address.
#[must_use]
pub fn is_valid(address: &str) -> bool {
    let address = address.trim();
    if address.len() < 6 {
        return false;
    }
    let Some((local, domain)) = address.split_once('@') else {
        return false;
    };
    if local.is_empty() || local.chars().any(|c| c.is_whitespace() || c == '@') {
        return false;
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return false;
    }
    domain.split('.').all(|label| {
        !label.is_empty()
            && !label.starts_with('-')
            && !label.ends_with('-')
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_addresses() {
        assert!(is_valid("user@example.com"));
        assert!(is_valid("first.last@mail.example.co"));
        assert!(is_valid("  padded@example.org  "));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_valid("not-an-email"));
        assert!(!is_valid(""));
        assert!(!is_valid("a@b.c"));
        assert!(!is_valid("@example.com"));
        assert!(!is_valid("user@example"));
        assert!(!is_valid("user@@example.com"));
        assert!(!is_valid("us er@example.com"));
        assert!(!is_valid("user@.example.com"));
        assert!(!is_valid("user@example.com."));
        assert!(!is_valid("user@exa_mple.com"));
    }
}
