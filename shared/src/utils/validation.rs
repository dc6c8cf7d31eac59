//! Boundary validation and sanitization helpers.
//!
//! Free-text fields are trimmed and HTML-escaped before storage so that
//! later rendering cannot reflect injected markup; email addresses are
//! normalized (trim + lowercase) so uniqueness is case-insensitive.

use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+]?[(]?[0-9]{1,4}[)]?[-\s./0-9]*$").expect("valid phone regex"));

/// Check if a string is non-empty after trimming.
pub fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}

/// Basic email shape check.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email.trim())
}

/// Phone number shape check (digits, separators, optional leading `+`).
pub fn is_valid_phone(phone: &str) -> bool {
    let trimmed = phone.trim();
    !trimmed.is_empty() && PHONE_RE.is_match(trimmed)
}

/// Normalizes an email for storage and comparison: trim and lowercase.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Trims and escapes HTML-significant characters in free text.
pub fn sanitize_text(value: &str) -> String {
    escape_html(value.trim())
}

/// Escapes `& < > " '` so stored text is inert when rendered.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_detection() {
        assert!(not_blank("Ada"));
        assert!(!not_blank("   "));
        assert!(!not_blank(""));
    }

    #[test]
    fn email_validation() {
        assert!(is_valid_email("a@x.com"));
        assert!(is_valid_email("  First.Last@Example.org "));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("missing@tld"));
    }

    #[test]
    fn phone_validation() {
        assert!(is_valid_phone("+234 801 234 5678"));
        assert!(is_valid_phone("(080) 1234-5678"));
        assert!(!is_valid_phone("call me maybe"));
        assert!(!is_valid_phone(""));
    }

    #[test]
    fn email_normalization_is_case_insensitive() {
        assert_eq!(normalize_email(" A@X.Com "), "a@x.com");
    }

    #[test]
    fn html_is_escaped() {
        assert_eq!(
            sanitize_text("  <b>Agbada</b> & \"lace\"  "),
            "&lt;b&gt;Agbada&lt;/b&gt; &amp; &quot;lace&quot;"
        );
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(sanitize_text("Evening gown"), "Evening gown");
    }
}
