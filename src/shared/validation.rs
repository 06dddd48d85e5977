use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex matching every character that is not an ASCII digit.
    /// Used to normalize phone numbers and postal codes before storage.
    /// - "(11) 99999-9999" -> "11999999999"
    /// - "01310-100" -> "01310100"
    pub static ref NON_DIGIT_REGEX: Regex = Regex::new(r"[^0-9]").unwrap();
}

/// Strip everything but ASCII digits from `raw`.
pub fn digits_only(raw: &str) -> String {
    NON_DIGIT_REGEX.replace_all(raw, "").into_owned()
}

/// Normalize a Brazilian phone number to its bare digits.
///
/// Accepts any formatting as long as the digits amount to a two-digit DDD
/// plus an 8 or 9 digit number. A leading `55` country code is dropped
/// before the length check.
pub fn normalize_phone(raw: &str) -> Option<String> {
    let mut digits = digits_only(raw);
    if digits.len() > 11 && digits.starts_with("55") {
        digits = digits.split_off(2);
    }
    match digits.len() {
        10 | 11 => Some(digits),
        _ => None,
    }
}

/// Truncate `value` to at most `max` characters, never splitting a char.
pub fn truncate_chars(value: &str, max: usize) -> &str {
    match value.char_indices().nth(max) {
        Some((idx, _)) => &value[..idx],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digits_only() {
        assert_eq!(digits_only("(11) 99999-9999"), "11999999999");
        assert_eq!(digits_only("01310-100"), "01310100");
        assert_eq!(digits_only("abc"), "");
        assert_eq!(digits_only(""), "");
    }

    #[test]
    fn test_normalize_phone_valid() {
        assert_eq!(normalize_phone("(11) 99999-9999").as_deref(), Some("11999999999"));
        assert_eq!(normalize_phone("11 3333-4444").as_deref(), Some("1133334444")); // landline, 10 digits
        assert_eq!(normalize_phone("+55 11 99999-9999").as_deref(), Some("11999999999")); // country code dropped
        assert_eq!(normalize_phone("11999999999").as_deref(), Some("11999999999"));
    }

    #[test]
    fn test_normalize_phone_invalid() {
        assert_eq!(normalize_phone("123"), None); // too short
        assert_eq!(normalize_phone("999999999"), None); // missing DDD
        assert_eq!(normalize_phone("119999999999"), None); // too long
        assert_eq!(normalize_phone("sem numero"), None); // no digits at all
        assert_eq!(normalize_phone(""), None);
    }

    #[test]
    fn test_truncate_chars() {
        assert_eq!(truncate_chars("abcdef", 4), "abcd");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("ação", 3), "açã"); // counts chars, not bytes
        assert_eq!(truncate_chars("", 5), "");
    }
}
