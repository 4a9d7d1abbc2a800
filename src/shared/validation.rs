use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for age fields typed into the add form
    /// Must be a non-negative whole number of days
    /// - Valid: "0", "180", "0042"
    /// - Invalid: "-1", "1.5", "ten", " 12"
    pub static ref AGE_DAYS_REGEX: Regex = Regex::new(r"^[0-9]+$").unwrap();

    /// Regex for the status field, matching the two statuses the service accepts
    pub static ref STATUS_REGEX: Regex = Regex::new(r"^(Available|Adopted)$").unwrap();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_age_days_regex_valid() {
        assert!(AGE_DAYS_REGEX.is_match("0"));
        assert!(AGE_DAYS_REGEX.is_match("180"));
        assert!(AGE_DAYS_REGEX.is_match("0042"));
    }

    #[test]
    fn test_age_days_regex_invalid() {
        assert!(!AGE_DAYS_REGEX.is_match("-1"));
        assert!(!AGE_DAYS_REGEX.is_match("1.5"));
        assert!(!AGE_DAYS_REGEX.is_match("ten"));
        assert!(!AGE_DAYS_REGEX.is_match(" 12")); // leading space
        assert!(!AGE_DAYS_REGEX.is_match(""));
    }

    #[test]
    fn test_status_regex() {
        assert!(STATUS_REGEX.is_match("Available"));
        assert!(STATUS_REGEX.is_match("Adopted"));
        assert!(!STATUS_REGEX.is_match("available"));
        assert!(!STATUS_REGEX.is_match("Pending"));
        assert!(!STATUS_REGEX.is_match(""));
    }
}
