//! # Validation Utilities
//!
//! Input validation helpers.

/// Validate that a string is not empty.
pub fn validate_not_empty(value: &str, field_name: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        Err(format!("{} cannot be empty", field_name))
    } else {
        Ok(())
    }
}

/// Validate a non-negative decimal number such as `"12"`, `"0.5"` or `"3."`.
pub fn validate_decimal(value: &str, field_name: &str) -> Result<(), String> {
    validate_not_empty(value, field_name)?;
    let value = value.trim();
    let mut parts = value.splitn(2, '.');
    let int_part = parts.next().unwrap_or_default();
    let frac_part = parts.next().unwrap_or_default();

    let digits_only = |s: &str| s.chars().all(|c| c.is_ascii_digit());
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(format!("{} must be a number", field_name));
    }
    if !digits_only(int_part) || !digits_only(frac_part) {
        return Err(format!("{} must be a non-negative number", field_name));
    }
    Ok(())
}

/// Drop every character a non-negative decimal input cannot contain.
///
/// Keeps ASCII digits and the first `.`; a typed `-` never survives.
pub fn sanitize_decimal_input(value: &str) -> String {
    let mut seen_dot = false;
    value
        .chars()
        .filter(|c| match c {
            '0'..='9' => true,
            '.' if !seen_dot => {
                seen_dot = true;
                true
            }
            _ => false,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_decimal() {
        assert!(validate_decimal("100", "Deposit").is_ok());
        assert!(validate_decimal("0.25", "Deposit").is_ok());
        assert!(validate_decimal(".5", "Deposit").is_ok());
        assert!(validate_decimal("", "Deposit").is_err());
        assert!(validate_decimal(".", "Deposit").is_err());
        assert!(validate_decimal("-1", "Deposit").is_err());
        assert!(validate_decimal("1e18", "Deposit").is_err());
        assert!(validate_decimal("1.2.3", "Deposit").is_err());
    }

    #[test]
    fn test_sanitize_decimal_input() {
        assert_eq!(sanitize_decimal_input("-12"), "12");
        assert_eq!(sanitize_decimal_input("1.2.3"), "1.23");
        assert_eq!(sanitize_decimal_input("abc4"), "4");
    }
}
