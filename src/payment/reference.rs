//! Finnish national payment reference numbers.
//!
//! A reference is 4-20 digits where the last digit is a check digit computed
//! from the preceding digits with repeating weights 7, 3, 1 from the right.

const WEIGHTS: [u32; 3] = [7, 3, 1];

/// Shortest valid reference, check digit included.
pub const MIN_REFERENCE_LEN: usize = 4;

/// Longest valid reference, check digit included.
pub const MAX_REFERENCE_LEN: usize = 20;

fn digits_only(input: &str) -> Option<String> {
    let stripped: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    if !stripped.is_empty() && stripped.bytes().all(|b| b.is_ascii_digit()) {
        Some(stripped)
    } else {
        None
    }
}

/// Check digit for a reference base.
///
/// Returns `None` for empty or non-numeric bases.
pub fn check_digit(base: &str) -> Option<u8> {
    let digits = digits_only(base)?;
    let sum: u32 = digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| u32::from(b - b'0') * WEIGHTS[i % 3])
        .sum();
    Some(((10 - sum % 10) % 10) as u8)
}

/// Append the check digit to a base of 3-19 digits.
pub fn create_reference(base: &str) -> Option<String> {
    let digits = digits_only(base)?;
    if !(MIN_REFERENCE_LEN - 1..MAX_REFERENCE_LEN).contains(&digits.len()) {
        return None;
    }
    let check = check_digit(&digits)?;
    Some(format!("{}{}", digits, check))
}

/// Reference for the `sequence`:th invoice of a year: `YYYY` + 4-digit sequence + check digit.
pub fn generate_reference(year: i32, sequence: u32) -> Option<String> {
    create_reference(&format!("{}{:04}", year, sequence))
}

/// Whether a reference has a valid length and check digit.
pub fn is_valid_reference(reference: &str) -> bool {
    let Some(digits) = digits_only(reference) else {
        return false;
    };
    if !(MIN_REFERENCE_LEN..=MAX_REFERENCE_LEN).contains(&digits.len()) {
        return false;
    }
    let (base, check) = digits.split_at(digits.len() - 1);
    check_digit(base).map(|d| d.to_string()) == Some(check.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_digit() {
        assert_eq!(check_digit("1"), Some(3));
        assert_eq!(check_digit("123"), Some(2));
        assert_eq!(check_digit("1234"), Some(4));
        assert_eq!(check_digit("20250001"), Some(0));
        assert_eq!(check_digit(""), None);
        assert_eq!(check_digit("12a"), None);
    }

    #[test]
    fn test_create_reference() {
        assert_eq!(create_reference("123").as_deref(), Some("1232"));
        assert_eq!(create_reference("1 234").as_deref(), Some("12344"));
        assert_eq!(create_reference("12"), None);
        assert_eq!(create_reference(&"1".repeat(20)), None);
    }

    #[test]
    fn test_generate_reference() {
        assert_eq!(generate_reference(2025, 1).as_deref(), Some("202500010"));
    }

    #[test]
    fn test_is_valid_reference() {
        assert!(is_valid_reference("12344"));
        assert!(is_valid_reference("1232"));
        assert!(is_valid_reference("2025 00010"));
        assert!(!is_valid_reference("12345"));
        assert!(!is_valid_reference("13"));
        assert!(!is_valid_reference("RF18539007547034"));
    }
}
