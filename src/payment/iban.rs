//! IBAN normalization and ISO 13616 mod-97 validation.

/// Country prefix of Finnish accounts.
pub const FINNISH_PREFIX: &str = "FI";

/// Length of a Finnish IBAN without spaces.
pub const FINNISH_IBAN_LEN: usize = 18;

/// Strip whitespace and uppercase.
pub fn normalize(iban: &str) -> String {
    iban.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Numeric body of a Finnish IBAN (check digits + BBAN), 16 characters.
///
/// Returns `None` unless the normalized input starts with `FI` and is 18
/// characters long. The checksum is not verified here.
pub fn finnish_account_body(iban: &str) -> Option<String> {
    let normalized = normalize(iban);
    if normalized.starts_with(FINNISH_PREFIX) && normalized.len() == FINNISH_IBAN_LEN {
        Some(normalized[FINNISH_PREFIX.len()..].to_string())
    } else {
        None
    }
}

/// Remainder of the rearranged IBAN modulo 97.
///
/// Letters expand to two digits (`A` = 10 .. `Z` = 35). The remainder is
/// folded digit by digit so arbitrarily long inputs never overflow.
fn mod97(rearranged: &str) -> Option<u32> {
    let mut remainder: u32 = 0;
    for ch in rearranged.chars() {
        let value = ch.to_digit(36)?;
        if value >= 10 {
            remainder = (remainder * 100 + value) % 97;
        } else {
            remainder = (remainder * 10 + value) % 97;
        }
    }
    Some(remainder)
}

fn rearrange(normalized: &str) -> String {
    format!("{}{}", &normalized[4..], &normalized[..4])
}

fn has_valid_shape(normalized: &str) -> bool {
    let bytes = normalized.as_bytes();
    (15..=34).contains(&bytes.len())
        && bytes[..2].iter().all(u8::is_ascii_uppercase)
        && bytes[2..4].iter().all(u8::is_ascii_digit)
        && bytes.iter().all(u8::is_ascii_alphanumeric)
}

/// Whether the IBAN passes the mod-97 check.
pub fn is_valid_iban(iban: &str) -> bool {
    let normalized = normalize(iban);
    if !has_valid_shape(&normalized) {
        return false;
    }
    mod97(&rearrange(&normalized)) == Some(1)
}

/// Compute the two check digits for an IBAN.
///
/// The existing check digits (positions 3-4) are ignored.
pub fn check_digits(iban: &str) -> Option<String> {
    let normalized = normalize(iban);
    if !has_valid_shape(&normalized) {
        return None;
    }
    let zeroed = format!("{}00{}", &normalized[..2], &normalized[4..]);
    let remainder = mod97(&rearrange(&zeroed))?;
    Some(format!("{:02}", 98 - remainder))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(" fi14 1009 3000 1234 58 "), "FI1410093000123458");
        assert_eq!(normalize("FI14\t1009"), "FI141009");
    }

    #[test]
    fn test_finnish_account_body() {
        assert_eq!(
            finnish_account_body("FI14 1009 3000 1234 58").as_deref(),
            Some("1410093000123458")
        );
        assert_eq!(finnish_account_body("FI141009300012345"), None);
        assert_eq!(finnish_account_body("SE1410093000123458"), None);
        assert_eq!(finnish_account_body(""), None);
    }

    #[test]
    fn test_valid_ibans() {
        assert!(is_valid_iban("FI14 1009 3000 1234 58"));
        assert!(is_valid_iban("FI2112345600000785"));
        assert!(is_valid_iban("GB82 WEST 1234 5698 7654 32"));
    }

    #[test]
    fn test_invalid_ibans() {
        assert!(!is_valid_iban("FI1510093000123458"));
        assert!(!is_valid_iban("FI14"));
        assert!(!is_valid_iban("1410093000123458XX"));
        assert!(!is_valid_iban("FI14-1009-3000-1234-58"));
    }

    #[test]
    fn test_check_digits() {
        assert_eq!(check_digits("FI0010093000123458").as_deref(), Some("14"));
        assert_eq!(check_digits("FI9912345600000785").as_deref(), Some("21"));
        assert_eq!(check_digits("XX"), None);
    }
}
