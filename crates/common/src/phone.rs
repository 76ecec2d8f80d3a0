//! Russian mobile number normalization.
//!
//! Every phone number stored by the service goes through [`normalize`] and is
//! kept in the canonical `+7 DDD DDD DD DD` form. Accepted inputs are the bare
//! 10-digit subscriber number (`9651091162`), the domestic trunk form
//! (`89651091162`) and the international form with or without `+`
//! (`+79651091162`), with any punctuation or spacing mixed in.

use std::fmt;

use serde::{Serialize, Serializer};
use thiserror::Error;

const COUNTRY_CODE: &str = "+7";
const SUBSCRIBER_DIGITS: usize = 10;
const MOBILE_PREFIX: u8 = b'9';

/// Rejection produced when input cannot be read as a Russian mobile number.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid Russian phone number format: {input}")]
pub struct InvalidFormat {
    pub input: String,
}

/// A phone number in canonical form. Only [`normalize`] builds one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PhoneNumber {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Serialize for PhoneNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

/// Normalize a human-entered phone number to `+7 DDD DDD DD DD`.
///
/// Non-digits are discarded, a leading `8` or `7` is dropped from 11-digit
/// input, and what remains must be exactly ten digits starting with `9`.
pub fn normalize(raw: &str) -> Result<PhoneNumber, InvalidFormat> {
    let digits: Vec<u8> = raw.bytes().filter(u8::is_ascii_digit).collect();

    let subscriber = match digits.as_slice() {
        [b'8', rest @ ..] | [b'7', rest @ ..] if digits.len() == SUBSCRIBER_DIGITS + 1 => rest,
        all => all,
    };

    if subscriber.len() != SUBSCRIBER_DIGITS || subscriber[0] != MOBILE_PREFIX {
        return Err(InvalidFormat { input: raw.to_string() });
    }

    let s: String = subscriber.iter().map(|&b| char::from(b)).collect();
    Ok(PhoneNumber(format!(
        "{COUNTRY_CODE} {} {} {} {}",
        &s[0..3],
        &s[3..6],
        &s[6..8],
        &s[8..10]
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    const CANONICAL: &str = "+7 965 109 11 62";

    fn is_canonical_shape(s: &str) -> bool {
        let parts: Vec<&str> = s.split(' ').collect();
        parts.len() == 5
            && parts[0] == "+7"
            && [3, 3, 2, 2]
                .iter()
                .zip(&parts[1..])
                .all(|(len, p)| p.len() == *len && p.bytes().all(|b| b.is_ascii_digit()))
    }

    #[test]
    fn accepts_common_formats() {
        for input in [
            "+79651091162",
            "89651091162",
            "9651091162",
            "+7 (965) 109-11-62",
            "(965)1091162",
            "+7-965-109-11-62",
            "8 965 109 11 62",
            "79651091162",
        ] {
            let got = normalize(input).unwrap_or_else(|e| panic!("{input}: {e}"));
            assert_eq!(got.as_str(), CANONICAL, "input {input}");
        }
    }

    #[test]
    fn rejects_garbage() {
        for input in ["123", "abc", "", "+1234567890", "   ", "+7", "8"] {
            let err = normalize(input).unwrap_err();
            assert_eq!(err.input, input);
        }
    }

    #[test]
    fn rejects_eleven_digits_without_trunk_or_country_code() {
        assert!(normalize("99651091162").is_err());
        assert!(normalize("19651091162").is_err());
    }

    #[test]
    fn rejects_non_mobile_prefix() {
        // Moscow landline
        assert!(normalize("+7 495 123 45 67").is_err());
        assert!(normalize("84951234567").is_err());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(normalize("965109116").is_err());
        assert!(normalize("+7 965 109 11 623").is_err());
        assert!(normalize("889651091162").is_err());
    }

    #[test]
    fn only_one_prefix_digit_is_stripped() {
        // 12 digits never reduce to 10
        assert!(normalize("879651091162").is_err());
        assert!(normalize("789651091162").is_err());
    }

    #[test]
    fn non_ascii_digits_are_ignored() {
        // Arabic-Indic digits and letters are dropped like any other non-digit
        assert_eq!(normalize("тел. 8 (965) 109-11-62").unwrap().as_str(), CANONICAL);
        assert!(normalize("٩٦٥١٠٩١١٦٢").is_err());
    }

    #[test]
    fn error_message_contains_input() {
        let err = normalize("hello").unwrap_err();
        assert_eq!(err.to_string(), "Invalid Russian phone number format: hello");
    }

    #[test]
    fn canonical_output_is_a_fixed_point() {
        let once = normalize("8 (912) 000-00-01").unwrap();
        let twice = normalize(once.as_str()).unwrap();
        assert_eq!(once, twice);

        let digits: String = once.as_str().chars().filter(char::is_ascii_digit).collect();
        assert_eq!(normalize(&digits).unwrap(), once);
    }

    #[test]
    fn every_nine_led_subscriber_number_is_accepted() {
        for n in (0..1_000_000_000u64).step_by(7_919_113) {
            let subscriber = format!("9{n:09}");
            for raw in [subscriber.clone(), format!("8{subscriber}"), format!("+7{subscriber}")] {
                let out = normalize(&raw).unwrap();
                assert!(is_canonical_shape(out.as_str()), "{raw} -> {out}");
                assert!(out.as_str().starts_with("+7 9"));
            }
        }
    }

    #[test]
    fn serializes_as_plain_string() {
        let n = normalize("9651091162").unwrap();
        assert_eq!(serde_json::to_string(&n).unwrap(), format!("\"{CANONICAL}\""));
    }
}
