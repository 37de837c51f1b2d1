//! Station code types.

use std::fmt;

use serde::{Serialize, Serializer};

/// Error returned when parsing an invalid CRS code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid CRS code: {reason}")]
pub struct InvalidCrs {
    reason: &'static str,
}

/// A valid 3-letter CRS (Computer Reservation System) station code.
///
/// CRS codes are always 3 uppercase ASCII letters. This type guarantees
/// that any `Crs` value is valid by construction.
///
/// # Examples
///
/// ```
/// use departure_board::domain::Crs;
///
/// let kgx = Crs::parse("KGX").unwrap();
/// assert_eq!(kgx.as_str(), "KGX");
///
/// // Lowercase is rejected
/// assert!(Crs::parse("kgx").is_err());
///
/// // Wrong length is rejected
/// assert!(Crs::parse("KG").is_err());
/// assert!(Crs::parse("KGXX").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Crs([u8; 3]);

impl Crs {
    /// Parse a CRS code from a string.
    ///
    /// The input must be exactly 3 uppercase ASCII letters (A-Z).
    pub fn parse(s: &str) -> Result<Self, InvalidCrs> {
        let bytes = s.as_bytes();

        if bytes.len() != 3 {
            return Err(InvalidCrs {
                reason: "must be exactly 3 characters",
            });
        }

        for &b in bytes {
            if !b.is_ascii_uppercase() {
                return Err(InvalidCrs {
                    reason: "must be uppercase ASCII letters A-Z",
                });
            }
        }

        Ok(Crs([bytes[0], bytes[1], bytes[2]]))
    }

    /// Parse a user-supplied CRS code, ignoring surrounding whitespace and case.
    ///
    /// ```
    /// use departure_board::domain::Crs;
    ///
    /// assert_eq!(Crs::parse_normalized(" kgx ").unwrap().as_str(), "KGX");
    /// ```
    pub fn parse_normalized(s: &str) -> Result<Self, InvalidCrs> {
        Self::parse(&s.trim().to_ascii_uppercase())
    }

    /// Returns the CRS code as a string slice.
    pub fn as_str(&self) -> &str {
        // Only ASCII uppercase letters are ever stored.
        std::str::from_utf8(&self.0).unwrap_or_default()
    }

    /// Whether this code appears in `set`.
    pub fn is_in(&self, set: &[Crs]) -> bool {
        set.contains(self)
    }
}

impl Serialize for Crs {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Debug for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Crs({})", self.as_str())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_crs() {
        for code in ["KGX", "PAD", "RDG", "AAA", "ZZZ"] {
            assert_eq!(Crs::parse(code).unwrap().as_str(), code);
        }
    }

    #[test]
    fn reject_malformed() {
        for code in ["", "K", "KG", "KGXX", "kgx", "KGx", "K1X", "K-X", "K X", "KÖX"] {
            assert!(Crs::parse(code).is_err(), "{code:?} should be rejected");
        }
    }

    #[test]
    fn parse_normalized_trims_and_uppercases() {
        assert_eq!(Crs::parse_normalized("pad").unwrap().as_str(), "PAD");
        assert_eq!(Crs::parse_normalized("  Eus\n").unwrap().as_str(), "EUS");
        assert!(Crs::parse_normalized("p a d").is_err());
        assert!(Crs::parse_normalized("").is_err());
    }

    #[test]
    fn membership() {
        let set = [Crs::parse("KGX").unwrap(), Crs::parse("PAD").unwrap()];
        assert!(Crs::parse("PAD").unwrap().is_in(&set));
        assert!(!Crs::parse("EUS").unwrap().is_in(&set));
        assert!(!Crs::parse("EUS").unwrap().is_in(&[]));
    }

    #[test]
    fn display_and_debug() {
        let crs = Crs::parse("EUS").unwrap();
        assert_eq!(crs.to_string(), "EUS");
        assert_eq!(format!("{crs:?}"), "Crs(EUS)");
    }

    #[test]
    fn serializes_as_plain_string() {
        let crs = Crs::parse("BRI").unwrap();
        assert_eq!(serde_json::to_string(&crs).unwrap(), r#""BRI""#);
    }
}
