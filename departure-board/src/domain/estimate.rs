//! Estimated-time tokens.
//!
//! Darwin's `etd`/`et` fields are free text: usually a time, but also
//! "On time", "Cancelled", "Delayed", or missing entirely.

use std::borrow::Cow;

use super::ClockTime;

/// A parsed estimated-time token.
///
/// Parsing never fails: anything unexpected is kept verbatim as
/// [`Estimate::Unrecognised`] so it can still be displayed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Estimate {
    /// No estimate reported (field absent or empty).
    #[default]
    NoReport,
    /// Running to schedule.
    OnTime,
    /// Service cancelled at this location.
    Cancelled,
    /// Delayed with no estimate available.
    Delayed,
    /// Expected at the given time.
    Expected(ClockTime),
    /// Any other non-empty token.
    Unrecognised(String),
}

impl Estimate {
    /// Parse an optional token from the feed.
    ///
    /// ```
    /// use departure_board::domain::{ClockTime, Estimate};
    ///
    /// assert_eq!(Estimate::parse(Some("On time")), Estimate::OnTime);
    /// assert_eq!(Estimate::parse(None), Estimate::NoReport);
    /// assert_eq!(
    ///     Estimate::parse(Some("10:05")),
    ///     Estimate::Expected(ClockTime::from_hm(10, 5).unwrap())
    /// );
    /// ```
    pub fn parse(token: Option<&str>) -> Self {
        match token {
            None | Some("") => Estimate::NoReport,
            Some("On time") => Estimate::OnTime,
            Some("Cancelled") => Estimate::Cancelled,
            Some("Delayed") => Estimate::Delayed,
            Some(other) => match ClockTime::parse_hhmm(other) {
                Ok(t) => Estimate::Expected(t),
                Err(_) => Estimate::Unrecognised(other.to_string()),
            },
        }
    }

    /// The token as it would appear in the feed.
    pub fn token(&self) -> Cow<'_, str> {
        match self {
            Estimate::NoReport => Cow::Borrowed(""),
            Estimate::OnTime => Cow::Borrowed("On time"),
            Estimate::Cancelled => Cow::Borrowed("Cancelled"),
            Estimate::Delayed => Cow::Borrowed("Delayed"),
            Estimate::Expected(t) => Cow::Owned(t.to_string()),
            Estimate::Unrecognised(s) => Cow::Borrowed(s),
        }
    }

    /// The expected time, if one was given.
    pub fn expected(&self) -> Option<ClockTime> {
        match self {
            Estimate::Expected(t) => Some(*t),
            _ => None,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, Estimate::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_tokens() {
        assert_eq!(Estimate::parse(Some("")), Estimate::NoReport);
        assert_eq!(Estimate::parse(Some("Cancelled")), Estimate::Cancelled);
        assert_eq!(Estimate::parse(Some("Delayed")), Estimate::Delayed);
    }

    #[test]
    fn unrecognised_is_kept_verbatim() {
        let est = Estimate::parse(Some("10:5x"));
        assert_eq!(est, Estimate::Unrecognised("10:5x".into()));
        assert_eq!(est.token(), "10:5x");
        assert_eq!(est.expected(), None);
    }

    #[test]
    fn token_matches_feed_text() {
        for token in ["", "On time", "Cancelled", "Delayed", "12:34", "Starts here"] {
            assert_eq!(Estimate::parse(Some(token)).token(), token);
        }
    }

    #[test]
    fn case_sensitive() {
        // Darwin always capitalises status tokens; anything else is opaque.
        assert_eq!(
            Estimate::parse(Some("on time")),
            Estimate::Unrecognised("on time".into())
        );
    }
}
