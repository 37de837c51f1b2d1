//! Wall-clock times as they appear on a departure board.
//!
//! Darwin reports times as "HH:MM" strings in UK local time with no date.
//! The board only ever compares times within a single journey, so no date
//! or midnight rollover is tracked here.

use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A time of day with minute precision.
///
/// # Examples
///
/// ```
/// use departure_board::domain::ClockTime;
///
/// let dep = ClockTime::parse_hhmm("10:05").unwrap();
/// let arr = ClockTime::parse_hhmm("10:20").unwrap();
/// assert_eq!(dep.minutes_until(arr), 15);
/// assert_eq!(arr.to_string(), "10:20");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    /// Minutes since midnight (0..1440).
    minutes: u16,
}

impl ClockTime {
    /// Parse a time from strict "HH:MM" format.
    ///
    /// ```
    /// use departure_board::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse_hhmm("00:00").is_ok());
    /// assert!(ClockTime::parse_hhmm("23:59").is_ok());
    ///
    /// assert!(ClockTime::parse_hhmm("1430").is_err());
    /// assert!(ClockTime::parse_hhmm("14:3").is_err());
    /// assert!(ClockTime::parse_hhmm("24:00").is_err());
    /// assert!(ClockTime::parse_hhmm("On time").is_err());
    /// ```
    pub fn parse_hhmm(s: &str) -> Result<Self, TimeError> {
        if s.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }

        let bytes = s.as_bytes();
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }

        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }

        Ok(Self {
            minutes: hour * 60 + minute,
        })
    }

    /// Build a time from hour and minute, if they are in range.
    pub fn from_hm(hour: u16, minute: u16) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self {
            minutes: hour * 60 + minute,
        })
    }

    /// Returns the hour (0-23).
    pub fn hour(&self) -> u16 {
        self.minutes / 60
    }

    /// Returns the minute (0-59).
    pub fn minute(&self) -> u16 {
        self.minutes % 60
    }

    /// Signed minutes from `self` to `later` on the same day.
    ///
    /// Negative when `later` is earlier in the day; no midnight rollover
    /// is applied.
    pub fn minutes_until(&self, later: Self) -> i32 {
        i32::from(later.minutes) - i32::from(self.minutes)
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self})")
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

fn parse_two_digits(bytes: &[u8]) -> Option<u16> {
    match bytes {
        [a @ b'0'..=b'9', b @ b'0'..=b'9'] => Some(u16::from(a - b'0') * 10 + u16::from(b - b'0')),
        _ => None,
    }
}
