//! Minute-of-day clock times.
//!
//! Timetables record wall-clock times of day, not instants: a leg departing
//! at 23:50 and arriving at 00:10 is a 20-minute ride, not a negative one.
//! This module provides a clock-time type whose arithmetic is cyclic over
//! the 1440-minute day.

use std::fmt;

/// Number of minutes in a day. Clock arithmetic wraps at this value.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

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

/// A wall-clock time of day, stored as minutes since midnight.
///
/// Values are always in `[0, 1440)`. Durations between two clock times are
/// measured with [`ClockTime::minutes_until`], which wraps past midnight.
///
/// # Examples
///
/// ```
/// use transit_router::domain::ClockTime;
///
/// let dep = ClockTime::parse("23:50").unwrap();
/// let arr = ClockTime::parse("00:10").unwrap();
/// assert_eq!(dep.minutes_until(arr), 20);
/// assert_eq!(arr.to_string(), "00:10");
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClockTime(u16);

impl ClockTime {
    /// Midnight, the zero of the clock.
    pub const MIDNIGHT: ClockTime = ClockTime(0);

    /// Create a clock time from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Result<Self, TimeError> {
        if minutes >= MINUTES_PER_DAY {
            return Err(TimeError::new("minutes since midnight must be below 1440"));
        }
        Ok(Self(minutes))
    }

    /// Create a clock time from hour and minute components.
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, TimeError> {
        if hour > 23 {
            return Err(TimeError::new("hour must be 0-23"));
        }
        if minute > 59 {
            return Err(TimeError::new("minute must be 0-59"));
        }
        Ok(Self(hour * 60 + minute))
    }

    /// Parse a time from `HH:MM` or `HH:MM:SS` format.
    ///
    /// Hours of 24 or above are rejected. Seconds, if present, are ignored;
    /// timetables are minute-granular.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_router::domain::ClockTime;
    ///
    /// assert!(ClockTime::parse("00:00").is_ok());
    /// assert!(ClockTime::parse("23:59").is_ok());
    /// assert!(ClockTime::parse("8:05").is_ok());
    ///
    /// assert!(ClockTime::parse("24:00").is_err());
    /// assert!(ClockTime::parse("12:60").is_err());
    /// assert!(ClockTime::parse("noon").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self, TimeError> {
        let (hour, minute) = split_hm(s)?;
        Self::from_hm(hour, minute)
    }

    /// Parse a time from `HH:MM` or `HH:MM:SS` format, wrapping the hour
    /// modulo 24.
    ///
    /// Source timetables encode services running past midnight with hours of
    /// 24 and above (`24:05:00` means 00:05 the next day). On the cyclic
    /// clock those collapse onto the same time of day.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_router::domain::ClockTime;
    ///
    /// let t = ClockTime::parse_wrapping("24:05:00").unwrap();
    /// assert_eq!(t, ClockTime::parse("00:05").unwrap());
    /// ```
    pub fn parse_wrapping(s: &str) -> Result<Self, TimeError> {
        let (hour, minute) = split_hm(s)?;
        Self::from_hm(hour % 24, minute)
    }

    /// Returns minutes since midnight (0-1439).
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Returns the hour (0-23).
    pub fn hour(self) -> u16 {
        self.0 / 60
    }

    /// Returns the minute within the hour (0-59).
    pub fn minute(self) -> u16 {
        self.0 % 60
    }

    /// Cyclic forward difference: minutes until clock time `later` next
    /// occurs, starting from `self`.
    ///
    /// Wraps past midnight, so the result is always in `[0, 1440)`.
    ///
    /// # Examples
    ///
    /// ```
    /// use transit_router::domain::ClockTime;
    ///
    /// let a = ClockTime::parse("10:00").unwrap();
    /// let b = ClockTime::parse("10:25").unwrap();
    /// assert_eq!(a.minutes_until(b), 25);
    /// // Going "backwards" wraps through midnight instead.
    /// assert_eq!(b.minutes_until(a), 1440 - 25);
    /// ```
    pub fn minutes_until(self, later: ClockTime) -> u16 {
        if later.0 >= self.0 {
            later.0 - self.0
        } else {
            later.0 + MINUTES_PER_DAY - self.0
        }
    }

    /// The clock time `minutes` minutes after `self`, wrapping at midnight.
    pub fn advance(self, minutes: u32) -> ClockTime {
        let total = (u32::from(self.0) + minutes) % u32::from(MINUTES_PER_DAY);
        ClockTime(total as u16)
    }
}

fn split_hm(s: &str) -> Result<(u16, u16), TimeError> {
    let mut parts = s.split(':');
    let hour = parse_component(parts.next())?;
    let minute = parse_component(parts.next())?;
    // A third component (seconds) is tolerated, anything further is not.
    match (parts.next(), parts.next()) {
        (_, Some(_)) => Err(TimeError::new("expected HH:MM or HH:MM:SS")),
        (Some(sec), None) if sec.parse::<u16>().is_err() => {
            Err(TimeError::new("invalid seconds digits"))
        }
        _ => Ok((hour, minute)),
    }
}

fn parse_component(part: Option<&str>) -> Result<u16, TimeError> {
    part.ok_or_else(|| TimeError::new("expected HH:MM or HH:MM:SS"))?
        .parse()
        .map_err(|_| TimeError::new("invalid digits"))
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl fmt::Debug for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ClockTime({self})")
    }
}
