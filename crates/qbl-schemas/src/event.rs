use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::{ValidationError, MAX_DATE, MAX_NAME_LEN, SNAPSHOT_TERMINATOR};

// ---------------------------------------------------------------------------
// EventName
// ---------------------------------------------------------------------------

/// Validated event name: 1..=20 printable characters, case-sensitive, never
/// the snapshot terminator.
///
/// This is the only way a name gets into a record, so the codec can pad to
/// the fixed width without re-checking length.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EventName(String);

impl EventName {
    pub fn new(name: impl Into<String>) -> Result<Self, ValidationError> {
        let name = name.into();
        let len = name.chars().count();
        if len == 0 {
            return Err(ValidationError::EmptyName);
        }
        if len > MAX_NAME_LEN {
            return Err(ValidationError::NameTooLong { len });
        }
        if name.chars().any(char::is_control) {
            return Err(ValidationError::ControlCharacter);
        }
        // Padding is stripped on read; a trailing space would not survive.
        if name.ends_with(char::is_whitespace) {
            return Err(ValidationError::TrailingWhitespace);
        }
        // A snapshot reader stops at the first `END` name field.
        if name == SNAPSHOT_TERMINATOR {
            return Err(ValidationError::ReservedName);
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for EventName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EventName {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EventName> for String {
    fn from(value: EventName) -> Self {
        value.0
    }
}

// ---------------------------------------------------------------------------
// EventDate
// ---------------------------------------------------------------------------

/// A `YYMMDD` date.
///
/// Ordering is plain numeric ordering of the six digits, not calendar
/// ordering; there is no century disambiguation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawDate", into = "String")]
pub struct EventDate(u32);

impl EventDate {
    /// `000000`, written by the front end for transactions that carry no date.
    pub const ZERO: EventDate = EventDate(0);

    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value > MAX_DATE {
            return Err(ValidationError::DateOutOfRange { value });
        }
        Ok(Self(value))
    }

    pub fn from_naive(date: NaiveDate) -> Self {
        let yy = date.year().rem_euclid(100) as u32;
        Self(yy * 10_000 + date.month() * 100 + date.day())
    }

    /// Current local date.
    pub fn today() -> Self {
        Self::from_naive(Local::now().date_naive())
    }

    /// Calendar date for this value, if it names one.
    pub fn to_naive(self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.to_string(), "%y%m%d").ok()
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for EventDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:06}", self.0)
    }
}

impl FromStr for EventDate {
    type Err = ValidationError;

    /// Exactly six ASCII digits.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 6 || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(ValidationError::MalformedDate { raw: s.to_string() });
        }
        s.parse::<u32>()
            .map(Self)
            .map_err(|_| ValidationError::MalformedDate { raw: s.to_string() })
    }
}

impl From<EventDate> for String {
    fn from(value: EventDate) -> Self {
        value.to_string()
    }
}

/// YAML happily turns `160201` into a number; accept either shape.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Number(u32),
    Text(String),
}

impl TryFrom<RawDate> for EventDate {
    type Error = ValidationError;

    fn try_from(raw: RawDate) -> Result<Self, Self::Error> {
        match raw {
            RawDate::Number(n) => EventDate::new(n),
            RawDate::Text(s) => s.trim().parse(),
        }
    }
}

// ---------------------------------------------------------------------------
// Event
// ---------------------------------------------------------------------------

/// One ticketed occasion.
///
/// Identity is the name. The derived equality compares every field and is
/// meant for tests and reports; ledger lookup goes through the name key.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub name: EventName,
    pub date: EventDate,
    pub ticket_count: u32,
}

impl Event {
    pub fn new(name: EventName, date: EventDate, ticket_count: u32) -> Self {
        Self {
            name,
            date,
            ticket_count,
        }
    }
}
