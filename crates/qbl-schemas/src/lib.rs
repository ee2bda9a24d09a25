//! qbl-schemas
//!
//! Domain types shared by every Quibble crate: events, transactions and the
//! validation rules the point-of-sale side applies before anything reaches a
//! transaction log.
//!
//! Pure types. No IO.

mod event;
mod transaction;

pub use event::{Event, EventDate, EventName};
pub use transaction::{validate_creation_date, Transaction, TransactionCode};

use thiserror::Error;

/// Longest event name, in characters.
pub const MAX_NAME_LEN: usize = 20;

/// Ticket counts live in `[0, MAX_TICKETS]`.
pub const MAX_TICKETS: u32 = 99_999;

/// Largest value a `YYMMDD` date can hold.
pub const MAX_DATE: u32 = 999_999;

/// Name field of the snapshot's closing line. No event may carry it.
pub const SNAPSHOT_TERMINATOR: &str = "END";

/// Farthest ahead (in `YYMMDD` arithmetic) a new event may be scheduled.
pub const CREATION_WINDOW: u32 = 20_000;

/// Saturate a ticket count into `[0, MAX_TICKETS]`.
pub fn clamp_ticket_count(count: u32) -> u32 {
    count.min(MAX_TICKETS)
}

/// Upstream input validation failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("event name must not be empty")]
    EmptyName,

    #[error("event name is {len} characters, limit is {MAX_NAME_LEN}")]
    NameTooLong { len: usize },

    #[error("event name contains a control character")]
    ControlCharacter,

    #[error("event name must not end in whitespace")]
    TrailingWhitespace,

    #[error("event name '{SNAPSHOT_TERMINATOR}' is reserved for the snapshot terminator")]
    ReservedName,

    #[error("ticket count {count} outside [0, {MAX_TICKETS}]")]
    TicketCountOutOfRange { count: u32 },

    #[error("date value {value} does not fit in YYMMDD")]
    DateOutOfRange { value: u32 },

    #[error("'{raw}' is not a 6-digit YYMMDD date")]
    MalformedDate { raw: String },

    #[error("{date} is not a calendar date")]
    NotACalendarDate { date: EventDate },

    #[error("event date {date} is before the current date {current}")]
    DateInPast { date: EventDate, current: EventDate },

    #[error("event date {date} is more than two years after {current}")]
    DateBeyondWindow { date: EventDate, current: EventDate },
}
