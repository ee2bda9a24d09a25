//! qbl-codec
//!
//! Fixed-width text records exchanged between the point-of-sale front end and
//! the reconciliation back end.
//!
//! # Layouts (0-indexed columns, inclusive)
//!
//! Master record:       `DDDDDD CCCCC NNNNNNNNNNNNNNNNNNNN`
//! - 0-5 date, 7-11 ticket count, 13+ name padded to 20.
//!
//! Snapshot:            `NNNNNNNNNNNNNNNNNNNN CCCCC`
//! - 0-19 name, 21-25 ticket count; last line is `END` with count `00000`.
//!
//! Transaction log:     `TT NNNNNNNNNNNNNNNNNNNN DDDDDD CCCCC...`
//! - 0-1 code, 3-22 name, 24-29 date, 31+ ticket count (at least 5 digits).
//!
//! Decoding is strict and all-or-nothing per line. Widths count characters,
//! so names may hold non-ASCII printable text. Encoding trusts its inputs:
//! names come in as [`EventName`] and counts are kept in range by the ledger.

use qbl_schemas::{
    Event, EventDate, EventName, Transaction, TransactionCode, ValidationError, MAX_NAME_LEN,
};
use thiserror::Error;

pub use qbl_schemas::SNAPSHOT_TERMINATOR;

const MASTER_MIN_WIDTH: usize = 14;
const MASTER_MAX_WIDTH: usize = 13 + MAX_NAME_LEN;
const SNAPSHOT_WIDTH: usize = MAX_NAME_LEN + 6;
const TRANSACTION_MIN_WIDTH: usize = 36;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why a single line failed to decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("line is {got} characters, expected at least {min}")]
    TooShort { min: usize, got: usize },

    #[error("line is {got} characters, expected at most {max}")]
    TooLong { max: usize, got: usize },

    #[error("expected a space separator at column {column}")]
    MissingSeparator { column: usize },

    #[error("field '{field}' is not numeric: '{raw}'")]
    NonNumeric { field: &'static str, raw: String },

    #[error("unknown transaction code {code}")]
    UnknownCode { code: u32 },

    #[error("invalid event name: {0}")]
    InvalidName(#[from] ValidationError),
}

// ---------------------------------------------------------------------------
// Column access
// ---------------------------------------------------------------------------

struct Columns {
    chars: Vec<char>,
}

impl Columns {
    fn new(line: &str) -> Self {
        Self {
            chars: line.chars().collect(),
        }
    }

    fn len(&self) -> usize {
        self.chars.len()
    }

    fn require_width(&self, min: usize, max: Option<usize>) -> Result<(), DecodeError> {
        let got = self.len();
        if got < min {
            return Err(DecodeError::TooShort { min, got });
        }
        if let Some(max) = max {
            if got > max {
                return Err(DecodeError::TooLong { max, got });
            }
        }
        Ok(())
    }

    fn text(&self, start: usize, end: usize) -> String {
        let end = end.min(self.len());
        self.chars[start.min(end)..end].iter().collect()
    }

    fn separator(&self, column: usize) -> Result<(), DecodeError> {
        match self.chars.get(column) {
            Some(' ') => Ok(()),
            _ => Err(DecodeError::MissingSeparator { column }),
        }
    }

    fn number(&self, field: &'static str, start: usize, end: usize) -> Result<u32, DecodeError> {
        parse_digits(field, &self.text(start, end))
    }
}

fn parse_digits(field: &'static str, raw: &str) -> Result<u32, DecodeError> {
    let non_numeric = || DecodeError::NonNumeric {
        field,
        raw: raw.to_string(),
    };
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(non_numeric());
    }
    // All digits but too many of them for u32.
    raw.parse::<u32>().map_err(|_| non_numeric())
}

fn name_field(columns: &Columns, start: usize, end: usize) -> String {
    columns.text(start, end).trim_end().to_string()
}

// ---------------------------------------------------------------------------
// Master record
// ---------------------------------------------------------------------------

pub fn encode_master(event: &Event) -> String {
    format!(
        "{} {:05} {:<width$}",
        event.date,
        event.ticket_count,
        event.name.as_str(),
        width = MAX_NAME_LEN
    )
}

pub fn decode_master(line: &str) -> Result<Event, DecodeError> {
    let cols = Columns::new(line);
    cols.require_width(MASTER_MIN_WIDTH, Some(MASTER_MAX_WIDTH))?;
    cols.separator(6)?;
    cols.separator(12)?;

    let date = EventDate::new(cols.number("date", 0, 6)?)?;
    let ticket_count = cols.number("ticket_count", 7, 12)?;
    let name = EventName::new(name_field(&cols, 13, MASTER_MAX_WIDTH))?;

    Ok(Event::new(name, date, ticket_count))
}

// ---------------------------------------------------------------------------
// Point-of-sale snapshot
// ---------------------------------------------------------------------------

/// What the front end knows about an event: no date, just stock.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub name: EventName,
    pub ticket_count: u32,
}

/// One decoded snapshot line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotLine {
    Entry(SnapshotEntry),
    Terminator,
}

pub fn encode_snapshot(event: &Event) -> String {
    snapshot_line(event.name.as_str(), event.ticket_count)
}

/// The `END` line closing every snapshot.
pub fn snapshot_terminator() -> String {
    snapshot_line(SNAPSHOT_TERMINATOR, 0)
}

fn snapshot_line(name: &str, ticket_count: u32) -> String {
    format!("{:<width$} {:05}", name, ticket_count, width = MAX_NAME_LEN)
}

pub fn decode_snapshot(line: &str) -> Result<SnapshotLine, DecodeError> {
    let cols = Columns::new(line);
    cols.require_width(SNAPSHOT_WIDTH, Some(SNAPSHOT_WIDTH))?;
    cols.separator(MAX_NAME_LEN)?;

    let ticket_count = cols.number("ticket_count", MAX_NAME_LEN + 1, SNAPSHOT_WIDTH)?;
    let name = name_field(&cols, 0, MAX_NAME_LEN);
    if name == SNAPSHOT_TERMINATOR {
        return Ok(SnapshotLine::Terminator);
    }

    Ok(SnapshotLine::Entry(SnapshotEntry {
        name: EventName::new(name)?,
        ticket_count,
    }))
}

// ---------------------------------------------------------------------------
// Transaction log
// ---------------------------------------------------------------------------

pub fn encode_transaction(tx: &Transaction) -> String {
    format!(
        "{:02} {:<width$} {} {:05}",
        tx.code.as_u8(),
        tx.event_name,
        tx.event_date,
        tx.ticket_count,
        width = MAX_NAME_LEN
    )
}

pub fn decode_transaction(line: &str) -> Result<Transaction, DecodeError> {
    let cols = Columns::new(line);
    cols.require_width(TRANSACTION_MIN_WIDTH, None)?;
    cols.separator(2)?;
    cols.separator(23)?;
    cols.separator(30)?;

    let raw_code = cols.number("code", 0, 2)?;
    let code = u8::try_from(raw_code)
        .ok()
        .and_then(TransactionCode::from_u8)
        .ok_or(DecodeError::UnknownCode { code: raw_code })?;

    let event_name = name_field(&cols, 3, 23);
    // Logout lines carry a blank name; every other code must name an event.
    if code != TransactionCode::Logout {
        EventName::new(event_name.as_str())?;
    }

    let event_date = EventDate::new(cols.number("event_date", 24, 30)?)?;
    let ticket_count = cols.number("ticket_count", 31, cols.len())?;

    Ok(Transaction {
        code,
        event_name,
        event_date,
        ticket_count,
    })
}
