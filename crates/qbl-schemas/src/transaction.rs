use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Event, EventDate, EventName, ValidationError, CREATION_WINDOW, MAX_TICKETS,
};

/// Transaction kind, as written in the first two columns of a log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionCode {
    Logout = 0,
    Sell = 1,
    Return = 2,
    Create = 3,
    Add = 4,
    Delete = 5,
}

impl TransactionCode {
    pub const ALL: [TransactionCode; 6] = [
        TransactionCode::Logout,
        TransactionCode::Sell,
        TransactionCode::Return,
        TransactionCode::Create,
        TransactionCode::Add,
        TransactionCode::Delete,
    ];

    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn from_u8(code: u8) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.as_u8() == code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TransactionCode::Logout => "logout",
            TransactionCode::Sell => "sell",
            TransactionCode::Return => "return",
            TransactionCode::Create => "create",
            TransactionCode::Add => "add",
            TransactionCode::Delete => "delete",
        }
    }
}

impl fmt::Display for TransactionCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One intent to mutate the ledger.
///
/// Values are copied out of the front end's event at construction time, so a
/// transaction never aliases live state. Fields a code does not use are
/// carried as zero/empty and ignored on apply.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub code: TransactionCode,
    /// Empty for logout.
    pub event_name: String,
    /// Only meaningful for create.
    pub event_date: EventDate,
    pub ticket_count: u32,
}

impl Transaction {
    pub fn logout() -> Self {
        Self {
            code: TransactionCode::Logout,
            event_name: String::new(),
            event_date: EventDate::ZERO,
            ticket_count: 0,
        }
    }

    pub fn sell(name: &EventName, tickets: u32) -> Result<Self, ValidationError> {
        Self::quantity(TransactionCode::Sell, name, tickets)
    }

    pub fn return_tickets(name: &EventName, tickets: u32) -> Result<Self, ValidationError> {
        Self::quantity(TransactionCode::Return, name, tickets)
    }

    pub fn add(name: &EventName, tickets: u32) -> Result<Self, ValidationError> {
        Self::quantity(TransactionCode::Add, name, tickets)
    }

    pub fn create(event: &Event) -> Result<Self, ValidationError> {
        check_ticket_count(event.ticket_count)?;
        Ok(Self {
            code: TransactionCode::Create,
            event_name: event.name.as_str().to_string(),
            event_date: event.date,
            ticket_count: event.ticket_count,
        })
    }

    pub fn delete(name: &EventName) -> Self {
        Self {
            code: TransactionCode::Delete,
            event_name: name.as_str().to_string(),
            event_date: EventDate::ZERO,
            ticket_count: 0,
        }
    }

    fn quantity(
        code: TransactionCode,
        name: &EventName,
        tickets: u32,
    ) -> Result<Self, ValidationError> {
        check_ticket_count(tickets)?;
        Ok(Self {
            code,
            event_name: name.as_str().to_string(),
            event_date: EventDate::ZERO,
            ticket_count: tickets,
        })
    }
}

fn check_ticket_count(count: u32) -> Result<(), ValidationError> {
    if count > MAX_TICKETS {
        return Err(ValidationError::TicketCountOutOfRange { count });
    }
    Ok(())
}

/// Front-end rule for new events: a real calendar date, not in the past, and
/// no more than two years out.
pub fn validate_creation_date(
    current: EventDate,
    candidate: EventDate,
) -> Result<(), ValidationError> {
    if candidate.to_naive().is_none() {
        return Err(ValidationError::NotACalendarDate { date: candidate });
    }
    if candidate < current {
        return Err(ValidationError::DateInPast {
            date: candidate,
            current,
        });
    }
    if candidate.value() - current.value() > CREATION_WINDOW {
        return Err(ValidationError::DateBeyondWindow {
            date: candidate,
            current,
        });
    }
    Ok(())
}
