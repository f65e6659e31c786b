use crate::domain::user::UserId;
use crate::error::LanesError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Unique identifier for a ticket (e.g., CAM-1, CAM-11)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketId(String);

impl TicketId {
    /// Returns the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TicketId {
    type Err = LanesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(LanesError::InvalidTicketId(s.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }
}

impl TryFrom<String> for TicketId {
    type Error = LanesError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl From<TicketId> for String {
    fn from(id: TicketId) -> Self {
        id.0
    }
}

impl fmt::Display for TicketId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Status of a ticket on the board.
///
/// Loaded data may carry a status the board does not know about; it is kept
/// verbatim in `Other` so it still gets its own column, but it can never be
/// chosen as a move destination.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TicketStatus {
    Todo,
    InProgress,
    Backlog,
    Done,
    Other(String),
}

impl TicketStatus {
    /// Column label for this status
    pub fn label(&self) -> &str {
        match self {
            Self::Todo => "Todo",
            Self::InProgress => "In progress",
            Self::Backlog => "Backlog",
            Self::Done => "Done",
            Self::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Self::Other(_))
    }
}

impl FromStr for TicketStatus {
    type Err = LanesError;

    /// Parses a known status from its label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(Self::Todo),
            "in progress" | "inprogress" => Ok(Self::InProgress),
            "backlog" => Ok(Self::Backlog),
            "done" => Ok(Self::Done),
            _ => Err(LanesError::InvalidDestination(s.to_string())),
        }
    }
}

impl From<String> for TicketStatus {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "Todo" => Self::Todo,
            "In progress" => Self::InProgress,
            "Backlog" => Self::Backlog,
            "Done" => Self::Done,
            _ => Self::Other(raw),
        }
    }
}

impl From<TicketStatus> for String {
    fn from(status: TicketStatus) -> Self {
        match status {
            TicketStatus::Other(raw) => raw,
            known => known.label().to_string(),
        }
    }
}

impl fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Ticket priority, 0 (none) through 4 (urgent)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Priority {
    NoPriority = 0,
    Low = 1,
    Medium = 2,
    High = 3,
    Urgent = 4,
}

impl Priority {
    pub const ALL: [Priority; 5] = [
        Priority::Urgent,
        Priority::High,
        Priority::Medium,
        Priority::Low,
        Priority::NoPriority,
    ];

    pub fn value(self) -> i64 {
        self as i64
    }

    /// Column label from the fixed priority table
    pub fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Low => "Low",
            Self::NoPriority => "No priority",
        }
    }

    /// Looks up a priority by its column label
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|p| p.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl TryFrom<i64> for Priority {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Self::NoPriority),
            1 => Ok(Self::Low),
            2 => Ok(Self::Medium),
            3 => Ok(Self::High),
            4 => Ok(Self::Urgent),
            other => Err(other),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A board ticket.
///
/// `priority` keeps the raw loaded integer; use [`Ticket::priority_level`] to
/// get a validated [`Priority`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: TicketId,
    pub title: String,
    pub status: TicketStatus,
    pub priority: i64,
    #[serde(default)]
    pub user_id: Option<UserId>,
}

impl Ticket {
    /// Creates an unassigned `Todo` ticket with no priority
    pub fn new(id: TicketId, title: String) -> Self {
        Self {
            id,
            title,
            status: TicketStatus::Todo,
            priority: Priority::NoPriority.value(),
            user_id: None,
        }
    }

    pub fn with_status(mut self, status: TicketStatus) -> Self {
        self.status = status;
        self
    }

    pub fn with_priority(mut self, priority: i64) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_user(mut self, user_id: Option<UserId>) -> Self {
        self.user_id = user_id;
        self
    }

    /// Validated priority level
    pub fn priority_level(&self) -> Result<Priority, LanesError> {
        Priority::try_from(self.priority).map_err(|priority| LanesError::InvalidPriority {
            ticket: self.id.to_string(),
            priority,
        })
    }
}
