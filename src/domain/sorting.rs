use crate::domain::ticket::Ticket;
use crate::error::LanesError;
use feruca::Collator;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::{fmt, str::FromStr};

/// Ordering applied to the tickets inside each column
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortingMode {
    /// Highest priority first
    #[default]
    Priority,
    /// Alphabetical by title
    Title,
}

impl SortingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Priority => "priority",
            Self::Title => "title",
        }
    }

    fn compare(&self, collator: &mut Collator, a: &Ticket, b: &Ticket) -> Ordering {
        match self {
            Self::Priority => b.priority.cmp(&a.priority),
            Self::Title => collator.collate(a.title.as_str(), b.title.as_str()),
        }
    }
}

impl FromStr for SortingMode {
    type Err = LanesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "priority" => Ok(SortingMode::Priority),
            "title" => Ok(SortingMode::Title),
            _ => Err(LanesError::UnsupportedSortingMode(s.to_string())),
        }
    }
}

impl fmt::Display for SortingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sorts tickets in-place. The sort is stable: ties keep their relative order.
///
/// Titles are compared with the root-locale Unicode collation, so "Éclair"
/// sorts with the E's and "apple" before "Banana".
pub fn sort_tickets(tickets: &mut [Ticket], mode: SortingMode) {
    let mut collator = Collator::default();
    tickets.sort_by(|a, b| mode.compare(&mut collator, a, b));
}

/// Returns a sorted copy of `tickets`, leaving the input untouched
///
/// # Examples
/// ```
/// use lanes_core::domain::sorting::{order, SortingMode};
/// use lanes_core::domain::ticket::Ticket;
///
/// let tickets = vec![
///     Ticket::new("t1".parse().unwrap(), "B".to_string()).with_priority(2),
///     Ticket::new("t2".parse().unwrap(), "A".to_string()).with_priority(4),
/// ];
///
/// let ordered = order(&tickets, SortingMode::Priority);
/// assert_eq!(ordered[0].id.as_str(), "t2");
/// assert_eq!(tickets[0].id.as_str(), "t1");
/// ```
pub fn order(tickets: &[Ticket], mode: SortingMode) -> Vec<Ticket> {
    let mut ordered = tickets.to_vec();
    sort_tickets(&mut ordered, mode);
    ordered
}
