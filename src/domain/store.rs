use crate::domain::ticket::{Ticket, TicketId};
use crate::domain::user::{User, UserId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Raw payload supplied by the data loader
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    #[serde(default)]
    pub tickets: Vec<Ticket>,
    #[serde(default)]
    pub users: Vec<User>,
}

/// Immutable snapshot of every ticket and user on the board.
///
/// Tickets keep their load order, which is the encounter order the board
/// uses for its columns. Updates never happen in place: [`TicketStore::with_ticket`]
/// returns a new store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct TicketStore {
    tickets: Vec<Ticket>,
    users: Vec<User>,
}

impl TicketStore {
    /// Store with no tickets and no users
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a store from a loader snapshot.
    ///
    /// Ticket and user ids must be unique; later duplicates are dropped.
    pub fn from_snapshot(snapshot: BoardSnapshot) -> Self {
        let mut seen = HashSet::new();
        let mut tickets = Vec::with_capacity(snapshot.tickets.len());
        for ticket in snapshot.tickets {
            if seen.insert(ticket.id.clone()) {
                tickets.push(ticket);
            } else {
                tracing::warn!(ticket = %ticket.id, "Dropping duplicate ticket id");
            }
        }

        let mut seen = HashSet::new();
        let mut users = Vec::with_capacity(snapshot.users.len());
        for user in snapshot.users {
            if seen.insert(user.id.clone()) {
                users.push(user);
            } else {
                tracing::warn!(user = %user.id, "Dropping duplicate user id");
            }
        }

        Self { tickets, users }
    }

    pub fn to_snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            tickets: self.tickets.clone(),
            users: self.users.clone(),
        }
    }

    pub fn tickets(&self) -> &[Ticket] {
        &self.tickets
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty() && self.users.is_empty()
    }

    /// Finds a ticket by ID
    pub fn ticket(&self, id: &TicketId) -> Option<&Ticket> {
        self.tickets.iter().find(|t| &t.id == id)
    }

    /// Finds a user by ID
    pub fn user(&self, id: &UserId) -> Option<&User> {
        find_user(&self.users, id)
    }

    /// Returns a new store with the ticket of the same ID replaced.
    ///
    /// Position is preserved. Returns `None` if no ticket has that ID.
    pub fn with_ticket(&self, ticket: Ticket) -> Option<Self> {
        let index = self.position(&ticket.id)?;
        Some(self.replace_at(index, ticket))
    }

    /// Index of a ticket in collection order
    pub(crate) fn position(&self, id: &TicketId) -> Option<usize> {
        self.tickets.iter().position(|t| &t.id == id)
    }

    /// New store with the ticket at `index` replaced; `index` must come from
    /// [`TicketStore::position`] on this store.
    pub(crate) fn replace_at(&self, index: usize, ticket: Ticket) -> Self {
        let mut tickets = self.tickets.clone();
        tickets[index] = ticket;
        Self {
            tickets,
            users: self.users.clone(),
        }
    }
}

pub(crate) fn find_user<'a>(users: &'a [User], id: &UserId) -> Option<&'a User> {
    users.iter().find(|u| &u.id == id)
}
