//! Drag-and-drop moves.
//!
//! A move goes `Pending -> Validated -> Applied`, or stops at `Rejected`.
//! Rejections are ordinary values: the input store is only ever borrowed,
//! so a rejected move cannot have touched it.

use crate::domain::grouping::GroupingMode;
use crate::domain::store::TicketStore;
use crate::domain::ticket::{Ticket, TicketId};
use crate::error::LanesError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// Why a move was not applied
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RejectReason {
    #[error("Move does not change the ticket")]
    NoChange,

    #[error("Ticket not found: {0}")]
    TicketNotFound(String),

    #[error("Invalid destination column: {0}")]
    InvalidDestination(String),
}

impl From<RejectReason> for LanesError {
    fn from(reason: RejectReason) -> Self {
        match reason {
            RejectReason::NoChange => LanesError::NoChange,
            RejectReason::TicketNotFound(id) => LanesError::TicketNotFound(id),
            RejectReason::InvalidDestination(dest) => LanesError::InvalidDestination(dest),
        }
    }
}

/// Lifecycle of a single move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MovePhase {
    Pending,
    Validated,
    Applied,
    Rejected,
}

/// A released drag with a known destination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRequest {
    pub ticket_id: String,
    pub source_column: String,
    pub dest_column: String,
    pub dest_index: usize,
}

impl MoveRequest {
    pub fn new(
        ticket_id: impl Into<String>,
        source_column: impl Into<String>,
        dest_column: impl Into<String>,
        dest_index: usize,
    ) -> Self {
        Self {
            ticket_id: ticket_id.into(),
            source_column: source_column.into(),
            dest_column: dest_column.into(),
            dest_index,
        }
    }
}

/// Position reported by the drag gesture layer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragLocation {
    pub droppable_id: String,
    pub index: usize,
}

/// Drag-end event as reported by the gesture layer.
///
/// `destination` is `None` when the drag was cancelled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DragEvent {
    pub draggable_id: String,
    pub source: DragLocation,
    #[serde(default)]
    pub destination: Option<DragLocation>,
}

impl DragEvent {
    pub fn into_request(self) -> Option<MoveRequest> {
        let destination = self.destination?;
        Some(MoveRequest {
            ticket_id: self.draggable_id,
            source_column: self.source.droppable_id,
            dest_column: destination.droppable_id,
            dest_index: destination.index,
        })
    }
}

/// Result of applying a move
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveOutcome {
    Applied {
        /// Store with the moved ticket replaced
        store: TicketStore,
        /// The ticket as it is after the move
        ticket: Ticket,
    },
    Rejected {
        reason: RejectReason,
    },
}

impl MoveOutcome {
    pub fn phase(&self) -> MovePhase {
        match self {
            Self::Applied { .. } => MovePhase::Applied,
            Self::Rejected { .. } => MovePhase::Rejected,
        }
    }

    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied { .. })
    }

    pub fn reason(&self) -> Option<&RejectReason> {
        match self {
            Self::Applied { .. } => None,
            Self::Rejected { reason } => Some(reason),
        }
    }

    /// The updated store, if the move was applied
    pub fn store(self) -> Option<TicketStore> {
        match self {
            Self::Applied { store, .. } => Some(store),
            Self::Rejected { .. } => None,
        }
    }

    pub fn into_result(self) -> Result<TicketStore, RejectReason> {
        match self {
            Self::Applied { store, .. } => Ok(store),
            Self::Rejected { reason } => Err(reason),
        }
    }

    fn rejected(request: &MoveRequest, reason: RejectReason) -> Self {
        tracing::warn!(
            ticket = %request.ticket_id,
            from = %request.source_column,
            to = %request.dest_column,
            reason = %reason,
            "Move rejected"
        );
        Self::Rejected { reason }
    }
}

/// A move that passed validation; applying it cannot fail
#[derive(Debug)]
struct ValidatedMove {
    index: usize,
    ticket: Ticket,
}

/// Takes a pending move to `Validated`: resolves the ticket and rewrites it
fn validate(
    store: &TicketStore,
    request: &MoveRequest,
    mode: GroupingMode,
) -> Result<ValidatedMove, RejectReason> {
    // In-column order is always re-derived by sorting, so staying in the
    // same column changes nothing.
    if request.dest_column == request.source_column {
        return Err(RejectReason::NoChange);
    }

    let index = TicketId::from_str(&request.ticket_id)
        .ok()
        .and_then(|id| store.position(&id))
        .ok_or_else(|| RejectReason::TicketNotFound(request.ticket_id.clone()))?;

    let ticket =
        mode.apply_destination(&store.tickets()[index], &request.dest_column, store.users())?;
    tracing::trace!(ticket = %ticket.id, phase = ?MovePhase::Validated, "Move validated");
    Ok(ValidatedMove { index, ticket })
}

/// Applies a move under the given grouping mode.
///
/// On success the returned store differs from `store` in exactly one
/// attribute of exactly one ticket.
pub fn apply_move(store: &TicketStore, request: &MoveRequest, mode: GroupingMode) -> MoveOutcome {
    let ValidatedMove { index, ticket } = match validate(store, request, mode) {
        Ok(validated) => validated,
        Err(reason) => return MoveOutcome::rejected(request, reason),
    };

    tracing::debug!(
        ticket = %ticket.id,
        grouping = %mode,
        to = %request.dest_column,
        index = request.dest_index,
        "Move applied"
    );
    MoveOutcome::Applied {
        store: store.replace_at(index, ticket.clone()),
        ticket,
    }
}

/// Applies a drag-end event; a cancelled drag is `NoChange`.
pub fn apply_drag(store: &TicketStore, event: DragEvent, mode: GroupingMode) -> MoveOutcome {
    match event.into_request() {
        Some(request) => apply_move(store, &request, mode),
        None => {
            tracing::debug!("Drag cancelled");
            MoveOutcome::Rejected {
                reason: RejectReason::NoChange,
            }
        }
    }
}
