pub mod board;
pub mod grouping;
pub mod moves;
pub mod preferences;
pub mod sorting;
pub mod store;
pub mod ticket;
pub mod user;

pub use board::{project, project_raw, Column, ProjectionCache};
pub use grouping::{partition, ColumnKey, Group, GroupingMode, UNASSIGNED};
pub use moves::{
    apply_drag, apply_move, DragEvent, DragLocation, MoveOutcome, MovePhase, MoveRequest,
    RejectReason,
};
pub use preferences::{Preferences, StoredPreferences};
pub use sorting::{order, sort_tickets, SortingMode};
pub use store::{BoardSnapshot, TicketStore};
pub use ticket::{Priority, Ticket, TicketId, TicketStatus};
pub use user::{User, UserId};
