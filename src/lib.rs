//! # Lanes Core
//!
//! Board state engine for a kanban ticket board.
//!
//! Tickets are split into columns by a grouping mode (status, user or
//! priority), ordered inside each column by a sorting mode (priority or
//! title), and moved between columns by drag-and-drop. Rendering, the drag
//! gesture itself and data fetching live outside this crate; the storage
//! module defines the traits they plug into.

pub mod domain;
pub mod error;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use domain::{
    board::{project, Column, ProjectionCache},
    grouping::{GroupingMode, UNASSIGNED},
    moves::{apply_drag, apply_move, DragEvent, MoveOutcome, MoveRequest, RejectReason},
    preferences::Preferences,
    sorting::SortingMode,
    store::{BoardSnapshot, TicketStore},
    ticket::{Priority, Ticket, TicketId, TicketStatus},
    user::{User, UserId},
};
pub use error::{LanesError, Result};
pub use service::BoardService;
pub use storage::{DataLoader, PreferenceStore};
