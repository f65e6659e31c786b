use crate::domain::grouping::{partition, GroupingMode};
use crate::domain::sorting::{sort_tickets, SortingMode};
use crate::domain::ticket::Ticket;
use crate::domain::user::User;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// A rendered board column. Derived on every projection, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    /// Drop target id reported back by drag events
    pub id: String,
    pub name: String,
    pub tickets: Vec<Ticket>,
}

impl Column {
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}

/// Builds the board's columns.
///
/// Columns appear in the order their first ticket occurs in `tickets`;
/// tickets inside each column are ordered by `sorting`. Either all columns
/// are produced or an error is returned.
pub fn project(
    tickets: &[Ticket],
    users: &[User],
    grouping: GroupingMode,
    sorting: SortingMode,
) -> Result<Vec<Column>> {
    let groups = partition(tickets, users, grouping)?;

    let columns: Vec<Column> = groups
        .into_iter()
        .map(|group| {
            let mut tickets = group.tickets;
            sort_tickets(&mut tickets, sorting);
            Column {
                id: group.key.id,
                name: group.key.name,
                tickets,
            }
        })
        .collect();

    tracing::debug!(
        grouping = %grouping,
        sorting = %sorting,
        tickets = tickets.len(),
        columns = columns.len(),
        "Projected board"
    );
    Ok(columns)
}

/// Like [`project`], but takes the modes as raw strings.
///
/// Both modes are parsed before any partitioning happens.
pub fn project_raw(
    tickets: &[Ticket],
    users: &[User],
    grouping: &str,
    sorting: &str,
) -> Result<Vec<Column>> {
    let grouping: GroupingMode = grouping.parse()?;
    let sorting: SortingMode = sorting.parse()?;
    project(tickets, users, grouping, sorting)
}

fn fingerprint(
    tickets: &[Ticket],
    users: &[User],
    grouping: GroupingMode,
    sorting: SortingMode,
) -> u64 {
    let mut hasher = DefaultHasher::new();
    tickets.hash(&mut hasher);
    users.hash(&mut hasher);
    grouping.hash(&mut hasher);
    sorting.hash(&mut hasher);
    hasher.finish()
}

/// Remembers the last projection and reuses it while the inputs are unchanged.
///
/// Failed projections are not cached.
#[derive(Debug, Default)]
pub struct ProjectionCache {
    last: Option<(u64, Vec<Column>)>,
    hits: u64,
    misses: u64,
}

impl ProjectionCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn project(
        &mut self,
        tickets: &[Ticket],
        users: &[User],
        grouping: GroupingMode,
        sorting: SortingMode,
    ) -> Result<&[Column]> {
        let key = fingerprint(tickets, users, grouping, sorting);

        if matches!(&self.last, Some((cached, _)) if *cached == key) {
            self.hits += 1;
        } else {
            let columns = project(tickets, users, grouping, sorting)?;
            self.misses += 1;
            self.last = Some((key, columns));
        }

        Ok(self
            .last
            .as_ref()
            .map(|(_, columns)| columns.as_slice())
            .unwrap_or(&[]))
    }

    pub fn invalidate(&mut self) {
        self.last = None;
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }
}
