//! Grouping strategies: which ticket attribute defines the board's columns.
//!
//! Each [`GroupingMode`] knows how to derive a ticket's column and how to
//! rewrite a ticket so that it lands in a given column. The mode is parsed
//! once per call and dispatched by `match`, never by re-inspecting strings.

use crate::domain::moves::RejectReason;
use crate::domain::store::find_user;
use crate::domain::ticket::{Priority, Ticket, TicketStatus};
use crate::domain::user::{User, UserId};
use crate::error::{LanesError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fmt, str::FromStr};

/// Column name and id for tickets without a resolvable user
pub const UNASSIGNED: &str = "Unassigned";

/// Attribute used to partition tickets into columns
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupingMode {
    #[default]
    Status,
    User,
    Priority,
}

impl GroupingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::User => "user",
            Self::Priority => "priority",
        }
    }

    /// Derives the column a ticket belongs to
    pub fn key_of(&self, ticket: &Ticket, users: &[User]) -> Result<ColumnKey> {
        match self {
            Self::Status => {
                let label = ticket.status.label();
                Ok(ColumnKey::new(label, label))
            }
            Self::User => {
                let user = ticket
                    .user_id
                    .as_ref()
                    .and_then(|id| find_user(users, id));
                Ok(match user {
                    Some(user) => ColumnKey::new(user.id.as_str(), &user.name),
                    None => ColumnKey::new(UNASSIGNED, UNASSIGNED),
                })
            }
            Self::Priority => {
                let priority = ticket.priority_level()?;
                Ok(ColumnKey::new(priority.value().to_string(), priority.label()))
            }
        }
    }

    /// Returns a copy of `ticket` reassigned to the column `destination`.
    ///
    /// Exactly one attribute changes. A destination equal to the ticket's
    /// current value is `NoChange`.
    pub fn apply_destination(
        &self,
        ticket: &Ticket,
        destination: &str,
        users: &[User],
    ) -> std::result::Result<Ticket, RejectReason> {
        let invalid = || RejectReason::InvalidDestination(destination.to_string());

        match self {
            Self::Status => {
                let status = TicketStatus::from_str(destination).map_err(|_| invalid())?;
                if status == ticket.status {
                    return Err(RejectReason::NoChange);
                }
                Ok(ticket.clone().with_status(status))
            }
            Self::User => {
                let user_id = if destination == UNASSIGNED {
                    None
                } else {
                    let id = UserId::from_str(destination).map_err(|_| invalid())?;
                    // Reassigning to an unknown user would orphan the ticket.
                    if find_user(users, &id).is_none() {
                        return Err(invalid());
                    }
                    Some(id)
                };
                if user_id == ticket.user_id {
                    return Err(RejectReason::NoChange);
                }
                Ok(ticket.clone().with_user(user_id))
            }
            Self::Priority => {
                let priority = parse_priority(destination).ok_or_else(invalid)?;
                if priority.value() == ticket.priority {
                    return Err(RejectReason::NoChange);
                }
                Ok(ticket.clone().with_priority(priority.value()))
            }
        }
    }
}

/// Accepts the digit 0-4 or a priority label
fn parse_priority(destination: &str) -> Option<Priority> {
    match destination.trim().parse::<i64>() {
        Ok(value) => Priority::try_from(value).ok(),
        Err(_) => Priority::from_label(destination),
    }
}

impl FromStr for GroupingMode {
    type Err = LanesError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "status" => Ok(Self::Status),
            "user" => Ok(Self::User),
            "priority" => Ok(Self::Priority),
            _ => Err(LanesError::UnsupportedGroupingMode(s.to_string())),
        }
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity of a column.
///
/// `name` is what the board displays and what partitions tickets; `id` is
/// what a drop target reports back and what [`GroupingMode::apply_destination`]
/// understands.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnKey {
    pub id: String,
    pub name: String,
}

impl ColumnKey {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Tickets sharing one column key, in collection order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Group {
    pub key: ColumnKey,
    pub tickets: Vec<Ticket>,
}

/// Splits tickets into groups by the mode's column name.
///
/// Groups appear in the order their first ticket is encountered and each
/// group keeps collection order; nothing is sorted here. Every ticket lands
/// in exactly one group.
pub fn partition(tickets: &[Ticket], users: &[User], mode: GroupingMode) -> Result<Vec<Group>> {
    let mut groups: Vec<Group> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for ticket in tickets {
        let key = mode.key_of(ticket, users)?;
        match index.get(&key.name) {
            Some(&i) => groups[i].tickets.push(ticket.clone()),
            None => {
                index.insert(key.name.clone(), groups.len());
                groups.push(Group {
                    key,
                    tickets: vec![ticket.clone()],
                });
            }
        }
    }

    Ok(groups)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticket(id: &str, status: TicketStatus, priority: i64, user: Option<&str>) -> Ticket {
        Ticket::new(id.parse().unwrap(), format!("Ticket {}", id))
            .with_status(status)
            .with_priority(priority)
            .with_user(user.map(|u| u.parse().unwrap()))
    }

    fn users() -> Vec<User> {
        vec![
            User::new("usr-1".parse().unwrap(), "Anoop Sharma".to_string(), false),
            User::new("usr-2".parse().unwrap(), "Yogesh".to_string(), true),
        ]
    }

    fn names(groups: &[Group]) -> Vec<&str> {
        groups.iter().map(|g| g.key.name.as_str()).collect()
    }

    #[test]
    fn test_grouping_mode_parsing() {
        assert_eq!(GroupingMode::from_str("status").unwrap(), GroupingMode::Status);
        assert_eq!(GroupingMode::from_str("User").unwrap(), GroupingMode::User);
        assert_eq!(GroupingMode::from_str("priority").unwrap(), GroupingMode::Priority);
        assert!(matches!(
            GroupingMode::from_str("tag"),
            Err(LanesError::UnsupportedGroupingMode(m)) if m == "tag"
        ));
    }

    #[test]
    fn test_partition_by_status_in_encounter_order() {
        let tickets = vec![
            ticket("CAM-1", TicketStatus::Backlog, 1, None),
            ticket("CAM-2", TicketStatus::Todo, 2, None),
            ticket("CAM-3", TicketStatus::Backlog, 3, None),
        ];

        let groups = partition(&tickets, &[], GroupingMode::Status).unwrap();
        assert_eq!(names(&groups), vec!["Backlog", "Todo"]);
        assert_eq!(groups[0].tickets[0].id.as_str(), "CAM-1");
        assert_eq!(groups[0].tickets[1].id.as_str(), "CAM-3");
    }

    #[test]
    fn test_partition_creates_column_for_unknown_status() {
        let tickets = vec![ticket("CAM-1", TicketStatus::Other("Canceled".to_string()), 0, None)];

        let groups = partition(&tickets, &[], GroupingMode::Status).unwrap();
        assert_eq!(names(&groups), vec!["Canceled"]);
    }

    #[test]
    fn test_partition_by_user_with_unassigned() {
        let tickets = vec![
            ticket("CAM-1", TicketStatus::Todo, 0, Some("usr-2")),
            ticket("CAM-2", TicketStatus::Todo, 0, None),
            ticket("CAM-3", TicketStatus::Todo, 0, Some("usr-9")),
            ticket("CAM-4", TicketStatus::Todo, 0, Some("usr-1")),
        ];

        let groups = partition(&tickets, &users(), GroupingMode::User).unwrap();
        assert_eq!(names(&groups), vec!["Yogesh", UNASSIGNED, "Anoop Sharma"]);
        assert_eq!(groups[0].key.id, "usr-2");
        assert_eq!(groups[1].key.id, UNASSIGNED);
        assert_eq!(groups[1].tickets.len(), 2);
    }

    #[test]
    fn test_partition_merges_users_sharing_a_name() {
        let mut users = users();
        users.push(User::new("usr-3".parse().unwrap(), "Yogesh".to_string(), false));
        let tickets = vec![
            ticket("CAM-1", TicketStatus::Todo, 0, Some("usr-2")),
            ticket("CAM-2", TicketStatus::Todo, 0, Some("usr-3")),
        ];

        let groups = partition(&tickets, &users, GroupingMode::User).unwrap();
        assert_eq!(names(&groups), vec!["Yogesh"]);
        assert_eq!(groups[0].key.id, "usr-2");
        assert_eq!(groups[0].tickets.len(), 2);

        let tickets = vec![
            ticket("CAM-2", TicketStatus::Todo, 0, Some("usr-3")),
            ticket("CAM-1", TicketStatus::Todo, 0, Some("usr-2")),
        ];
        let groups = partition(&tickets, &users, GroupingMode::User).unwrap();
        assert_eq!(groups[0].key.id, "usr-3");
    }

    #[test]
    fn test_partition_by_priority_labels() {
        let tickets = vec![
            ticket("CAM-1", TicketStatus::Todo, 0, None),
            ticket("CAM-2", TicketStatus::Todo, 4, None),
            ticket("CAM-3", TicketStatus::Todo, 0, None),
        ];

        let groups = partition(&tickets, &[], GroupingMode::Priority).unwrap();
        assert_eq!(names(&groups), vec!["No priority", "Urgent"]);
        assert_eq!(groups[1].key.id, "4");
    }

    #[test]
    fn test_partition_rejects_out_of_range_priority() {
        let tickets = vec![
            ticket("CAM-1", TicketStatus::Todo, 2, None),
            ticket("CAM-2", TicketStatus::Todo, 5, None),
        ];

        let result = partition(&tickets, &[], GroupingMode::Priority);
        assert!(matches!(
            result,
            Err(LanesError::InvalidPriority { ref ticket, priority: 5 }) if ticket == "CAM-2"
        ));

        // Other modes never look at the priority.
        assert!(partition(&tickets, &[], GroupingMode::Status).is_ok());
    }

    #[test]
    fn test_partition_empty() {
        let groups = partition(&[], &[], GroupingMode::User).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn test_apply_destination_status() {
        let t = ticket("CAM-1", TicketStatus::Todo, 2, Some("usr-1"));

        let moved = GroupingMode::Status.apply_destination(&t, "In progress", &[]).unwrap();
        assert_eq!(moved.status, TicketStatus::InProgress);
        assert_eq!(moved.priority, 2);
        assert_eq!(moved.user_id, t.user_id);

        assert_eq!(
            GroupingMode::Status.apply_destination(&t, "Todo", &[]),
            Err(RejectReason::NoChange)
        );
        assert_eq!(
            GroupingMode::Status.apply_destination(&t, "Canceled", &[]),
            Err(RejectReason::InvalidDestination("Canceled".to_string()))
        );
    }

    #[test]
    fn test_apply_destination_user() {
        let t = ticket("CAM-1", TicketStatus::Todo, 2, Some("usr-1"));

        let moved = GroupingMode::User.apply_destination(&t, "usr-2", &users()).unwrap();
        assert_eq!(moved.user_id.unwrap().as_str(), "usr-2");

        let unassigned = GroupingMode::User.apply_destination(&t, UNASSIGNED, &users()).unwrap();
        assert!(unassigned.user_id.is_none());

        assert_eq!(
            GroupingMode::User.apply_destination(&t, "usr-404", &users()),
            Err(RejectReason::InvalidDestination("usr-404".to_string()))
        );
        assert_eq!(
            GroupingMode::User.apply_destination(&t, "usr-1", &users()),
            Err(RejectReason::NoChange)
        );
    }

    #[test]
    fn test_apply_destination_priority() {
        let t = ticket("CAM-1", TicketStatus::Todo, 2, None);

        let moved = GroupingMode::Priority.apply_destination(&t, "4", &[]).unwrap();
        assert_eq!(moved.priority, 4);

        let by_label = GroupingMode::Priority.apply_destination(&t, "Low", &[]).unwrap();
        assert_eq!(by_label.priority, 1);

        for bad in ["7", "-1", "urgent-ish", ""] {
            assert_eq!(
                GroupingMode::Priority.apply_destination(&t, bad, &[]),
                Err(RejectReason::InvalidDestination(bad.to_string()))
            );
        }
        assert_eq!(
            GroupingMode::Priority.apply_destination(&t, "2", &[]),
            Err(RejectReason::NoChange)
        );
    }
}
