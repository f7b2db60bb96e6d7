use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type GroupId = Uuid;
pub type MemberId = Uuid;

/// A named collection of members who share expenses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

impl Group {
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            created_at: Utc::now(),
        }
    }
}

/// A participant in a group. Display names are unique within a group;
/// members are ordered by when they joined.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub group_id: GroupId,
    pub display_name: String,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    pub fn new(group_id: GroupId, display_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            group_id,
            display_name,
            joined_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_members_get_distinct_ids() {
        let group = Group::new("Trip".into());
        let alice = Member::new(group.id, "Alice".into());
        let bob = Member::new(group.id, "Bob".into());

        assert_ne!(alice.id, bob.id);
        assert_eq!(alice.group_id, group.id);
        assert_eq!(bob.group_id, group.id);
    }
}
