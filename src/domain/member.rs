use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{GroupId, MemberId, MemberName, PhoneNumber};

/// A group member as seen by the savings engine.
///
/// Members are owned by the member-management subsystem; the engine only
/// reads them to check group membership and activity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Member {
    pub id: MemberId,
    pub group_id: GroupId,
    pub name: MemberName,
    pub phone: Option<PhoneNumber>,
    pub active: bool,
    pub joined_at: NaiveDateTime,
}
