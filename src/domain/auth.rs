//! Authenticated caller passed explicitly into every service call.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::member::Member;
use crate::domain::types::{GroupId, MemberId, TypeConstraintError};

/// Role granted by the authentication gateway.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Platform administrator: manages lookups and every group.
    Admin,
    /// Manages the schedule, rules and cycles of one group.
    GroupManager,
    /// Saves and pays penalties for themself.
    Member,
}

impl Role {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::GroupManager => "group_manager",
            Self::Member => "member",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for Role {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "admin" => Ok(Self::Admin),
            "group_manager" | "manager" => Ok(Self::GroupManager),
            "member" => Ok(Self::Member),
            other => Err(TypeConstraintError::InvalidValue(format!("role: {other}"))),
        }
    }
}

/// Caller identity. For members `user_id` is their member id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i32,
    pub role: Role,
    /// Group the caller belongs to; absent for admins.
    pub group_id: Option<GroupId>,
}

impl AuthenticatedUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Admins manage every group, managers only their own.
    pub fn can_manage_group(&self, group_id: GroupId) -> bool {
        match self.role {
            Role::Admin => true,
            Role::GroupManager => self.group_id == Some(group_id),
            Role::Member => false,
        }
    }

    /// Any role may read the data of its own group.
    pub fn can_view_group(&self, group_id: GroupId) -> bool {
        self.is_admin() || self.group_id == Some(group_id)
    }

    /// Members act only for themselves; managers for members of their group.
    pub fn can_act_for_member(&self, member: &Member) -> bool {
        match self.role {
            Role::Admin => true,
            Role::GroupManager => self.group_id == Some(member.group_id),
            Role::Member => {
                self.group_id == Some(member.group_id) && self.user_id == member.id.get()
            }
        }
    }

    /// Member id of the caller, when the caller is a member.
    pub fn member_id(&self) -> Option<MemberId> {
        match self.role {
            Role::Member => MemberId::new(self.user_id).ok(),
            _ => None,
        }
    }
}
