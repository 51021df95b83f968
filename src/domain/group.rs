use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{GroupId, GroupName};

/// An Ikimina savings group, the aggregate root for schedules, cycles and penalties.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Group {
    pub id: GroupId,
    pub name: GroupName,
    pub created_at: NaiveDateTime,
}
