use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::group::Group as DomainGroup;
use crate::domain::types::{GroupName, TypeConstraintError};

/// Diesel model representing the `groups` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::groups)]
pub struct Group {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<Group> for DomainGroup {
    type Error = TypeConstraintError;

    fn try_from(group: Group) -> Result<Self, Self::Error> {
        Ok(Self {
            id: group.id.try_into()?,
            name: GroupName::new(group.name)?,
            created_at: group.created_at,
        })
    }
}
