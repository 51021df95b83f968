use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::frequency::{
    FrequencyCategory as DomainFrequencyCategory,
    NewFrequencyCategory as DomainNewFrequencyCategory,
};
use crate::domain::types::{FrequencyKind, TypeConstraintError};

/// Diesel model representing the `frequency_categories` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::frequency_categories)]
pub struct FrequencyCategory {
    pub id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::frequency_categories)]
pub struct NewFrequencyCategory {
    pub name: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<FrequencyCategory> for DomainFrequencyCategory {
    type Error = TypeConstraintError;

    fn try_from(category: FrequencyCategory) -> Result<Self, Self::Error> {
        Ok(Self {
            id: category.id.try_into()?,
            name: FrequencyKind::try_from(category.name)?,
            created_at: category.created_at,
        })
    }
}

impl From<DomainNewFrequencyCategory> for NewFrequencyCategory {
    fn from(category: DomainNewFrequencyCategory) -> Self {
        Self {
            name: category.name.as_str().to_string(),
            created_at: category.created_at,
        }
    }
}
