use diesel::prelude::*;

use crate::domain::location::{
    Location as DomainLocation, LocationLevel, NewLocation as DomainNewLocation,
};
use crate::domain::types::{LocationId, LocationName, TypeConstraintError};

/// Diesel model representing the `locations` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::locations)]
pub struct Location {
    pub id: i32,
    pub parent_id: Option<i32>,
    pub level: String,
    pub name: String,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::locations)]
pub struct NewLocation {
    pub parent_id: Option<i32>,
    pub level: String,
    pub name: String,
}

impl TryFrom<Location> for DomainLocation {
    type Error = TypeConstraintError;

    fn try_from(location: Location) -> Result<Self, Self::Error> {
        Ok(Self {
            id: location.id.try_into()?,
            parent_id: location.parent_id.map(LocationId::new).transpose()?,
            level: LocationLevel::try_from(location.level)?,
            name: LocationName::new(location.name)?,
        })
    }
}

impl From<DomainNewLocation> for NewLocation {
    fn from(location: DomainNewLocation) -> Self {
        Self {
            parent_id: location.parent_id.map(LocationId::get),
            level: location.level.as_str().to_string(),
            name: location.name.into_inner(),
        }
    }
}
