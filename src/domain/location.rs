use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::domain::types::{LocationId, LocationName, TypeConstraintError};

/// Administrative level of a location node, from the root down.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum LocationLevel {
    Province,
    District,
    Sector,
    Cell,
    Village,
}

impl LocationLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Province => "province",
            Self::District => "district",
            Self::Sector => "sector",
            Self::Cell => "cell",
            Self::Village => "village",
        }
    }

    /// Level expected for direct children of a node at this level.
    pub const fn child_level(self) -> Option<Self> {
        match self {
            Self::Province => Some(Self::District),
            Self::District => Some(Self::Sector),
            Self::Sector => Some(Self::Cell),
            Self::Cell => Some(Self::Village),
            Self::Village => None,
        }
    }
}

impl Display for LocationLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<&str> for LocationLevel {
    type Error = TypeConstraintError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "province" => Ok(Self::Province),
            "district" => Ok(Self::District),
            "sector" => Ok(Self::Sector),
            "cell" => Ok(Self::Cell),
            "village" => Ok(Self::Village),
            other => Err(TypeConstraintError::InvalidValue(format!(
                "location level: {other}"
            ))),
        }
    }
}

impl TryFrom<String> for LocationLevel {
    type Error = TypeConstraintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_from(value.as_str())
    }
}

/// Node of the province → district → sector → cell → village tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Location {
    pub id: LocationId,
    pub parent_id: Option<LocationId>,
    pub level: LocationLevel,
    pub name: LocationName,
}

/// Data required to insert a new [`Location`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewLocation {
    pub parent_id: Option<LocationId>,
    pub level: LocationLevel,
    pub name: LocationName,
}

impl NewLocation {
    /// Checks that the node fits under `parent` (or is a root province).
    pub fn fits_under(&self, parent: Option<&Location>) -> bool {
        match parent {
            None => self.level == LocationLevel::Province,
            Some(parent) => parent.level.child_level() == Some(self.level),
        }
    }
}
