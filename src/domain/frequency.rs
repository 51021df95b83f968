use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{CategoryId, FrequencyKind};

/// Lookup entry describing how often a group saves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FrequencyCategory {
    pub id: CategoryId,
    pub name: FrequencyKind,
    pub created_at: NaiveDateTime,
}

/// Data required to insert a new [`FrequencyCategory`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewFrequencyCategory {
    pub name: FrequencyKind,
    pub created_at: NaiveDateTime,
}
