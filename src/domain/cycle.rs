use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::types::{CycleId, GroupId, SlotCount};

/// A saving round over which slots are generated and tracked.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SavingCycle {
    pub id: CycleId,
    pub group_id: GroupId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
    pub total_slots: SlotCount,
    pub created_at: NaiveDateTime,
    /// Set when the cycle is reset.
    pub ended_at: Option<NaiveDateTime>,
}

/// Data required to insert a new active [`SavingCycle`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSavingCycle {
    pub group_id: GroupId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub total_slots: SlotCount,
    pub created_at: NaiveDateTime,
}
