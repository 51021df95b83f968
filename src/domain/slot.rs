use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::domain::schedule::SlotOccurrence;
use crate::domain::types::{CycleId, GroupId, SlotId, SlotPosition, TimeOfDay};

/// One expected saving event of a cycle. Immutable once generated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Slot {
    pub id: SlotId,
    pub cycle_id: CycleId,
    pub group_id: GroupId,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub position: SlotPosition,
}

impl Slot {
    /// Local date-time at which members are expected to save.
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time.get())
    }
}

/// Data required to insert a [`Slot`]; the cycle id is assigned on insert.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewSlot {
    pub group_id: GroupId,
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub position: SlotPosition,
}

impl NewSlot {
    pub fn from_occurrence(group_id: GroupId, occurrence: SlotOccurrence) -> Self {
        Self {
            group_id,
            date: occurrence.date,
            time: occurrence.time,
            position: occurrence.position,
        }
    }
}
