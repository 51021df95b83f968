use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::domain::penalty::SlotState;
use crate::domain::saving::FriendlyStatus;
use crate::domain::slot::Slot;

/// State of one member for one slot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberSlotStatusDto {
    pub member_id: i32,
    pub member_name: String,
    pub state: SlotState,
    pub amount: Option<f64>,
    pub saved_at: Option<NaiveDateTime>,
    pub status: Option<FriendlyStatus>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotDto {
    pub id: i32,
    pub cycle_id: i32,
    pub position: i32,
    pub date: NaiveDate,
    pub time: String,
    pub scheduled_at: NaiveDateTime,
    pub members: Vec<MemberSlotStatusDto>,
}

impl SlotDto {
    pub fn new(slot: &Slot, members: Vec<MemberSlotStatusDto>) -> Self {
        Self {
            id: slot.id.get(),
            cycle_id: slot.cycle_id.get(),
            position: slot.position.get(),
            date: slot.date,
            time: slot.time.to_string(),
            scheduled_at: slot.scheduled_at(),
            members,
        }
    }
}
