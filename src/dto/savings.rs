use chrono::{NaiveDate, NaiveDateTime, TimeDelta};
use serde::Serialize;

use crate::domain::saving::{FriendlyStatus, MemberSavingTotal, SavingRecord, friendly_status};
use crate::domain::slot::Slot;

/// A saving with the slot it fulfils and its derived status.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SavingDto {
    pub id: i32,
    pub slot_id: i32,
    pub member_id: i32,
    pub amount: f64,
    pub phone: String,
    pub saved_at: NaiveDateTime,
    pub slot_date: NaiveDate,
    pub slot_time: String,
    pub status: FriendlyStatus,
}

impl SavingDto {
    pub fn new(record: SavingRecord, slot: &Slot, grace: TimeDelta) -> Self {
        Self {
            id: record.id.get(),
            slot_id: record.slot_id.get(),
            member_id: record.member_id.get(),
            amount: record.amount.get(),
            status: friendly_status(slot.scheduled_at(), grace, record.saved_at),
            phone: record.phone.into_inner(),
            saved_at: record.saved_at,
            slot_date: slot.date,
            slot_time: slot.time.to_string(),
        }
    }
}

/// A member's row in the group savings summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MemberSavingTotalDto {
    pub member_id: i32,
    pub member_name: String,
    pub total_saved: f64,
    pub total_saves: usize,
}

impl From<MemberSavingTotal> for MemberSavingTotalDto {
    fn from(value: MemberSavingTotal) -> Self {
        Self {
            member_id: value.member_id.get(),
            member_name: value.member_name.into_inner(),
            total_saved: value.total_saved,
            total_saves: value.total_saves,
        }
    }
}
