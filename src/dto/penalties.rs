use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::penalty::PenaltyRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PenaltyDto {
    pub id: i32,
    pub slot_id: i32,
    pub member_id: i32,
    pub penalty_type: String,
    pub amount: f64,
    pub paid: bool,
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

impl From<PenaltyRecord> for PenaltyDto {
    fn from(value: PenaltyRecord) -> Self {
        Self {
            id: value.id.get(),
            slot_id: value.slot_id.get(),
            member_id: value.member_id.get(),
            penalty_type: value.penalty_type.as_str().to_string(),
            amount: value.amount.get(),
            paid: value.paid,
            paid_at: value.paid_at,
            created_at: value.created_at,
        }
    }
}
