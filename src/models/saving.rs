use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::saving::{
    NewSavingRecord as DomainNewSavingRecord, SavingRecord as DomainSavingRecord,
};
use crate::domain::types::{PhoneNumber, SavingAmount, TypeConstraintError};

/// Diesel model representing the `saving_records` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::saving_records)]
pub struct SavingRecord {
    pub id: i32,
    pub slot_id: i32,
    pub member_id: i32,
    pub amount: f64,
    pub phone: String,
    pub saved_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::saving_records)]
pub struct NewSavingRecord {
    pub slot_id: i32,
    pub member_id: i32,
    pub amount: f64,
    pub phone: String,
    pub saved_at: NaiveDateTime,
}

impl TryFrom<SavingRecord> for DomainSavingRecord {
    type Error = TypeConstraintError;

    fn try_from(record: SavingRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.try_into()?,
            slot_id: record.slot_id.try_into()?,
            member_id: record.member_id.try_into()?,
            amount: SavingAmount::new(record.amount)?,
            phone: PhoneNumber::new(record.phone)?,
            saved_at: record.saved_at,
        })
    }
}

impl From<&DomainNewSavingRecord> for NewSavingRecord {
    fn from(record: &DomainNewSavingRecord) -> Self {
        Self {
            slot_id: record.slot_id.get(),
            member_id: record.member_id.get(),
            amount: record.amount.get(),
            phone: record.phone.as_str().to_string(),
            saved_at: record.saved_at,
        }
    }
}
