use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::penalty::{
    NewPenaltyRecord as DomainNewPenaltyRecord, PenaltyConfig as DomainPenaltyConfig,
    PenaltyRecord as DomainPenaltyRecord,
};
use crate::domain::types::{
    GraceMinutes, PenaltyAmount, PenaltyType, SavingRatio, TypeConstraintError,
};

/// Diesel model representing the `penalty_configs` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::penalty_configs)]
pub struct PenaltyConfig {
    pub id: i32,
    pub group_id: i32,
    pub time_delay_penalty: f64,
    pub date_delay_penalty: f64,
    pub grace_minutes: i32,
    pub saving_ratio: f64,
    pub updated_at: NaiveDateTime,
}

/// Insertable/patchable form of [`PenaltyConfig`].
#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::penalty_configs)]
pub struct NewPenaltyConfig {
    pub group_id: i32,
    pub time_delay_penalty: f64,
    pub date_delay_penalty: f64,
    pub grace_minutes: i32,
    pub saving_ratio: f64,
    pub updated_at: NaiveDateTime,
}

/// Diesel model representing the `penalty_records` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::penalty_records)]
pub struct PenaltyRecord {
    pub id: i32,
    pub slot_id: i32,
    pub member_id: i32,
    pub penalty_type: String,
    pub amount: f64,
    pub paid: bool,
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::penalty_records)]
pub struct NewPenaltyRecord {
    pub slot_id: i32,
    pub member_id: i32,
    pub penalty_type: String,
    pub amount: f64,
    pub paid: bool,
    pub created_at: NaiveDateTime,
}

impl TryFrom<PenaltyConfig> for DomainPenaltyConfig {
    type Error = TypeConstraintError;

    fn try_from(config: PenaltyConfig) -> Result<Self, Self::Error> {
        Ok(Self {
            group_id: config.group_id.try_into()?,
            time_delay_penalty: PenaltyAmount::new(config.time_delay_penalty)?,
            date_delay_penalty: PenaltyAmount::new(config.date_delay_penalty)?,
            grace: GraceMinutes::new(config.grace_minutes)?,
            saving_ratio: SavingRatio::new(config.saving_ratio)?,
            updated_at: config.updated_at,
        })
    }
}

impl From<&DomainPenaltyConfig> for NewPenaltyConfig {
    fn from(config: &DomainPenaltyConfig) -> Self {
        Self {
            group_id: config.group_id.get(),
            time_delay_penalty: config.time_delay_penalty.get(),
            date_delay_penalty: config.date_delay_penalty.get(),
            grace_minutes: config.grace.get(),
            saving_ratio: config.saving_ratio.get(),
            updated_at: config.updated_at,
        }
    }
}

impl TryFrom<PenaltyRecord> for DomainPenaltyRecord {
    type Error = TypeConstraintError;

    fn try_from(record: PenaltyRecord) -> Result<Self, Self::Error> {
        Ok(Self {
            id: record.id.try_into()?,
            slot_id: record.slot_id.try_into()?,
            member_id: record.member_id.try_into()?,
            penalty_type: PenaltyType::try_from(record.penalty_type)?,
            amount: PenaltyAmount::new(record.amount)?,
            paid: record.paid,
            paid_at: record.paid_at,
            created_at: record.created_at,
        })
    }
}

impl From<&DomainNewPenaltyRecord> for NewPenaltyRecord {
    fn from(record: &DomainNewPenaltyRecord) -> Self {
        Self {
            slot_id: record.slot_id.get(),
            member_id: record.member_id.get(),
            penalty_type: record.penalty_type.as_str().to_string(),
            amount: record.amount.get(),
            paid: false,
            created_at: record.created_at,
        }
    }
}
