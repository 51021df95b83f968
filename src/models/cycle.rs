use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::domain::cycle::{
    NewSavingCycle as DomainNewSavingCycle, SavingCycle as DomainSavingCycle,
};
use crate::domain::types::{SlotCount, TypeConstraintError};

/// Diesel model representing the `saving_cycles` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::saving_cycles)]
pub struct SavingCycle {
    pub id: i32,
    pub group_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
    pub total_slots: i32,
    pub created_at: NaiveDateTime,
    pub ended_at: Option<NaiveDateTime>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::saving_cycles)]
pub struct NewSavingCycle {
    pub group_id: i32,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub active: bool,
    pub total_slots: i32,
    pub created_at: NaiveDateTime,
}

impl TryFrom<SavingCycle> for DomainSavingCycle {
    type Error = TypeConstraintError;

    fn try_from(cycle: SavingCycle) -> Result<Self, Self::Error> {
        Ok(Self {
            id: cycle.id.try_into()?,
            group_id: cycle.group_id.try_into()?,
            start_date: cycle.start_date,
            end_date: cycle.end_date,
            active: cycle.active,
            total_slots: SlotCount::new(cycle.total_slots)?,
            created_at: cycle.created_at,
            ended_at: cycle.ended_at,
        })
    }
}

impl From<&DomainNewSavingCycle> for NewSavingCycle {
    fn from(cycle: &DomainNewSavingCycle) -> Self {
        Self {
            group_id: cycle.group_id.get(),
            start_date: cycle.start_date,
            end_date: cycle.end_date,
            active: true,
            total_slots: cycle.total_slots.get(),
            created_at: cycle.created_at,
        }
    }
}
