use chrono::{NaiveDate, NaiveTime};
use diesel::prelude::*;

use crate::domain::slot::{NewSlot as DomainNewSlot, Slot as DomainSlot};
use crate::domain::types::{CycleId, TimeOfDay, TypeConstraintError};

/// Diesel model representing the `slots` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::slots)]
pub struct Slot {
    pub id: i32,
    pub cycle_id: i32,
    pub group_id: i32,
    pub slot_date: NaiveDate,
    pub slot_time: NaiveTime,
    pub position: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::slots)]
pub struct NewSlot {
    pub cycle_id: i32,
    pub group_id: i32,
    pub slot_date: NaiveDate,
    pub slot_time: NaiveTime,
    pub position: i32,
}

impl NewSlot {
    pub fn for_cycle(cycle_id: CycleId, slot: &DomainNewSlot) -> Self {
        Self {
            cycle_id: cycle_id.get(),
            group_id: slot.group_id.get(),
            slot_date: slot.date,
            slot_time: slot.time.get(),
            position: slot.position.get(),
        }
    }
}

impl TryFrom<Slot> for DomainSlot {
    type Error = TypeConstraintError;

    fn try_from(slot: Slot) -> Result<Self, Self::Error> {
        Ok(Self {
            id: slot.id.try_into()?,
            cycle_id: slot.cycle_id.try_into()?,
            group_id: slot.group_id.try_into()?,
            date: slot.slot_date,
            time: TimeOfDay::from_naive(slot.slot_time),
            position: slot.position.try_into()?,
        })
    }
}
