use chrono::{NaiveDateTime, NaiveTime};
use diesel::prelude::*;

use crate::domain::schedule::ScheduleEntry as DomainScheduleEntry;
use crate::domain::types::{
    DayOfMonth, TimeOfDay, TypeConstraintError, parse_weekday, weekday_as_str,
};

/// Diesel model representing the `schedules` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::schedules)]
pub struct Schedule {
    pub id: i32,
    pub group_id: i32,
    pub category_id: i32,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::schedules)]
pub struct NewSchedule {
    pub group_id: i32,
    pub category_id: i32,
    pub updated_at: NaiveDateTime,
}

/// Diesel model representing the `schedule_entries` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::schedule_entries)]
pub struct ScheduleEntry {
    pub id: i32,
    pub schedule_id: i32,
    pub weekday: Option<String>,
    pub day_of_month: Option<i32>,
    pub slot_time: NaiveTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::schedule_entries)]
pub struct NewScheduleEntry {
    pub schedule_id: i32,
    pub weekday: Option<String>,
    pub day_of_month: Option<i32>,
    pub slot_time: NaiveTime,
}

impl NewScheduleEntry {
    pub fn for_schedule(schedule_id: i32, entry: &DomainScheduleEntry) -> Self {
        Self {
            schedule_id,
            weekday: entry.weekday.map(|w| weekday_as_str(w).to_string()),
            day_of_month: entry.day_of_month.map(i32::from),
            slot_time: entry.time.get(),
        }
    }
}

impl TryFrom<ScheduleEntry> for DomainScheduleEntry {
    type Error = TypeConstraintError;

    fn try_from(entry: ScheduleEntry) -> Result<Self, Self::Error> {
        Ok(Self {
            weekday: entry.weekday.as_deref().map(parse_weekday).transpose()?,
            day_of_month: entry.day_of_month.map(DayOfMonth::new).transpose()?,
            time: TimeOfDay::from_naive(entry.slot_time),
        })
    }
}
