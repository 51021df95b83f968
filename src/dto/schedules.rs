use chrono::NaiveDateTime;
use serde::Serialize;

use crate::domain::schedule::Schedule;
use crate::domain::types::weekday_as_str;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleEntryDto {
    pub weekday: Option<String>,
    pub day_of_month: Option<u32>,
    /// `HH:MM:SS`.
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleDto {
    pub group_id: i32,
    pub category_id: i32,
    pub frequency: String,
    pub entries: Vec<ScheduleEntryDto>,
    pub updated_at: NaiveDateTime,
}

impl From<Schedule> for ScheduleDto {
    fn from(value: Schedule) -> Self {
        let entries = value
            .definition
            .entries()
            .into_iter()
            .map(|entry| ScheduleEntryDto {
                weekday: entry.weekday.map(|w| weekday_as_str(w).to_string()),
                day_of_month: entry.day_of_month.map(|d| d.get()),
                time: entry.time.to_string(),
            })
            .collect();

        Self {
            group_id: value.group_id.get(),
            category_id: value.category_id.get(),
            frequency: value.definition.kind().as_str().to_string(),
            entries,
            updated_at: value.updated_at,
        }
    }
}
