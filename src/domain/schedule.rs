//! Per-group saving schedule and its expansion into dated occurrences.

use std::collections::HashSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::types::{
    CategoryId, DayOfMonth, FrequencyKind, GroupId, SlotPosition, TimeOfDay, TypeConstraintError,
};

/// Longest cycle, in days, that a schedule may be expanded over.
pub const MAX_CYCLE_DAYS: i64 = 3660;

/// Reasons a set of schedule entries does not fit its frequency category.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    #[error("schedule entries cannot be empty")]
    Empty,
    #[error("a daily schedule takes exactly one time, got {0}")]
    DailyTimeCount(usize),
    #[error("daily entries cannot name a weekday or day of month")]
    UnexpectedDay,
    #[error("weekly entries cannot name a day of month")]
    UnexpectedDayOfMonth,
    #[error("monthly entries cannot name a weekday")]
    UnexpectedWeekday,
    #[error("weekly entries require a weekday")]
    MissingWeekday,
    #[error("monthly entries require a day of month")]
    MissingDayOfMonth,
    #[error("weekday {0} is scheduled more than once")]
    DuplicateWeekday(Weekday),
    #[error("day {0} of the month is scheduled more than once")]
    DuplicateDayOfMonth(DayOfMonth),
}

/// One raw configured entry, as submitted or as persisted.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub weekday: Option<Weekday>,
    pub day_of_month: Option<DayOfMonth>,
    pub time: TimeOfDay,
}

/// Weekly occurrence: a weekday and its saving time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeeklyEntry {
    pub weekday: Weekday,
    pub time: TimeOfDay,
}

/// Monthly occurrence: a day of the month and its saving time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthlyEntry {
    pub day: DayOfMonth,
    pub time: TimeOfDay,
}

/// A validated schedule whose shape matches its frequency category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "frequency", rename_all = "snake_case")]
pub enum ScheduleDefinition {
    Daily { time: TimeOfDay },
    Weekly { entries: Vec<WeeklyEntry> },
    Monthly { entries: Vec<MonthlyEntry> },
}

impl ScheduleDefinition {
    /// Builds a definition from raw entries, enforcing the category shape.
    pub fn from_entries(
        kind: FrequencyKind,
        entries: &[ScheduleEntry],
    ) -> Result<Self, ScheduleError> {
        if entries.is_empty() {
            return Err(ScheduleError::Empty);
        }

        match kind {
            FrequencyKind::Daily => {
                if entries.len() != 1 {
                    return Err(ScheduleError::DailyTimeCount(entries.len()));
                }
                let entry = entries[0];
                if entry.weekday.is_some() || entry.day_of_month.is_some() {
                    return Err(ScheduleError::UnexpectedDay);
                }
                Ok(Self::Daily { time: entry.time })
            }
            FrequencyKind::Weekly => {
                let mut seen = HashSet::new();
                let mut weekly = Vec::with_capacity(entries.len());
                for entry in entries {
                    let weekday = entry.weekday.ok_or(ScheduleError::MissingWeekday)?;
                    if entry.day_of_month.is_some() {
                        return Err(ScheduleError::UnexpectedDayOfMonth);
                    }
                    if !seen.insert(weekday) {
                        return Err(ScheduleError::DuplicateWeekday(weekday));
                    }
                    weekly.push(WeeklyEntry {
                        weekday,
                        time: entry.time,
                    });
                }
                weekly.sort_by_key(|e| e.weekday.num_days_from_monday());
                Ok(Self::Weekly { entries: weekly })
            }
            FrequencyKind::Monthly => {
                let mut seen = HashSet::new();
                let mut monthly = Vec::with_capacity(entries.len());
                for entry in entries {
                    let day = entry.day_of_month.ok_or(ScheduleError::MissingDayOfMonth)?;
                    if entry.weekday.is_some() {
                        return Err(ScheduleError::UnexpectedWeekday);
                    }
                    if !seen.insert(day) {
                        return Err(ScheduleError::DuplicateDayOfMonth(day));
                    }
                    monthly.push(MonthlyEntry {
                        day,
                        time: entry.time,
                    });
                }
                monthly.sort_by_key(|e| e.day);
                Ok(Self::Monthly { entries: monthly })
            }
        }
    }

    pub fn kind(&self) -> FrequencyKind {
        match self {
            Self::Daily { .. } => FrequencyKind::Daily,
            Self::Weekly { .. } => FrequencyKind::Weekly,
            Self::Monthly { .. } => FrequencyKind::Monthly,
        }
    }

    /// Flattens the definition back into raw entries for persistence.
    pub fn entries(&self) -> Vec<ScheduleEntry> {
        match self {
            Self::Daily { time } => vec![ScheduleEntry {
                weekday: None,
                day_of_month: None,
                time: *time,
            }],
            Self::Weekly { entries } => entries
                .iter()
                .map(|e| ScheduleEntry {
                    weekday: Some(e.weekday),
                    day_of_month: None,
                    time: e.time,
                })
                .collect(),
            Self::Monthly { entries } => entries
                .iter()
                .map(|e| ScheduleEntry {
                    weekday: None,
                    day_of_month: Some(e.day),
                    time: e.time,
                })
                .collect(),
        }
    }

    /// Number of configured occurrences per period.
    pub fn times_per_period(&self) -> usize {
        match self {
            Self::Daily { .. } => 1,
            Self::Weekly { entries } => entries.len(),
            Self::Monthly { entries } => entries.len(),
        }
    }

    /// Saving time on `date`, if the schedule includes that date.
    ///
    /// Monthly days past the end of a short month yield `None` for that month.
    pub fn time_on(&self, date: NaiveDate) -> Option<TimeOfDay> {
        match self {
            Self::Daily { time } => Some(*time),
            Self::Weekly { entries } => entries
                .iter()
                .find(|e| e.weekday == date.weekday())
                .map(|e| e.time),
            Self::Monthly { entries } => entries
                .iter()
                .find(|e| e.day.get() == date.day())
                .map(|e| e.time),
        }
    }

    /// Expands the schedule over the inclusive range `[start, end]`.
    ///
    /// Occurrences come out in ascending (date, time) order with 1-based positions.
    pub fn expand(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<SlotOccurrence>, TypeConstraintError> {
        let mut occurrences = Vec::new();
        for date in start.iter_days().take_while(|date| *date <= end) {
            if let Some(time) = self.time_on(date) {
                let position = SlotPosition::new(occurrences.len() as i32 + 1)?;
                occurrences.push(SlotOccurrence {
                    date,
                    time,
                    position,
                });
            }
        }
        Ok(occurrences)
    }
}

/// One expected saving event produced by [`ScheduleDefinition::expand`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotOccurrence {
    pub date: NaiveDate,
    pub time: TimeOfDay,
    pub position: SlotPosition,
}

impl SlotOccurrence {
    pub fn scheduled_at(&self) -> NaiveDateTime {
        self.date.and_time(self.time.get())
    }
}

/// The stored schedule of a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Schedule {
    pub group_id: GroupId,
    pub category_id: CategoryId,
    pub definition: ScheduleDefinition,
    pub updated_at: NaiveDateTime,
}

/// Replacement schedule for a group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewSchedule {
    pub group_id: GroupId,
    pub category_id: CategoryId,
    pub definition: ScheduleDefinition,
    pub updated_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn time(value: &str) -> TimeOfDay {
        TimeOfDay::parse(value).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn weekly(days: &[Weekday], at: &str) -> ScheduleDefinition {
        let entries: Vec<ScheduleEntry> = days
            .iter()
            .map(|weekday| ScheduleEntry {
                weekday: Some(*weekday),
                day_of_month: None,
                time: time(at),
            })
            .collect();
        ScheduleDefinition::from_entries(FrequencyKind::Weekly, &entries).unwrap()
    }

    fn monthly(days: &[i32], at: &str) -> ScheduleDefinition {
        let entries: Vec<ScheduleEntry> = days
            .iter()
            .map(|day| ScheduleEntry {
                weekday: None,
                day_of_month: Some(DayOfMonth::new(*day).unwrap()),
                time: time(at),
            })
            .collect();
        ScheduleDefinition::from_entries(FrequencyKind::Monthly, &entries).unwrap()
    }

    #[test]
    fn daily_requires_exactly_one_time() {
        let entry = ScheduleEntry {
            weekday: None,
            day_of_month: None,
            time: time("08:00"),
        };
        assert_eq!(
            ScheduleDefinition::from_entries(FrequencyKind::Daily, &[entry, entry]).unwrap_err(),
            ScheduleError::DailyTimeCount(2)
        );
        assert_eq!(
            ScheduleDefinition::from_entries(FrequencyKind::Daily, &[]).unwrap_err(),
            ScheduleError::Empty
        );
    }

    #[test]
    fn weekly_rejects_missing_and_repeated_weekdays() {
        let no_day = ScheduleEntry {
            weekday: None,
            day_of_month: None,
            time: time("18:00"),
        };
        assert_eq!(
            ScheduleDefinition::from_entries(FrequencyKind::Weekly, &[no_day]).unwrap_err(),
            ScheduleError::MissingWeekday
        );

        let monday = ScheduleEntry {
            weekday: Some(Weekday::Mon),
            ..no_day
        };
        let monday_later = ScheduleEntry {
            time: time("19:00"),
            ..monday
        };
        assert_eq!(
            ScheduleDefinition::from_entries(FrequencyKind::Weekly, &[monday, monday_later])
                .unwrap_err(),
            ScheduleError::DuplicateWeekday(Weekday::Mon)
        );
    }

    #[test]
    fn monthly_requires_day_of_month() {
        let entry = ScheduleEntry {
            weekday: Some(Weekday::Fri),
            day_of_month: None,
            time: time("10:00"),
        };
        assert_eq!(
            ScheduleDefinition::from_entries(FrequencyKind::Monthly, &[entry]).unwrap_err(),
            ScheduleError::MissingDayOfMonth
        );
    }

    #[test]
    fn weekly_rejects_day_of_month() {
        let entry = ScheduleEntry {
            weekday: Some(Weekday::Tue),
            day_of_month: Some(DayOfMonth::new(5).unwrap()),
            time: time("18:00"),
        };
        assert_eq!(
            ScheduleDefinition::from_entries(FrequencyKind::Weekly, &[entry]).unwrap_err(),
            ScheduleError::UnexpectedDayOfMonth
        );
    }

    #[test]
    fn monthly_rejects_weekday() {
        let entry = ScheduleEntry {
            weekday: Some(Weekday::Fri),
            day_of_month: Some(DayOfMonth::new(15).unwrap()),
            time: time("10:00"),
        };
        assert_eq!(
            ScheduleDefinition::from_entries(FrequencyKind::Monthly, &[entry]).unwrap_err(),
            ScheduleError::UnexpectedWeekday
        );
    }

    #[test]
    fn daily_schedule_yields_one_slot_per_day() {
        let definition = ScheduleDefinition::Daily { time: time("08:00") };
        let slots = definition.expand(date(2025, 3, 1), date(2025, 3, 3)).unwrap();

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].date, date(2025, 3, 1));
        assert_eq!(slots[2].position.get(), 3);
        assert_eq!(slots[1].time.to_string(), "08:00:00");
    }

    #[test]
    fn weekly_monday_thursday_over_two_weeks_yields_four_slots() {
        let definition = weekly(&[Weekday::Thu, Weekday::Mon], "18:00");
        // 2025-03-03 is a Monday.
        let slots = definition.expand(date(2025, 3, 3), date(2025, 3, 16)).unwrap();

        let dates: Vec<NaiveDate> = slots.iter().map(|s| s.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2025, 3, 3),
                date(2025, 3, 6),
                date(2025, 3, 10),
                date(2025, 3, 13)
            ]
        );
        let positions: Vec<i32> = slots.iter().map(|s| s.position.get()).collect();
        assert_eq!(positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn weekly_uses_each_weekday_time() {
        let entries = [
            ScheduleEntry {
                weekday: Some(Weekday::Tue),
                day_of_month: None,
                time: time("07:00"),
            },
            ScheduleEntry {
                weekday: Some(Weekday::Sat),
                day_of_month: None,
                time: time("16:30"),
            },
        ];
        let definition = ScheduleDefinition::from_entries(FrequencyKind::Weekly, &entries).unwrap();
        let slots = definition.expand(date(2025, 3, 3), date(2025, 3, 9)).unwrap();

        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].time.to_string(), "07:00:00");
        assert_eq!(slots[1].time.to_string(), "16:30:00");
    }

    #[test]
    fn monthly_day_31_skips_short_months() {
        let definition = monthly(&[31], "09:00");
        let slots = definition.expand(date(2025, 1, 1), date(2025, 4, 30)).unwrap();

        let dates: Vec<NaiveDate> = slots.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![date(2025, 1, 31), date(2025, 3, 31)]);
    }

    #[test]
    fn monthly_respects_range_bounds() {
        let definition = monthly(&[15, 1], "09:00");
        let slots = definition.expand(date(2025, 1, 10), date(2025, 2, 10)).unwrap();

        let dates: Vec<NaiveDate> = slots.iter().map(|s| s.date).collect();
        assert_eq!(dates, vec![date(2025, 1, 15), date(2025, 2, 1)]);
    }

    #[test]
    fn empty_range_yields_nothing() {
        let definition = ScheduleDefinition::Daily { time: time("08:00") };
        assert!(definition
            .expand(date(2025, 3, 3), date(2025, 3, 2))
            .unwrap()
            .is_empty());
    }

    #[test]
    fn entries_round_trip_through_definition() {
        let definition = weekly(&[Weekday::Mon, Weekday::Thu], "18:00");
        let rebuilt =
            ScheduleDefinition::from_entries(FrequencyKind::Weekly, &definition.entries()).unwrap();
        assert_eq!(rebuilt, definition);
        assert_eq!(rebuilt.times_per_period(), 2);
    }
}
