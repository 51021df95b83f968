use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// Inclusive date range of a new saving cycle.
#[derive(Debug, Deserialize)]
pub struct GenerateCycleForm {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateCycleFormPayload {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GenerateCycleFormError {
    #[error("cycle end date {end} is before its start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
}

impl TryFrom<GenerateCycleForm> for GenerateCycleFormPayload {
    type Error = GenerateCycleFormError;

    fn try_from(value: GenerateCycleForm) -> Result<Self, Self::Error> {
        if value.end_date < value.start_date {
            return Err(GenerateCycleFormError::EndBeforeStart {
                start: value.start_date,
                end: value.end_date,
            });
        }

        Ok(Self {
            start_date: value.start_date,
            end_date: value.end_date,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_reversed_range() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let err = GenerateCycleFormPayload::try_from(GenerateCycleForm {
            start_date: start,
            end_date: end,
        })
        .unwrap_err();
        assert_eq!(err, GenerateCycleFormError::EndBeforeStart { start, end });
    }

    #[test]
    fn single_day_range_is_allowed() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        assert!(
            GenerateCycleFormPayload::try_from(GenerateCycleForm {
                start_date: day,
                end_date: day,
            })
            .is_ok()
        );
    }
}
