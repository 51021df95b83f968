use chrono::NaiveDateTime;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::schedule::{NewSchedule, ScheduleDefinition};
use crate::domain::types::GroupId;
use crate::dto::schedules::ScheduleDto;
use crate::forms::schedules::SetScheduleFormPayload;
use crate::repository::{FrequencyCategoryReader, GroupReader, ScheduleReader, ScheduleWriter};

use super::{ServiceError, ServiceResult, load_group};

pub fn show_schedule<R>(
    group_id: GroupId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<ScheduleDto>
where
    R: ScheduleReader,
{
    if !user.can_view_group(group_id) {
        return Err(ServiceError::Unauthorized);
    }

    match repo.get_schedule(group_id) {
        Ok(Some(schedule)) => Ok(schedule.into()),
        Ok(None) => Err(ServiceError::NotFound("schedule".into())),
        Err(e) => {
            log::error!("Failed to get schedule of group {group_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Validates the entries against the category and replaces the group's schedule.
///
/// Existing cycles keep their slots; the new schedule applies to the next
/// generated cycle.
pub fn set_schedule<R>(
    group_id: GroupId,
    payload: SetScheduleFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
    now: NaiveDateTime,
) -> ServiceResult<ScheduleDto>
where
    R: GroupReader + FrequencyCategoryReader + ScheduleWriter,
{
    if !user.can_manage_group(group_id) {
        return Err(ServiceError::Unauthorized);
    }

    load_group(repo, group_id)?;

    let category = match repo.get_frequency_category_by_id(payload.category_id) {
        Ok(Some(category)) => category,
        Ok(None) => return Err(ServiceError::NotFound("frequency category".into())),
        Err(e) => {
            log::error!("Failed to get frequency category: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let definition = ScheduleDefinition::from_entries(category.name, &payload.entries)?;

    let schedule = NewSchedule {
        group_id,
        category_id: category.id,
        definition,
        updated_at: now,
    };

    match repo.replace_schedule(&schedule) {
        Ok(schedule) => {
            log::info!(
                "Schedule of group {group_id} set to {} with {} entries",
                category.name,
                schedule.definition.times_per_period()
            );
            Ok(schedule.into())
        }
        Err(e) => {
            log::error!("Failed to save schedule of group {group_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
