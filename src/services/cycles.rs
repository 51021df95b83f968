use chrono::NaiveDateTime;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::cycle::{NewSavingCycle, SavingCycle};
use crate::domain::schedule::MAX_CYCLE_DAYS;
use crate::domain::slot::NewSlot;
use crate::domain::types::{GroupId, SlotCount};
use crate::forms::cycles::GenerateCycleFormPayload;
use crate::repository::{CycleReader, CycleWriter, GroupReader, RepositoryError, ScheduleReader};

use super::{ServiceError, ServiceResult, load_group};

const ACTIVE_CYCLE_EXISTS: &str = "an active saving cycle already exists for this group";

/// Expands the group's schedule over `[start_date, end_date]` and stores the
/// resulting cycle with all of its slots.
pub fn generate_slots<R>(
    group_id: GroupId,
    payload: GenerateCycleFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
    now: NaiveDateTime,
) -> ServiceResult<SavingCycle>
where
    R: GroupReader + ScheduleReader + CycleReader + CycleWriter,
{
    if !user.can_manage_group(group_id) {
        return Err(ServiceError::Unauthorized);
    }

    let GenerateCycleFormPayload {
        start_date,
        end_date,
    } = payload;

    if end_date < start_date {
        return Err(ServiceError::Validation(
            "cycle end date must not be before its start date".into(),
        ));
    }
    if (end_date - start_date).num_days() >= MAX_CYCLE_DAYS {
        return Err(ServiceError::Validation(format!(
            "a saving cycle cannot span more than {MAX_CYCLE_DAYS} days"
        )));
    }

    load_group(repo, group_id)?;

    match repo.get_active_cycle(group_id) {
        Ok(None) => {}
        Ok(Some(_)) => return Err(ServiceError::Conflict(ACTIVE_CYCLE_EXISTS.into())),
        Err(e) => {
            log::error!("Failed to get active cycle of group {group_id}: {e}");
            return Err(ServiceError::Internal);
        }
    }

    let schedule = match repo.get_schedule(group_id) {
        Ok(Some(schedule)) => schedule,
        Ok(None) => return Err(ServiceError::NotFound("schedule".into())),
        Err(e) => {
            log::error!("Failed to get schedule of group {group_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let occurrences = schedule.definition.expand(start_date, end_date)?;
    if occurrences.is_empty() {
        return Err(ServiceError::Validation("No valid slots generated".into()));
    }

    let slots: Vec<NewSlot> = occurrences
        .into_iter()
        .map(|occurrence| NewSlot::from_occurrence(group_id, occurrence))
        .collect();

    let cycle = NewSavingCycle {
        group_id,
        start_date,
        end_date,
        total_slots: SlotCount::new(slots.len() as i32)?,
        created_at: now,
    };

    match repo.create_cycle_with_slots(&cycle, &slots) {
        Ok(cycle) => {
            log::info!(
                "Generated cycle {} for group {group_id}: {} slots from {start_date} to {end_date}",
                cycle.id,
                cycle.total_slots
            );
            Ok(cycle)
        }
        Err(RepositoryError::Conflict(_)) => {
            Err(ServiceError::Conflict(ACTIVE_CYCLE_EXISTS.into()))
        }
        Err(e) => {
            log::error!("Failed to create cycle for group {group_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Deactivates the current cycle. Slots, savings and penalties are kept.
pub fn reset_cycle<R>(
    group_id: GroupId,
    user: &AuthenticatedUser,
    repo: &R,
    now: NaiveDateTime,
) -> ServiceResult<SavingCycle>
where
    R: CycleReader + CycleWriter,
{
    if !user.can_manage_group(group_id) {
        return Err(ServiceError::Unauthorized);
    }

    let cycle = match repo.get_active_cycle(group_id) {
        Ok(Some(cycle)) => cycle,
        Ok(None) => return Err(ServiceError::NotFound("active saving cycle".into())),
        Err(e) => {
            log::error!("Failed to get active cycle of group {group_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match repo.deactivate_cycle(cycle.id, now) {
        Ok(0) => Err(ServiceError::NotFound("active saving cycle".into())),
        Ok(_) => {
            log::info!("Reset cycle {} of group {group_id}", cycle.id);
            Ok(SavingCycle {
                active: false,
                ended_at: Some(now),
                ..cycle
            })
        }
        Err(e) => {
            log::error!("Failed to reset cycle {}: {e}", cycle.id);
            Err(ServiceError::Internal)
        }
    }
}

/// All rounds of a group, newest first.
pub fn list_cycles<R>(
    group_id: GroupId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Vec<SavingCycle>>
where
    R: GroupReader + CycleReader,
{
    if !user.can_view_group(group_id) {
        return Err(ServiceError::Unauthorized);
    }

    load_group(repo, group_id)?;

    repo.list_cycles(group_id).map_err(|e| {
        log::error!("Failed to list cycles of group {group_id}: {e}");
        ServiceError::Internal
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{SlotListQuery, SlotReader};
    use crate::services::fixtures::*;

    fn range(start: u32, end: u32) -> GenerateCycleFormPayload {
        GenerateCycleFormPayload {
            start_date: date(start),
            end_date: date(end),
        }
    }

    #[test]
    fn generates_weekly_slots_in_order() {
        let repo = seeded_repo();
        set_weekly_schedule(&repo, &["monday", "thursday"], "18:00");

        // 2025-03-03 is a Monday.
        let cycle = generate_slots(group_id(), range(3, 16), &manager(), &repo, at(1, 9, 0))
            .unwrap();
        assert!(cycle.active);
        assert_eq!(cycle.total_slots.get(), 4);

        let (total, slots) = repo
            .list_slots(SlotListQuery::new(group_id()).cycle(cycle.id))
            .unwrap();
        assert_eq!(total, 4);
        let days: Vec<u32> = slots.iter().map(|s| chrono::Datelike::day(&s.date)).collect();
        assert_eq!(days, vec![3, 6, 10, 13]);
        assert!(slots.iter().all(|s| s.time.to_string() == "18:00:00"));
    }

    #[test]
    fn second_generation_conflicts_until_reset() {
        let repo = seeded_repo();
        set_daily_schedule(&repo, "08:00");

        generate_slots(group_id(), range(1, 3), &manager(), &repo, at(1, 0, 0)).unwrap();
        let err = generate_slots(group_id(), range(4, 6), &manager(), &repo, at(1, 0, 0))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let reset = reset_cycle(group_id(), &manager(), &repo, at(2, 0, 0)).unwrap();
        assert!(!reset.active);
        assert_eq!(reset.ended_at, Some(at(2, 0, 0)));

        generate_slots(group_id(), range(4, 6), &manager(), &repo, at(2, 0, 0)).unwrap();
        let cycles = list_cycles(group_id(), &member_user(), &repo).unwrap();
        assert_eq!(cycles.len(), 2);
        assert!(cycles[0].active);
        assert!(!cycles[1].active);
    }

    #[test]
    fn reset_keeps_slots() {
        let repo = seeded_repo();
        set_daily_schedule(&repo, "08:00");
        let cycle =
            generate_slots(group_id(), range(1, 3), &manager(), &repo, at(1, 0, 0)).unwrap();

        reset_cycle(group_id(), &manager(), &repo, at(2, 0, 0)).unwrap();

        let (total, _) = repo
            .list_slots(SlotListQuery::new(group_id()).cycle(cycle.id))
            .unwrap();
        assert_eq!(total, 3);
    }

    #[test]
    fn reset_without_active_cycle_is_not_found() {
        let repo = seeded_repo();
        let err = reset_cycle(group_id(), &manager(), &repo, at(1, 0, 0)).unwrap_err();
        assert_eq!(err, ServiceError::NotFound("active saving cycle".into()));
    }

    #[test]
    fn missing_schedule_is_not_found() {
        let repo = seeded_repo();
        let err =
            generate_slots(group_id(), range(1, 3), &manager(), &repo, at(1, 0, 0)).unwrap_err();
        assert_eq!(err, ServiceError::NotFound("schedule".into()));
    }

    #[test]
    fn range_without_slots_is_rejected() {
        let repo = seeded_repo();
        set_monthly_schedule(&repo, &[31], "09:00");

        let err = generate_slots(
            group_id(),
            GenerateCycleFormPayload {
                start_date: chrono::NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
                end_date: chrono::NaiveDate::from_ymd_opt(2025, 2, 28).unwrap(),
            },
            &manager(),
            &repo,
            at(1, 0, 0),
        )
        .unwrap_err();
        assert_eq!(
            err,
            ServiceError::Validation("No valid slots generated".into())
        );
    }

    #[test]
    fn reversed_range_is_rejected() {
        let repo = seeded_repo();
        set_daily_schedule(&repo, "08:00");
        let err =
            generate_slots(group_id(), range(5, 1), &manager(), &repo, at(1, 0, 0)).unwrap_err();
        assert!(matches!(err, ServiceError::Validation(_)));
    }
}
