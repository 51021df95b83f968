use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::penalty::SlotState;
use crate::domain::saving::{SavingRecord, friendly_status};
use crate::domain::types::{CycleId, GroupId, MemberId, SlotId};
use crate::dto::slots::{MemberSlotStatusDto, SlotDto};
use crate::repository::{
    CycleReader, GroupReader, MemberReader, PenaltyConfigReader, PenaltyWriter,
    SavingListQuery, SavingReader, SlotListQuery, SlotReader,
};

use super::penalties::evaluate_penalties;
use super::savings::load_rules;
use super::{ServiceError, ServiceResult, load_group};

/// Optional narrowing of slot listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SlotFilter {
    /// Defaults to the active cycle.
    pub cycle_id: Option<CycleId>,
    pub member_id: Option<MemberId>,
    /// Keep only members in this state, and only slots with such members.
    pub state: Option<SlotState>,
}

/// Slots of a cycle with every member's state at `now`.
pub fn list_slots<R>(
    group_id: GroupId,
    filter: SlotFilter,
    user: &AuthenticatedUser,
    repo: &R,
    now: NaiveDateTime,
) -> ServiceResult<Vec<SlotDto>>
where
    R: GroupReader
        + CycleReader
        + MemberReader
        + PenaltyConfigReader
        + SlotReader
        + SavingReader
        + PenaltyWriter,
{
    if !user.can_view_group(group_id) {
        return Err(ServiceError::Unauthorized);
    }

    load_group(repo, group_id)?;

    let cycle = match filter.cycle_id {
        Some(cycle_id) => repo.get_cycle_by_id(cycle_id),
        None => repo.get_active_cycle(group_id),
    };
    let cycle = match cycle {
        Ok(Some(cycle)) if cycle.group_id == group_id => cycle,
        Ok(_) if filter.cycle_id.is_some() => {
            return Err(ServiceError::NotFound("saving cycle".into()));
        }
        Ok(_) => return Err(ServiceError::NotFound("active saving cycle".into())),
        Err(e) => {
            log::error!("Failed to get cycle of group {group_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    evaluate_penalties(group_id, repo, now)?;

    let grace = load_rules(repo, group_id)?.map_or_else(chrono::TimeDelta::zero, |rules| {
        rules.grace_window()
    });

    let mut members = repo.list_active_members(group_id).map_err(|e| {
        log::error!("Failed to list members of group {group_id}: {e}");
        ServiceError::Internal
    })?;
    if let Some(member_id) = filter.member_id {
        members.retain(|m| m.id == member_id);
        if members.is_empty() {
            return Err(ServiceError::NotFound("member".into()));
        }
    }

    let (_, slots) = repo
        .list_slots(SlotListQuery::new(group_id).cycle(cycle.id))
        .map_err(|e| {
            log::error!("Failed to list slots of cycle {}: {e}", cycle.id);
            ServiceError::Internal
        })?;
    let (_, savings) = repo
        .list_savings(SavingListQuery::default().cycle(cycle.id))
        .map_err(|e| {
            log::error!("Failed to list savings of cycle {}: {e}", cycle.id);
            ServiceError::Internal
        })?;
    let savings: HashMap<(SlotId, MemberId), SavingRecord> = savings
        .into_iter()
        .map(|(record, _)| ((record.slot_id, record.member_id), record))
        .collect();

    let mut listed = Vec::with_capacity(slots.len());
    for slot in &slots {
        let scheduled_at = slot.scheduled_at();
        let statuses: Vec<MemberSlotStatusDto> = members
            .iter()
            .filter(|m| m.joined_at.date() <= slot.date)
            .map(|member| {
                let saving = savings.get(&(slot.id, member.id));
                let saved_at = saving.map(|s| s.saved_at);
                MemberSlotStatusDto {
                    member_id: member.id.get(),
                    member_name: member.name.as_str().to_string(),
                    state: SlotState::evaluate(scheduled_at, grace, saved_at, now),
                    amount: saving.map(|s| s.amount.get()),
                    saved_at,
                    status: saved_at.map(|at| friendly_status(scheduled_at, grace, at)),
                }
            })
            .filter(|status| filter.state.is_none_or(|state| status.state == state))
            .collect();

        if filter.state.is_some() && statuses.is_empty() {
            continue;
        }
        listed.push(SlotDto::new(slot, statuses));
    }

    Ok(listed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::saving::FriendlyStatus;
    use crate::domain::types::{PhoneNumber, SavingAmount};
    use crate::forms::savings::RecordSavingFormPayload;
    use crate::repository::{PenaltyListQuery, PenaltyReader};
    use crate::services::fixtures::*;
    use crate::services::savings::record_saving;

    #[test]
    fn daily_cycle_reports_saved_and_missed_members() {
        let repo = seeded_repo();
        set_daily_schedule(&repo, "08:00");
        configure_rules(&repo, 60);
        let slot_ids = start_cycle(&repo, 1, 3);

        let payload = RecordSavingFormPayload {
            member_id: None,
            amount: SavingAmount::new(1000.0).unwrap(),
            phone: PhoneNumber::new("0788000111").unwrap(),
        };
        record_saving(slot_ids[0], payload, &member_user(), &repo, at(1, 8, 30)).unwrap();

        let slots =
            list_slots(group_id(), SlotFilter::default(), &member_user(), &repo, at(1, 9, 5))
                .unwrap();
        assert_eq!(slots.len(), 3);

        let first = &slots[0].members;
        assert_eq!(first.len(), 2);
        assert_eq!(first[0].state, SlotState::Saved);
        assert_eq!(first[0].status, Some(FriendlyStatus::Saved));
        assert_eq!(first[1].state, SlotState::Missed);
        assert!(slots[1].members.iter().all(|m| m.state == SlotState::Upcoming));

        let (_, penalties) = repo
            .list_penalties(PenaltyListQuery::default().group(group_id()))
            .unwrap();
        assert_eq!(penalties.len(), 1);
        assert_eq!(penalties[0].member_id, member_id(2));
    }

    #[test]
    fn filters_by_member_and_state() {
        let repo = seeded_repo();
        set_daily_schedule(&repo, "08:00");
        configure_rules(&repo, 60);
        start_cycle(&repo, 1, 3);

        let filter = SlotFilter {
            member_id: Some(member_id(2)),
            state: Some(SlotState::Missed),
            ..SlotFilter::default()
        };
        let slots = list_slots(group_id(), filter, &manager(), &repo, at(2, 12, 0)).unwrap();
        assert_eq!(slots.len(), 2);
        assert!(slots.iter().all(|s| s.members.len() == 1));
    }

    #[test]
    fn other_groups_cannot_list_slots() {
        let repo = seeded_repo();
        let err = list_slots(
            group_id(),
            SlotFilter::default(),
            &foreign_manager(),
            &repo,
            at(1, 0, 0),
        )
        .unwrap_err();
        assert_eq!(err, ServiceError::Unauthorized);
    }

    #[test]
    fn no_active_cycle_is_not_found() {
        let repo = seeded_repo();
        let err = list_slots(group_id(), SlotFilter::default(), &manager(), &repo, at(1, 0, 0))
            .unwrap_err();
        assert_eq!(err, ServiceError::NotFound("active saving cycle".into()));
    }
}
