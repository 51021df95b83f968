use chrono::{NaiveDateTime, TimeDelta};

use crate::domain::auth::AuthenticatedUser;
use crate::domain::penalty::{NewPenaltyRecord, PenaltyConfig, SlotState};
use crate::domain::saving::NewSavingRecord;
use crate::domain::types::{GroupId, MemberId, SlotId};
use crate::dto::Paginated;
use crate::dto::savings::{MemberSavingTotalDto, SavingDto};
use crate::forms::savings::RecordSavingFormPayload;
use crate::repository::{
    CycleReader, DEFAULT_ITEMS_PER_PAGE, GroupReader, MemberReader, PenaltyConfigReader,
    RepositoryError, SavingListQuery, SavingReader, SavingWriter, SlotReader,
};

use super::{ServiceError, ServiceResult, load_group, load_member};

/// Saving rules of a group; groups without rules save with no grace window.
pub(super) fn load_rules<R>(repo: &R, group_id: GroupId) -> ServiceResult<Option<PenaltyConfig>>
where
    R: PenaltyConfigReader,
{
    repo.get_penalty_config(group_id).map_err(|e| {
        log::error!("Failed to get saving rules of group {group_id}: {e}");
        ServiceError::Internal
    })
}

fn grace_of(rules: Option<&PenaltyConfig>) -> TimeDelta {
    rules.map_or_else(TimeDelta::zero, PenaltyConfig::grace_window)
}

/// Records a member's saving for a slot at `now`.
///
/// A save after the grace window also books its penalty, atomically with the
/// saving itself.
pub fn record_saving<R>(
    slot_id: SlotId,
    payload: RecordSavingFormPayload,
    user: &AuthenticatedUser,
    repo: &R,
    now: NaiveDateTime,
) -> ServiceResult<SavingDto>
where
    R: SlotReader + CycleReader + MemberReader + PenaltyConfigReader + SavingWriter,
{
    let member_id = payload
        .member_id
        .or_else(|| user.member_id())
        .ok_or_else(|| ServiceError::Validation("member_id is required".into()))?;

    let slot = match repo.get_slot_by_id(slot_id) {
        Ok(Some(slot)) => slot,
        Ok(None) => return Err(ServiceError::NotFound("slot".into())),
        Err(e) => {
            log::error!("Failed to get slot {slot_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let member = load_member(repo, member_id)?;

    if !user.can_act_for_member(&member) {
        return Err(ServiceError::Unauthorized);
    }
    if member.group_id != slot.group_id {
        return Err(ServiceError::Validation(
            "member does not belong to the group of this slot".into(),
        ));
    }
    if !member.active {
        return Err(ServiceError::Validation("member is not active".into()));
    }

    match repo.get_cycle_by_id(slot.cycle_id) {
        Ok(Some(cycle)) if cycle.active => {}
        Ok(Some(_)) => {
            return Err(ServiceError::Conflict(
                "the saving cycle of this slot is no longer active".into(),
            ));
        }
        Ok(None) => return Err(ServiceError::NotFound("saving cycle".into())),
        Err(e) => {
            log::error!("Failed to get cycle {}: {e}", slot.cycle_id);
            return Err(ServiceError::Internal);
        }
    }

    let rules = load_rules(repo, slot.group_id)?;
    if let Some(rules) = &rules {
        if !payload.amount.is_multiple_of(rules.saving_ratio) {
            return Err(ServiceError::Validation(format!(
                "amount must be a multiple of the saving ratio {}",
                rules.saving_ratio
            )));
        }
    }

    let grace = grace_of(rules.as_ref());
    let scheduled_at = slot.scheduled_at();
    let state = SlotState::evaluate(scheduled_at, grace, Some(now), now);
    let penalty = rules.as_ref().and_then(|rules| {
        NewPenaltyRecord::assess(rules, slot.id, member.id, scheduled_at, state, now)
    });

    let saving = NewSavingRecord {
        slot_id: slot.id,
        member_id: member.id,
        amount: payload.amount,
        phone: payload.phone,
        saved_at: now,
    };

    match repo.record_saving(&saving, penalty.as_ref()) {
        Ok(record) => {
            if let Some(penalty) = &penalty {
                log::info!(
                    "Member {} saved late for slot {}: {} penalty of {}",
                    member.id,
                    slot.id,
                    penalty.penalty_type,
                    penalty.amount
                );
            }
            Ok(SavingDto::new(record, &slot, grace))
        }
        Err(RepositoryError::Conflict(_)) => Err(ServiceError::Conflict("already saved".into())),
        Err(e) => {
            log::error!("Failed to record saving for slot {}: {e}", slot.id);
            Err(ServiceError::Internal)
        }
    }
}

/// One page of a member's saving history across all cycles, newest slot first.
pub fn list_member_savings<R>(
    member_id: MemberId,
    page: usize,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Paginated<SavingDto>>
where
    R: MemberReader + PenaltyConfigReader + SavingReader,
{
    let member = load_member(repo, member_id)?;

    if !user.can_act_for_member(&member) {
        return Err(ServiceError::Unauthorized);
    }

    let grace = grace_of(load_rules(repo, member.group_id)?.as_ref());

    let page = page.max(1);
    let query = SavingListQuery::default()
        .member(member_id)
        .paginate(page, DEFAULT_ITEMS_PER_PAGE);
    match repo.list_savings(query) {
        Ok((total, savings)) => {
            let items = savings
                .into_iter()
                .map(|(record, slot)| SavingDto::new(record, &slot, grace))
                .collect();
            Ok(Paginated::new(items, page, DEFAULT_ITEMS_PER_PAGE, total))
        }
        Err(e) => {
            log::error!("Failed to list savings of member {member_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// How much each member of a group has saved, and how many times.
pub fn group_savings_summary<R>(
    group_id: GroupId,
    user: &AuthenticatedUser,
    repo: &R,
) -> ServiceResult<Vec<MemberSavingTotalDto>>
where
    R: GroupReader + SavingReader,
{
    if !user.can_view_group(group_id) {
        return Err(ServiceError::Unauthorized);
    }

    load_group(repo, group_id)?;

    match repo.summarize_group_savings(group_id) {
        Ok(totals) => Ok(totals.into_iter().map(MemberSavingTotalDto::from).collect()),
        Err(e) => {
            log::error!("Failed to summarize savings of group {group_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
