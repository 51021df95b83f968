//! Penalty evaluation on read and penalty payment.

use std::collections::HashMap;

use chrono::NaiveDateTime;

use crate::domain::auth::AuthenticatedUser;
use crate::domain::penalty::{NewPenaltyRecord, PenaltyRecord, SlotState};
use crate::domain::types::{CycleId, GroupId, MemberId, PenaltyId, SlotId};
use crate::dto::Paginated;
use crate::dto::penalties::PenaltyDto;
use crate::repository::{
    CycleReader, DEFAULT_ITEMS_PER_PAGE, MemberReader, PenaltyConfigReader, PenaltyListQuery,
    PenaltyReader, PenaltyWriter, SavingListQuery, SavingReader, SlotListQuery, SlotReader,
};

use super::savings::load_rules;
use super::{ServiceError, ServiceResult, load_member};

/// Optional narrowing of penalty listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PenaltyFilter {
    pub cycle_id: Option<CycleId>,
    pub paid: Option<bool>,
    /// 1-based; the first page when absent.
    pub page: Option<usize>,
}

impl PenaltyFilter {
    fn page(&self) -> usize {
        self.page.unwrap_or(1).max(1)
    }

    fn apply(self, mut query: PenaltyListQuery) -> PenaltyListQuery {
        if let Some(cycle_id) = self.cycle_id {
            query = query.cycle(cycle_id);
        }
        if let Some(paid) = self.paid {
            query = query.paid(paid);
        }
        query.paginate(self.page(), DEFAULT_ITEMS_PER_PAGE)
    }
}

fn paginated_penalties(
    page: usize,
    (total, penalties): (usize, Vec<PenaltyRecord>),
) -> Paginated<PenaltyDto> {
    let items = penalties.into_iter().map(PenaltyDto::from).collect();
    Paginated::new(items, page, DEFAULT_ITEMS_PER_PAGE, total)
}

/// Books the penalties owed in the group's active cycle as of `now`.
///
/// Every active member is checked against every slot dated on or after the
/// day they joined. Returns the number of penalties created; running it again
/// creates none.
pub fn evaluate_penalties<R>(
    group_id: GroupId,
    repo: &R,
    now: NaiveDateTime,
) -> ServiceResult<usize>
where
    R: CycleReader
        + MemberReader
        + PenaltyConfigReader
        + SlotReader
        + SavingReader
        + PenaltyWriter,
{
    let internal = |what: &str, e: crate::repository::RepositoryError| {
        log::error!("Failed to {what} while evaluating penalties of group {group_id}: {e}");
        ServiceError::Internal
    };

    let Some(rules) = load_rules(repo, group_id)? else {
        return Ok(0);
    };
    let cycle = match repo.get_active_cycle(group_id) {
        Ok(Some(cycle)) => cycle,
        Ok(None) => return Ok(0),
        Err(e) => return Err(internal("get active cycle", e)),
    };

    let grace = rules.grace_window();
    let (_, slots) = repo
        .list_slots(SlotListQuery::new(group_id).cycle(cycle.id))
        .map_err(|e| internal("list slots", e))?;
    let members = repo
        .list_active_members(group_id)
        .map_err(|e| internal("list members", e))?;
    let (_, savings) = repo
        .list_savings(SavingListQuery::default().cycle(cycle.id))
        .map_err(|e| internal("list savings", e))?;

    let saved_at: HashMap<(SlotId, MemberId), NaiveDateTime> = savings
        .into_iter()
        .map(|(record, _)| ((record.slot_id, record.member_id), record.saved_at))
        .collect();

    let mut owed = Vec::new();
    for slot in slots.iter().filter(|slot| slot.scheduled_at() + grace <= now) {
        let scheduled_at = slot.scheduled_at();
        for member in members.iter().filter(|m| m.joined_at.date() <= slot.date) {
            let saved = saved_at.get(&(slot.id, member.id)).copied();
            let state = SlotState::evaluate(scheduled_at, grace, saved, now);
            let late_at = saved.unwrap_or(now);
            if let Some(penalty) =
                NewPenaltyRecord::assess(&rules, slot.id, member.id, scheduled_at, state, late_at)
            {
                owed.push(penalty);
            }
        }
    }

    if owed.is_empty() {
        return Ok(0);
    }

    let created = repo
        .create_penalties_if_absent(&owed)
        .map_err(|e| internal("store penalties", e))?;
    if created > 0 {
        log::info!(
            "Created {created} penalties in cycle {} of group {group_id}",
            cycle.id
        );
    }
    Ok(created)
}

/// One page of the penalties of every member of a group, newest first.
pub fn list_group_penalties<R>(
    group_id: GroupId,
    filter: PenaltyFilter,
    user: &AuthenticatedUser,
    repo: &R,
    now: NaiveDateTime,
) -> ServiceResult<Paginated<PenaltyDto>>
where
    R: CycleReader
        + MemberReader
        + PenaltyConfigReader
        + SlotReader
        + SavingReader
        + PenaltyReader
        + PenaltyWriter,
{
    if !user.can_view_group(group_id) {
        return Err(ServiceError::Unauthorized);
    }

    evaluate_penalties(group_id, repo, now)?;

    match repo.list_penalties(filter.apply(PenaltyListQuery::default().group(group_id))) {
        Ok(listed) => Ok(paginated_penalties(filter.page(), listed)),
        Err(e) => {
            log::error!("Failed to list penalties of group {group_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn list_member_penalties<R>(
    member_id: MemberId,
    filter: PenaltyFilter,
    user: &AuthenticatedUser,
    repo: &R,
    now: NaiveDateTime,
) -> ServiceResult<Paginated<PenaltyDto>>
where
    R: CycleReader
        + MemberReader
        + PenaltyConfigReader
        + SlotReader
        + SavingReader
        + PenaltyReader
        + PenaltyWriter,
{
    let member = load_member(repo, member_id)?;

    if !user.can_act_for_member(&member) {
        return Err(ServiceError::Unauthorized);
    }

    evaluate_penalties(member.group_id, repo, now)?;

    match repo.list_penalties(filter.apply(PenaltyListQuery::default().member(member_id))) {
        Ok(listed) => Ok(paginated_penalties(filter.page(), listed)),
        Err(e) => {
            log::error!("Failed to list penalties of member {member_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Settles a penalty in full.
pub fn pay_penalty<R>(
    penalty_id: PenaltyId,
    user: &AuthenticatedUser,
    repo: &R,
    now: NaiveDateTime,
) -> ServiceResult<PenaltyDto>
where
    R: MemberReader + PenaltyReader + PenaltyWriter,
{
    let penalty = match repo.get_penalty_by_id(penalty_id) {
        Ok(Some(penalty)) => penalty,
        Ok(None) => return Err(ServiceError::NotFound("penalty".into())),
        Err(e) => {
            log::error!("Failed to get penalty {penalty_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    let member = load_member(repo, penalty.member_id)?;
    if !user.can_act_for_member(&member) {
        return Err(ServiceError::Unauthorized);
    }

    if penalty.paid {
        return Err(ServiceError::Conflict("penalty is already paid".into()));
    }

    match repo.mark_penalty_paid(penalty_id, now) {
        Ok(0) => Err(ServiceError::Conflict("penalty is already paid".into())),
        Ok(_) => {
            log::info!(
                "Member {} paid penalty {penalty_id} of {}",
                penalty.member_id,
                penalty.amount
            );
            let mut paid = PenaltyDto::from(penalty);
            paid.paid = true;
            paid.paid_at = Some(now);
            Ok(paid)
        }
        Err(e) => {
            log::error!("Failed to pay penalty {penalty_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{PhoneNumber, SavingAmount};
    use crate::forms::savings::RecordSavingFormPayload;
    use crate::repository::test::TestRepository;
    use crate::services::fixtures::*;
    use crate::services::savings::record_saving;

    fn daily_cycle() -> (TestRepository, Vec<SlotId>) {
        let repo = seeded_repo();
        set_daily_schedule(&repo, "08:00");
        configure_rules(&repo, 60);
        let slots = start_cycle(&repo, 1, 3);
        (repo, slots)
    }

    fn save(repo: &TestRepository, slot_id: SlotId, now: NaiveDateTime) {
        let payload = RecordSavingFormPayload {
            member_id: None,
            amount: SavingAmount::new(1000.0).unwrap(),
            phone: PhoneNumber::new("0788000111").unwrap(),
        };
        record_saving(slot_id, payload, &member_user(), repo, now).unwrap();
    }

    #[test]
    fn missed_slot_on_same_day_costs_time_delay() {
        let (repo, slots) = daily_cycle();
        assert_eq!(slots.len(), 3);
        save(&repo, slots[0], at(1, 8, 30));

        let penalties = list_member_penalties(
            member_id(2),
            PenaltyFilter::default(),
            &manager(),
            &repo,
            at(1, 9, 5),
        )
        .unwrap()
        .items;
        assert_eq!(penalties.len(), 1);
        assert_eq!(penalties[0].penalty_type, "time_delay");
        assert_eq!(penalties[0].amount, 200.0);

        let own = list_member_penalties(
            member_id(1),
            PenaltyFilter::default(),
            &member_user(),
            &repo,
            at(1, 9, 5),
        )
        .unwrap();
        assert!(own.items.is_empty());
        assert_eq!(own.total, 0);
    }

    #[test]
    fn evaluation_is_idempotent() {
        let (repo, _) = daily_cycle();

        // Members 1 and 2 missed day 1 and day 2; member 3 is inactive.
        assert_eq!(evaluate_penalties(group_id(), &repo, at(2, 10, 0)).unwrap(), 4);
        assert_eq!(evaluate_penalties(group_id(), &repo, at(2, 10, 0)).unwrap(), 0);
        assert_eq!(evaluate_penalties(group_id(), &repo, at(2, 11, 0)).unwrap(), 0);

        let penalties = list_group_penalties(
            group_id(),
            PenaltyFilter::default(),
            &manager(),
            &repo,
            at(2, 11, 0),
        )
        .unwrap();
        assert_eq!(penalties.total, 4);
        let missed = penalties
            .items
            .iter()
            .filter(|p| p.penalty_type == "missed")
            .count();
        assert_eq!(missed, 2);
    }

    #[test]
    fn nothing_is_owed_before_grace_ends() {
        let (repo, _) = daily_cycle();
        assert_eq!(evaluate_penalties(group_id(), &repo, at(1, 8, 59)).unwrap(), 0);
    }

    #[test]
    fn groups_without_rules_owe_nothing() {
        let repo = seeded_repo();
        set_daily_schedule(&repo, "08:00");
        start_cycle(&repo, 1, 3);
        assert_eq!(evaluate_penalties(group_id(), &repo, at(3, 23, 0)).unwrap(), 0);
    }

    #[test]
    fn paying_twice_conflicts() {
        let (repo, _) = daily_cycle();
        let penalties = list_member_penalties(
            member_id(1),
            PenaltyFilter::default(),
            &member_user(),
            &repo,
            at(1, 12, 0),
        )
        .unwrap();
        let penalty_id = PenaltyId::new(penalties.items[0].id).unwrap();

        let paid = pay_penalty(penalty_id, &member_user(), &repo, at(1, 13, 0)).unwrap();
        assert!(paid.paid);
        assert_eq!(paid.paid_at, Some(at(1, 13, 0)));

        let err = pay_penalty(penalty_id, &member_user(), &repo, at(1, 14, 0)).unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));

        let unpaid = list_member_penalties(
            member_id(1),
            PenaltyFilter {
                paid: Some(false),
                ..PenaltyFilter::default()
            },
            &member_user(),
            &repo,
            at(1, 14, 0),
        )
        .unwrap();
        assert!(unpaid.items.is_empty());
    }

    #[test]
    fn penalty_listing_is_paged() {
        let repo = seeded_repo();
        set_daily_schedule(&repo, "08:00");
        configure_rules(&repo, 60);
        start_cycle(&repo, 1, 31);

        // Members 1 and 2 missed the 30 days before the 31st.
        let first = list_group_penalties(
            group_id(),
            PenaltyFilter::default(),
            &manager(),
            &repo,
            at(31, 7, 0),
        )
        .unwrap();
        assert_eq!(first.total, 60);
        assert_eq!(first.page, 1);
        assert_eq!(first.pages, 2);
        assert_eq!(first.items.len(), DEFAULT_ITEMS_PER_PAGE);

        let second = list_group_penalties(
            group_id(),
            PenaltyFilter {
                page: Some(2),
                ..PenaltyFilter::default()
            },
            &manager(),
            &repo,
            at(31, 7, 0),
        )
        .unwrap();
        assert_eq!(second.total, 60);
        assert_eq!(second.page, 2);
        assert_eq!(second.items.len(), 10);
        assert!(second.items.iter().all(|p| !first.items.contains(p)));
    }

    #[test]
    fn members_cannot_pay_for_others() {
        let (repo, _) = daily_cycle();
        evaluate_penalties(group_id(), &repo, at(1, 12, 0)).unwrap();
        let (_, penalties) = repo
            .list_penalties(PenaltyListQuery::default().member(member_id(2)))
            .unwrap();

        let err = pay_penalty(penalties[0].id, &member_user(), &repo, at(1, 13, 0)).unwrap_err();
        assert_eq!(err, ServiceError::Unauthorized);

        let missing = PenaltyId::new(999).unwrap();
        let err = pay_penalty(missing, &manager(), &repo, at(1, 13, 0)).unwrap_err();
        assert_eq!(err, ServiceError::NotFound("penalty".into()));
    }
}
