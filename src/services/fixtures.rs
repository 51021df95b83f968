//! Shared seed data for service tests: group 1 with members 1 and 2 (active)
//! and 3 (inactive), a second group 2 with member 4, and the three frequency
//! categories. All dates fall in March 2025.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::auth::{AuthenticatedUser, Role};
use crate::domain::cycle::NewSavingCycle;
use crate::domain::frequency::NewFrequencyCategory;
use crate::domain::group::Group;
use crate::domain::member::Member;
use crate::domain::penalty::PenaltyConfig;
use crate::domain::schedule::{NewSchedule, ScheduleDefinition, ScheduleEntry};
use crate::domain::slot::NewSlot;
use crate::domain::types::{
    DayOfMonth, FrequencyKind, GraceMinutes, GroupId, GroupName, MemberId, MemberName,
    PenaltyAmount, PhoneNumber, SavingRatio, SlotCount, SlotId, TimeOfDay, parse_weekday,
};
use crate::repository::test::TestRepository;
use crate::repository::{
    CycleWriter, FrequencyCategoryWriter, PenaltyConfigWriter, ScheduleReader, ScheduleWriter,
    SlotListQuery, SlotReader,
};

pub fn date(day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
}

pub fn at(day: u32, h: u32, m: u32) -> NaiveDateTime {
    date(day).and_hms_opt(h, m, 0).unwrap()
}

pub fn group_id() -> GroupId {
    GroupId::new(1).unwrap()
}

pub fn member_id(id: i32) -> MemberId {
    MemberId::new(id).unwrap()
}

pub fn admin() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 100,
        role: Role::Admin,
        group_id: None,
    }
}

pub fn manager() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 101,
        role: Role::GroupManager,
        group_id: Some(group_id()),
    }
}

pub fn foreign_manager() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 102,
        role: Role::GroupManager,
        group_id: Some(GroupId::new(2).unwrap()),
    }
}

/// Member 1 of group 1.
pub fn member_user() -> AuthenticatedUser {
    AuthenticatedUser {
        user_id: 1,
        role: Role::Member,
        group_id: Some(group_id()),
    }
}

fn member(id: i32, group: i32, name: &str, active: bool) -> Member {
    Member {
        id: member_id(id),
        group_id: GroupId::new(group).unwrap(),
        name: MemberName::new(name).unwrap(),
        phone: Some(PhoneNumber::new(format!("078800000{id}")).unwrap()),
        active,
        joined_at: NaiveDate::from_ymd_opt(2024, 1, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    }
}

fn group(id: i32, name: &str) -> Group {
    Group {
        id: GroupId::new(id).unwrap(),
        name: GroupName::new(name).unwrap(),
        created_at: NaiveDate::from_ymd_opt(2023, 6, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    }
}

pub fn seeded_repo() -> TestRepository {
    let repo = TestRepository::default()
        .with_group(group(1, "Abishyizehamwe"))
        .with_group(group(2, "Twiteze Imbere"))
        .with_member(member(1, 1, "Aline", true))
        .with_member(member(2, 1, "Jean", true))
        .with_member(member(3, 1, "Eric", false))
        .with_member(member(4, 2, "Grace", true));
    for kind in [
        FrequencyKind::Daily,
        FrequencyKind::Weekly,
        FrequencyKind::Monthly,
    ] {
        repo.create_frequency_category(&NewFrequencyCategory {
            name: kind,
            created_at: at(1, 0, 0),
        })
        .unwrap();
    }
    repo
}

fn store_schedule(repo: &TestRepository, kind: FrequencyKind, entries: Vec<ScheduleEntry>) {
    repo.replace_schedule(&NewSchedule {
        group_id: group_id(),
        category_id: repo.category_id(kind),
        definition: ScheduleDefinition::from_entries(kind, &entries).unwrap(),
        updated_at: at(1, 0, 0),
    })
    .unwrap();
}

pub fn set_daily_schedule(repo: &TestRepository, time: &str) {
    let entry = ScheduleEntry {
        weekday: None,
        day_of_month: None,
        time: TimeOfDay::parse(time).unwrap(),
    };
    store_schedule(repo, FrequencyKind::Daily, vec![entry]);
}

pub fn set_weekly_schedule(repo: &TestRepository, days: &[&str], time: &str) {
    let entries = days
        .iter()
        .map(|day| ScheduleEntry {
            weekday: Some(parse_weekday(day).unwrap()),
            day_of_month: None,
            time: TimeOfDay::parse(time).unwrap(),
        })
        .collect();
    store_schedule(repo, FrequencyKind::Weekly, entries);
}

pub fn set_monthly_schedule(repo: &TestRepository, days: &[i32], time: &str) {
    let entries = days
        .iter()
        .map(|day| ScheduleEntry {
            weekday: None,
            day_of_month: Some(DayOfMonth::new(*day).unwrap()),
            time: TimeOfDay::parse(time).unwrap(),
        })
        .collect();
    store_schedule(repo, FrequencyKind::Monthly, entries);
}

/// Rules of group 1: 200 for lateness on the day, 500 afterwards, saving in
/// multiples of 1000.
pub fn configure_rules(repo: &TestRepository, grace_minutes: i32) {
    repo.upsert_penalty_config(&PenaltyConfig {
        group_id: group_id(),
        time_delay_penalty: PenaltyAmount::new(200.0).unwrap(),
        date_delay_penalty: PenaltyAmount::new(500.0).unwrap(),
        grace: GraceMinutes::new(grace_minutes).unwrap(),
        saving_ratio: SavingRatio::new(1000.0).unwrap(),
        updated_at: at(1, 0, 0),
    })
    .unwrap();
}

/// Stores an active cycle of group 1 over March `start..=end` expanded from the
/// current schedule, returning its slot ids in order.
pub fn start_cycle(repo: &TestRepository, start: u32, end: u32) -> Vec<SlotId> {
    let schedule = repo.get_schedule(group_id()).unwrap().unwrap();
    let slots: Vec<NewSlot> = schedule
        .definition
        .expand(date(start), date(end))
        .unwrap()
        .into_iter()
        .map(|occurrence| NewSlot::from_occurrence(group_id(), occurrence))
        .collect();
    let cycle = repo
        .create_cycle_with_slots(
            &NewSavingCycle {
                group_id: group_id(),
                start_date: date(start),
                end_date: date(end),
                total_slots: SlotCount::new(slots.len() as i32).unwrap(),
                created_at: at(start, 0, 0),
            },
            &slots,
        )
        .unwrap();
    let (_, slots) = repo
        .list_slots(SlotListQuery::new(group_id()).cycle(cycle.id))
        .unwrap();
    slots.into_iter().map(|slot| slot.id).collect()
}
