use crate::db::{DbConnection, DbPool};
use crate::domain::cycle::{NewSavingCycle, SavingCycle};
use crate::domain::frequency::{FrequencyCategory, NewFrequencyCategory};
use crate::domain::group::Group;
use crate::domain::location::{Location, NewLocation};
use crate::domain::member::Member;
use crate::domain::penalty::{NewPenaltyRecord, PenaltyConfig, PenaltyRecord};
use crate::domain::saving::{MemberSavingTotal, NewSavingRecord, SavingRecord};
use crate::domain::schedule::{NewSchedule, Schedule};
use crate::domain::slot::{NewSlot, Slot};
use crate::domain::types::{
    CategoryId, CycleId, GroupId, LocationId, MemberId, PenaltyId, SlotId,
};
use chrono::NaiveDateTime;

pub use errors::{RepositoryError, RepositoryResult};

pub mod cycle;
pub mod errors;
pub mod frequency;
pub mod group;
pub mod location;
pub mod penalty;
pub mod saving;
pub mod schedule;
pub mod slot;

/// Default page size for list endpoints.
pub const DEFAULT_ITEMS_PER_PAGE: usize = 50;

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// 1-based page selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

impl Pagination {
    pub(crate) fn offset_limit(&self) -> (i64, i64) {
        let offset = ((self.page.max(1) - 1) * self.per_page) as i64;
        (offset, self.per_page as i64)
    }
}

/// Query parameters for listing the slots of a group.
#[derive(Debug, Clone)]
pub struct SlotListQuery {
    pub group_id: GroupId,
    /// Restrict to one cycle; all cycles of the group otherwise.
    pub cycle_id: Option<CycleId>,
}

impl SlotListQuery {
    pub fn new(group_id: GroupId) -> Self {
        Self {
            group_id,
            cycle_id: None,
        }
    }
    pub fn cycle(mut self, cycle_id: CycleId) -> Self {
        self.cycle_id = Some(cycle_id);
        self
    }
}

/// Query parameters for listing saving records.
#[derive(Debug, Clone, Default)]
pub struct SavingListQuery {
    pub member_id: Option<MemberId>,
    pub cycle_id: Option<CycleId>,
    /// Only savings for slots dated on or before this day.
    pub slot_date_until: Option<chrono::NaiveDate>,
    pub pagination: Option<Pagination>,
}

impl SavingListQuery {
    pub fn member(mut self, member_id: MemberId) -> Self {
        self.member_id = Some(member_id);
        self
    }
    pub fn cycle(mut self, cycle_id: CycleId) -> Self {
        self.cycle_id = Some(cycle_id);
        self
    }
    pub fn slot_date_until(mut self, date: chrono::NaiveDate) -> Self {
        self.slot_date_until = Some(date);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Query parameters for listing penalty records.
#[derive(Debug, Clone, Default)]
pub struct PenaltyListQuery {
    pub group_id: Option<GroupId>,
    pub member_id: Option<MemberId>,
    pub cycle_id: Option<CycleId>,
    pub paid: Option<bool>,
    pub pagination: Option<Pagination>,
}

impl PenaltyListQuery {
    pub fn group(mut self, group_id: GroupId) -> Self {
        self.group_id = Some(group_id);
        self
    }
    pub fn member(mut self, member_id: MemberId) -> Self {
        self.member_id = Some(member_id);
        self
    }
    pub fn cycle(mut self, cycle_id: CycleId) -> Self {
        self.cycle_id = Some(cycle_id);
        self
    }
    pub fn paid(mut self, paid: bool) -> Self {
        self.paid = Some(paid);
        self
    }
    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

/// Read-only access to groups owned by the member registry.
pub trait GroupReader {
    fn get_group_by_id(&self, id: GroupId) -> RepositoryResult<Option<Group>>;
}

/// Read-only access to members owned by the member registry.
pub trait MemberReader {
    fn get_member_by_id(&self, id: MemberId) -> RepositoryResult<Option<Member>>;
    /// Active members of a group, ordered by id.
    fn list_active_members(&self, group_id: GroupId) -> RepositoryResult<Vec<Member>>;
}

pub trait FrequencyCategoryReader {
    fn list_frequency_categories(&self) -> RepositoryResult<Vec<FrequencyCategory>>;
    fn get_frequency_category_by_id(
        &self,
        id: CategoryId,
    ) -> RepositoryResult<Option<FrequencyCategory>>;
    /// Whether any group schedule references the category.
    fn frequency_category_in_use(&self, id: CategoryId) -> RepositoryResult<bool>;
}

pub trait FrequencyCategoryWriter {
    /// Fails with [`RepositoryError::Conflict`] when the name already exists.
    fn create_frequency_category(
        &self,
        category: &NewFrequencyCategory,
    ) -> RepositoryResult<FrequencyCategory>;
    fn delete_frequency_category(&self, id: CategoryId) -> RepositoryResult<usize>;
}

pub trait ScheduleReader {
    fn get_schedule(&self, group_id: GroupId) -> RepositoryResult<Option<Schedule>>;
}

pub trait ScheduleWriter {
    /// Replaces the group's schedule and all of its entries atomically.
    fn replace_schedule(&self, schedule: &NewSchedule) -> RepositoryResult<Schedule>;
}

pub trait PenaltyConfigReader {
    fn get_penalty_config(&self, group_id: GroupId) -> RepositoryResult<Option<PenaltyConfig>>;
}

pub trait PenaltyConfigWriter {
    /// Inserts or replaces the rules of `config.group_id`.
    fn upsert_penalty_config(&self, config: &PenaltyConfig) -> RepositoryResult<PenaltyConfig>;
}

pub trait CycleReader {
    fn get_active_cycle(&self, group_id: GroupId) -> RepositoryResult<Option<SavingCycle>>;
    fn get_cycle_by_id(&self, id: CycleId) -> RepositoryResult<Option<SavingCycle>>;
    /// All cycles of a group, newest first.
    fn list_cycles(&self, group_id: GroupId) -> RepositoryResult<Vec<SavingCycle>>;
}

pub trait CycleWriter {
    /// Inserts an active cycle and its slots in one transaction.
    ///
    /// Fails with [`RepositoryError::Conflict`] when the group already has an
    /// active cycle.
    fn create_cycle_with_slots(
        &self,
        cycle: &NewSavingCycle,
        slots: &[NewSlot],
    ) -> RepositoryResult<SavingCycle>;
    /// Marks an active cycle inactive. Returns the number of rows changed.
    fn deactivate_cycle(&self, id: CycleId, ended_at: NaiveDateTime) -> RepositoryResult<usize>;
}

pub trait SlotReader {
    fn get_slot_by_id(&self, id: SlotId) -> RepositoryResult<Option<Slot>>;
    /// Slots in ascending (date, time) order.
    fn list_slots(&self, query: SlotListQuery) -> RepositoryResult<(usize, Vec<Slot>)>;
}

pub trait SavingReader {
    /// Saving records together with their slot, newest slot first.
    fn list_savings(
        &self,
        query: SavingListQuery,
    ) -> RepositoryResult<(usize, Vec<(SavingRecord, Slot)>)>;
    /// Saving totals of every member of a group, including members who never
    /// saved, ordered by member id.
    fn summarize_group_savings(
        &self,
        group_id: GroupId,
    ) -> RepositoryResult<Vec<MemberSavingTotal>>;
}

pub trait SavingWriter {
    /// Inserts the saving and, for late saves, its penalty in one transaction.
    ///
    /// Fails with [`RepositoryError::Conflict`] when the member already saved
    /// for the slot. An existing penalty for the pair is left untouched.
    fn record_saving(
        &self,
        saving: &NewSavingRecord,
        penalty: Option<&NewPenaltyRecord>,
    ) -> RepositoryResult<SavingRecord>;
}

pub trait PenaltyReader {
    fn get_penalty_by_id(&self, id: PenaltyId) -> RepositoryResult<Option<PenaltyRecord>>;
    /// Penalties ordered by creation time, newest first.
    fn list_penalties(
        &self,
        query: PenaltyListQuery,
    ) -> RepositoryResult<(usize, Vec<PenaltyRecord>)>;
}

pub trait PenaltyWriter {
    /// Inserts the penalties whose (slot, member) pair has none yet.
    /// Returns how many were created.
    fn create_penalties_if_absent(
        &self,
        penalties: &[NewPenaltyRecord],
    ) -> RepositoryResult<usize>;
    /// Marks an unpaid penalty paid. Returns 0 when it is missing or already paid.
    fn mark_penalty_paid(&self, id: PenaltyId, paid_at: NaiveDateTime) -> RepositoryResult<usize>;
}

pub trait LocationReader {
    fn get_location_by_id(&self, id: LocationId) -> RepositoryResult<Option<Location>>;
    /// Children of `parent`, or the provinces when `parent` is `None`; by name.
    fn list_locations(&self, parent: Option<LocationId>) -> RepositoryResult<Vec<Location>>;
}

pub trait LocationWriter {
    fn create_location(&self, location: &NewLocation) -> RepositoryResult<Location>;
}
