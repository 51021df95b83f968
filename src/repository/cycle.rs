use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::cycle::{NewSavingCycle, SavingCycle};
use crate::domain::slot::NewSlot;
use crate::domain::types::{CycleId, GroupId};
use crate::models::cycle::{NewSavingCycle as DbNewSavingCycle, SavingCycle as DbSavingCycle};
use crate::models::slot::NewSlot as DbNewSlot;
use crate::repository::{
    CycleReader, CycleWriter, DieselRepository, RepositoryError, RepositoryResult,
};

/// Rows per multi-row insert; keeps bound parameters under SQLite's limit.
const SLOT_INSERT_CHUNK: usize = 150;

impl CycleReader for DieselRepository {
    fn get_active_cycle(&self, group_id: GroupId) -> RepositoryResult<Option<SavingCycle>> {
        use crate::schema::saving_cycles;

        let mut conn = self.conn()?;

        let cycle = saving_cycles::table
            .filter(saving_cycles::group_id.eq(group_id.get()))
            .filter(saving_cycles::active.eq(true))
            .first::<DbSavingCycle>(&mut conn)
            .optional()?;

        let cycle = cycle.map(TryInto::try_into).transpose()?;
        Ok(cycle)
    }

    fn get_cycle_by_id(&self, id: CycleId) -> RepositoryResult<Option<SavingCycle>> {
        use crate::schema::saving_cycles;

        let mut conn = self.conn()?;

        let cycle = saving_cycles::table
            .filter(saving_cycles::id.eq(id.get()))
            .first::<DbSavingCycle>(&mut conn)
            .optional()?;

        let cycle = cycle.map(TryInto::try_into).transpose()?;
        Ok(cycle)
    }

    fn list_cycles(&self, group_id: GroupId) -> RepositoryResult<Vec<SavingCycle>> {
        use crate::schema::saving_cycles;

        let mut conn = self.conn()?;

        let cycles = saving_cycles::table
            .filter(saving_cycles::group_id.eq(group_id.get()))
            .order((saving_cycles::created_at.desc(), saving_cycles::id.desc()))
            .load::<DbSavingCycle>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<SavingCycle>, _>>()?;

        Ok(cycles)
    }
}

impl CycleWriter for DieselRepository {
    fn create_cycle_with_slots(
        &self,
        cycle: &NewSavingCycle,
        slots: &[NewSlot],
    ) -> RepositoryResult<SavingCycle> {
        use crate::schema::{saving_cycles, slots as slots_table};

        let mut conn = self.conn()?;

        let created = conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(saving_cycles::table)
                .values(DbNewSavingCycle::from(cycle))
                .get_result::<DbSavingCycle>(conn)?;
            let cycle_id = CycleId::new(created.id)?;

            let rows: Vec<DbNewSlot> = slots
                .iter()
                .map(|slot| DbNewSlot::for_cycle(cycle_id, slot))
                .collect();
            for chunk in rows.chunks(SLOT_INSERT_CHUNK) {
                diesel::insert_into(slots_table::table)
                    .values(chunk)
                    .execute(conn)?;
            }

            Ok(created)
        })?;

        Ok(created.try_into()?)
    }

    fn deactivate_cycle(&self, id: CycleId, ended_at: NaiveDateTime) -> RepositoryResult<usize> {
        use crate::schema::saving_cycles;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            saving_cycles::table
                .filter(saving_cycles::id.eq(id.get()))
                .filter(saving_cycles::active.eq(true)),
        )
        .set((
            saving_cycles::active.eq(false),
            saving_cycles::ended_at.eq(Some(ended_at)),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
