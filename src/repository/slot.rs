use diesel::prelude::*;

use crate::domain::slot::Slot;
use crate::domain::types::SlotId;
use crate::models::slot::Slot as DbSlot;
use crate::repository::{DieselRepository, RepositoryResult, SlotListQuery, SlotReader};

impl SlotReader for DieselRepository {
    fn get_slot_by_id(&self, id: SlotId) -> RepositoryResult<Option<Slot>> {
        use crate::schema::slots;

        let mut conn = self.conn()?;

        let slot = slots::table
            .filter(slots::id.eq(id.get()))
            .first::<DbSlot>(&mut conn)
            .optional()?;

        let slot = slot.map(TryInto::try_into).transpose()?;
        Ok(slot)
    }

    fn list_slots(&self, query: SlotListQuery) -> RepositoryResult<(usize, Vec<Slot>)> {
        use crate::schema::slots;

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = slots::table
                .filter(slots::group_id.eq(query.group_id.get()))
                .into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(cycle_id) = query.cycle_id {
                items = items.filter(slots::cycle_id.eq(cycle_id.get()));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let items = query_builder()
            .order((
                slots::slot_date.asc(),
                slots::slot_time.asc(),
                slots::id.asc(),
            ))
            .load::<DbSlot>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Slot>, _>>()?;

        Ok((total, items))
    }
}
