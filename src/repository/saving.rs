use diesel::prelude::*;

use crate::domain::penalty::NewPenaltyRecord;
use crate::domain::saving::{MemberSavingTotal, NewSavingRecord, SavingRecord};
use crate::domain::slot::Slot;
use crate::domain::types::{GroupId, MemberId, MemberName};
use crate::models::penalty::NewPenaltyRecord as DbNewPenaltyRecord;
use crate::models::saving::{NewSavingRecord as DbNewSavingRecord, SavingRecord as DbSavingRecord};
use crate::models::slot::Slot as DbSlot;
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, SavingListQuery, SavingReader,
    SavingWriter,
};

impl SavingReader for DieselRepository {
    fn list_savings(
        &self,
        query: SavingListQuery,
    ) -> RepositoryResult<(usize, Vec<(SavingRecord, Slot)>)> {
        use crate::schema::{saving_records, slots};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = saving_records::table
                .inner_join(slots::table)
                .into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(member_id) = query.member_id {
                items = items.filter(saving_records::member_id.eq(member_id.get()));
            }
            if let Some(cycle_id) = query.cycle_id {
                items = items.filter(slots::cycle_id.eq(cycle_id.get()));
            }
            if let Some(until) = query.slot_date_until {
                items = items.filter(slots::slot_date.le(until));
            }
            items
        };

        let total = query_builder().count().get_result::<i64>(&mut conn)? as usize;

        let mut items = query_builder();
        if let Some(pagination) = &query.pagination {
            let (offset, limit) = pagination.offset_limit();
            items = items.offset(offset).limit(limit);
        }

        let items = items
            .order((
                slots::slot_date.desc(),
                slots::slot_time.desc(),
                saving_records::id.desc(),
            ))
            .select((DbSavingRecord::as_select(), DbSlot::as_select()))
            .load::<(DbSavingRecord, DbSlot)>(&mut conn)?
            .into_iter()
            .map(|(record, slot)| -> RepositoryResult<(SavingRecord, Slot)> {
                Ok((SavingRecord::try_from(record)?, Slot::try_from(slot)?))
            })
            .collect::<RepositoryResult<Vec<_>>>()?;

        Ok((total, items))
    }

    fn summarize_group_savings(
        &self,
        group_id: GroupId,
    ) -> RepositoryResult<Vec<MemberSavingTotal>> {
        use crate::schema::{members, saving_records};
        use diesel::dsl::{count, sum};

        let mut conn = self.conn()?;

        let rows = members::table
            .left_join(saving_records::table)
            .filter(members::group_id.eq(group_id.get()))
            .group_by((members::id, members::name))
            .select((
                members::id,
                members::name,
                sum(saving_records::amount.nullable()),
                count(saving_records::id.nullable()),
            ))
            .order(members::id.asc())
            .load::<(i32, String, Option<f64>, i64)>(&mut conn)?;

        rows.into_iter()
            .map(|(member_id, name, total_saved, total_saves)| -> RepositoryResult<_> {
                Ok(MemberSavingTotal {
                    member_id: MemberId::new(member_id)?,
                    member_name: MemberName::new(name)?,
                    total_saved: total_saved.unwrap_or(0.0),
                    total_saves: total_saves as usize,
                })
            })
            .collect()
    }
}

impl SavingWriter for DieselRepository {
    fn record_saving(
        &self,
        saving: &NewSavingRecord,
        penalty: Option<&NewPenaltyRecord>,
    ) -> RepositoryResult<SavingRecord> {
        use crate::schema::{penalty_records, saving_records};

        let mut conn = self.conn()?;

        let created = conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let created = diesel::insert_into(saving_records::table)
                .values(DbNewSavingRecord::from(saving))
                .get_result::<DbSavingRecord>(conn)?;

            if let Some(penalty) = penalty {
                diesel::insert_or_ignore_into(penalty_records::table)
                    .values(DbNewPenaltyRecord::from(penalty))
                    .execute(conn)?;
            }

            Ok(created)
        })?;

        Ok(created.try_into()?)
    }
}
