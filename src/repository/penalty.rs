use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::penalty::{NewPenaltyRecord, PenaltyConfig, PenaltyRecord};
use crate::domain::types::{GroupId, PenaltyId};
use crate::models::penalty::{
    NewPenaltyConfig as DbNewPenaltyConfig, NewPenaltyRecord as DbNewPenaltyRecord,
    PenaltyConfig as DbPenaltyConfig, PenaltyRecord as DbPenaltyRecord,
};
use crate::repository::{
    DieselRepository, PenaltyConfigReader, PenaltyConfigWriter, PenaltyListQuery, PenaltyReader,
    PenaltyWriter, RepositoryError, RepositoryResult,
};

/// Rows per multi-row insert; keeps bound parameters under SQLite's limit.
const PENALTY_INSERT_CHUNK: usize = 150;

impl PenaltyConfigReader for DieselRepository {
    fn get_penalty_config(&self, group_id: GroupId) -> RepositoryResult<Option<PenaltyConfig>> {
        use crate::schema::penalty_configs;

        let mut conn = self.conn()?;

        let config = penalty_configs::table
            .filter(penalty_configs::group_id.eq(group_id.get()))
            .first::<DbPenaltyConfig>(&mut conn)
            .optional()?;

        let config = config.map(TryInto::try_into).transpose()?;
        Ok(config)
    }
}

impl PenaltyConfigWriter for DieselRepository {
    fn upsert_penalty_config(&self, config: &PenaltyConfig) -> RepositoryResult<PenaltyConfig> {
        use crate::schema::penalty_configs;

        let mut conn = self.conn()?;
        let row = DbNewPenaltyConfig::from(config);

        diesel::insert_into(penalty_configs::table)
            .values(&row)
            .on_conflict(penalty_configs::group_id)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;

        let stored = penalty_configs::table
            .filter(penalty_configs::group_id.eq(config.group_id.get()))
            .first::<DbPenaltyConfig>(&mut conn)?;

        Ok(stored.try_into()?)
    }
}

impl PenaltyReader for DieselRepository {
    fn get_penalty_by_id(&self, id: PenaltyId) -> RepositoryResult<Option<PenaltyRecord>> {
        use crate::schema::penalty_records;

        let mut conn = self.conn()?;

        let penalty = penalty_records::table
            .filter(penalty_records::id.eq(id.get()))
            .first::<DbPenaltyRecord>(&mut conn)
            .optional()?;

        let penalty = penalty.map(TryInto::try_into).transpose()?;
        Ok(penalty)
    }

    fn list_penalties(
        &self,
        query: PenaltyListQuery,
    ) -> RepositoryResult<(usize, Vec<PenaltyRecord>)> {
        use crate::schema::{penalty_records, slots};

        let mut conn = self.conn()?;

        let query_builder = || {
            let mut items = penalty_records::table
                .inner_join(slots::table)
                .into_boxed::<diesel::sqlite::Sqlite>();
            if let Some(group_id) = query.group_id {
                items = items.filter(slots::group_id.eq(group_id.get()));
            }
            if let Some(member_id) = query.member_id {
                items = items.filter(penalty_records::member_id.eq(member_id.get()));
            }
            if let Some(cycle_id) = query.cycle_id {
                items = items.filter(slots::cycle_id.eq(cycle_id.get()));
            }
            if let Some(paid) = query.paid {
                items = items.filter(penalty_records::paid.eq(paid));
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
                penalty_records::created_at.desc(),
                penalty_records::id.desc(),
            ))
            .select(DbPenaltyRecord::as_select())
            .load::<DbPenaltyRecord>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<PenaltyRecord>, _>>()?;

        Ok((total, items))
    }
}

impl PenaltyWriter for DieselRepository {
    fn create_penalties_if_absent(
        &self,
        penalties: &[NewPenaltyRecord],
    ) -> RepositoryResult<usize> {
        use crate::schema::penalty_records;

        if penalties.is_empty() {
            return Ok(0);
        }

        let mut conn = self.conn()?;
        let rows: Vec<DbNewPenaltyRecord> =
            penalties.iter().map(DbNewPenaltyRecord::from).collect();

        let created = conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let mut created = 0;
            for chunk in rows.chunks(PENALTY_INSERT_CHUNK) {
                created += diesel::insert_or_ignore_into(penalty_records::table)
                    .values(chunk)
                    .execute(conn)?;
            }
            Ok(created)
        })?;

        Ok(created)
    }

    fn mark_penalty_paid(&self, id: PenaltyId, paid_at: NaiveDateTime) -> RepositoryResult<usize> {
        use crate::schema::penalty_records;

        let mut conn = self.conn()?;

        let affected = diesel::update(
            penalty_records::table
                .filter(penalty_records::id.eq(id.get()))
                .filter(penalty_records::paid.eq(false)),
        )
        .set((
            penalty_records::paid.eq(true),
            penalty_records::paid_at.eq(Some(paid_at)),
        ))
        .execute(&mut conn)?;

        Ok(affected)
    }
}
