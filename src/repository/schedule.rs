use diesel::prelude::*;

use crate::domain::schedule::{NewSchedule, Schedule, ScheduleDefinition, ScheduleEntry};
use crate::domain::types::{FrequencyKind, GroupId};
use crate::models::schedule::{
    NewSchedule as DbNewSchedule, NewScheduleEntry as DbNewScheduleEntry, Schedule as DbSchedule,
    ScheduleEntry as DbScheduleEntry,
};
use crate::repository::{
    DieselRepository, RepositoryError, RepositoryResult, ScheduleReader, ScheduleWriter,
};

impl ScheduleReader for DieselRepository {
    fn get_schedule(&self, group_id: GroupId) -> RepositoryResult<Option<Schedule>> {
        use crate::schema::{frequency_categories, schedule_entries, schedules};

        let mut conn = self.conn()?;

        let row = schedules::table
            .inner_join(frequency_categories::table)
            .filter(schedules::group_id.eq(group_id.get()))
            .select((DbSchedule::as_select(), frequency_categories::name))
            .first::<(DbSchedule, String)>(&mut conn)
            .optional()?;

        let Some((schedule, category_name)) = row else {
            return Ok(None);
        };

        let entries = schedule_entries::table
            .filter(schedule_entries::schedule_id.eq(schedule.id))
            .order(schedule_entries::id.asc())
            .load::<DbScheduleEntry>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<ScheduleEntry>, _>>()?;

        let kind = FrequencyKind::try_from(category_name)?;
        let definition = ScheduleDefinition::from_entries(kind, &entries)?;

        Ok(Some(Schedule {
            group_id: schedule.group_id.try_into()?,
            category_id: schedule.category_id.try_into()?,
            definition,
            updated_at: schedule.updated_at,
        }))
    }
}

impl ScheduleWriter for DieselRepository {
    fn replace_schedule(&self, schedule: &NewSchedule) -> RepositoryResult<Schedule> {
        use crate::schema::{schedule_entries, schedules};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let previous = schedules::table
                .filter(schedules::group_id.eq(schedule.group_id.get()))
                .select(schedules::id);

            diesel::delete(
                schedule_entries::table.filter(schedule_entries::schedule_id.eq_any(previous)),
            )
            .execute(conn)?;
            diesel::delete(
                schedules::table.filter(schedules::group_id.eq(schedule.group_id.get())),
            )
            .execute(conn)?;

            let created = diesel::insert_into(schedules::table)
                .values(DbNewSchedule {
                    group_id: schedule.group_id.get(),
                    category_id: schedule.category_id.get(),
                    updated_at: schedule.updated_at,
                })
                .get_result::<DbSchedule>(conn)?;

            let entries: Vec<DbNewScheduleEntry> = schedule
                .definition
                .entries()
                .iter()
                .map(|entry| DbNewScheduleEntry::for_schedule(created.id, entry))
                .collect();

            diesel::insert_into(schedule_entries::table)
                .values(&entries)
                .execute(conn)?;

            Ok(())
        })?;

        Ok(Schedule {
            group_id: schedule.group_id,
            category_id: schedule.category_id,
            definition: schedule.definition.clone(),
            updated_at: schedule.updated_at,
        })
    }
}
