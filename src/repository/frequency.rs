use diesel::prelude::*;

use crate::domain::frequency::{FrequencyCategory, NewFrequencyCategory};
use crate::domain::types::CategoryId;
use crate::models::frequency::{
    FrequencyCategory as DbFrequencyCategory, NewFrequencyCategory as DbNewFrequencyCategory,
};
use crate::repository::{
    DieselRepository, FrequencyCategoryReader, FrequencyCategoryWriter, RepositoryResult,
};

impl FrequencyCategoryReader for DieselRepository {
    fn list_frequency_categories(&self) -> RepositoryResult<Vec<FrequencyCategory>> {
        use crate::schema::frequency_categories;

        let mut conn = self.conn()?;

        let items = frequency_categories::table
            .order(frequency_categories::id.asc())
            .load::<DbFrequencyCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<FrequencyCategory>, _>>()?;

        Ok(items)
    }

    fn get_frequency_category_by_id(
        &self,
        id: CategoryId,
    ) -> RepositoryResult<Option<FrequencyCategory>> {
        use crate::schema::frequency_categories;

        let mut conn = self.conn()?;

        let category = frequency_categories::table
            .filter(frequency_categories::id.eq(id.get()))
            .first::<DbFrequencyCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn frequency_category_in_use(&self, id: CategoryId) -> RepositoryResult<bool> {
        use crate::schema::schedules;

        let mut conn = self.conn()?;

        let in_use = diesel::select(diesel::dsl::exists(
            schedules::table.filter(schedules::category_id.eq(id.get())),
        ))
        .get_result::<bool>(&mut conn)?;

        Ok(in_use)
    }
}

impl FrequencyCategoryWriter for DieselRepository {
    fn create_frequency_category(
        &self,
        category: &NewFrequencyCategory,
    ) -> RepositoryResult<FrequencyCategory> {
        use crate::schema::frequency_categories;

        let mut conn = self.conn()?;
        let db_category: DbNewFrequencyCategory = category.clone().into();

        let created = diesel::insert_into(frequency_categories::table)
            .values(db_category)
            .get_result::<DbFrequencyCategory>(&mut conn)?;

        Ok(created.try_into()?)
    }

    fn delete_frequency_category(&self, id: CategoryId) -> RepositoryResult<usize> {
        use crate::schema::frequency_categories;

        let mut conn = self.conn()?;

        let affected = diesel::delete(
            frequency_categories::table.filter(frequency_categories::id.eq(id.get())),
        )
        .execute(&mut conn)?;

        Ok(affected)
    }
}
