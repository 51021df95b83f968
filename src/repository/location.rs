use diesel::prelude::*;

use crate::domain::location::{Location, NewLocation};
use crate::domain::types::LocationId;
use crate::models::location::{Location as DbLocation, NewLocation as DbNewLocation};
use crate::repository::{DieselRepository, LocationReader, LocationWriter, RepositoryResult};

impl LocationReader for DieselRepository {
    fn get_location_by_id(&self, id: LocationId) -> RepositoryResult<Option<Location>> {
        use crate::schema::locations;

        let mut conn = self.conn()?;

        let location = locations::table
            .filter(locations::id.eq(id.get()))
            .first::<DbLocation>(&mut conn)
            .optional()?;

        let location = location.map(TryInto::try_into).transpose()?;
        Ok(location)
    }

    fn list_locations(&self, parent: Option<LocationId>) -> RepositoryResult<Vec<Location>> {
        use crate::schema::locations;

        let mut conn = self.conn()?;

        let mut query = locations::table.into_boxed::<diesel::sqlite::Sqlite>();
        query = match parent {
            Some(parent) => query.filter(locations::parent_id.eq(parent.get())),
            None => query.filter(locations::parent_id.is_null()),
        };

        let items = query
            .order(locations::name.asc())
            .load::<DbLocation>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Location>, _>>()?;

        Ok(items)
    }
}

impl LocationWriter for DieselRepository {
    fn create_location(&self, location: &NewLocation) -> RepositoryResult<Location> {
        use crate::schema::locations;

        let mut conn = self.conn()?;
        let db_location: DbNewLocation = location.clone().into();

        let created = diesel::insert_into(locations::table)
            .values(db_location)
            .get_result::<DbLocation>(&mut conn)?;

        Ok(created.try_into()?)
    }
}
