use diesel::prelude::*;

use crate::domain::manufacturer::{Manufacturer, NewManufacturer};
use crate::domain::types::{Description, ManufacturerId, ManufacturerName};
use crate::models::manufacturer::{
    Manufacturer as DbManufacturer, NewManufacturer as DbNewManufacturer,
};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::keyboard::keyboards_by_manufacturer;
use crate::repository::{DieselRepository, GuardedDelete, ManufacturerReader, ManufacturerWriter};

impl ManufacturerReader for DieselRepository {
    fn list_manufacturers(&self) -> RepositoryResult<Vec<Manufacturer>> {
        use crate::schema::manufacturers;

        let mut conn = self.conn()?;

        let items = manufacturers::table
            .order(manufacturers::name.asc())
            .load::<DbManufacturer>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Manufacturer>, _>>()?;

        Ok(items)
    }

    fn get_manufacturer_by_id(
        &self,
        id: ManufacturerId,
    ) -> RepositoryResult<Option<Manufacturer>> {
        use crate::schema::manufacturers;

        let mut conn = self.conn()?;

        let manufacturer = manufacturers::table
            .filter(manufacturers::id.eq(id.get()))
            .first::<DbManufacturer>(&mut conn)
            .optional()?;

        let manufacturer = manufacturer.map(TryInto::try_into).transpose()?;
        Ok(manufacturer)
    }

    fn find_manufacturer_by_name(
        &self,
        name: &ManufacturerName,
    ) -> RepositoryResult<Option<Manufacturer>> {
        use crate::schema::manufacturers;

        let mut conn = self.conn()?;

        let manufacturer = manufacturers::table
            .filter(manufacturers::name.eq(name.as_str()))
            .order(manufacturers::id.asc())
            .first::<DbManufacturer>(&mut conn)
            .optional()?;

        let manufacturer = manufacturer.map(TryInto::try_into).transpose()?;
        Ok(manufacturer)
    }

    fn count_manufacturers(&self) -> RepositoryResult<usize> {
        use crate::schema::manufacturers;

        let mut conn = self.conn()?;
        let total = manufacturers::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl ManufacturerWriter for DieselRepository {
    fn create_manufacturer(
        &self,
        manufacturer: &NewManufacturer,
    ) -> RepositoryResult<ManufacturerId> {
        use crate::schema::manufacturers;

        let mut conn = self.conn()?;

        let id = diesel::insert_into(manufacturers::table)
            .values(DbNewManufacturer::from(manufacturer))
            .returning(manufacturers::id)
            .get_result::<i32>(&mut conn)?;

        Ok(ManufacturerId::new(id)?)
    }

    fn update_manufacturer(
        &self,
        id: ManufacturerId,
        name: &ManufacturerName,
        description: &Description,
    ) -> RepositoryResult<usize> {
        use crate::schema::manufacturers;

        let mut conn = self.conn()?;

        let affected =
            diesel::update(manufacturers::table.filter(manufacturers::id.eq(id.get())))
                .set((
                    manufacturers::name.eq(name.as_str()),
                    manufacturers::description.eq(description.as_str()),
                    manufacturers::updated_at.eq(diesel::dsl::now),
                ))
                .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_manufacturer(&self, id: ManufacturerId) -> RepositoryResult<GuardedDelete> {
        use crate::schema::manufacturers;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let found = manufacturers::table
                .filter(manufacturers::id.eq(id.get()))
                .select(manufacturers::id)
                .first::<i32>(conn)
                .optional()?;
            if found.is_none() {
                return Ok(GuardedDelete::Missing);
            }

            let referencing = keyboards_by_manufacturer(conn, id.get())?;
            if !referencing.is_empty() {
                return Ok(GuardedDelete::Referenced(referencing));
            }

            diesel::delete(manufacturers::table.filter(manufacturers::id.eq(id.get())))
                .execute(conn)?;
            Ok(GuardedDelete::Deleted)
        })
    }
}
