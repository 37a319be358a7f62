use diesel::prelude::*;

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryId, CategoryName, Description};
use crate::models::category::{Category as DbCategory, NewCategory as DbNewCategory};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::keyboard::keyboards_in_category;
use crate::repository::{CategoryReader, CategoryWriter, DieselRepository, GuardedDelete};

impl CategoryReader for DieselRepository {
    fn list_categories(&self) -> RepositoryResult<Vec<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let items = categories::table
            .order(categories::name.asc())
            .load::<DbCategory>(&mut conn)?
            .into_iter()
            .map(TryInto::try_into)
            .collect::<Result<Vec<Category>, _>>()?;

        Ok(items)
    }

    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::id.eq(id.get()))
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn find_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let category = categories::table
            .filter(categories::name.eq(name.as_str()))
            .order(categories::id.asc())
            .first::<DbCategory>(&mut conn)
            .optional()?;

        let category = category.map(TryInto::try_into).transpose()?;
        Ok(category)
    }

    fn count_categories(&self) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;
        let total = categories::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl CategoryWriter for DieselRepository {
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<CategoryId> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let id = diesel::insert_into(categories::table)
            .values(DbNewCategory::from(category))
            .returning(categories::id)
            .get_result::<i32>(&mut conn)?;

        Ok(CategoryId::new(id)?)
    }

    fn update_category(
        &self,
        id: CategoryId,
        name: &CategoryName,
        description: &Description,
    ) -> RepositoryResult<usize> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        let affected = diesel::update(categories::table.filter(categories::id.eq(id.get())))
            .set((
                categories::name.eq(name.as_str()),
                categories::description.eq(description.as_str()),
                categories::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)?;

        Ok(affected)
    }

    fn delete_category(&self, id: CategoryId) -> RepositoryResult<GuardedDelete> {
        use crate::schema::categories;

        let mut conn = self.conn()?;

        // IMMEDIATE takes the write lock up front so no keyboard can gain a
        // link to this category between the check and the delete.
        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let found = categories::table
                .filter(categories::id.eq(id.get()))
                .select(categories::id)
                .first::<i32>(conn)
                .optional()?;
            if found.is_none() {
                return Ok(GuardedDelete::Missing);
            }

            let referencing = keyboards_in_category(conn, id.get())?;
            if !referencing.is_empty() {
                return Ok(GuardedDelete::Referenced(referencing));
            }

            diesel::delete(categories::table.filter(categories::id.eq(id.get()))).execute(conn)?;
            Ok(GuardedDelete::Deleted)
        })
    }
}
