use std::collections::{BTreeSet, HashMap};

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;

use crate::domain::category::Category;
use crate::domain::keyboard::{Keyboard, KeyboardChanges, KeyboardDetail, NewKeyboard};
use crate::domain::types::{CategoryId, KeyboardId, KeyboardName, ManufacturerId};
use crate::models::category::Category as DbCategory;
use crate::models::keyboard::{
    Keyboard as DbKeyboard, KeyboardCategory, NewKeyboard as DbNewKeyboard,
};
use crate::models::manufacturer::Manufacturer as DbManufacturer;
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{DieselRepository, KeyboardReader, KeyboardWriter};

/// Load the category links for `rows` and build domain keyboards.
fn attach_category_ids(
    conn: &mut SqliteConnection,
    rows: Vec<DbKeyboard>,
) -> RepositoryResult<Vec<Keyboard>> {
    use crate::schema::keyboard_categories;

    let ids = rows.iter().map(|row| row.id).collect::<Vec<i32>>();
    let links = keyboard_categories::table
        .filter(keyboard_categories::keyboard_id.eq_any(ids))
        .load::<KeyboardCategory>(conn)?;

    let mut by_keyboard: HashMap<i32, Vec<i32>> = HashMap::new();
    for link in links {
        by_keyboard
            .entry(link.keyboard_id)
            .or_default()
            .push(link.category_id);
    }

    rows.into_iter()
        .map(|row| {
            let category_ids = by_keyboard.remove(&row.id).unwrap_or_default();
            row.into_domain(&category_ids).map_err(RepositoryError::from)
        })
        .collect()
}

/// Resolve the categories of each `(keyboard, manufacturer)` row.
fn attach_details(
    conn: &mut SqliteConnection,
    rows: Vec<(DbKeyboard, DbManufacturer)>,
) -> RepositoryResult<Vec<KeyboardDetail>> {
    use crate::schema::{categories, keyboard_categories};

    let ids = rows.iter().map(|(row, _)| row.id).collect::<Vec<i32>>();
    let links = keyboard_categories::table
        .inner_join(categories::table)
        .filter(keyboard_categories::keyboard_id.eq_any(ids))
        .order(categories::name.asc())
        .select((keyboard_categories::keyboard_id, categories::all_columns))
        .load::<(i32, DbCategory)>(conn)?;

    let mut by_keyboard: HashMap<i32, Vec<DbCategory>> = HashMap::new();
    for (keyboard_id, category) in links {
        by_keyboard.entry(keyboard_id).or_default().push(category);
    }

    rows.into_iter()
        .map(|(keyboard, manufacturer)| -> RepositoryResult<KeyboardDetail> {
            let categories = by_keyboard.remove(&keyboard.id).unwrap_or_default();
            let category_ids = categories.iter().map(|c| c.id).collect::<Vec<i32>>();

            Ok(KeyboardDetail {
                keyboard: keyboard.into_domain(&category_ids)?,
                manufacturer: manufacturer.try_into()?,
                categories: categories
                    .into_iter()
                    .map(TryInto::try_into)
                    .collect::<Result<Vec<Category>, _>>()?,
            })
        })
        .collect()
}

/// Keyboards linked to the category, ordered by name.
pub(crate) fn keyboards_in_category(
    conn: &mut SqliteConnection,
    category_id: i32,
) -> RepositoryResult<Vec<Keyboard>> {
    use crate::schema::{keyboard_categories, keyboards};

    let rows = keyboards::table
        .filter(
            keyboards::id.eq_any(
                keyboard_categories::table
                    .filter(keyboard_categories::category_id.eq(category_id))
                    .select(keyboard_categories::keyboard_id),
            ),
        )
        .order(keyboards::name.asc())
        .load::<DbKeyboard>(conn)?;

    attach_category_ids(conn, rows)
}

/// Keyboards made by the manufacturer, ordered by name.
pub(crate) fn keyboards_by_manufacturer(
    conn: &mut SqliteConnection,
    manufacturer_id: i32,
) -> RepositoryResult<Vec<Keyboard>> {
    use crate::schema::keyboards;

    let rows = keyboards::table
        .filter(keyboards::manufacturer_id.eq(manufacturer_id))
        .order(keyboards::name.asc())
        .load::<DbKeyboard>(conn)?;

    attach_category_ids(conn, rows)
}

fn replace_category_links(
    conn: &mut SqliteConnection,
    keyboard_id: i32,
    category_ids: &BTreeSet<CategoryId>,
) -> QueryResult<()> {
    use crate::schema::keyboard_categories;

    diesel::delete(
        keyboard_categories::table.filter(keyboard_categories::keyboard_id.eq(keyboard_id)),
    )
    .execute(conn)?;

    let links = category_ids
        .iter()
        .map(|category_id| KeyboardCategory {
            keyboard_id,
            category_id: category_id.get(),
        })
        .collect::<Vec<_>>();

    if !links.is_empty() {
        diesel::insert_into(keyboard_categories::table)
            .values(&links)
            .execute(conn)?;
    }

    Ok(())
}

impl KeyboardReader for DieselRepository {
    fn list_keyboards(&self) -> RepositoryResult<Vec<KeyboardDetail>> {
        use crate::schema::{keyboards, manufacturers};

        let mut conn = self.conn()?;

        let rows = keyboards::table
            .inner_join(manufacturers::table)
            .order(keyboards::name.asc())
            .select((keyboards::all_columns, manufacturers::all_columns))
            .load::<(DbKeyboard, DbManufacturer)>(&mut conn)?;

        attach_details(&mut conn, rows)
    }

    fn get_keyboard_by_id(&self, id: KeyboardId) -> RepositoryResult<Option<KeyboardDetail>> {
        use crate::schema::{keyboards, manufacturers};

        let mut conn = self.conn()?;

        let row = keyboards::table
            .inner_join(manufacturers::table)
            .filter(keyboards::id.eq(id.get()))
            .select((keyboards::all_columns, manufacturers::all_columns))
            .first::<(DbKeyboard, DbManufacturer)>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(attach_details(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn find_keyboard_by_name(&self, name: &KeyboardName) -> RepositoryResult<Option<Keyboard>> {
        use crate::schema::keyboards;

        let mut conn = self.conn()?;

        let row = keyboards::table
            .filter(keyboards::name.eq(name.as_str()))
            .order(keyboards::id.asc())
            .first::<DbKeyboard>(&mut conn)
            .optional()?;

        match row {
            Some(row) => Ok(attach_category_ids(&mut conn, vec![row])?.pop()),
            None => Ok(None),
        }
    }

    fn list_keyboards_by_category(&self, id: CategoryId) -> RepositoryResult<Vec<Keyboard>> {
        let mut conn = self.conn()?;
        keyboards_in_category(&mut conn, id.get())
    }

    fn list_keyboards_by_manufacturer(
        &self,
        id: ManufacturerId,
    ) -> RepositoryResult<Vec<Keyboard>> {
        let mut conn = self.conn()?;
        keyboards_by_manufacturer(&mut conn, id.get())
    }

    fn count_keyboards(&self) -> RepositoryResult<usize> {
        use crate::schema::keyboards;

        let mut conn = self.conn()?;
        let total = keyboards::table.count().get_result::<i64>(&mut conn)?;
        Ok(total as usize)
    }
}

impl KeyboardWriter for DieselRepository {
    fn create_keyboard(&self, keyboard: &NewKeyboard) -> RepositoryResult<KeyboardId> {
        use crate::schema::keyboards;

        let mut conn = self.conn()?;

        let id = conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let id = diesel::insert_into(keyboards::table)
                .values(DbNewKeyboard::from(keyboard))
                .returning(keyboards::id)
                .get_result::<i32>(conn)?;
            replace_category_links(conn, id, &keyboard.category_ids)?;
            Ok(id)
        })?;

        Ok(KeyboardId::new(id)?)
    }

    fn update_keyboard(
        &self,
        id: KeyboardId,
        changes: &KeyboardChanges,
    ) -> RepositoryResult<usize> {
        use crate::schema::keyboards;

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            let affected = diesel::update(keyboards::table.filter(keyboards::id.eq(id.get())))
                .set((
                    keyboards::name.eq(changes.name.as_str()),
                    keyboards::manufacturer_id.eq(changes.manufacturer_id.get()),
                    keyboards::description.eq(changes.description.as_str()),
                    keyboards::price.eq(changes.price.get()),
                    keyboards::stock.eq(changes.stock.get()),
                    keyboards::updated_at.eq(diesel::dsl::now),
                ))
                .execute(conn)?;

            if affected > 0 {
                replace_category_links(conn, id.get(), &changes.category_ids)?;
            }
            Ok(affected)
        })
    }

    fn delete_keyboard(&self, id: KeyboardId) -> RepositoryResult<usize> {
        use crate::schema::{keyboard_categories, keyboards};

        let mut conn = self.conn()?;

        conn.immediate_transaction::<_, RepositoryError, _>(|conn| {
            diesel::delete(
                keyboard_categories::table.filter(keyboard_categories::keyboard_id.eq(id.get())),
            )
            .execute(conn)?;

            let affected = diesel::delete(keyboards::table.filter(keyboards::id.eq(id.get())))
                .execute(conn)?;
            Ok(affected)
        })
    }
}
