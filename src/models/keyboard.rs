use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::keyboard::{Keyboard as DomainKeyboard, NewKeyboard as DomainNewKeyboard};
use crate::domain::types::{
    CategoryId, Description, KeyboardName, KeyboardPrice, KeyboardStock, TypeConstraintError,
};

/// Diesel model representing the `keyboards` table.
///
/// Category membership lives in `keyboard_categories` and is loaded separately.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::keyboards)]
pub struct Keyboard {
    pub id: i32,
    pub name: String,
    pub manufacturer_id: i32,
    pub description: String,
    pub price: f64,
    pub stock: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::keyboards)]
pub struct NewKeyboard<'a> {
    pub name: &'a str,
    pub manufacturer_id: i32,
    pub description: &'a str,
    pub price: f64,
    pub stock: i32,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Row of the `keyboard_categories` join table.
#[derive(Debug, Clone, Copy, Insertable, Queryable)]
#[diesel(table_name = crate::schema::keyboard_categories)]
pub struct KeyboardCategory {
    pub keyboard_id: i32,
    pub category_id: i32,
}

impl Keyboard {
    /// Combine the row with its category links into a domain keyboard.
    pub fn into_domain(self, category_ids: &[i32]) -> Result<DomainKeyboard, TypeConstraintError> {
        let category_ids = category_ids
            .iter()
            .map(|id| CategoryId::new(*id))
            .collect::<Result<BTreeSet<_>, _>>()?;

        Ok(DomainKeyboard {
            id: self.id.try_into()?,
            name: KeyboardName::new(self.name)?,
            manufacturer_id: self.manufacturer_id.try_into()?,
            category_ids,
            description: Description::new(self.description)?,
            price: KeyboardPrice::new(self.price)?,
            stock: KeyboardStock::new(self.stock)?,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewKeyboard> for NewKeyboard<'a> {
    fn from(keyboard: &'a DomainNewKeyboard) -> Self {
        Self {
            name: keyboard.name.as_str(),
            manufacturer_id: keyboard.manufacturer_id.get(),
            description: keyboard.description.as_str(),
            price: keyboard.price.get(),
            stock: keyboard.stock.get(),
            created_at: keyboard.created_at,
            updated_at: keyboard.updated_at,
        }
    }
}
