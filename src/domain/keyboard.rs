use std::collections::BTreeSet;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::category::Category;
use crate::domain::manufacturer::Manufacturer;
use crate::domain::types::{
    CategoryId, Description, KeyboardId, KeyboardName, KeyboardPrice, KeyboardStock,
    ManufacturerId,
};

/// A keyboard as stored: references to its manufacturer and categories are bare ids.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Keyboard {
    pub id: KeyboardId,
    pub name: KeyboardName,
    pub manufacturer_id: ManufacturerId,
    pub category_ids: BTreeSet<CategoryId>,
    pub description: Description,
    pub price: KeyboardPrice,
    pub stock: KeyboardStock,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// A keyboard with its manufacturer and categories resolved.
///
/// Categories are ordered by name.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyboardDetail {
    pub keyboard: Keyboard,
    pub manufacturer: Manufacturer,
    pub categories: Vec<Category>,
}

/// Data required to insert a new [`Keyboard`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewKeyboard {
    pub name: KeyboardName,
    pub manufacturer_id: ManufacturerId,
    pub category_ids: BTreeSet<CategoryId>,
    pub description: Description,
    pub price: KeyboardPrice,
    pub stock: KeyboardStock,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Replacement values applied by a keyboard update. The id and `created_at` are preserved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct KeyboardChanges {
    pub name: KeyboardName,
    pub manufacturer_id: ManufacturerId,
    pub category_ids: BTreeSet<CategoryId>,
    pub description: Description,
    pub price: KeyboardPrice,
    pub stock: KeyboardStock,
}
