use serde::Serialize;

use crate::domain::keyboard::{Keyboard, KeyboardDetail};
use crate::dto::categories::{CategoryDto, CategoryOptionDto};
use crate::dto::manufacturers::ManufacturerDto;

/// A keyboard without resolved references, as listed on category,
/// manufacturer and delete pages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyboardSummaryDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub url: String,
}

impl From<Keyboard> for KeyboardSummaryDto {
    fn from(value: Keyboard) -> Self {
        Self {
            id: value.id.get(),
            url: format!("/catalog/keyboard/{}", value.id),
            name: value.name.into_inner(),
            description: value.description.into_inner(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyboardDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    /// Formatted with two decimals.
    pub price: String,
    pub stock: i32,
    pub url: String,
    pub manufacturer: ManufacturerDto,
    pub categories: Vec<CategoryDto>,
}

impl From<KeyboardDetail> for KeyboardDto {
    fn from(value: KeyboardDetail) -> Self {
        let keyboard = value.keyboard;
        Self {
            id: keyboard.id.get(),
            url: format!("/catalog/keyboard/{}", keyboard.id),
            price: keyboard.price.to_string(),
            stock: keyboard.stock.get(),
            name: keyboard.name.into_inner(),
            description: keyboard.description.into_inner(),
            manufacturer: value.manufacturer.into(),
            categories: value.categories.into_iter().map(CategoryDto::from).collect(),
        }
    }
}

/// Choices offered by the keyboard form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyboardFormOptionsDto {
    pub manufacturers: Vec<ManufacturerDto>,
    pub categories: Vec<CategoryOptionDto>,
}
