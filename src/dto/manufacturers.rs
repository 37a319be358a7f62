use serde::Serialize;

use crate::domain::keyboard::Keyboard;
use crate::domain::manufacturer::Manufacturer;
use crate::dto::keyboards::KeyboardSummaryDto;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManufacturerDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub url: String,
}

impl From<Manufacturer> for ManufacturerDto {
    fn from(value: Manufacturer) -> Self {
        Self {
            id: value.id.get(),
            url: format!("/catalog/manufacturer/{}", value.id),
            name: value.name.into_inner(),
            description: value.description.into_inner(),
        }
    }
}

/// A manufacturer together with the keyboards referencing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ManufacturerPageDto {
    pub manufacturer: ManufacturerDto,
    pub keyboards: Vec<KeyboardSummaryDto>,
}

impl ManufacturerPageDto {
    pub fn new(manufacturer: Manufacturer, keyboards: Vec<Keyboard>) -> Self {
        Self {
            manufacturer: manufacturer.into(),
            keyboards: keyboards.into_iter().map(KeyboardSummaryDto::from).collect(),
        }
    }
}
