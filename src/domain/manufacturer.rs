use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{Description, ManufacturerId, ManufacturerName};

/// A keyboard manufacturer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manufacturer {
    pub id: ManufacturerId,
    pub name: ManufacturerName,
    pub description: Description,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Data required to insert a new [`Manufacturer`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewManufacturer {
    pub name: ManufacturerName,
    pub description: Description,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
