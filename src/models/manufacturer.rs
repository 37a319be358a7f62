use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::manufacturer::{
    Manufacturer as DomainManufacturer, NewManufacturer as DomainNewManufacturer,
};
use crate::domain::types::{Description, ManufacturerName, TypeConstraintError};

/// Diesel model representing the `manufacturers` table.
#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::manufacturers)]
pub struct Manufacturer {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = crate::schema::manufacturers)]
pub struct NewManufacturer<'a> {
    pub name: &'a str,
    pub description: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl TryFrom<Manufacturer> for DomainManufacturer {
    type Error = TypeConstraintError;

    fn try_from(manufacturer: Manufacturer) -> Result<Self, Self::Error> {
        Ok(Self {
            id: manufacturer.id.try_into()?,
            name: ManufacturerName::new(manufacturer.name)?,
            description: Description::new(manufacturer.description)?,
            created_at: manufacturer.created_at,
            updated_at: manufacturer.updated_at,
        })
    }
}

impl<'a> From<&'a DomainNewManufacturer> for NewManufacturer<'a> {
    fn from(manufacturer: &'a DomainNewManufacturer) -> Self {
        Self {
            name: manufacturer.name.as_str(),
            description: manufacturer.description.as_str(),
            created_at: manufacturer.created_at,
            updated_at: manufacturer.updated_at,
        }
    }
}
