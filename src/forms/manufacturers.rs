use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::manufacturer::{Manufacturer, NewManufacturer};
use crate::domain::types::{Description, ManufacturerName, TypeConstraintError};
use crate::forms::InvalidForm;
use crate::forms::rules::{FieldRule, Rule, sanitize, validate_fields};

pub const MANUFACTURER_RULES: &[FieldRule] = &[
    FieldRule::new("name", Rule::Required, "Name must not be empty."),
    FieldRule::new(
        "name",
        Rule::MaxLength(100),
        "Name must be at most 100 characters.",
    ),
    FieldRule::new("description", Rule::Required, "Description must not be empty."),
    FieldRule::new(
        "description",
        Rule::MaxLength(300),
        "Description must be at most 300 characters.",
    ),
];

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ManufacturerForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ManufacturerDraft {
    pub name: String,
    pub description: String,
}

impl From<&Manufacturer> for ManufacturerDraft {
    fn from(manufacturer: &Manufacturer) -> Self {
        Self {
            name: manufacturer.name.to_string(),
            description: manufacturer.description.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManufacturerFormPayload {
    pub name: ManufacturerName,
    pub description: Description,
}

impl ManufacturerFormPayload {
    pub fn into_new_manufacturer(self) -> NewManufacturer {
        let now = Utc::now().naive_utc();
        NewManufacturer {
            name: self.name,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }

    fn from_draft(draft: &ManufacturerDraft) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: ManufacturerName::new(draft.name.as_str())?,
            description: Description::new(draft.description.as_str())?,
        })
    }
}

impl TryFrom<ManufacturerForm> for ManufacturerFormPayload {
    type Error = InvalidForm<ManufacturerDraft>;

    fn try_from(form: ManufacturerForm) -> Result<Self, Self::Error> {
        let name = form.name.trim();
        let description = form.description.trim();

        let errors = validate_fields(
            MANUFACTURER_RULES,
            &[("name", name), ("description", description)],
        );
        let draft = ManufacturerDraft {
            name: sanitize(name),
            description: sanitize(description),
        };

        if !errors.is_empty() {
            return Err(InvalidForm::new(draft, errors));
        }

        Self::from_draft(&draft).map_err(|e| InvalidForm::new(draft, vec![e.to_string()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_overlong_name() {
        let form = ManufacturerForm {
            name: "D".repeat(101),
            description: "Computers".to_string(),
        };

        let err = ManufacturerFormPayload::try_from(form).unwrap_err();
        assert_eq!(err.errors, vec!["Name must be at most 100 characters."]);
    }
}
