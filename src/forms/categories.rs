use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, NewCategory};
use crate::domain::types::{CategoryName, Description, TypeConstraintError};
use crate::forms::InvalidForm;
use crate::forms::rules::{FieldRule, Rule, sanitize, validate_fields};

pub const CATEGORY_RULES: &[FieldRule] = &[
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

/// Raw category form as posted by the browser. Missing fields decode as empty.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Sanitized category values echoed back into the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CategoryDraft {
    pub name: String,
    pub description: String,
}

impl From<&Category> for CategoryDraft {
    fn from(category: &Category) -> Self {
        Self {
            name: category.name.to_string(),
            description: category.description.to_string(),
        }
    }
}

/// Validated category values shared by create and update.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryFormPayload {
    pub name: CategoryName,
    pub description: Description,
}

impl CategoryFormPayload {
    pub fn into_new_category(self) -> NewCategory {
        let now = Utc::now().naive_utc();
        NewCategory {
            name: self.name,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }

    fn from_draft(draft: &CategoryDraft) -> Result<Self, TypeConstraintError> {
        Ok(Self {
            name: CategoryName::new(draft.name.as_str())?,
            description: Description::new(draft.description.as_str())?,
        })
    }
}

impl TryFrom<CategoryForm> for CategoryFormPayload {
    type Error = InvalidForm<CategoryDraft>;

    fn try_from(form: CategoryForm) -> Result<Self, Self::Error> {
        let name = form.name.trim();
        let description = form.description.trim();

        let errors = validate_fields(
            CATEGORY_RULES,
            &[("name", name), ("description", description)],
        );
        let draft = CategoryDraft {
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
    fn trims_and_escapes_valid_form() {
        let form = CategoryForm {
            name: "  Wireless ".to_string(),
            description: "RF & Bluetooth".to_string(),
        };

        let payload: CategoryFormPayload = form.try_into().unwrap();
        assert_eq!(payload.name.as_str(), "Wireless");
        assert_eq!(payload.description.as_str(), "RF &amp; Bluetooth");
    }

    #[test]
    fn collects_every_failure() {
        let form = CategoryForm {
            name: "   ".to_string(),
            description: "x".repeat(301),
        };

        let err = CategoryFormPayload::try_from(form).unwrap_err();
        assert_eq!(
            err.errors,
            vec![
                "Name must not be empty.",
                "Description must be at most 300 characters."
            ]
        );
        assert_eq!(err.draft.name, "");
    }

    #[test]
    fn length_is_measured_before_escaping() {
        let form = CategoryForm {
            name: "&".repeat(100),
            description: "ok".to_string(),
        };

        assert!(CategoryFormPayload::try_from(form).is_ok());
    }
}
