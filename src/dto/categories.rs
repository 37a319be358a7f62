use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::category::Category;
use crate::domain::keyboard::Keyboard;
use crate::dto::keyboards::KeyboardSummaryDto;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryDto {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub url: String,
}

impl From<Category> for CategoryDto {
    fn from(value: Category) -> Self {
        Self {
            id: value.id.get(),
            url: format!("/catalog/category/{}", value.id),
            name: value.name.into_inner(),
            description: value.description.into_inner(),
        }
    }
}

/// A category checkbox on the keyboard form.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryOptionDto {
    pub id: i32,
    pub name: String,
    pub checked: bool,
}

impl CategoryOptionDto {
    /// `selected` holds identifiers as submitted, so the comparison is textual.
    pub fn new(category: Category, selected: &BTreeSet<String>) -> Self {
        Self {
            id: category.id.get(),
            checked: selected.contains(&category.id.to_string()),
            name: category.name.into_inner(),
        }
    }
}

/// A category together with the keyboards referencing it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryPageDto {
    pub category: CategoryDto,
    pub keyboards: Vec<KeyboardSummaryDto>,
}

impl CategoryPageDto {
    pub fn new(category: Category, keyboards: Vec<Keyboard>) -> Self {
        Self {
            category: category.into(),
            keyboards: keyboards.into_iter().map(KeyboardSummaryDto::from).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::*;
    use crate::domain::types::{CategoryId, CategoryName, Description};

    #[test]
    fn option_is_checked_by_textual_id() {
        let epoch = DateTime::from_timestamp(0, 0).unwrap().naive_utc();
        let category = Category {
            id: CategoryId::new(12).unwrap(),
            name: CategoryName::new("Wired").unwrap(),
            description: Description::new("Cable").unwrap(),
            created_at: epoch,
            updated_at: epoch,
        };

        let checked = CategoryOptionDto::new(category.clone(), &BTreeSet::from(["12".to_string()]));
        let unchecked = CategoryOptionDto::new(category, &BTreeSet::from(["1".to_string()]));

        assert_eq!(
            serde_json::to_value(&checked).unwrap(),
            serde_json::json!({"id": 12, "name": "Wired", "checked": true})
        );
        assert!(!unchecked.checked);
    }
}
