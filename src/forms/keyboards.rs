use std::collections::BTreeSet;

use chrono::Utc;
use serde::Serialize;

use crate::domain::keyboard::{KeyboardChanges, KeyboardDetail, NewKeyboard};
use crate::domain::types::{
    CategoryId, Description, KeyboardName, KeyboardPrice, KeyboardStock, ManufacturerId,
    TypeConstraintError,
};
use crate::forms::InvalidForm;
use crate::forms::rules::{FieldRule, Rule, sanitize, validate_fields};

pub const KEYBOARD_RULES: &[FieldRule] = &[
    FieldRule::new("name", Rule::Required, "Name must not be empty."),
    FieldRule::new(
        "name",
        Rule::MaxLength(100),
        "Name must be at most 100 characters.",
    ),
    FieldRule::new(
        "manufacturer",
        Rule::Required,
        "Manufacturer must not be empty.",
    ),
    FieldRule::new("description", Rule::Required, "Description must not be empty."),
    FieldRule::new(
        "description",
        Rule::MaxLength(300),
        "Description must be at most 300 characters.",
    ),
    FieldRule::new("price", Rule::Required, "Price must not be empty."),
    FieldRule::new("price", Rule::Decimal, "Price must be a number."),
    FieldRule::new("price", Rule::NonNegative, "Price must not be negative."),
    FieldRule::new(
        "price",
        Rule::MaxDigits(9),
        "Price must have at most 9 digits.",
    ),
    FieldRule::new("stock", Rule::Required, "Stock must not be empty."),
    FieldRule::new("stock", Rule::Integer, "Stock must be a number."),
    FieldRule::new(
        "stock",
        Rule::MaxDigits(9),
        "Stock must have at most 9 digits.",
    ),
];

/// The `category` field as it arrived: a checkbox group posts the key once
/// per checked box, or not at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategorySelection {
    #[default]
    Absent,
    One(String),
    Many(Vec<String>),
}

impl CategorySelection {
    fn push(self, value: String) -> Self {
        match self {
            CategorySelection::Absent => CategorySelection::One(value),
            CategorySelection::One(first) => CategorySelection::Many(vec![first, value]),
            CategorySelection::Many(mut values) => {
                values.push(value);
                CategorySelection::Many(values)
            }
        }
    }

    /// Collapse the selection into a set of (escaped) identifiers.
    pub fn normalize(self) -> BTreeSet<String> {
        match self {
            CategorySelection::Absent => BTreeSet::new(),
            CategorySelection::One(value) => BTreeSet::from([sanitize(&value)]),
            CategorySelection::Many(values) => values.iter().map(|v| sanitize(v)).collect(),
        }
    }
}

/// Raw keyboard form.
///
/// Built from the urlencoded key/value pairs because `category` may repeat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyboardForm {
    pub name: String,
    pub manufacturer: String,
    pub category: CategorySelection,
    pub description: String,
    pub price: String,
    pub stock: String,
}

impl From<Vec<(String, String)>> for KeyboardForm {
    fn from(pairs: Vec<(String, String)>) -> Self {
        let mut form = KeyboardForm::default();
        for (key, value) in pairs {
            match key.as_str() {
                "name" => form.name = value,
                "manufacturer" => form.manufacturer = value,
                "description" => form.description = value,
                "price" => form.price = value,
                "stock" => form.stock = value,
                "category" => form.category = std::mem::take(&mut form.category).push(value),
                _ => {}
            }
        }
        form
    }
}

/// Sanitized keyboard values echoed back into the form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KeyboardDraft {
    pub name: String,
    pub manufacturer: String,
    pub category: BTreeSet<String>,
    pub description: String,
    pub price: String,
    pub stock: String,
}

impl From<&KeyboardDetail> for KeyboardDraft {
    fn from(detail: &KeyboardDetail) -> Self {
        let keyboard = &detail.keyboard;
        Self {
            name: keyboard.name.to_string(),
            manufacturer: keyboard.manufacturer_id.to_string(),
            category: keyboard
                .category_ids
                .iter()
                .map(ToString::to_string)
                .collect(),
            description: keyboard.description.to_string(),
            price: keyboard.price.to_string(),
            stock: keyboard.stock.to_string(),
        }
    }
}

/// Validated keyboard values. References are still unresolved text: the
/// service checks them against the store.
#[derive(Debug, Clone, PartialEq)]
pub struct KeyboardFormPayload {
    pub name: KeyboardName,
    pub description: Description,
    pub price: KeyboardPrice,
    pub stock: KeyboardStock,
    /// Kept for redisplay when a reference does not resolve.
    pub draft: KeyboardDraft,
}

impl KeyboardFormPayload {
    pub fn manufacturer(&self) -> &str {
        &self.draft.manufacturer
    }

    pub fn categories(&self) -> &BTreeSet<String> {
        &self.draft.category
    }

    pub fn into_new_keyboard(
        self,
        manufacturer_id: ManufacturerId,
        category_ids: BTreeSet<CategoryId>,
    ) -> NewKeyboard {
        let now = Utc::now().naive_utc();
        NewKeyboard {
            name: self.name,
            manufacturer_id,
            category_ids,
            description: self.description,
            price: self.price,
            stock: self.stock,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn into_changes(
        self,
        manufacturer_id: ManufacturerId,
        category_ids: BTreeSet<CategoryId>,
    ) -> KeyboardChanges {
        KeyboardChanges {
            name: self.name,
            manufacturer_id,
            category_ids,
            description: self.description,
            price: self.price,
            stock: self.stock,
        }
    }

    fn from_draft(draft: KeyboardDraft) -> Result<Self, (KeyboardDraft, TypeConstraintError)> {
        let parsed = (|| {
            let price = draft.price.parse::<f64>().map_err(|_| {
                TypeConstraintError::InvalidValue(format!("price: {}", draft.price))
            })?;
            let stock = draft.stock.parse::<i32>().map_err(|_| {
                TypeConstraintError::InvalidValue(format!("stock: {}", draft.stock))
            })?;
            Ok::<_, TypeConstraintError>((
                KeyboardName::new(draft.name.as_str())?,
                Description::new(draft.description.as_str())?,
                KeyboardPrice::new(price)?,
                KeyboardStock::new(stock)?,
            ))
        })();

        match parsed {
            Ok((name, description, price, stock)) => Ok(Self {
                name,
                description,
                price,
                stock,
                draft,
            }),
            Err(e) => Err((draft, e)),
        }
    }
}

impl TryFrom<KeyboardForm> for KeyboardFormPayload {
    type Error = InvalidForm<KeyboardDraft>;

    fn try_from(form: KeyboardForm) -> Result<Self, Self::Error> {
        let name = form.name.trim();
        let manufacturer = form.manufacturer.trim();
        let description = form.description.trim();
        let price = form.price.trim();
        let stock = form.stock.trim();

        let errors = validate_fields(
            KEYBOARD_RULES,
            &[
                ("name", name),
                ("manufacturer", manufacturer),
                ("description", description),
                ("price", price),
                ("stock", stock),
            ],
        );
        let draft = KeyboardDraft {
            name: sanitize(name),
            manufacturer: sanitize(manufacturer),
            category: form.category.normalize(),
            description: sanitize(description),
            price: sanitize(price),
            stock: sanitize(stock),
        };

        if !errors.is_empty() {
            return Err(InvalidForm::new(draft, errors));
        }

        Self::from_draft(draft).map_err(|(draft, e)| InvalidForm::new(draft, vec![e.to_string()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn valid_pairs() -> Vec<(String, String)> {
        pairs(&[
            ("name", "Logitech K350"),
            ("manufacturer", "1"),
            ("description", "Wave design"),
            ("price", "12.50"),
            ("stock", "5"),
        ])
    }

    #[test]
    fn single_category_becomes_one_element_set() {
        let mut input = valid_pairs();
        input.push(("category".into(), "c1".into()));

        let payload = KeyboardFormPayload::try_from(KeyboardForm::from(input)).unwrap();
        assert_eq!(payload.categories(), &BTreeSet::from(["c1".to_string()]));
        assert_eq!(payload.price.get(), 12.5);
        assert_eq!(payload.stock.get(), 5);
    }

    #[test]
    fn repeated_category_keys_collect_into_set() {
        let mut input = valid_pairs();
        input.push(("category".into(), "2".into()));
        input.push(("category".into(), "1".into()));
        input.push(("category".into(), "2".into()));

        let form = KeyboardForm::from(input);
        assert_eq!(
            form.category,
            CategorySelection::Many(vec!["2".into(), "1".into(), "2".into()])
        );
        let payload = KeyboardFormPayload::try_from(form).unwrap();
        assert_eq!(payload.categories().len(), 2);
    }

    #[test]
    fn absent_category_is_empty_set() {
        let payload = KeyboardFormPayload::try_from(KeyboardForm::from(valid_pairs())).unwrap();
        assert!(payload.categories().is_empty());
    }

    #[test]
    fn empty_name_reports_name_message() {
        let mut input = valid_pairs();
        input[0].1 = "   ".into();

        let err = KeyboardFormPayload::try_from(KeyboardForm::from(input)).unwrap_err();
        assert_eq!(err.errors, vec!["Name must not be empty."]);
        assert_eq!(err.draft.price, "12.50");
    }

    #[test]
    fn numeric_fields_collect_every_failure() {
        let input = pairs(&[
            ("name", "K"),
            ("manufacturer", ""),
            ("description", "d"),
            ("price", "-1.5x"),
            ("stock", "1.5"),
        ]);

        let err = KeyboardFormPayload::try_from(KeyboardForm::from(input)).unwrap_err();
        assert_eq!(
            err.errors,
            vec![
                "Manufacturer must not be empty.",
                "Price must be a number.",
                "Stock must be a number.",
            ]
        );
    }

    #[test]
    fn negative_price_and_signed_stock() {
        let mut input = valid_pairs();
        input[3].1 = "-3".into();
        input[4].1 = "-2".into();

        let err = KeyboardFormPayload::try_from(KeyboardForm::from(input)).unwrap_err();
        assert_eq!(err.errors, vec!["Price must not be negative."]);
    }

    #[test]
    fn empty_price_reports_only_emptiness() {
        let mut input = valid_pairs();
        input[3].1 = "".into();

        let err = KeyboardFormPayload::try_from(KeyboardForm::from(input)).unwrap_err();
        assert_eq!(err.errors, vec!["Price must not be empty."]);
    }
}
