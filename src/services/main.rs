use serde::Serialize;

use crate::repository::{CategoryReader, KeyboardReader, ManufacturerReader};

/// Record counts shown on the catalog home page.
///
/// Each count is fetched independently: a failed count is `None` and
/// `error` holds the first failure message while the others still display.
#[derive(Debug, Default, Clone, PartialEq, Serialize)]
pub struct CatalogSummary {
    pub category_count: Option<usize>,
    pub manufacturer_count: Option<usize>,
    pub keyboard_count: Option<usize>,
    pub error: Option<String>,
}

pub fn show_index<R>(repo: &R) -> CatalogSummary
where
    R: CategoryReader + ManufacturerReader + KeyboardReader,
{
    let mut summary = CatalogSummary::default();
    let mut failed = |what: &str, e: &dyn std::fmt::Display| {
        log::error!("Failed to count {what}: {e}");
        summary
            .error
            .get_or_insert_with(|| format!("Failed to count {what}."));
    };

    let category_count = repo.count_categories().map_err(|e| failed("categories", &e)).ok();
    let manufacturer_count = repo
        .count_manufacturers()
        .map_err(|e| failed("manufacturers", &e))
        .ok();
    let keyboard_count = repo.count_keyboards().map_err(|e| failed("keyboards", &e)).ok();

    summary.category_count = category_count;
    summary.manufacturer_count = manufacturer_count;
    summary.keyboard_count = keyboard_count;
    summary
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::categories::CategoryForm;
    use crate::repository::test::TestRepository;
    use crate::services::categories::create_category;

    #[test]
    fn counts_every_entity() {
        let repo = TestRepository::new();
        create_category(
            CategoryForm {
                name: "Wired".into(),
                description: "d".into(),
            },
            &repo,
        )
        .unwrap();

        let summary = show_index(&repo);
        assert_eq!(
            summary,
            CatalogSummary {
                category_count: Some(1),
                manufacturer_count: Some(0),
                keyboard_count: Some(0),
                error: None,
            }
        );
    }

    #[test]
    fn failed_count_keeps_the_others() {
        let repo = TestRepository::failing(&["count_manufacturers"]);

        let summary = show_index(&repo);
        assert_eq!(summary.category_count, Some(0));
        assert_eq!(summary.manufacturer_count, None);
        assert_eq!(summary.keyboard_count, Some(0));
        assert_eq!(summary.error.as_deref(), Some("Failed to count manufacturers."));
    }
}
