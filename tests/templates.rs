use std::collections::BTreeSet;

use kbstore_catalog::dto::categories::{CategoryDto, CategoryOptionDto};
use kbstore_catalog::dto::keyboards::KeyboardDto;
use kbstore_catalog::dto::manufacturers::ManufacturerDto;
use kbstore_catalog::forms::keyboards::KeyboardDraft;
use kbstore_catalog::services::main::CatalogSummary;
use tera::{Context, Tera};

fn tera() -> Tera {
    Tera::new("templates/**/*").expect("templates should parse")
}

fn base(title: &str, current_page: &str) -> Context {
    let alerts: Vec<(&str, &str)> = vec![("Category deleted.", "success")];
    let mut context = Context::new();
    context.insert("alerts", &alerts);
    context.insert("current_page", current_page);
    context.insert("title", title);
    context
}

fn logitech() -> ManufacturerDto {
    ManufacturerDto {
        id: 1,
        name: "Logitech".into(),
        description: "Swiss".into(),
        url: "/catalog/manufacturer/1".into(),
    }
}

#[test]
fn index_shows_unavailable_counts() {
    let mut context = base("KBStore Catalog", "index");
    context.insert(
        "summary",
        &CatalogSummary {
            category_count: Some(4),
            manufacturer_count: None,
            keyboard_count: Some(0),
            error: Some("Failed to count manufacturers.".into()),
        },
    );

    let html = tera()
        .render("main/index.html", &context)
        .expect("index should render");
    assert!(html.contains("<strong>Categories:</strong> 4"));
    assert!(html.contains("<strong>Manufacturers:</strong> n/a"));
    assert!(html.contains("<strong>Keyboards:</strong> 0"));
    assert!(html.contains("Failed to count manufacturers."));
    assert!(html.contains("Category deleted."));
}

#[test]
fn stored_text_is_not_escaped_twice() {
    let mut context = base("List of categories", "categories");
    context.insert(
        "categories",
        &vec![CategoryDto {
            id: 2,
            name: "Tom &amp; Jerry".into(),
            description: "d".into(),
            url: "/catalog/category/2".into(),
        }],
    );

    let html = tera()
        .render("categories/list.html", &context)
        .expect("list should render");
    assert!(html.contains(r#"<a href="/catalog/category/2">Tom &amp; Jerry</a>"#));
}

#[test]
fn keyboard_form_marks_selection_and_errors() {
    let draft = KeyboardDraft {
        name: "MX Keys".into(),
        manufacturer: "1".into(),
        category: BTreeSet::from(["3".to_string()]),
        description: "".into(),
        price: "49.90".into(),
        stock: "12".into(),
    };
    let options = vec![
        CategoryOptionDto {
            id: 3,
            name: "Wired".into(),
            checked: true,
        },
        CategoryOptionDto {
            id: 4,
            name: "Wireless".into(),
            checked: false,
        },
    ];
    let errors = vec!["Description must not be empty.".to_string()];

    let mut context = base("Create keyboard", "keyboards");
    context.insert("keyboard", &draft);
    context.insert("manufacturers", &vec![logitech()]);
    context.insert("categories", &options);
    context.insert("errors", &errors);

    let html = tera()
        .render("keyboards/form.html", &context)
        .expect("form should render");
    assert!(html.contains(r#"<option value="1" selected>Logitech</option>"#));
    assert!(html.contains(r#"value="3" checked>"#));
    assert!(!html.contains(r#"value="4" checked>"#));
    assert!(html.contains("<li>Description must not be empty.</li>"));
    assert!(html.contains(r#"value="49.90""#));
}

#[test]
fn keyboard_detail_lists_categories() {
    let keyboard = KeyboardDto {
        id: 7,
        name: "Logitech K350".into(),
        description: "Wave design".into(),
        price: "27.99".into(),
        stock: 9,
        url: "/catalog/keyboard/7".into(),
        manufacturer: logitech(),
        categories: vec![CategoryDto {
            id: 3,
            name: "Membrane".into(),
            description: "d".into(),
            url: "/catalog/category/3".into(),
        }],
    };

    let mut context = base("Keyboard detail", "keyboards");
    context.insert("keyboard", &keyboard);

    let html = tera()
        .render("keyboards/detail.html", &context)
        .expect("detail should render");
    assert!(html.contains("$27.99"));
    assert!(html.contains(r#"<a href="/catalog/category/3">Membrane</a>"#));
    assert!(html.contains(r#"href="/catalog/keyboard/7/delete""#));
}

#[test]
fn blocked_delete_hides_the_form() {
    let mut context = base("Delete manufacturer", "manufacturers");
    context.insert("manufacturer", &logitech());
    context.insert(
        "keyboards",
        &serde_json::json!([
            {"id": 7, "name": "Logitech K350", "description": "Wave", "url": "/catalog/keyboard/7"}
        ]),
    );

    let html = tera()
        .render("manufacturers/delete.html", &context)
        .expect("delete page should render");
    assert!(html.contains("Delete the following keyboards"));
    assert!(!html.contains("<form"));
}
