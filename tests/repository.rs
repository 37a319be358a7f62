use std::collections::BTreeSet;

use chrono::Utc;
use kbstore_catalog::domain::category::NewCategory;
use kbstore_catalog::domain::keyboard::{KeyboardChanges, NewKeyboard};
use kbstore_catalog::domain::manufacturer::NewManufacturer;
use kbstore_catalog::domain::types::{
    CategoryId, CategoryName, Description, KeyboardName, KeyboardPrice, KeyboardStock,
    ManufacturerId, ManufacturerName,
};
use kbstore_catalog::repository::{
    CategoryReader, CategoryWriter, DieselRepository, GuardedDelete, KeyboardReader,
    KeyboardWriter, ManufacturerReader, ManufacturerWriter,
};

mod common;

fn add_category(repo: &DieselRepository, name: &str) -> CategoryId {
    let now = Utc::now().naive_utc();
    repo.create_category(&NewCategory {
        name: CategoryName::new(name).expect("valid category name"),
        description: Description::new(format!("{name} keyboards")).expect("valid description"),
        created_at: now,
        updated_at: now,
    })
    .expect("should create category")
}

fn add_manufacturer(repo: &DieselRepository, name: &str) -> ManufacturerId {
    let now = Utc::now().naive_utc();
    repo.create_manufacturer(&NewManufacturer {
        name: ManufacturerName::new(name).expect("valid manufacturer name"),
        description: Description::new("Makes keyboards").expect("valid description"),
        created_at: now,
        updated_at: now,
    })
    .expect("should create manufacturer")
}

fn new_keyboard(
    name: &str,
    manufacturer_id: ManufacturerId,
    category_ids: &[CategoryId],
) -> NewKeyboard {
    let now = Utc::now().naive_utc();
    NewKeyboard {
        name: KeyboardName::new(name).expect("valid keyboard name"),
        manufacturer_id,
        category_ids: category_ids.iter().copied().collect(),
        description: Description::new("Full size").expect("valid description"),
        price: KeyboardPrice::new(49.9).expect("valid price"),
        stock: KeyboardStock::new(4).expect("valid stock"),
        created_at: now,
        updated_at: now,
    }
}

#[test]
fn category_round_trip_and_name_order() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let wireless = add_category(&repo, "Wireless");
    add_category(&repo, "Mechanical");
    add_category(&repo, "Membrane");

    let stored = repo
        .get_category_by_id(wireless)
        .expect("should read category")
        .expect("category should exist");
    assert_eq!(stored.name.as_str(), "Wireless");
    assert_eq!(stored.description.as_str(), "Wireless keyboards");

    let names = repo
        .list_categories()
        .expect("should list categories")
        .into_iter()
        .map(|c| c.name.into_inner())
        .collect::<Vec<_>>();
    assert_eq!(names, vec!["Mechanical", "Membrane", "Wireless"]);
    assert_eq!(repo.count_categories().expect("should count"), 3);
}

#[test]
fn find_by_name_is_exact() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let dell = add_manufacturer(&repo, "Dell");

    let found = repo
        .find_manufacturer_by_name(&ManufacturerName::new("Dell").unwrap())
        .expect("should look up")
        .expect("should find");
    assert_eq!(found.id, dell);

    let missing = repo
        .find_manufacturer_by_name(&ManufacturerName::new("dell").unwrap())
        .expect("should look up");
    assert!(missing.is_none());
}

#[test]
fn update_preserves_identity() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let id = add_manufacturer(&repo, "Rocat");
    let affected = repo
        .update_manufacturer(
            id,
            &ManufacturerName::new("Roccat").unwrap(),
            &Description::new("Hamburg").unwrap(),
        )
        .expect("should update");
    assert_eq!(affected, 1);

    let stored = repo
        .get_manufacturer_by_id(id)
        .expect("should read")
        .expect("should exist");
    assert_eq!(stored.name.as_str(), "Roccat");
    assert_eq!(repo.count_manufacturers().expect("should count"), 1);

    let missing = ManufacturerId::new(id.get() + 100).unwrap();
    let affected = repo
        .update_manufacturer(
            missing,
            &ManufacturerName::new("Ghost").unwrap(),
            &Description::new("None").unwrap(),
        )
        .expect("should run update");
    assert_eq!(affected, 0);
}

#[test]
fn keyboard_detail_resolves_references() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let logitech = add_manufacturer(&repo, "Logitech");
    let wireless = add_category(&repo, "Wireless");
    let membrane = add_category(&repo, "Membrane");

    let id = repo
        .create_keyboard(&new_keyboard("Logitech K350", logitech, &[wireless, membrane]))
        .expect("should create keyboard");

    let detail = repo
        .get_keyboard_by_id(id)
        .expect("should read keyboard")
        .expect("keyboard should exist");
    assert_eq!(detail.keyboard.name.as_str(), "Logitech K350");
    assert_eq!(detail.manufacturer.id, logitech);
    assert_eq!(
        detail.keyboard.category_ids,
        BTreeSet::from([wireless, membrane])
    );
    let category_names = detail
        .categories
        .iter()
        .map(|c| c.name.as_str())
        .collect::<Vec<_>>();
    assert_eq!(category_names, vec!["Membrane", "Wireless"]);
    assert_eq!(detail.keyboard.price.get(), 49.9);

    let by_category = repo
        .list_keyboards_by_category(wireless)
        .expect("should list by category");
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].id, id);
}

#[test]
fn keyboard_update_replaces_category_links() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let razer = add_manufacturer(&repo, "Razer");
    let wired = add_category(&repo, "Wired");
    let mechanical = add_category(&repo, "Mechanical");

    let id = repo
        .create_keyboard(&new_keyboard("BlackWidow", razer, &[wired]))
        .expect("should create keyboard");

    let changes = KeyboardChanges {
        name: KeyboardName::new("BlackWidow V3").unwrap(),
        manufacturer_id: razer,
        category_ids: BTreeSet::from([mechanical]),
        description: Description::new("Yellow switches").unwrap(),
        price: KeyboardPrice::new(139.99).unwrap(),
        stock: KeyboardStock::new(5).unwrap(),
    };
    assert_eq!(repo.update_keyboard(id, &changes).expect("should update"), 1);

    let detail = repo
        .get_keyboard_by_id(id)
        .expect("should read keyboard")
        .expect("keyboard should exist");
    assert_eq!(detail.keyboard.name.as_str(), "BlackWidow V3");
    assert_eq!(detail.keyboard.category_ids, BTreeSet::from([mechanical]));
    assert!(
        repo.list_keyboards_by_category(wired)
            .expect("should list")
            .is_empty()
    );
}

#[test]
fn guarded_delete_refuses_referenced_records() {
    let test_db = common::TestDb::new();
    let repo = DieselRepository::new(test_db.pool());

    let hyperx = add_manufacturer(&repo, "HyperX");
    let wired = add_category(&repo, "Wired");
    let keyboard = repo
        .create_keyboard(&new_keyboard("Alloy Origins", hyperx, &[wired]))
        .expect("should create keyboard");

    match repo.delete_category(wired).expect("should run delete") {
        GuardedDelete::Referenced(keyboards) => {
            assert_eq!(keyboards.len(), 1);
            assert_eq!(keyboards[0].id, keyboard);
        }
        other => panic!("expected refusal, got {other:?}"),
    }
    assert!(matches!(
        repo.delete_manufacturer(hyperx).expect("should run delete"),
        GuardedDelete::Referenced(_)
    ));

    assert_eq!(repo.delete_keyboard(keyboard).expect("should delete"), 1);
    assert_eq!(repo.delete_keyboard(keyboard).expect("should run delete"), 0);

    assert!(matches!(
        repo.delete_category(wired).expect("should delete"),
        GuardedDelete::Deleted
    ));
    assert!(matches!(
        repo.delete_manufacturer(hyperx).expect("should delete"),
        GuardedDelete::Deleted
    ));
    assert!(matches!(
        repo.delete_manufacturer(hyperx).expect("should run delete"),
        GuardedDelete::Missing
    ));
    assert_eq!(repo.count_keyboards().expect("should count"), 0);
}
