use std::collections::BTreeSet;
use std::convert::Infallible;

use crate::domain::types::{CategoryId, KeyboardId, ManufacturerId};
use crate::dto::categories::CategoryOptionDto;
use crate::dto::keyboards::{KeyboardDto, KeyboardFormOptionsDto};
use crate::dto::manufacturers::ManufacturerDto;
use crate::forms::InvalidForm;
use crate::forms::keyboards::{KeyboardDraft, KeyboardForm, KeyboardFormPayload};
use crate::repository::{CategoryReader, KeyboardReader, KeyboardWriter, ManufacturerReader};

use super::{DeleteOutcome, FormOutcome, ServiceError, ServiceResult};

enum References {
    Resolved(ManufacturerId, BTreeSet<CategoryId>),
    Unresolved(Vec<String>),
}

/// Check the submitted manufacturer and category ids against the store.
fn resolve_references<R>(payload: &KeyboardFormPayload, repo: &R) -> ServiceResult<References>
where
    R: ManufacturerReader + CategoryReader,
{
    let mut errors = Vec::new();

    let manufacturer_id = match ManufacturerId::parse(payload.manufacturer()) {
        Ok(id) => match repo.get_manufacturer_by_id(id) {
            Ok(found) => found.map(|m| m.id),
            Err(e) => {
                log::error!("Failed to get manufacturer {id}: {e}");
                return Err(ServiceError::Internal);
            }
        },
        Err(_) => None,
    };
    if manufacturer_id.is_none() {
        errors.push("Manufacturer does not exist.".to_string());
    }

    let mut category_ids = BTreeSet::new();
    for raw in payload.categories() {
        let found = match CategoryId::parse(raw) {
            Ok(id) => match repo.get_category_by_id(id) {
                Ok(found) => found.map(|c| c.id),
                Err(e) => {
                    log::error!("Failed to get category {id}: {e}");
                    return Err(ServiceError::Internal);
                }
            },
            Err(_) => None,
        };
        match found {
            Some(id) => {
                category_ids.insert(id);
            }
            None => errors.push(format!("Category {raw} does not exist.")),
        }
    }

    match manufacturer_id {
        Some(id) if errors.is_empty() => Ok(References::Resolved(id, category_ids)),
        _ => Ok(References::Unresolved(errors)),
    }
}

/// Validate the form and resolve its references. `Err` carries the outcome
/// to hand back unchanged.
fn prepare<R>(
    form: KeyboardForm,
    repo: &R,
) -> ServiceResult<
    Result<(KeyboardFormPayload, ManufacturerId, BTreeSet<CategoryId>), InvalidForm<KeyboardDraft>>,
>
where
    R: ManufacturerReader + CategoryReader,
{
    let payload = match KeyboardFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(invalid) => return Ok(Err(invalid)),
    };

    match resolve_references(&payload, repo)? {
        References::Resolved(manufacturer_id, category_ids) => {
            Ok(Ok((payload, manufacturer_id, category_ids)))
        }
        References::Unresolved(errors) => Ok(Err(InvalidForm::new(payload.draft, errors))),
    }
}

pub fn show_keyboards<R>(repo: &R) -> ServiceResult<Vec<KeyboardDto>>
where
    R: KeyboardReader,
{
    match repo.list_keyboards() {
        Ok(keyboards) => Ok(keyboards.into_iter().map(KeyboardDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list keyboards: {e}");
            Err(ServiceError::Internal)
        }
    }
}

fn find_keyboard<R>(keyboard_id: i32, repo: &R) -> ServiceResult<Option<KeyboardDto>>
where
    R: KeyboardReader,
{
    let keyboard_id = KeyboardId::new(keyboard_id)?;
    match repo.get_keyboard_by_id(keyboard_id) {
        Ok(detail) => Ok(detail.map(KeyboardDto::from)),
        Err(e) => {
            log::error!("Failed to get keyboard {keyboard_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_keyboard<R>(keyboard_id: i32, repo: &R) -> ServiceResult<KeyboardDto>
where
    R: KeyboardReader,
{
    find_keyboard(keyboard_id, repo)?.ok_or(ServiceError::NotFound)
}

/// Every manufacturer and category, with the categories in `selected` checked.
pub fn keyboard_form_options<R>(
    selected: &BTreeSet<String>,
    repo: &R,
) -> ServiceResult<KeyboardFormOptionsDto>
where
    R: ManufacturerReader + CategoryReader,
{
    let manufacturers = repo.list_manufacturers().map_err(|e| {
        log::error!("Failed to list manufacturers: {e}");
        ServiceError::Internal
    })?;
    let categories = repo.list_categories().map_err(|e| {
        log::error!("Failed to list categories: {e}");
        ServiceError::Internal
    })?;

    Ok(KeyboardFormOptionsDto {
        manufacturers: manufacturers.into_iter().map(ManufacturerDto::from).collect(),
        categories: categories
            .into_iter()
            .map(|category| CategoryOptionDto::new(category, selected))
            .collect(),
    })
}

/// Current values for the update form.
pub fn load_keyboard_form<R>(keyboard_id: i32, repo: &R) -> ServiceResult<KeyboardDraft>
where
    R: KeyboardReader,
{
    let keyboard_id = KeyboardId::new(keyboard_id)?;
    match repo.get_keyboard_by_id(keyboard_id) {
        Ok(Some(detail)) => Ok(KeyboardDraft::from(&detail)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get keyboard {keyboard_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Create a keyboard unless one with the same name exists, in which case the
/// existing id is returned.
pub fn create_keyboard<R>(
    form: KeyboardForm,
    repo: &R,
) -> ServiceResult<FormOutcome<KeyboardId, KeyboardDraft>>
where
    R: ManufacturerReader + CategoryReader + KeyboardReader + KeyboardWriter,
{
    let (payload, manufacturer_id, category_ids) = match prepare(form, repo)? {
        Ok(prepared) => prepared,
        Err(invalid) => return Ok(FormOutcome::Invalid(invalid)),
    };

    match repo.find_keyboard_by_name(&payload.name) {
        Ok(Some(existing)) => return Ok(FormOutcome::Saved(existing.id)),
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to look up keyboard by name: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.create_keyboard(&payload.into_new_keyboard(manufacturer_id, category_ids)) {
        Ok(id) => {
            log::info!("Created keyboard {id}");
            Ok(FormOutcome::Saved(id))
        }
        Err(e) => {
            log::error!("Failed to create keyboard: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_keyboard<R>(
    keyboard_id: i32,
    form: KeyboardForm,
    repo: &R,
) -> ServiceResult<FormOutcome<KeyboardId, KeyboardDraft>>
where
    R: ManufacturerReader + CategoryReader + KeyboardWriter,
{
    let keyboard_id = KeyboardId::new(keyboard_id)?;
    let (payload, manufacturer_id, category_ids) = match prepare(form, repo)? {
        Ok(prepared) => prepared,
        Err(invalid) => return Ok(FormOutcome::Invalid(invalid)),
    };

    match repo.update_keyboard(
        keyboard_id,
        &payload.into_changes(manufacturer_id, category_ids),
    ) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(FormOutcome::Saved(keyboard_id)),
        Err(e) => {
            log::error!("Failed to update keyboard {keyboard_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// The delete confirmation page. `None` when the keyboard is already gone.
pub fn show_delete_keyboard<R>(keyboard_id: i32, repo: &R) -> ServiceResult<Option<KeyboardDto>>
where
    R: KeyboardReader,
{
    find_keyboard(keyboard_id, repo)
}

/// Delete a keyboard. Nothing references keyboards, so this is never blocked.
pub fn delete_keyboard<R>(keyboard_id: i32, repo: &R) -> ServiceResult<DeleteOutcome<Infallible>>
where
    R: KeyboardWriter,
{
    let keyboard_id = KeyboardId::new(keyboard_id)?;
    match repo.delete_keyboard(keyboard_id) {
        Ok(0) => Ok(DeleteOutcome::AlreadyDeleted),
        Ok(_) => {
            log::info!("Deleted keyboard {keyboard_id}");
            Ok(DeleteOutcome::Deleted)
        }
        Err(e) => {
            log::error!("Failed to delete keyboard {keyboard_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::forms::categories::CategoryForm;
    use crate::forms::manufacturers::ManufacturerForm;
    use crate::repository::test::TestRepository;
    use crate::services::categories::create_category;
    use crate::services::manufacturers::create_manufacturer;

    struct Seeded {
        repo: TestRepository,
        logitech: i32,
        wireless: i32,
        wired: i32,
    }

    fn seeded() -> Seeded {
        let repo = TestRepository::new();
        let logitech = match create_manufacturer(
            ManufacturerForm {
                name: "Logitech".into(),
                description: "Swiss".into(),
            },
            &repo,
        )
        .unwrap()
        {
            FormOutcome::Saved(id) => id.get(),
            FormOutcome::Invalid(_) => unreachable!(),
        };
        let category = |name: &str| match create_category(
            CategoryForm {
                name: name.into(),
                description: "d".into(),
            },
            &repo,
        )
        .unwrap()
        {
            FormOutcome::Saved(id) => id.get(),
            FormOutcome::Invalid(_) => unreachable!(),
        };
        let wireless = category("Wireless");
        let wired = category("Wired");

        Seeded {
            repo,
            logitech,
            wireless,
            wired,
        }
    }

    fn form(name: &str, manufacturer: i32, categories: &[i32]) -> KeyboardForm {
        let mut pairs = vec![
            ("name".to_string(), name.to_string()),
            ("manufacturer".to_string(), manufacturer.to_string()),
            ("description".to_string(), "Full size".to_string()),
            ("price".to_string(), "49.90".to_string()),
            ("stock".to_string(), "12".to_string()),
        ];
        pairs.extend(
            categories
                .iter()
                .map(|id| ("category".to_string(), id.to_string())),
        );
        KeyboardForm::from(pairs)
    }

    fn saved(outcome: FormOutcome<KeyboardId, KeyboardDraft>) -> KeyboardId {
        match outcome {
            FormOutcome::Saved(id) => id,
            FormOutcome::Invalid(invalid) => panic!("unexpected errors: {:?}", invalid.errors),
        }
    }

    #[test]
    fn create_then_load_form_matches_submission() {
        let s = seeded();
        let id = saved(
            create_keyboard(form("MX Keys", s.logitech, &[s.wireless]), &s.repo).unwrap(),
        );

        let draft = load_keyboard_form(id.get(), &s.repo).unwrap();
        assert_eq!(draft.name, "MX Keys");
        assert_eq!(draft.manufacturer, s.logitech.to_string());
        assert_eq!(draft.category, BTreeSet::from([s.wireless.to_string()]));
        assert_eq!(draft.price, "49.90");
        assert_eq!(draft.stock, "12");

        let shown = show_keyboard(id.get(), &s.repo).unwrap();
        assert_eq!(shown.manufacturer.name, "Logitech");
        assert_eq!(shown.categories.len(), 1);
        assert_eq!(shown.url, format!("/catalog/keyboard/{id}"));
    }

    #[test]
    fn unknown_references_are_rejected_without_writing() {
        let s = seeded();
        let outcome = create_keyboard(form("MX Keys", 999, &[s.wired, 555]), &s.repo).unwrap();

        match outcome {
            FormOutcome::Invalid(invalid) => {
                assert_eq!(
                    invalid.errors,
                    vec!["Manufacturer does not exist.", "Category 555 does not exist."]
                );
                assert_eq!(invalid.draft.name, "MX Keys");
            }
            FormOutcome::Saved(_) => panic!("expected rejection"),
        }
        assert!(show_keyboards(&s.repo).unwrap().is_empty());
    }

    #[test]
    fn empty_name_is_rejected_without_writing() {
        let s = seeded();
        match create_keyboard(form("", s.logitech, &[]), &s.repo).unwrap() {
            FormOutcome::Invalid(invalid) => {
                assert_eq!(invalid.errors, vec!["Name must not be empty."]);
            }
            FormOutcome::Saved(_) => panic!("expected rejection"),
        }
        assert!(show_keyboards(&s.repo).unwrap().is_empty());
    }

    #[test]
    fn same_name_returns_existing_keyboard() {
        let s = seeded();
        let first = saved(create_keyboard(form("K120", s.logitech, &[]), &s.repo).unwrap());
        let second =
            saved(create_keyboard(form("K120", s.logitech, &[s.wired]), &s.repo).unwrap());

        assert_eq!(first, second);
        assert_eq!(show_keyboards(&s.repo).unwrap().len(), 1);
    }

    #[test]
    fn update_replaces_category_set() {
        let s = seeded();
        let id = saved(
            create_keyboard(form("G915", s.logitech, &[s.wireless, s.wired]), &s.repo).unwrap(),
        );

        let updated =
            saved(update_keyboard(id.get(), form("G915 TKL", s.logitech, &[]), &s.repo).unwrap());
        assert_eq!(updated, id);

        let shown = show_keyboard(id.get(), &s.repo).unwrap();
        assert_eq!(shown.name, "G915 TKL");
        assert!(shown.categories.is_empty());
    }

    fn resubmit(draft: &KeyboardDraft) -> KeyboardForm {
        let mut pairs = vec![
            ("name".to_string(), draft.name.clone()),
            ("manufacturer".to_string(), draft.manufacturer.clone()),
            ("description".to_string(), draft.description.clone()),
            ("price".to_string(), draft.price.clone()),
            ("stock".to_string(), draft.stock.clone()),
        ];
        pairs.extend(
            draft
                .category
                .iter()
                .map(|id| ("category".to_string(), id.clone())),
        );
        KeyboardForm::from(pairs)
    }

    #[test]
    fn unchanged_update_keeps_sub_cent_price() {
        let s = seeded();
        let mut submitted = form("K270", s.logitech, &[s.wireless]);
        submitted.price = "0.125".to_string();
        let id = saved(create_keyboard(submitted, &s.repo).unwrap());

        let draft = load_keyboard_form(id.get(), &s.repo).unwrap();
        assert_eq!(draft.price, "0.125");
        assert_eq!(show_keyboard(id.get(), &s.repo).unwrap().price, "0.125");

        saved(update_keyboard(id.get(), resubmit(&draft), &s.repo).unwrap());
        assert_eq!(load_keyboard_form(id.get(), &s.repo).unwrap(), draft);
        assert_eq!(show_keyboard(id.get(), &s.repo).unwrap().price, "0.125");
    }

    #[test]
    fn update_of_missing_keyboard_is_not_found() {
        let s = seeded();
        assert_eq!(
            update_keyboard(77, form("G915", s.logitech, &[]), &s.repo),
            Err(ServiceError::NotFound)
        );
    }

    #[test]
    fn form_options_mark_selected_categories() {
        let s = seeded();
        let selected = BTreeSet::from([s.wired.to_string()]);

        let options = keyboard_form_options(&selected, &s.repo).unwrap();
        assert_eq!(options.manufacturers.len(), 1);
        let checked = options
            .categories
            .iter()
            .map(|c| (c.name.as_str(), c.checked))
            .collect::<Vec<_>>();
        assert_eq!(checked, vec![("Wired", true), ("Wireless", false)]);
    }

    #[test]
    fn delete_twice() {
        let s = seeded();
        let id = saved(create_keyboard(form("K120", s.logitech, &[]), &s.repo).unwrap());

        assert_eq!(delete_keyboard(id.get(), &s.repo).unwrap(), DeleteOutcome::Deleted);
        assert_eq!(
            delete_keyboard(id.get(), &s.repo).unwrap(),
            DeleteOutcome::AlreadyDeleted
        );
        assert_eq!(show_delete_keyboard(id.get(), &s.repo).unwrap(), None);
    }
}
