use crate::domain::types::CategoryId;
use crate::dto::categories::{CategoryDto, CategoryPageDto};
use crate::forms::categories::{CategoryDraft, CategoryForm, CategoryFormPayload};
use crate::repository::{CategoryReader, CategoryWriter, GuardedDelete, KeyboardReader};

use super::{DeleteOutcome, FormOutcome, ServiceError, ServiceResult};

pub fn show_categories<R>(repo: &R) -> ServiceResult<Vec<CategoryDto>>
where
    R: CategoryReader,
{
    match repo.list_categories() {
        Ok(categories) => Ok(categories.into_iter().map(CategoryDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list categories: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Load a category with every keyboard listing it.
fn load_category_page<R>(
    category_id: CategoryId,
    repo: &R,
) -> ServiceResult<Option<CategoryPageDto>>
where
    R: CategoryReader + KeyboardReader,
{
    let category = match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => category,
        Ok(None) => return Ok(None),
        Err(e) => {
            log::error!("Failed to get category {category_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match repo.list_keyboards_by_category(category_id) {
        Ok(keyboards) => Ok(Some(CategoryPageDto::new(category, keyboards))),
        Err(e) => {
            log::error!("Failed to list keyboards of category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_category<R>(category_id: i32, repo: &R) -> ServiceResult<CategoryPageDto>
where
    R: CategoryReader + KeyboardReader,
{
    let category_id = CategoryId::new(category_id)?;
    load_category_page(category_id, repo)?.ok_or(ServiceError::NotFound)
}

/// Current values for the update form.
pub fn load_category_form<R>(category_id: i32, repo: &R) -> ServiceResult<CategoryDraft>
where
    R: CategoryReader,
{
    let category_id = CategoryId::new(category_id)?;
    match repo.get_category_by_id(category_id) {
        Ok(Some(category)) => Ok(CategoryDraft::from(&category)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Create a category unless one with the same name exists, in which case the
/// existing id is returned.
pub fn create_category<R>(
    form: CategoryForm,
    repo: &R,
) -> ServiceResult<FormOutcome<CategoryId, CategoryDraft>>
where
    R: CategoryReader + CategoryWriter,
{
    let payload = match CategoryFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(invalid) => return Ok(FormOutcome::Invalid(invalid)),
    };

    match repo.find_category_by_name(&payload.name) {
        Ok(Some(existing)) => return Ok(FormOutcome::Saved(existing.id)),
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to look up category by name: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.create_category(&payload.into_new_category()) {
        Ok(id) => {
            log::info!("Created category {id}");
            Ok(FormOutcome::Saved(id))
        }
        Err(e) => {
            log::error!("Failed to create category: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_category<R>(
    category_id: i32,
    form: CategoryForm,
    repo: &R,
) -> ServiceResult<FormOutcome<CategoryId, CategoryDraft>>
where
    R: CategoryWriter,
{
    let category_id = CategoryId::new(category_id)?;
    let payload = match CategoryFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(invalid) => return Ok(FormOutcome::Invalid(invalid)),
    };

    match repo.update_category(category_id, &payload.name, &payload.description) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(FormOutcome::Saved(category_id)),
        Err(e) => {
            log::error!("Failed to update category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// The delete confirmation page. `None` when the category is already gone.
pub fn show_delete_category<R>(category_id: i32, repo: &R) -> ServiceResult<Option<CategoryPageDto>>
where
    R: CategoryReader + KeyboardReader,
{
    let category_id = CategoryId::new(category_id)?;
    load_category_page(category_id, repo)
}

/// Delete a category that no keyboard lists.
pub fn delete_category<R>(
    category_id: i32,
    repo: &R,
) -> ServiceResult<DeleteOutcome<CategoryPageDto>>
where
    R: CategoryReader + CategoryWriter,
{
    let category_id = CategoryId::new(category_id)?;

    match repo.delete_category(category_id) {
        Ok(GuardedDelete::Deleted) => {
            log::info!("Deleted category {category_id}");
            Ok(DeleteOutcome::Deleted)
        }
        Ok(GuardedDelete::Missing) => Ok(DeleteOutcome::AlreadyDeleted),
        Ok(GuardedDelete::Referenced(keyboards)) => match repo.get_category_by_id(category_id) {
            Ok(Some(category)) => Ok(DeleteOutcome::Blocked(CategoryPageDto::new(
                category, keyboards,
            ))),
            Ok(None) => Ok(DeleteOutcome::AlreadyDeleted),
            Err(e) => {
                log::error!("Failed to get category {category_id}: {e}");
                Err(ServiceError::Internal)
            }
        },
        Err(e) => {
            log::error!("Failed to delete category {category_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
