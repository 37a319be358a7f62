use crate::domain::types::ManufacturerId;
use crate::dto::manufacturers::{ManufacturerDto, ManufacturerPageDto};
use crate::forms::manufacturers::{ManufacturerDraft, ManufacturerForm, ManufacturerFormPayload};
use crate::repository::{ManufacturerReader, ManufacturerWriter, GuardedDelete, KeyboardReader};

use super::{DeleteOutcome, FormOutcome, ServiceError, ServiceResult};

pub fn show_manufacturers<R>(repo: &R) -> ServiceResult<Vec<ManufacturerDto>>
where
    R: ManufacturerReader,
{
    match repo.list_manufacturers() {
        Ok(manufacturers) => Ok(manufacturers.into_iter().map(ManufacturerDto::from).collect()),
        Err(e) => {
            log::error!("Failed to list manufacturers: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Load a manufacturer with every keyboard it makes.
fn load_manufacturer_page<R>(
    manufacturer_id: ManufacturerId,
    repo: &R,
) -> ServiceResult<Option<ManufacturerPageDto>>
where
    R: ManufacturerReader + KeyboardReader,
{
    let manufacturer = match repo.get_manufacturer_by_id(manufacturer_id) {
        Ok(Some(manufacturer)) => manufacturer,
        Ok(None) => return Ok(None),
        Err(e) => {
            log::error!("Failed to get manufacturer {manufacturer_id}: {e}");
            return Err(ServiceError::Internal);
        }
    };

    match repo.list_keyboards_by_manufacturer(manufacturer_id) {
        Ok(keyboards) => Ok(Some(ManufacturerPageDto::new(manufacturer, keyboards))),
        Err(e) => {
            log::error!("Failed to list keyboards of manufacturer {manufacturer_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn show_manufacturer<R>(manufacturer_id: i32, repo: &R) -> ServiceResult<ManufacturerPageDto>
where
    R: ManufacturerReader + KeyboardReader,
{
    let manufacturer_id = ManufacturerId::new(manufacturer_id)?;
    load_manufacturer_page(manufacturer_id, repo)?.ok_or(ServiceError::NotFound)
}

/// Current values for the update form.
pub fn load_manufacturer_form<R>(manufacturer_id: i32, repo: &R) -> ServiceResult<ManufacturerDraft>
where
    R: ManufacturerReader,
{
    let manufacturer_id = ManufacturerId::new(manufacturer_id)?;
    match repo.get_manufacturer_by_id(manufacturer_id) {
        Ok(Some(manufacturer)) => Ok(ManufacturerDraft::from(&manufacturer)),
        Ok(None) => Err(ServiceError::NotFound),
        Err(e) => {
            log::error!("Failed to get manufacturer {manufacturer_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// Create a manufacturer unless one with the same name exists, in which case the
/// existing id is returned.
pub fn create_manufacturer<R>(
    form: ManufacturerForm,
    repo: &R,
) -> ServiceResult<FormOutcome<ManufacturerId, ManufacturerDraft>>
where
    R: ManufacturerReader + ManufacturerWriter,
{
    let payload = match ManufacturerFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(invalid) => return Ok(FormOutcome::Invalid(invalid)),
    };

    match repo.find_manufacturer_by_name(&payload.name) {
        Ok(Some(existing)) => return Ok(FormOutcome::Saved(existing.id)),
        Ok(None) => {}
        Err(e) => {
            log::error!("Failed to look up manufacturer by name: {e}");
            return Err(ServiceError::Internal);
        }
    }

    match repo.create_manufacturer(&payload.into_new_manufacturer()) {
        Ok(id) => {
            log::info!("Created manufacturer {id}");
            Ok(FormOutcome::Saved(id))
        }
        Err(e) => {
            log::error!("Failed to create manufacturer: {e}");
            Err(ServiceError::Internal)
        }
    }
}

pub fn update_manufacturer<R>(
    manufacturer_id: i32,
    form: ManufacturerForm,
    repo: &R,
) -> ServiceResult<FormOutcome<ManufacturerId, ManufacturerDraft>>
where
    R: ManufacturerWriter,
{
    let manufacturer_id = ManufacturerId::new(manufacturer_id)?;
    let payload = match ManufacturerFormPayload::try_from(form) {
        Ok(payload) => payload,
        Err(invalid) => return Ok(FormOutcome::Invalid(invalid)),
    };

    match repo.update_manufacturer(manufacturer_id, &payload.name, &payload.description) {
        Ok(0) => Err(ServiceError::NotFound),
        Ok(_) => Ok(FormOutcome::Saved(manufacturer_id)),
        Err(e) => {
            log::error!("Failed to update manufacturer {manufacturer_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}

/// The delete confirmation page. `None` when the manufacturer is already gone.
pub fn show_delete_manufacturer<R>(
    manufacturer_id: i32,
    repo: &R,
) -> ServiceResult<Option<ManufacturerPageDto>>
where
    R: ManufacturerReader + KeyboardReader,
{
    let manufacturer_id = ManufacturerId::new(manufacturer_id)?;
    load_manufacturer_page(manufacturer_id, repo)
}

/// Delete a manufacturer that makes no keyboard.
pub fn delete_manufacturer<R>(
    manufacturer_id: i32,
    repo: &R,
) -> ServiceResult<DeleteOutcome<ManufacturerPageDto>>
where
    R: ManufacturerReader + ManufacturerWriter,
{
    let manufacturer_id = ManufacturerId::new(manufacturer_id)?;

    match repo.delete_manufacturer(manufacturer_id) {
        Ok(GuardedDelete::Deleted) => {
            log::info!("Deleted manufacturer {manufacturer_id}");
            Ok(DeleteOutcome::Deleted)
        }
        Ok(GuardedDelete::Missing) => Ok(DeleteOutcome::AlreadyDeleted),
        Ok(GuardedDelete::Referenced(keyboards)) => {
            match repo.get_manufacturer_by_id(manufacturer_id) {
                Ok(Some(manufacturer)) => Ok(DeleteOutcome::Blocked(ManufacturerPageDto::new(
                    manufacturer,
                    keyboards,
                ))),
                Ok(None) => Ok(DeleteOutcome::AlreadyDeleted),
                Err(e) => {
                    log::error!("Failed to get manufacturer {manufacturer_id}: {e}");
                    Err(ServiceError::Internal)
                }
            }
        }
        Err(e) => {
            log::error!("Failed to delete manufacturer {manufacturer_id}: {e}");
            Err(ServiceError::Internal)
        }
    }
}
