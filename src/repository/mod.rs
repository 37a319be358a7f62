use crate::db::{DbConnection, DbPool};
use crate::domain::category::{Category, NewCategory};
use crate::domain::keyboard::{Keyboard, KeyboardChanges, KeyboardDetail, NewKeyboard};
use crate::domain::manufacturer::{Manufacturer, NewManufacturer};
use crate::domain::types::{
    CategoryId, CategoryName, Description, KeyboardId, KeyboardName, ManufacturerId,
    ManufacturerName,
};

pub mod category;
pub mod errors;
pub mod keyboard;
pub mod manufacturer;

pub use errors::{RepositoryError, RepositoryResult};

/// Repository implementation backed by Diesel and SQLite.
///
/// The underlying `r2d2::Pool` is cheap to clone, allowing the repository to
/// be passed around freely between handlers.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool, // r2d2::Pool is cheap to clone
}

impl DieselRepository {
    /// Create a new repository from an established database pool.
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Get a pooled database connection.
    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(self.pool.get()?)
    }
}

/// Result of a delete that must not remove a still-referenced record.
///
/// The reference check and the removal happen in one transaction, so a
/// `Deleted` outcome guarantees no keyboard pointed at the record.
#[derive(Debug, Clone)]
pub enum GuardedDelete {
    /// The record was removed.
    Deleted,
    /// No record with that id existed.
    Missing,
    /// The record is still referenced by these keyboards, ordered by name.
    Referenced(Vec<Keyboard>),
}

/// Read-only operations for category entities.
pub trait CategoryReader {
    /// List all categories ordered by name.
    fn list_categories(&self) -> RepositoryResult<Vec<Category>>;
    /// Retrieve a category by its identifier.
    fn get_category_by_id(&self, id: CategoryId) -> RepositoryResult<Option<Category>>;
    /// Exact, case-sensitive lookup by name.
    fn find_category_by_name(&self, name: &CategoryName) -> RepositoryResult<Option<Category>>;
    fn count_categories(&self) -> RepositoryResult<usize>;
}

/// Write operations for category entities.
pub trait CategoryWriter {
    /// Persist a new category returning its identifier.
    fn create_category(&self, category: &NewCategory) -> RepositoryResult<CategoryId>;
    /// Replace name and description. Returns the number of affected rows.
    fn update_category(
        &self,
        id: CategoryId,
        name: &CategoryName,
        description: &Description,
    ) -> RepositoryResult<usize>;
    /// Delete a category unless a keyboard references it.
    fn delete_category(&self, id: CategoryId) -> RepositoryResult<GuardedDelete>;
}

/// Read-only operations for manufacturer entities.
pub trait ManufacturerReader {
    /// List all manufacturers ordered by name.
    fn list_manufacturers(&self) -> RepositoryResult<Vec<Manufacturer>>;
    /// Retrieve a manufacturer by its identifier.
    fn get_manufacturer_by_id(&self, id: ManufacturerId)
    -> RepositoryResult<Option<Manufacturer>>;
    /// Exact, case-sensitive lookup by name.
    fn find_manufacturer_by_name(
        &self,
        name: &ManufacturerName,
    ) -> RepositoryResult<Option<Manufacturer>>;
    fn count_manufacturers(&self) -> RepositoryResult<usize>;
}

/// Write operations for manufacturer entities.
pub trait ManufacturerWriter {
    /// Persist a new manufacturer returning its identifier.
    fn create_manufacturer(&self, manufacturer: &NewManufacturer)
    -> RepositoryResult<ManufacturerId>;
    /// Replace name and description. Returns the number of affected rows.
    fn update_manufacturer(
        &self,
        id: ManufacturerId,
        name: &ManufacturerName,
        description: &Description,
    ) -> RepositoryResult<usize>;
    /// Delete a manufacturer unless a keyboard references it.
    fn delete_manufacturer(&self, id: ManufacturerId) -> RepositoryResult<GuardedDelete>;
}

/// Read-only operations for keyboard entities.
pub trait KeyboardReader {
    /// List all keyboards ordered by name with manufacturer and categories resolved.
    fn list_keyboards(&self) -> RepositoryResult<Vec<KeyboardDetail>>;
    /// Retrieve a keyboard with manufacturer and categories resolved.
    fn get_keyboard_by_id(&self, id: KeyboardId) -> RepositoryResult<Option<KeyboardDetail>>;
    /// Exact, case-sensitive lookup by name.
    fn find_keyboard_by_name(&self, name: &KeyboardName) -> RepositoryResult<Option<Keyboard>>;
    /// Keyboards listing the category, ordered by name.
    fn list_keyboards_by_category(&self, id: CategoryId) -> RepositoryResult<Vec<Keyboard>>;
    /// Keyboards made by the manufacturer, ordered by name.
    fn list_keyboards_by_manufacturer(
        &self,
        id: ManufacturerId,
    ) -> RepositoryResult<Vec<Keyboard>>;
    fn count_keyboards(&self) -> RepositoryResult<usize>;
}

/// Write operations for keyboard entities and their category links.
pub trait KeyboardWriter {
    /// Persist a keyboard and its category links returning its identifier.
    fn create_keyboard(&self, keyboard: &NewKeyboard) -> RepositoryResult<KeyboardId>;
    /// Replace every field and the category set. Returns the number of affected rows.
    fn update_keyboard(&self, id: KeyboardId, changes: &KeyboardChanges)
    -> RepositoryResult<usize>;
    /// Delete a keyboard and its category links. Returns the number of affected rows.
    fn delete_keyboard(&self, id: KeyboardId) -> RepositoryResult<usize>;
}
