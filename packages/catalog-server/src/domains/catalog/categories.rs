//! Category store.
//!
//! Categories are referenced by name from listings, so deletion is blocked
//! while any listing points at one.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::info;

use crate::common::auth::{Actor, Capability};
use crate::common::errors::DomainError;
use crate::common::CategoryId;
use crate::domains::catalog::models::{Category, Listing};
use crate::kernel::traits::BaseRecords;
use crate::kernel::EngineDeps;

pub struct CategoryStore {
    categories: Arc<dyn BaseRecords<Category>>,
    listings: Arc<dyn BaseRecords<Listing>>,
    write_gate: Arc<Mutex<()>>,
}

impl CategoryStore {
    pub fn new(deps: &EngineDeps) -> Self {
        Self {
            categories: deps.categories.clone(),
            listings: deps.listings.clone(),
            write_gate: deps.catalog_gate.clone(),
        }
    }

    /// Create a category (admin only). Names are unique.
    pub async fn create(
        &self,
        name: String,
        description: Option<String>,
        actor: &Actor,
    ) -> Result<Category, DomainError> {
        actor.require(Capability::ManageCategories)?;
        let _gate = self.write_gate.lock().await;

        if name.trim().is_empty() {
            return Err(DomainError::Validation(vec![
                crate::common::errors::FieldViolation::new("name", "must not be empty"),
            ]));
        }
        let exists = self
            .categories
            .scan()
            .await?
            .iter()
            .any(|category| category.name == name);
        if exists {
            return Err(DomainError::Conflict(format!(
                "category already exists: {name}"
            )));
        }

        let category = Category::new(name, description);
        self.categories
            .put(category.id.into_uuid(), category.clone())
            .await?;
        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    pub async fn list(&self) -> Result<Vec<Category>, DomainError> {
        self.categories.scan().await
    }

    /// Delete a category (admin only). Blocked while any listing
    /// references it.
    pub async fn delete(&self, id: CategoryId, actor: &Actor) -> Result<(), DomainError> {
        actor.require(Capability::ManageCategories)?;
        let _gate = self.write_gate.lock().await;

        let category = self
            .categories
            .get(id.into_uuid())
            .await?
            .ok_or_else(|| DomainError::not_found("category", id))?;

        let referenced = self
            .listings
            .scan()
            .await?
            .iter()
            .any(|listing| listing.category == category.name);
        if referenced {
            return Err(DomainError::Conflict(format!(
                "category {} is referenced by listings",
                category.name
            )));
        }

        self.categories.delete(id.into_uuid()).await?;
        info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
