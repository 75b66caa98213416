//! Domain capability interface consumed by action handlers.
//!
//! The surrounding recipe/pantry CRUD application owns persistence; the
//! gateway only sees it through the [`Kitchen`] trait, always scoped to the
//! authenticated user. Implementations are expected to be safe for
//! concurrent invocation across users; the gateway adds no locking of its
//! own around them.

mod memory;

pub use memory::InMemoryKitchen;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// A recipe as the gateway sees it: id, display name, optional image URL.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

/// A scheduled meal-plan entry.
#[derive(Debug, Clone, Serialize)]
pub struct MealPlanEntry {
    pub id: String,
    pub recipe_id: String,
    pub recipe_name: String,
    pub meal_type: String,
    /// ISO-8601 calendar date.
    pub serving_date: String,
}

/// Input for creating a meal-plan entry. Defaults are applied by the action
/// handler before this reaches the store.
#[derive(Debug, Clone)]
pub struct NewMealPlanEntry {
    pub recipe_id: String,
    pub recipe_name: String,
    pub meal_type: String,
    pub serving_date: String,
}

/// Write/read operations the action handlers need from the CRUD layer.
#[async_trait]
pub trait Kitchen: Send + Sync {
    /// Look up a recipe owned by `user_id`. `Ok(None)` covers both "does not
    /// exist" and "owned by someone else"; callers must not distinguish them.
    async fn find_recipe(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> Result<Option<Recipe>, DomainError>;

    /// All recipes owned by `user_id`.
    async fn list_recipes(&self, user_id: &str) -> Result<Vec<Recipe>, DomainError>;

    /// Create a meal-plan entry for `user_id`, returning the stored entry.
    async fn create_meal_plan(
        &self,
        user_id: &str,
        entry: NewMealPlanEntry,
    ) -> Result<MealPlanEntry, DomainError>;

    /// Delete a meal-plan entry if it exists and is owned by `user_id`.
    /// Returns `false` when it is missing or owned by someone else.
    async fn delete_meal_plan(
        &self,
        user_id: &str,
        meal_plan_id: &str,
    ) -> Result<bool, DomainError>;
}
