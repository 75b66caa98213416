//! In-memory [`Kitchen`] implementation.
//!
//! The real application persists recipes and meal plans in its document
//! store; that subsystem is out of scope for the gateway, so the binary and
//! the test suite run against this map-backed stand-in.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::DomainError;

use super::{Kitchen, MealPlanEntry, NewMealPlanEntry, Recipe};

#[derive(Default)]
struct KitchenShelves {
    /// (user_id, recipe_id) → recipe
    recipes: HashMap<(String, String), Recipe>,
    /// (user_id, meal_plan_id) → entry
    meal_plans: HashMap<(String, String), MealPlanEntry>,
}

#[derive(Default)]
pub struct InMemoryKitchen {
    shelves: RwLock<KitchenShelves>,
}

impl InMemoryKitchen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a recipe for a user. Test and demo helper.
    pub fn add_recipe(&self, user_id: &str, recipe: Recipe) {
        let mut shelves = self.shelves.write().expect("kitchen lock poisoned");
        shelves
            .recipes
            .insert((user_id.to_string(), recipe.id.clone()), recipe);
    }

    /// Number of meal-plan entries a user currently has. Test helper.
    pub fn meal_plan_count(&self, user_id: &str) -> usize {
        let shelves = self.shelves.read().expect("kitchen lock poisoned");
        shelves
            .meal_plans
            .keys()
            .filter(|(owner, _)| owner == user_id)
            .count()
    }
}

#[async_trait]
impl Kitchen for InMemoryKitchen {
    async fn find_recipe(
        &self,
        user_id: &str,
        recipe_id: &str,
    ) -> Result<Option<Recipe>, DomainError> {
        let shelves = lock_read(&self.shelves)?;
        Ok(shelves
            .recipes
            .get(&(user_id.to_string(), recipe_id.to_string()))
            .cloned())
    }

    async fn list_recipes(&self, user_id: &str) -> Result<Vec<Recipe>, DomainError> {
        let shelves = lock_read(&self.shelves)?;
        let mut recipes: Vec<Recipe> = shelves
            .recipes
            .iter()
            .filter(|((owner, _), _)| owner == user_id)
            .map(|(_, recipe)| recipe.clone())
            .collect();
        recipes.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(recipes)
    }

    async fn create_meal_plan(
        &self,
        user_id: &str,
        entry: NewMealPlanEntry,
    ) -> Result<MealPlanEntry, DomainError> {
        let stored = MealPlanEntry {
            id: Uuid::new_v4().to_string(),
            recipe_id: entry.recipe_id,
            recipe_name: entry.recipe_name,
            meal_type: entry.meal_type,
            serving_date: entry.serving_date,
        };
        let mut shelves = lock_write(&self.shelves)?;
        shelves
            .meal_plans
            .insert((user_id.to_string(), stored.id.clone()), stored.clone());
        Ok(stored)
    }

    async fn delete_meal_plan(
        &self,
        user_id: &str,
        meal_plan_id: &str,
    ) -> Result<bool, DomainError> {
        let mut shelves = lock_write(&self.shelves)?;
        Ok(shelves
            .meal_plans
            .remove(&(user_id.to_string(), meal_plan_id.to_string()))
            .is_some())
    }
}

fn lock_read(
    lock: &RwLock<KitchenShelves>,
) -> Result<std::sync::RwLockReadGuard<'_, KitchenShelves>, DomainError> {
    lock.read()
        .map_err(|e| DomainError::Storage(format!("kitchen lock poisoned: {e}")))
}

fn lock_write(
    lock: &RwLock<KitchenShelves>,
) -> Result<std::sync::RwLockWriteGuard<'_, KitchenShelves>, DomainError> {
    lock.write()
        .map_err(|e| DomainError::Storage(format!("kitchen lock poisoned: {e}")))
}
