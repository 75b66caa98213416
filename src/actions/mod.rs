//! Action dispatch: the model's declared intent becomes an authenticated,
//! parameter-validated domain side effect.
//!
//! The set of actions is a closed enum rather than a string-keyed registry:
//! dispatch is an exhaustive match, names are fixed at compile time, and
//! nothing can be re-registered at runtime.

mod handlers;

use std::sync::Arc;

use serde_json::Value;

use crate::domain::Kitchen;
use crate::error::ActionError;

/// The closed set of chat-triggerable actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    AddRecipeToMenu,
    RemoveRecipeFromMenu,
    ListMyRecipes,
}

impl ActionKind {
    pub const ALL: [ActionKind; 3] = [
        ActionKind::AddRecipeToMenu,
        ActionKind::RemoveRecipeFromMenu,
        ActionKind::ListMyRecipes,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "add_recipe_to_menu" => Some(Self::AddRecipeToMenu),
            "remove_recipe_from_menu" => Some(Self::RemoveRecipeFromMenu),
            "list_my_recipes" => Some(Self::ListMyRecipes),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::AddRecipeToMenu => "add_recipe_to_menu",
            Self::RemoveRecipeFromMenu => "remove_recipe_from_menu",
            Self::ListMyRecipes => "list_my_recipes",
        }
    }
}

/// Successful dispatch outcome: a human-readable confirmation plus a data
/// payload for the client.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionSuccess {
    pub message: String,
    pub data: Value,
}

pub struct ActionDispatcher {
    kitchen: Arc<dyn Kitchen>,
}

impl ActionDispatcher {
    pub fn new(kitchen: Arc<dyn Kitchen>) -> Self {
        Self { kitchen }
    }

    /// Pure membership check; executes nothing.
    pub fn is_valid_action(&self, name: &str) -> bool {
        ActionKind::from_name(name).is_some()
    }

    /// Names of every dispatchable action, for the read-only listing
    /// endpoint.
    pub fn action_names(&self) -> Vec<&'static str> {
        ActionKind::ALL.iter().map(|kind| kind.name()).collect()
    }

    /// Execute a declared action.
    ///
    /// Order of checks is part of the contract: unknown names are rejected
    /// before anything else, then authentication is enforced for every
    /// action without exception, and only then does a handler run. Handler
    /// failures come back as [`ActionError::Failed`]; nothing propagates
    /// past this boundary.
    pub async fn execute(
        &self,
        name: &str,
        params: &Value,
        user_id: Option<&str>,
    ) -> Result<ActionSuccess, ActionError> {
        let Some(kind) = ActionKind::from_name(name) else {
            return Err(ActionError::UnknownAction(name.to_string()));
        };

        let Some(user_id) = user_id.filter(|id| !id.is_empty()) else {
            return Err(ActionError::AuthenticationRequired);
        };

        let kitchen = self.kitchen.as_ref();
        let outcome = match kind {
            ActionKind::AddRecipeToMenu => {
                handlers::add_recipe_to_menu(kitchen, params, user_id).await
            }
            ActionKind::RemoveRecipeFromMenu => {
                handlers::remove_recipe_from_menu(kitchen, params, user_id).await
            }
            ActionKind::ListMyRecipes => handlers::list_my_recipes(kitchen, user_id).await,
        };

        outcome.map_err(|e| ActionError::Failed(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use serde_json::json;

    use crate::domain::{MealPlanEntry, NewMealPlanEntry, Recipe};
    use crate::error::DomainError;

    use super::*;

    /// Kitchen spy that records every invocation.
    #[derive(Default)]
    struct SpyKitchen {
        calls: AtomicUsize,
    }

    impl SpyKitchen {
        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl Kitchen for SpyKitchen {
        async fn find_recipe(
            &self,
            _user_id: &str,
            _recipe_id: &str,
        ) -> Result<Option<Recipe>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(None)
        }

        async fn list_recipes(&self, _user_id: &str) -> Result<Vec<Recipe>, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(Vec::new())
        }

        async fn create_meal_plan(
            &self,
            _user_id: &str,
            _entry: NewMealPlanEntry,
        ) -> Result<MealPlanEntry, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(DomainError::Storage("spy".to_string()))
        }

        async fn delete_meal_plan(
            &self,
            _user_id: &str,
            _meal_plan_id: &str,
        ) -> Result<bool, DomainError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(false)
        }
    }

    #[tokio::test]
    async fn unauthenticated_dispatch_never_reaches_a_handler() {
        let spy = Arc::new(SpyKitchen::default());
        let dispatcher = ActionDispatcher::new(Arc::clone(&spy) as Arc<dyn Kitchen>);

        for name in dispatcher.action_names() {
            let result = dispatcher.execute(name, &json!({}), None).await;
            assert_eq!(result, Err(ActionError::AuthenticationRequired));
        }
        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn empty_user_id_counts_as_unauthenticated() {
        let spy = Arc::new(SpyKitchen::default());
        let dispatcher = ActionDispatcher::new(Arc::clone(&spy) as Arc<dyn Kitchen>);

        let result = dispatcher
            .execute("list_my_recipes", &json!({}), Some(""))
            .await;
        assert_eq!(result, Err(ActionError::AuthenticationRequired));
        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_action_never_invokes_any_handler() {
        let spy = Arc::new(SpyKitchen::default());
        let dispatcher = ActionDispatcher::new(Arc::clone(&spy) as Arc<dyn Kitchen>);

        let result = dispatcher
            .execute("drop_all_tables", &json!({}), Some("user-1"))
            .await;
        assert_eq!(
            result,
            Err(ActionError::UnknownAction("drop_all_tables".to_string()))
        );
        assert_eq!(spy.call_count(), 0);
    }

    #[test]
    fn membership_check_executes_nothing() {
        let spy = Arc::new(SpyKitchen::default());
        let dispatcher = ActionDispatcher::new(Arc::clone(&spy) as Arc<dyn Kitchen>);

        assert!(dispatcher.is_valid_action("add_recipe_to_menu"));
        assert!(!dispatcher.is_valid_action("add_recipe"));
        assert_eq!(spy.call_count(), 0);
    }

    #[tokio::test]
    async fn domain_failures_become_failed_results() {
        let spy = Arc::new(SpyKitchen::default());
        let dispatcher = ActionDispatcher::new(Arc::clone(&spy) as Arc<dyn Kitchen>);

        // SpyKitchen says no recipe exists for anyone.
        let result = dispatcher
            .execute(
                "add_recipe_to_menu",
                &json!({"recipeId": "r1"}),
                Some("user-1"),
            )
            .await;
        assert_eq!(
            result,
            Err(ActionError::Failed(
                "Recipe not found or not owned by user".to_string()
            ))
        );
    }
}
