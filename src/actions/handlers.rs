//! Built-in action handlers.
//!
//! Each handler validates its own params, calls the [`Kitchen`] capability
//! scoped to the authenticated user, and returns a confirmation message plus
//! a data payload. Domain errors bubble up to the dispatcher, which turns
//! them into failed results.

use chrono::Utc;
use serde::Deserialize;
use serde_json::{Value, json};

use crate::domain::{Kitchen, NewMealPlanEntry};
use crate::error::DomainError;

use super::ActionSuccess;

const DEFAULT_MEAL_TYPE: &str = "dinner";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AddRecipeParams {
    recipe_id: Option<String>,
    meal_type: Option<String>,
    serving_date: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RemoveRecipeParams {
    meal_plan_id: Option<String>,
}

fn parse_params<T: serde::de::DeserializeOwned>(params: &Value) -> Result<T, DomainError> {
    serde_json::from_value(params.clone())
        .map_err(|e| DomainError::Invalid(format!("Invalid action parameters: {e}")))
}

fn required<'a>(value: &'a Option<String>, name: &str) -> Result<&'a str, DomainError> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| DomainError::Invalid(format!("{name} is required")))
}

pub async fn add_recipe_to_menu(
    kitchen: &dyn Kitchen,
    params: &Value,
    user_id: &str,
) -> Result<ActionSuccess, DomainError> {
    let params: AddRecipeParams = parse_params(params)?;
    let recipe_id = required(&params.recipe_id, "recipeId")?;

    let recipe = kitchen
        .find_recipe(user_id, recipe_id)
        .await?
        .ok_or_else(|| DomainError::NotFound("Recipe not found or not owned by user".to_string()))?;

    let meal_type = params
        .meal_type
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(DEFAULT_MEAL_TYPE)
        .to_string();
    let serving_date = params
        .serving_date
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| Utc::now().date_naive().to_string());

    let entry = kitchen
        .create_meal_plan(
            user_id,
            NewMealPlanEntry {
                recipe_id: recipe.id.clone(),
                recipe_name: recipe.name.clone(),
                meal_type: meal_type.clone(),
                serving_date: serving_date.clone(),
            },
        )
        .await?;

    Ok(ActionSuccess {
        message: format!(
            "Added \"{}\" to your {} menu for {}.",
            recipe.name, meal_type, serving_date
        ),
        data: json!({
            "mealPlanId": entry.id,
            "recipeId": entry.recipe_id,
            "recipeName": entry.recipe_name,
            "mealType": entry.meal_type,
            "servingDate": entry.serving_date,
        }),
    })
}

pub async fn remove_recipe_from_menu(
    kitchen: &dyn Kitchen,
    params: &Value,
    user_id: &str,
) -> Result<ActionSuccess, DomainError> {
    let params: RemoveRecipeParams = parse_params(params)?;
    let meal_plan_id = required(&params.meal_plan_id, "mealPlanId")?;

    let removed = kitchen.delete_meal_plan(user_id, meal_plan_id).await?;
    if !removed {
        return Err(DomainError::NotFound(
            "Meal plan entry not found or not owned by user".to_string(),
        ));
    }

    Ok(ActionSuccess {
        message: "Removed the entry from your menu.".to_string(),
        data: json!({ "mealPlanId": meal_plan_id }),
    })
}

pub async fn list_my_recipes(
    kitchen: &dyn Kitchen,
    user_id: &str,
) -> Result<ActionSuccess, DomainError> {
    let recipes = kitchen.list_recipes(user_id).await?;
    let count = recipes.len();

    let projected: Vec<Value> = recipes
        .iter()
        .map(|recipe| {
            json!({
                "id": recipe.id,
                "name": recipe.name,
                "image": recipe.image,
            })
        })
        .collect();

    let message = match count {
        0 => "You don't have any recipes yet.".to_string(),
        1 => "You have 1 recipe.".to_string(),
        n => format!("You have {n} recipes."),
    };

    Ok(ActionSuccess {
        message,
        data: json!({ "recipes": projected, "count": count }),
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::domain::{InMemoryKitchen, Recipe};

    use super::*;

    fn kitchen_with_recipe(user: &str, id: &str, name: &str) -> Arc<InMemoryKitchen> {
        let kitchen = Arc::new(InMemoryKitchen::new());
        kitchen.add_recipe(
            user,
            Recipe {
                id: id.to_string(),
                name: name.to_string(),
                image: Some("https://img.example/carbonara.jpg".to_string()),
            },
        );
        kitchen
    }

    #[tokio::test]
    async fn add_defaults_meal_type_and_serving_date() {
        let kitchen = kitchen_with_recipe("user-1", "r1", "Carbonara");

        let success = add_recipe_to_menu(kitchen.as_ref(), &json!({"recipeId": "r1"}), "user-1")
            .await
            .expect("add should succeed");

        assert_eq!(success.data["mealType"], "dinner");
        assert_eq!(
            success.data["servingDate"],
            Utc::now().date_naive().to_string()
        );
        assert_eq!(success.data["recipeName"], "Carbonara");
        assert!(success.data["mealPlanId"].is_string());
        assert!(success.message.contains("Carbonara"));
        assert_eq!(kitchen.meal_plan_count("user-1"), 1);
    }

    #[tokio::test]
    async fn add_honors_explicit_meal_type_and_date() {
        let kitchen = kitchen_with_recipe("user-1", "r1", "Shakshuka");

        let success = add_recipe_to_menu(
            kitchen.as_ref(),
            &json!({"recipeId": "r1", "mealType": "breakfast", "servingDate": "2026-09-01"}),
            "user-1",
        )
        .await
        .expect("add should succeed");

        assert_eq!(success.data["mealType"], "breakfast");
        assert_eq!(success.data["servingDate"], "2026-09-01");
    }

    #[tokio::test]
    async fn add_requires_recipe_id() {
        let kitchen = kitchen_with_recipe("user-1", "r1", "Carbonara");

        let err = add_recipe_to_menu(kitchen.as_ref(), &json!({}), "user-1")
            .await
            .expect_err("missing recipeId must fail");
        assert_eq!(err.to_string(), "recipeId is required");
        assert_eq!(kitchen.meal_plan_count("user-1"), 0);
    }

    #[tokio::test]
    async fn add_rejects_recipes_owned_by_someone_else() {
        let kitchen = kitchen_with_recipe("someone-else", "r1", "Carbonara");

        let err = add_recipe_to_menu(kitchen.as_ref(), &json!({"recipeId": "r1"}), "user-1")
            .await
            .expect_err("foreign recipe must fail");
        assert_eq!(err.to_string(), "Recipe not found or not owned by user");
    }

    #[tokio::test]
    async fn remove_round_trips_through_add() {
        let kitchen = kitchen_with_recipe("user-1", "r1", "Carbonara");
        let added = add_recipe_to_menu(kitchen.as_ref(), &json!({"recipeId": "r1"}), "user-1")
            .await
            .expect("add");
        let plan_id = added.data["mealPlanId"].as_str().expect("plan id").to_string();

        let removed = remove_recipe_from_menu(
            kitchen.as_ref(),
            &json!({"mealPlanId": plan_id}),
            "user-1",
        )
        .await
        .expect("remove should succeed");

        assert_eq!(removed.data["mealPlanId"], json!(plan_id));
        assert_eq!(kitchen.meal_plan_count("user-1"), 0);
    }

    #[tokio::test]
    async fn remove_fails_for_unknown_entry() {
        let kitchen = InMemoryKitchen::new();
        let err = remove_recipe_from_menu(&kitchen, &json!({"mealPlanId": "nope"}), "user-1")
            .await
            .expect_err("unknown entry must fail");
        assert_eq!(
            err.to_string(),
            "Meal plan entry not found or not owned by user"
        );
    }

    #[tokio::test]
    async fn list_projects_id_name_image_and_count() {
        let kitchen = kitchen_with_recipe("user-1", "r1", "Carbonara");
        kitchen.add_recipe(
            "user-1",
            Recipe {
                id: "r2".to_string(),
                name: "Arrabbiata".to_string(),
                image: None,
            },
        );
        kitchen.add_recipe(
            "someone-else",
            Recipe {
                id: "r9".to_string(),
                name: "Not yours".to_string(),
                image: None,
            },
        );

        let success = list_my_recipes(kitchen.as_ref(), "user-1")
            .await
            .expect("list should succeed");

        assert_eq!(success.data["count"], 2);
        let names: Vec<&str> = success.data["recipes"]
            .as_array()
            .expect("array")
            .iter()
            .map(|r| r["name"].as_str().expect("name"))
            .collect();
        assert_eq!(names, vec!["Arrabbiata", "Carbonara"]);
        assert_eq!(success.message, "You have 2 recipes.");
    }
}
