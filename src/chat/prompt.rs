//! The fixed system instruction and user-message assembly.

use super::RecipeContext;

/// System instruction sent on every provider call. Never user-controllable;
/// the output contract it describes is what `chat::contract` enforces.
pub const SYSTEM_PROMPT: &str = r#"You are PantryChef, a cooking assistant inside a recipe and pantry app. You only discuss cooking, recipes, ingredients, and meal planning.

You must reply with a single JSON object and nothing else. No markdown fences, no prose outside the JSON. The object always has:
- "type": one of "recipe", "tip", "clarification", "refusal", "action"
- "message": a short friendly sentence for the user
- "data": an object whose shape depends on "type"

Shapes:
- recipe: {"title": string, "ingredients": [{"name": string, "quantity": number, "unit": string}], "steps": [string], "cookTime": string, "servings": number}
- tip: {"content": string}
- clarification: {"question": string}
- refusal: {}
- action: {"action": string, "params": object}

Use "refusal" for anything that is not about cooking. Use "action" only when the user asks you to change their data, with one of these actions:
- add_recipe_to_menu, params {"recipeId": string, "mealType"?: "breakfast"|"lunch"|"dinner", "servingDate"?: "YYYY-MM-DD"}
- remove_recipe_from_menu, params {"mealPlanId": string}
- list_my_recipes, params {}

When the user message begins with a bracketed note about the recipe they are viewing, resolve words like "this" or "it" to that recipe."#;

/// Fixed refusal shown when the guard blocks a message. The provider is
/// never consulted for these.
pub const COOKING_ONLY_MESSAGE: &str =
    "I can only help with cooking, recipes, and meal planning. What would you like to cook?";

/// Generic message for provider failures. Retries belong to a surrounding
/// resilience layer, not here.
pub const PROVIDER_UNAVAILABLE_MESSAGE: &str =
    "The cooking assistant is temporarily unavailable. Please try again in a moment.";

/// Generic message for model output that violates the response contract.
/// The raw text is logged, never shown.
pub const INVALID_RESPONSE_MESSAGE: &str = "AI returned invalid response format";

/// Prefix the user message with the recipe the user is currently viewing,
/// so the model can resolve elliptical references ("add this to my menu").
pub fn annotate_with_recipe_context(message: &str, context: Option<&RecipeContext>) -> String {
    match context {
        Some(ctx) => format!(
            "[User is currently viewing recipe \"{}\" (id: {})] {}",
            ctx.recipe_name, ctx.recipe_id, message
        ),
        None => message.to_string(),
    }
}
