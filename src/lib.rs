//! Find recipes from the ingredients you have.
//!
//! A search is sent to the recipe backend, which ranks recipes and flags the
//! ingredients the user is missing. The result list can then be refined
//! locally, paged through, and kept in a session so it survives a restart.

pub mod annotate;
pub mod backend;
pub mod browser;
pub mod config;
pub mod error;
pub mod filter;
pub mod images;
pub mod ingredients;
pub mod model;
pub mod offline;
pub mod pagination;
pub mod search;
pub mod session;

pub use annotate::{annotate_ingredients, AnnotatedIngredient, RecipeCard};
pub use backend::{BackendClient, FilterRequest, Submission};
pub use browser::RecipeBrowser;
pub use error::CookbookError;
pub use filter::{filter_recipes, FilterCriteria, FilterOptions};
pub use images::{DishImageResolver, ImageLookup, ImageSearch, PixabayClient, PLACEHOLDER_IMAGE};
pub use ingredients::parse_ingredients;
pub use model::{MissingIngredients, Recipe};
pub use pagination::{paginate, PageSize, Pagination};
pub use search::{RecipeSearch, RecipeSearchBuilder};
pub use session::{FileStore, MemoryStore, SessionStore, Theme};

/// Submit comma-separated ingredients to a backend and return the recipes.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipes = thenu_cookbook::find_recipes(
///     "http://localhost:5000/api/dashboard",
///     "milk, sugar",
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
pub async fn find_recipes(endpoint: &str, ingredients: &str) -> Result<Vec<Recipe>, CookbookError> {
    let submission = RecipeSearch::builder()
        .endpoint(endpoint)
        .ingredients(ingredients)
        .submit()
        .await?;
    Ok(submission.recipes)
}
