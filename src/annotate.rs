use std::borrow::Cow;
use std::collections::HashSet;

use url::Url;

use crate::error::CookbookError;
use crate::filter::capitalize;
use crate::ingredients::{normalize_token, split_ingredients};
use crate::model::Recipe;

/// Names longer than this are shortened for display
pub const DISPLAY_NAME_LIMIT: usize = 32;
/// Characters kept from a shortened name, before the ellipsis
pub const DISPLAY_NAME_PREFIX: usize = 29;

const LOOKUP_BASE_URL: &str = "https://www.google.com/search";

/// One ingredient of a recipe, flagged as available or missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnnotatedIngredient {
    /// Name as written in the recipe, trimmed but otherwise untouched
    pub name: String,
    pub is_missing: bool,
}

impl AnnotatedIngredient {
    /// Name shortened for rendering. Lookups must use `name` instead.
    pub fn display_name(&self) -> Cow<'_, str> {
        if self.name.chars().count() > DISPLAY_NAME_LIMIT {
            let prefix: String = self.name.chars().take(DISPLAY_NAME_PREFIX).collect();
            Cow::Owned(format!("{}...", prefix))
        } else {
            Cow::Borrowed(&self.name)
        }
    }

    /// Web search link explaining what the ingredient is
    pub fn lookup_url(&self) -> Result<Url, CookbookError> {
        let query = format!("what is {}", self.name);
        Ok(Url::parse_with_params(LOOKUP_BASE_URL, &[("q", query)])?)
    }
}

/// Split a recipe's ingredient string and flag each entry against the
/// backend's missing list. Matching ignores case and surrounding whitespace.
pub fn annotate_ingredients<S: AsRef<str>>(raw: &str, missing: &[S]) -> Vec<AnnotatedIngredient> {
    let missing: HashSet<String> = missing
        .iter()
        .map(|name| normalize_token(name.as_ref()))
        .filter(|name| !name.is_empty())
        .collect();

    split_ingredients(raw)
        .into_iter()
        .map(|name| AnnotatedIngredient {
            name: name.to_string(),
            is_missing: missing.contains(&normalize_token(name)),
        })
        .collect()
}

/// Everything needed to render one recipe in a result list
#[derive(Debug, Clone, PartialEq)]
pub struct RecipeCard {
    pub name: String,
    pub diet_label: String,
    pub is_vegetarian: bool,
    pub course_label: String,
    pub state_label: String,
    pub prep_label: String,
    pub cook_label: String,
    pub ingredients: Vec<AnnotatedIngredient>,
    pub youtube_link: Option<String>,
}

impl RecipeCard {
    pub fn from_recipe(recipe: &Recipe) -> Self {
        let diet = recipe
            .diet
            .as_deref()
            .map(normalize_token)
            .unwrap_or_default();

        RecipeCard {
            name: recipe.name.clone(),
            diet_label: if diet.is_empty() {
                "Unknown".to_string()
            } else {
                capitalize(&diet)
            },
            is_vegetarian: diet == "vegetarian",
            course_label: recipe
                .course
                .clone()
                .unwrap_or_else(|| "Unknown course".to_string()),
            state_label: recipe
                .state
                .clone()
                .unwrap_or_else(|| "Unknown state".to_string()),
            prep_label: minutes_label(recipe.prep_time),
            cook_label: minutes_label(recipe.cook_time),
            ingredients: annotate_ingredients(&recipe.ingredients, recipe.missing()),
            youtube_link: recipe.youtube_link.clone(),
        }
    }

    pub fn missing_count(&self) -> usize {
        self.ingredients.iter().filter(|i| i.is_missing).count()
    }
}

fn minutes_label(minutes: Option<f64>) -> String {
    match minutes {
        Some(m) => format!("{} min", m),
        None => "? min".to_string(),
    }
}
