//! Local refinement of an already-fetched recipe list.

use serde::{Deserialize, Serialize};

use crate::ingredients::normalize_token;
use crate::model::Recipe;

/// User-selected filters. Every field is optional and an unset, empty or
/// whitespace-only value places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub course: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    /// Maximum preparation time in minutes, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prep_time: Option<f64>,
    /// Maximum cooking time in minutes, inclusive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cook_time: Option<f64>,
}

impl FilterCriteria {
    /// True when no field constrains the result
    pub fn is_empty(&self) -> bool {
        active_text(&self.name).is_none()
            && active_text(&self.diet).is_none()
            && active_text(&self.course).is_none()
            && active_text(&self.state).is_none()
            && self.prep_time.is_none()
            && self.cook_time.is_none()
    }

    pub fn reset(&mut self) {
        *self = FilterCriteria::default();
    }

    /// Check a single recipe against every active criterion
    pub fn matches(&self, recipe: &Recipe) -> bool {
        if let Some(query) = active_text(&self.name) {
            if !normalize_token(&recipe.name).contains(&normalize_token(query)) {
                return false;
            }
        }

        if !within_bound(recipe.prep_time, self.prep_time) {
            return false;
        }
        if !within_bound(recipe.cook_time, self.cook_time) {
            return false;
        }

        if !equals_folded(&self.diet, &recipe.diet) {
            return false;
        }
        if !equals_folded(&self.course, &recipe.course) {
            return false;
        }

        // Exact match: state names come from the backend in canonical capitalization
        if let Some(wanted) = active_text(&self.state) {
            let actual = recipe.state.as_deref().map(str::trim).unwrap_or_default();
            if actual != wanted.trim() {
                return false;
            }
        }

        true
    }
}

fn active_text(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn equals_folded(wanted: &Option<String>, actual: &Option<String>) -> bool {
    match active_text(wanted) {
        Some(wanted) => {
            let actual = actual.as_deref().map(normalize_token).unwrap_or_default();
            actual == normalize_token(wanted)
        }
        None => true,
    }
}

fn within_bound(value: Option<f64>, bound: Option<f64>) -> bool {
    match bound {
        Some(max) => matches!(value, Some(minutes) if minutes <= max),
        None => true,
    }
}

/// Keep the recipes that satisfy every active criterion, in their original order.
pub fn filter_recipes(recipes: &[Recipe], criteria: &FilterCriteria) -> Vec<Recipe> {
    recipes
        .iter()
        .filter(|recipe| criteria.matches(recipe))
        .cloned()
        .collect()
}

/// Distinct values present in a result set, used to offer filter choices.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterOptions {
    /// Lower-cased diets
    pub diets: Vec<String>,
    /// Lower-cased courses
    pub courses: Vec<String>,
    /// States as spelled by the backend
    pub states: Vec<String>,
}

impl FilterOptions {
    pub fn from_recipes(recipes: &[Recipe]) -> Self {
        let mut options = FilterOptions::default();
        for recipe in recipes {
            push_distinct(
                &mut options.diets,
                recipe.diet.as_deref().map(normalize_token),
            );
            push_distinct(
                &mut options.courses,
                recipe.course.as_deref().map(normalize_token),
            );
            push_distinct(
                &mut options.states,
                recipe.state.as_deref().map(|s| s.trim().to_string()),
            );
        }
        options
    }
}

fn push_distinct(values: &mut Vec<String>, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        if !values.contains(&value) {
            values.push(value);
        }
    }
}

/// Upper-case the first character, for option labels like "Main course"
pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
