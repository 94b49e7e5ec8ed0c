//! Session persistence.
//!
//! The last search (ingredients and results), the theme preference and the
//! intro-tour flag live in a small key-value store so a restart does not lose
//! context. Values are strings; lists are stored as JSON arrays.
//!
//! Reads never fail: a missing, unreadable or corrupt value reads as empty.
//! Writes through [`SessionStore::remember`] are best-effort.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::error::CookbookError;
use crate::model::Recipe;

pub const THEME_KEY: &str = "theme";
pub const TOUR_SEEN_KEY: &str = "intro_tour_seen";
pub const SELECTED_INGREDIENTS_KEY: &str = "selectedIngredients";
pub const FILTERED_RECIPES_KEY: &str = "filtered_recipes";

const SESSION_FILENAME: &str = "session.json";

/// String key-value storage backing a session
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, CookbookError>;
    fn set(&mut self, key: &str, value: String) -> Result<(), CookbookError>;
    fn remove(&mut self, key: &str) -> Result<(), CookbookError>;
}

/// In-memory store, used for tests and one-shot runs
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, CookbookError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), CookbookError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), CookbookError> {
        self.values.remove(key);
        Ok(())
    }
}

/// Store kept as a single JSON object in `<dir>/session.json`
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn path(&self) -> PathBuf {
        self.dir.join(SESSION_FILENAME)
    }

    fn load(&self) -> Result<BTreeMap<String, String>, CookbookError> {
        let path = self.path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// A corrupt file is replaced rather than blocking every later write
    fn load_or_discard(&self) -> BTreeMap<String, String> {
        self.load().unwrap_or_else(|e| {
            warn!("Discarding unreadable session file: {}", e);
            BTreeMap::new()
        })
    }

    fn save(&self, values: &BTreeMap<String, String>) -> Result<(), CookbookError> {
        ensure_dir(&self.dir)?;
        let content = serde_json::to_string_pretty(values)?;
        fs::write(self.path(), content)?;
        Ok(())
    }
}

fn ensure_dir(path: &Path) -> Result<(), CookbookError> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }
    Ok(())
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, CookbookError> {
        Ok(self.load()?.remove(key))
    }

    fn set(&mut self, key: &str, value: String) -> Result<(), CookbookError> {
        let mut values = self.load_or_discard();
        values.insert(key.to_string(), value);
        self.save(&values)
    }

    fn remove(&mut self, key: &str) -> Result<(), CookbookError> {
        match self.load() {
            Ok(mut values) => {
                if values.remove(key).is_some() {
                    self.save(&values)?;
                }
                Ok(())
            }
            Err(e) => {
                warn!("Discarding unreadable session file: {}", e);
                self.save(&BTreeMap::new())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    /// Explicit preference wins, then the system setting, then dark
    pub fn resolve(stored: Option<Theme>, system: Option<Theme>) -> Theme {
        stored.or(system).unwrap_or(Theme::Dark)
    }
}

impl FromStr for Theme {
    type Err = CookbookError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            other => Err(CookbookError::InvalidInput(format!(
                "Theme must be \"light\" or \"dark\" (got {:?})",
                other
            ))),
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Results handed over directly by the search that produced them
#[derive(Debug, Clone, Default)]
pub struct NavigationState {
    pub recipes: Vec<Recipe>,
    pub ingredients: Vec<String>,
}

/// What the result list should show after combining fresh and persisted data
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedSession {
    pub recipes: Vec<Recipe>,
    pub ingredients: Vec<String>,
}

/// Session data over any [`KeyValueStore`]
#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    store: S,
}

impl<S: KeyValueStore> SessionStore<S> {
    pub fn new(store: S) -> Self {
        SessionStore { store }
    }

    pub fn into_inner(self) -> S {
        self.store
    }

    fn read_list<T: DeserializeOwned>(&self, key: &str) -> Vec<T> {
        let raw = match self.store.get(key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!("Could not read '{}' from session: {}", key, e);
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(values) => values,
            Err(e) => {
                warn!("Ignoring corrupt '{}' in session: {}", key, e);
                Vec::new()
            }
        }
    }

    fn write_list<T: serde::Serialize>(&mut self, key: &str, values: &[T]) -> Result<(), CookbookError> {
        let raw = serde_json::to_string(values)?;
        self.store.set(key, raw)
    }

    pub fn selected_ingredients(&self) -> Vec<String> {
        self.read_list(SELECTED_INGREDIENTS_KEY)
    }

    pub fn set_selected_ingredients(&mut self, ingredients: &[String]) -> Result<(), CookbookError> {
        self.write_list(SELECTED_INGREDIENTS_KEY, ingredients)
    }

    pub fn filtered_recipes(&self) -> Vec<Recipe> {
        self.read_list(FILTERED_RECIPES_KEY)
    }

    pub fn set_filtered_recipes(&mut self, recipes: &[Recipe]) -> Result<(), CookbookError> {
        self.write_list(FILTERED_RECIPES_KEY, recipes)
    }

    /// Persist the outcome of a search, logging instead of failing
    pub fn remember(&mut self, ingredients: &[String], recipes: &[Recipe]) {
        if let Err(e) = self.set_selected_ingredients(ingredients) {
            warn!("Could not persist selected ingredients: {}", e);
        }
        if let Err(e) = self.set_filtered_recipes(recipes) {
            warn!("Could not persist filtered recipes: {}", e);
        }
        debug!(
            "Remembered {} ingredients and {} recipes",
            ingredients.len(),
            recipes.len()
        );
    }

    /// Forget the last search
    pub fn clear(&mut self) -> Result<(), CookbookError> {
        self.store.remove(SELECTED_INGREDIENTS_KEY)?;
        self.store.remove(FILTERED_RECIPES_KEY)
    }

    /// Prefer what the search handed over, fall back to the persisted copy.
    /// Recipes and ingredients are resolved independently.
    pub fn resolve(&self, navigation: Option<NavigationState>) -> ResolvedSession {
        let navigation = navigation.unwrap_or_default();

        let recipes = if navigation.recipes.is_empty() {
            self.filtered_recipes()
        } else {
            navigation.recipes
        };
        let ingredients = if navigation.ingredients.is_empty() {
            self.selected_ingredients()
        } else {
            navigation.ingredients
        };

        ResolvedSession {
            recipes,
            ingredients,
        }
    }

    /// Stored theme preference; unknown values count as none
    pub fn theme(&self) -> Option<Theme> {
        match self.store.get(THEME_KEY) {
            Ok(value) => value.and_then(|v| v.parse().ok()),
            Err(e) => {
                warn!("Could not read theme preference: {}", e);
                None
            }
        }
    }

    pub fn set_theme(&mut self, theme: Theme) -> Result<(), CookbookError> {
        self.store.set(THEME_KEY, theme.as_str().to_string())
    }

    /// Flip the effective theme and record it as an explicit preference
    pub fn toggle_theme(&mut self, system: Option<Theme>) -> Result<Theme, CookbookError> {
        let next = Theme::resolve(self.theme(), system).toggled();
        self.set_theme(next)?;
        Ok(next)
    }

    pub fn tour_seen(&self) -> bool {
        matches!(self.store.get(TOUR_SEEN_KEY), Ok(Some(v)) if v == "true")
    }

    pub fn mark_tour_seen(&mut self) -> Result<(), CookbookError> {
        self.store.set(TOUR_SEEN_KEY, "true".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn recipe(name: &str) -> Recipe {
        Recipe {
            name: name.to_string(),
            ingredients: "Milk, Sugar".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_session_reads_empty() {
        let session = SessionStore::new(MemoryStore::default());
        assert!(session.selected_ingredients().is_empty());
        assert!(session.filtered_recipes().is_empty());
        assert_eq!(session.theme(), None);
        assert!(!session.tour_seen());
    }

    #[test]
    fn test_remember_and_read_back() {
        let mut session = SessionStore::new(MemoryStore::default());
        let ingredients = vec!["milk".to_string(), "sugar".to_string()];
        session.remember(&ingredients, &[recipe("Kheer")]);

        assert_eq!(session.selected_ingredients(), ingredients);
        assert_eq!(session.filtered_recipes(), vec![recipe("Kheer")]);
    }

    #[test]
    fn test_corrupt_values_read_as_empty() {
        let mut store = MemoryStore::default();
        store
            .set(FILTERED_RECIPES_KEY, "{not json".to_string())
            .unwrap();
        store
            .set(SELECTED_INGREDIENTS_KEY, "{\"milk\": true}".to_string())
            .unwrap();

        let session = SessionStore::new(store);
        assert!(session.filtered_recipes().is_empty());
        assert!(session.selected_ingredients().is_empty());
    }

    #[test]
    fn test_resolve_prefers_navigation_state() {
        let mut session = SessionStore::new(MemoryStore::default());
        session.remember(&["rice".to_string()], &[recipe("Old")]);

        let resolved = session.resolve(Some(NavigationState {
            recipes: vec![recipe("Fresh")],
            ingredients: Vec::new(),
        }));

        assert_eq!(resolved.recipes, vec![recipe("Fresh")]);
        // Ingredients fall back on their own
        assert_eq!(resolved.ingredients, vec!["rice".to_string()]);
    }

    #[test]
    fn test_resolve_without_anything_is_empty() {
        let session = SessionStore::new(MemoryStore::default());
        assert_eq!(session.resolve(None), ResolvedSession::default());
    }

    #[test]
    fn test_clear_forgets_last_search() {
        let mut session = SessionStore::new(MemoryStore::default());
        session.remember(&["rice".to_string()], &[recipe("Pulao")]);
        session.set_theme(Theme::Light).unwrap();
        session.clear().unwrap();

        assert!(session.filtered_recipes().is_empty());
        assert!(session.selected_ingredients().is_empty());
        assert_eq!(session.theme(), Some(Theme::Light));
    }

    #[test]
    fn test_unknown_theme_value_is_ignored() {
        let mut store = MemoryStore::default();
        store.set(THEME_KEY, "sepia".to_string()).unwrap();
        let session = SessionStore::new(store);
        assert_eq!(session.theme(), None);
    }

    #[test]
    fn test_toggle_theme_records_preference() {
        let mut session = SessionStore::new(MemoryStore::default());
        assert_eq!(session.toggle_theme(Some(Theme::Light)).unwrap(), Theme::Dark);
        assert_eq!(session.theme(), Some(Theme::Dark));
        assert_eq!(session.toggle_theme(None).unwrap(), Theme::Light);
    }

    #[test]
    fn test_theme_resolution_order() {
        assert_eq!(Theme::resolve(None, None), Theme::Dark);
        assert_eq!(Theme::resolve(None, Some(Theme::Light)), Theme::Light);
        assert_eq!(Theme::resolve(Some(Theme::Dark), Some(Theme::Light)), Theme::Dark);
    }

    #[test]
    fn test_tour_flag() {
        let mut session = SessionStore::new(MemoryStore::default());
        session.mark_tour_seen().unwrap();
        assert!(session.tour_seen());
    }
}
