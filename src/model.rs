use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// A recipe as returned by the backend filter endpoint.
///
/// The backend is loosely typed, so ingestion is lenient: text fields may be
/// `null`, and time fields may be numbers, numeric strings or junk. Anything
/// that is not a finite number of minutes becomes `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "non_empty_text")]
    pub diet: Option<String>,
    #[serde(default, deserialize_with = "non_empty_text")]
    pub course: Option<String>,
    #[serde(default, deserialize_with = "non_empty_text")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub prep_time: Option<f64>,
    #[serde(default, deserialize_with = "lenient_minutes")]
    pub cook_time: Option<f64>,
    /// Comma-separated ingredient names, in display order
    #[serde(default, deserialize_with = "null_as_default")]
    pub ingredients: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub missing_ingredients: MissingIngredients,
    #[serde(default, deserialize_with = "non_empty_text")]
    pub youtube_link: Option<String>,
}

/// Ingredients the backend decided the user does not have
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MissingIngredients {
    #[serde(default, deserialize_with = "lenient_names")]
    pub missing_ingredients: Vec<String>,
}

impl Recipe {
    pub fn missing(&self) -> &[String] {
        &self.missing_ingredients.missing_ingredients
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn non_empty_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

/// Keeps text entries, stringifies numbers and drops anything else
fn lenient_names<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    let Some(Value::Array(items)) = value else {
        return Ok(Vec::new());
    };
    Ok(items
        .into_iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect())
}

fn lenient_minutes<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(parse_minutes))
}

/// Interpret a loosely typed JSON value as a number of minutes
pub fn parse_minutes(value: &Value) -> Option<f64> {
    let minutes = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }?;
    minutes.is_finite().then_some(minutes)
}

/// Response envelope of the backend filter endpoint
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterResponse {
    #[serde(default)]
    pub status: i64,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub payload: Option<FilterPayload>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FilterPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    pub filtered_recipes: Vec<Recipe>,
}

impl FilterResponse {
    pub fn is_success(&self) -> bool {
        self.status == 1
    }

    pub fn into_recipes(self) -> Vec<Recipe> {
        self.payload
            .map(|payload| payload.filtered_recipes)
            .unwrap_or_default()
    }
}
