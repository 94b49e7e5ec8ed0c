use std::time::Duration;

use crate::backend::{BackendClient, FilterRequest, Submission};
use crate::filter::FilterCriteria;
use crate::ingredients::parse_ingredients;
use crate::session::{KeyValueStore, SessionStore};
use crate::CookbookError;

/// Builder for configuring and submitting a recipe search
#[derive(Debug, Default)]
pub struct RecipeSearchBuilder {
    endpoint: Option<String>,
    ingredients: Option<String>,
    criteria: FilterCriteria,
    timeout: Option<Duration>,
}

impl RecipeSearchBuilder {
    /// Set the backend filter endpoint
    pub fn endpoint(mut self, url: impl Into<String>) -> Self {
        self.endpoint = Some(url.into());
        self
    }

    /// Set the ingredients the user has, comma separated
    ///
    /// # Example
    /// ```
    /// use thenu_cookbook::RecipeSearch;
    ///
    /// let builder = RecipeSearch::builder()
    ///     .ingredients("milk, sugar, ghee");
    /// ```
    pub fn ingredients(mut self, raw: impl Into<String>) -> Self {
        self.ingredients = Some(raw.into());
        self
    }

    /// Only recipes whose name contains this text
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.criteria.name = Some(name.into());
        self
    }

    pub fn diet(mut self, diet: impl Into<String>) -> Self {
        self.criteria.diet = Some(diet.into());
        self
    }

    pub fn course(mut self, course: impl Into<String>) -> Self {
        self.criteria.course = Some(course.into());
        self
    }

    pub fn state(mut self, state: impl Into<String>) -> Self {
        self.criteria.state = Some(state.into());
        self
    }

    /// Maximum preparation time in minutes
    pub fn prep_time(mut self, minutes: f64) -> Self {
        self.criteria.prep_time = Some(minutes);
        self
    }

    /// Maximum cooking time in minutes
    pub fn cook_time(mut self, minutes: f64) -> Self {
        self.criteria.cook_time = Some(minutes);
        self
    }

    /// Replace all criteria at once
    pub fn criteria(mut self, criteria: FilterCriteria) -> Self {
        self.criteria = criteria;
        self
    }

    /// Set a timeout for the backend request
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Validate the input and produce the request body
    ///
    /// # Errors
    /// Returns `CookbookError::InvalidInput` if no ingredient remains after
    /// parsing or a time bound is negative.
    pub fn request(&self) -> Result<FilterRequest, CookbookError> {
        let ingredients = parse_ingredients(self.ingredients.as_deref().unwrap_or_default());
        if ingredients.is_empty() {
            return Err(CookbookError::InvalidInput(
                "Ingredients are required".to_string(),
            ));
        }

        for bound in [self.criteria.prep_time, self.criteria.cook_time]
            .into_iter()
            .flatten()
        {
            if !bound.is_finite() || bound < 0.0 {
                return Err(CookbookError::InvalidInput("Must be >= 0".to_string()));
            }
        }

        Ok(FilterRequest {
            criteria: self.criteria.clone(),
            ingredients,
        })
    }

    /// Submit the search to the backend
    ///
    /// # Example
    /// ```no_run
    /// # use thenu_cookbook::RecipeSearch;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let submission = RecipeSearch::builder()
    ///     .endpoint("http://localhost:5000/api/dashboard")
    ///     .ingredients("milk, sugar")
    ///     .diet("vegetarian")
    ///     .submit()
    ///     .await?;
    /// println!("{}", submission.message);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn submit(self) -> Result<Submission, CookbookError> {
        let request = self.request()?;
        let endpoint = self.endpoint.ok_or_else(|| {
            CookbookError::InvalidInput("No backend endpoint specified".to_string())
        })?;

        let client = BackendClient::new(endpoint, self.timeout)?;
        client.submit(&request).await
    }

    /// Submit and persist the results and the selected ingredients
    pub async fn submit_and_remember<S: KeyValueStore>(
        self,
        session: &mut SessionStore<S>,
    ) -> Result<(Vec<String>, Submission), CookbookError> {
        let ingredients = self.request()?.ingredients;
        let submission = self.submit().await?;
        session.remember(&ingredients, &submission.recipes);
        Ok((ingredients, submission))
    }
}

/// Main entry point for the builder API
pub struct RecipeSearch;

impl RecipeSearch {
    /// Creates a new builder for a recipe search
    pub fn builder() -> RecipeSearchBuilder {
        RecipeSearchBuilder::default()
    }
}
