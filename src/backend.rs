use std::time::Duration;

use log::{debug, info, warn};
use reqwest::Client;
use serde::Serialize;

use crate::error::CookbookError;
use crate::filter::FilterCriteria;
use crate::model::{FilterResponse, Recipe};

/// Shown when the backend succeeds without a message of its own
pub const DEFAULT_SUCCESS_MESSAGE: &str = "Recipes filtered successfully";

/// Body posted to the backend filter endpoint. Unset criteria are omitted.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterRequest {
    #[serde(flatten)]
    pub criteria: FilterCriteria,
    /// Normalized ingredient names
    pub ingredients: Vec<String>,
}

/// A successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct Submission {
    pub message: String,
    pub recipes: Vec<Recipe>,
}

/// Client for the application backend that ranks recipes by ingredients
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    endpoint: String,
}

impl BackendClient {
    pub fn new(endpoint: impl Into<String>, timeout: Option<Duration>) -> Result<Self, CookbookError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("thenu-cookbook/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(BackendClient {
            client,
            endpoint: endpoint.into(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Post a request and decode the response envelope as-is
    pub async fn send(&self, request: &FilterRequest) -> Result<FilterResponse, CookbookError> {
        debug!("POST {} {:?}", self.endpoint, request);

        let response = self
            .client
            .post(&self.endpoint)
            .json(request)
            .send()
            .await?
            .error_for_status()?;

        let body: FilterResponse = response.json().await?;
        debug!("Backend answered with status {}", body.status);
        Ok(body)
    }

    /// Submit a search. Anything but status 1 is a rejection carrying the
    /// backend's message.
    pub async fn submit(&self, request: &FilterRequest) -> Result<Submission, CookbookError> {
        let response = self.send(request).await?;

        if !response.is_success() {
            let message = response.message.unwrap_or_default();
            warn!("Backend rejected search: {}", message);
            return Err(CookbookError::Rejected(message));
        }

        let message = response
            .message
            .clone()
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_SUCCESS_MESSAGE.to_string());
        let recipes = response.into_recipes();
        info!("Backend returned {} recipes", recipes.len());

        Ok(Submission { message, recipes })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_omits_unset_criteria() {
        let request = FilterRequest {
            criteria: FilterCriteria {
                diet: Some("vegetarian".to_string()),
                prep_time: Some(30.0),
                ..Default::default()
            },
            ingredients: vec!["milk".to_string(), "sugar".to_string()],
        };

        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            json!({
                "diet": "vegetarian",
                "prep_time": 30.0,
                "ingredients": ["milk", "sugar"]
            })
        );
    }

    #[test]
    fn test_client_keeps_endpoint() {
        let client = BackendClient::new("http://localhost:5000/api/dashboard", None).unwrap();
        assert_eq!(client.endpoint(), "http://localhost:5000/api/dashboard");
    }
}
