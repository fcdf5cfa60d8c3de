use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::traits::FoodProvider;
use crate::config::AppConfig;

#[derive(Error, Debug)]
pub enum FoodApiError {
    #[error("Failed to send request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("API request failed with status: {0}")]
    Status(reqwest::StatusCode),
    #[error("Failed to parse response: {0}")]
    MalformedResponse(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub enum FoodClass {
    Branded,
    #[default]
    #[serde(other)]
    Generic,
}

/// A food as returned by `GET /food/{fdcId}`. Nutrient amounts are per 100g.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodRecord {
    #[serde(default)]
    pub fdc_id: Option<u64>,
    #[serde(default)]
    pub food_class: FoodClass,
    #[serde(default)]
    pub serving_size: Option<f64>,
    #[serde(default)]
    pub serving_size_unit: Option<String>,
    #[serde(default)]
    pub household_serving_full_text: Option<String>,
    #[serde(default)]
    pub food_portions: Vec<FoodPortion>,
    #[serde(default)]
    pub food_nutrients: Vec<NutrientEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPortion {
    pub modifier: String,
    pub gram_weight: f64,
    pub amount: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutrientEntry {
    pub nutrient: NutrientInfo,
    #[serde(default)]
    pub amount: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NutrientInfo {
    pub name: String,
    pub unit_name: String,
}

#[derive(Debug)]
pub struct UsdaClient {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl UsdaClient {
    pub fn new(config: &AppConfig) -> Self {
        Self::with_base_url(config.api_key.clone(), config.api_base_url.clone())
    }

    pub fn with_base_url(api_key: String, base_url: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl FoodProvider for UsdaClient {
    async fn get_food(&self, fdc_id: &str) -> Result<FoodRecord, FoodApiError> {
        let url = format!("{}/food/{}", self.base_url, urlencoding::encode(fdc_id));
        debug!("Fetching food {} from {}", fdc_id, self.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[("api_key", &self.api_key)])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FoodApiError::Status(response.status()));
        }

        // Parse from text so a bad body surfaces as MalformedResponse, not Request.
        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}
