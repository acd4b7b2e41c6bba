//! Client for the customer endpoints.

use clientele_core::models::customer::{CreateCustomer, UpdateCustomer};
use reqwest::Response;
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::config::ViewConfig;
use crate::error::{ViewError, ViewResult};
use crate::record::CustomerRecord;

/// The customer endpoints as seen from a view.
pub trait CustomerApi: Send + Sync {
    fn list(&self) -> impl Future<Output = ViewResult<Vec<CustomerRecord>>> + Send;
    fn get(&self, id: &str) -> impl Future<Output = ViewResult<CustomerRecord>> + Send;
    fn create(
        &self,
        input: &CreateCustomer,
    ) -> impl Future<Output = ViewResult<CustomerRecord>> + Send;
    fn update(
        &self,
        id: &str,
        input: &UpdateCustomer,
    ) -> impl Future<Output = ViewResult<CustomerRecord>> + Send;
    fn delete(&self, id: &str) -> impl Future<Output = ViewResult<()>> + Send;
}

/// Body of an endpoint error response.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// [`CustomerApi`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpCustomerApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpCustomerApi {
    /// `base_url` includes the API prefix, e.g. `http://localhost:3000/api`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn from_config(config: &ViewConfig) -> Self {
        Self::new(config.api_url.clone())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn collection_url(&self) -> String {
        format!("{}/customer", self.base_url)
    }

    fn item_url(&self, id: &str) -> String {
        format!("{}/customer/{id}", self.base_url)
    }
}

/// Decode a success body, or turn a non-success status into
/// [`ViewError::Status`] carrying the endpoint's error text.
async fn read_json<T: DeserializeOwned>(response: Response) -> ViewResult<T> {
    let status = response.status();
    if !status.is_success() {
        let message = match response.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => status
                .canonical_reason()
                .unwrap_or("unexpected response")
                .to_string(),
        };
        return Err(ViewError::Status {
            status: status.as_u16(),
            message,
        });
    }
    Ok(response.json().await?)
}

impl CustomerApi for HttpCustomerApi {
    async fn list(&self) -> ViewResult<Vec<CustomerRecord>> {
        let response = self.client.get(self.collection_url()).send().await?;
        read_json(response).await
    }

    async fn get(&self, id: &str) -> ViewResult<CustomerRecord> {
        let response = self.client.get(self.item_url(id)).send().await?;
        read_json(response).await
    }

    async fn create(&self, input: &CreateCustomer) -> ViewResult<CustomerRecord> {
        let response = self
            .client
            .post(self.collection_url())
            .json(input)
            .send()
            .await?;
        read_json(response).await
    }

    async fn update(&self, id: &str, input: &UpdateCustomer) -> ViewResult<CustomerRecord> {
        let response = self
            .client
            .put(self.item_url(id))
            .json(input)
            .send()
            .await?;
        read_json(response).await
    }

    async fn delete(&self, id: &str) -> ViewResult<()> {
        let response = self.client.delete(self.item_url(id)).send().await?;
        read_json::<serde_json::Value>(response).await?;
        Ok(())
    }
}
