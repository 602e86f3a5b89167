use async_trait::async_trait;
use serde::Serialize;

use crate::application::errors::WidgetError;
use crate::domain::entities::{HistoryEntry, Product, ProductFilters};

/// Outbound chat payload
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<serde_json::Value>,
}

impl ChatRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: serde_json::Value) -> Self {
        self.context = Some(context);
        self
    }
}

/// ChatBackend trait - abstraction for the remote assistant
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one user message and return the assistant's reply
    async fn send(&self, request: ChatRequest) -> Result<String, WidgetError>;

    /// Fetch the server-side conversation history
    async fn history(&self) -> Result<Vec<HistoryEntry>, WidgetError>;

    /// Clear the server-side conversation history
    async fn clear_history(&self) -> Result<String, WidgetError>;

    /// Search the store catalog
    async fn search_products(
        &self,
        query: &str,
        filters: Option<ProductFilters>,
    ) -> Result<Vec<Product>, WidgetError>;

    /// Look up store knowledge (policies, shipping, returns)
    async fn query_knowledge(&self, query: &str) -> Result<Vec<String>, WidgetError>;
}
