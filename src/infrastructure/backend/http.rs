//! HTTP backend - JSON over `POST /chat`

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::application::errors::WidgetError;
use crate::domain::entities::{HistoryEntry, Product, ProductFilters};
use crate::domain::traits::{ChatBackend, ChatRequest};
use crate::infrastructure::config::BackendConfig;

/// Talks to the assistant server over HTTP
pub struct HttpBackend {
    client: Client,
    base_url: String,
    chat_path: String,
    history_path: String,
    search_path: String,
    knowledge_path: String,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Result<Self, WidgetError> {
        let mut builder = Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &BackendConfig) -> Self {
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            chat_path: config.chat_path.clone(),
            history_path: config.history_path.clone(),
            search_path: config.search_path.clone(),
            knowledge_path: config.knowledge_path.clone(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Turn a non-2xx response into an error, keeping the body for the logs
    async fn check_status(response: Response) -> Result<Response, WidgetError> {
        if response.status().is_success() {
            return Ok(response);
        }
        let status = response.status().as_u16();
        let body = response.text().await.unwrap_or_default();
        Err(WidgetError::Status { status, body })
    }
}

#[derive(Serialize, Debug)]
struct SearchRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    filters: Option<ProductFilters>,
}

#[derive(Serialize, Debug)]
struct KnowledgeRequest<'a> {
    query: &'a str,
}

#[derive(Deserialize, Debug)]
struct SearchReply {
    #[serde(default)]
    products: Vec<Product>,
}

#[derive(Deserialize, Debug)]
struct KnowledgeReply {
    #[serde(default)]
    information: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct ChatReply {
    response: Option<String>,
}

#[derive(Deserialize, Debug)]
struct HistoryReply {
    #[serde(default)]
    history: Vec<HistoryEntry>,
}

#[derive(Deserialize, Debug)]
struct ClearReply {
    message: Option<String>,
}

#[async_trait]
impl ChatBackend for HttpBackend {
    async fn send(&self, request: ChatRequest) -> Result<String, WidgetError> {
        let url = self.url(&self.chat_path);
        tracing::debug!("POST {} ({} chars)", url, request.content.chars().count());

        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        let response = Self::check_status(response).await?;

        let reply: ChatReply = response
            .json()
            .await
            .map_err(|e| WidgetError::Parse(e.to_string()))?;

        reply.response
            .ok_or_else(|| WidgetError::Parse("No response field in body".to_string()))
    }

    async fn history(&self) -> Result<Vec<HistoryEntry>, WidgetError> {
        let url = self.url(&self.history_path);
        tracing::debug!("GET {}", url);

        let response = self.client
            .get(&url)
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        let reply: HistoryReply = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| WidgetError::Parse(e.to_string()))?;

        Ok(reply.history)
    }

    async fn clear_history(&self) -> Result<String, WidgetError> {
        let url = self.url(&self.history_path);
        tracing::debug!("DELETE {}", url);

        let response = self.client
            .delete(&url)
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        let reply: ClearReply = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| WidgetError::Parse(e.to_string()))?;

        Ok(reply.message.unwrap_or_else(|| "Chat history cleared".to_string()))
    }

    async fn search_products(
        &self,
        query: &str,
        filters: Option<ProductFilters>,
    ) -> Result<Vec<Product>, WidgetError> {
        let url = self.url(&self.search_path);
        tracing::debug!("POST {} query={:?}", url, query);

        let request = SearchRequest {
            query,
            filters: filters.filter(|f| !f.is_empty()),
        };
        let response = self.client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        let reply: SearchReply = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| WidgetError::Parse(e.to_string()))?;

        Ok(reply.products)
    }

    async fn query_knowledge(&self, query: &str) -> Result<Vec<String>, WidgetError> {
        let url = self.url(&self.knowledge_path);
        tracing::debug!("POST {} query={:?}", url, query);

        let response = self.client
            .post(&url)
            .json(&KnowledgeRequest { query })
            .send()
            .await
            .map_err(|e| WidgetError::Network(e.to_string()))?;

        let reply: KnowledgeReply = Self::check_status(response)
            .await?
            .json()
            .await
            .map_err(|e| WidgetError::Parse(e.to_string()))?;

        Ok(reply.information)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn backend_for(server: &MockServer) -> HttpBackend {
        let config = BackendConfig {
            base_url: format!("{}/", server.uri()),
            ..BackendConfig::default()
        };
        HttpBackend::new(&config).expect("client")
    }

    #[tokio::test]
    async fn test_send_posts_content_and_reads_response() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(header("content-type", "application/json"))
            .and(body_json(json!({"content": "oi"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "Hello!"})))
            .expect(1)
            .mount(&server)
            .await;

        let reply = backend_for(&server).send(ChatRequest::new("oi")).await.unwrap();

        assert_eq!(reply, "Hello!");
    }

    #[tokio::test]
    async fn test_send_includes_context_when_present() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .and(body_json(json!({"content": "oi", "context": {"page": "cart"}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"response": "ok"})))
            .expect(1)
            .mount(&server)
            .await;

        let request = ChatRequest::new("oi").with_context(json!({"page": "cart"}));
        let reply = backend_for(&server).send(request).await.unwrap();

        assert_eq!(reply, "ok");
    }

    #[tokio::test]
    async fn test_send_non_success_status_is_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(
                ResponseTemplate::new(500)
                    .set_body_json(json!({"error": "Ocorreu um erro interno."})),
            )
            .mount(&server)
            .await;

        let err = backend_for(&server).send(ChatRequest::new("oi")).await.unwrap_err();

        match err {
            WidgetError::Status { status, body } => {
                assert_eq!(status, 500);
                assert!(body.contains("erro interno"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_send_missing_response_field_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "nope"})))
            .mount(&server)
            .await;

        let err = backend_for(&server).send(ChatRequest::new("oi")).await.unwrap_err();

        assert!(matches!(err, WidgetError::Parse(_)));
    }

    #[tokio::test]
    async fn test_send_malformed_body_is_parse_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&server)
            .await;

        let err = backend_for(&server).send(ChatRequest::new("oi")).await.unwrap_err();

        assert!(matches!(err, WidgetError::Parse(_)));
    }

    #[tokio::test]
    async fn test_send_unreachable_server_is_network_error() {
        let config = BackendConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            ..BackendConfig::default()
        };
        let backend = HttpBackend::new(&config).unwrap();

        let err = backend.send(ChatRequest::new("oi")).await.unwrap_err();

        assert!(matches!(err, WidgetError::Network(_)));
    }

    #[tokio::test]
    async fn test_history_decodes_entries() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/chat/history"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "history": [
                    {"user": "oi", "assistant": "Olá!", "timestamp": "2024-05-01T10:20:30.123456"},
                    {"user": "pedido 12345", "assistant": "Enviado"}
                ]
            })))
            .mount(&server)
            .await;

        let history = backend_for(&server).history().await.unwrap();

        assert_eq!(history.len(), 2);
        assert_eq!(history[0].user, "oi");
        assert!(history[0].timestamp.is_some());
        assert_eq!(history[1].assistant, "Enviado");
        assert!(history[1].timestamp.is_none());
    }

    #[tokio::test]
    async fn test_clear_history_returns_server_message() {
        let server = MockServer::start().await;

        Mock::given(method("DELETE"))
            .and(path("/chat/history"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({"message": "Chat history cleared"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let message = backend_for(&server).clear_history().await.unwrap();

        assert_eq!(message, "Chat history cleared");
    }

    #[tokio::test]
    async fn test_search_products_sends_query_and_filters() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search/products"))
            .and(body_json(json!({
                "query": "notebook",
                "filters": {"max_price": 5000.0, "category": "eletrônicos"}
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "products": [
                    {"id": 1, "nome": "Notebook Pro", "categoria": "eletrônicos",
                     "descricao": "16GB RAM", "preco": 4999.9}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let filters = ProductFilters {
            max_price: Some(5000.0),
            category: Some("eletrônicos".to_string()),
            ..ProductFilters::default()
        };
        let products = backend_for(&server)
            .search_products("notebook", Some(filters))
            .await
            .unwrap();

        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Notebook Pro");
        assert_eq!(products[0].price, 4999.9);
    }

    #[tokio::test]
    async fn test_search_products_omits_empty_filters() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/search/products"))
            .and(body_json(json!({"query": "panela"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"products": []})))
            .expect(1)
            .mount(&server)
            .await;

        let products = backend_for(&server)
            .search_products("panela", Some(ProductFilters::default()))
            .await
            .unwrap();

        assert!(products.is_empty());
    }

    #[tokio::test]
    async fn test_query_knowledge_returns_information() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/query/knowledge"))
            .and(body_json(json!({"query": "troca"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "information": ["Você tem até 7 dias corridos para solicitar a troca"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let info = backend_for(&server).query_knowledge("troca").await.unwrap();

        assert_eq!(info, vec!["Você tem até 7 dias corridos para solicitar a troca".to_string()]);
    }

    #[tokio::test]
    async fn test_query_knowledge_server_error() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/query/knowledge"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({"error": "boom"})))
            .mount(&server)
            .await;

        let err = backend_for(&server).query_knowledge("troca").await.unwrap_err();

        assert!(matches!(err, WidgetError::Status { status: 500, .. }));
    }
}
