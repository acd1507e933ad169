use order_core::{CreateOrder, HealthResponse, Order};
use reqwest::{Response, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::{ClientConfig, OrderServiceError};

/// HTTP client for the order service.
///
/// Stateless between calls: one request per operation, no caching, no retry.
/// Cloning is cheap and clones share the connection pool.
#[derive(Debug, Clone)]
pub struct OrderServiceClient {
    http: reqwest::Client,
    base_url: Url,
}

impl OrderServiceClient {
    /// Build a client from an explicit configuration.
    pub fn new(config: ClientConfig) -> Result<Self, OrderServiceError> {
        let base_url = parse_base_url(&config.base_url)?;
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(OrderServiceError::Transport)?;
        Ok(Self { http, base_url })
    }

    /// The normalized service root.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /orders/` with `{agent_id, item}`.
    pub async fn create_order(
        &self,
        order: &CreateOrder,
        agent_id: &str,
    ) -> Result<Order, OrderServiceError> {
        let url = self.endpoint(&["orders", ""]);
        debug!(%url, agent_id, item = %order.item, "creating order");

        let resp = self
            .http
            .post(url)
            .json(&order.for_agent(agent_id))
            .send()
            .await
            .map_err(OrderServiceError::Transport)?;
        decode(resp).await
    }

    /// `GET /orders/agent_id/{agent_id}`. An agent without orders yields an empty list.
    pub async fn get_orders_by_agent_id(
        &self,
        agent_id: &str,
    ) -> Result<Vec<Order>, OrderServiceError> {
        let url = self.endpoint(&["orders", "agent_id", agent_id]);
        debug!(%url, "listing orders");

        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(OrderServiceError::Transport)?;
        decode(resp).await
    }

    /// `GET /orders/health`.
    pub async fn health(&self) -> Result<HealthResponse, OrderServiceError> {
        let url = self.endpoint(&["orders", "health"]);
        let resp = self
            .http
            .get(url)
            .send()
            .await
            .map_err(OrderServiceError::Transport)?;
        decode(resp).await
    }

    /// Append path segments to the base URL. Each segment is percent-encoded.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // parse_base_url rejects cannot-be-a-base URLs, so this always succeeds.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

fn parse_base_url(raw: &str) -> Result<Url, OrderServiceError> {
    let invalid = |reason: String| OrderServiceError::InvalidBaseUrl {
        url: raw.to_string(),
        reason,
    };

    let url = Url::parse(raw.trim()).map_err(|e| invalid(e.to_string()))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid(format!("unsupported scheme '{}'", url.scheme())));
    }
    if url.cannot_be_a_base() {
        return Err(invalid("not a base url".into()));
    }
    if url.query().is_some() || url.fragment().is_some() {
        return Err(invalid("query and fragment are not allowed".into()));
    }
    Ok(url)
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, OrderServiceError> {
    let status = resp.status();
    if !status.is_success() {
        let body = match resp.bytes().await {
            Ok(body) => body,
            Err(e) => {
                debug!(error = %e, "failed to read error body");
                Default::default()
            }
        };
        let err = OrderServiceError::from_status(status.as_u16(), &body);
        warn!(status = status.as_u16(), error = %err, "order service request failed");
        return Err(err);
    }

    resp.json::<T>().await.map_err(|e| {
        if e.is_decode() {
            OrderServiceError::Decode(e)
        } else {
            OrderServiceError::Transport(e)
        }
    })
}
