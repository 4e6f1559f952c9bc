use crate::config::toml_config::ApiConfig;
use crate::domain::model::{FilterRequest, FilterResponse};
use crate::domain::ports::FilterClient;
use crate::utils::error::{Result, WhitelistError};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;

const SET_CALLER_ID_FILTERING: &str = "setCallerIDFiltering";

/// voip.ms REST API client.
pub struct VoipMsClient {
    client: Client,
    endpoint: String,
    username: String,
    password: String,
}

impl VoipMsClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            username: config.username.clone(),
            password: config.password.clone(),
        })
    }

    fn parse_response(http_status: u16, body: &str) -> Result<FilterResponse> {
        let json: Value = serde_json::from_str(body)?;

        let status = json
            .get("status")
            .and_then(Value::as_str)
            .ok_or_else(|| WhitelistError::ApiResponse {
                status: http_status,
                body: body.to_string(),
            })?
            .to_string();

        // filtering 可能是字串或數字
        let filter_id = match json.get("filtering") {
            Some(Value::String(id)) => Some(id.clone()),
            Some(Value::Number(id)) => Some(id.to_string()),
            _ => None,
        };

        Ok(FilterResponse { status, filter_id })
    }
}

#[async_trait]
impl FilterClient for VoipMsClient {
    async fn set_caller_id_filtering(&self, request: &FilterRequest) -> Result<FilterResponse> {
        tracing::debug!(
            "Making API request to: {} (method={}, callerid={})",
            self.endpoint,
            SET_CALLER_ID_FILTERING,
            request.callerid
        );

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("api_username", self.username.as_str()),
                ("api_password", self.password.as_str()),
                ("method", SET_CALLER_ID_FILTERING),
                ("filter", request.filter.as_deref().unwrap_or("")),
                ("callerid", request.callerid.as_str()),
                ("did", request.did.as_str()),
                ("routing", request.routing.as_str()),
                ("failover_unreachable", request.failover_unreachable.as_str()),
                ("failover_busy", request.failover_busy.as_str()),
                ("failover_noanswer", request.failover_noanswer.as_str()),
                ("note", request.note.as_str()),
            ])
            .send()
            .await?;

        let http_status = response.status();
        tracing::debug!("API response status: {}", http_status);

        let body = response.text().await?;
        if !http_status.is_success() {
            return Err(WhitelistError::ApiResponse {
                status: http_status.as_u16(),
                body,
            });
        }

        Self::parse_response(http_status.as_u16(), &body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{PhoneBookEntry, RoutingSettings};
    use httpmock::prelude::*;

    fn api_config(endpoint: String) -> ApiConfig {
        ApiConfig {
            endpoint,
            username: "me@example.com".to_string(),
            password: "secret".to_string(),
            timeout_seconds: 5,
        }
    }

    fn request() -> FilterRequest {
        let routing = RoutingSettings {
            target: "account:123456".to_string(),
            did: "all".to_string(),
            failover_unreachable: String::new(),
            failover_busy: "vm:100".to_string(),
            failover_noanswer: String::new(),
        };
        let entry = PhoneBookEntry {
            name: "Alice Tremblay".to_string(),
            number: "5145551234".to_string(),
        };
        FilterRequest::for_entry(&routing, &entry)
    }

    #[test]
    fn test_parse_numeric_and_string_ids() {
        let numeric = VoipMsClient::parse_response(200, r#"{"status":"success","filtering":18915}"#)
            .unwrap();
        assert_eq!(numeric.filter_id.as_deref(), Some("18915"));

        let text = VoipMsClient::parse_response(200, r#"{"status":"success","filtering":"18916"}"#)
            .unwrap();
        assert_eq!(text.filter_id.as_deref(), Some("18916"));

        let refused = VoipMsClient::parse_response(200, r#"{"status":"invalid_callerid"}"#).unwrap();
        assert_eq!(refused.status, "invalid_callerid");
        assert_eq!(refused.filter_id, None);
    }

    #[test]
    fn test_parse_rejects_body_without_status() {
        assert!(matches!(
            VoipMsClient::parse_response(200, r#"{"filtering":1}"#),
            Err(WhitelistError::ApiResponse { status: 200, .. })
        ));
        assert!(matches!(
            VoipMsClient::parse_response(200, "<html>"),
            Err(WhitelistError::SerializationError(_))
        ));
    }

    #[tokio::test]
    async fn test_sends_all_filter_parameters() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET)
                .path("/api/v1/rest.php")
                .query_param("api_username", "me@example.com")
                .query_param("api_password", "secret")
                .query_param("method", "setCallerIDFiltering")
                .query_param("filter", "")
                .query_param("callerid", "5145551234")
                .query_param("did", "all")
                .query_param("routing", "account:123456")
                .query_param("failover_unreachable", "")
                .query_param("failover_busy", "vm:100")
                .query_param("failover_noanswer", "")
                .query_param("note", "Alice Tremblay");
            then.status(200)
                .header("Content-Type", "application/json")
                .json_body(serde_json::json!({"status": "success", "filtering": 18915}));
        });

        let client = VoipMsClient::new(&api_config(server.url("/api/v1/rest.php"))).unwrap();
        let response = client.set_caller_id_filtering(&request()).await.unwrap();

        api_mock.assert();
        assert_eq!(response.status, "success");
        assert_eq!(response.filter_id.as_deref(), Some("18915"));
    }

    #[tokio::test]
    async fn test_http_error_is_reported() {
        let server = MockServer::start();
        let api_mock = server.mock(|when, then| {
            when.method(GET).path("/rest.php");
            then.status(500).body("internal error");
        });

        let client = VoipMsClient::new(&api_config(server.url("/rest.php"))).unwrap();
        let result = client.set_caller_id_filtering(&request()).await;

        api_mock.assert();
        match result {
            Err(WhitelistError::ApiResponse { status, body }) => {
                assert_eq!(status, 500);
                assert_eq!(body, "internal error");
            }
            other => panic!("expected ApiResponse, got {:?}", other),
        }
    }
}
