use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use super::FollowService;
use crate::{config::ApiConfig, error::AppError, models::ShowId};

pub struct HttpFollowClient {
    client: Client,
    follow_url: String,
}

impl HttpFollowClient {
    pub fn new(config: &ApiConfig) -> Result<Self, AppError> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            follow_url: format!("{}/follow", config.base_url.trim_end_matches('/')),
        })
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct UnfollowRequest<'a> {
    show_id: ShowId,
    token: Option<&'a str>,
}

#[async_trait]
impl FollowService for HttpFollowClient {
    fn name(&self) -> &'static str {
        "TV Minder"
    }

    async fn unfollow(&self, show_id: ShowId, token: Option<String>) -> Result<(), AppError> {
        let body = UnfollowRequest {
            show_id,
            token: token.as_deref(),
        };

        let response = self.client
            .delete(&self.follow_url)
            .json(&body)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AppError::RemoteStatus(response.status()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::{Matcher, Server};
    use serde_json::json;

    fn api_config(base_url: String) -> ApiConfig {
        ApiConfig {
            base_url,
            timeout_ms: 8000,
        }
    }

    #[tokio::test]
    async fn test_unfollow_sends_delete_with_show_and_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/follow")
            .match_header("content-type", "application/json")
            .match_body(Matcher::Json(json!({ "showId": 1399, "token": "jwt-token" })))
            .with_status(200)
            .create_async()
            .await;

        let client = HttpFollowClient::new(&api_config(server.url())).unwrap();
        let result = client.unfollow(1399, Some("jwt-token".to_string())).await;

        assert!(result.is_ok());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_missing_token_is_sent_as_null() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("DELETE", "/api/follow")
            .match_body(Matcher::Json(json!({ "showId": 7, "token": null })))
            .with_status(204)
            .create_async()
            .await;

        let client = HttpFollowClient::new(&api_config(format!("{}/api/", server.url()))).unwrap();
        client.unfollow(7, None).await.unwrap();

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/follow")
            .with_status(500)
            .create_async()
            .await;

        let client = HttpFollowClient::new(&api_config(server.url())).unwrap();
        let result = client.unfollow(1, Some("jwt".to_string())).await;

        assert!(matches!(
            result,
            Err(AppError::RemoteStatus(status)) if status == reqwest::StatusCode::INTERNAL_SERVER_ERROR
        ));
    }
}
