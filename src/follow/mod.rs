mod client;
mod sync;

pub use client::HttpFollowClient;
pub use sync::FollowedShowsSync;

use async_trait::async_trait;

use crate::config::AuthConfig;
use crate::error::AppError;
use crate::models::ShowId;

#[cfg(test)]
use mockall::automock;

/// Remote service that records which shows a user follows.
///
/// Deletes are expected to be idempotent: concurrent unfollows of the same
/// show send duplicate requests.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait FollowService: Send + Sync {
    fn name(&self) -> &'static str;

    async fn unfollow(&self, show_id: ShowId, token: Option<String>) -> Result<(), AppError>;
}

/// Supplies the opaque credential sent with follow requests.
#[cfg_attr(test, automock)]
pub trait CredentialSource: Send + Sync {
    fn token(&self) -> Option<String>;
}

/// Credential read once from configuration.
#[derive(Debug, Clone, Default)]
pub struct StaticCredential {
    token: Option<String>,
}

impl StaticCredential {
    pub fn new(token: Option<String>) -> Self {
        Self { token }
    }
}

impl From<&AuthConfig> for StaticCredential {
    fn from(auth: &AuthConfig) -> Self {
        Self::new(auth.token.clone())
    }
}

impl CredentialSource for StaticCredential {
    fn token(&self) -> Option<String> {
        self.token.clone()
    }
}
