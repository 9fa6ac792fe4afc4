//! Profile management delegated to the external identity provider.
//!
//! Authentication itself lives entirely on the provider's side; this
//! module only forwards profile field updates and avatar uploads.

pub mod http;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;

pub use http::HttpIdentityProvider;

/// Profile fields a user may change; `None` leaves a field untouched
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

impl ProfileUpdate {
    pub fn username(name: impl Into<String>) -> Self {
        Self {
            username: Some(name.into()),
            password: None,
        }
    }

    pub fn password(password: impl Into<String>) -> Self {
        Self {
            username: None,
            password: Some(password.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.password.is_none()
    }
}

/// An avatar image selected for upload
#[derive(Debug, Clone)]
pub struct AvatarImage {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl AvatarImage {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    /// Only image content types are accepted for upload
    pub fn is_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }
}

/// Trait for identity provider clients
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// Update profile fields; fails with a message on rejection
    async fn update_profile(&self, update: ProfileUpdate) -> Result<()>;

    /// Replace the user's avatar image
    async fn set_avatar(&self, image: AvatarImage) -> Result<()>;

    /// Get provider name for logging
    fn name(&self) -> &str;
}
