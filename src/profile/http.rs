use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::Client;

use crate::error::{Result, ScoreboardError};
use crate::profile::{AvatarImage, IdentityProvider, ProfileUpdate};

/// Identity provider client speaking a Clerk-style REST surface:
/// `PATCH {base}/me` for profile fields, `POST {base}/me/avatar` for
/// the profile image
pub struct HttpIdentityProvider {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpIdentityProvider {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl IdentityProvider for HttpIdentityProvider {
    async fn update_profile(&self, update: ProfileUpdate) -> Result<()> {
        if update.is_empty() {
            return Err(ScoreboardError::Identity(
                "No profile fields to update".to_string(),
            ));
        }

        let response = self
            .client
            .patch(format!("{}/me", self.base_url))
            .bearer_auth(&self.token)
            .json(&update)
            .send()
            .await
            .map_err(|e| ScoreboardError::Identity(format!("Profile update failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoreboardError::Identity(format!(
                "Profile update rejected (HTTP {}): {}",
                status, body
            )));
        }

        tracing::info!("Profile updated");
        Ok(())
    }

    async fn set_avatar(&self, image: AvatarImage) -> Result<()> {
        if !image.is_image() {
            return Err(ScoreboardError::Identity(format!(
                "Invalid file type '{}', expected an image",
                image.content_type
            )));
        }

        let part = Part::bytes(image.bytes)
            .file_name(image.file_name)
            .mime_str(&image.content_type)
            .map_err(|e| ScoreboardError::Identity(format!("Invalid content type: {}", e)))?;
        let form = Form::new().part("file", part);

        let response = self
            .client
            .post(format!("{}/me/avatar", self.base_url))
            .bearer_auth(&self.token)
            .multipart(form)
            .send()
            .await
            .map_err(|e| ScoreboardError::Identity(format!("Avatar upload failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoreboardError::Identity(format!(
                "Avatar upload rejected (HTTP {})",
                status
            )));
        }

        tracing::info!("Avatar replaced");
        Ok(())
    }

    fn name(&self) -> &str {
        "http"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_empty_update_rejected_locally() {
        let provider =
            HttpIdentityProvider::new("https://id.example.com/v1", "test-token").unwrap();

        let err = provider.update_profile(ProfileUpdate::default()).await;
        assert!(matches!(err, Err(ScoreboardError::Identity(_))));
    }

    #[tokio::test]
    async fn test_non_image_avatar_rejected_locally() {
        let provider =
            HttpIdentityProvider::new("https://id.example.com/v1", "test-token").unwrap();

        let pdf = AvatarImage::new("cv.pdf", "application/pdf", vec![0x25, 0x50]);
        let err = provider.set_avatar(pdf).await;
        assert!(matches!(err, Err(ScoreboardError::Identity(_))));
    }
}
