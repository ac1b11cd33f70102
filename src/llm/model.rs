use async_trait::async_trait;
use std::sync::Arc;

use crate::error::Result;

/// A hosted text model: one prompt in, one free-text reply out.
///
/// `Ok(None)` means the provider answered but returned no text (for example a
/// blocked candidate). Transport and API failures are errors.
#[async_trait]
pub trait TextModel: Send + Sync {
    async fn generate_text(&self, prompt: &str) -> Result<Option<String>>;

    fn name(&self) -> &str {
        "text-model"
    }
}

#[async_trait]
impl<T: TextModel + ?Sized> TextModel for Arc<T> {
    async fn generate_text(&self, prompt: &str) -> Result<Option<String>> {
        (**self).generate_text(prompt).await
    }

    fn name(&self) -> &str {
        (**self).name()
    }
}
