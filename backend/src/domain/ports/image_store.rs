//! Driven port for persisting uploaded images.

use async_trait::async_trait;

use crate::domain::ImageUpload;

use super::define_port_error;

define_port_error! {
    /// Errors raised while writing uploaded images.
    pub enum ImageStoreError {
        Io { message: String } => "image could not be stored: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Write the image under a fresh unique name and return that name.
    async fn store(&self, upload: &ImageUpload) -> Result<String, ImageStoreError>;
}
