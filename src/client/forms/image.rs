use async_trait::async_trait;

/// File picked in an image field
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageFile {
    pub name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Stores an image somewhere reachable and returns its public URL.
///
/// Errors are user-facing text and are shown as-is.
#[async_trait]
pub trait ImageUploader: Send + Sync {
    async fn upload(&self, file: ImageFile) -> Result<String, String>;
}
