//! Filesystem image store scoped to the upload directory with `cap-std`.

use std::io::Write as _;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, OpenOptions};
use mockable::Clock;
use rand::Rng as _;
use tracing::debug;

use crate::domain::ImageUpload;
use crate::domain::ports::{ImageStore, ImageStoreError};

/// Writes uploads into a single directory under generated names.
///
/// Only the directory handle is held, so writes cannot escape it.
pub struct CapImageStore {
    dir: Arc<Dir>,
    clock: Arc<dyn Clock>,
}

impl CapImageStore {
    /// Create `path` if needed and open it as the store root.
    ///
    /// # Errors
    ///
    /// Returns an I/O error when the directory cannot be created or opened.
    pub fn open(path: &Path, clock: Arc<dyn Clock>) -> std::io::Result<Self> {
        Dir::create_ambient_dir_all(path, ambient_authority())?;
        let dir = Dir::open_ambient_dir(path, ambient_authority())?;
        Ok(Self {
            dir: Arc::new(dir),
            clock,
        })
    }
}

fn write_new(dir: &Dir, name: &str, bytes: &[u8]) -> std::io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create_new(true);
    let mut file = dir.open_with(name, &options)?;
    file.write_all(bytes)?;
    file.sync_all()
}

#[async_trait]
impl ImageStore for CapImageStore {
    async fn store(&self, upload: &ImageUpload) -> Result<String, ImageStoreError> {
        let suffix = rand::thread_rng().gen_range(0..1_000_000_000_u32);
        let name = upload.stored_name(self.clock.utc(), suffix);
        let dir = Arc::clone(&self.dir);
        let bytes = upload.bytes().to_vec();
        let target = name.clone();

        tokio::task::spawn_blocking(move || write_new(&dir, &target, &bytes))
            .await
            .map_err(|err| ImageStoreError::io(err.to_string()))?
            .map_err(|err| ImageStoreError::io(err.to_string()))?;

        debug!(%name, size = upload.bytes().len(), "stored uploaded image");
        Ok(name)
    }
}
