use std::path::{Path, PathBuf};

use chrono::Utc;
use rand::RngCore;
use thiserror::Error;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

use crate::structs::player::UploadedPicture;

pub const PUBLIC_UPLOADS_PREFIX: &str = "/uploads";

const FALLBACK_EXTENSION: &str = ".bin";

#[derive(Debug, Error)]
pub enum PictureStoreError {
    #[error("failed to prepare upload directory {path}: {source}")]
    Directory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write picture {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Clone)]
pub struct PictureStore {
    root: PathBuf,
    public_prefix: String,
}

impl PictureStore {
    pub async fn new(
        root: impl Into<PathBuf>,
        public_prefix: impl Into<String>,
    ) -> Result<Self, PictureStoreError> {
        let root = root.into();

        fs::create_dir_all(&root)
            .await
            .map_err(|source| PictureStoreError::Directory {
                path: root.clone(),
                source,
            })?;

        Ok(PictureStore {
            root,
            public_prefix: public_prefix.into(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub async fn save(
        &self,
        picture: Option<&UploadedPicture>,
    ) -> Result<Option<String>, PictureStoreError> {
        let Some(picture) = picture.filter(|picture| !picture.file_name.is_empty()) else {
            return Ok(None);
        };

        let name = generate_file_name(&picture.file_name);
        let path = self.root.join(&name);
        let write_error = |source| PictureStoreError::Write {
            path: path.clone(),
            source,
        };

        let mut file = fs::File::create(&path).await.map_err(write_error)?;
        file.write_all(&picture.bytes).await.map_err(write_error)?;
        file.sync_all().await.map_err(write_error)?;

        info!(
            path = %path.display(),
            size_bytes = picture.bytes.len(),
            "Picture saved"
        );

        Ok(Some(self.public_path(&name)))
    }

    /// Best effort, only for names directly under the root.
    pub async fn discard(&self, public_path: &str) {
        let Some(name) = public_path
            .strip_prefix(self.public_prefix.trim_end_matches('/'))
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|name| !name.is_empty() && !name.contains(['/', '\\']) && *name != "..")
        else {
            warn!("Refusing to discard picture outside the upload directory : {public_path}");
            return;
        };

        let path = self.root.join(name);
        match fs::remove_file(&path).await {
            Ok(()) => info!(path = %path.display(), "Orphaned picture removed"),
            Err(e) => warn!("Error removing orphaned picture {} : {e}", path.display()),
        }
    }

    fn public_path(&self, name: &str) -> String {
        format!("{}/{}", self.public_prefix.trim_end_matches('/'), name)
    }
}

/// `<unix nanos>-<16 hex chars><ext>`. Only the extension comes from the client.
fn generate_file_name(original: &str) -> String {
    let timestamp = Utc::now().timestamp_nanos_opt().unwrap_or_default();

    let mut suffix = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut suffix);

    format!(
        "{}-{}{}",
        timestamp,
        hex::encode(suffix),
        extension_of(original)
    )
}

fn extension_of(file_name: &str) -> &str {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);

    match base.rfind('.') {
        Some(dot) if is_safe_extension(&base[dot + 1..]) => &base[dot..],
        _ => FALLBACK_EXTENSION,
    }
}

fn is_safe_extension(ext: &str) -> bool {
    !ext.is_empty() && !ext.chars().any(char::is_control)
}
