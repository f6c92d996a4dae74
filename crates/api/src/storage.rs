//! Barber photo storage on the local filesystem.
//!
//! Files are written to the configured upload directory as `<millis>.<ext>`
//! and served back under `/uploads`.

use std::path::{Path, PathBuf};

use barbershop_core::{errors::BookingResult, validation::photo_extension};
use chrono::Utc;
use eyre::WrapErr;

use crate::config::ApiConfig;

#[derive(Debug, Clone)]
pub struct PhotoStorage {
    dir: PathBuf,
    public_base_url: String,
}

impl PhotoStorage {
    pub fn new(dir: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ApiConfig) -> Self {
        Self::new(&config.upload_dir, &config.public_base_url)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Stores an uploaded photo and returns its public URL.
    ///
    /// Only image extensions are accepted; the original name is otherwise
    /// discarded.
    pub async fn save(&self, original_name: &str, bytes: &[u8]) -> BookingResult<String> {
        let extension = photo_extension(original_name)?;
        let file_name = format!("{}.{}", Utc::now().timestamp_millis(), extension);

        tokio::fs::create_dir_all(&self.dir)
            .await
            .wrap_err_with(|| format!("Failed to create {}", self.dir.display()))?;

        let path = self.dir.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .wrap_err_with(|| format!("Failed to write {}", path.display()))?;

        tracing::info!("Stored photo {} ({} bytes)", file_name, bytes.len());
        Ok(self.public_url(&file_name))
    }

    pub fn public_url(&self, file_name: &str) -> String {
        format!("{}/uploads/{}", self.public_base_url, file_name)
    }
}
