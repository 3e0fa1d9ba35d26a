use crate::core::{Sink, Source};
use crate::utils::error::Result;
use std::path::Path;

/// Local filesystem storage. Inputs are read from the paths as given;
/// outputs are written under `base_path`.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: String,
}

impl LocalStorage {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl Source for LocalStorage {
    async fn read_input(&self, path: &str) -> Result<Vec<u8>> {
        let data = tokio::fs::read(path).await?;
        Ok(data)
    }
}

impl Sink for LocalStorage {
    async fn write_output(&self, filename: &str, data: &[u8]) -> Result<String> {
        let full_path = Path::new(&self.base_path).join(filename);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, data).await?;
        Ok(full_path.display().to_string())
    }
}
