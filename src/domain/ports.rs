use crate::domain::model::{EmptyEmailPolicy, InputFile, LoadResult, TransformResult};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Produces the raw bytes of one named input.
pub trait Source: Send + Sync {
    fn read_input(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Accepts the finished output under a suggested filename and returns where it landed.
pub trait Sink: Send + Sync {
    fn write_output(
        &self,
        filename: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<String>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn input_files(&self) -> &[String];
    fn tag(&self) -> Option<&str>;
    fn output_path(&self) -> &str;
    fn output_filename(&self) -> Option<&str>;
    fn empty_email_policy(&self) -> EmptyEmailPolicy;
    fn write_report(&self) -> bool;
}

#[async_trait]
pub trait Pipeline: Send + Sync {
    async fn extract(&self) -> Result<Vec<InputFile>>;
    async fn transform(&self, inputs: Vec<InputFile>) -> Result<TransformResult>;
    async fn load(&self, result: TransformResult) -> Result<LoadResult>;
}
