pub mod convert;
pub mod etl;
pub mod pipeline;

pub use crate::domain::model::{ConvertedRecord, InputFile, LoadResult, TransformResult};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Sink, Source};
pub use crate::utils::error::Result;
