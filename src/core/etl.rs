use crate::core::{LoadResult, Pipeline};
use crate::utils::error::Result;
use crate::utils::monitor::SystemMonitor;

pub struct EtlEngine<P: Pipeline> {
    pipeline: P,
    monitor: SystemMonitor,
}

impl<P: Pipeline> EtlEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self::new_with_monitoring(pipeline, false)
    }

    pub fn new_with_monitoring(pipeline: P, monitor_enabled: bool) -> Self {
        Self {
            pipeline,
            monitor: SystemMonitor::new(monitor_enabled),
        }
    }

    pub async fn run(&self) -> Result<LoadResult> {
        tracing::info!("Starting conversion...");

        // Extract
        let inputs = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} input file(s)", inputs.len());
        self.monitor.log_stats("Extract");

        // Transform
        let transformed = self.pipeline.transform(inputs).await?;
        tracing::info!(
            "🔄 Converted {} records ({} before deduplication)",
            transformed.records.len(),
            transformed.report.rows_before_dedup
        );
        self.monitor.log_stats("Transform");

        // Load
        let loaded = self.pipeline.load(transformed).await?;
        self.monitor.log_stats("Load");
        self.monitor.log_final_stats();

        Ok(loaded)
    }
}
