use crate::core::Pipeline;
use crate::utils::error::Result;
use std::time::Instant;

pub struct BatchEngine<P: Pipeline> {
    pipeline: P,
}

impl<P: Pipeline> BatchEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self { pipeline }
    }

    pub async fn run(&self) -> Result<String> {
        let started = Instant::now();
        tracing::info!("🚀 Starting batch prediction");

        // Extract
        let bookings = self.pipeline.extract().await?;
        tracing::info!("📥 Read {} bookings", bookings.len());

        // Transform
        let rows = self.pipeline.transform(bookings).await?;
        let canceled = rows
            .iter()
            .filter(|row| row.prediction.label == 1)
            .count();
        tracing::info!(
            "🔮 Predicted {} bookings ({} canceled, {} not canceled)",
            rows.len(),
            canceled,
            rows.len() - canceled
        );

        // Load
        let output_path = self.pipeline.load(rows).await?;
        tracing::info!(
            "📁 Output saved to: {} ({:?})",
            output_path,
            started.elapsed()
        );

        Ok(output_path)
    }
}
