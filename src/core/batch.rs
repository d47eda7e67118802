use crate::core::predictor::ArtifactPredictor;
use crate::core::{BatchRow, BookingInput, BookingRecord, FileStore, Pipeline};
use crate::domain::model::MODEL_FEATURES;
use crate::utils::error::{PredictError, Result};
use std::sync::Arc;

const OUTPUT_EXTRA_COLUMNS: [&str; 3] = ["prediction", "booking_status", "cancel_probability"];

/// Predicts every row of a CSV file whose header names the 15 booking fields.
pub struct CsvBatchPipeline<F: FileStore> {
    store: F,
    predictor: Arc<ArtifactPredictor>,
    input_path: String,
    output_path: String,
}

impl<F: FileStore> CsvBatchPipeline<F> {
    pub fn new(
        store: F,
        predictor: Arc<ArtifactPredictor>,
        input_path: impl Into<String>,
        output_path: impl Into<String>,
    ) -> Self {
        Self {
            store,
            predictor,
            input_path: input_path.into(),
            output_path: output_path.into(),
        }
    }
}

#[async_trait::async_trait]
impl<F: FileStore> Pipeline for CsvBatchPipeline<F> {
    async fn extract(&self) -> Result<Vec<BookingInput>> {
        tracing::debug!("Reading bookings from {}", self.store.describe(&self.input_path));
        let data = self.store.read_file(&self.input_path).await?;

        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(data.as_slice());

        let mut bookings = Vec::new();
        for result in reader.deserialize() {
            let booking: BookingInput = result?;
            bookings.push(booking);
        }

        Ok(bookings)
    }

    async fn transform(&self, data: Vec<BookingInput>) -> Result<Vec<BatchRow>> {
        let mut rows = Vec::with_capacity(data.len());

        for (i, input) in data.into_iter().enumerate() {
            // 標題列之後從第 1 列開始計算
            let row_number = i + 1;
            let prediction = BookingRecord::new(input.clone())
                .and_then(|record| self.predictor.predict(&record))
                .map_err(|e| {
                    tracing::error!("❌ Row {} failed: {}", row_number, e);
                    PredictError::BatchRowError {
                        row: row_number,
                        source: Box::new(e),
                    }
                })?;

            rows.push(BatchRow { input, prediction });
        }

        Ok(rows)
    }

    async fn load(&self, rows: Vec<BatchRow>) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());

        let header: Vec<&str> = MODEL_FEATURES
            .iter()
            .chain(OUTPUT_EXTRA_COLUMNS.iter())
            .copied()
            .collect();
        writer.write_record(&header)?;

        for row in &rows {
            writer.write_record(output_record(row))?;
        }

        let data = writer
            .into_inner()
            .map_err(|e| PredictError::IoError(e.into_error()))?;

        tracing::debug!("Writing {} bytes of predictions", data.len());
        self.store.write_file(&self.output_path, &data).await?;

        Ok(self.store.describe(&self.output_path))
    }
}

fn output_record(row: &BatchRow) -> Vec<String> {
    let i = &row.input;
    vec![
        i.type_of_meal_plan.as_str().to_string(),
        i.room_type_reserved.as_str().to_string(),
        i.market_segment_type.as_str().to_string(),
        i.no_of_adults.to_string(),
        i.no_of_children.to_string(),
        i.no_of_weekend_nights.to_string(),
        i.no_of_week_nights.to_string(),
        i.lead_time.to_string(),
        i.arrival_year.to_string(),
        i.arrival_month.to_string(),
        i.arrival_date.to_string(),
        i.no_of_previous_cancellations.to_string(),
        i.no_of_previous_bookings_not_canceled.to_string(),
        i.avg_price_per_room.to_string(),
        i.no_of_special_requests.to_string(),
        row.prediction.label.to_string(),
        row.prediction.status.as_str().to_string(),
        format!("{:.6}", row.prediction.cancel_probability),
    ]
}
