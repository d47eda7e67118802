use crate::core::artifacts::Artifacts;
use crate::core::classifier::ClassifierModel;
use crate::core::encoder::ColumnEncoders;
use crate::core::scaler::StandardScaler;
use crate::core::{CategoricalEncoder, Classifier, FeatureScaler};
use crate::domain::model::{
    BookingRecord, BookingStatus, CategoricalColumn, Prediction, CATEGORICAL_COUNT, FEATURE_COUNT,
};
use crate::utils::error::Result;

/// Read-only prediction context built once from the loaded artifacts.
pub struct Predictor<E: CategoricalEncoder, S: FeatureScaler, M: Classifier> {
    encoder: E,
    scaler: S,
    model: M,
}

pub type ArtifactPredictor = Predictor<ColumnEncoders, StandardScaler, ClassifierModel>;

impl<E: CategoricalEncoder, S: FeatureScaler, M: Classifier> Predictor<E, S, M> {
    pub fn new(encoder: E, scaler: S, model: M) -> Self {
        Self {
            encoder,
            scaler,
            model,
        }
    }

    /// Encodes, scales and lays out one record as the classifier's input row.
    pub fn feature_row(&self, record: &BookingRecord) -> Result<[f64; FEATURE_COUNT]> {
        let mut row = [0.0; FEATURE_COUNT];

        for (i, column) in CategoricalColumn::ALL.iter().enumerate() {
            row[i] = self.encoder.encode(*column, record.category(*column))? as f64;
        }

        let scaled = self.scaler.transform(&record.numeric_features());
        row[CATEGORICAL_COUNT..].copy_from_slice(&scaled);

        Ok(row)
    }

    pub fn predict(&self, record: &BookingRecord) -> Result<Prediction> {
        let row = self.feature_row(record)?;
        let label = self.model.predict(&row);
        let status = BookingStatus::try_from(label)?;
        let probability = self.model.predict_proba(&row);

        tracing::debug!(
            "Predicted {:?} (label {}, p={:.4})",
            status,
            label,
            probability
        );

        Ok(Prediction::new(status, probability))
    }
}

impl From<Artifacts> for ArtifactPredictor {
    fn from(artifacts: Artifacts) -> Self {
        Predictor::new(artifacts.encoders, artifacts.scaler, artifacts.model)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BookingInput, MarketSegment, NUMERIC_COUNT};
    use crate::utils::error::PredictError;

    struct IndexEncoder;

    impl CategoricalEncoder for IndexEncoder {
        fn encode(&self, column: CategoricalColumn, value: &str) -> Result<usize> {
            match value {
                "Meal Plan 1" | "Room_Type 1" | "Online" => Ok(0),
                "Offline" => Ok(1),
                _ => Err(PredictError::UnknownCategoryError {
                    column: column.name().to_string(),
                    value: value.to_string(),
                }),
            }
        }
    }

    struct Identity;

    impl FeatureScaler for Identity {
        fn transform(&self, row: &[f64; NUMERIC_COUNT]) -> [f64; NUMERIC_COUNT] {
            *row
        }
    }

    /// Always returns the same label.
    struct FixedModel(i64);

    impl Classifier for FixedModel {
        fn predict_proba(&self, _row: &[f64; FEATURE_COUNT]) -> f64 {
            0.75
        }

        fn predict(&self, _row: &[f64; FEATURE_COUNT]) -> i64 {
            self.0
        }
    }

    fn record(input: BookingInput) -> BookingRecord {
        BookingRecord::new(input).unwrap()
    }

    #[test]
    fn test_feature_row_layout() {
        let predictor = Predictor::new(IndexEncoder, Identity, FixedModel(1));
        let input = BookingInput {
            market_segment_type: MarketSegment::Offline,
            lead_time: 42,
            ..Default::default()
        };
        let row = predictor.feature_row(&record(input)).unwrap();
        assert_eq!(&row[..3], &[0.0, 0.0, 1.0]);
        assert_eq!(row[3], 1.0); // no_of_adults
        assert_eq!(row[7], 42.0); // lead_time
        assert_eq!(row[13], 100.0); // avg_price_per_room
    }

    #[test]
    fn test_prediction_carries_message() {
        let predictor = Predictor::new(IndexEncoder, Identity, FixedModel(1));
        let prediction = predictor.predict(&record(BookingInput::default())).unwrap();
        assert_eq!(prediction.label, 1);
        assert_eq!(prediction.status, BookingStatus::Canceled);
        assert_eq!(prediction.message, "Pembatalan Pemesanan Diprediksi (Canceled).");
        assert_eq!(prediction.cancel_probability, 0.75);
    }

    #[test]
    fn test_label_outside_contract_is_rejected() {
        let predictor = Predictor::new(IndexEncoder, Identity, FixedModel(-1));
        assert!(matches!(
            predictor.predict(&record(BookingInput::default())),
            Err(PredictError::ContractViolationError { label: -1 })
        ));
    }

    #[test]
    fn test_unknown_category_fails_the_request() {
        let predictor = Predictor::new(IndexEncoder, Identity, FixedModel(0));
        let input = BookingInput {
            market_segment_type: MarketSegment::Corporate,
            ..Default::default()
        };
        match predictor.predict(&record(input)) {
            Err(PredictError::UnknownCategoryError { column, value }) => {
                assert_eq!(column, "market_segment_type");
                assert_eq!(value, "Corporate");
            }
            other => panic!("expected unknown category, got {:?}", other),
        }
    }
}
