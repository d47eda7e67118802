use crate::core::CategoricalEncoder;
use crate::domain::model::CategoricalColumn;
use crate::utils::error::{PredictError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A fitted label encoder: a class's code is its position in `classes`.
#[derive(Debug, Clone)]
pub struct LabelEncoder {
    classes: Vec<String>,
    index: HashMap<String, usize>,
}

impl LabelEncoder {
    pub fn new(classes: Vec<String>) -> std::result::Result<Self, String> {
        if classes.is_empty() {
            return Err("encoder has no fitted classes".to_string());
        }

        let mut index = HashMap::with_capacity(classes.len());
        for (code, class) in classes.iter().enumerate() {
            if index.insert(class.clone(), code).is_some() {
                return Err(format!("duplicate class '{}'", class));
            }
        }

        Ok(Self { classes, index })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    pub fn transform(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }
}

/// On-disk encoder layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum EncoderArtifact {
    PerColumn { columns: HashMap<String, Vec<String>> },
    Shared { classes: Vec<String> },
}

/// Encoders for the three categorical columns.
#[derive(Debug, Clone)]
pub enum ColumnEncoders {
    PerColumn {
        meal_plan: LabelEncoder,
        room_type: LabelEncoder,
        market_segment: LabelEncoder,
    },
    /// One encoder reused for every column. Only correct if it was fitted
    /// on the union of all three domains.
    Shared(LabelEncoder),
}

impl ColumnEncoders {
    pub fn from_artifact(artifact: EncoderArtifact) -> std::result::Result<Self, String> {
        match artifact {
            EncoderArtifact::Shared { classes } => {
                let encoder = LabelEncoder::new(classes)?;
                tracing::warn!(
                    "⚠️ Encoder artifact uses one shared vocabulary ({} classes) for all categorical columns",
                    encoder.classes().len()
                );
                Ok(ColumnEncoders::Shared(encoder))
            }
            EncoderArtifact::PerColumn { mut columns } => {
                let mut take = |column: CategoricalColumn| -> std::result::Result<LabelEncoder, String> {
                    let classes = columns
                        .remove(column.name())
                        .ok_or_else(|| format!("missing vocabulary for column '{}'", column))?;
                    LabelEncoder::new(classes).map_err(|e| format!("{}: {}", column, e))
                };

                let meal_plan = take(CategoricalColumn::MealPlan)?;
                let room_type = take(CategoricalColumn::RoomType)?;
                let market_segment = take(CategoricalColumn::MarketSegment)?;

                if !columns.is_empty() {
                    let mut extra: Vec<_> = columns.keys().cloned().collect();
                    extra.sort();
                    tracing::debug!("Ignoring encoder vocabularies for unused columns: {:?}", extra);
                }

                Ok(ColumnEncoders::PerColumn {
                    meal_plan,
                    room_type,
                    market_segment,
                })
            }
        }
    }

    pub fn encoder_for(&self, column: CategoricalColumn) -> &LabelEncoder {
        match self {
            ColumnEncoders::Shared(encoder) => encoder,
            ColumnEncoders::PerColumn {
                meal_plan,
                room_type,
                market_segment,
            } => match column {
                CategoricalColumn::MealPlan => meal_plan,
                CategoricalColumn::RoomType => room_type,
                CategoricalColumn::MarketSegment => market_segment,
            },
        }
    }

    pub fn is_shared(&self) -> bool {
        matches!(self, ColumnEncoders::Shared(_))
    }
}

impl CategoricalEncoder for ColumnEncoders {
    fn encode(&self, column: CategoricalColumn, value: &str) -> Result<usize> {
        self.encoder_for(column)
            .transform(value)
            .ok_or_else(|| PredictError::UnknownCategoryError {
                column: column.name().to_string(),
                value: value.to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn per_column() -> ColumnEncoders {
        let mut columns = HashMap::new();
        columns.insert(
            "type_of_meal_plan".to_string(),
            strings(&["Meal Plan 1", "Meal Plan 2", "Meal Plan 3", "Not Selected"]),
        );
        columns.insert(
            "room_type_reserved".to_string(),
            strings(&["Room_Type 1", "Room_Type 2", "Room_Type 3"]),
        );
        columns.insert(
            "market_segment_type".to_string(),
            strings(&["Corporate", "Offline", "Online"]),
        );
        ColumnEncoders::from_artifact(EncoderArtifact::PerColumn { columns }).unwrap()
    }

    #[test]
    fn test_codes_follow_fitted_order() {
        let encoders = per_column();
        assert!(!encoders.is_shared());
        assert_eq!(encoders.encode(CategoricalColumn::MealPlan, "Not Selected").unwrap(), 3);
        assert_eq!(encoders.encode(CategoricalColumn::RoomType, "Room_Type 2").unwrap(), 1);
        assert_eq!(encoders.encode(CategoricalColumn::MarketSegment, "Online").unwrap(), 2);
    }

    #[test]
    fn test_columns_do_not_share_vocabulary() {
        let encoders = per_column();
        match encoders.encode(CategoricalColumn::MarketSegment, "Meal Plan 1") {
            Err(PredictError::UnknownCategoryError { column, value }) => {
                assert_eq!(column, "market_segment_type");
                assert_eq!(value, "Meal Plan 1");
            }
            other => panic!("expected unknown category, got {:?}", other),
        }
    }

    #[test]
    fn test_shared_encoder_applies_to_every_column() {
        let artifact: EncoderArtifact =
            serde_json::from_str(r#"{"classes": ["Meal Plan 1", "Online", "Room_Type 1"]}"#).unwrap();
        let encoders = ColumnEncoders::from_artifact(artifact).unwrap();
        assert!(encoders.is_shared());
        assert_eq!(encoders.encode(CategoricalColumn::MealPlan, "Meal Plan 1").unwrap(), 0);
        assert_eq!(encoders.encode(CategoricalColumn::MarketSegment, "Online").unwrap(), 1);
        // 共用詞彙表無法區分欄位
        assert_eq!(encoders.encode(CategoricalColumn::RoomType, "Online").unwrap(), 1);
    }

    #[test]
    fn test_corrupt_vocabularies_are_rejected() {
        assert!(LabelEncoder::new(vec![]).is_err());
        assert!(LabelEncoder::new(strings(&["Online", "Online"])).is_err());

        let mut columns = HashMap::new();
        columns.insert("type_of_meal_plan".to_string(), strings(&["Meal Plan 1"]));
        let err = ColumnEncoders::from_artifact(EncoderArtifact::PerColumn { columns }).unwrap_err();
        assert!(err.contains("room_type_reserved"));
    }
}
