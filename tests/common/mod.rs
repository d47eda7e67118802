#![allow(dead_code)]

use booking_cancel::{load_artifacts, ArtifactPaths, ArtifactPredictor, BookingInput, LocalStore};
use booking_cancel::domain::model::{MarketSegment, MealPlan, RoomType};
use std::path::Path;

/// Per-column vocabularies, as exported from the training run.
pub const ENCODER_JSON: &str = r#"{
  "columns": {
    "type_of_meal_plan": ["Meal Plan 1", "Meal Plan 2", "Meal Plan 3", "Not Selected"],
    "room_type_reserved": ["Room_Type 1", "Room_Type 2", "Room_Type 3", "Room_Type 4",
                           "Room_Type 5", "Room_Type 6", "Room_Type 7"],
    "market_segment_type": ["Aviation", "Complementary", "Corporate", "Offline", "Online"]
  }
}"#;

/// A single shared LabelEncoder that never saw "Not Selected".
pub const SHARED_ENCODER_JSON: &str = r#"{
  "classes": ["Corporate", "Meal Plan 1", "Meal Plan 2", "Offline", "Online",
              "Room_Type 1", "Room_Type 2", "Room_Type 3"]
}"#;

pub const SCALER_JSON: &str = r#"{
  "mean":  [1.84, 0.10, 0.81, 2.20, 85.23, 2017.82, 7.42, 15.60, 0.02, 0.15, 103.42, 0.62],
  "scale": [0.52, 0.40, 0.87, 1.41, 85.93, 0.38, 3.07, 8.74, 0.37, 1.75, 35.09, 0.79],
  "feature_names": ["no_of_adults", "no_of_children", "no_of_weekend_nights", "no_of_week_nights",
                    "lead_time", "arrival_year", "arrival_month", "arrival_date",
                    "no_of_previous_cancellations", "no_of_previous_bookings_not_canceled",
                    "avg_price_per_room", "no_of_special_requests"]
}"#;

/// Two stumps: long lead times push towards cancellation (feature 7),
/// special requests pull away from it (feature 14).
pub const MODEL_JSON: &str = r#"{
  "kind": "gradient_boosted_trees",
  "base_score": 0.5,
  "trees": [
    {"nodes": [
      {"feature": 7, "threshold": 0.5, "yes": 1, "no": 2},
      {"leaf": -1.2},
      {"leaf": 1.4}
    ]},
    {"nodes": [
      {"feature": 14, "threshold": 0.0, "yes": 1, "no": 2},
      {"leaf": 0.3},
      {"leaf": -0.8}
    ]}
  ]
}"#;

pub const CANCELED_MESSAGE: &str = "Pembatalan Pemesanan Diprediksi (Canceled).";
pub const NOT_CANCELED_MESSAGE: &str = "Pemesanannya Diprediksi Tidak Dibatalkan (Not Canceled).";

pub fn write_artifacts(dir: &Path) {
    std::fs::write(dir.join("best_xgb_model.json"), MODEL_JSON).unwrap();
    std::fs::write(dir.join("encoder.json"), ENCODER_JSON).unwrap();
    std::fs::write(dir.join("scaler.json"), SCALER_JSON).unwrap();
}

pub async fn load_predictor(dir: &Path) -> ArtifactPredictor {
    let store = LocalStore::new(dir);
    let artifacts = load_artifacts(&store, &ArtifactPaths::default()).await.unwrap();
    ArtifactPredictor::from(artifacts)
}

/// The reference booking: 2 adults, 3 nights, booked 10 days ahead.
pub fn scenario_input() -> BookingInput {
    BookingInput {
        type_of_meal_plan: MealPlan::MealPlan1,
        room_type_reserved: RoomType::RoomType1,
        market_segment_type: MarketSegment::Online,
        no_of_adults: 2,
        no_of_children: 0,
        no_of_weekend_nights: 1,
        no_of_week_nights: 2,
        lead_time: 10,
        arrival_year: 2023,
        arrival_month: 1,
        arrival_date: 1,
        no_of_previous_cancellations: 0,
        no_of_previous_bookings_not_canceled: 0,
        avg_price_per_room: 100.0,
        no_of_special_requests: 0,
    }
}

pub fn scenario_form_body() -> String {
    [
        "type_of_meal_plan=Meal+Plan+1",
        "room_type_reserved=Room_Type+1",
        "market_segment_type=Online",
        "no_of_adults=2",
        "no_of_children=0",
        "no_of_weekend_nights=1",
        "no_of_week_nights=2",
        "lead_time=10",
        "arrival_year=2023",
        "arrival_month=1",
        "arrival_date=1",
        "no_of_previous_cancellations=0",
        "no_of_previous_bookings_not_canceled=0",
        "avg_price_per_room=100.0",
        "no_of_special_requests=0",
    ]
    .join("&")
}
