use crate::utils::error::{PredictError, Result};
use crate::utils::validation::{validate_finite, validate_min, validate_range};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of categorical columns fed through the encoder.
pub const CATEGORICAL_COUNT: usize = 3;
/// Number of numeric columns fed through the scaler.
pub const NUMERIC_COUNT: usize = 12;
/// Width of the row the classifier sees.
pub const FEATURE_COUNT: usize = CATEGORICAL_COUNT + NUMERIC_COUNT;

/// Scaler column order. Must match the order the scaler was fitted with.
pub const NUMERIC_FEATURES: [&str; NUMERIC_COUNT] = [
    "no_of_adults",
    "no_of_children",
    "no_of_weekend_nights",
    "no_of_week_nights",
    "lead_time",
    "arrival_year",
    "arrival_month",
    "arrival_date",
    "no_of_previous_cancellations",
    "no_of_previous_bookings_not_canceled",
    "avg_price_per_room",
    "no_of_special_requests",
];

/// Classifier column order: encoded categoricals first, then scaled numerics.
pub const MODEL_FEATURES: [&str; FEATURE_COUNT] = [
    "type_of_meal_plan",
    "room_type_reserved",
    "market_segment_type",
    "no_of_adults",
    "no_of_children",
    "no_of_weekend_nights",
    "no_of_week_nights",
    "lead_time",
    "arrival_year",
    "arrival_month",
    "arrival_date",
    "no_of_previous_cancellations",
    "no_of_previous_bookings_not_canceled",
    "avg_price_per_room",
    "no_of_special_requests",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CategoricalColumn {
    MealPlan,
    RoomType,
    MarketSegment,
}

impl CategoricalColumn {
    pub const ALL: [CategoricalColumn; CATEGORICAL_COUNT] = [
        CategoricalColumn::MealPlan,
        CategoricalColumn::RoomType,
        CategoricalColumn::MarketSegment,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CategoricalColumn::MealPlan => "type_of_meal_plan",
            CategoricalColumn::RoomType => "room_type_reserved",
            CategoricalColumn::MarketSegment => "market_segment_type",
        }
    }
}

impl fmt::Display for CategoricalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MealPlan {
    #[default]
    #[serde(rename = "Meal Plan 1")]
    MealPlan1,
    #[serde(rename = "Meal Plan 2")]
    MealPlan2,
    #[serde(rename = "Not Selected")]
    NotSelected,
}

impl MealPlan {
    pub const OPTIONS: [MealPlan; 3] = [MealPlan::MealPlan1, MealPlan::MealPlan2, MealPlan::NotSelected];

    pub fn as_str(&self) -> &'static str {
        match self {
            MealPlan::MealPlan1 => "Meal Plan 1",
            MealPlan::MealPlan2 => "Meal Plan 2",
            MealPlan::NotSelected => "Not Selected",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RoomType {
    #[default]
    #[serde(rename = "Room_Type 1")]
    RoomType1,
    #[serde(rename = "Room_Type 2")]
    RoomType2,
    #[serde(rename = "Room_Type 3")]
    RoomType3,
}

impl RoomType {
    pub const OPTIONS: [RoomType; 3] = [RoomType::RoomType1, RoomType::RoomType2, RoomType::RoomType3];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoomType::RoomType1 => "Room_Type 1",
            RoomType::RoomType2 => "Room_Type 2",
            RoomType::RoomType3 => "Room_Type 3",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MarketSegment {
    #[default]
    Online,
    Offline,
    Corporate,
}

impl MarketSegment {
    pub const OPTIONS: [MarketSegment; 3] = [
        MarketSegment::Online,
        MarketSegment::Offline,
        MarketSegment::Corporate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            MarketSegment::Online => "Online",
            MarketSegment::Offline => "Offline",
            MarketSegment::Corporate => "Corporate",
        }
    }
}

/// Raw booking attributes as submitted by the form, the JSON API or a CSV row.
///
/// Nothing is checked here; use [`BookingRecord::new`] to get a record the
/// predictor accepts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookingInput {
    pub type_of_meal_plan: MealPlan,
    pub room_type_reserved: RoomType,
    pub market_segment_type: MarketSegment,
    pub no_of_adults: i64,
    pub no_of_children: i64,
    pub no_of_weekend_nights: i64,
    pub no_of_week_nights: i64,
    pub lead_time: i64,
    pub arrival_year: i64,
    pub arrival_month: i64,
    pub arrival_date: i64,
    pub no_of_previous_cancellations: i64,
    pub no_of_previous_bookings_not_canceled: i64,
    pub avg_price_per_room: f64,
    pub no_of_special_requests: i64,
}

impl Default for BookingInput {
    // 與表單預設值一致
    fn default() -> Self {
        Self {
            type_of_meal_plan: MealPlan::default(),
            room_type_reserved: RoomType::default(),
            market_segment_type: MarketSegment::default(),
            no_of_adults: 1,
            no_of_children: 0,
            no_of_weekend_nights: 0,
            no_of_week_nights: 1,
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
}

/// A booking that passed the form's widget constraints.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingRecord {
    input: BookingInput,
}

impl BookingRecord {
    pub fn new(input: BookingInput) -> Result<Self> {
        validate_min("no_of_adults", input.no_of_adults, 1)?;
        validate_min("no_of_children", input.no_of_children, 0)?;
        validate_min("no_of_weekend_nights", input.no_of_weekend_nights, 0)?;
        validate_min("no_of_week_nights", input.no_of_week_nights, 1)?;
        validate_min("lead_time", input.lead_time, 1)?;
        validate_min("arrival_year", input.arrival_year, 2020)?;
        validate_range("arrival_month", input.arrival_month, 1, 12)?;
        validate_range("arrival_date", input.arrival_date, 1, 31)?;
        validate_min(
            "no_of_previous_cancellations",
            input.no_of_previous_cancellations,
            0,
        )?;
        validate_min(
            "no_of_previous_bookings_not_canceled",
            input.no_of_previous_bookings_not_canceled,
            0,
        )?;
        validate_finite("avg_price_per_room", input.avg_price_per_room)?;
        validate_min("avg_price_per_room", input.avg_price_per_room, 0.0)?;
        validate_min("no_of_special_requests", input.no_of_special_requests, 0)?;

        Ok(Self { input })
    }

    pub fn input(&self) -> &BookingInput {
        &self.input
    }

    pub fn into_input(self) -> BookingInput {
        self.input
    }

    pub fn category(&self, column: CategoricalColumn) -> &'static str {
        match column {
            CategoricalColumn::MealPlan => self.input.type_of_meal_plan.as_str(),
            CategoricalColumn::RoomType => self.input.room_type_reserved.as_str(),
            CategoricalColumn::MarketSegment => self.input.market_segment_type.as_str(),
        }
    }

    /// Numeric fields in [`NUMERIC_FEATURES`] order.
    pub fn numeric_features(&self) -> [f64; NUMERIC_COUNT] {
        let i = &self.input;
        [
            i.no_of_adults as f64,
            i.no_of_children as f64,
            i.no_of_weekend_nights as f64,
            i.no_of_week_nights as f64,
            i.lead_time as f64,
            i.arrival_year as f64,
            i.arrival_month as f64,
            i.arrival_date as f64,
            i.no_of_previous_cancellations as f64,
            i.no_of_previous_bookings_not_canceled as f64,
            i.avg_price_per_room,
            i.no_of_special_requests as f64,
        ]
    }
}

impl TryFrom<BookingInput> for BookingRecord {
    type Error = PredictError;

    fn try_from(input: BookingInput) -> Result<Self> {
        BookingRecord::new(input)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    NotCanceled,
    Canceled,
}

impl BookingStatus {
    pub fn label(&self) -> i64 {
        match self {
            BookingStatus::NotCanceled => 0,
            BookingStatus::Canceled => 1,
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            BookingStatus::Canceled => "Pembatalan Pemesanan Diprediksi (Canceled).",
            BookingStatus::NotCanceled => "Pemesanannya Diprediksi Tidak Dibatalkan (Not Canceled).",
        }
    }

    /// Value written to the `booking_status` column of batch output.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::NotCanceled => "Not_Canceled",
            BookingStatus::Canceled => "Canceled",
        }
    }
}

impl TryFrom<i64> for BookingStatus {
    type Error = PredictError;

    fn try_from(label: i64) -> Result<Self> {
        match label {
            0 => Ok(BookingStatus::NotCanceled),
            1 => Ok(BookingStatus::Canceled),
            other => Err(PredictError::ContractViolationError { label: other }),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Prediction {
    pub label: i64,
    pub status: BookingStatus,
    pub message: &'static str,
    pub cancel_probability: f64,
    pub predicted_at: DateTime<Utc>,
}

impl Prediction {
    pub fn new(status: BookingStatus, cancel_probability: f64) -> Self {
        Self {
            label: status.label(),
            status,
            message: status.message(),
            cancel_probability,
            predicted_at: Utc::now(),
        }
    }
}
