//! HTML rendering for the single-page booking form.

use crate::domain::model::{BookingInput, MarketSegment, MealPlan, RoomType};
use std::fmt::Write;

pub const TITLE: &str = "Hotel Booking Cancellation Prediction";
pub const SUBTITLE: &str = "Input Data untuk Prediksi";
pub const SUBMIT_LABEL: &str = "Prediksi Pembatalan";

pub enum Outcome<'a> {
    Predicted(&'a str),
    Failed(String),
}

struct NumberField {
    name: &'static str,
    label: &'static str,
    min: &'static str,
    max: Option<&'static str>,
    step: &'static str,
}

const NUMBER_FIELDS: [NumberField; 12] = [
    NumberField { name: "no_of_adults", label: "Jumlah Dewasa", min: "1", max: None, step: "1" },
    NumberField { name: "no_of_children", label: "Jumlah Anak Kecil", min: "0", max: None, step: "1" },
    NumberField { name: "no_of_weekend_nights", label: "Jumlah Malam Akhir Pekan", min: "0", max: None, step: "1" },
    NumberField { name: "no_of_week_nights", label: "Jumlah Malam dalam Seminggu", min: "1", max: None, step: "1" },
    NumberField { name: "lead_time", label: "Lead Time (Hari)", min: "1", max: None, step: "1" },
    NumberField { name: "arrival_year", label: "Tahun Kedatangan", min: "2020", max: None, step: "1" },
    NumberField { name: "arrival_month", label: "Bulan Kedatangan", min: "1", max: Some("12"), step: "1" },
    NumberField { name: "arrival_date", label: "Tanggal Kedatangan", min: "1", max: Some("31"), step: "1" },
    NumberField {
        name: "no_of_previous_cancellations",
        label: "Jumlah Pembatalan Sebelumnya",
        min: "0",
        max: None,
        step: "1",
    },
    NumberField {
        name: "no_of_previous_bookings_not_canceled",
        label: "Jumlah Pemesanan Sebelumnya yang Tidak Dibatalkan",
        min: "0",
        max: None,
        step: "1",
    },
    NumberField { name: "avg_price_per_room", label: "Harga Rata-rata Per Kamar", min: "0", max: None, step: "0.01" },
    NumberField { name: "no_of_special_requests", label: "Jumlah Permintaan Khusus", min: "0", max: None, step: "1" },
];

fn number_value(input: &BookingInput, name: &str) -> String {
    match name {
        "no_of_adults" => input.no_of_adults.to_string(),
        "no_of_children" => input.no_of_children.to_string(),
        "no_of_weekend_nights" => input.no_of_weekend_nights.to_string(),
        "no_of_week_nights" => input.no_of_week_nights.to_string(),
        "lead_time" => input.lead_time.to_string(),
        "arrival_year" => input.arrival_year.to_string(),
        "arrival_month" => input.arrival_month.to_string(),
        "arrival_date" => input.arrival_date.to_string(),
        "no_of_previous_cancellations" => input.no_of_previous_cancellations.to_string(),
        "no_of_previous_bookings_not_canceled" => {
            input.no_of_previous_bookings_not_canceled.to_string()
        }
        "avg_price_per_room" => format!("{:.2}", input.avg_price_per_room),
        "no_of_special_requests" => input.no_of_special_requests.to_string(),
        _ => String::new(),
    }
}

pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn select(out: &mut String, name: &str, label: &str, options: &[&str], selected: &str) {
    let _ = writeln!(out, "<label for=\"{name}\">{label}</label>");
    let _ = writeln!(out, "<select id=\"{name}\" name=\"{name}\">");
    for option in options {
        let marker = if *option == selected { " selected" } else { "" };
        let _ = writeln!(out, "<option value=\"{option}\"{marker}>{option}</option>");
    }
    out.push_str("</select>\n");
}

pub fn render(input: &BookingInput, outcome: Option<Outcome<'_>>) -> String {
    let mut out = String::with_capacity(4096);
    let _ = writeln!(
        out,
        "<!DOCTYPE html>\n<html lang=\"id\">\n<head><meta charset=\"utf-8\"><title>{TITLE}</title></head>\n<body>"
    );
    let _ = writeln!(out, "<h1>{TITLE}</h1>");
    let _ = writeln!(out, "<form method=\"post\" action=\"/\">\n<h2>{SUBTITLE}</h2>");

    let meal_plans: Vec<&str> = MealPlan::OPTIONS.iter().map(|o| o.as_str()).collect();
    let room_types: Vec<&str> = RoomType::OPTIONS.iter().map(|o| o.as_str()).collect();
    let segments: Vec<&str> = MarketSegment::OPTIONS.iter().map(|o| o.as_str()).collect();
    select(&mut out, "type_of_meal_plan", "Pilih Tipe Paket Makanan", &meal_plans, input.type_of_meal_plan.as_str());
    select(&mut out, "room_type_reserved", "Pilih Tipe Kamar", &room_types, input.room_type_reserved.as_str());
    select(&mut out, "market_segment_type", "Pilih Segmen Pasar", &segments, input.market_segment_type.as_str());

    for field in NUMBER_FIELDS.iter() {
        let max = field
            .max
            .map(|m| format!(" max=\"{}\"", m))
            .unwrap_or_default();
        let _ = writeln!(out, "<label for=\"{}\">{}</label>", field.name, field.label);
        let _ = writeln!(
            out,
            "<input type=\"number\" id=\"{name}\" name=\"{name}\" min=\"{min}\"{max} step=\"{step}\" value=\"{value}\" required>",
            name = field.name,
            min = field.min,
            max = max,
            step = field.step,
            value = number_value(input, field.name),
        );
    }

    let _ = writeln!(out, "<button type=\"submit\">{SUBMIT_LABEL}</button>\n</form>");

    match outcome {
        Some(Outcome::Predicted(message)) => {
            let _ = writeln!(out, "<p class=\"success\">{}</p>", escape_html(message));
        }
        Some(Outcome::Failed(message)) => {
            let _ = writeln!(out, "<p class=\"error\">{}</p>", escape_html(&message));
        }
        None => {}
    }

    out.push_str("</body>\n</html>\n");
    out
}
