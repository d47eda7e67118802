use crate::config::toml_config::AppConfig;
use crate::domain::model::{BookingInput, MarketSegment, MealPlan, RoomType};
use crate::utils::error::Result;
use crate::utils::validation::Validate;
use clap::{Args, Parser, Subcommand};
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, Parser)]
#[command(name = "booking-cancel")]
#[command(about = "Predict hotel booking cancellations from fitted model artifacts")]
pub struct CliConfig {
    /// Path to TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Directory the artifact file names are resolved against
    #[arg(long, global = true)]
    pub artifact_dir: Option<String>,

    #[arg(long, global = true)]
    pub model: Option<String>,

    #[arg(long, global = true)]
    pub encoder: Option<String>,

    #[arg(long, global = true)]
    pub scaler: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Serve the booking form over HTTP
    Serve {
        #[arg(long)]
        listen: Option<String>,
    },
    /// Predict a single booking
    Predict(PredictArgs),
    /// Predict every row of a CSV file
    Batch {
        #[arg(long)]
        input: String,
        #[arg(long)]
        output: String,
    },
    /// Load and validate the artifacts without predicting
    Check,
}

#[derive(Debug, Clone, Args)]
pub struct PredictArgs {
    #[arg(long, default_value = "Meal Plan 1", value_parser = parse_option::<MealPlan>)]
    pub meal_plan: MealPlan,
    #[arg(long, default_value = "Room_Type 1", value_parser = parse_option::<RoomType>)]
    pub room_type: RoomType,
    #[arg(long, default_value = "Online", value_parser = parse_option::<MarketSegment>)]
    pub market_segment: MarketSegment,
    #[arg(long, default_value_t = 1)]
    pub adults: i64,
    #[arg(long, default_value_t = 0)]
    pub children: i64,
    #[arg(long, default_value_t = 0)]
    pub weekend_nights: i64,
    #[arg(long, default_value_t = 1)]
    pub week_nights: i64,
    #[arg(long, default_value_t = 10)]
    pub lead_time: i64,
    #[arg(long, default_value_t = 2023)]
    pub arrival_year: i64,
    #[arg(long, default_value_t = 1)]
    pub arrival_month: i64,
    #[arg(long, default_value_t = 1)]
    pub arrival_date: i64,
    #[arg(long, default_value_t = 0)]
    pub previous_cancellations: i64,
    #[arg(long, default_value_t = 0)]
    pub previous_bookings_not_canceled: i64,
    #[arg(long, default_value_t = 100.0)]
    pub avg_price_per_room: f64,
    #[arg(long, default_value_t = 0)]
    pub special_requests: i64,
}

/// Parses a dropdown option by its display label, e.g. `Meal Plan 1`.
fn parse_option<T: DeserializeOwned>(value: &str) -> std::result::Result<T, String> {
    serde_json::from_value(serde_json::Value::String(value.to_string()))
        .map_err(|_| format!("unsupported option '{}'", value))
}

impl From<&PredictArgs> for BookingInput {
    fn from(args: &PredictArgs) -> Self {
        BookingInput {
            type_of_meal_plan: args.meal_plan,
            room_type_reserved: args.room_type,
            market_segment_type: args.market_segment,
            no_of_adults: args.adults,
            no_of_children: args.children,
            no_of_weekend_nights: args.weekend_nights,
            no_of_week_nights: args.week_nights,
            lead_time: args.lead_time,
            arrival_year: args.arrival_year,
            arrival_month: args.arrival_month,
            arrival_date: args.arrival_date,
            no_of_previous_cancellations: args.previous_cancellations,
            no_of_previous_bookings_not_canceled: args.previous_bookings_not_canceled,
            avg_price_per_room: args.avg_price_per_room,
            no_of_special_requests: args.special_requests,
        }
    }
}

impl CliConfig {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::from_file(path)?,
            None => AppConfig::default(),
        };

        if let Some(dir) = &self.artifact_dir {
            config.artifacts.dir = dir.clone();
        }
        if let Some(model) = &self.model {
            config.artifacts.model = model.clone();
        }
        if let Some(encoder) = &self.encoder {
            config.artifacts.encoder = encoder.clone();
        }
        if let Some(scaler) = &self.scaler {
            config.artifacts.scaler = scaler.clone();
        }
        if let Command::Serve {
            listen: Some(listen),
        } = &self.command
        {
            config.server.listen_addr = listen.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_predict_defaults_match_form() {
        let cli = CliConfig::parse_from(["booking-cancel", "predict"]);
        match &cli.command {
            Command::Predict(args) => assert_eq!(BookingInput::from(args), BookingInput::default()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_predict_options_parse_labels() {
        let cli = CliConfig::parse_from([
            "booking-cancel",
            "predict",
            "--meal-plan",
            "Not Selected",
            "--market-segment",
            "Corporate",
            "--lead-time",
            "120",
        ]);
        let Command::Predict(args) = &cli.command else {
            panic!("expected predict command");
        };
        let input = BookingInput::from(args);
        assert_eq!(input.type_of_meal_plan, MealPlan::NotSelected);
        assert_eq!(input.market_segment_type, MarketSegment::Corporate);
        assert_eq!(input.lead_time, 120);

        assert!(CliConfig::try_parse_from(["booking-cancel", "predict", "--room-type", "Suite"]).is_err());
    }

    #[test]
    fn test_flags_override_defaults() {
        let cli = CliConfig::parse_from([
            "booking-cancel",
            "--artifact-dir",
            "/models",
            "--model",
            "xgb.json",
            "serve",
            "--listen",
            "0.0.0.0:8080",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.artifacts.dir, "/models");
        assert_eq!(config.artifacts.model, "xgb.json");
        assert_eq!(config.artifacts.encoder, "encoder.json");
        assert_eq!(config.server.listen_addr, "0.0.0.0:8080");

        let bad = CliConfig::parse_from(["booking-cancel", "serve", "--listen", "nope"]);
        assert!(bad.resolve().is_err());
    }

    #[test]
    fn test_flags_override_config_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(
                b"[artifacts]\ndir = \"/srv/artifacts\"\nmodel = \"file_model.json\"\nscaler = \"file_scaler.json\"\n\n[server]\nlisten_addr = \"0.0.0.0:9000\"\n",
            )
            .unwrap();
        let config_path = temp_file.path().to_str().unwrap();

        let cli = CliConfig::parse_from([
            "booking-cancel",
            "--config",
            config_path,
            "--artifact-dir",
            "/override",
            "--model",
            "cli_model.json",
            "check",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.artifacts.dir, "/override");
        assert_eq!(config.artifacts.model, "cli_model.json");
        // 未指定的欄位保留設定檔的值
        assert_eq!(config.artifacts.scaler, "file_scaler.json");
        assert_eq!(config.artifacts.encoder, "encoder.json");
        assert_eq!(config.server.listen_addr, "0.0.0.0:9000");

        let without_flags = CliConfig::parse_from(["booking-cancel", "--config", config_path, "check"]);
        let config = without_flags.resolve().unwrap();
        assert_eq!(config.artifacts.dir, "/srv/artifacts");
        assert_eq!(config.artifacts.model, "file_model.json");
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = CliConfig::parse_from([
            "booking-cancel",
            "serve",
            "--artifact-dir",
            "/models",
            "--scaler",
            "s.json",
            "-v",
        ]);
        assert!(cli.verbose);
        let config = cli.resolve().unwrap();
        assert_eq!(config.artifacts.dir, "/models");
        assert_eq!(config.artifacts.scaler, "s.json");
        assert!(matches!(cli.command, Command::Serve { listen: None }));
    }
}
