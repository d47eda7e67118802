use booking_cancel::config::Command;
use booking_cancel::server::{self, AppState};
use booking_cancel::utils::error::ErrorSeverity;
use booking_cancel::utils::logger;
use booking_cancel::{
    load_artifacts, AppConfig, ArtifactPredictor, BatchEngine, BookingInput, BookingRecord,
    CliConfig, CsvBatchPipeline, LocalStore, PredictError,
};
use clap::Parser;
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    // 載入並驗證配置
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            logger::init_cli_logger(cli.verbose, None);
            tracing::error!("❌ Configuration validation failed: {}", e);
            tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    if config.logging.json && matches!(cli.command, Command::Serve { .. }) {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }

    tracing::info!("Starting booking-cancel");
    if cli.verbose {
        tracing::debug!("Resolved config: {:?}", config);
    }

    if let Err(e) = run(&cli, &config).await {
        tracing::error!(
            "❌ {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Medium => 2,   // 輸入錯誤
            ErrorSeverity::High => 1,     // 配置錯誤
            ErrorSeverity::Critical => 3, // 模型或系統錯誤
        };
        std::process::exit(exit_code);
    }

    Ok(())
}

async fn run(cli: &CliConfig, config: &AppConfig) -> Result<(), PredictError> {
    // 任一模型檔載入失敗即中止
    let store = LocalStore::new(&config.artifacts.dir);
    let artifacts = load_artifacts(&store, &config.artifact_paths()).await?;

    if let Command::Check = cli.command {
        println!("✅ Artifacts in '{}' loaded and validated", config.artifacts.dir);
        println!("   model:   {}", artifacts.model.kind());
        println!(
            "   encoder: {}",
            if artifacts.encoders.is_shared() { "shared vocabulary" } else { "per-column" }
        );
        return Ok(());
    }

    let predictor = ArtifactPredictor::from(artifacts);

    match &cli.command {
        Command::Serve { .. } => {
            server::serve(AppState::new(predictor), &config.server.listen_addr).await?;
        }
        Command::Predict(args) => {
            let record = BookingRecord::new(BookingInput::from(args))?;
            let prediction = predictor.predict(&record)?;
            tracing::info!(
                "🔮 Label {} (p={:.3})",
                prediction.label,
                prediction.cancel_probability
            );
            println!("{}", prediction.message);
        }
        Command::Batch { input, output } => {
            let pipeline =
                CsvBatchPipeline::new(LocalStore::new("."), Arc::new(predictor), input, output);
            let output_path = BatchEngine::new(pipeline).run().await?;
            println!("✅ Batch prediction completed");
            println!("📁 Output saved to: {}", output_path);
        }
        Command::Check => {}
    }

    Ok(())
}
