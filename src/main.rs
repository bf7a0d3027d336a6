use conceptforge::{
    logger::{self, LoggerConfig},
    ForgeConfig, GeminiClient, Orchestrator, Session, StylePreset, SubmitOutcome,
};
use std::env;
use std::fs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let dotenv_loaded = dotenv::dotenv().is_ok();

    logger::init_with_config(LoggerConfig::development())?;

    if dotenv_loaded {
        log::info!("✅ .env file loaded successfully");
    } else {
        log::warn!("⚠️  No .env file found, using system environment variables");
    }

    let config = match ForgeConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            log::error!("❌ {}", e);
            return Err(e.into());
        }
    };
    logger::log_startup_info(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"), &config);

    log::info!("📚 Models in use:");
    for (id, name, purpose) in GeminiClient::supported_models() {
        log::info!("  {} - {} ({})", id, name, purpose);
    }

    let mut args = env::args().skip(1);
    let prompt = args.next().unwrap_or_default();
    let style: StylePreset = match args.next() {
        Some(raw) => raw.parse()?,
        None => StylePreset::default(),
    };
    let edit_instruction = args.next();

    let client = GeminiClient::new(&config)?;
    let session = Session::new(Orchestrator::new(client));
    session.set_prompt(prompt);
    session.select_style(style);

    log::info!("🎨 Generating concept (style: {})...", style);
    if session.submit_generate().await != SubmitOutcome::Completed {
        let message = session.snapshot().error.unwrap_or_default();
        log::error!("❌ {}", message);
        return Err(message.into());
    }

    if let Some(instruction) = edit_instruction {
        session.set_edit_instruction(instruction);
        log::info!("🖌️  Applying edit...");
        if session.submit_edit().await != SubmitOutcome::Completed {
            log::error!("❌ {}", session.snapshot().error.unwrap_or_default());
        }
    }

    let state = session.snapshot();
    if let Some(content) = &state.content {
        println!("# {}\n", content.title());
        println!("{}\n", content.description());
        println!("Tags: {}", content.tags().join(", "));
    }

    if let Some(image) = &state.image {
        let filename = format!(
            "concept_{}.{}",
            chrono::Utc::now().timestamp(),
            image.file_extension()
        );
        match image.bytes() {
            Ok(bytes) => match fs::write(&filename, bytes) {
                Ok(_) => log::info!("💾 Image saved to: {}", filename),
                Err(e) => log::error!("❌ Failed to save image: {}", e),
            },
            Err(e) => log::error!("❌ Failed to decode image: {}", e),
        }
    }

    Ok(())
}
