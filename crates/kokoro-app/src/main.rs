mod chat_loop;
mod cli;
mod display;

use std::path::Path;
use std::sync::Arc;

use kokoro_ai::{ChatController, GeminiClient, GeminiConfig, RiskDetector, Session};
use kokoro_common::{ConfigError, KokoroError};
use kokoro_config::KokoroConfig;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

/// Environment variable holding the Gemini API key.
const API_KEY_ENV: &str = "GEMINI_API_KEY";

fn load_config(args: &cli::Args) -> Result<KokoroConfig, ConfigError> {
    match args.config {
        Some(ref path) => kokoro_config::load_config_from(Path::new(path)),
        None => kokoro_config::load_config(),
    }
}

fn init_logging(directive: &str) {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                directive
                    .parse()
                    .unwrap_or_else(|_| "kokoro=info".parse().expect("static directive")),
            ),
        )
        .init();
}

/// Apply command-line overrides and re-validate, since the model id ends up
/// in the request path.
fn apply_overrides(
    mut config: KokoroConfig,
    model: Option<String>,
) -> Result<KokoroConfig, ConfigError> {
    if let Some(model) = model {
        config.model.name = model;
    }
    kokoro_config::validation::validate(&config)?;
    Ok(config)
}

async fn run(args: cli::Args, config: KokoroConfig) -> Result<(), KokoroError> {
    let config = apply_overrides(config, args.model)?;

    if args.print_config {
        println!("{}", kokoro_config::config_to_json(&config));
        return Ok(());
    }

    let client = GeminiClient::new(GeminiConfig::new(config.model.name.clone()))
        .map_err(|e| KokoroError::Ai(e.to_string()))?;
    let risk = match config.risk.keywords {
        Some(ref keywords) => RiskDetector::new(keywords.iter().cloned()),
        None => RiskDetector::default(),
    };
    tracing::info!(
        model = %config.model.name,
        keywords = risk.keywords().len(),
        "chat core ready"
    );

    let controller = ChatController::new(Arc::new(client), Arc::new(risk));
    let mut session = Session::new();
    tracing::info!(session = %session.id(), "session started");

    let mut stdout = std::io::stdout();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{}", display::TITLE);
    println!("{}", display::INTRO);
    println!("{}", display::DISCLAIMER);
    println!("{}", display::USAGE);

    let credentials = chat_loop::env_credentials(std::env::var(API_KEY_ENV).ok());
    if credentials.is_some() {
        println!("{}", display::INPUT_PROMPT);
    }

    chat_loop::run(&controller, &mut session, credentials, &mut lines, &mut stdout).await?;

    println!();
    println!("{}", display::DISCLAIMER);
    tracing::info!(session = %session.id(), turns = session.len(), "session ended");
    Ok(())
}

#[tokio::main]
async fn main() {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let args = cli::parse();

    // Config is read before logging so its level can seed the filter.
    let config = load_config(&args);
    let directive = match (&args.log_level, &config) {
        (Some(level), _) => level.clone(),
        (None, Ok(c)) => c.logging.level.directive().to_string(),
        (None, Err(_)) => "kokoro=info".to_string(),
    };
    init_logging(&directive);

    tracing::info!("kokoro v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = config.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        KokoroConfig::default()
    });

    if let Err(e) = run(args, config).await {
        tracing::error!("{e}");
        eprintln!("{}", display::format_error(&e));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_override_replaces_configured_model() {
        let config = apply_overrides(KokoroConfig::default(), Some("gemini-1.0-pro".into())).unwrap();
        assert_eq!(config.model.name, "gemini-1.0-pro");
    }

    #[test]
    fn no_override_keeps_config() {
        let config = apply_overrides(KokoroConfig::default(), None).unwrap();
        assert_eq!(config.model.name, kokoro_config::DEFAULT_MODEL);
    }

    #[test]
    fn invalid_model_override_is_rejected() {
        for model in ["models/x", "gemini 1.5", ""] {
            let err = apply_overrides(KokoroConfig::default(), Some(model.into())).unwrap_err();
            assert!(matches!(err, ConfigError::ValidationError(_)), "{model:?}");
        }
    }

    #[test]
    fn override_error_surfaces_as_config_error() {
        let err: KokoroError = apply_overrides(KokoroConfig::default(), Some("a/b".into()))
            .unwrap_err()
            .into();
        assert!(matches!(err, KokoroError::Config(_)));
    }
}
