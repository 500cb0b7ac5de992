use clap::Parser;

/// kokoro: a terminal counselling chat backed by Gemini.
#[derive(Parser, Debug)]
#[command(name = "kokoro", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<String>,

    /// Gemini model id override (e.g. gemini-1.0-pro).
    #[arg(short = 'm', long)]
    pub model: Option<String>,

    /// Log level override (debug, info, warn, error).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Print the effective config as JSON and exit.
    #[arg(long)]
    pub print_config: bool,
}

pub fn parse() -> Args {
    Args::parse()
}
