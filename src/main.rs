use clap::Parser;
use pdfchat::ThemeMode;
use pdfchat::core::config::{self, CliOverrides};
use pdfchat::tui;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "pdfchat", about = "Ask questions about your PDFs from the terminal")]
struct Args {
    /// Backend base URL (e.g. http://localhost:8000)
    #[arg(short, long)]
    base_url: Option<String>,

    /// Color scheme
    #[arg(short, long, value_enum)]
    theme: Option<ThemeMode>,
}

/// Install the file logger at `debug` until the configured level is known.
fn init_logging(log_file: File) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    let _ = WriteLogger::init(LevelFilter::Trace, log_config, log_file);
    log::set_max_level(LevelFilter::Debug);
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Terminal owns stdout, so logs go to pdfchat.log in the current directory.
    // Installed before config loading so config warnings are kept.
    if let Ok(log_file) = File::create("pdfchat.log") {
        init_logging(log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        eprintln!("Ignoring config file: {e}");
        Default::default()
    });
    let resolved = config::resolve(
        &file_config,
        CliOverrides {
            base_url: args.base_url.as_deref(),
            theme: args.theme,
        },
    );
    log::set_max_level(resolved.log_level);

    log::info!("pdfchat starting up against backend {}", resolved.base_url);

    tui::run(resolved)
}
