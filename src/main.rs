use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use folio::Backend;
use folio::core::config::{self, CliOverrides};
use folio::core::syllabus::Curriculum;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "folio", about = "Browse books, favourites and the grading syllabus")]
struct Args {
    /// Search backend to use
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// Initial search query
    #[arg(short, long)]
    query: Option<String>,

    /// Syllabus file to show instead of the bundled one
    #[arg(long)]
    syllabus: Option<PathBuf>,

    /// Print the JSON schema of the syllabus file format and exit
    #[arg(long)]
    syllabus_schema: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    if args.syllabus_schema {
        println!("{}", Curriculum::json_schema());
        return Ok(());
    }

    dotenv::dotenv().ok();

    // Initialize file logger - writes to folio.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("folio.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        log::warn!("Ignoring config file: {}", e);
        config::FolioConfig::default()
    });
    let cli = CliOverrides {
        backend: args.backend.map(|b| b.as_str().to_string()),
        query: args.query,
        syllabus_file: args.syllabus,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("Folio starting up with backend: {}", resolved.backend);

    folio::tui::run(resolved)
}
