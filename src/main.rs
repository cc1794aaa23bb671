use std::path::PathBuf;
use std::process::ExitCode;

use chrono::Utc;
use clap::Parser;
use log::{error, info};
use tracing_subscriber::EnvFilter;

use vakit::source::{self, SourceKind};
use vakit::{cities, Config, Generator, TIMEZONE};

/// Writes a prayer-time board per Turkish province.
#[derive(Parser, Debug)]
#[command(name = "vakit", version)]
struct Args {
    /// Path to a TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Where the times come from.
    #[arg(long, value_enum)]
    source: Option<SourceKind>,

    /// Directory the boards are written into.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Only generate this city (repeatable); defaults to all 81.
    #[arg(long = "city")]
    cities: Vec<String>,

    /// Suffix of the generated files, e.g. ".txt" or "".
    #[arg(long)]
    extension: Option<String>,

    /// HTTP timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the city table and exit.
    #[arg(long)]
    list_cities: bool,
}

impl Args {
    fn apply(self, config: &mut Config) {
        if let Some(source) = self.source {
            config.source = source;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = dir;
        }
        if !self.cities.is_empty() {
            config.cities = self.cities;
        }
        if let Some(extension) = self.extension {
            config.extension = extension;
        }
        if let Some(secs) = self.timeout_secs {
            config.timeout_secs = secs;
        }
    }
}

/// Level used when `RUST_LOG` is unset or unusable.
const DEFAULT_LOG: &str = "info";

fn init_logging() {
    let filter = log_filter(std::env::var("RUST_LOG").ok().as_deref());
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .filter(|d| !d.trim().is_empty())
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG))
}

fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    init_logging();

    let args = Args::parse();

    if args.list_cities {
        for city in cities::all() {
            println!(
                "{:02} {:<15} {:<15} {:>6.2} {:>6.2}",
                city.plate, city.slug, city.name, city.latitude, city.longitude
            );
        }
        return ExitCode::SUCCESS;
    }

    let mut config = match Config::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    args.apply(&mut config);

    let selected = match config.validate().and_then(|_| config.selected_cities()) {
        Ok(selected) => selected,
        Err(e) => {
            error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let source = source::build(
        config.source,
        TIMEZONE,
        config.timeout(),
        config.base_url.as_deref(),
    );
    info!(
        "generating {} boards from {} into {}",
        selected.len(),
        source.name(),
        config.output_dir.display()
    );

    let now = Utc::now().with_timezone(&TIMEZONE);
    let generator = Generator::new(
        source.as_ref(),
        selected,
        config.output_dir.clone(),
        config.extension.clone(),
    );
    match generator.run(now) {
        Ok(report) if report.all_failed() => {
            error!("no board could be generated");
            ExitCode::FAILURE
        }
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
