use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use thiserror::Error;

use track_o_mat::config::{Config, ConfigError, Settings};
use track_o_mat::render::{MapRenderer, RenderError};
use track_o_mat::track::{self, Sample, TrackError};
use track_o_mat::web::{self, AppState};

#[derive(Parser)]
#[command(name = "track-o-mat")]
#[command(about = "Resample a GPS track and render it on a map")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<String>,
    /// Timezone timestamps are displayed in
    #[arg(long, global = true)]
    timezone: Option<String>,
    /// Timezone the track's naive timestamps are written in
    #[arg(long, global = true)]
    source_timezone: Option<String>,
    /// Bucket width, e.g. "1m" or "30s"
    #[arg(long, global = true)]
    bucket: Option<String>,
    /// Mapbox access token
    #[arg(long, global = true, env = "MAPBOX_TOKEN", hide_env_values = true)]
    access_token: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the resampled track as an HTML map
    Render {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Write the resampled track as CSV
    Resample {
        input: PathBuf,
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Serve the map and the track API over HTTP
    Serve {
        input: PathBuf,
        #[arg(long)]
        bind: Option<String>,
    },
}

#[derive(Debug, Error)]
enum AppError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("track error: {0}")]
    Track(#[from] TrackError),
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let settings = settings(&cli)?;

    match cli.command {
        Commands::Render { input, output } => {
            let renderer = MapRenderer::new(settings.access_token.clone())?;
            let samples = load_track(&input, &settings)?;
            let mut html = Vec::new();
            renderer.render(&samples, &mut html)?;
            write_output(output.as_deref(), &html)?;
        }
        Commands::Resample { input, output } => {
            let samples = load_track(&input, &settings)?;
            write_output(output.as_deref(), &track::to_csv(&samples)?)?;
        }
        Commands::Serve { input, bind } => {
            let renderer = MapRenderer::new(settings.access_token.clone())?;
            let samples = load_track(&input, &settings)?;
            let state = AppState {
                track: Arc::new(samples),
                renderer: Arc::new(renderer),
            };
            let bind = bind.unwrap_or(settings.bind);
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(web::run_server(&bind, state))?;
        }
    }

    Ok(())
}

fn settings(cli: &Cli) -> Result<Settings, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(tz) = &cli.timezone {
        config.timezone = tz.clone();
    }
    if let Some(tz) = &cli.source_timezone {
        config.source_timezone = tz.clone();
    }
    if let Some(width) = &cli.bucket {
        config.bucket_width = width.clone();
    }
    if cli.access_token.is_some() {
        config.access_token = cli.access_token.clone();
    }

    config.validate()
}

fn load_track(input: &Path, settings: &Settings) -> Result<Vec<Sample>, TrackError> {
    let samples = track::load_file(input, &settings.load)?;
    let resampled = track::resample(&samples, settings.bucket_width)?;
    log::info!(
        "Resampled {} samples into {} points",
        samples.len(),
        resampled.len()
    );
    Ok(resampled)
}

fn write_output(path: Option<&Path>, bytes: &[u8]) -> std::io::Result<()> {
    match path {
        Some(path) => std::fs::write(path, bytes),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(bytes)?;
            stdout.flush()
        }
    }
}
