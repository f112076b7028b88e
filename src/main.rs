use clap::{Args, Parser, Subcommand};
use screen_qr::{decoders, server, DecodePipeline, PipelineConfig, SelectionRect, ServerConfig};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "screen-qr")]
#[command(about = "Locate and decode QR codes in screenshot crops")]
#[command(version)]
pub struct Cli {
    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Decode a saved screenshot and print the payload
    Decode(DecodeArgs),
    /// Serve the decode pipeline over HTTP
    Serve(ServeArgs),
}

#[derive(Args, Debug)]
pub struct DecodeArgs {
    /// Screenshot to decode
    #[arg(long)]
    pub image: PathBuf,

    /// Only look inside this selection, as x,y,width,height
    #[arg(long)]
    pub region: Option<SelectionRect>,

    /// Print the full decode report as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ServeArgs {
    /// Host address to bind to
    #[arg(long, env = "QR_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "QR_PORT", default_value = "9292")]
    pub port: u16,

    /// Maximum upload size in bytes (default: 50MB)
    #[arg(long, env = "QR_MAX_FILE_SIZE", default_value = "52428800")]
    pub max_file_size: usize,
}

impl From<ServeArgs> for ServerConfig {
    fn from(args: ServeArgs) -> Self {
        Self {
            host: args.host,
            port: args.port,
            max_file_size: args.max_file_size,
            pipeline: PipelineConfig::default(),
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize tracing; logs go to stderr so stdout carries only payloads
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| cli.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Command::Decode(args) => decode(args),
        Command::Serve(args) => {
            let config = ServerConfig::from(args);
            tracing::info!("Starting screen-qr v{}", env!("CARGO_PKG_VERSION"));
            tracing::info!("Binding to {}:{}", config.host, config.port);

            tokio::runtime::Runtime::new()?.block_on(server::run(config))?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn decode(args: DecodeArgs) -> anyhow::Result<ExitCode> {
    let capture = image::open(&args.image)
        .map_err(|e| screen_qr::QrError::ImageLoad(format!("{}: {}", args.image.display(), e)))?
        .to_rgb8();
    let capture = match &args.region {
        Some(rect) => screen_qr::selection::crop(&capture, rect)?,
        None => capture,
    };

    let pipeline = DecodePipeline::new(decoders::default_decoder()?);
    let report = pipeline.run(&capture);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if let Some(text) = report.result.text() {
        println!("{}", text);
    } else {
        eprintln!("No QR code found");
    }

    Ok(if report.result.is_found() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
