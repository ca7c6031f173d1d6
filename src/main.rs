use clap::{CommandFactory, Parser};
use std::path::PathBuf;

use rgbd_axonometry::constants::CameraModel;
use rgbd_axonometry::converter::{AxonometryConverter, load_camera_preset};

#[derive(Parser)]
#[command(name = "rgbd-axonometry")]
#[command(about = "Renders an RGB-D capture as an axonometric projection")]
#[command(version)]
struct Cli {
    /// Input image with RGB info
    #[arg(long, value_name = "FILE")]
    in_rgb: PathBuf,

    /// Input depth map
    #[arg(long, value_name = "FILE")]
    in_dm: PathBuf,

    /// Output image with axonometry
    #[arg(long, value_name = "FILE")]
    out: PathBuf,

    /// JSON camera preset overriding the built-in field of view
    #[arg(long, value_name = "FILE")]
    camera: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    // Set RUST_LOG to control log level, e.g. RUST_LOG=debug
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Invoked with no arguments at all: show usage and finish cleanly.
    if std::env::args().len() == 1 {
        Cli::command().print_help()?;
        return Ok(());
    }
    let cli = Cli::parse();

    let camera = match &cli.camera {
        Some(path) => load_camera_preset(path)?,
        None => CameraModel::default(),
    };

    AxonometryConverter::new(cli.in_rgb, cli.in_dm, cli.out)
        .with_camera(camera)
        .convert()
}
