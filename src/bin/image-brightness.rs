//! Image Brightness CLI Tool
//!
//! Prints the average perceived brightness of each input image as a
//! percentage.

#[cfg(feature = "cli")]
use image_brightness::cli;

#[cfg(feature = "cli")]
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    cli::main().await
}

#[cfg(not(feature = "cli"))]
fn main() {
    eprintln!("CLI feature not enabled. Please rebuild with --features cli");
    std::process::exit(1);
}
