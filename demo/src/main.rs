use std::path::PathBuf;

use clap::Parser;
use tinymvc::{AppContext, Config, Server};

// Pull in the library so its component registrations link into the binary.
use tinymvc_demo as _;

#[derive(Parser)]
#[command(name = "tinymvc-demo", about = "Sample tinymvc application")]
struct Cli {
    /// Path to the application properties file.
    #[arg(long, env = "TINYMVC_CONFIG", default_value = "demo/application.properties")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = Config::load(&cli.config)?;

    let host = config.get("serverHost").unwrap_or("127.0.0.1").to_string();
    let port: u16 = match config.get("serverPort") {
        Some(raw) => raw.parse()?,
        None => 8000,
    };

    let context = AppContext::boot(config)?;
    Server::new(context).host(&host).port(port).run().await
}
