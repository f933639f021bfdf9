use clap::Parser;
use labmarker::extraction::ReferenceCatalog;
use labmarker::ocr::OcrClient;
use labmarker::server::{self, AppState};
use labmarker::utils::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "labmarker")]
#[command(about = "A medical lab report marker extraction server")]
struct Args {
    /// Path to the configuration JSON file
    #[arg(long, short = 'c')]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "labmarker=info,tower_http=debug".into()),
        )
        .init();

    load_config(args.config.as_deref());

    run_server().await?;

    Ok(())
}

fn load_config(path: Option<&str>) {
    let loaded = match path {
        Some(path) => AppConfig::init_from(path),
        None => AppConfig::init(),
    };

    if let Err(e) = loaded {
        tracing::warn!("Could not load configuration file, using defaults: {e}");
    }
}

async fn run_server() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::get();

    let addr = std::env::var("LABMARKER_ADDR").unwrap_or_else(|_| config.host_url.to_string());
    let socket_addr: std::net::SocketAddr = addr.parse()?;

    let catalog = ReferenceCatalog::load_or_empty(&*config.catalog_path);
    let state = AppState::new(OcrClient::new(config), catalog);

    server::start_server(socket_addr, state).await?;

    Ok(())
}
