use axum_server::tls_rustls::RustlsConfig;
use clap::Parser;
use std::error::Error;
use std::net::SocketAddr;
use std::path::PathBuf;

use config::{ConfigFile, ProviderConfig};

mod app;
mod config;
mod error;
mod models;
mod routes;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// AccuWeather API key. Without one every proxy request fails.
    #[arg(long, env = "ACCUWEATHER_API_KEY", hide_env_values = true)]
    api_key: Option<String>,

    /// Base url of the AccuWeather data service.
    #[arg(long, env = "ACCUWEATHER_BASE_URL")]
    upstream_url: Option<String>,

    /// TOML file with an [accuweather] table.
    #[arg(long, env = "WEATHER_CONFIG")]
    config: Option<PathBuf>,

    #[arg(short, long, env = "PORT", default_value_t = 3000)]
    port: u16,

    /// Directory with the built frontend.
    #[arg(long, env = "ASSETS_PATH", default_value = "frontend/dist")]
    assets: String,

    #[arg(short, long, env = "KEY_FILE_PATH")]
    key_file_path: Option<String>,

    #[arg(short, long, env = "CERT_FILE_PATH")]
    cert_file_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let args = Args::parse();

    let config_file = match &args.config {
        Some(path) => {
            log::info!("reading configuration from {}", path.display());
            ConfigFile::read(path)?
        }
        None => ConfigFile::default(),
    };
    let provider_config = ProviderConfig::resolve(args.api_key, args.upstream_url, config_file)?;
    log::debug!("using {:?}", provider_config);

    let app = app::create_app(&provider_config, &args.assets);

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    log::info!("listening on {}", addr);
    match (args.key_file_path, args.cert_file_path) {
        (Some(key_file_path), Some(cert_file_path)) => {
            log::info!(
                "using tls with key file {} and cert file {}",
                key_file_path,
                cert_file_path
            );
            let tls = RustlsConfig::from_pem_file(cert_file_path, key_file_path).await?;
            axum_server::bind_rustls(addr, tls)
                .serve(app.into_make_service())
                .await?;
        }
        (None, None) => {
            axum_server::bind(addr)
                .serve(app.into_make_service())
                .await?;
        }
        _ => return Err("tls needs both a key file and a cert file".into()),
    }
    Ok(())
}
