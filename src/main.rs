use anyhow::Context;
use clap::Parser;
use sighting_predictor::{
    app_state::AppState,
    config::{DEFAULT_HOST, DEFAULT_MODEL_PATH, DEFAULT_PORT, ServerConfig},
    logging::init_logging,
    server,
};
use std::path::PathBuf;
use tokio::signal;

#[derive(Parser, Debug)]
#[command(name = "sighting-predictor")]
#[command(about = "Web form that predicts which country reported a UFO sighting")]
struct Cli {
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    #[arg(long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Serialized model artifact (JSON)
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    model_path: PathBuf,

    #[arg(long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: String,
}

impl Cli {
    fn into_config(self) -> ServerConfig {
        ServerConfig {
            host: self.host,
            port: self.port,
            model_path: self.model_path,
            log_level: self.log_level,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let config = Cli::parse().into_config();
    config.validate()?;
    init_logging(config.log_level_filter());

    let app_state = AppState::from_config(&config).inspect_err(|e| log::error!("{:#}", e))?;

    actix_web::rt::System::new().block_on(async move {
        tokio::select! {
            res = server::startup(config, app_state) => {
                res.context("server exited with an error")
            }
            _ = signal::ctrl_c() => {
                log::info!("Received Ctrl+C, shutting down");
                Ok(())
            }
        }
    })
}
