mod analysis;
mod app;
mod config;
mod error;
mod mock;
mod state;
mod status;
mod upload;

use crate::config::{AppConfig, ServiceMode};
use crate::state::{AppState, MockState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    app::init_tracing();

    let config = AppConfig::from_env()?;

    let router = match config.mode {
        ServiceMode::Analysis => app::build_analysis_app(AppState::init(&config)),
        ServiceMode::Mock => app::build_mock_app(MockState::init(&config), &config.mock)?,
    };

    app::serve(router, &config).await
}
