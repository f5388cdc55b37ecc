use std::sync::{Arc, Mutex};

use rand::{rngs::StdRng, SeedableRng};
use tracing::{info, warn};

use crate::analysis::client::{ImageAnalyzer, OpenAiVisionClient};
use crate::config::AppConfig;

/// State for the real-analysis service.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<dyn ImageAnalyzer>,
}

impl AppState {
    pub fn init(config: &AppConfig) -> Self {
        if config.openai.api_key.is_none() {
            warn!("OPENAI_API_KEY not found in environment variables; analysis requests will fail");
        }
        info!(base_url = %config.openai.base_url, model = %config.openai.model, "image analyzer configured");

        let analyzer = Arc::new(OpenAiVisionClient::new(config.openai.clone())) as Arc<dyn ImageAnalyzer>;
        Self::from_parts(analyzer)
    }

    pub fn from_parts(analyzer: Arc<dyn ImageAnalyzer>) -> Self {
        Self { analyzer }
    }
}

/// State for the mock service: just the random source, shared so a seed gives a reproducible sequence.
#[derive(Clone)]
pub struct MockState {
    pub rng: Arc<Mutex<StdRng>>,
}

impl MockState {
    pub fn init(config: &AppConfig) -> Self {
        let rng = match config.mock.seed {
            Some(seed) => {
                info!(seed, "mock generator seeded");
                StdRng::seed_from_u64(seed)
            }
            None => StdRng::from_entropy(),
        };
        Self::from_rng(rng)
    }

    pub fn from_rng(rng: StdRng) -> Self {
        Self {
            rng: Arc::new(Mutex::new(rng)),
        }
    }
}
