use std::path::PathBuf;
use std::sync::Arc;

use crate::shared::config::{get_upload_dir, Config};
use crate::shared::store::MockStore;
use crate::shared::upstream::UpstreamClient;

/// Состояние, разделяемое всеми обработчиками
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub store: MockStore,
    pub upstream: UpstreamClient,
    pub upload_dir: PathBuf,
}

impl AppState {
    pub fn new(config: Config, store: MockStore) -> anyhow::Result<Self> {
        let upstream = UpstreamClient::from_config(&config.upstream)?;
        let upload_dir = get_upload_dir(&config);
        Ok(Self {
            config: Arc::new(config),
            store,
            upstream,
            upload_dir,
        })
    }

    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        let store = if config.app.seed_mock_data {
            MockStore::seeded()
        } else {
            MockStore::empty()
        };
        Self::new(config, store)
    }
}
