use std::sync::Arc;

use sqlx::SqlitePool;

use super::{config::Config, database::init_pool};

pub struct State {
    pub config: Config,
    pub pool: SqlitePool,
}

impl State {
    pub async fn new() -> Arc<Self> {
        let config = Config::load();

        let pool = init_pool(&config.database_url)
            .await
            .expect("Score store unreachable at startup!");

        Arc::new(Self { config, pool })
    }
}
