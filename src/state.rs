use std::sync::Arc;

use crate::config::Config;
use crate::db::Store;
use crate::services::{IdentifierPolicy, SeaOrmTodoService, TodoService};

#[derive(Clone)]
pub struct SharedState {
    pub config: Arc<Config>,

    pub store: Store,

    pub todo_service: Arc<dyn TodoService>,
}

impl SharedState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let store = Store::with_pool_options(
            &config.general.database_path,
            config.general.max_db_connections,
            config.general.min_db_connections,
        )
        .await?;

        Ok(Self::with_store(config, store))
    }

    #[must_use]
    pub fn with_store(config: Config, store: Store) -> Self {
        let policy = IdentifierPolicy::from(&config.identifiers);

        let todo_service = Arc::new(SeaOrmTodoService::new(store.clone(), policy))
            as Arc<dyn TodoService + Send + Sync + 'static>;

        Self {
            config: Arc::new(config),
            store,
            todo_service,
        }
    }
}
