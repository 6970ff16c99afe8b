use std::sync::Arc;

use sqlx::PgPool;

use crate::config;
use crate::scheduling::SchedulingService;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub env: config::Config,
    pub scheduling: Arc<SchedulingService>,
}

impl AppState {
    pub fn new(db: PgPool, env: config::Config, scheduling: Arc<SchedulingService>) -> Self {
        Self {
            db,
            env,
            scheduling,
        }
    }
}
