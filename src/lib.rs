use config::Config;
use sqlx::PgPool;

pub mod authorization;
pub mod config;
pub mod database;
pub mod error;
pub mod group;
pub mod middleware;
pub mod router;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
}
