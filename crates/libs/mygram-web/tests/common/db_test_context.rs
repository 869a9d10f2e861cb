use diesel_migrations::MigrationHarness;
use mygram_models::db::{
    config::DbConfig,
    connection::{DbConnection, MIGRATIONS},
};

use super::from_env;

pub struct DBTestContext {
    pub connection: DbConnection,
}
impl DBTestContext {
    pub fn new(url: &str) -> Self {
        let config = DbConfig {
            database_url: String::from(url),
        };
        let connection = DbConnection::new(&config).expect("Cannot connect to database");
        connection
            .pool
            .get()
            .expect("Cannot get a database connection")
            .run_pending_migrations(MIGRATIONS)
            .expect("Failed to run database migrations");

        Self { connection }
    }
    pub fn from_env() -> Self {
        Self::new(&from_env("DATABASE_URL"))
    }
}
impl Drop for DBTestContext {
    fn drop(&mut self) {
        self.connection
            .pool
            .get()
            .expect("Cannot get a database connection")
            .revert_all_migrations(MIGRATIONS)
            .expect("Failed to revert changes to db");
    }
}
