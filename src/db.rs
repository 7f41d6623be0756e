use anyhow::{anyhow, Context, Result};
use diesel::pg::PgConnection;
use diesel::r2d2::{ConnectionManager, Pool};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn create_pool(database_url: &str, max_size: u32) -> Result<DbPool> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .build(manager)
        .context("failed to create DB pool")
}

pub fn run_migrations(conn: &mut PgConnection) -> Result<()> {
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| anyhow!("failed to run migrations: {}", e))?;
    for version in applied {
        tracing::info!("Applied migration {}", version);
    }
    Ok(())
}

/// 回滚全部迁移后重新执行，清空所有表
pub fn reset_schema(conn: &mut PgConnection) -> Result<()> {
    conn.revert_all_migrations(MIGRATIONS)
        .map_err(|e| anyhow!("failed to revert migrations: {}", e))?;
    run_migrations(conn)?;
    tracing::warn!("Database schema was reset");
    Ok(())
}
