use tracing::info;

use super::Settings;

pub fn main(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    settings.migrated_pool()?;
    info!(database_url = %settings.database_url, "database is up to date");
    Ok(())
}
