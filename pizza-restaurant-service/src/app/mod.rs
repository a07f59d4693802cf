pub mod migrate;
pub mod seed;
pub mod server;

use pizza_restaurant_service::db::{self, DbPool};

pub struct Settings {
    pub database_url: String,
    pub pool_size: u32,
}

impl Settings {
    pub fn migrated_pool(&self) -> Result<DbPool, Box<dyn std::error::Error>> {
        let pool = db::create_pool(&self.database_url, self.pool_size)?;
        db::run_migrations(&pool).map_err(|err| err as Box<dyn std::error::Error>)?;
        Ok(pool)
    }
}

#[cfg(test)]
mod tests {
    use pizza_restaurant_service::service;

    use super::*;

    fn file_settings(dir: &tempfile::TempDir) -> Settings {
        Settings {
            database_url: dir.path().join("app.db").to_string_lossy().into_owned(),
            pool_size: 2,
        }
    }

    #[test]
    fn test_migrations_can_run_again() {
        let dir = tempfile::tempdir().unwrap();
        let settings = file_settings(&dir);

        drop(settings.migrated_pool().unwrap());
        migrate::main(&settings).unwrap();

        let pool = settings.migrated_pool().unwrap();
        let conn = &mut pool.get().unwrap();
        assert!(service::list_restaurants(conn).unwrap().is_empty());
    }

    #[test]
    fn test_seed_command_fills_file_database() {
        let dir = tempfile::tempdir().unwrap();
        let settings = file_settings(&dir);

        seed::main(&settings).unwrap();
        seed::main(&settings).unwrap();

        let pool = settings.migrated_pool().unwrap();
        let conn = &mut pool.get().unwrap();
        let restaurants = service::list_restaurants(conn).unwrap();
        assert_eq!(restaurants.len(), 3);
        assert_eq!(service::list_pizzas(conn).unwrap().len(), 3);
        let (_, listings) = service::get_restaurant(conn, restaurants[0].id).unwrap();
        assert_eq!(listings.len(), 1);
    }
}
