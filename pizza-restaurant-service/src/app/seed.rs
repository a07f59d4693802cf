use pizza_restaurant_service::seed::seed;
use tracing::info;

use super::Settings;

pub fn main(settings: &Settings) -> Result<(), Box<dyn std::error::Error>> {
    let pool = settings.migrated_pool()?;
    let summary = seed(&mut *pool.get()?)?;
    info!(
        restaurants = summary.restaurants,
        pizzas = summary.pizzas,
        restaurant_pizzas = summary.restaurant_pizzas,
        "seeded database"
    );
    Ok(())
}
