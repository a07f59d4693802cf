use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::models::{InvalidPrice, NewPizza, NewRestaurant, NewRestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

const RESTAURANTS: [(&str, &str); 3] = [
    ("Karen's Pizza Shack", "address1"),
    ("Sanjay's Pizza", "address2"),
    ("Kiki's Pizza", "address3"),
];

const PIZZAS: [(&str, &str); 3] = [
    ("Emma", "Dough, Tomato Sauce, Cheese"),
    ("Geri", "Dough, Tomato Sauce, Cheese, Pepperoni"),
    ("Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard"),
];

/// (price, pizza index, restaurant index)
const LISTINGS: [(i32, usize, usize); 3] = [(1, 0, 0), (4, 1, 1), (5, 2, 2)];

#[derive(Debug, thiserror::Error)]
pub enum SeedError {
    #[error("invalid seed listing: {0}")]
    InvalidPrice(#[from] InvalidPrice),
    #[error("failed to write seed data: {0}")]
    Persistence(#[from] diesel::result::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Replaces the contents of all three tables with a small demo data set.
pub fn seed(conn: &mut SqliteConnection) -> Result<SeedSummary, SeedError> {
    seed_with(conn, &RESTAURANTS, &PIZZAS, &LISTINGS)
}

fn seed_with(
    conn: &mut SqliteConnection,
    restaurants_data: &[(&str, &str)],
    pizzas_data: &[(&str, &str)],
    listings_data: &[(i32, usize, usize)],
) -> Result<SeedSummary, SeedError> {
    conn.transaction(|conn| {
        diesel::delete(restaurant_pizzas::table).execute(conn)?;
        diesel::delete(pizzas::table).execute(conn)?;
        diesel::delete(restaurants::table).execute(conn)?;

        let restaurant_ids = restaurants_data
            .iter()
            .map(|&(name, address)| {
                diesel::insert_into(restaurants::table)
                    .values(NewRestaurant { name, address })
                    .returning(restaurants::id)
                    .get_result::<i32>(conn)
            })
            .collect::<QueryResult<Vec<_>>>()?;

        let pizza_ids = pizzas_data
            .iter()
            .map(|&(name, ingredients)| {
                diesel::insert_into(pizzas::table)
                    .values(NewPizza { name, ingredients })
                    .returning(pizzas::id)
                    .get_result::<i32>(conn)
            })
            .collect::<QueryResult<Vec<_>>>()?;

        let listings = listings_data
            .iter()
            .map(|&(price, pizza, restaurant)| {
                NewRestaurantPizza::new(price, pizza_ids[pizza], restaurant_ids[restaurant])
            })
            .collect::<Result<Vec<_>, _>>()?;
        let restaurant_pizzas = diesel::insert_into(restaurant_pizzas::table)
            .values(&listings)
            .execute(conn)?;

        Ok(SeedSummary {
            restaurants: restaurant_ids.len(),
            pizzas: pizza_ids.len(),
            restaurant_pizzas,
        })
    })
}
