use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::models::{self, InvalidPrice, NewRestaurantPizza};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("restaurant {0} not found")]
    RestaurantNotFound(i32),
    #[error(transparent)]
    InvalidPrice(#[from] InvalidPrice),
    #[error("persistence failure: {0}")]
    Persistence(#[from] diesel::result::Error),
}

pub fn list_restaurants(conn: &mut SqliteConnection) -> Result<Vec<models::Restaurant>, ServiceError> {
    Ok(restaurants::table
        .order(restaurants::id)
        .select(models::Restaurant::as_select())
        .load(conn)?)
}

pub fn get_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<(models::Restaurant, Vec<(models::RestaurantPizza, models::Pizza)>), ServiceError> {
    conn.transaction(|conn| {
        let restaurant = restaurants::table
            .find(restaurant_id)
            .select(models::Restaurant::as_select())
            .first(conn)
            .optional()?
            .ok_or(ServiceError::RestaurantNotFound(restaurant_id))?;

        let listings = models::RestaurantPizza::belonging_to(&restaurant)
            .inner_join(pizzas::table)
            .order(restaurant_pizzas::id)
            .select((
                models::RestaurantPizza::as_select(),
                models::Pizza::as_select(),
            ))
            .load(conn)?;

        Ok((restaurant, listings))
    })
}

/// Deletes the restaurant's listings and then the restaurant itself as one
/// unit. Returns how many listings went with it.
pub fn delete_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<usize, ServiceError> {
    conn.transaction(|conn| {
        let listings = diesel::delete(
            restaurant_pizzas::table.filter(restaurant_pizzas::restaurant_id.eq(restaurant_id)),
        )
        .execute(conn)?;

        let deleted = diesel::delete(restaurants::table.find(restaurant_id)).execute(conn)?;
        if deleted == 0 {
            return Err(ServiceError::RestaurantNotFound(restaurant_id));
        }

        Ok(listings)
    })
}

pub fn list_pizzas(conn: &mut SqliteConnection) -> Result<Vec<models::Pizza>, ServiceError> {
    Ok(pizzas::table
        .order(pizzas::id)
        .select(models::Pizza::as_select())
        .load(conn)?)
}

pub fn create_restaurant_pizza(
    conn: &mut SqliteConnection,
    price: i32,
    pizza_id: i32,
    restaurant_id: i32,
) -> Result<(models::RestaurantPizza, models::Pizza, models::Restaurant), ServiceError> {
    let listing = NewRestaurantPizza::new(price, pizza_id, restaurant_id)?;

    conn.transaction(|conn| {
        let created = diesel::insert_into(restaurant_pizzas::table)
            .values(&listing)
            .returning(models::RestaurantPizza::as_returning())
            .get_result(conn)?;

        let pizza = pizzas::table
            .find(created.pizza_id)
            .select(models::Pizza::as_select())
            .first(conn)?;
        let restaurant = restaurants::table
            .find(created.restaurant_id)
            .select(models::Restaurant::as_select())
            .first(conn)?;

        Ok((created, pizza, restaurant))
    })
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;
    use crate::db::test_pool;

    #[test]
    fn test_list_restaurants_in_id_order() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        insert_restaurant(conn, "Sottocasa NYC", "298 Atlantic Ave, Brooklyn, NY 11201");
        insert_restaurant(conn, "PizzArte", "69 W 55th St, New York, NY 10019");

        let results = list_restaurants(conn).unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].name, "Sottocasa NYC");
        assert_eq!(results[1].name, "PizzArte");
        assert!(results[0].id < results[1].id);
    }

    #[test]
    fn test_get_restaurant_with_listings() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        let restaurant_id = insert_restaurant(conn, "Karen's Pizza Shack", "address1");
        let other_id = insert_restaurant(conn, "Sanjay's Pizza", "address2");
        let emma = insert_pizza(conn, "Emma", "Dough, Tomato Sauce, Cheese");
        let geri = insert_pizza(conn, "Geri", "Dough, Tomato Sauce, Cheese, Pepperoni");
        insert_listing(conn, 5, emma, restaurant_id);
        insert_listing(conn, 7, geri, restaurant_id);
        insert_listing(conn, 9, geri, other_id);

        let (restaurant, listings) = get_restaurant(conn, restaurant_id).unwrap();

        assert_eq!(restaurant.name, "Karen's Pizza Shack");
        assert_eq!(listings.len(), 2);
        assert_eq!(listings[0].0.price, 5);
        assert_eq!(listings[0].1.name, "Emma");
        assert_eq!(listings[1].1.name, "Geri");
        assert!(listings.iter().all(|(rp, _)| rp.restaurant_id == restaurant_id));
    }

    #[test]
    fn test_get_restaurant_not_found() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();

        let result = get_restaurant(conn, 42);

        assert!(matches!(result, Err(ServiceError::RestaurantNotFound(42))));
    }

    #[test]
    fn test_delete_restaurant_cascades_to_listings() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        let restaurant_id = insert_restaurant(conn, "Karen's Pizza Shack", "address1");
        let other_id = insert_restaurant(conn, "Sanjay's Pizza", "address2");
        let pizza_id = insert_pizza(conn, "Emma", "Dough, Tomato Sauce, Cheese");
        for price in [1, 15, 30] {
            insert_listing(conn, price, pizza_id, restaurant_id);
        }
        insert_listing(conn, 10, pizza_id, other_id);

        let removed = delete_restaurant(conn, restaurant_id).unwrap();

        assert_eq!(removed, 3);
        assert_eq!(count_listings(conn), 1);
        assert_eq!(count_restaurants(conn), 1);
        assert!(matches!(
            get_restaurant(conn, restaurant_id),
            Err(ServiceError::RestaurantNotFound(_))
        ));
    }

    #[test]
    fn test_delete_restaurant_not_found() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();

        let result = delete_restaurant(conn, 7);

        assert!(matches!(result, Err(ServiceError::RestaurantNotFound(7))));
    }

    #[test]
    fn test_list_pizzas() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        insert_pizza(conn, "Emma", "Dough, Tomato Sauce, Cheese");
        insert_pizza(conn, "Geri", "Dough, Tomato Sauce, Cheese, Pepperoni");
        insert_pizza(conn, "Melanie", "Dough, Sauce, Ricotta, Red peppers, Mustard");

        let results = list_pizzas(conn).unwrap();

        assert_eq!(results.len(), 3);
        assert_eq!(results[2].ingredients, "Dough, Sauce, Ricotta, Red peppers, Mustard");
    }

    #[test]
    fn test_create_restaurant_pizza_accepts_every_price_in_range() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        let restaurant_id = insert_restaurant(conn, "Karen's Pizza Shack", "address1");
        let pizza_id = insert_pizza(conn, "Emma", "Dough, Tomato Sauce, Cheese");

        for price in 1..=30 {
            let (created, pizza, restaurant) =
                create_restaurant_pizza(conn, price, pizza_id, restaurant_id).unwrap();
            assert_eq!(created.price, price);
            assert_eq!(pizza.id, pizza_id);
            assert_eq!(restaurant.id, restaurant_id);
        }

        assert_eq!(count_listings(conn), 30);
    }

    #[test]
    fn test_create_restaurant_pizza_rejects_out_of_range_price() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        let restaurant_id = insert_restaurant(conn, "Karen's Pizza Shack", "address1");
        let pizza_id = insert_pizza(conn, "Emma", "Dough, Tomato Sauce, Cheese");

        for price in [i32::MIN, -1, 0, 31, 100] {
            let result = create_restaurant_pizza(conn, price, pizza_id, restaurant_id);
            assert!(matches!(result, Err(ServiceError::InvalidPrice(_))));
        }

        assert_eq!(count_listings(conn), 0);
    }

    #[test]
    fn test_create_restaurant_pizza_rejects_unknown_references() {
        let pool = test_pool();
        let conn = &mut pool.get().unwrap();
        let restaurant_id = insert_restaurant(conn, "Karen's Pizza Shack", "address1");
        let pizza_id = insert_pizza(conn, "Emma", "Dough, Tomato Sauce, Cheese");

        let missing_pizza = create_restaurant_pizza(conn, 10, pizza_id + 100, restaurant_id);
        let missing_restaurant = create_restaurant_pizza(conn, 10, pizza_id, restaurant_id + 100);

        assert!(matches!(missing_pizza, Err(ServiceError::Persistence(_))));
        assert!(matches!(missing_restaurant, Err(ServiceError::Persistence(_))));
        assert_eq!(count_listings(conn), 0);
    }
}
