//! Per-endpoint JSON views.
//!
//! Each view nests only in one direction: a restaurant's listings carry
//! their pizza but never point back at the restaurant, and a freshly created
//! listing carries its pizza and restaurant without their listings.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models;

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    /// Free-text, comma separated ingredient list
    pub ingredients: String,
}

/// A listing as seen from its restaurant.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: Pizza,
}

#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RestaurantDetails {
    pub id: i32,
    pub name: String,
    pub address: String,
    pub restaurant_pizzas: Vec<RestaurantPizza>,
}

/// A listing with both of its ends, returned right after creation.
#[derive(Debug, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct RestaurantPizzaDetails {
    pub id: i32,
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: Pizza,
    pub restaurant: Restaurant,
}

pub fn serialize_restaurant(restaurant: &models::Restaurant) -> Restaurant {
    Restaurant {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
    }
}

pub fn serialize_pizza(pizza: &models::Pizza) -> Pizza {
    Pizza {
        id: pizza.id,
        name: pizza.name.clone(),
        ingredients: pizza.ingredients.clone(),
    }
}

pub fn serialize_restaurant_details(
    restaurant: &models::Restaurant,
    restaurant_pizzas: &[(models::RestaurantPizza, models::Pizza)],
) -> RestaurantDetails {
    RestaurantDetails {
        id: restaurant.id,
        name: restaurant.name.clone(),
        address: restaurant.address.clone(),
        restaurant_pizzas: restaurant_pizzas
            .iter()
            .map(|(rp, pizza)| RestaurantPizza {
                id: rp.id,
                price: rp.price,
                pizza_id: rp.pizza_id,
                restaurant_id: rp.restaurant_id,
                pizza: serialize_pizza(pizza),
            })
            .collect(),
    }
}

pub fn serialize_restaurant_pizza_details(
    restaurant_pizza: &models::RestaurantPizza,
    pizza: &models::Pizza,
    restaurant: &models::Restaurant,
) -> RestaurantPizzaDetails {
    RestaurantPizzaDetails {
        id: restaurant_pizza.id,
        price: restaurant_pizza.price,
        pizza_id: restaurant_pizza.pizza_id,
        restaurant_id: restaurant_pizza.restaurant_id,
        pizza: serialize_pizza(pizza),
        restaurant: serialize_restaurant(restaurant),
    }
}
