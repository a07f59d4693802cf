use std::ops::RangeInclusive;

use diesel::prelude::*;

use crate::schema::{pizzas, restaurant_pizzas, restaurants};

pub const PRICE_RANGE: RangeInclusive<i32> = 1..=30;

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = restaurants)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub address: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = restaurants)]
pub struct NewRestaurant<'a> {
    pub name: &'a str,
    pub address: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Debug, Clone, PartialEq)]
#[diesel(table_name = pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Pizza {
    pub id: i32,
    pub name: String,
    pub ingredients: String,
}

#[derive(Insertable, Debug, PartialEq)]
#[diesel(table_name = pizzas)]
pub struct NewPizza<'a> {
    pub name: &'a str,
    pub ingredients: &'a str,
}

#[derive(Queryable, Selectable, Identifiable, Associations, Debug, Clone, PartialEq)]
#[diesel(belongs_to(Restaurant))]
#[diesel(belongs_to(Pizza))]
#[diesel(table_name = restaurant_pizzas)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct RestaurantPizza {
    pub id: i32,
    pub price: i32,
    pub restaurant_id: i32,
    pub pizza_id: i32,
}

/// A listing that has passed price validation and may be written.
#[derive(Insertable, Debug, Clone, Copy, PartialEq)]
#[diesel(table_name = restaurant_pizzas)]
pub struct NewRestaurantPizza {
    price: i32,
    restaurant_id: i32,
    pizza_id: i32,
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("price must be between 1 and 30, got {0}")]
pub struct InvalidPrice(pub i32);

pub fn validate_price(price: i32) -> Result<i32, InvalidPrice> {
    if PRICE_RANGE.contains(&price) {
        Ok(price)
    } else {
        Err(InvalidPrice(price))
    }
}

impl NewRestaurantPizza {
    pub fn new(price: i32, pizza_id: i32, restaurant_id: i32) -> Result<Self, InvalidPrice> {
        Ok(Self {
            price: validate_price(price)?,
            restaurant_id,
            pizza_id,
        })
    }
}
