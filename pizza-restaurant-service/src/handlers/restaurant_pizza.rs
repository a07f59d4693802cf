use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
    routing::post,
    Router,
};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use utoipa::ToSchema;

use crate::error::{ApiError, ValidationErrorResponse};
use crate::serializer::{self, RestaurantPizzaDetails};
use crate::service;

use super::{with_connection, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price between 1 and 30 inclusive
    pub price: i32,
    pub pizza_id: i32,
    pub restaurant_id: i32,
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Restaurant pizza created", body = RestaurantPizzaDetails),
        (status = 400, description = "Invalid price or unknown pizza/restaurant", body = ValidationErrorResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaDetails>), ApiError> {
    let Json(payload) = payload.map_err(|err| {
        warn!(error = %err, "malformed restaurant pizza payload");
        ApiError::Validation
    })?;

    let created = with_connection(&state, move |conn| {
        let (restaurant_pizza, pizza, restaurant) = service::create_restaurant_pizza(
            conn,
            payload.price,
            payload.pizza_id,
            payload.restaurant_id,
        )
        .map_err(ApiError::from_write)?;
        Ok(serializer::serialize_restaurant_pizza_details(
            &restaurant_pizza,
            &pizza,
            &restaurant,
        ))
    })
    .await?;
    info!(id = created.id, price = created.price, "created restaurant pizza");

    Ok((StatusCode::CREATED, Json(created)))
}
