use axum::{
    extract::{rejection::PathRejection, Path, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use tracing::{info, instrument};

use crate::error::{ApiError, ApiErrorResponse};
use crate::serializer::{self, Restaurant, RestaurantDetails};
use crate::service;

use super::{with_connection, AppState};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/restaurants", get(list_restaurants))
        .route(
            "/restaurants/{id}",
            get(get_restaurant).delete(delete_restaurant),
        )
}

// A malformed id names no restaurant.
fn restaurant_id(path: Result<Path<i32>, PathRejection>) -> Result<i32, ApiError> {
    path.map(|Path(id)| id)
        .map_err(|_| ApiError::RestaurantNotFound)
}

#[utoipa::path(
    get,
    path = "/restaurants",
    responses(
        (status = 200, description = "List of restaurants", body = Vec<Restaurant>),
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> Result<Json<Vec<Restaurant>>, ApiError> {
    let restaurants = with_connection(&state, |conn| {
        Ok(service::list_restaurants(conn)?
            .iter()
            .map(serializer::serialize_restaurant)
            .collect::<Vec<_>>())
    })
    .await?;

    Ok(Json(restaurants))
}

#[utoipa::path(
    get,
    path = "/restaurants/{id}",
    responses(
        (status = 200, description = "Restaurant details", body = RestaurantDetails),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn get_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<Json<RestaurantDetails>, ApiError> {
    let id = restaurant_id(path)?;

    let details = with_connection(&state, move |conn| {
        let (restaurant, listings) = service::get_restaurant(conn, id)?;
        Ok(serializer::serialize_restaurant_details(
            &restaurant,
            &listings,
        ))
    })
    .await?;

    Ok(Json(details))
}

#[utoipa::path(
    delete,
    path = "/restaurants/{id}",
    responses(
        (status = 204, description = "Restaurant and its pizza listings deleted"),
        (status = 404, description = "Restaurant not found", body = ApiErrorResponse),
    ),
    params(
        ("id" = i32, Path, description = "Restaurant ID")
    ),
    tag = "restaurants"
)]
#[instrument(skip(state))]
pub async fn delete_restaurant(
    State(state): State<AppState>,
    path: Result<Path<i32>, PathRejection>,
) -> Result<StatusCode, ApiError> {
    let id = restaurant_id(path)?;

    let listings =
        with_connection(&state, move |conn| Ok(service::delete_restaurant(conn, id)?)).await?;
    info!(restaurant_id = id, listings, "deleted restaurant");

    Ok(StatusCode::NO_CONTENT)
}
