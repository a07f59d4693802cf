use axum::{extract::State, response::Json, routing::get, Router};
use tracing::instrument;

use crate::error::ApiError;
use crate::serializer::{self, Pizza};
use crate::service;

use super::{with_connection, AppState};

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = Vec<Pizza>),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<Pizza>>, ApiError> {
    let pizzas = with_connection(&state, |conn| {
        Ok(service::list_pizzas(conn)?
            .iter()
            .map(serializer::serialize_pizza)
            .collect::<Vec<_>>())
    })
    .await?;

    Ok(Json(pizzas))
}
