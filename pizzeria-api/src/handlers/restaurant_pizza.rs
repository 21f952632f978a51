use axum::{
    Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::Json,
    routing::post,
};
use pizzeria_store::PizzeriaStore;
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/restaurant_pizzas", post(create_restaurant_pizza))
}

#[utoipa::path(
    post,
    path = "/restaurant_pizzas",
    request_body = CreateRestaurantPizzaRequest,
    responses(
        (status = 201, description = "Restaurant pizza created", body = RestaurantPizzaResponse),
        (status = 400, description = "Malformed body or price outside 1..=30", body = ApiValidationErrorResponse),
        (status = 404, description = "Restaurant or pizza not found", body = ApiErrorResponse),
    ),
    tag = "restaurant_pizzas"
)]
#[instrument(skip(state))]
pub async fn create_restaurant_pizza(
    State(state): State<AppState>,
    payload: Result<Json<CreateRestaurantPizzaRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RestaurantPizzaResponse>), ApiError> {
    let Json(payload) = payload?;
    let new_restaurant_pizza = payload.into_new_restaurant_pizza()?;

    let mut conn = state.conn.lock().await;
    let created = PizzeriaStore::new(&mut conn).create_restaurant_pizza(new_restaurant_pizza)?;

    Ok((StatusCode::CREATED, Json(created.into())))
}
