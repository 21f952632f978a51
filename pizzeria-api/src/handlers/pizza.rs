use axum::{Router, extract::State, response::Json, routing::get};
use pizzeria_store::PizzeriaStore;
use tracing::instrument;

use crate::error::ApiError;
use crate::models::*;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/pizzas", get(list_pizzas))
}

#[utoipa::path(
    get,
    path = "/pizzas",
    responses(
        (status = 200, description = "List of pizzas", body = [Pizza]),
    ),
    tag = "pizzas"
)]
#[instrument(skip(state))]
pub async fn list_pizzas(State(state): State<AppState>) -> Result<Json<Vec<Pizza>>, ApiError> {
    let mut conn = state.conn.lock().await;
    let pizzas = PizzeriaStore::new(&mut conn).list_pizzas()?;

    Ok(Json(pizzas.into_iter().map(Pizza::from).collect()))
}
