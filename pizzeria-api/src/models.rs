use pizzeria_store::models::{
    self as store, NewRestaurantPizza, Price, RestaurantDetails, RestaurantPizzaDetails,
};
use serde::{Deserialize, Serialize, Serializer};
use utoipa::ToSchema;

use crate::error::ApiError;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Restaurant {
    /// Unique identifier for the restaurant
    pub id: i32,
    /// Name of the restaurant
    pub name: String,
    /// Street address of the restaurant
    pub address: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct Pizza {
    /// Unique identifier for the pizza
    pub id: i32,
    /// Name of the pizza
    pub name: String,
    /// Free-text list of ingredients
    pub ingredients: String,
}

/// A pizza as offered by one restaurant, nested inside [`RestaurantDetailsResponse`].
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantPizzaItem {
    pub id: i32,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: Pizza,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantDetailsResponse {
    pub id: i32,
    pub name: String,
    pub address: String,
    /// Pizzas offered by the restaurant with their prices
    pub restaurant_pizzas: Vec<RestaurantPizzaItem>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RestaurantPizzaResponse {
    pub id: i32,
    #[serde(serialize_with = "serialize_price")]
    pub price: f64,
    pub pizza_id: i32,
    pub restaurant_id: i32,
    pub pizza: Pizza,
    pub restaurant: Restaurant,
}

/// Fields are optional so that absent or null values are reported as
/// validation errors instead of a deserialization failure.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateRestaurantPizzaRequest {
    /// Price between 1 and 30 inclusive, whole or fractional
    pub price: Option<f64>,
    pub pizza_id: Option<i32>,
    pub restaurant_id: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiErrorResponse {
    /// Error message
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiValidationErrorResponse {
    /// Validation error messages
    pub errors: Vec<String>,
}

// Whole prices are written as JSON integers.
fn serialize_price<S: Serializer>(price: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if price.fract() == 0.0 {
        serializer.serialize_i64(*price as i64)
    } else {
        serializer.serialize_f64(*price)
    }
}

impl CreateRestaurantPizzaRequest {
    pub fn into_new_restaurant_pizza(self) -> Result<NewRestaurantPizza, ApiError> {
        let (price, pizza_id, restaurant_id) = match (self.price, self.pizza_id, self.restaurant_id)
        {
            (Some(price), Some(pizza_id), Some(restaurant_id)) => (price, pizza_id, restaurant_id),
            (price, pizza_id, restaurant_id) => {
                let missing = [
                    ("price", price.is_none()),
                    ("pizza_id", pizza_id.is_none()),
                    ("restaurant_id", restaurant_id.is_none()),
                ];
                return Err(ApiError::Validation(
                    missing
                        .into_iter()
                        .filter(|(_, absent)| *absent)
                        .map(|(field, _)| format!("{field} is required"))
                        .collect(),
                ));
            }
        };

        Ok(NewRestaurantPizza::new(
            Price::new(price)?,
            pizza_id,
            restaurant_id,
        ))
    }
}

impl From<store::Restaurant> for Restaurant {
    fn from(r: store::Restaurant) -> Self {
        Self {
            id: r.id,
            name: r.name,
            address: r.address,
        }
    }
}

impl From<store::Pizza> for Pizza {
    fn from(p: store::Pizza) -> Self {
        Self {
            id: p.id,
            name: p.name,
            ingredients: p.ingredients,
        }
    }
}

impl From<RestaurantDetails> for RestaurantDetailsResponse {
    fn from(details: RestaurantDetails) -> Self {
        Self {
            id: details.restaurant.id,
            name: details.restaurant.name,
            address: details.restaurant.address,
            restaurant_pizzas: details
                .restaurant_pizzas
                .into_iter()
                .map(|(rp, pizza)| RestaurantPizzaItem {
                    id: rp.id,
                    price: rp.price,
                    pizza_id: rp.pizza_id,
                    restaurant_id: rp.restaurant_id,
                    pizza: pizza.into(),
                })
                .collect(),
        }
    }
}

impl From<RestaurantPizzaDetails> for RestaurantPizzaResponse {
    fn from(details: RestaurantPizzaDetails) -> Self {
        let rp = details.restaurant_pizza;
        Self {
            id: rp.id,
            price: rp.price,
            pizza_id: rp.pizza_id,
            restaurant_id: rp.restaurant_id,
            pizza: details.pizza.into(),
            restaurant: details.restaurant.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(
        price: Option<f64>,
        pizza_id: Option<i32>,
        restaurant_id: Option<i32>,
    ) -> CreateRestaurantPizzaRequest {
        CreateRestaurantPizzaRequest {
            price,
            pizza_id,
            restaurant_id,
        }
    }

    #[test]
    fn test_request_reports_every_missing_field() {
        match request(None, Some(1), None).into_new_restaurant_pizza() {
            Err(ApiError::Validation(errors)) => assert_eq!(
                errors,
                vec!["price is required", "restaurant_id is required"]
            ),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_request_rejects_price_out_of_range() {
        for price in [0.0, 31.0, 30.5, 2147483648.0] {
            match request(Some(price), Some(1), Some(1)).into_new_restaurant_pizza() {
                Err(ApiError::Validation(errors)) => assert_eq!(errors, vec!["validation errors"]),
                other => panic!("unexpected {other:?}"),
            }
        }
    }

    #[test]
    fn test_request_builds_insert() {
        let new = request(Some(7.5), Some(2), Some(3))
            .into_new_restaurant_pizza()
            .unwrap();
        assert_eq!(new.price(), 7.5);
        assert_eq!(new.pizza_id(), 2);
        assert_eq!(new.restaurant_id(), 3);
    }

    #[test]
    fn test_any_json_number_reaches_price_check() {
        for body in [
            r#"{"price": 12, "pizza_id": 1, "restaurant_id": 1}"#,
            r#"{"price": 12.5, "pizza_id": 1, "restaurant_id": 1}"#,
            r#"{"price": 2147483648, "pizza_id": 1, "restaurant_id": 1}"#,
            r#"{"price": 1e10, "pizza_id": 1, "restaurant_id": 1}"#,
        ] {
            let parsed: CreateRestaurantPizzaRequest = serde_json::from_str(body).unwrap();
            assert!(parsed.price.is_some(), "{body}");
        }
    }

    #[test]
    fn test_price_serialization_keeps_whole_numbers_integral() {
        let item = |price| RestaurantPizzaItem {
            id: 1,
            price,
            pizza_id: 2,
            restaurant_id: 3,
            pizza: Pizza {
                id: 2,
                name: "Emma".to_string(),
                ingredients: "Dough".to_string(),
            },
        };
        assert_eq!(serde_json::to_value(item(5.0)).unwrap()["price"], serde_json::json!(5));
        assert_eq!(
            serde_json::to_value(item(12.5)).unwrap()["price"],
            serde_json::json!(12.5)
        );
    }

    #[test]
    fn test_null_fields_deserialize_as_missing() {
        let parsed: CreateRestaurantPizzaRequest =
            serde_json::from_str(r#"{"price": null, "pizza_id": 1}"#).unwrap();
        assert_eq!(parsed.price, None);
        assert_eq!(parsed.pizza_id, Some(1));
        assert_eq!(parsed.restaurant_id, None);
    }
}
