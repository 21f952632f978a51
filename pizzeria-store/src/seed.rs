use diesel::{prelude::*, sqlite::SqliteConnection};
use tracing::info;

use crate::error::StoreError;
use crate::models::{NewRestaurantPizza, Price};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};
use crate::store::PizzeriaStore;

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

/// (restaurant index, pizza index, price)
const MENU: [(usize, usize, f64); 3] = [(0, 0, 1.0), (1, 1, 4.0), (2, 2, 5.0)];

#[derive(Debug, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub restaurants: usize,
    pub pizzas: usize,
    pub restaurant_pizzas: usize,
}

/// Replaces the contents of every table with the sample data set.
pub fn seed(conn: &mut SqliteConnection) -> Result<SeedSummary, StoreError> {
    let summary = conn.transaction::<_, StoreError, _>(|conn| {
        diesel::delete(restaurant_pizzas::table).execute(conn)?;
        diesel::delete(restaurants::table).execute(conn)?;
        diesel::delete(pizzas::table).execute(conn)?;

        let mut store = PizzeriaStore::new(conn);
        let restaurants = RESTAURANTS
            .iter()
            .map(|(name, address)| store.create_restaurant(name, address))
            .collect::<Result<Vec<_>, _>>()?;
        let pizzas = PIZZAS
            .iter()
            .map(|(name, ingredients)| store.create_pizza(name, ingredients))
            .collect::<Result<Vec<_>, _>>()?;

        for &(restaurant, pizza, price) in MENU.iter() {
            store.create_restaurant_pizza(NewRestaurantPizza::new(
                Price::new(price)?,
                pizzas[pizza].id,
                restaurants[restaurant].id,
            ))?;
        }

        Ok(SeedSummary {
            restaurants: restaurants.len(),
            pizzas: pizzas.len(),
            restaurant_pizzas: MENU.len(),
        })
    })?;

    info!(
        restaurants = summary.restaurants,
        pizzas = summary.pizzas,
        restaurant_pizzas = summary.restaurant_pizzas,
        "seeded database"
    );
    Ok(summary)
}
