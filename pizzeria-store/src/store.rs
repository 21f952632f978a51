use diesel::{insert_into, prelude::*, sqlite::SqliteConnection};
use tracing::debug;

use crate::error::StoreError;
use crate::models::{
    NewPizza, NewRestaurant, NewRestaurantPizza, Pizza, Restaurant, RestaurantDetails,
    RestaurantPizza, RestaurantPizzaDetails,
};
use crate::schema::{pizzas, restaurant_pizzas, restaurants};

/// Data-model operations over one borrowed connection. Every operation that
/// touches more than one statement runs in its own transaction, which is
/// rolled back when the operation returns an error.
pub struct PizzeriaStore<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> PizzeriaStore<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        Self { conn }
    }

    pub fn list_restaurants(&mut self) -> Result<Vec<Restaurant>, StoreError> {
        Ok(restaurants::table
            .order(restaurants::id)
            .select(Restaurant::as_select())
            .load(self.conn)?)
    }

    pub fn list_pizzas(&mut self) -> Result<Vec<Pizza>, StoreError> {
        Ok(pizzas::table
            .order(pizzas::id)
            .select(Pizza::as_select())
            .load(self.conn)?)
    }

    pub fn find_restaurant(&mut self, restaurant_id: i32) -> Result<RestaurantDetails, StoreError> {
        self.conn.transaction::<_, StoreError, _>(|conn| {
            let restaurant = get_restaurant(conn, restaurant_id)?;

            let restaurant_pizzas = RestaurantPizza::belonging_to(&restaurant)
                .inner_join(pizzas::table)
                .order(restaurant_pizzas::id)
                .select((RestaurantPizza::as_select(), Pizza::as_select()))
                .load(conn)?;

            Ok(RestaurantDetails {
                restaurant,
                restaurant_pizzas,
            })
        })
    }

    pub fn create_restaurant(
        &mut self,
        name: &str,
        address: &str,
    ) -> Result<Restaurant, StoreError> {
        let restaurant = insert_into(restaurants::table)
            .values(NewRestaurant { name, address })
            .returning(Restaurant::as_returning())
            .get_result(self.conn)?;
        debug!(id = restaurant.id, "created restaurant");
        Ok(restaurant)
    }

    pub fn create_pizza(&mut self, name: &str, ingredients: &str) -> Result<Pizza, StoreError> {
        let pizza = insert_into(pizzas::table)
            .values(NewPizza { name, ingredients })
            .returning(Pizza::as_returning())
            .get_result(self.conn)?;
        debug!(id = pizza.id, "created pizza");
        Ok(pizza)
    }

    /// Removes the restaurant and every restaurant pizza pointing at it.
    pub fn delete_restaurant(&mut self, restaurant_id: i32) -> Result<(), StoreError> {
        self.conn.transaction::<_, StoreError, _>(|conn| {
            let restaurant = get_restaurant(conn, restaurant_id)?;

            let removed = diesel::delete(
                restaurant_pizzas::table.filter(restaurant_pizzas::restaurant_id.eq(restaurant.id)),
            )
            .execute(conn)?;
            diesel::delete(restaurants::table.find(restaurant.id)).execute(conn)?;

            debug!(id = restaurant.id, removed, "deleted restaurant");
            Ok(())
        })
    }

    /// Inserts a restaurant pizza after checking that both referenced rows
    /// exist. The restaurant is checked first.
    pub fn create_restaurant_pizza(
        &mut self,
        new_restaurant_pizza: NewRestaurantPizza,
    ) -> Result<RestaurantPizzaDetails, StoreError> {
        self.conn.transaction::<_, StoreError, _>(|conn| {
            let restaurant = get_restaurant(conn, new_restaurant_pizza.restaurant_id())?;
            let pizza = pizzas::table
                .find(new_restaurant_pizza.pizza_id())
                .select(Pizza::as_select())
                .first(conn)
                .optional()?
                .ok_or(StoreError::PizzaNotFound)?;

            let restaurant_pizza = insert_into(restaurant_pizzas::table)
                .values(&new_restaurant_pizza)
                .returning(RestaurantPizza::as_returning())
                .get_result(conn)?;
            debug!(id = restaurant_pizza.id, "created restaurant pizza");

            Ok(RestaurantPizzaDetails {
                restaurant_pizza,
                restaurant,
                pizza,
            })
        })
    }
}

fn get_restaurant(
    conn: &mut SqliteConnection,
    restaurant_id: i32,
) -> Result<Restaurant, StoreError> {
    restaurants::table
        .find(restaurant_id)
        .select(Restaurant::as_select())
        .first(conn)
        .optional()?
        .ok_or(StoreError::RestaurantNotFound)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Price;
    use crate::test_connection;

    fn count_restaurant_pizzas(conn: &mut SqliteConnection, restaurant_id: i32) -> i64 {
        restaurant_pizzas::table
            .filter(restaurant_pizzas::restaurant_id.eq(restaurant_id))
            .count()
            .get_result(conn)
            .unwrap()
    }

    #[test]
    fn test_list_restaurants_in_id_order() {
        let conn = &mut test_connection();
        let mut store = PizzeriaStore::new(conn);
        assert!(store.list_restaurants().unwrap().is_empty());

        let first = store.create_restaurant("Karen's Pizza Shack", "address1").unwrap();
        let second = store.create_restaurant("Sanjay's Pizza", "address2").unwrap();

        let restaurants = store.list_restaurants().unwrap();
        assert_eq!(restaurants, vec![first, second]);
    }

    #[test]
    fn test_list_pizzas() {
        let conn = &mut test_connection();
        let mut store = PizzeriaStore::new(conn);
        store.create_pizza("Emma", "Dough, Tomato Sauce, Cheese").unwrap();

        let pizzas = store.list_pizzas().unwrap();
        assert_eq!(pizzas.len(), 1);
        assert_eq!(pizzas[0].name, "Emma");
        assert_eq!(pizzas[0].ingredients, "Dough, Tomato Sauce, Cheese");
    }

    #[test]
    fn test_find_restaurant_with_pizzas() {
        let conn = &mut test_connection();
        let mut store = PizzeriaStore::new(conn);
        let restaurant = store.create_restaurant("Kiki's Pizza", "address3").unwrap();
        let other = store.create_restaurant("Other", "elsewhere").unwrap();
        let pizza = store.create_pizza("Geri", "Dough, Cheese, Pepperoni").unwrap();

        let price = Price::new(5.0).unwrap();
        store
            .create_restaurant_pizza(NewRestaurantPizza::new(price, pizza.id, restaurant.id))
            .unwrap();
        store
            .create_restaurant_pizza(NewRestaurantPizza::new(price, pizza.id, other.id))
            .unwrap();

        let details = store.find_restaurant(restaurant.id).unwrap();
        assert_eq!(details.restaurant, restaurant);
        assert_eq!(details.restaurant_pizzas.len(), 1);
        let (restaurant_pizza, nested_pizza) = &details.restaurant_pizzas[0];
        assert_eq!(restaurant_pizza.price, 5.0);
        assert_eq!(restaurant_pizza.restaurant_id, restaurant.id);
        assert_eq!(nested_pizza, &pizza);
    }

    #[test]
    fn test_find_restaurant_not_found() {
        let conn = &mut test_connection();
        let mut store = PizzeriaStore::new(conn);
        assert!(matches!(
            store.find_restaurant(42),
            Err(StoreError::RestaurantNotFound)
        ));
    }

    #[test]
    fn test_delete_restaurant_cascades() {
        let conn = &mut test_connection();
        let (restaurant_id, other_id) = {
            let mut store = PizzeriaStore::new(conn);
            let restaurant = store.create_restaurant("Karen's Pizza Shack", "address1").unwrap();
            let other = store.create_restaurant("Sanjay's Pizza", "address2").unwrap();
            let pizza = store.create_pizza("Emma", "Dough").unwrap();
            let menu = [(1.0, restaurant.id), (30.0, restaurant.id), (10.0, other.id)];
            for (price, restaurant_id) in menu {
                store
                    .create_restaurant_pizza(NewRestaurantPizza::new(
                        Price::new(price).unwrap(),
                        pizza.id,
                        restaurant_id,
                    ))
                    .unwrap();
            }

            store.delete_restaurant(restaurant.id).unwrap();
            assert!(matches!(
                store.find_restaurant(restaurant.id),
                Err(StoreError::RestaurantNotFound)
            ));
            (restaurant.id, other.id)
        };

        assert_eq!(count_restaurant_pizzas(conn, restaurant_id), 0);
        assert_eq!(count_restaurant_pizzas(conn, other_id), 1);
        // pizzas are never removed
        assert_eq!(PizzeriaStore::new(conn).list_pizzas().unwrap().len(), 1);
    }

    #[test]
    fn test_delete_missing_restaurant() {
        let conn = &mut test_connection();
        let mut store = PizzeriaStore::new(conn);
        let restaurant = store.create_restaurant("Kiki's Pizza", "address3").unwrap();

        assert!(matches!(
            store.delete_restaurant(restaurant.id + 1),
            Err(StoreError::RestaurantNotFound)
        ));
        assert_eq!(store.list_restaurants().unwrap(), vec![restaurant]);
    }

    #[test]
    fn test_create_restaurant_pizza() {
        let conn = &mut test_connection();
        let mut store = PizzeriaStore::new(conn);
        let restaurant = store.create_restaurant("Kiki's Pizza", "address3").unwrap();
        let pizza = store.create_pizza("Melanie", "Dough, Sauce, Ricotta").unwrap();

        let created = store
            .create_restaurant_pizza(NewRestaurantPizza::new(
                Price::new(12.5).unwrap(),
                pizza.id,
                restaurant.id,
            ))
            .unwrap();
        assert_eq!(created.restaurant, restaurant);
        assert_eq!(created.pizza, pizza);
        assert_eq!(created.restaurant_pizza.price, 12.5);

        // duplicate pairs are accepted
        let duplicate = store
            .create_restaurant_pizza(NewRestaurantPizza::new(
                Price::new(13.0).unwrap(),
                pizza.id,
                restaurant.id,
            ))
            .unwrap();
        assert_ne!(duplicate.restaurant_pizza.id, created.restaurant_pizza.id);
    }

    #[test]
    fn test_create_restaurant_pizza_dangling_references() {
        let conn = &mut test_connection();
        {
            let mut store = PizzeriaStore::new(conn);
            let restaurant = store.create_restaurant("Kiki's Pizza", "address3").unwrap();
            let pizza = store.create_pizza("Melanie", "Dough").unwrap();
            let price = Price::new(10.0).unwrap();

            assert!(matches!(
                store.create_restaurant_pizza(NewRestaurantPizza::new(price, pizza.id, 999)),
                Err(StoreError::RestaurantNotFound)
            ));
            assert!(matches!(
                store.create_restaurant_pizza(NewRestaurantPizza::new(price, 999, restaurant.id)),
                Err(StoreError::PizzaNotFound)
            ));
        }

        let total: i64 = restaurant_pizzas::table.count().get_result(conn).unwrap();
        assert_eq!(total, 0);
    }
}
