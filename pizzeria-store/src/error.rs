#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("price must be between 1 and 30, got {0}")]
    PriceOutOfRange(f64),
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Restaurant not found")]
    RestaurantNotFound,
    #[error("Pizza not found")]
    PizzaNotFound,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("database error: {0}")]
    Database(#[from] diesel::result::Error),
    #[error("connection error: {0}")]
    Connection(#[from] diesel::ConnectionError),
    #[error("migration error: {0}")]
    Migration(String),
}
