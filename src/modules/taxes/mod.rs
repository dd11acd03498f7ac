pub mod models;
pub mod services;

pub use models::Tax;
pub use services::TaxCalculator;
