pub mod currency;
pub mod error;
pub mod format;
pub mod traits;

pub use currency::Currency;
pub use error::{AppError, Result};
pub use traits::{DocumentBackend, DocumentRenderer};
