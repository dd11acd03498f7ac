mod tax;

pub use tax::{normalize_rate, Tax, RATE_SIGNIFICANT_DIGITS};
