pub mod renderer;

pub use renderer::{DocumentBackend, DocumentRenderer};
