// Test helper modules shared by the unit and integration test binaries
//
// Usage:
//   #[path = "../helpers/mod.rs"]
//   mod helpers;
//   use helpers::*;

#![allow(dead_code)]

pub mod test_data;

pub use test_data::*;
