pub mod auth;
pub mod config;
pub mod course_creators;
pub mod database;
pub mod models;
#[cfg(test)]
pub mod test_utils;
pub mod utils;

pub use utils::state;
