pub mod database;
pub mod geocoding;
pub mod repositories;

pub use database::*;
pub use geocoding::*;
pub use repositories::*;
