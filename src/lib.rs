pub mod config;
pub mod database;
pub mod error;
pub mod ledger;
pub mod reports;
pub mod web;

pub use error::EcoHotelError;
