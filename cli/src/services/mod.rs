pub mod csv_service;

pub use csv_service::*;
