//! Ingestion of transaction records from external files

pub mod csv;

pub use csv::*;
