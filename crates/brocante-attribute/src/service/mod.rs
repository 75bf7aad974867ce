//! Attribute stores on top of SeaORM

pub mod definition;
pub mod value;
