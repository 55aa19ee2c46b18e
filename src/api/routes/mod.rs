//! API route handlers

pub mod countries;
pub mod health;
pub mod series;
