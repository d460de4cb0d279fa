//! Command and result types consumed by the domain services.

pub mod items;
