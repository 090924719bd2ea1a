//! Per-entity query helpers over the shared connection pool.

pub mod audit;
pub mod enquiries;
pub mod messages;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod routes;
pub mod transactions;
pub mod users;
