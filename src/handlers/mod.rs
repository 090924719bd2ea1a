pub mod audit_logs;
pub mod auth;
pub mod enquiries;
pub mod health;
pub mod messages;
pub mod orders;
pub mod products;
pub mod profiles;
pub mod response;
pub mod routes;
pub mod transactions;
pub mod users;
