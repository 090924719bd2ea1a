pub mod audit;
pub mod enquiry;
pub mod message;
pub mod order;
pub mod product;
pub mod profile;
pub mod route;
pub mod transaction;
pub mod user;

pub use audit::*;
pub use enquiry::*;
pub use message::*;
pub use order::*;
pub use product::*;
pub use profile::*;
pub use route::*;
pub use transaction::*;
pub use user::*;
