pub mod account;
pub mod manager;

pub use account::Account;
pub use manager::{Database, DatabaseError};
