pub mod account;
pub mod ids;
pub mod transaction;
