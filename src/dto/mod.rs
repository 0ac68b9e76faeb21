pub mod auth;
pub mod cart;
pub mod categories;
pub mod import;
pub mod products;
pub mod uploads;
