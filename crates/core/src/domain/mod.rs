pub mod agent;
pub mod cart;
pub mod message;
pub mod product;
