pub mod audit;
pub mod cart;
pub mod menu;
pub mod orders;
pub mod payments;
pub mod platform;
pub mod public;
pub mod settings;
