pub mod expirations;
pub mod general;
