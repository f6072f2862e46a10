pub mod health;
pub mod image;
