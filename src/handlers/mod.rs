pub mod health;
pub mod moderation;
