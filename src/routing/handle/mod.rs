pub mod auth;
pub mod meetings;
pub mod conversations;
