pub mod activity;
pub mod guestbook;
pub mod health;
