pub mod activity;
pub mod guestbook;
