pub mod github;
pub mod streaks;
