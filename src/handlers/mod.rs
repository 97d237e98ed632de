pub mod admin;
pub mod auth;
pub mod notifications;
pub mod planner;
pub mod supervisor;
pub mod technician;
