pub mod auth;
pub mod response;

pub use auth::AuthEmployee;
