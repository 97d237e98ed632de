pub mod entry_service;
pub mod escalation;
pub mod notification_service;
pub mod review_service;
pub mod stats;
