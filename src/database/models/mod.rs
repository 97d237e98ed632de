pub mod employee;
pub mod job_order;
pub mod notification;
pub mod operation;
pub mod process;
pub mod product;
pub mod time_entry;

pub use employee::Employee;
pub use job_order::JobOrder;
pub use notification::Notification;
pub use operation::{Operation, OperationWithStage};
pub use process::Process;
pub use product::Product;
pub use time_entry::TimeEntry;
