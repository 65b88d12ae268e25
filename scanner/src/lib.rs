pub mod checker;
pub mod history;
pub mod marker;
pub mod status;

pub use checker::{StatusChecker, StatusReport};
pub use history::{StatusHistory, Transition};
pub use status::Status;
