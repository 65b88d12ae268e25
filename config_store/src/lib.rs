pub mod db;
pub mod error;
pub mod interface;
pub mod models;

pub use db::{CONFIG, DATA_ROOT_DIR};
pub use interface::{ConfigStore, ConfigWrite, borrow_config_checked, borrow_config_mut_checked};
pub use models::Config;
