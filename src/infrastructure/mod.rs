//! Filesystem locations inside the Zellij plugin sandbox, where the host
//! filesystem is mounted under `/host`.

pub mod paths;

pub use paths::{get_data_dir, APP_DIR_NAME};
