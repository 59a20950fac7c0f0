//! Durable storage for named connection configurations.
//!
//! The store is an explicit handle rooted at a directory chosen by the
//! caller; nothing here touches the filesystem until a [`ConnectionStore`]
//! method is called.

mod connections;
pub mod dirs;

pub use connections::{
    validate_connection_name, ConnectionLookup, ConnectionStore, CONNECTION_FILE_SUFFIX,
    JSON_LEADERS,
};
