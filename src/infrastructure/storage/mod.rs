//! File storage implementations.
//!
//! - [`LocalFileStorage`] - Stores uploads under a local root directory

mod local_file_storage;

pub use local_file_storage::LocalFileStorage;
