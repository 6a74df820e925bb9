mod error;
pub mod ids;

pub use error::{Result, StoreError};
