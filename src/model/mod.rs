pub mod entities;
pub mod snapshot;

pub use entities::*;
pub use snapshot::{SNAPSHOT_VERSION, StoreSnapshot};
