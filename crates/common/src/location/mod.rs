mod memory;
mod models;
mod provider;
mod service;

pub use memory::{MemoryLocationStore, MemoryLocationStoreError};
pub use models::{Location, LocationKind, LocationMatcher};
pub use provider::{LocationStoreError, LocationStoreProvider};
pub use service::{LocationError, LocationService};
