mod memory;
mod models;
mod provider;
mod service;

pub use memory::{MemoryPersonStore, MemoryPersonStoreError};
pub use models::{Group, Person, PersonMatcher};
pub use provider::{PersonStoreError, PersonStoreProvider};
pub use service::{PersonError, PersonService};
