mod memory;
mod models;
mod provider;
mod service;

pub use memory::{MemoryIntentionStore, MemoryIntentionStoreError};
pub use models::{Intention, Target};
pub use provider::{IntentionStoreError, IntentionStoreProvider, QuerySpec};
pub use service::{IntentionError, IntentionService};
