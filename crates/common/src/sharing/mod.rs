mod builder;
mod envelope;
mod payload;

pub use builder::{PayloadBuilder, PayloadError};
pub use envelope::{open, routing_aad, seal, EnvelopeError, SecureEnvelope};
pub use payload::SharedPayload;
