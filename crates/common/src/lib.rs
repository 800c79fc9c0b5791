/**
 * Shared time source for the domain services.
 *  Injected so tests can pin `created_at` stamps
 *  and active-window queries.
 */
pub mod clock;
/**
 * Cryptographic primitives for the secure envelope:
 *  - RSA keypair generation and PEM framing
 *  - Hybrid AES-256-GCM + RSA-OAEP encryption with AAD
 *  - Detached RSA-PKCS#1 v1.5 signatures
 */
pub mod crypto;
/**
 * Intentions: time-bounded planned actions with one
 *  or more polymorphic targets.
 */
pub mod intention;
/**
 * Locations: places an intention can point at, with
 *  the denormalized matcher used for cross-node
 *  reconciliation.
 */
pub mod location;
/**
 * Cross-node matching verdicts shared by the
 *  location and person matchers.
 */
pub mod matching;
/**
 * People and groups, the targets of proximity
 *  intentions.
 */
pub mod person;
/**
 * The reconciliation engine: maps a foreign sub-graph
 *  onto the local graph without writing to it.
 */
pub mod reconcile;
/**
 * The sharing layer: the self-contained payload, the
 *  builder that gathers it, and the secure envelope
 *  codec that carries it over an untrusted relay.
 */
pub mod sharing;

pub mod prelude {
    pub use crate::clock::Clock;
    pub use crate::crypto::CryptoError;
    pub use crate::intention::{Intention, IntentionService, QuerySpec, Target};
    pub use crate::location::{Location, LocationKind, LocationMatcher, LocationService};
    pub use crate::matching::MatchConfidence;
    pub use crate::person::{Group, Person, PersonMatcher, PersonService};
    pub use crate::reconcile::{MappingResult, Reconciler};
    pub use crate::sharing::{PayloadBuilder, SecureEnvelope, SharedPayload};
}
