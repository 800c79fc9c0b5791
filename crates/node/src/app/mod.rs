//! The sharing orchestrator.
//!
//! [`App`] owns the domain services and wires the payload builder, the
//! envelope codec, and the reconciler to the external key directory and
//! relay clients. Each call is one unit of work: one outbound share or one
//! inbound envelope. Calls for distinct envelopes may run concurrently.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use uuid::Uuid;

use common::clock::Clock;
use common::intention::{IntentionService, IntentionStoreProvider};
use common::location::{LocationService, LocationStoreProvider};
use common::person::{PersonService, PersonStoreProvider};
use common::reconcile::{MappingResult, ReconcileError, Reconciler};
use common::sharing::{self, EnvelopeError, PayloadBuilder, PayloadError, SecureEnvelope, SharedPayload};

use crate::clients::ClientError;

/// Fetches a user's public key from the key directory.
#[async_trait]
pub trait KeyFetcher: Send + Sync {
    async fn get_key(&self, user_id: &str) -> Result<Vec<u8>, ClientError>;
}

/// Dispatches a sealed envelope towards its recipient.
#[async_trait]
pub trait EnvelopeSender: Send + Sync {
    async fn send(&self, envelope: &SecureEnvelope) -> Result<(), ClientError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ShareError {
    #[error("failed to build shared payload: {0}")]
    Payload(#[from] PayloadError),
    #[error("failed to fetch recipient public key: {0}")]
    KeyLookup(#[source] ClientError),
    #[error("failed to seal envelope: {0}")]
    Envelope(#[from] EnvelopeError),
    #[error("failed to dispatch envelope: {0}")]
    Transport(#[source] ClientError),
    #[error("operation cancelled")]
    Cancelled,
}

#[derive(Debug, thiserror::Error)]
pub enum ReceiveError {
    #[error("failed to fetch sender public key: {0}")]
    KeyLookup(#[source] ClientError),
    #[error("envelope rejected: {0}")]
    Envelope(#[from] EnvelopeError),
    #[error("reconciliation failed: {0}")]
    Reconcile(#[from] ReconcileError),
    #[error("operation cancelled")]
    Cancelled,
}

/// The central application orchestrator.
///
/// Generic over the three store providers; the key and relay clients are
/// trait objects wired in at process construction. Private key material is
/// passed per call and never retained.
pub struct App<I, L, P>
where
    I: IntentionStoreProvider,
    L: LocationStoreProvider,
    P: PersonStoreProvider,
{
    pub intentions: IntentionService<I>,
    pub locations: LocationService<L>,
    pub people: PersonService<P>,
    builder: PayloadBuilder<I, L, P>,
    reconciler: Reconciler<L, P>,
    keys: Arc<dyn KeyFetcher>,
    router: Arc<dyn EnvelopeSender>,
}

impl<I, L, P> App<I, L, P>
where
    I: IntentionStoreProvider,
    L: LocationStoreProvider,
    P: PersonStoreProvider,
{
    pub fn new(
        intention_store: I,
        location_store: L,
        person_store: P,
        keys: Arc<dyn KeyFetcher>,
        router: Arc<dyn EnvelopeSender>,
        clock: Clock,
    ) -> Self {
        let builder = PayloadBuilder::new(
            intention_store.clone(),
            location_store.clone(),
            person_store.clone(),
        );
        let reconciler = Reconciler::new(location_store.clone(), person_store.clone());
        Self {
            intentions: IntentionService::new(intention_store, clock.clone()),
            locations: LocationService::new(location_store, clock.clone()),
            people: PersonService::new(person_store, clock),
            builder,
            reconciler,
            keys,
            router,
        }
    }

    /// Securely share one intention with another node.
    ///
    /// Gathers the sub-graph, fetches the recipient's public key, seals the
    /// envelope (encrypt, then sign the ciphertext), and hands it to the
    /// relay. Transport failures are surfaced; there is no retry here.
    ///
    /// `cancel` is the shutdown watch channel: a signal on it aborts the
    /// outstanding external call and returns [`ShareError::Cancelled`]. The
    /// sender half must stay alive for the duration of the call.
    pub async fn share_intention(
        &self,
        mut cancel: watch::Receiver<()>,
        sender_id: &str,
        recipient_id: &str,
        intention_id: Uuid,
        sender_private_key_pem: &[u8],
    ) -> Result<(), ShareError> {
        tracing::info!(
            sender_id,
            recipient_id,
            intention_id = %intention_id,
            "beginning intention sharing workflow"
        );

        let payload = self.builder.build(intention_id).await?;

        let recipient_key = tokio::select! {
            biased;
            _ = cancel.changed() => return Err(ShareError::Cancelled),
            key = self.keys.get_key(recipient_id) => key.map_err(ShareError::KeyLookup)?,
        };

        let envelope = sharing::seal(
            &payload,
            sender_id,
            recipient_id,
            &recipient_key,
            sender_private_key_pem,
        )?;

        tokio::select! {
            biased;
            _ = cancel.changed() => return Err(ShareError::Cancelled),
            sent = self.router.send(&envelope) => sent.map_err(ShareError::Transport)?,
        }

        tracing::info!(
            sender_id,
            recipient_id,
            intention_id = %intention_id,
            "completed intention sharing workflow"
        );
        Ok(())
    }

    /// Process one envelope received from the relay.
    ///
    /// Fetches the sender's public key, verifies the signature over the
    /// ciphertext, decrypts with the AAD reconstructed from the envelope
    /// header, decodes the payload, and reconciles it against the local
    /// graph. Nothing is merged into the local stores; the payload and its
    /// mapping are returned to the caller. Any failure rejects the whole
    /// envelope; partial results are never surfaced.
    pub async fn handle_incoming_envelope(
        &self,
        mut cancel: watch::Receiver<()>,
        envelope: &SecureEnvelope,
        recipient_private_key_pem: &[u8],
    ) -> Result<(SharedPayload, MappingResult), ReceiveError> {
        tracing::info!(
            sender_id = %envelope.sender_id,
            recipient_id = %envelope.recipient_id,
            "processing incoming envelope"
        );

        let sender_key = tokio::select! {
            biased;
            _ = cancel.changed() => return Err(ReceiveError::Cancelled),
            key = self.keys.get_key(&envelope.sender_id) => key.map_err(ReceiveError::KeyLookup)?,
        };

        let payload = sharing::open(envelope, &sender_key, recipient_private_key_pem)?;
        let mapping = self.reconciler.process_payload(&payload).await?;

        tracing::info!(
            sender_id = %envelope.sender_id,
            intention_id = %payload.intention.id,
            mapped_locations = mapping.location_mappings.len(),
            mapped_people = mapping.person_mappings.len(),
            "reconciled incoming envelope"
        );
        Ok((payload, mapping))
    }
}
