/**
 * The sharing orchestrator: end-to-end outbound and
 *  inbound workflows over the domain services, the
 *  envelope codec, and the external key and relay
 *  clients.
 */
pub mod app;
/**
 * HTTP clients for the external key directory and
 *  routing relay services.
 */
pub mod clients;
/**
 * Process configuration, loaded from defaults with
 *  an environment overlay.
 */
pub mod config;
/**
 * Process bootstrap helpers: signal-driven shutdown
 *  and panic logging.
 */
pub mod process;
