mod error;
mod key_service;
mod routing;

pub use error::ClientError;
pub use key_service::KeyServiceClient;
pub use routing::RoutingServiceClient;
