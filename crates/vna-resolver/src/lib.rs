//! Runtime resolution of asset identifiers and aliases to fetchable paths.
//!
//! The central contract: `Err` means the manifest (or a sibling document)
//! could not be loaded at all — an infrastructure failure. A missing asset
//! is the expected, recoverable case and comes back as `Ok(None)`.

mod cache;
mod resolver;
mod transport;

pub use cache::ManifestCache;
pub use resolver::{Category, ResolverConfig, ScenarioResolver};
pub use transport::{DynTransport, HttpTransport, Transport, TransportError, TransportResult};

pub type ResolveResult<T> = Result<T, ResolveError>;

#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    #[error("manifest for scenario '{scenario_id}' could not be loaded: {source}")]
    Manifest {
        scenario_id: String,
        #[source]
        source: TransportError,
    },
    #[error("document at {url} could not be loaded: {source}")]
    Fetch {
        url: String,
        #[source]
        source: TransportError,
    },
    #[error("malformed document at {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}
