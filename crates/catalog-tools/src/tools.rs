//! The extraction-layer entry point.

use crate::error::Result;
use crate::observer::{ExtractionObserver, TracingObserver};
use edc_catalog_client::{CatalogClient, CatalogConnection, ClientConfig, Transport};

/// Object resolution and column extraction on top of a [`CatalogClient`].
pub struct CatalogTools<T = CatalogConnection, O = TracingObserver> {
    pub(crate) client: CatalogClient<T>,
    pub(crate) observer: O,
}

impl CatalogTools<CatalogConnection, TracingObserver> {
    /// Open a connection and report diagnostics through `tracing`.
    pub fn connect(config: ClientConfig) -> Result<Self> {
        Ok(Self::new(CatalogClient::new(config)?))
    }
}

impl<T: Transport> CatalogTools<T, TracingObserver> {
    /// Wrap a client; verbosity follows the client's transport.
    pub fn new(client: CatalogClient<T>) -> Self {
        let observer = TracingObserver::new(client.transport().verbose());
        Self { client, observer }
    }
}

impl<T: Transport, O: ExtractionObserver> CatalogTools<T, O> {
    /// Replace the diagnostics observer.
    pub fn with_observer<P: ExtractionObserver>(self, observer: P) -> CatalogTools<T, P> {
        CatalogTools {
            client: self.client,
            observer,
        }
    }

    /// The underlying access client.
    pub fn client(&self) -> &CatalogClient<T> {
        &self.client
    }

    /// The observer receiving extraction diagnostics.
    pub fn observer(&self) -> &O {
        &self.observer
    }
}
