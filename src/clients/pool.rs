use std::sync::atomic::{AtomicUsize, Ordering};
use rquest_util::Emulation;
use crate::clients::http::HttpClient;
use crate::error::Result;
use tracing::debug;

/// Round-robins requests over clients emulating different browsers.
pub struct ClientPool {
    clients: Vec<HttpClient>,
    current: AtomicUsize,
}

impl ClientPool {
    pub fn new() -> Result<Self> {
        let emulations = vec![
            Emulation::Firefox136,
            Emulation::Chrome133,
            Emulation::Safari18_3,
            Emulation::Edge134,
        ];

        debug!("Creating client pool with {} emulations", emulations.len());

        let clients = emulations.into_iter()
            .map(HttpClient::new)
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            clients,
            current: AtomicUsize::new(0),
        })
    }

    pub fn next_client(&self) -> &HttpClient {
        let current = self.current.fetch_add(1, Ordering::SeqCst);
        &self.clients[current % self.clients.len()]
    }
}
