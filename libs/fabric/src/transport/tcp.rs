use std::time::Duration;

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::debug;

use lodestar_core::{Error, ModuleAddress, Result};

use crate::endpoint::Endpoint;
use crate::transport::ConductorTransport;
use crate::wire::{read_frame, write_frame, CallEnvelope, CallOutcome};

/// TCP conductor transport
///
/// Opens a fresh connection per call, sends one [`CallEnvelope`] frame and
/// reads one [`CallOutcome`] frame. Connectionless-per-call keeps the
/// transport free of shared mutable state; pooling would belong in a
/// different implementation of [`ConductorTransport`], not here.
pub struct TcpConductor {
    connect_timeout: Option<Duration>,
    call_timeout: Option<Duration>,
}

impl TcpConductor {
    /// Transport with no timeouts; faults surface only from the OS.
    pub fn new() -> Self {
        Self {
            connect_timeout: None,
            call_timeout: None,
        }
    }

    /// Create a builder for configuring the transport
    pub fn builder() -> TcpConductorBuilder {
        TcpConductorBuilder::default()
    }

    async fn connect(&self, endpoint: &Endpoint) -> Result<TcpStream> {
        let connect_op = TcpStream::connect(endpoint.socket_addr());
        let stream = if let Some(timeout) = self.connect_timeout {
            tokio::time::timeout(timeout, connect_op)
                .await
                .map_err(|_| Error::Transport(format!("connect timeout to {endpoint}")))?
        } else {
            connect_op.await
        };
        stream.map_err(|e| Error::Transport(format!("connect to {endpoint}: {e}")))
    }

    async fn exchange(&self, endpoint: &Endpoint, envelope: &CallEnvelope) -> Result<CallOutcome> {
        let mut stream = self.connect(endpoint).await?;
        write_frame(&mut stream, &envelope.to_bytes()?).await?;
        let response = read_frame(&mut stream).await?;
        let _ = stream.shutdown().await;
        CallOutcome::from_bytes(&response)
    }
}

impl Default for TcpConductor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ConductorTransport for TcpConductor {
    async fn call(
        &self,
        endpoint: &Endpoint,
        module: &ModuleAddress,
        capability: &str,
        function: &str,
        payload: &[u8],
    ) -> Result<Vec<u8>> {
        let envelope = CallEnvelope {
            module: module.as_bytes().to_vec(),
            capability: capability.to_string(),
            function: function.to_string(),
            payload: payload.to_vec(),
        };

        debug!(%endpoint, capability, function, "conductor call");

        let exchange_op = self.exchange(endpoint, &envelope);
        let outcome = if let Some(timeout) = self.call_timeout {
            tokio::time::timeout(timeout, exchange_op)
                .await
                .map_err(|_| Error::Transport(format!("call timeout on {capability}/{function}")))?
        } else {
            exchange_op.await
        }?;

        match outcome {
            CallOutcome::Success(bytes) => Ok(bytes),
            CallOutcome::Failure(reason) => Err(Error::Remote(reason)),
        }
    }
}

/// Builder for configuring the TCP conductor transport
#[derive(Default)]
pub struct TcpConductorBuilder {
    connect_timeout: Option<Duration>,
    call_timeout: Option<Duration>,
}

impl TcpConductorBuilder {
    /// Set the connection timeout
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the timeout covering one whole request/response exchange
    pub fn call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = Some(timeout);
        self
    }

    pub fn build(self) -> TcpConductor {
        TcpConductor {
            connect_timeout: self.connect_timeout,
            call_timeout: self.call_timeout,
        }
    }
}
