//! Upload transport: a single blocking HTTP PUT per artifact.

use reqwest::blocking::Client;
use thiserror::Error;

use distpub_util::errors::DistError;

use crate::auth;
use crate::repository::ArtifactoryRepository;

/// One PUT to perform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    pub url: String,
    pub body: Vec<u8>,
    pub headers: Vec<(&'static str, String)>,
}

/// Why a single PUT did not succeed.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with a non-2xx status.
    #[error("HTTP {status}")]
    Status { status: String },

    /// The request never got a response.
    #[error("{0}")]
    Request(String),
}

/// Something that can PUT bytes to a URL.
///
/// The live implementation is [`HttpTransport`]; tests substitute a recording fake.
pub trait UploadTransport {
    fn put(&self, request: &UploadRequest) -> Result<(), TransportError>;
}

/// PUTs over HTTP with Basic authentication from the repository settings.
pub struct HttpTransport {
    client: Client,
    repo: ArtifactoryRepository,
}

impl HttpTransport {
    /// Transport using a default client. No request timeout is set.
    pub fn new(repo: ArtifactoryRepository) -> miette::Result<Self> {
        Ok(Self::with_client(build_client()?, repo))
    }

    /// Transport using a caller-configured client (timeouts, proxies, TLS).
    pub fn with_client(client: Client, repo: ArtifactoryRepository) -> Self {
        Self { client, repo }
    }
}

impl UploadTransport for HttpTransport {
    fn put(&self, request: &UploadRequest) -> Result<(), TransportError> {
        let mut req = self.client.put(&request.url).body(request.body.clone());
        for (name, value) in &request.headers {
            req = req.header(*name, value);
        }
        req = auth::apply_auth(req, &self.repo);

        let resp = req
            .send()
            .map_err(|e| TransportError::Request(e.to_string()))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(TransportError::Status {
                status: status.to_string(),
            });
        }
        tracing::debug!("PUT {} -> {status}", request.url);
        Ok(())
    }
}

/// Build a blocking reqwest client for uploads.
pub fn build_client() -> miette::Result<Client> {
    Client::builder()
        .timeout(None::<std::time::Duration>)
        .user_agent(concat!("distpub/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| {
            DistError::Network {
                message: format!("Failed to create HTTP client: {e}"),
            }
            .into()
        })
}
