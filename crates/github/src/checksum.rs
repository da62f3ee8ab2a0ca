//! SHA-256 of a remote resource.

use crate::error::{Error, Result};
use reqwest::Client;
use sha2::{Digest, Sha256};
use tracing::debug;

/// Download `url` and return the lowercase hex SHA-256 of its body.
///
/// The body is hashed chunk by chunk as it arrives and never buffered whole.
///
/// # Errors
///
/// Returns [`Error::Request`] on transport failure and [`Error::Download`]
/// if the server answers with a non-success status.
pub async fn sha256_of_url(client: &Client, url: &str) -> Result<String> {
    debug!(%url, "Downloading asset for checksum");

    let mut response = client.get(url).send().await.map_err(|e| Error::Request {
        url: url.to_string(),
        source: e,
    })?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::download(url, status.as_u16()));
    }

    let mut hasher = Sha256::new();
    let mut size = 0usize;
    while let Some(chunk) = response.chunk().await.map_err(|e| Error::Request {
        url: url.to_string(),
        source: e,
    })? {
        size += chunk.len();
        hasher.update(&chunk);
    }

    let digest = hex::encode(hasher.finalize());
    debug!(%url, size, sha256 = %digest, "Computed checksum");
    Ok(digest)
}
