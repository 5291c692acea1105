use crate::error::{IconError, Result};
use crate::mapping::{parse_mapping_bytes, write_icon_mapping};
use std::path::Path;
use std::time::Duration;
use tracing::{info, instrument};

/// Downloads icon mapping files over HTTP
pub struct Fetcher {
    client: reqwest::blocking::Client,
}

impl Fetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("ifc_icons/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    /// GET `url` and return the body, failing on non-2xx responses
    pub fn get_bytes(&self, url: &str) -> Result<Vec<u8>> {
        let resp = self.client.get(url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(IconError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(resp.bytes()?.to_vec())
    }

    /// Download an icon mapping, validate it, and store it at `dest`.
    /// Returns the number of classes in the mapping.
    #[instrument(skip(self, dest), fields(dest = %dest.display()))]
    pub fn download_mapping(&self, url: &str, dest: &Path) -> Result<usize> {
        let bytes = self.get_bytes(url)?;
        let mapping = parse_mapping_bytes(&bytes)?;
        write_icon_mapping(dest, &mapping)?;
        info!("Saved {} icon assignments from {}", mapping.len(), url);
        Ok(mapping.len())
    }
}
