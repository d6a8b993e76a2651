//! RDAP registry client.
//!
//! One blocking round trip per uncached IP against an RDAP bootstrap
//! service, extracting the organization that announces the network block.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://rdap.org";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("registry returned {status} for {ip}")]
    Server { status: u16, ip: String },

    #[error("malformed registry response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Maps an IP to the organization name the registry records for it.
///
/// The resolver only depends on this trait; tests substitute counting or
/// failing fakes to exercise the cache contract without a network.
pub trait OrgLookup {
    fn org_name(&self, ip: &str) -> Result<String, LookupError>;
}

/// Subset of the RDAP IP-network response the classifier needs.
#[derive(Debug, Deserialize)]
struct RdapNetwork {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    remarks: Vec<RdapRemark>,
}

#[derive(Debug, Deserialize)]
struct RdapRemark {
    #[serde(default)]
    description: Vec<String>,
}

impl RdapNetwork {
    /// The network's registered name, falling back to the first remark
    /// line (typically the AS description) when the name is absent.
    fn organization(&self) -> String {
        self.name
            .as_deref()
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .or_else(|| {
                self.remarks
                    .iter()
                    .flat_map(|r| r.description.iter())
                    .find(|d| !d.is_empty())
                    .cloned()
            })
            .unwrap_or_else(|| "Unknown".to_string())
    }
}

/// Blocking RDAP client against a bootstrap base URL.
pub struct RdapClient {
    http: reqwest::blocking::Client,
    base_url: String,
}

impl RdapClient {
    pub fn new() -> Result<Self, LookupError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the client at a different RDAP service, e.g. a regional
    /// registry mirror or a test server.
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, LookupError> {
        let http = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }
}

impl OrgLookup for RdapClient {
    fn org_name(&self, ip: &str) -> Result<String, LookupError> {
        let url = format!("{}/ip/{}", self.base_url, ip);
        debug!(%url, "registry lookup");

        let resp = self.http.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(LookupError::Server {
                status: status.as_u16(),
                ip: ip.to_string(),
            });
        }

        let body = resp.text()?;
        let network: RdapNetwork = serde_json::from_str(&body)?;
        Ok(network.organization())
    }
}
