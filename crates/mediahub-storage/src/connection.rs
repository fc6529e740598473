//! Azure Storage connection-string parsing.
//!
//! Accepts the `Key=Value;Key=Value` strings shown in the Azure portal, for
//! example `DefaultEndpointsProtocol=https;AccountName=acct;AccountKey=...;EndpointSuffix=core.windows.net`,
//! and the Azurite shorthand `UseDevelopmentStorage=true`.

use crate::traits::{BlobStoreError, BlobStoreResult};
use std::collections::HashMap;

const DEFAULT_ENDPOINT_SUFFIX: &str = "core.windows.net";
const DEFAULT_PROTOCOL: &str = "https";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AzureConnectionString {
    /// Local Azurite emulator with its well-known account.
    DevelopmentStorage,
    /// Shared-key access to a real or emulated account.
    SharedKey {
        account_name: String,
        account_key: String,
        /// Explicit blob service URL, when the string names one or uses a
        /// non-default endpoint suffix.
        blob_endpoint: Option<String>,
    },
}

impl AzureConnectionString {
    pub fn parse(raw: &str) -> BlobStoreResult<Self> {
        let mut fields: HashMap<String, String> = HashMap::new();
        for segment in raw.split(';').map(str::trim).filter(|s| !s.is_empty()) {
            let (key, value) = segment.split_once('=').ok_or_else(|| {
                BlobStoreError::Config(format!(
                    "Malformed connection string segment (expected Key=Value): {}",
                    segment
                ))
            })?;
            fields.insert(key.trim().to_lowercase(), value.trim().to_string());
        }

        if fields
            .get("usedevelopmentstorage")
            .is_some_and(|v| v.eq_ignore_ascii_case("true"))
        {
            return Ok(AzureConnectionString::DevelopmentStorage);
        }

        let account_name = fields.remove("accountname").ok_or_else(|| {
            BlobStoreError::Config("Connection string is missing AccountName".to_string())
        })?;
        let account_key = fields.remove("accountkey").ok_or_else(|| {
            BlobStoreError::Config(
                "Connection string is missing AccountKey (SAS connection strings are not supported)"
                    .to_string(),
            )
        })?;

        let blob_endpoint = match fields.remove("blobendpoint") {
            Some(endpoint) => Some(endpoint.trim_end_matches('/').to_string()),
            None => {
                let suffix = fields
                    .remove("endpointsuffix")
                    .unwrap_or_else(|| DEFAULT_ENDPOINT_SUFFIX.to_string());
                let protocol = fields
                    .remove("defaultendpointsprotocol")
                    .unwrap_or_else(|| DEFAULT_PROTOCOL.to_string());
                if suffix == DEFAULT_ENDPOINT_SUFFIX && protocol == DEFAULT_PROTOCOL {
                    None
                } else {
                    Some(format!("{}://{}.blob.{}", protocol, account_name, suffix))
                }
            }
        };

        Ok(AzureConnectionString::SharedKey {
            account_name,
            account_key,
            blob_endpoint,
        })
    }
}
