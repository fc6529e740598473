//! Cosmos DB master-key request signing.
//!
//! Every REST call carries an `authorization` header derived from the verb,
//! resource type, resource link and the `x-ms-date` value, signed with
//! HMAC-SHA256 over the decoded account key.

use crate::traits::{MetadataStoreError, MetadataStoreResult};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use reqwest::Method;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Decoded account master key
#[derive(Clone)]
pub struct MasterKey(Vec<u8>);

impl MasterKey {
    pub fn from_base64(encoded: &str) -> MetadataStoreResult<Self> {
        STANDARD
            .decode(encoded.trim())
            .map(MasterKey)
            .map_err(|e| MetadataStoreError::Config(format!("COSMOS_KEY is not valid base64: {}", e)))
    }

    /// URL-encoded value for the `authorization` header.
    pub fn authorization(
        &self,
        verb: &Method,
        resource_type: &str,
        resource_link: &str,
        date: &str,
    ) -> MetadataStoreResult<String> {
        let payload = format!(
            "{}\n{}\n{}\n{}\n\n",
            verb.as_str().to_lowercase(),
            resource_type.to_lowercase(),
            resource_link,
            date.to_lowercase()
        );

        let mut mac = HmacSha256::new_from_slice(&self.0)
            .map_err(|e| MetadataStoreError::Config(format!("Invalid COSMOS_KEY: {}", e)))?;
        mac.update(payload.as_bytes());
        let signature = STANDARD.encode(mac.finalize().into_bytes());

        let token = format!("type=master&ver=1.0&sig={}", signature);
        Ok(urlencoding::encode(&token).into_owned())
    }
}

/// `x-ms-date` header value (RFC 1123).
pub fn http_date(now: DateTime<Utc>) -> String {
    now.format("%a, %d %b %Y %H:%M:%S GMT").to_string()
}
