//! Storage gateway: turns board requests into signed storage authorizations.

use std::collections::BTreeMap;
use std::time::{Duration as StdDuration, SystemTime};

use aws_config::meta::region::RegionProviderChain;
use aws_config::{BehaviorVersion, ConfigLoader, Region, SdkConfig};
use aws_credential_types::Credentials;
use aws_credential_types::provider::{ProvideCredentials, SharedCredentialsProvider};
use aws_sdk_s3::Client;
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::presigning::PresigningConfig;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use super::StorageError;
use super::object_key::generate_object_key;
use super::post_policy::sign_post_policy;
use crate::config::StorageConfig;

/// Region used when neither `AWS_REGION` nor the AWS profile names one.
pub const DEFAULT_REGION: &str = "us-east-1";

/// A signed browser upload descriptor.
///
/// The client submits `fields` unmodified as multipart form fields,
/// followed by the file, to `url` using `method`.
#[derive(Debug, Clone, Serialize)]
pub struct UploadTicket {
    /// HTTP method for the upload. Always `"POST"`.
    pub method: &'static str,
    /// Upload target (the bucket endpoint).
    pub url: String,
    /// Form fields the client must submit unmodified.
    pub fields: BTreeMap<String, String>,
    /// Object key the upload will land at.
    pub key: String,
    /// Seconds until the policy expires.
    pub expires_in: u64,
}

/// Presigning facade over an S3-compatible bucket.
///
/// Holds an `aws-sdk-s3` client for view URLs and the credentials provider
/// for upload policies. Neither path sends a request to the bucket.
#[derive(Debug, Clone)]
pub struct StorageGateway {
    bucket: Option<String>,
    region: String,
    endpoint: Option<String>,
    client: Client,
    credentials: Option<SharedCredentialsProvider>,
}

impl StorageGateway {
    /// Loads the AWS default configuration chain and builds a gateway.
    pub async fn from_config(config: &StorageConfig) -> Self {
        Self::load(config, aws_config::defaults(BehaviorVersion::latest())).await
    }

    /// Builds a gateway from `loader`. The region in `config` wins over
    /// the one the loader would resolve.
    pub async fn load(config: &StorageConfig, loader: ConfigLoader) -> Self {
        let region = RegionProviderChain::first_try(config.region.clone().map(Region::new))
            .or_default_provider()
            .or_else(Region::from_static(DEFAULT_REGION));
        let sdk_config = loader.region(region).load().await;
        Self::with_sdk_config(config, &sdk_config)
    }

    /// Builds a gateway from an already loaded SDK configuration.
    ///
    /// A custom endpoint switches the client to path-style addressing.
    #[must_use]
    pub fn with_sdk_config(config: &StorageConfig, sdk_config: &SdkConfig) -> Self {
        let region = config
            .region
            .clone()
            .or_else(|| sdk_config.region().map(ToString::to_string))
            .unwrap_or_else(|| DEFAULT_REGION.to_string());
        let endpoint = config
            .endpoint
            .as_deref()
            .map(|e| e.trim_end_matches('/').to_string());

        let mut builder =
            aws_sdk_s3::config::Builder::from(sdk_config).region(Region::new(region.clone()));
        if let Some(endpoint) = &endpoint {
            builder = builder.endpoint_url(endpoint).force_path_style(true);
        }

        Self {
            bucket: config.bucket.clone(),
            region,
            endpoint,
            client: Client::from_conf(builder.build()),
            credentials: sdk_config.credentials_provider(),
        }
    }

    /// Returns `true` when a bucket is configured.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.bucket.is_some()
    }

    /// Issues an upload authorization for a new object derived from
    /// `filename`. The object size is constrained to `[1, max_bytes]`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotConfigured`] without a bucket,
    /// [`StorageError::MissingCredentials`] or [`StorageError::Credentials`]
    /// when no credentials resolve, and [`StorageError::Signing`] if
    /// signing fails.
    pub async fn create_upload_authorization(
        &self,
        filename: &str,
        content_type: &str,
        max_bytes: u64,
        expires_in: u64,
    ) -> Result<UploadTicket, StorageError> {
        self.create_upload_authorization_at(filename, content_type, max_bytes, expires_in, Utc::now())
            .await
    }

    async fn create_upload_authorization_at(
        &self,
        filename: &str,
        content_type: &str,
        max_bytes: u64,
        expires_in: u64,
        now: DateTime<Utc>,
    ) -> Result<UploadTicket, StorageError> {
        let bucket = self.bucket.as_deref().ok_or(StorageError::NotConfigured)?;
        let credentials = self.resolve_credentials().await?;

        let key = generate_object_key(filename);
        let conditions = vec![
            serde_json::json!({ "bucket": bucket }),
            serde_json::json!({ "key": key }),
            serde_json::json!({ "Content-Type": content_type }),
            serde_json::json!(["content-length-range", 1, max_bytes]),
        ];
        let expires_at = i64::try_from(expires_in)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| StorageError::Signing(format!("expiry out of range: {expires_in}s")))?;

        let mut fields = sign_post_policy(&credentials, &self.region, conditions, expires_at, now)?;
        fields.insert("key".to_string(), key.clone());
        fields.insert("Content-Type".to_string(), content_type.to_string());

        tracing::info!(%key, expires_in, max_bytes, "upload authorization issued");

        Ok(UploadTicket {
            method: "POST",
            url: self.bucket_url(bucket),
            fields,
            key,
            expires_in,
        })
    }

    /// Issues a time-limited read URL for `key`. Does not check that the
    /// object exists.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::NotConfigured`] without a bucket,
    /// [`StorageError::MissingCredentials`] without a credentials provider,
    /// and [`StorageError::Signing`] if presigning fails.
    pub async fn create_view_authorization(
        &self,
        key: &str,
        expires_in: u64,
    ) -> Result<String, StorageError> {
        self.create_view_authorization_at(key, expires_in, Utc::now())
            .await
    }

    async fn create_view_authorization_at(
        &self,
        key: &str,
        expires_in: u64,
        now: DateTime<Utc>,
    ) -> Result<String, StorageError> {
        let bucket = self.bucket.as_deref().ok_or(StorageError::NotConfigured)?;
        if self.credentials.is_none() {
            return Err(StorageError::MissingCredentials);
        }

        let presigning = PresigningConfig::builder()
            .start_time(SystemTime::from(now))
            .expires_in(StdDuration::from_secs(expires_in))
            .build()
            .map_err(|e| StorageError::Signing(e.to_string()))?;

        let request = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(presigning)
            .await
            .map_err(|e| StorageError::Signing(DisplayErrorContext(&e).to_string()))?;

        Ok(request.uri().to_string())
    }

    async fn resolve_credentials(&self) -> Result<Credentials, StorageError> {
        let provider = self
            .credentials
            .as_ref()
            .ok_or(StorageError::MissingCredentials)?;
        provider
            .provide_credentials()
            .await
            .map_err(|e| StorageError::Credentials(DisplayErrorContext(&e).to_string()))
    }

    // Dotted bucket names break the `*.s3` wildcard certificate, so they
    // use path-style like the SDK does.
    fn bucket_url(&self, bucket: &str) -> String {
        match &self.endpoint {
            Some(endpoint) => format!("{endpoint}/{bucket}"),
            None if bucket.contains('.') => {
                format!("https://s3.{}.amazonaws.com/{bucket}", self.region)
            }
            None => format!("https://{bucket}.s3.{}.amazonaws.com/", self.region),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;

    /// SDK configuration with static test credentials.
    pub(crate) fn sdk_config(region: Option<&str>, with_credentials: bool) -> SdkConfig {
        let mut builder = SdkConfig::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(region.map(|r| Region::new(r.to_string())));
        if with_credentials {
            builder = builder.credentials_provider(SharedCredentialsProvider::new(
                Credentials::new("AKIDEXAMPLE", "secret", None, None, "static"),
            ));
        }
        builder.build()
    }

    /// Gateway for `bucket` in `region` signing with static test credentials.
    pub(crate) fn static_gateway(bucket: Option<&str>, region: &str) -> StorageGateway {
        let config = StorageConfig {
            bucket: bucket.map(str::to_string),
            region: Some(region.to_string()),
            endpoint: None,
        };
        StorageGateway::with_sdk_config(&config, &sdk_config(Some(region), true))
    }
}
