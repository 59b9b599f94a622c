//! S3 gateway implementation
//!
//! Wraps aws-sdk-s3 and implements the ObjectStore trait from obc-core.
//! Connection settings (endpoint, credentials, timeouts, retries) come from
//! the validated obc configuration; no global client state exists.

use async_trait::async_trait;
use aws_smithy_types::error::display::DisplayErrorContext;

use obc_core::{BucketInfo, BucketListing, Config, Error, ObjectRecord, ObjectStore, Result};

/// Listing page size
const LIST_PAGE_SIZE: i32 = 1000;

/// S3 gateway over an S3-compatible endpoint
pub struct S3Gateway {
    inner: aws_sdk_s3::Client,
}

impl S3Gateway {
    /// Build a gateway from a validated configuration
    pub async fn connect(config: &Config) -> Result<Self> {
        let credentials = aws_credential_types::Credentials::new(
            config.access_key.clone(),
            config.secret_key.clone(),
            None, // session token
            None, // expiry
            "obc-static-credentials",
        );

        let timeouts = config.timeout_config();
        let retry = config.retry_config();

        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .credentials_provider(credentials)
            .region(aws_config::Region::new(config.region.clone()))
            .endpoint_url(&config.url)
            .timeout_config(
                aws_config::timeout::TimeoutConfig::builder()
                    .connect_timeout(timeouts.connect())
                    .read_timeout(timeouts.read())
                    .build(),
            )
            .retry_config(
                aws_config::retry::RetryConfig::standard()
                    .with_max_attempts(retry.max_attempts)
                    .with_initial_backoff(std::time::Duration::from_millis(
                        retry.initial_backoff_ms,
                    ))
                    .with_max_backoff(std::time::Duration::from_millis(retry.max_backoff_ms)),
            )
            .load()
            .await;

        // Path-style addressing for compatibility with self-hosted backends
        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(true)
            .build();

        tracing::debug!(endpoint = %config.url, tls = config.is_tls(), "S3 gateway ready");

        Ok(Self {
            inner: aws_sdk_s3::Client::from_conf(s3_config),
        })
    }

    /// Get the underlying aws-sdk-s3 client
    pub fn inner(&self) -> &aws_sdk_s3::Client {
        &self.inner
    }
}

/// Render the full SDK error chain, including the service error code
fn error_text<E: std::error::Error>(err: E) -> String {
    DisplayErrorContext(err).to_string()
}

/// Map an SDK failure for an object operation into a typed error
fn object_error<E: std::error::Error>(err: E, bucket: &str, key: &str) -> Error {
    let text = error_text(err);
    if text.contains("NoSuchKey") || text.contains("NoSuchBucket") || text.contains("NotFound") {
        Error::NotFound(format!("{bucket}/{key}"))
    } else {
        Error::Transport(text)
    }
}

/// Map an SDK failure for a bucket operation into a typed error
fn bucket_error<E: std::error::Error>(err: E, bucket: &str) -> Error {
    let text = error_text(err);
    if text.contains("NoSuchBucket") || text.contains("NotFound") {
        Error::NotFound(format!("bucket '{bucket}'"))
    } else if text.contains("BucketAlreadyExists") || text.contains("BucketAlreadyOwnedByYou") {
        Error::Conflict(format!("bucket '{bucket}' already exists"))
    } else if text.contains("BucketNotEmpty") {
        Error::Conflict(format!("bucket '{bucket}' is not empty"))
    } else {
        Error::Transport(text)
    }
}

fn timestamp(dt: &aws_smithy_types::DateTime) -> Option<jiff::Timestamp> {
    jiff::Timestamp::from_second(dt.secs()).ok()
}

fn trim_etag(etag: &str) -> String {
    etag.trim_matches('"').to_string()
}

#[async_trait]
impl ObjectStore for S3Gateway {
    async fn list_buckets(&self) -> Result<Vec<BucketInfo>> {
        let response = self
            .inner
            .list_buckets()
            .send()
            .await
            .map_err(|e| Error::Transport(error_text(e)))?;

        let buckets = response
            .buckets()
            .iter()
            .map(|b| BucketInfo {
                name: b.name().unwrap_or_default().to_string(),
                created: b.creation_date().and_then(timestamp),
            })
            .collect();

        Ok(buckets)
    }

    async fn list_objects(&self, bucket: &str, prefix: Option<&str>) -> Result<BucketListing> {
        let mut listing = BucketListing::new(bucket);
        let mut continuation_token: Option<String> = None;

        // One full enumeration; partial listings are a correctness bug, so
        // keep requesting pages until the backend reports no more.
        loop {
            let mut request = self
                .inner
                .list_objects_v2()
                .bucket(bucket)
                .max_keys(LIST_PAGE_SIZE);

            if let Some(p) = prefix {
                request = request.prefix(p);
            }

            if let Some(token) = &continuation_token {
                request = request.continuation_token(token);
            }

            let response = request
                .send()
                .await
                .map_err(|e| bucket_error(e, bucket))?;

            for object in response.contents() {
                let key = object.key().unwrap_or_default().to_string();
                let size = object.size().unwrap_or(0);
                let mut record = ObjectRecord::new(key, u64::try_from(size).unwrap_or(0));

                if let Some(modified) = object.last_modified() {
                    record.last_modified = timestamp(modified);
                }

                if let Some(etag) = object.e_tag() {
                    record.etag = Some(trim_etag(etag));
                }

                listing.insert(record);
            }

            tracing::debug!(
                bucket,
                objects = listing.len(),
                truncated = response.is_truncated().unwrap_or(false),
                "listing page received"
            );

            match response.next_continuation_token() {
                Some(token) if response.is_truncated().unwrap_or(false) => {
                    continuation_token = Some(token.to_string());
                }
                _ => break,
            }
        }

        Ok(listing)
    }

    async fn stat_object(&self, bucket: &str, key: &str) -> Result<ObjectRecord> {
        let response = self
            .inner
            .head_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| object_error(e, bucket, key))?;

        let size = response.content_length().unwrap_or(0);
        let mut record = ObjectRecord::new(key, u64::try_from(size).unwrap_or(0));

        if let Some(modified) = response.last_modified() {
            record.last_modified = timestamp(modified);
        }

        if let Some(etag) = response.e_tag() {
            record.etag = Some(trim_etag(etag));
        }

        Ok(record)
    }

    async fn get_object(&self, bucket: &str, key: &str) -> Result<Vec<u8>> {
        let response = self
            .inner
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| object_error(e, bucket, key))?;

        let data = response
            .body
            .collect()
            .await
            .map_err(|e| Error::Transport(error_text(e)))?
            .into_bytes()
            .to_vec();

        Ok(data)
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        data: Vec<u8>,
        content_type: Option<&str>,
    ) -> Result<ObjectRecord> {
        let size = data.len() as u64;
        let body = aws_sdk_s3::primitives::ByteStream::from(data);

        let mut request = self
            .inner
            .put_object()
            .bucket(bucket)
            .key(key)
            .body(body);

        if let Some(ct) = content_type {
            request = request.content_type(ct);
        }

        let response = request
            .send()
            .await
            .map_err(|e| object_error(e, bucket, key))?;

        let mut record = ObjectRecord::new(key, size);
        if let Some(etag) = response.e_tag() {
            record.etag = Some(trim_etag(etag));
        }
        record.last_modified = Some(jiff::Timestamp::now());

        tracing::debug!(bucket, key, size, "object uploaded");

        Ok(record)
    }

    async fn copy_object(
        &self,
        src_bucket: &str,
        src_key: &str,
        dst_bucket: &str,
        dst_key: &str,
    ) -> Result<ObjectRecord> {
        let copy_source = format!("{src_bucket}/{src_key}");

        let response = self
            .inner
            .copy_object()
            .copy_source(&copy_source)
            .bucket(dst_bucket)
            .key(dst_key)
            .send()
            .await
            .map_err(|e| object_error(e, src_bucket, src_key))?;

        // Copy responses don't carry the size; stat the destination
        let mut record = self.stat_object(dst_bucket, dst_key).await?;
        if let Some(etag) = response.copy_object_result().and_then(|r| r.e_tag()) {
            record.etag = Some(trim_etag(etag));
        }

        Ok(record)
    }

    async fn delete_object(&self, bucket: &str, key: &str) -> Result<()> {
        self.inner
            .delete_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| object_error(e, bucket, key))?;

        Ok(())
    }

    async fn bucket_exists(&self, bucket: &str) -> Result<bool> {
        match self.inner.head_bucket().bucket(bucket).send().await {
            Ok(_) => Ok(true),
            Err(e) => match bucket_error(e, bucket) {
                Error::NotFound(_) => Ok(false),
                other => Err(other),
            },
        }
    }

    async fn create_bucket(&self, bucket: &str) -> Result<()> {
        self.inner
            .create_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| bucket_error(e, bucket))?;

        Ok(())
    }

    async fn delete_bucket(&self, bucket: &str) -> Result<()> {
        self.inner
            .delete_bucket()
            .bucket(bucket)
            .send()
            .await
            .map_err(|e| bucket_error(e, bucket))?;

        Ok(())
    }
}
