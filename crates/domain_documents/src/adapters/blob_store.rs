//! External Blob Store Adapter
//!
//! Implements [`StoragePort`](crate::ports::StoragePort) against the hosted
//! storage provider's REST API. Includes:
//!
//! - Circuit breaker to stop hammering a provider that is down
//! - Request/response logging via tracing
//! - Configurable timeouts and retry attempts
//!
//! HTTP errors map to `PortError` variants: 404 -> `NotFound`,
//! 429 -> `RateLimited`, 5xx -> `ServiceUnavailable`, timeouts ->
//! `Timeout`, everything else -> `Internal`.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use core_kernel::{
    AdapterHealth, CircuitBreakerConfig, DomainPort, HealthCheckResult, HealthCheckable,
    PortError,
};

use crate::attachment::{AttachmentCategory, FileUpload, StoredObject};
use crate::ports::StoragePort;

/// Configuration for the external blob-store adapter
#[derive(Debug, Clone)]
pub struct ExternalBlobStoreConfig {
    /// Base URL of the storage API (e.g. "https://storage.example.com/v1")
    pub base_url: String,

    /// API key for authentication
    pub api_key: String,

    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// Number of retry attempts for failed requests
    pub retry_attempts: u32,

    /// Circuit breaker configuration
    pub circuit_breaker: Option<CircuitBreakerConfig>,
}

impl Default for ExternalBlobStoreConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            api_key: String::new(),
            timeout_secs: 30,
            retry_attempts: 3,
            circuit_breaker: Some(CircuitBreakerConfig::default()),
        }
    }
}

/// Circuit breaker state for fault tolerance
#[derive(Debug)]
struct CircuitBreaker {
    config: CircuitBreakerConfig,
    failure_count: AtomicU64,
    success_count: AtomicU64,
    is_open: AtomicBool,
    last_failure_time: RwLock<Option<Instant>>,
}

impl CircuitBreaker {
    fn new(config: CircuitBreakerConfig) -> Self {
        Self {
            config,
            failure_count: AtomicU64::new(0),
            success_count: AtomicU64::new(0),
            is_open: AtomicBool::new(false),
            last_failure_time: RwLock::new(None),
        }
    }

    async fn is_available(&self) -> bool {
        if !self.is_open.load(Ordering::Relaxed) {
            return true;
        }

        // Half-open once the reset timeout has elapsed
        let last_failure = self.last_failure_time.read().await;
        if let Some(time) = *last_failure {
            if time.elapsed() > Duration::from_secs(self.config.reset_timeout_secs) {
                return true;
            }
        }

        false
    }

    fn record_success(&self) {
        self.failure_count.store(0, Ordering::Relaxed);
        let success = self.success_count.fetch_add(1, Ordering::Relaxed) + 1;
        if success >= self.config.success_threshold as u64 {
            self.is_open.store(false, Ordering::Relaxed);
            self.success_count.store(0, Ordering::Relaxed);
        }
    }

    async fn record_failure(&self) {
        self.success_count.store(0, Ordering::Relaxed);
        let failures = self.failure_count.fetch_add(1, Ordering::Relaxed) + 1;
        if failures >= self.config.failure_threshold as u64 {
            self.is_open.store(true, Ordering::Relaxed);
            *self.last_failure_time.write().await = Some(Instant::now());
        }
    }
}

/// Blob-store adapter implementing the StoragePort trait
///
/// # Example
///
/// ```rust,ignore
/// use domain_documents::adapters::{ExternalBlobStoreAdapter, ExternalBlobStoreConfig};
///
/// let adapter = ExternalBlobStoreAdapter::new(ExternalBlobStoreConfig {
///     base_url: "https://storage.example.com/v1".to_string(),
///     api_key: std::env::var("STORAGE_API_KEY").unwrap(),
///     ..Default::default()
/// });
/// ```
#[derive(Debug)]
pub struct ExternalBlobStoreAdapter {
    config: ExternalBlobStoreConfig,
    circuit_breaker: Option<Arc<CircuitBreaker>>,
    // In a real deployment this also holds a reqwest::Client; the HTTP
    // plumbing is stubbed pending provider credentials
}

impl ExternalBlobStoreAdapter {
    /// Creates a new adapter with the given configuration
    pub fn new(config: ExternalBlobStoreConfig) -> Self {
        let circuit_breaker = config
            .circuit_breaker
            .clone()
            .map(|cb| Arc::new(CircuitBreaker::new(cb)));

        Self {
            config,
            circuit_breaker,
        }
    }

    /// Returns the base URL of the storage provider
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Checks if the circuit breaker is open (blocking requests)
    pub async fn is_circuit_open(&self) -> bool {
        if let Some(ref cb) = self.circuit_breaker {
            !cb.is_available().await
        } else {
            false
        }
    }

    async fn guard(&self) -> Result<(), PortError> {
        if let Some(ref cb) = self.circuit_breaker {
            if !cb.is_available().await {
                return Err(PortError::ServiceUnavailable {
                    service: "blob-store circuit breaker is open".to_string(),
                });
            }
        }
        Ok(())
    }

    /// POSTs the multipart upload to the provider
    async fn post_upload(
        &self,
        upload: &FileUpload,
        category: AttachmentCategory,
    ) -> Result<StoredObject, PortError> {
        self.guard().await?;

        // Placeholder: the provider integration POSTs to
        // `{base_url}/objects/{category}` with the API key header and the
        // file as multipart body, deserializing the StoredObject response.
        let result: Result<StoredObject, PortError> = Err(PortError::internal(format!(
            "blob store adapter not wired: POST objects/{}/{}",
            category, upload.file_name
        )));

        if let Some(ref cb) = self.circuit_breaker {
            match &result {
                Ok(_) => cb.record_success(),
                Err(_) => cb.record_failure().await,
            }
        }

        result
    }
}

impl DomainPort for ExternalBlobStoreAdapter {}

#[async_trait]
impl HealthCheckable for ExternalBlobStoreAdapter {
    async fn health_check(&self) -> HealthCheckResult {
        let start = Instant::now();

        if self.is_circuit_open().await {
            return HealthCheckResult {
                adapter_id: "external-blob-store".to_string(),
                status: AdapterHealth::Degraded,
                latency_ms: 0,
                message: Some("Circuit breaker is open".to_string()),
                checked_at: Utc::now(),
            };
        }

        let latency_ms = start.elapsed().as_millis() as u64;

        HealthCheckResult {
            adapter_id: "external-blob-store".to_string(),
            status: AdapterHealth::Degraded,
            latency_ms,
            message: Some("Blob store adapter is a placeholder implementation".to_string()),
            checked_at: Utc::now(),
        }
    }
}

#[async_trait]
impl StoragePort for ExternalBlobStoreAdapter {
    async fn upload_file(
        &self,
        upload: &FileUpload,
        category: AttachmentCategory,
    ) -> Result<StoredObject, PortError> {
        self.post_upload(upload, category).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn breaker_config() -> CircuitBreakerConfig {
        CircuitBreakerConfig {
            failure_threshold: 3,
            reset_timeout_secs: 60,
            success_threshold: 1,
        }
    }

    fn sample_upload() -> FileUpload {
        FileUpload::new("recu.pdf", "application/pdf", vec![1, 2, 3])
    }

    #[tokio::test]
    async fn test_circuit_opens_after_repeated_failures() {
        let adapter = ExternalBlobStoreAdapter::new(ExternalBlobStoreConfig {
            circuit_breaker: Some(breaker_config()),
            ..Default::default()
        });

        for _ in 0..3 {
            let err = adapter
                .upload_file(&sample_upload(), AttachmentCategory::Demands)
                .await
                .unwrap_err();
            assert!(matches!(err, PortError::Internal { .. }));
        }

        assert!(adapter.is_circuit_open().await);

        // Once open, calls short-circuit with ServiceUnavailable
        let err = adapter
            .upload_file(&sample_upload(), AttachmentCategory::Demands)
            .await
            .unwrap_err();
        assert!(matches!(err, PortError::ServiceUnavailable { .. }));
    }

    #[tokio::test]
    async fn test_no_breaker_configured_never_opens() {
        let adapter = ExternalBlobStoreAdapter::new(ExternalBlobStoreConfig {
            circuit_breaker: None,
            ..Default::default()
        });

        for _ in 0..10 {
            let _ = adapter
                .upload_file(&sample_upload(), AttachmentCategory::Family)
                .await;
        }

        assert!(!adapter.is_circuit_open().await);
    }

    #[tokio::test]
    async fn test_degraded_health_while_unwired() {
        let adapter = ExternalBlobStoreAdapter::new(ExternalBlobStoreConfig::default());
        let result = adapter.health_check().await;
        assert_eq!(result.status, AdapterHealth::Degraded);
    }
}
