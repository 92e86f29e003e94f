//! Deterministic doubles for clocks and third-party integrations.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::{DateTime, Local, TimeDelta, TimeZone, Utc};
use mockable::Clock;

use crate::domain::ports::{
    HumanVerifier, ImageStore, ImageStoreError, PasswordHashError, PasswordHasher,
    PaymentGateway, PaymentGatewayError,
};
use crate::domain::{ImageUpload, PaymentOrder, PaymentOrderRequest};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Clock that only moves when told to.
pub struct MutableClock(Mutex<DateTime<Utc>>);

impl MutableClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self(Mutex::new(now))
    }

    /// 2024-05-01T12:00:00Z.
    pub fn fixed() -> Self {
        let start = Utc
            .with_ymd_and_hms(2024, 5, 1, 12, 0, 0)
            .single()
            .unwrap_or_default();
        Self::new(start)
    }

    pub fn advance_seconds(&self, seconds: i64) {
        *lock(&self.0) += TimeDelta::seconds(seconds);
    }
}

impl Clock for MutableClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *lock(&self.0)
    }
}

/// Payment gateway that echoes requests back as `order_test_<n>` orders.
#[derive(Default)]
pub struct RecordingPaymentGateway {
    requests: Mutex<Vec<PaymentOrderRequest>>,
    fail_with: Option<PaymentGatewayError>,
}

impl RecordingPaymentGateway {
    /// Gateway whose every call fails with `error`.
    pub fn failing(error: PaymentGatewayError) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_with: Some(error),
        }
    }

    pub fn requests(&self) -> Vec<PaymentOrderRequest> {
        lock(&self.requests).clone()
    }
}

#[async_trait]
impl PaymentGateway for RecordingPaymentGateway {
    async fn create_order(
        &self,
        request: &PaymentOrderRequest,
    ) -> Result<PaymentOrder, PaymentGatewayError> {
        let mut requests = lock(&self.requests);
        requests.push(request.clone());
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        Ok(PaymentOrder {
            id: format!("order_test_{}", requests.len()),
            amount: request.amount,
            currency: request.currency.clone(),
        })
    }
}

/// Human verifier with a fixed verdict for non-blank tokens.
#[derive(Debug, Clone, Copy)]
pub struct StubHumanVerifier {
    pub accept: bool,
}

#[async_trait]
impl HumanVerifier for StubHumanVerifier {
    async fn verify(&self, token: &str) -> bool {
        self.accept && !token.trim().is_empty()
    }
}

/// Image store keeping uploads in memory under sequential names.
#[derive(Default)]
pub struct InMemoryImageStore {
    stored: Mutex<Vec<(String, Vec<u8>)>>,
    counter: AtomicUsize,
}

impl InMemoryImageStore {
    pub fn stored(&self) -> Vec<(String, Vec<u8>)> {
        lock(&self.stored).clone()
    }
}

#[async_trait]
impl ImageStore for InMemoryImageStore {
    async fn store(&self, upload: &ImageUpload) -> Result<String, ImageStoreError> {
        let n = self.counter.fetch_add(1, Ordering::Relaxed) + 1;
        let name = format!("upload-{n}{}", upload.extension().unwrap_or_default());
        lock(&self.stored).push((name.clone(), upload.bytes().to_vec()));
        Ok(name)
    }
}

/// Reversible "hash" so scenario tests avoid Argon2's cost.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainPasswordHasher;

#[async_trait]
impl PasswordHasher for PlainPasswordHasher {
    async fn hash(&self, password: &str) -> Result<String, PasswordHashError> {
        Ok(format!("plain${password}"))
    }

    async fn verify(&self, password: &str, stored_hash: &str) -> bool {
        stored_hash.strip_prefix("plain$") == Some(password)
    }

    async fn verify_absent(&self, _password: &str) {}
}
