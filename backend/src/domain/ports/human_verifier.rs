//! Driven port for challenge-response human verification.

use async_trait::async_trait;

/// Verifies a client-supplied challenge token.
///
/// Implementations fail closed: any transport or decoding problem yields
/// `false`, as does a blank token.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HumanVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> bool;
}

/// Verifier used when no verification secret is configured. Rejects everything.
#[derive(Debug, Default, Clone, Copy)]
pub struct RejectingHumanVerifier;

#[async_trait]
impl HumanVerifier for RejectingHumanVerifier {
    async fn verify(&self, _token: &str) -> bool {
        false
    }
}
