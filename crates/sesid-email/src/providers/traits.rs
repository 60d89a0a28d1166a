//! Identity provider trait definitions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::errors::EmailError;

/// Domain verification status as reported by SES
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerificationStatus {
    /// Verification not yet started
    NotStarted,
    /// Verification in progress
    Pending,
    /// Domain successfully verified
    Verified,
    /// Verification failed
    Failed,
    /// Previously verified but DNS records no longer valid
    TemporaryFailure,
}

impl VerificationStatus {
    /// Map the SES status string (`SUCCESS`, `PENDING`, ...) to a status
    pub fn from_ses(status: &str) -> Self {
        match status {
            "SUCCESS" => VerificationStatus::Verified,
            "PENDING" => VerificationStatus::Pending,
            "FAILED" => VerificationStatus::Failed,
            "TEMPORARY_FAILURE" => VerificationStatus::TemporaryFailure,
            "NOT_STARTED" => VerificationStatus::NotStarted,
            _ => VerificationStatus::Pending,
        }
    }
}

impl std::fmt::Display for VerificationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VerificationStatus::NotStarted => write!(f, "not_started"),
            VerificationStatus::Pending => write!(f, "pending"),
            VerificationStatus::Verified => write!(f, "verified"),
            VerificationStatus::Failed => write!(f, "failed"),
            VerificationStatus::TemporaryFailure => write!(f, "temporary_failure"),
        }
    }
}

/// An identity as returned by the list call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentitySummary {
    pub name: String,
    /// `DOMAIN`, `EMAIL_ADDRESS` or `MANAGED_DOMAIN`
    pub identity_type: String,
}

/// DKIM attributes returned when an identity is created
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIdentity {
    pub dkim_status: Option<String>,
    pub dkim_tokens: Vec<String>,
}

/// Full identity state, merged from the v2 API and the classic API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityDetail {
    pub domain: String,
    pub verification_status: VerificationStatus,
    pub verified_for_sending: bool,
    pub dkim_status: Option<String>,
    /// DKIM tokens in the order SES returned them
    pub dkim_tokens: Vec<String>,
    /// Only the classic API exposes this; used for the `_amazonses` TXT record
    pub verification_token: Option<String>,
}

impl IdentityDetail {
    /// Build the detail of an identity that was just created
    pub fn from_created(domain: &str, created: CreatedIdentity) -> Self {
        Self {
            domain: domain.to_string(),
            verification_status: VerificationStatus::Pending,
            verified_for_sending: false,
            dkim_status: created.dkim_status,
            dkim_tokens: created.dkim_tokens,
            verification_token: None,
        }
    }

    /// Fill in the verification token from the classic API.
    ///
    /// The legacy value is used only when the primary response carries none;
    /// blank tokens count as absent.
    pub fn merge_legacy_token(&mut self, legacy: Option<String>) {
        let has_token = self
            .verification_token
            .as_deref()
            .is_some_and(|t| !t.trim().is_empty());
        if has_token {
            return;
        }
        self.verification_token = legacy.filter(|t| !t.trim().is_empty());
    }
}

/// Provider abstraction over the SES identity APIs
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// List every identity registered in the region
    async fn list_identities(&self) -> Result<Vec<IdentitySummary>, EmailError>;

    /// Fetch one identity; `EmailError::NotFound` when it is not registered
    async fn get_identity(&self, domain: &str) -> Result<IdentityDetail, EmailError>;

    /// Fetch the domain verification token from the classic API
    async fn get_legacy_verification_token(
        &self,
        domain: &str,
    ) -> Result<Option<String>, EmailError>;

    /// Register a new domain identity
    async fn create_identity(&self, domain: &str) -> Result<CreatedIdentity, EmailError>;

    /// Region the provider talks to
    fn region(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(token: Option<&str>) -> IdentityDetail {
        IdentityDetail {
            domain: "example.com".to_string(),
            verification_status: VerificationStatus::Pending,
            verified_for_sending: false,
            dkim_status: None,
            dkim_tokens: vec![],
            verification_token: token.map(str::to_string),
        }
    }

    #[test]
    fn test_merge_uses_legacy_when_primary_missing() {
        let mut d = detail(None);
        d.merge_legacy_token(Some("abc123".to_string()));
        assert_eq!(d.verification_token.as_deref(), Some("abc123"));
    }

    #[test]
    fn test_merge_keeps_primary_token() {
        let mut d = detail(Some("primary"));
        d.merge_legacy_token(Some("legacy".to_string()));
        assert_eq!(d.verification_token.as_deref(), Some("primary"));
    }

    #[test]
    fn test_merge_treats_blank_as_absent() {
        let mut d = detail(Some("  "));
        d.merge_legacy_token(Some(String::new()));
        assert_eq!(d.verification_token, None);

        let mut d = detail(Some(""));
        d.merge_legacy_token(Some("legacy".to_string()));
        assert_eq!(d.verification_token.as_deref(), Some("legacy"));
    }

    #[test]
    fn test_verification_status_from_ses() {
        assert_eq!(
            VerificationStatus::from_ses("SUCCESS"),
            VerificationStatus::Verified
        );
        assert_eq!(
            VerificationStatus::from_ses("TEMPORARY_FAILURE"),
            VerificationStatus::TemporaryFailure
        );
        assert_eq!(
            VerificationStatus::from_ses("NOT_STARTED"),
            VerificationStatus::NotStarted
        );
        assert_eq!(
            VerificationStatus::from_ses("SomethingNew"),
            VerificationStatus::Pending
        );
    }

    #[test]
    fn test_verification_status_display() {
        assert_eq!(VerificationStatus::NotStarted.to_string(), "not_started");
        assert_eq!(VerificationStatus::Verified.to_string(), "verified");
        assert_eq!(
            VerificationStatus::TemporaryFailure.to_string(),
            "temporary_failure"
        );
    }

    #[test]
    fn test_created_identity_becomes_pending_detail() {
        let d = IdentityDetail::from_created(
            "example.com",
            CreatedIdentity {
                dkim_status: Some("PENDING".to_string()),
                dkim_tokens: vec!["t1".to_string()],
            },
        );
        assert_eq!(d.verification_status, VerificationStatus::Pending);
        assert_eq!(d.dkim_tokens, vec!["t1".to_string()]);
        assert!(d.verification_token.is_none());
    }

    #[test]
    fn test_identity_detail_serialization() {
        let json = serde_json::to_string(&detail(Some("abc"))).unwrap();
        assert!(json.contains("\"verification_status\":\"pending\""));
        let back: IdentityDetail = serde_json::from_str(&json).unwrap();
        assert_eq!(back.verification_token.as_deref(), Some("abc"));
    }
}
