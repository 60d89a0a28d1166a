//! Mock identity provider for testing

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use crate::errors::EmailError;
use crate::providers::{
    CreatedIdentity, IdentityDetail, IdentityProvider, IdentitySummary, VerificationStatus,
};

/// Mock identity provider for testing
#[derive(Debug, Clone)]
pub struct MockIdentityProvider {
    /// Counters for tracking calls
    pub list_count: Arc<AtomicUsize>,
    pub get_identity_count: Arc<AtomicUsize>,
    pub legacy_token_count: Arc<AtomicUsize>,
    pub create_identity_count: Arc<AtomicUsize>,

    /// Configurable responses
    pub identities: Vec<IdentitySummary>,
    pub detail: Option<IdentityDetail>,
    pub legacy_token: Option<String>,
    pub created_tokens: Vec<String>,
    pub should_fail_list: bool,
    pub should_fail_get: bool,
    pub should_fail_legacy: bool,
    pub region: String,
}

impl Default for MockIdentityProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self {
            list_count: Arc::new(AtomicUsize::new(0)),
            get_identity_count: Arc::new(AtomicUsize::new(0)),
            legacy_token_count: Arc::new(AtomicUsize::new(0)),
            create_identity_count: Arc::new(AtomicUsize::new(0)),
            identities: Vec::new(),
            detail: None,
            legacy_token: None,
            created_tokens: vec!["new1".to_string(), "new2".to_string(), "new3".to_string()],
            should_fail_list: false,
            should_fail_get: false,
            should_fail_legacy: false,
            region: "us-east-1".to_string(),
        }
    }

    pub fn with_identities(mut self, names: &[&str]) -> Self {
        self.identities = names
            .iter()
            .map(|name| IdentitySummary {
                name: name.to_string(),
                identity_type: "DOMAIN".to_string(),
            })
            .collect();
        self
    }

    /// Register an existing identity with the given DKIM tokens
    pub fn with_detail(mut self, domain: &str, dkim_tokens: &[&str]) -> Self {
        self.detail = Some(IdentityDetail {
            domain: domain.to_string(),
            verification_status: VerificationStatus::Verified,
            verified_for_sending: true,
            dkim_status: Some("SUCCESS".to_string()),
            dkim_tokens: dkim_tokens.iter().map(|t| t.to_string()).collect(),
            verification_token: None,
        });
        self
    }

    pub fn with_legacy_token(mut self, token: &str) -> Self {
        self.legacy_token = Some(token.to_string());
        self
    }

    pub fn with_list_failure(mut self) -> Self {
        self.should_fail_list = true;
        self
    }

    pub fn with_get_failure(mut self) -> Self {
        self.should_fail_get = true;
        self
    }

    pub fn with_legacy_failure(mut self) -> Self {
        self.should_fail_legacy = true;
        self
    }

    pub fn list_call_count(&self) -> usize {
        self.list_count.load(Ordering::SeqCst)
    }

    pub fn get_identity_call_count(&self) -> usize {
        self.get_identity_count.load(Ordering::SeqCst)
    }

    pub fn legacy_token_call_count(&self) -> usize {
        self.legacy_token_count.load(Ordering::SeqCst)
    }

    pub fn create_identity_call_count(&self) -> usize {
        self.create_identity_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn list_identities(&self) -> Result<Vec<IdentitySummary>, EmailError> {
        self.list_count.fetch_add(1, Ordering::SeqCst);

        if self.should_fail_list {
            return Err(EmailError::transport(
                "list identities",
                "Mock list failure",
            ));
        }

        Ok(self.identities.clone())
    }

    async fn get_identity(&self, domain: &str) -> Result<IdentityDetail, EmailError> {
        self.get_identity_count.fetch_add(1, Ordering::SeqCst);

        if self.should_fail_get {
            return Err(EmailError::transport("get identity", "Mock get failure"));
        }

        match &self.detail {
            Some(detail) if detail.domain == domain => Ok(detail.clone()),
            _ => Err(EmailError::NotFound(domain.to_string())),
        }
    }

    async fn get_legacy_verification_token(
        &self,
        _domain: &str,
    ) -> Result<Option<String>, EmailError> {
        self.legacy_token_count.fetch_add(1, Ordering::SeqCst);

        if self.should_fail_legacy {
            return Err(EmailError::transport(
                "get verification attributes",
                "Mock legacy failure",
            ));
        }

        Ok(self.legacy_token.clone())
    }

    async fn create_identity(&self, _domain: &str) -> Result<CreatedIdentity, EmailError> {
        self.create_identity_count.fetch_add(1, Ordering::SeqCst);

        Ok(CreatedIdentity {
            dkim_status: Some("PENDING".to_string()),
            dkim_tokens: self.created_tokens.clone(),
        })
    }

    fn region(&self) -> &str {
        &self.region
    }
}
