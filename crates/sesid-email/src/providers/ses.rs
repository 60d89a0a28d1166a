//! AWS SES identity provider implementation

use async_trait::async_trait;
use aws_config::{retry::RetryConfig, BehaviorVersion};
use aws_sdk_sesv2::config::Region;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::traits::{
    CreatedIdentity, IdentityDetail, IdentityProvider, IdentitySummary, VerificationStatus,
};
use crate::errors::EmailError;

/// Extract readable error information from AWS SDK errors.
///
/// Both SES clients share the same `SdkError` type, so this serves the v2 and
/// the classic API alike.
fn describe_sdk_error<E, R>(e: &aws_sdk_sesv2::error::SdkError<E, R>) -> String
where
    E: std::fmt::Display + std::fmt::Debug,
    R: std::fmt::Debug,
{
    use aws_sdk_sesv2::error::SdkError;

    match e {
        SdkError::ServiceError(service_err) => format!("{}", service_err.err()),
        SdkError::TimeoutError(_) => {
            "Request timed out. Please check your network connection and try again.".to_string()
        }
        SdkError::DispatchFailure(dispatch_err) => {
            if dispatch_err.is_io() {
                "Network error: Unable to connect to AWS SES. Please verify your network connection and credentials.".to_string()
            } else if dispatch_err.is_timeout() {
                "Connection timed out. Please try again.".to_string()
            } else if dispatch_err.is_user() {
                format!("Configuration error: {:?}", dispatch_err)
            } else {
                format!("Connection failed: {:?}", dispatch_err)
            }
        }
        SdkError::ConstructionFailure(_) => {
            "Invalid request configuration. Please check the region and domain.".to_string()
        }
        SdkError::ResponseError(resp_err) => {
            format!("Unexpected response from AWS: {:?}", resp_err)
        }
        _ => format!("{:?}", e),
    }
}

fn dkim_parts(
    attrs: Option<aws_sdk_sesv2::types::DkimAttributes>,
) -> (Option<String>, Vec<String>) {
    match attrs {
        Some(attrs) => (
            attrs.status.map(|s| s.as_str().to_string()),
            attrs.tokens.unwrap_or_default(),
        ),
        None => (None, Vec::new()),
    }
}

/// Settings used to build the SES clients
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SesClientConfig {
    pub region: String,
    /// Optional custom endpoint URL (for LocalStack or other AWS-compatible services)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,
}

/// SES provider backed by the v2 client, with the classic client kept for
/// the one field v2 does not return (the domain verification token)
pub struct SesIdentityProvider {
    client: aws_sdk_sesv2::Client,
    legacy_client: aws_sdk_ses::Client,
    region: String,
}

impl SesIdentityProvider {
    /// Create both clients from a single shared SDK config.
    ///
    /// Credentials come from the default AWS provider chain.
    pub async fn new(config: &SesClientConfig) -> Result<Self, EmailError> {
        if config.region.trim().is_empty() {
            return Err(EmailError::Validation("Region must not be empty".to_string()));
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .retry_config(RetryConfig::disabled());

        if let Some(ref endpoint_url) = config.endpoint_url {
            debug!("Using custom SES endpoint: {}", endpoint_url);
            loader = loader.endpoint_url(endpoint_url);
        }

        let sdk_config = loader.load().await;

        Ok(Self {
            client: aws_sdk_sesv2::Client::new(&sdk_config),
            legacy_client: aws_sdk_ses::Client::new(&sdk_config),
            region: config.region.clone(),
        })
    }
}

#[async_trait]
impl IdentityProvider for SesIdentityProvider {
    async fn list_identities(&self) -> Result<Vec<IdentitySummary>, EmailError> {
        debug!("Listing SES identities in region: {}", self.region);

        let mut identities = Vec::new();
        let mut next_token: Option<String> = None;

        loop {
            let output = self
                .client
                .list_email_identities()
                .set_next_token(next_token.take())
                .send()
                .await
                .map_err(|e| EmailError::transport("list identities", describe_sdk_error(&e)))?;

            for info in output.email_identities.unwrap_or_default() {
                let Some(name) = info.identity_name else {
                    continue;
                };
                identities.push(IdentitySummary {
                    name,
                    identity_type: info
                        .identity_type
                        .map(|t| t.as_str().to_string())
                        .unwrap_or_else(|| "UNKNOWN".to_string()),
                });
            }

            match output.next_token {
                Some(token) if !token.is_empty() => next_token = Some(token),
                _ => break,
            }
        }

        debug!("Found {} identities", identities.len());
        Ok(identities)
    }

    async fn get_identity(&self, domain: &str) -> Result<IdentityDetail, EmailError> {
        debug!("Getting SES identity for domain: {}", domain);

        let output = match self
            .client
            .get_email_identity()
            .email_identity(domain)
            .send()
            .await
        {
            Ok(output) => output,
            Err(e) => {
                let not_found = e
                    .as_service_error()
                    .is_some_and(|service_err| service_err.is_not_found_exception());
                if not_found {
                    return Err(EmailError::NotFound(domain.to_string()));
                }
                return Err(EmailError::transport(
                    "get identity",
                    describe_sdk_error(&e),
                ));
            }
        };

        let verification_status = output
            .verification_status
            .as_ref()
            .map(|s| VerificationStatus::from_ses(s.as_str()))
            .unwrap_or(VerificationStatus::NotStarted);
        let (dkim_status, dkim_tokens) = dkim_parts(output.dkim_attributes);

        Ok(IdentityDetail {
            domain: domain.to_string(),
            verification_status,
            verified_for_sending: output.verified_for_sending_status,
            dkim_status,
            dkim_tokens,
            verification_token: None,
        })
    }

    async fn get_legacy_verification_token(
        &self,
        domain: &str,
    ) -> Result<Option<String>, EmailError> {
        debug!("Getting classic verification attributes for: {}", domain);

        let output = self
            .legacy_client
            .get_identity_verification_attributes()
            .identities(domain)
            .send()
            .await
            .map_err(|e| {
                EmailError::transport("get verification attributes", describe_sdk_error(&e))
            })?;

        Ok(output
            .verification_attributes()
            .get(domain)
            .and_then(|attrs| attrs.verification_token())
            .map(str::to_string))
    }

    async fn create_identity(&self, domain: &str) -> Result<CreatedIdentity, EmailError> {
        debug!("Creating SES identity for domain: {}", domain);

        let output = self
            .client
            .create_email_identity()
            .email_identity(domain)
            .send()
            .await
            .map_err(|e| EmailError::transport("create identity", describe_sdk_error(&e)))?;

        let (dkim_status, dkim_tokens) = dkim_parts(output.dkim_attributes);

        Ok(CreatedIdentity {
            dkim_status,
            dkim_tokens,
        })
    }

    fn region(&self) -> &str {
        &self.region
    }
}
