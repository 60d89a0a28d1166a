//! Interactive resolution of region and domain
//!
//! `PromptFlow` walks `NeedRegion → NeedDomainSelection → NeedNewDomainName → Ready`,
//! asking only for what was not supplied on the command line.

use std::io;
use tracing::{debug, warn};

use crate::errors::EmailError;
use crate::providers::IdentityProvider;

/// Region used when neither flag nor environment provides one
pub const FALLBACK_REGION: &str = "us-east-1";
/// Choice appended to the identity list to register a new domain
pub const ADD_NEW_DOMAIN: &str = "+ Add a new domain";
/// SES identity type of domain identities
pub const DOMAIN_IDENTITY_TYPE: &str = "DOMAIN";

/// Source of interactive answers. `None` means the user cancelled (EOF).
pub trait Prompter {
    fn input(&mut self, message: &str, default: Option<&str>) -> io::Result<Option<String>>;

    fn select(&mut self, message: &str, choices: &[String]) -> io::Result<Option<usize>>;

    fn confirm(&mut self, message: &str, default: bool) -> io::Result<Option<bool>>;
}

/// Default region suggestion: `AWS_REGION`, then `AWS_DEFAULT_REGION`, then the fallback
pub fn default_region_from<F>(lookup: F) -> String
where
    F: Fn(&str) -> Option<String>,
{
    ["AWS_REGION", "AWS_DEFAULT_REGION"]
        .iter()
        .filter_map(|key| lookup(key))
        .map(|value| value.trim().to_string())
        .find(|value| !value.is_empty())
        .unwrap_or_else(|| FALLBACK_REGION.to_string())
}

pub fn default_region() -> String {
    default_region_from(|key| std::env::var(key).ok())
}

/// Trim, lower-case and drop a trailing dot
pub fn normalize_domain(raw: &str) -> String {
    raw.trim().trim_end_matches('.').to_lowercase()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Fully resolved command input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedInput {
    pub region: String,
    /// Always `Some` for `check`, `None` for `list`
    pub domain: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptState {
    NeedRegion,
    NeedDomainSelection { region: String },
    NeedNewDomainName { region: String },
    Ready(ResolvedInput),
}

pub struct PromptFlow {
    domain_flag: Option<String>,
    region_flag: Option<String>,
    default_region: String,
    wants_domain: bool,
    state: PromptState,
}

impl PromptFlow {
    /// Flow for `check`: region and domain
    pub fn for_check(
        region_flag: Option<String>,
        domain_flag: Option<String>,
        default_region: String,
    ) -> Self {
        Self {
            domain_flag: non_blank(domain_flag).map(|d| normalize_domain(&d)),
            region_flag: non_blank(region_flag),
            default_region,
            wants_domain: true,
            state: PromptState::NeedRegion,
        }
    }

    /// Flow for `list`: region only
    pub fn for_list(region_flag: Option<String>, default_region: String) -> Self {
        Self {
            domain_flag: None,
            region_flag: non_blank(region_flag),
            default_region,
            wants_domain: false,
            state: PromptState::NeedRegion,
        }
    }

    pub fn state(&self) -> &PromptState {
        &self.state
    }

    /// Resolve the region. Must run first, since the provider client is
    /// built for the region this returns.
    pub fn resolve_region<Q: Prompter + ?Sized>(
        &mut self,
        prompter: &mut Q,
    ) -> Result<String, EmailError> {
        if self.state != PromptState::NeedRegion {
            return Err(EmailError::Validation(
                "Region has already been resolved".to_string(),
            ));
        }

        let region = match self.region_flag.clone() {
            Some(region) => region,
            None => {
                let answer = prompter.input("AWS region", Some(&self.default_region))?;
                match answer {
                    None => {
                        return Err(EmailError::Validation("No region provided".to_string()))
                    }
                    Some(a) if a.trim().is_empty() => self.default_region.trim().to_string(),
                    Some(a) => a.trim().to_string(),
                }
            }
        };

        if region.is_empty() {
            return Err(EmailError::Validation("Region is required".to_string()));
        }

        debug!("Resolved region: {}", region);
        self.state = if self.wants_domain {
            PromptState::NeedDomainSelection {
                region: region.clone(),
            }
        } else {
            PromptState::Ready(ResolvedInput {
                region: region.clone(),
                domain: None,
            })
        };
        Ok(region)
    }

    /// Resolve the domain, listing existing identities when no flag was given.
    ///
    /// A failed listing is logged and treated as an empty list so a new
    /// domain can still be entered.
    pub async fn resolve_domain<P, Q>(
        &mut self,
        provider: &P,
        prompter: &mut Q,
    ) -> Result<ResolvedInput, EmailError>
    where
        P: IdentityProvider + ?Sized,
        Q: Prompter + ?Sized,
    {
        loop {
            match std::mem::replace(&mut self.state, PromptState::NeedRegion) {
                PromptState::NeedRegion => {
                    return Err(EmailError::Validation(
                        "Region must be resolved before the domain".to_string(),
                    ));
                }
                PromptState::Ready(input) => {
                    self.state = PromptState::Ready(input.clone());
                    return Ok(input);
                }
                PromptState::NeedDomainSelection { region } => {
                    if let Some(domain) = self.domain_flag.clone() {
                        if domain.is_empty() {
                            return Err(EmailError::Validation("Domain is required".to_string()));
                        }
                        self.state = PromptState::Ready(ResolvedInput {
                            region,
                            domain: Some(domain),
                        });
                        continue;
                    }

                    // Only domains get DKIM/verification records; email identities are skipped
                    let identities: Vec<_> = match provider.list_identities().await {
                        Ok(identities) => identities
                            .into_iter()
                            .filter(|i| i.identity_type == DOMAIN_IDENTITY_TYPE)
                            .collect(),
                        Err(e) => {
                            warn!("Could not list identities, continuing without them: {}", e);
                            Vec::new()
                        }
                    };

                    if identities.is_empty() {
                        self.state = PromptState::NeedNewDomainName { region };
                        continue;
                    }

                    let mut choices: Vec<String> =
                        identities.iter().map(|i| i.name.clone()).collect();
                    choices.push(ADD_NEW_DOMAIN.to_string());

                    let Some(index) = prompter.select("Select a domain", &choices)? else {
                        return Err(EmailError::Validation("No domain selected".to_string()));
                    };

                    self.state = if index < identities.len() {
                        PromptState::Ready(ResolvedInput {
                            region,
                            domain: Some(normalize_domain(&identities[index].name)),
                        })
                    } else {
                        PromptState::NeedNewDomainName { region }
                    };
                }
                PromptState::NeedNewDomainName { region } => {
                    let answer = non_blank(prompter.input("Domain name", None)?)
                        .map(|d| normalize_domain(&d))
                        .filter(|d| !d.is_empty());

                    let Some(domain) = answer else {
                        return Err(EmailError::Validation("Domain is required".to_string()));
                    };

                    self.state = PromptState::Ready(ResolvedInput {
                        region,
                        domain: Some(domain),
                    });
                }
            }
        }
    }
}
