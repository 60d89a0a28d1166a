//! SES domain identity management for sesid
//!
//! This crate talks to Amazon SES to:
//! - List, inspect and create domain identities
//! - Derive the DKIM, verification and DMARC DNS records for a domain
//! - Render those records and the regional SMTP settings, and export a zone file

pub mod display;
pub mod errors;
pub mod prompt;
pub mod providers;
pub mod records;
pub mod smtp;
pub mod workflow;

// Re-export main types
pub use errors::EmailError;
pub use prompt::{PromptFlow, Prompter, ResolvedInput};
pub use providers::{IdentityDetail, IdentityProvider, SesClientConfig, SesIdentityProvider};
pub use workflow::{check_identity, list_identities, CheckOptions, CheckOutcome, CheckRequest};
