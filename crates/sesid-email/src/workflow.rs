//! The `check` and `list` operations over a resolved input

use colored::Colorize;
use std::io::Write;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::display::{render_identity, render_identity_list};
use crate::errors::EmailError;
use crate::prompt::Prompter;
use crate::providers::{IdentityDetail, IdentityProvider};
use crate::records::write_zone_file;

#[derive(Debug, Clone)]
pub struct CheckRequest {
    pub region: String,
    pub domain: String,
}

#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Directory receiving `<domain>.dns.txt`
    pub output_dir: PathBuf,
    /// Create missing identities without asking
    pub assume_yes: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            assume_yes: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    /// Records were printed and exported
    Displayed {
        detail: IdentityDetail,
        export_path: PathBuf,
        created: bool,
    },
    /// The identity does not exist and the user chose not to create it
    CreationDeclined,
}

/// Fetch (or create) the identity, then print and export its DNS records
pub async fn check_identity<P, Q, W>(
    provider: &P,
    prompter: &mut Q,
    request: &CheckRequest,
    options: &CheckOptions,
    out: &mut W,
) -> Result<CheckOutcome, EmailError>
where
    P: IdentityProvider + ?Sized,
    Q: Prompter + ?Sized,
    W: Write + ?Sized,
{
    let domain = request.domain.as_str();

    let (mut detail, created) = match provider.get_identity(domain).await {
        Ok(detail) => (detail, false),
        Err(EmailError::NotFound(_)) => {
            writeln!(
                out,
                "{} {}",
                "!".bright_yellow(),
                format!("{} is not registered in {}.", domain, request.region).bright_yellow()
            )?;

            let create = options.assume_yes
                || prompter
                    .confirm(&format!("Create identity for {}?", domain), true)?
                    .unwrap_or(false);
            if !create {
                writeln!(out, "{}", "No identity created.".bright_white())?;
                return Ok(CheckOutcome::CreationDeclined);
            }

            writeln!(out, "{} Creating identity...", "→".bright_blue())?;
            let created = provider.create_identity(domain).await?;
            info!("Created SES identity for {}", domain);
            (IdentityDetail::from_created(domain, created), true)
        }
        Err(e) => return Err(e),
    };

    match provider.get_legacy_verification_token(domain).await {
        Ok(token) => detail.merge_legacy_token(token),
        Err(e) => warn!("Could not fetch verification token for {}: {}", domain, e),
    }

    render_identity(out, &detail, &request.region)?;

    let export_path = write_zone_file(&options.output_dir, &detail)?;
    writeln!(out)?;
    writeln!(
        out,
        "{} DNS records written to {}",
        "✓".bright_green(),
        export_path.display().to_string().bright_white()
    )?;

    Ok(CheckOutcome::Displayed {
        detail,
        export_path,
        created,
    })
}

/// Print every identity in the provider's region; returns how many were found
pub async fn list_identities<P, W>(provider: &P, out: &mut W) -> Result<usize, EmailError>
where
    P: IdentityProvider + ?Sized,
    W: Write + ?Sized,
{
    let identities = match provider.list_identities().await {
        Ok(identities) => identities,
        Err(e) => {
            warn!("Failed to list identities: {}", e);
            Vec::new()
        }
    };
    debug!("Listing {} identities", identities.len());

    render_identity_list(out, provider.region(), &identities)?;
    Ok(identities.len())
}
