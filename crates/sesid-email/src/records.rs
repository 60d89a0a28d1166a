//! DNS records derived from a domain identity, and their zone-file export

use serde::{Deserialize, Serialize};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::EmailError;
use crate::providers::IdentityDetail;

/// Target suffix for SES DKIM CNAME records
pub const DKIM_SUFFIX: &str = "dkim.amazonses.com";
/// Prefix of the domain verification TXT record
pub const VERIFICATION_PREFIX: &str = "_amazonses";
/// Monitor-only DMARC policy
pub const DMARC_POLICY: &str = "v=DMARC1; p=none;";
/// TTL written to the export file
pub const EXPORT_TTL: u32 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum RecordType {
    Txt,
    Cname,
}

impl std::fmt::Display for RecordType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordType::Txt => write!(f, "TXT"),
            RecordType::Cname => write!(f, "CNAME"),
        }
    }
}

/// DNS record the user has to publish
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRecord {
    pub record_type: RecordType,
    /// Host name, without the trailing dot
    pub name: String,
    /// Record value, unquoted and without the trailing dot
    pub value: String,
}

impl DnsRecord {
    pub fn dkim(domain: &str, token: &str) -> Self {
        Self {
            record_type: RecordType::Cname,
            name: format!("{}._domainkey.{}", token, domain),
            value: format!("{}.{}", token, DKIM_SUFFIX),
        }
    }

    pub fn verification(domain: &str, token: &str) -> Self {
        Self {
            record_type: RecordType::Txt,
            name: format!("{}.{}", VERIFICATION_PREFIX, domain),
            value: token.to_string(),
        }
    }

    pub fn dmarc(domain: &str) -> Self {
        Self {
            record_type: RecordType::Txt,
            name: format!("_dmarc.{}", domain),
            value: DMARC_POLICY.to_string(),
        }
    }

    /// Render as a tab-separated zone-file line (no newline)
    pub fn zone_line(&self) -> String {
        let value = match self.record_type {
            RecordType::Txt => format!("\"{}\"", self.value),
            RecordType::Cname => format!("{}.", self.value),
        };
        format!(
            "{}.\t{}\tIN\t{}\t{}",
            self.name, EXPORT_TTL, self.record_type, value
        )
    }
}

pub fn dkim_records(detail: &IdentityDetail) -> Vec<DnsRecord> {
    detail
        .dkim_tokens
        .iter()
        .map(|token| DnsRecord::dkim(&detail.domain, token))
        .collect()
}

pub fn verification_record(detail: &IdentityDetail) -> Option<DnsRecord> {
    detail
        .verification_token
        .as_deref()
        .map(|token| DnsRecord::verification(&detail.domain, token))
}

/// Every record for the identity, in export order:
/// verification TXT, DKIM CNAMEs, DMARC TXT
pub fn dns_records(detail: &IdentityDetail) -> Vec<DnsRecord> {
    let mut records = Vec::with_capacity(detail.dkim_tokens.len() + 2);
    records.extend(verification_record(detail));
    records.extend(dkim_records(detail));
    records.push(DnsRecord::dmarc(&detail.domain));
    records
}

pub fn zone_file(detail: &IdentityDetail) -> String {
    let mut out = String::new();
    for record in dns_records(detail) {
        let _ = writeln!(out, "{}", record.zone_line());
    }
    out
}

pub fn export_path(dir: &Path, domain: &str) -> PathBuf {
    dir.join(format!("{}.dns.txt", domain))
}

/// Write `<domain>.dns.txt` into `dir`, replacing any previous export
pub fn write_zone_file(dir: &Path, detail: &IdentityDetail) -> Result<PathBuf, EmailError> {
    let path = export_path(dir, &detail.domain);
    fs::write(&path, zone_file(detail))?;
    debug!("Wrote DNS records to {}", path.display());
    Ok(path)
}
