//! Console rendering of identities, DNS records and SMTP settings

use colored::Colorize;
use std::io::{self, Write};

use crate::providers::{IdentityDetail, IdentitySummary, VerificationStatus};
use crate::records::{dkim_records, verification_record, DnsRecord};
use crate::smtp::SmtpSettings;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

fn section<W: Write + ?Sized>(out: &mut W, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", title.bright_white().bold())?;
    writeln!(out, "{}", RULE.bright_cyan())
}

fn record<W: Write + ?Sized>(out: &mut W, record: &DnsRecord) -> io::Result<()> {
    writeln!(
        out,
        "  {} {}  {}  {}",
        "→".bright_blue(),
        record.record_type.to_string().bright_yellow(),
        record.name.bright_white(),
        record.value.bright_cyan()
    )
}

fn status_label(status: &VerificationStatus) -> colored::ColoredString {
    match status {
        VerificationStatus::Verified => status.to_string().bright_green(),
        VerificationStatus::Failed | VerificationStatus::TemporaryFailure => {
            status.to_string().bright_red()
        }
        _ => status.to_string().bright_yellow(),
    }
}

pub fn render_status<W: Write + ?Sized>(out: &mut W, detail: &IdentityDetail) -> io::Result<()> {
    section(out, &format!("Identity: {}", detail.domain))?;
    writeln!(
        out,
        "  Verification status:  {}",
        status_label(&detail.verification_status)
    )?;
    writeln!(
        out,
        "  DKIM status:          {}",
        detail.dkim_status.as_deref().unwrap_or("unknown")
    )?;
    writeln!(
        out,
        "  Verified for sending: {}",
        if detail.verified_for_sending {
            "yes".bright_green()
        } else {
            "no".bright_yellow()
        }
    )
}

pub fn render_dkim<W: Write + ?Sized>(out: &mut W, detail: &IdentityDetail) -> io::Result<()> {
    section(out, "DKIM records (CNAME)")?;
    let records = dkim_records(detail);
    if records.is_empty() {
        writeln!(
            out,
            "  {}",
            "No DKIM tokens available yet. Run check again once SES has issued them."
                .bright_yellow()
        )?;
        return Ok(());
    }
    for r in &records {
        record(out, r)?;
    }
    Ok(())
}

pub fn render_verification<W: Write + ?Sized>(
    out: &mut W,
    detail: &IdentityDetail,
) -> io::Result<()> {
    section(out, "Domain verification record (TXT)")?;
    match verification_record(detail) {
        Some(r) => record(out, &r),
        None => writeln!(
            out,
            "  {}",
            "No verification token was returned. DKIM records alone are enough to verify the domain."
                .bright_yellow()
        ),
    }
}

pub fn render_dmarc<W: Write + ?Sized>(out: &mut W, domain: &str) -> io::Result<()> {
    section(out, "Recommended DMARC record (TXT)")?;
    record(out, &DnsRecord::dmarc(domain))
}

pub fn render_smtp<W: Write + ?Sized>(out: &mut W, region: &str) -> io::Result<()> {
    let settings = SmtpSettings::for_region(region);
    section(out, "SMTP settings")?;
    writeln!(out, "  Host:            {}", settings.host.bright_cyan())?;
    let ports: Vec<String> = settings
        .starttls_ports
        .iter()
        .map(u16::to_string)
        .collect();
    writeln!(out, "  STARTTLS ports:  {}", ports.join(", "))?;
    writeln!(out, "  TLS port:        {}", settings.tls_wrapper_port)?;
    writeln!(
        out,
        "  Credentials:     {}",
        "create SMTP credentials in the SES console (IAM user)".bright_white()
    )
}

/// Render every section for a checked identity
pub fn render_identity<W: Write + ?Sized>(
    out: &mut W,
    detail: &IdentityDetail,
    region: &str,
) -> io::Result<()> {
    render_status(out, detail)?;
    render_dkim(out, detail)?;
    render_verification(out, detail)?;
    render_dmarc(out, &detail.domain)?;
    render_smtp(out, region)
}

pub fn render_identity_list<W: Write + ?Sized>(
    out: &mut W,
    region: &str,
    identities: &[IdentitySummary],
) -> io::Result<()> {
    if identities.is_empty() {
        writeln!(
            out,
            "{}",
            format!("No identities found in region {}.", region).bright_yellow()
        )?;
        return Ok(());
    }

    section(out, &format!("Identities in {}", region))?;
    for identity in identities {
        writeln!(
            out,
            "  {} {} ({})",
            "•".bright_cyan(),
            identity.name.bright_white(),
            identity.identity_type
        )?;
    }
    Ok(())
}
