//! `sesid check`: show (and optionally create) a domain identity

use anyhow::Context;
use clap::Args;
use sesid_email::prompt::default_region;
use sesid_email::{
    check_identity, CheckOptions, CheckRequest, EmailError, PromptFlow, SesClientConfig,
    SesIdentityProvider,
};
use std::path::PathBuf;

use super::{finish, run_interruptible};
use crate::terminal::TerminalPrompter;

/// Check a domain identity and print the DNS records it needs
#[derive(Args, Debug, Clone)]
pub struct CheckCommand {
    /// Domain name (prompted when omitted)
    #[arg(long, short = 'd')]
    pub domain: Option<String>,

    /// AWS region (prompted when omitted)
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// Create a missing identity without asking
    #[arg(long, short = 'y', default_value = "false")]
    pub yes: bool,

    /// Directory for the exported `<domain>.dns.txt`
    #[arg(long, short = 'o', default_value = ".")]
    pub output_dir: PathBuf,

    /// Custom SES endpoint URL (e.g. LocalStack)
    #[arg(long, env = "SESID_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,
}

impl CheckCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        if !self.output_dir.is_dir() {
            return Err(anyhow::anyhow!(
                "Output directory does not exist: {}",
                self.output_dir.display()
            ));
        }
        run_interruptible(async move { finish(self.run().await) })
            .context("Domain identity check failed")
    }

    async fn run(self) -> Result<(), EmailError> {
        let mut prompter = TerminalPrompter::stdio();
        let mut flow = PromptFlow::for_check(self.region, self.domain, default_region());
        let region = flow.resolve_region(&mut prompter)?;

        let provider = SesIdentityProvider::new(&SesClientConfig {
            region,
            endpoint_url: self.endpoint_url,
        })
        .await?;

        let input = flow.resolve_domain(&provider, &mut prompter).await?;
        let Some(domain) = input.domain else {
            return Err(EmailError::Validation("Domain is required".to_string()));
        };

        let request = CheckRequest {
            region: input.region,
            domain,
        };
        let options = CheckOptions {
            output_dir: self.output_dir,
            assume_yes: self.yes,
        };

        check_identity(
            &provider,
            &mut prompter,
            &request,
            &options,
            &mut std::io::stdout(),
        )
        .await?;
        Ok(())
    }
}
