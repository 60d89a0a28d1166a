//! `sesid list`: show the identities registered in a region

use anyhow::Context;
use clap::Args;
use sesid_email::prompt::default_region;
use sesid_email::{list_identities, EmailError, PromptFlow, SesClientConfig, SesIdentityProvider};

use super::{finish, run_interruptible};
use crate::terminal::TerminalPrompter;

/// List the email identities registered in a region
#[derive(Args, Debug, Clone)]
pub struct ListCommand {
    /// AWS region (prompted when omitted)
    #[arg(long, short = 'r')]
    pub region: Option<String>,

    /// Custom SES endpoint URL (e.g. LocalStack)
    #[arg(long, env = "SESID_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,
}

impl ListCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        run_interruptible(async move { finish(self.run().await) })
            .context("Listing identities failed")
    }

    async fn run(self) -> Result<(), EmailError> {
        let mut prompter = TerminalPrompter::stdio();
        let mut flow = PromptFlow::for_list(self.region, default_region());
        let region = flow.resolve_region(&mut prompter)?;

        let provider = SesIdentityProvider::new(&SesClientConfig {
            region,
            endpoint_url: self.endpoint_url,
        })
        .await?;

        list_identities(&provider, &mut std::io::stdout()).await?;
        Ok(())
    }
}
