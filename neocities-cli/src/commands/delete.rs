use crate::{ExecutableCommand, site_args::SiteArgs};
use anyhow::{Context, Result};
use clap::Parser;
use inquire::Confirm;
use neocities::Api;

/// Delete files from your site.
#[derive(Parser)]
pub struct DeleteCommand {
    /// Names of the files on your site to delete.
    #[clap(required = true, num_args = 1..)]
    files: Vec<String>,

    /// Skip all confirmation dialogues.
    #[clap(short = 'y', env = "NEOCITIES_NOCONFIRM", long = "yes")]
    no_confirm: bool,
}

impl ExecutableCommand for DeleteCommand {
    fn run(self, site_args: &SiteArgs) -> Result<()> {
        let site = site_args.site()?;
        let client = site_args.client(&site, Api::Delete)?;

        if !self.no_confirm
            && !Confirm::new(&format!(
                "Are you sure you want to delete {}? ",
                self.files.join(", ")
            ))
            .with_default(false)
            .prompt()?
        {
            return Ok(());
        }

        site.delete_files(Some(&client), self.files.as_slice())
            .context("failed to delete files")?;
        println!("Deleted {} file(s)", self.files.len());
        Ok(())
    }
}
