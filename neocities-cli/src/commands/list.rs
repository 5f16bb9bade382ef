use crate::{ExecutableCommand, site_args::SiteArgs};
use anyhow::{Context, Result};
use clap::Parser;
use indicatif::HumanBytes;
use neocities::Api;

/// List the files on your site.
#[derive(Parser)]
pub struct ListCommand {
    /// Only list files under this directory of your site.
    path: Option<String>,
}

impl ExecutableCommand for ListCommand {
    fn run(self, site_args: &SiteArgs) -> Result<()> {
        let site = site_args.site()?;
        let client = site_args.client(&site, Api::List)?;
        let path = self.path.unwrap_or_default();

        let files = site
            .list(&path, Some(&client))
            .context("failed to list files")?;
        for file in files {
            let updated = file
                .updated_at
                .map(|t| t.to_string())
                .unwrap_or_default();
            if file.is_dir {
                println!("{:>10}  {updated:<31}  {}/", "-", file.path);
            } else {
                println!(
                    "{:>10}  {updated:<31}  {}",
                    HumanBytes(file.size).to_string(),
                    file.path
                );
            }
        }
        Ok(())
    }
}
