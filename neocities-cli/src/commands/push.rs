use crate::{ExecutableCommand, commands::PROGRESS_BAR_TICKRATE, site_args::SiteArgs};
use anyhow::{Result, bail};
use clap::{Parser, ValueHint};
use indicatif::ProgressBar;
use inquire::Confirm;
use neocities::Api;
use std::path::PathBuf;

/// Upload a directory and all of its subdirectories to your site.
///
/// Files keep their path relative to the current directory as their name
/// on the site, so run this from the directory that holds your site's root.
#[derive(Parser)]
pub struct PushCommand {
    /// Directory to push.
    #[clap(value_hint = ValueHint::DirPath)]
    directory: PathBuf,

    /// Skip all confirmation dialogues.
    #[clap(short = 'y', env = "NEOCITIES_NOCONFIRM", long = "yes")]
    no_confirm: bool,
}

impl ExecutableCommand for PushCommand {
    fn run(self, site_args: &SiteArgs) -> Result<()> {
        let site = site_args.site()?;
        let client = site_args.client(&site, Api::Upload)?;

        // Ask the user if they'd like to upload everything.
        if !self.no_confirm
            && !Confirm::new(&format!(
                "Are you sure you want to upload every file under '{}'?",
                self.directory.display()
            ))
            .with_default(false)
            .prompt()?
        {
            return Ok(());
        }

        let prog_bar = ProgressBar::new_spinner();
        prog_bar.enable_steady_tick(PROGRESS_BAR_TICKRATE);
        prog_bar.set_message(format!("Pushing '{}'", self.directory.display()));
        let report = site.push(&self.directory, Some(&client));
        prog_bar.finish_and_clear();
        let report = report?;

        println!("Uploaded {} file(s)", report.uploaded.len());
        if !report.is_complete() {
            bail!(
                "{} of {} file(s) failed to upload",
                report.failed.len(),
                report.attempted()
            );
        }
        Ok(())
    }
}
