use crate::{ExecutableCommand, commands::PROGRESS_BAR_TICKRATE, site_args::SiteArgs};
use anyhow::{Context, Result};
use clap::{Parser, ValueHint};
use indicatif::{HumanBytes, ProgressBar};
use neocities::Api;
use std::{fs, path::PathBuf};

/// Upload a single file to your site.
#[derive(Parser)]
pub struct UploadCommand {
    /// File to upload.
    #[clap(value_hint = ValueHint::FilePath)]
    file: PathBuf,

    /// Name to give the file on your site.
    ///
    /// May contain slashes to place the file in a directory.
    /// Defaults to the name of the local file.
    #[clap(short = 'n', long = "name")]
    name: Option<String>,
}

impl ExecutableCommand for UploadCommand {
    fn run(self, site_args: &SiteArgs) -> Result<()> {
        let site = site_args.site()?;
        let client = site_args.client(&site, Api::Upload)?;
        let size = fs::metadata(&self.file)
            .with_context(|| format!("failed to read file at '{}'", self.file.display()))?
            .len();

        let prog_bar = ProgressBar::new_spinner();
        prog_bar.enable_steady_tick(PROGRESS_BAR_TICKRATE);
        prog_bar.set_message(format!(
            "Uploading '{}' ({})",
            self.file.display(),
            HumanBytes(size)
        ));
        let name = self.name.as_deref().unwrap_or_default();
        let result = site.upload_file(&self.file, name, Some(&client));
        prog_bar.finish_and_clear();
        result.with_context(|| format!("failed to upload '{}'", self.file.display()))?;

        println!("Uploaded '{}'", self.file.display());
        Ok(())
    }
}
