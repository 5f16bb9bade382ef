use crate::{ExecutableCommand, RootCommand, site_args::SiteArgs};
use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, ValueHint};
use clap_complete::{Shell, generate};
use std::{
    fs::File,
    io::{self, Write},
    path::PathBuf,
};

/// Generate a shell completion script.
#[derive(Parser)]
pub struct CompletionsCommand {
    #[clap(value_enum, value_hint = ValueHint::Other)]
    shell: Shell,

    /// Write the script to this file instead of standard output.
    #[clap(short = 'o', long = "output", value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,
}

impl ExecutableCommand for CompletionsCommand {
    fn run(self, _: &SiteArgs) -> Result<()> {
        let mut cmd = RootCommand::command();
        let bin_name = cmd.get_name().to_string();
        let mut out: Box<dyn Write> = match &self.output {
            Some(path) => Box::new(
                File::create(path)
                    .with_context(|| format!("failed to create '{}'", path.display()))?,
            ),
            None => Box::new(io::stdout()),
        };
        eprintln!("Generating {:?} completions for {bin_name}...", self.shell);
        generate(self.shell, &mut cmd, bin_name, &mut out);
        out.flush()?;
        Ok(())
    }
}
