use crate::{ExecutableCommand, site_args::SiteArgs};
use anyhow::{Context, Result};
use clap::Parser;
use neocities::Api;

/// Show public information about a site.
#[derive(Parser)]
pub struct InfoCommand {
    /// Name of the site to look up.
    sitename: String,
}

impl ExecutableCommand for InfoCommand {
    fn run(self, site_args: &SiteArgs) -> Result<()> {
        let mut site = site_args.site()?;
        site.site_name = self.sitename.clone();
        let client = site_args.optional_client(&site, Api::Info);

        let info = &site
            .get_info(Some(&client))
            .with_context(|| format!("failed to get info for '{}'", self.sitename))?
            .info;
        let or_none = |value: Option<String>| value.unwrap_or_else(|| "-".into());

        println!("Site:         {}", info.sitename);
        println!("Views:        {}", info.views);
        println!("Hits:         {}", info.hits);
        println!("Created:      {}", or_none(info.created_at.map(|t| t.to_string())));
        println!("Last updated: {}", or_none(info.last_updated.map(|t| t.to_string())));
        println!("Domain:       {}", or_none(info.domain.clone()));
        println!("Tags:         {}", info.tags.join(", "));
        Ok(())
    }
}
