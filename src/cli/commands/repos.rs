//! Repos command - list the repository catalog

use crate::config::Config;
use crate::error::DepinjectResult;
use crate::repository::RepositoryCatalog;
use console::style;

/// Execute the repos command
pub async fn execute(config: &Config) -> DepinjectResult<()> {
    let catalog = RepositoryCatalog::with_custom(&config.repositories.custom)?;
    let default = config.repositories.default.as_str();

    println!("{:<3}{:<12} {}", "", style("NAME").bold(), style("URL").bold());
    for (name, repo) in catalog.iter() {
        let marker = if name == default { "*" } else { "" };
        let origin = if RepositoryCatalog::is_preset(name) {
            String::new()
        } else {
            style(" (custom)").dim().to_string()
        };
        println!("{:<3}{:<12} {}{}", marker, name, repo, origin);
    }

    if catalog.lookup(default).is_none() {
        println!();
        println!("{} {}", style("default:").dim(), default);
    }

    Ok(())
}
