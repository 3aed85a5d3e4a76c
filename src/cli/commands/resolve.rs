//! Resolve command - show where artifacts come from and where they are cached

use crate::cache::{ArtifactCache, CacheState};
use crate::cli::args::{OutputFormat, ResolveArgs};
use crate::config::Config;
use crate::error::DepinjectResult;
use crate::resolve::resolve;
use crate::ui::{self, UiContext};
use console::style;
use serde::Serialize;

#[derive(Debug, Serialize)]
struct Resolution {
    coordinate: String,
    url: String,
    path: String,
    cached: bool,
}

/// Execute the resolve command
pub async fn execute(args: ResolveArgs, config: &Config) -> DepinjectResult<()> {
    let coordinates = super::coordinates(&args.artifacts, config)?;
    let cache = ArtifactCache::open(&config.cache.root)?;

    let resolutions = coordinates
        .iter()
        .map(|c| -> DepinjectResult<Resolution> {
            Ok(Resolution {
                coordinate: c.to_string(),
                url: resolve(c)?.to_string(),
                path: cache.path_for(c).display().to_string(),
                cached: cache.state(c) == CacheState::Hit,
            })
        })
        .collect::<DepinjectResult<Vec<_>>>()?;

    match args.format {
        OutputFormat::Table => print_table(&resolutions),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&resolutions)?),
        OutputFormat::Plain => {
            for r in &resolutions {
                println!("{}", r.path);
            }
        }
    }

    Ok(())
}

fn print_table(resolutions: &[Resolution]) {
    let ctx = UiContext::detect();
    for r in resolutions {
        ui::section(&ctx, &r.coordinate);
        ui::key_value("url", &r.url);
        ui::key_value("path", &r.path);
        let state = if r.cached {
            style(CacheState::Hit.to_string()).green()
        } else {
            style(CacheState::Miss.to_string()).yellow()
        };
        ui::key_value("cache", &state.to_string());
    }
}
