//! Fetch command - download artifacts into the cache

use crate::cli::args::ArtifactArgs;
use crate::config::Config;
use crate::error::DepinjectResult;
use crate::ui::{self, UiContext};

/// Execute the fetch command
pub async fn execute(args: ArtifactArgs, config: &Config) -> DepinjectResult<()> {
    let coordinates = super::coordinates(&args, config)?;
    let pipeline = super::pipeline(config, ())?;

    super::blocking(move || {
        let ctx = UiContext::detect();
        for coordinate in &coordinates {
            let cached = match pipeline.ensure(coordinate) {
                Ok(cached) => cached,
                Err(e) => {
                    ui::step_error(&ctx, &coordinate.to_string());
                    return Err(e);
                }
            };

            let detail = match &cached.fetched {
                Some(outcome) => format!("downloaded {} bytes", outcome.bytes),
                None => "cached".to_string(),
            };
            ui::step_ok(
                &ctx,
                &coordinate.to_string(),
                &format!("{}, {}", cached.path.display(), detail),
            );
        }
        Ok(())
    })
    .await
}
