//! Wires configuration and CLI arguments into concrete clients.
//!
//! Two substitutions happen here and nowhere else: a source reference that is
//! a path on disk selects the file extraction client, and `--dry-run` swaps
//! the HTTP load client for the in-memory one so a rehearsal exercises the
//! full stage sequence without platform traffic.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use lift_client::{
    ExtractionClient, FileExtraction, HttpExtraction, HttpLoad, LoadClient, MemoryLoad,
    ResiliencePolicy,
};
use lift_config::{ConfigError, LiftConfig};
use lift_engine::PipelineOptions;

use crate::cli::ImportArgs;

pub fn load_config() -> anyhow::Result<LiftConfig> {
    LiftConfig::load_with_dotenv().context("failed to load configuration")
}

fn policy(config: &LiftConfig) -> ResiliencePolicy {
    ResiliencePolicy::new(
        config.limits.max_attempts,
        Duration::from_millis(config.limits.base_delay_ms),
        Duration::from_millis(config.limits.max_delay_ms),
        config.limits.calls_per_minute,
    )
}

/// Pick the extraction client for a source reference.
///
/// A reference that resolves to a file on disk is read locally; anything else
/// goes to the source system's export API and requires the `source`
/// configuration section.
pub fn extraction_client(
    config: &LiftConfig,
    source: &str,
) -> anyhow::Result<Arc<dyn ExtractionClient>> {
    if Path::new(source).is_file() {
        return Ok(Arc::new(FileExtraction));
    }

    if !config.source.is_configured() {
        return Err(ConfigError::NotConfigured {
            section: "source".into(),
        })
        .context(
            "set PLANLIFT_SOURCE__BASE_URL and PLANLIFT_SOURCE__TOKEN, \
             or pass a path to a JSON export",
        );
    }
    Ok(Arc::new(HttpExtraction::new(
        &config.source.base_url,
        &config.source.token,
        policy(config),
    )))
}

/// Pick the load client. Dry runs write to memory only.
pub fn load_client(config: &LiftConfig, dry_run: bool) -> anyhow::Result<Arc<dyn LoadClient>> {
    if dry_run {
        return Ok(Arc::new(MemoryLoad::new()));
    }

    if !config.target.is_configured() {
        return Err(ConfigError::NotConfigured {
            section: "target".into(),
        })
        .context("set PLANLIFT_TARGET__BASE_URL and PLANLIFT_TARGET__TOKEN, or use --dry-run");
    }
    Ok(Arc::new(HttpLoad::new(
        &config.target.base_url,
        &config.target.token,
        policy(config),
    )))
}

/// Merge config defaults with per-invocation flags.
pub fn pipeline_options(config: &LiftConfig, args: &ImportArgs) -> PipelineOptions {
    PipelineOptions {
        destination: args.destination,
        reference_workspace_id: config.target.reference_workspace_id,
        dry_run: args.dry_run,
        hours_per_day: config.general.hours_per_day,
        max_indent: config.general.max_indent,
        clear_placeholders: args.clear_placeholders,
    }
}
