//! Full configuration validation.
//!
//! Validates numeric ranges and collects every failure into a single
//! `ConfigError`.

mod helpers;


use crate::schema::DockyardConfig;
use dockyard_common::ConfigError;

use helpers::{validate_nonzero, validate_range, validate_range_u64};

/// Largest dock the placement and persisted layout support.
pub const MAX_DOCK_SLOTS: u32 = 64;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &DockyardConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_range_u64(
        &mut errors,
        "integration.call_timeout_ms",
        config.integration.call_timeout_ms,
        100,
        60_000,
    );
    validate_range(&mut errors, "dock.slots", config.dock.slots, 1, MAX_DOCK_SLOTS);
    validate_range_u64(
        &mut errors,
        "dock.launch_timeout_ms",
        config.dock.launch_timeout_ms,
        1_000,
        600_000,
    );
    validate_range_u64(
        &mut errors,
        "bounce.interval_ms",
        config.bounce.interval_ms,
        100,
        60_000,
    );
    validate_nonzero(&mut errors, "screen.width", config.screen.width);
    validate_nonzero(&mut errors, "screen.height", config.screen.height);
    validate_nonzero(&mut errors, "screen.icon_size", config.screen.icon_size);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}
