// Host-side tests for constants and their relationships.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}

use constants::*;
use starflight_core::constants as core;

#[test]
#[allow(clippy::assertions_on_constants)]
fn constants_are_within_reasonable_bounds() {
    // A frame clamp below one 60Hz frame would slow normal playback down
    assert!(MAX_FRAME_DT_SEC > 1.0 / 60.0);
    assert!(MAX_FRAME_DT_SEC <= 0.5);

    assert!(PANEL_SCREEN_MARGIN >= 0.0 && PANEL_SCREEN_MARGIN < 1.0);
    assert!(BLOOM_DOWNSCALE >= 1);
    assert!(INSTANCE_CAPACITY.is_power_of_two());
}

#[test]
fn element_ids_are_distinct_and_non_empty() {
    let ids = [CANVAS_ID, SPACER_ID, GUIDE_ID, PANELS_ID];
    for (i, a) in ids.iter().enumerate() {
        assert!(!a.is_empty());
        assert!(!a.contains(' '), "{a} is not a valid id");
        for b in &ids[i + 1..] {
            assert_ne!(a, b);
        }
    }
    assert!(!PANEL_ID_PREFIX.is_empty());
}

#[test]
fn default_instance_capacity_covers_static_scenery() {
    // Every big star contributes at least a body and a light; asteroids one body each.
    let baseline = core::ASTEROID_COUNT + core::BIG_STAR_COUNT;
    assert!(INSTANCE_CAPACITY >= baseline);
}
