//! Nearest-open-beat matching. The search window is anchored on the slot
//! implied by the input's own timestamp, so a burst of late inputs can still
//! reach a neighboring beat without stealing a far-away one.

use crate::session::Beat;

/// Beats considered on either side of the estimated slot.
pub const WINDOW_SLOTS: i64 = 2;

/// Maximum distance at which an input may bind to a beat. Inclusive: exactly
/// 500ms accepts.
pub const ACCEPTANCE_RADIUS_MS: f64 = 500.0;

/// Index of the nearest open beat within the window, or `None` when every
/// candidate is taken or the nearest is outside the acceptance radius.
/// Equal distances resolve to the lower beat index.
pub fn find_nearest_open_beat(beats: &[Beat], interval_ms: f64, timestamp: f64) -> Option<usize> {
    if beats.is_empty() {
        return None;
    }

    let estimated = (timestamp / interval_ms).round() as i64;
    let start = (estimated - WINDOW_SLOTS).max(0);
    let end = (estimated + WINDOW_SLOTS).min(beats.len() as i64 - 1);
    if start > end {
        return None;
    }

    let mut best: Option<(usize, f64)> = None;
    for beat in &beats[start as usize..=end as usize] {
        if !beat.is_open() {
            continue;
        }
        let distance = (timestamp - beat.expected_time).abs();
        let closer = match best {
            Some((_, best_distance)) => distance < best_distance,
            None => true,
        };
        if closer {
            best = Some((beat.beat_number, distance));
        }
    }

    match best {
        Some((index, distance)) if distance <= ACCEPTANCE_RADIUS_MS => Some(index),
        _ => None,
    }
}
