//! Temporal join between actions and screencast frames.

use crate::parser::schema::{Action, ScreencastFrame};
use log::debug;
use std::collections::BTreeSet;

/// Keep the frame closest to each action's completion
///
/// **Public** - implements the "action-only" screenshot filter
///
/// For every completed action, the candidates are frames on the action's
/// page whose timestamp lies in `[start, end]`; the latest candidate wins
/// (first in frame order on ties). Actions that never completed, or have
/// no page, select nothing. Two actions may pick the same frame; it then
/// appears once in the result.
///
/// # Arguments
/// * `frames` - Frames to select from
/// * `actions` - Reconstructed actions
///
/// # Returns
/// Selected frames sorted by timestamp
pub fn filter_action_frames(
    frames: &[ScreencastFrame],
    actions: &[Action],
) -> Vec<ScreencastFrame> {
    let selected: BTreeSet<usize> = actions
        .iter()
        .filter_map(|action| latest_frame_in_window(frames, action))
        .collect();

    let mut result: Vec<ScreencastFrame> = selected
        .into_iter()
        .map(|index| frames[index].clone())
        .collect();
    result.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    debug!(
        "Correlated {} of {} frames with {} actions",
        result.len(),
        frames.len(),
        actions.len()
    );
    result
}

/// Index of the latest frame inside one action's window
///
/// **Private** - internal helper for filter_action_frames
fn latest_frame_in_window(frames: &[ScreencastFrame], action: &Action) -> Option<usize> {
    let end = action.end_time?;
    let page_id = action.page_id.as_deref()?;

    frames
        .iter()
        .enumerate()
        .filter(|(_, frame)| {
            frame.page_id == page_id && frame.timestamp >= action.start_time && frame.timestamp <= end
        })
        .fold(None, |best: Option<(usize, f64)>, (index, frame)| match best {
            Some((_, best_time)) if best_time >= frame.timestamp => best,
            _ => Some((index, frame.timestamp)),
        })
        .map(|(index, _)| index)
}
