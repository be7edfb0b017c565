//! Perceptual deduplication of screencast frames.
//!
//! Frames are walked in timestamp order. Each frame is compared against the
//! last frame that was *kept*, not the one immediately before it, so a slow
//! drift is still caught once it accumulates past the threshold.

use crate::parser::archive::TraceArchive;
use crate::parser::schema::ScreencastFrame;
use crate::utils::config::PIXEL_CHANNEL_TOLERANCE;
use image::{Rgba, RgbaImage};
use log::{debug, warn};

/// Carried state of the dedup fold
#[derive(Default)]
struct DedupState {
    kept: Vec<ScreencastFrame>,
    /// Decoded image of the last kept frame (`None` if it failed to decode)
    baseline: Option<RgbaImage>,
}

impl DedupState {
    fn step(mut self, frame: &ScreencastFrame, archive: &TraceArchive, threshold: f64) -> Self {
        let Some(bytes) = archive.resource(&frame.sha1) else {
            debug!("Frame {} has no resource, skipping", frame.sha1);
            return self;
        };

        let image = decode_frame(frame, bytes);

        let keep = self.kept.is_empty()
            || match (&self.baseline, &image) {
                (Some(baseline), Some(current)) => !is_similar(baseline, current, threshold),
                // Nothing to compare: not evidence of duplication
                _ => true,
            };

        if keep {
            self.kept.push(frame.clone());
            self.baseline = image;
        }

        self
    }
}

/// Drop frames that look like the last retained one
///
/// **Public** - main entry point for frame deduplication
///
/// # Arguments
/// * `frames` - Frames to filter (sorted by timestamp here if they are not)
/// * `archive` - Archive holding the frame images
/// * `threshold` - Fraction of differing pixels at or above which a frame is kept
///
/// # Returns
/// Time-ordered subset of `frames`. Frames without a resource are skipped,
/// frames that fail to decode are kept.
pub fn deduplicate_frames(
    frames: &[ScreencastFrame],
    archive: &TraceArchive,
    threshold: f64,
) -> Vec<ScreencastFrame> {
    let mut ordered: Vec<&ScreencastFrame> = frames.iter().collect();
    ordered.sort_by(|a, b| a.timestamp.total_cmp(&b.timestamp));

    let kept = ordered
        .into_iter()
        .fold(DedupState::default(), |state, frame| state.step(frame, archive, threshold))
        .kept;

    debug!("Dedup kept {} of {} frames", kept.len(), frames.len());
    kept
}

/// Whether two images differ by less than `threshold`
///
/// **Public** - exposed for callers comparing frames directly
///
/// Images with different dimensions are never similar.
pub fn is_similar(baseline: &RgbaImage, current: &RgbaImage, threshold: f64) -> bool {
    pixel_difference(baseline, current).is_some_and(|fraction| fraction < threshold)
}

/// Fraction of pixels that differ, or `None` when dimensions mismatch
pub fn pixel_difference(a: &RgbaImage, b: &RgbaImage) -> Option<f64> {
    if a.dimensions() != b.dimensions() {
        return None;
    }

    let total = u64::from(a.width()) * u64::from(a.height());
    if total == 0 {
        return Some(0.0);
    }

    let differing = a
        .pixels()
        .zip(b.pixels())
        .filter(|(p, q)| pixels_differ(p, q))
        .count();

    Some(differing as f64 / total as f64)
}

/// Check if two pixels differ beyond compression noise
///
/// **Private** - internal utility
fn pixels_differ(a: &Rgba<u8>, b: &Rgba<u8>) -> bool {
    a.0.iter()
        .zip(b.0.iter())
        .any(|(x, y)| x.abs_diff(*y) > PIXEL_CHANNEL_TOLERANCE)
}

fn decode_frame(frame: &ScreencastFrame, bytes: &[u8]) -> Option<RgbaImage> {
    match image::load_from_memory(bytes) {
        Ok(image) => Some(image.to_rgba8()),
        Err(e) => {
            warn!("Cannot decode frame {}: {}", frame.sha1, e);
            None
        }
    }
}
