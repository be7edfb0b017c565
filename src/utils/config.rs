//! Configuration and constants for the analyzer.

/// Suffix of archive members holding the main event log
pub const EVENTS_SUFFIX: &str = ".trace";

/// Suffix of archive members holding the network log
pub const NETWORK_SUFFIX: &str = ".network";

/// Prefix under which binary resources are stored, addressed by content hash
pub const RESOURCE_PREFIX: &str = "resources/";

// Timing phases summed into a request's duration, in recorded order.
// Missing phases contribute zero.
pub const TIMING_PHASES: &[&str] = &["dns", "connect", "ssl", "send", "wait", "receive"];

/// Default fraction of differing pixels below which a frame is a duplicate
pub const DEFAULT_DEDUP_THRESHOLD: f64 = 0.01;

/// Per-channel tolerance when comparing two pixels (absorbs JPEG noise)
pub const PIXEL_CHANNEL_TOLERANCE: u8 = 5;

/// Extension of exported screenshot files
pub const SCREENSHOT_EXTENSION: &str = "jpeg";

/// Default output directory for exported screenshots
pub const DEFAULT_SCREENSHOT_DIR: &str = "./trace-screenshots/";

/// Default number of actions shown in the summary timeline
pub const DEFAULT_SUMMARY_ACTIONS: usize = 20;

/// Fallback for browser and platform names when the trace omits them
pub const UNKNOWN: &str = "unknown";
