//! Screenshot export to disk.

use crate::parser::archive::TraceArchive;
use crate::parser::schema::ScreencastFrame;
use crate::utils::config::SCREENSHOT_EXTENSION;
use crate::utils::error::OutputError;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// File name for a frame: whole milliseconds since trace start
///
/// Frames recorded before `start_time` clamp to 0.
pub fn screenshot_filename(frame: &ScreencastFrame, start_time: f64) -> String {
    let offset = (frame.timestamp - start_time).max(0.0).floor() as u64;
    format!("{}ms.{}", offset, SCREENSHOT_EXTENSION)
}

/// Write each frame's image into `output_dir`
///
/// **Public** - main entry point for screenshot export
///
/// # Arguments
/// * `archive` - Archive holding the frame images
/// * `frames` - Frames to export
/// * `start_time` - Trace start, origin for file names
/// * `output_dir` - Destination directory (created if absent)
///
/// # Returns
/// Number of files written; frames whose resource is missing are skipped
///
/// # Errors
/// * `OutputError::InvalidPath` - directory cannot be created
/// * `OutputError::WriteFailed` - I/O error during write
pub fn export_frames(
    archive: &TraceArchive,
    frames: &[ScreencastFrame],
    start_time: f64,
    output_dir: impl AsRef<Path>,
) -> Result<usize, OutputError> {
    let output_dir = output_dir.as_ref();

    if output_dir.is_file() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a file: {}",
            output_dir.display()
        )));
    }

    fs::create_dir_all(output_dir).map_err(|e| {
        OutputError::InvalidPath(format!(
            "Cannot create directory {}: {}",
            output_dir.display(),
            e
        ))
    })?;

    let mut written = 0;
    for frame in frames {
        let Some(bytes) = archive.resource(&frame.sha1) else {
            debug!("Resource for frame {} not in archive, skipping", frame.sha1);
            continue;
        };

        let path = output_dir.join(screenshot_filename(frame, start_time));
        fs::write(&path, bytes)?;
        written += 1;
    }

    info!("Exported {} screenshots to {}", written, output_dir.display());
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::archive::ArchiveMember;

    fn frame(timestamp: f64, sha1: &str) -> ScreencastFrame {
        ScreencastFrame {
            timestamp,
            page_id: "page@1".to_string(),
            sha1: sha1.to_string(),
            width: 1,
            height: 1,
        }
    }

    #[test]
    fn test_screenshot_filename() {
        assert_eq!(screenshot_filename(&frame(3000.7, "a"), 1000.0), "2000ms.jpeg");
        assert_eq!(screenshot_filename(&frame(500.0, "a"), 1000.0), "0ms.jpeg");
    }

    #[test]
    fn test_export_skips_missing_resources() {
        let archive = TraceArchive::from_members(vec![ArchiveMember {
            name: "resources/present".to_string(),
            data: b"jpeg bytes".to_vec(),
        }]);
        let temp_dir = tempfile::tempdir().unwrap();
        let out = temp_dir.path().join("nested/shots");

        let frames = vec![frame(1500.0, "present"), frame(1600.0, "absent")];
        let written = export_frames(&archive, &frames, 1000.0, &out).unwrap();

        assert_eq!(written, 1);
        assert_eq!(fs::read(out.join("500ms.jpeg")).unwrap(), b"jpeg bytes");
        assert!(!out.join("600ms.jpeg").exists());
    }

    #[test]
    fn test_export_rejects_file_path() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = export_frames(&TraceArchive::default(), &[], 0.0, file.path());
        assert!(matches!(result, Err(OutputError::InvalidPath(_))));
    }
}
