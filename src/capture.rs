//! Capture-session plumbing for the decode path
//!
//! The codec core never owns a camera. The surrounding capture component
//! implements [`FrameSource`] and delivers one frame per tick; this module
//! supplies the error taxonomy it must report through and a fixed-interval
//! [`ScanDriver`] that feeds a [`ScanSession`](crate::scanner::ScanSession)
//! and stops deterministically on the first detection.

use std::thread;
use std::time::Duration;

use thiserror::Error;
use tracing::{debug, info};

use crate::models::Detection;
use crate::scanner::ScanSession;

/// Interval between scan ticks
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_millis(500);
/// Delay before the first tick, letting the camera stabilize
pub const DEFAULT_WARMUP: Duration = Duration::from_secs(2);

/// Frame/camera acquisition failures, as a small fixed taxonomy so each
/// kind can be shown actionable guidance
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The user or platform denied camera access
    #[error("camera access denied")]
    PermissionDenied,
    /// No usable capture device exists
    #[error("no suitable camera found")]
    NoDevice,
    /// The device exists but is held by another process
    #[error("camera is in use by another application")]
    DeviceBusy,
    /// The execution context does not allow capture
    #[error("camera requires a secure context")]
    InsecureContext,
    /// Anything the taxonomy does not cover
    #[error("could not start camera: {0}")]
    Unknown(String),
}

impl CaptureError {
    /// Actionable guidance for showing to an end user
    pub fn guidance(&self) -> &'static str {
        match self {
            CaptureError::PermissionDenied => {
                "Enable camera permissions in your browser or system settings, then try again."
            }
            CaptureError::NoDevice => {
                "Connect a camera, or upload an image of the badge instead."
            }
            CaptureError::DeviceBusy => {
                "Close other applications using the camera, then try again."
            }
            CaptureError::InsecureContext => {
                "Serve the page over HTTPS (or localhost) to use the camera."
            }
            CaptureError::Unknown(_) => {
                "Try refreshing, or upload an image of the badge instead."
            }
        }
    }
}

/// Pixel layout of a delivered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelFormat {
    /// 3 bytes per pixel
    Rgb8,
    /// 4 bytes per pixel, alpha ignored
    Rgba8,
}

/// One raster frame delivered by a capture source
#[derive(Debug, Clone)]
pub struct Frame {
    /// Raw pixel bytes, row-major
    pub data: Vec<u8>,
    /// Width in pixels
    pub width: usize,
    /// Height in pixels
    pub height: usize,
    /// Pixel layout of `data`
    pub format: PixelFormat,
}

impl Frame {
    /// Wrap an RGB buffer
    pub fn rgb(data: Vec<u8>, width: usize, height: usize) -> Self {
        Self {
            data,
            width,
            height,
            format: PixelFormat::Rgb8,
        }
    }

    /// Wrap an RGBA buffer
    pub fn rgba(data: Vec<u8>, width: usize, height: usize) -> Self {
        Self {
            data,
            width,
            height,
            format: PixelFormat::Rgba8,
        }
    }
}

/// A camera stream or image sequence owned by the surrounding capture
/// component
pub trait FrameSource {
    /// Acquire the underlying device or stream
    fn start(&mut self) -> Result<(), CaptureError>;

    /// Release the underlying device or stream
    fn stop(&mut self);

    /// Deliver the next frame; `Ok(None)` means the stream has ended
    fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError>;
}

/// Fixed-interval trigger that feeds frames from a source into a session
///
/// One frame per tick; at most one decode attempt is ever in flight because
/// the loop is sequential and the session additionally gates re-entry. The
/// first detection stops the source and ends the run, guaranteeing
/// at-most-one reported detection per scanning session.
#[derive(Debug, Clone)]
pub struct ScanDriver {
    interval: Duration,
    warmup: Duration,
}

impl ScanDriver {
    /// Driver with the default 500 ms interval and 2 s warm-up
    pub fn new() -> Self {
        Self {
            interval: DEFAULT_SCAN_INTERVAL,
            warmup: DEFAULT_WARMUP,
        }
    }

    /// Driver with explicit timing (zero values make tests immediate)
    pub fn with_timing(interval: Duration, warmup: Duration) -> Self {
        Self { interval, warmup }
    }

    /// Run the scan loop until a detection, stream end, or source error.
    ///
    /// On detection the source is stopped before returning. An error from
    /// the source also stops it and is passed through.
    pub fn run<S: FrameSource>(
        &self,
        source: &mut S,
        session: &ScanSession,
    ) -> Result<Option<Detection>, CaptureError> {
        source.start()?;
        info!(interval_ms = self.interval.as_millis() as u64, "scan loop started");

        if !self.warmup.is_zero() {
            thread::sleep(self.warmup);
        }

        loop {
            let frame = match source.next_frame() {
                Ok(Some(frame)) => frame,
                Ok(None) => {
                    debug!("frame stream ended without a detection");
                    source.stop();
                    return Ok(None);
                }
                Err(err) => {
                    source.stop();
                    return Err(err);
                }
            };

            if let Some(detection) = session.process_frame(&frame) {
                info!(content = %detection.content, "scan loop stopped on detection");
                source.stop();
                return Ok(Some(detection));
            }

            if !self.interval.is_zero() {
                thread::sleep(self.interval);
            }
        }
    }
}

impl Default for ScanDriver {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct ScriptedSource {
        frames: Vec<Frame>,
        started: bool,
        stopped: bool,
    }

    impl ScriptedSource {
        fn new(mut frames: Vec<Frame>) -> Self {
            frames.reverse();
            Self {
                frames,
                started: false,
                stopped: false,
            }
        }
    }

    impl FrameSource for ScriptedSource {
        fn start(&mut self) -> Result<(), CaptureError> {
            self.started = true;
            Ok(())
        }

        fn stop(&mut self) {
            self.stopped = true;
        }

        fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError> {
            Ok(self.frames.pop())
        }
    }

    struct FailingSource;

    impl FrameSource for FailingSource {
        fn start(&mut self) -> Result<(), CaptureError> {
            Err(CaptureError::PermissionDenied)
        }

        fn stop(&mut self) {}

        fn next_frame(&mut self) -> Result<Option<Frame>, CaptureError> {
            Ok(None)
        }
    }

    #[test]
    fn test_driver_drains_blank_stream() {
        let frames = vec![Frame::rgb(vec![255u8; 60 * 60 * 3], 60, 60); 3];
        let mut source = ScriptedSource::new(frames);
        let session = ScanSession::new(vec!["reg_1".into()], "http://host");
        let driver = ScanDriver::with_timing(Duration::ZERO, Duration::ZERO);

        let result = driver.run(&mut source, &session);
        assert!(matches!(result, Ok(None)));
        assert!(source.started);
        assert!(source.stopped);
        assert!(!session.detection_reported());
    }

    #[test]
    fn test_driver_propagates_start_error() {
        let session = ScanSession::new(Vec::new(), "http://host");
        let driver = ScanDriver::with_timing(Duration::ZERO, Duration::ZERO);
        let result = driver.run(&mut FailingSource, &session);
        assert!(matches!(result, Err(CaptureError::PermissionDenied)));
    }

    #[test]
    fn test_guidance_is_distinct_per_kind() {
        let errors = [
            CaptureError::PermissionDenied,
            CaptureError::NoDevice,
            CaptureError::DeviceBusy,
            CaptureError::InsecureContext,
            CaptureError::Unknown("boom".into()),
        ];
        for (i, a) in errors.iter().enumerate() {
            assert!(!a.guidance().is_empty());
            for b in errors.iter().skip(i + 1) {
                assert_ne!(a.guidance(), b.guidance());
            }
        }
    }
}
