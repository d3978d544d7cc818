//! Filesystem utilities.
//!
//! On the V5 Brain the filesystem is the SD card, so this is where the log
//! file ends up.

/// Console and file logging.
pub mod logger;
