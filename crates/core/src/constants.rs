//! Constants used throughout the physio core crate.

/// Default directory for stored clinical histories when no explicit directory is configured.
pub const DEFAULT_RECORDS_DIR: &str = "clinical_records";

/// Filename of the stored clinical history inside a patient's directory.
pub const CLINICAL_HISTORY_FILENAME: &str = "clinical_history.json";

/// Lowest accepted value on the pain scale (EVA).
pub const PAIN_SCALE_MIN: i64 = 0;

/// Highest accepted value on the pain scale (EVA).
pub const PAIN_SCALE_MAX: i64 = 10;

/// Message attached to a required field that is blank after trimming.
pub const REQUIRED_MESSAGE: &str = "required";

/// Message attached to an out-of-range pain scale.
pub const PAIN_SCALE_RANGE_MESSAGE: &str = "must be between 0 and 10";

/// Date format used for `creationDate` on the wire and in raw input.
pub const DATE_FORMAT: &str = "%Y-%m-%d";
