//! Saved survey locations and their comparison.

pub mod book;
pub mod location;

pub use book::{ComparisonRow, CurrentScan, LocationBook, SaveOutcome, SurveyState};
pub use location::{display_ssid, Location, ScanReading};
