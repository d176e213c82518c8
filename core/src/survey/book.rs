use crate::signal::{to_display_range, SignalSeries};
use crate::survey::location::{display_ssid, Location, ScanReading};
use crate::telemetry::LogManager;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    Inserted,
    Replaced,
}

/// Row of the location comparison table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub name: String,
    pub average_dbm: i32,
    pub access_point_count: usize,
    pub display: Vec<f32>,
}

/// Saved locations in insertion order, unique by name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct LocationBook {
    locations: Vec<Location>,
    selected: Option<String>,
}

impl LocationBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book pre-filled with three sample rooms.
    pub fn with_demo_locations() -> Self {
        let sample = |name: &str, base: i32, period: i32, aps: &[&str]| {
            Location::new(
                name,
                SignalSeries::from_fn(|i| base - i as i32 % period),
                aps.iter().map(|ap| ap.to_string()).collect(),
            )
        };
        Self {
            locations: vec![
                sample("Living Room", -30, 20, &["Home_WiFi", "Neighbor1", "Neighbor2"]),
                sample("Bedroom", -40, 15, &["Home_WiFi", "Neighbor3"]),
                sample("Kitchen", -50, 10, &["Home_WiFi", "GuestNetwork"]),
            ],
            selected: None,
        }
    }

    pub fn locations(&self) -> &[Location] {
        &self.locations
    }

    pub fn get(&self, name: &str) -> Option<&Location> {
        self.locations.iter().find(|location| location.name == name)
    }

    /// Stores `location`, replacing an existing entry with the same name in place.
    pub fn save(&mut self, location: Location) -> SaveOutcome {
        match self
            .locations
            .iter_mut()
            .find(|existing| existing.name == location.name)
        {
            Some(existing) => {
                *existing = location;
                SaveOutcome::Replaced
            }
            None => {
                self.locations.push(location);
                SaveOutcome::Inserted
            }
        }
    }

    /// Marks a location as selected; `None` or an unknown name clears the selection.
    pub fn select(&mut self, name: Option<&str>) -> Option<&Location> {
        self.selected = name
            .filter(|name| self.get(name).is_some())
            .map(str::to_string);
        self.selected()
    }

    pub fn selected(&self) -> Option<&Location> {
        self.selected.as_deref().and_then(|name| self.get(name))
    }

    pub fn comparison(&self) -> Vec<ComparisonRow> {
        self.locations
            .iter()
            .map(|location| ComparisonRow {
                name: location.name.clone(),
                average_dbm: location.stats().average_dbm,
                access_point_count: location.access_points.len(),
                display: to_display_range(&location.signals),
            })
            .collect()
    }
}

/// Latest scan plus the saved locations.
#[derive(Debug, Clone, Serialize)]
pub struct SurveyState {
    current: Option<CurrentScan>,
    book: LocationBook,
    #[serde(skip)]
    logger: LogManager,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentScan {
    pub signals: SignalSeries,
    pub access_points: Vec<String>,
}

impl SurveyState {
    pub fn new(book: LocationBook) -> Self {
        Self {
            current: None,
            book,
            logger: LogManager::new("survey"),
        }
    }

    pub fn book(&self) -> &LocationBook {
        &self.book
    }

    pub fn book_mut(&mut self) -> &mut LocationBook {
        &mut self.book
    }

    pub fn current(&self) -> Option<&CurrentScan> {
        self.current.as_ref()
    }

    /// Replaces the current scan with the normalized levels of `readings`.
    pub fn record_scan(&mut self, readings: &[ScanReading]) -> &CurrentScan {
        let levels: Vec<i32> = readings.iter().map(|reading| reading.level).collect();
        let access_points = readings.iter().map(|reading| display_ssid(&reading.ssid)).collect();
        self.logger.record(&format!("scan with {} access points", readings.len()));
        self.current.insert(CurrentScan {
            signals: SignalSeries::normalize(&levels),
            access_points,
        })
    }

    /// Saves the current scan under `name`; `None` when nothing was scanned yet.
    pub fn save_current(&mut self, name: &str) -> Option<SaveOutcome> {
        let current = self.current.as_ref()?;
        let outcome = self.book.save(Location::new(
            name,
            current.signals.clone(),
            current.access_points.clone(),
        ));
        self.logger.record(&format!("saved location {:?} ({:?})", name, outcome));
        Some(outcome)
    }
}

impl Default for SurveyState {
    fn default() -> Self {
        Self::new(LocationBook::with_demo_locations())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reading(ssid: &str, level: i32) -> ScanReading {
        ScanReading {
            ssid: ssid.into(),
            bssid: "00:11:22:33:44:55".into(),
            level,
        }
    }

    #[test]
    fn demo_locations_have_expected_averages() {
        let book = LocationBook::with_demo_locations();
        let rows = book.comparison();
        let summary: Vec<(&str, i32, usize)> = rows
            .iter()
            .map(|row| (row.name.as_str(), row.average_dbm, row.access_point_count))
            .collect();
        assert_eq!(
            summary,
            vec![("Living Room", -39, 3), ("Bedroom", -46, 2), ("Kitchen", -54, 2)]
        );
        assert!(rows.iter().all(|row| row.display.len() == 100));
    }

    #[test]
    fn save_without_scan_is_ignored() {
        let mut state = SurveyState::new(LocationBook::new());
        assert_eq!(state.save_current("Hall"), None);
        assert!(state.book().locations().is_empty());
    }

    #[test]
    fn saving_same_name_replaces_in_place() {
        let mut state = SurveyState::default();
        state.record_scan(&[reading("Home_WiFi", -45), reading("Cafe", -70)]);
        assert_eq!(state.save_current("Bedroom"), Some(SaveOutcome::Replaced));
        assert_eq!(state.save_current("Garage"), Some(SaveOutcome::Inserted));

        let names: Vec<&str> = state
            .book()
            .locations()
            .iter()
            .map(|location| location.name.as_str())
            .collect();
        assert_eq!(names, vec!["Living Room", "Bedroom", "Kitchen", "Garage"]);

        let bedroom = state.book().get("Bedroom").unwrap();
        assert_eq!(&bedroom.signals[..3], &[-45, -70, -100]);
        assert_eq!(bedroom.access_points, vec!["Home_WiFi", "Cafe"]);
    }

    #[test]
    fn recorded_scan_uses_display_names() {
        let mut state = SurveyState::new(LocationBook::new());
        let current = state.record_scan(&[reading("\"Home_WiFi\"", -45), reading("", -80)]);
        assert_eq!(current.access_points, vec!["Home_WiFi", "Unknown AP"]);
    }

    #[test]
    fn selection_requires_known_name() {
        let mut book = LocationBook::with_demo_locations();
        assert_eq!(book.select(Some("Kitchen")).map(|l| l.name.as_str()), Some("Kitchen"));
        assert!(book.select(Some("Attic")).is_none());
        assert!(book.selected().is_none());
    }
}
