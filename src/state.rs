use std::path::PathBuf;
use std::sync::Arc;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};

use crate::data::cache::PlotCache;
use crate::data::loader::{self, Dataset};
use crate::data::model::Table;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering. All derived tables live in
/// the cache; the state itself only holds the user's current selections.
pub struct AppState {
    /// Which station dataset is selected.
    pub dataset: Dataset,

    /// Start of the selected date range (inclusive).
    pub start_date: NaiveDate,

    /// End of the selected date range (inclusive, whole day).
    pub end_date: NaiveDate,

    /// When set, the range follows the dataset's full coverage.
    pub all_time: bool,

    /// Memoized load → filter → sample pipeline.
    pub cache: PlotCache,

    /// Date coverage of the currently loaded dataset.
    pub date_bounds: Option<(NaiveDate, NaiveDate)>,

    /// Status / error message shown in the top bar.
    pub status_message: Option<String>,

    /// Dataset whose bounds initialised the date pickers.
    loaded: Option<Dataset>,
}

impl AppState {
    pub fn new() -> Self {
        Self::with_data_dir(loader::default_data_dir())
    }

    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        let placeholder = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap_or_default();
        AppState {
            dataset: Dataset::BeninMalanville,
            start_date: placeholder,
            end_date: placeholder,
            all_time: true,
            cache: PlotCache::new(data_dir),
            date_bounds: None,
            status_message: None,
            loaded: None,
        }
    }

    /// Load the selected dataset through the cache.
    ///
    /// The first time a dataset is seen its coverage initialises the date
    /// pickers. A load failure clears the dashboard for this cycle and leaves
    /// the error in `status_message`.
    pub fn load_selected(&mut self) -> Option<Arc<Table>> {
        match self.cache.table(self.dataset) {
            Ok(table) => {
                if self.loaded != Some(self.dataset) {
                    self.loaded = Some(self.dataset);
                    self.date_bounds = table
                        .time_bounds()
                        .map(|(min, max)| (min.date(), max.date()));
                    if let Some((min, max)) = self.date_bounds {
                        self.start_date = min;
                        self.end_date = max;
                    }
                }
                self.status_message = None;
                Some(table)
            }
            Err(e) => {
                log::error!("Failed to load {}: {e:#}", self.dataset.file_name());
                self.status_message = Some(format!("Error: {e:#}"));
                self.date_bounds = None;
                self.loaded = None;
                None
            }
        }
    }

    /// The selected range as timestamps: start of the first day through the
    /// end of the last, so a range ending on a day includes that whole day.
    pub fn effective_range(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        let (min, max) = self.date_bounds?;
        let (start, end) = if self.all_time {
            (min, max)
        } else {
            (self.start_date, self.end_date)
        };
        let start = start.and_time(NaiveTime::MIN);
        let end = end.and_time(NaiveTime::MIN) + Duration::seconds(86_399);
        Some((start, end))
    }

    /// Keep picker values inside the loaded dataset's coverage.
    pub fn clamp_dates(&mut self) {
        if let Some((min, max)) = self.date_bounds {
            self.start_date = self.start_date.clamp(min, max);
            self.end_date = self.end_date.clamp(min, max);
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Timestamp,GHI,DNI,DHI,Tamb,TModA,TModB,WS,WSgust,WD,RH";

    fn temp_data_dir(tag: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "solar-dash-state-{tag}-{}",
            std::process::id()
        ));
        std::fs::create_dir_all(&dir).unwrap();
        let csv = format!(
            "{HEADER}\n\
             2021-08-01 06:00,50.0,30.0,20.0,24.0,26.0,26.5,1.0,1.5,170.0,80.0\n\
             2021-08-02 12:00,650.0,500.0,150.0,31.0,44.0,45.0,2.5,4.0,190.0,55.0\n\
             2021-08-03 18:00,20.0,5.0,15.0,27.0,28.0,28.2,1.8,2.6,200.0,70.0\n"
        );
        std::fs::write(dir.join(Dataset::BeninMalanville.file_name()), csv).unwrap();
        dir
    }

    #[test]
    fn first_load_initialises_the_date_range() {
        let mut state = AppState::with_data_dir(temp_data_dir("init"));
        assert!(state.load_selected().is_some());
        assert_eq!(state.start_date, NaiveDate::from_ymd_opt(2021, 8, 1).unwrap());
        assert_eq!(state.end_date, NaiveDate::from_ymd_opt(2021, 8, 3).unwrap());
        assert!(state.status_message.is_none());
    }

    #[test]
    fn full_range_covers_every_row() {
        let mut state = AppState::with_data_dir(temp_data_dir("full"));
        let table = state.load_selected().unwrap();
        let (start, end) = state.effective_range().unwrap();
        let filtered = state.cache.filtered(state.dataset, start, end).unwrap();
        assert_eq!(filtered.len(), table.len());
    }

    #[test]
    fn one_day_window_with_no_rows_is_the_no_data_path() {
        let mut state = AppState::with_data_dir(temp_data_dir("empty"));
        state.load_selected().unwrap();
        state.all_time = false;
        state.start_date = NaiveDate::from_ymd_opt(2021, 8, 2).unwrap();
        state.end_date = NaiveDate::from_ymd_opt(2021, 8, 2).unwrap();
        let (start, end) = state.effective_range().unwrap();
        let filtered = state.cache.filtered(state.dataset, start, end).unwrap();
        // the 2021-08-02 12:00 row lies inside the whole-day window
        assert_eq!(filtered.len(), 1);

        // an inverted range matches nothing and is not an error
        state.start_date = NaiveDate::from_ymd_opt(2021, 8, 3).unwrap();
        state.end_date = NaiveDate::from_ymd_opt(2021, 8, 1).unwrap();
        let (start, end) = state.effective_range().unwrap();
        let filtered = state.cache.filtered(state.dataset, start, end).unwrap();
        assert!(filtered.is_empty());
    }

    #[test]
    fn load_failure_sets_the_status_message() {
        let mut state =
            AppState::with_data_dir(std::env::temp_dir().join("solar-dash-state-missing"));
        assert!(state.load_selected().is_none());
        let msg = state.status_message.as_deref().unwrap();
        assert!(msg.contains("Error"));
        assert!(state.effective_range().is_none());
    }

    #[test]
    fn clamp_keeps_pickers_inside_coverage() {
        let mut state = AppState::with_data_dir(temp_data_dir("clamp"));
        state.load_selected().unwrap();
        state.start_date = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        state.end_date = NaiveDate::from_ymd_opt(2030, 1, 1).unwrap();
        state.clamp_dates();
        assert_eq!(state.start_date, NaiveDate::from_ymd_opt(2021, 8, 1).unwrap());
        assert_eq!(state.end_date, NaiveDate::from_ymd_opt(2021, 8, 3).unwrap());
    }
}
