use std::path::PathBuf;

use crate::charts::{ChartSet, recompute};
use crate::data::filter::FilterSelection;
use crate::data::model::SurveyDataset;

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Loaded dataset, replaced wholesale when another file is opened.
    pub dataset: SurveyDataset,

    /// Where `dataset` was read from.
    pub source: PathBuf,

    /// Current control values.
    pub selection: FilterSelection,

    /// Charts and matching record indices for `selection` (cached until
    /// the next change).
    pub charts: ChartSet,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl AppState {
    /// Start a session on a freshly loaded dataset with default controls.
    pub fn new(dataset: SurveyDataset, source: PathBuf) -> Self {
        let selection = FilterSelection::initial(&dataset);
        let charts = recompute(&dataset, &selection);
        Self {
            dataset,
            source,
            selection,
            charts,
            status_message: None,
        }
    }

    /// Ingest a newly loaded dataset and reset the controls.
    pub fn set_dataset(&mut self, dataset: SurveyDataset, source: PathBuf) {
        *self = Self::new(dataset, source);
    }

    /// Rebuild the charts after any control change.
    pub fn refresh(&mut self) {
        if !self.selection.in_domain(&self.dataset) {
            log::warn!(
                "Selection {:?} is outside the dataset domains; charts will be empty",
                self.selection
            );
        }
        self.charts = recompute(&self.dataset, &self.selection);
        log::debug!(
            "Recomputed charts for {:?}: {} matching records",
            self.selection,
            self.charts.matched()
        );
    }

    /// Apply a new control state, recomputing only when something changed.
    pub fn apply(&mut self, selection: FilterSelection) {
        if selection != self.selection {
            self.selection = selection;
            self.refresh();
        }
    }

    pub fn set_career(&mut self, career: &str) {
        let mut next = self.selection.clone();
        next.career = career.to_string();
        self.apply(next);
    }

    pub fn set_sector(&mut self, sector: &str) {
        let mut next = self.selection.clone();
        next.sector = sector.to_string();
        self.apply(next);
    }

    pub fn set_age_range(&mut self, age_min: i64, age_max: i64) {
        let mut next = self.selection.clone();
        next.age_min = age_min;
        next.age_max = age_max;
        self.apply(next);
    }

    /// Restore the default control state.
    pub fn reset_filters(&mut self) {
        self.apply(FilterSelection::initial(&self.dataset));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::record;

    fn state() -> AppState {
        let ds = SurveyDataset::from_records(vec![
            record("CS", "Tech", 20),
            record("CS", "Tech", 25),
            record("Math", "Tech", 22),
            record("Math", "Health", 30),
        ]);
        AppState::new(ds, PathBuf::from("data/pollreport.csv"))
    }

    #[test]
    fn test_new_state_uses_defaults() {
        let st = state();
        assert_eq!(st.selection.career, "CS");
        assert_eq!(st.selection.sector, "Tech");
        assert_eq!((st.selection.age_min, st.selection.age_max), (20, 30));
        assert_eq!(st.charts.matched(), 2);
        assert_eq!(st.charts.indices, vec![0, 1]);
    }

    #[test]
    fn test_each_control_recomputes() {
        let mut st = state();

        st.set_career("Math");
        assert_eq!(st.charts.indices, vec![2]);

        st.set_sector("Health");
        assert_eq!(st.charts.indices, vec![3]);

        st.set_age_range(20, 29);
        assert!(st.charts.indices.is_empty());
        assert!(st.charts.iter().all(|c| c.is_empty()));

        st.reset_filters();
        assert_eq!(st.charts.indices, vec![0, 1]);
    }

    #[test]
    fn test_unknown_value_degrades_to_empty() {
        let mut st = state();
        st.set_career("Biology");
        assert_eq!(st.charts.matched(), 0);
        assert!(st.charts.indices.is_empty());
    }

    #[test]
    fn test_set_dataset_resets_controls() {
        let mut st = state();
        st.set_career("Math");
        st.status_message = Some("Error: previous load failed".to_string());

        let ds = SurveyDataset::from_records(vec![record("Law", "Legal", 40)]);
        st.set_dataset(ds, PathBuf::from("other.csv"));

        assert_eq!(st.selection.career, "Law");
        assert_eq!(st.charts.matched(), 1);
        assert_eq!(st.status_message, None);
        assert_eq!(st.source, PathBuf::from("other.csv"));
    }
}
