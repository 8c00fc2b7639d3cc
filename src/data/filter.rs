use super::model::{Record, SurveyDataset};

// ---------------------------------------------------------------------------
// Filter selection: career, sector and an inclusive age range
// ---------------------------------------------------------------------------

/// Current value of the three dashboard controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSelection {
    pub career: String,
    pub sector: String,
    pub age_min: i64,
    pub age_max: i64,
}

impl FilterSelection {
    /// Default control state: first career, first sector, full age range.
    pub fn initial(dataset: &SurveyDataset) -> Self {
        let (age_min, age_max) = dataset.age_bounds.unwrap_or((0, 0));
        FilterSelection {
            career: dataset.careers.first().cloned().unwrap_or_default(),
            sector: dataset.sectors.first().cloned().unwrap_or_default(),
            age_min,
            age_max,
        }
    }

    /// Conjunctive predicate with inclusive age bounds.
    ///
    /// An inverted range (`age_min > age_max`) matches nothing.
    pub fn matches(&self, record: &Record) -> bool {
        record.career == self.career
            && record.sector == self.sector
            && self.age_min <= record.age
            && record.age <= self.age_max
    }

    /// Whether the selected career and sector exist in the dataset.
    pub fn in_domain(&self, dataset: &SurveyDataset) -> bool {
        dataset.careers.contains(&self.career) && dataset.sectors.contains(&self.sector)
    }
}

/// Return indices of records passing the selection, in dataset order.
pub fn filtered_indices(dataset: &SurveyDataset, selection: &FilterSelection) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}
