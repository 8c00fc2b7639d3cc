use crate::data::filter::{FilterSelection, filtered_indices};
use crate::data::model::{Record, SurveyDataset};

/// Inner radius of the AI tool donut, as a fraction of the outer radius.
pub const DONUT_HOLE: f64 = 0.4;

// ---------------------------------------------------------------------------
// Chart specifications
// ---------------------------------------------------------------------------

/// Which kind of chart to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ChartKind {
    Bar,
    Scatter,
    Pie { hole: f64 },
}

/// Number of records sharing one category value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub label: String,
    pub count: usize,
}

/// The values a chart plots.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Counts(Vec<CategoryCount>),
    Points(Vec<[f64; 2]>),
}

impl ChartData {
    pub fn is_empty(&self) -> bool {
        match self {
            ChartData::Counts(c) => c.is_empty(),
            ChartData::Points(p) => p.is_empty(),
        }
    }
}

/// Declarative description of one chart, rebuilt on every filter change.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub title: &'static str,
    pub kind: ChartKind,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub data: ChartData,
}

impl ChartSpec {
    /// An empty spec renders as a "no data" placeholder.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// The four dashboard charts for one filter selection.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSet {
    pub courses: ChartSpec,
    pub performance: ChartSpec,
    pub ai_tools: ChartSpec,
    pub transport: ChartSpec,
    /// Dataset indices of the records behind the charts.
    pub indices: Vec<usize>,
}

impl ChartSet {
    /// Number of records that passed the filter.
    pub fn matched(&self) -> usize {
        self.indices.len()
    }

    /// Charts in grid order (left to right, top to bottom).
    pub fn iter(&self) -> impl Iterator<Item = &ChartSpec> {
        [&self.courses, &self.performance, &self.ai_tools, &self.transport].into_iter()
    }
}

// ---------------------------------------------------------------------------
// Recompute
// ---------------------------------------------------------------------------

/// Build all four charts from the records matching `selection`.
///
/// Pure: the same dataset and selection always give the same charts. An
/// empty match yields four empty specs rather than an error.
pub fn recompute(dataset: &SurveyDataset, selection: &FilterSelection) -> ChartSet {
    let indices = filtered_indices(dataset, selection);
    let rows: Vec<&Record> = indices.iter().map(|&i| &dataset.records[i]).collect();

    ChartSet {
        courses: courses_chart(&rows),
        performance: performance_chart(&rows),
        ai_tools: ai_tools_chart(&rows),
        transport: transport_chart(&rows),
        indices,
    }
}

/// Distribution of passed-course counts, one bar per value in ascending order.
fn courses_chart(rows: &[&Record]) -> ChartSpec {
    let mut values: Vec<i64> = rows.iter().map(|r| r.courses_passed).collect();
    values.sort_unstable();

    let mut counts: Vec<CategoryCount> = Vec::new();
    for v in values {
        let label = v.to_string();
        match counts.last_mut() {
            Some(last) if last.label == label => last.count += 1,
            _ => counts.push(CategoryCount { label, count: 1 }),
        }
    }

    ChartSpec {
        title: "Courses Passed Distribution",
        kind: ChartKind::Bar,
        x_label: "Courses Passed",
        y_label: "Students",
        data: ChartData::Counts(counts),
    }
}

/// Weighted average against income after graduation, in dataset order.
fn performance_chart(rows: &[&Record]) -> ChartSpec {
    ChartSpec {
        title: "Weighted Average vs Income",
        kind: ChartKind::Scatter,
        x_label: "Weighted Average",
        y_label: "Income",
        data: ChartData::Points(
            rows.iter()
                .map(|r| [r.weighted_average, r.income_after_graduation])
                .collect(),
        ),
    }
}

/// Share of each preferred AI tool, largest slice first.
fn ai_tools_chart(rows: &[&Record]) -> ChartSpec {
    let mut counts = count_by(rows, |r| &r.preferred_ai_tool);
    // Stable sort keeps first-seen order among equal counts.
    counts.sort_by(|a, b| b.count.cmp(&a.count));

    ChartSpec {
        title: "Preferred AI Tools",
        kind: ChartKind::Pie { hole: DONUT_HOLE },
        x_label: "AI Tool",
        y_label: "Students",
        data: ChartData::Counts(counts),
    }
}

/// Preferred transport mode counts in first-seen order.
fn transport_chart(rows: &[&Record]) -> ChartSpec {
    ChartSpec {
        title: "Preferred Transport Mode",
        kind: ChartKind::Bar,
        x_label: "Transport Mode",
        y_label: "Students",
        data: ChartData::Counts(count_by(rows, |r| &r.transport_mode)),
    }
}

/// Count records per category, categories in order of first appearance.
fn count_by<F>(rows: &[&Record], key: F) -> Vec<CategoryCount>
where
    F: Fn(&Record) -> &String,
{
    let mut counts: Vec<CategoryCount> = Vec::new();
    for &rec in rows {
        let label = key(rec);
        match counts.iter_mut().find(|c| &c.label == label) {
            Some(c) => c.count += 1,
            None => counts.push(CategoryCount {
                label: label.clone(),
                count: 1,
            }),
        }
    }
    counts
}
