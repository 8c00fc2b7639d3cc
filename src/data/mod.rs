/// Data layer: survey records, loading, and filtering.
///
/// Architecture:
/// ```text
///  .csv / .json / .parquet
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file, fill missing sectors → SurveyDataset
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ SurveyDataset  │  Vec<Record>, career/sector domains, age bounds
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  filter   │  career ∧ sector ∧ age range → matching records
///   └──────────┘
/// ```

pub mod loader;
pub mod model;
pub mod filter;
