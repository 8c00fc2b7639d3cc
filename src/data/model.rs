use serde::Deserialize;

/// Placeholder stored in place of a missing work sector.
pub const UNSPECIFIED_SECTOR: &str = "No especificado";

/// Cell texts a survey export uses for "no value" (the pandas defaults).
/// Matched exactly: no trimming, no case folding.
pub const NA_TOKENS: [&str; 19] = [
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND",
    "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

/// Whether a text cell stands for a missing value.
pub fn is_na_token(cell: &str) -> bool {
    NA_TOKENS.contains(&cell)
}

// ---------------------------------------------------------------------------
// RawRecord – one row exactly as it appears in the input file
// ---------------------------------------------------------------------------

/// Column layout of the survey export.  Only the sector may be missing.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    #[serde(rename = "carrera")]
    pub career: String,
    #[serde(rename = "ambito_trabajo", default)]
    pub sector: Option<String>,
    #[serde(rename = "Edad")]
    pub age: i64,
    #[serde(rename = "cursos_aprobados")]
    pub courses_passed: i64,
    #[serde(rename = "promedio_ponderado")]
    pub weighted_average: f64,
    #[serde(rename = "ingresos_despues_graduacion")]
    pub income_after_graduation: f64,
    #[serde(rename = "herramienta_ia_preferida")]
    pub preferred_ai_tool: String,
    #[serde(rename = "modo_transporte")]
    pub transport_mode: String,
}

/// Column names every input file must provide, in export order.
pub const REQUIRED_COLUMNS: [&str; 8] = [
    "carrera",
    "ambito_trabajo",
    "Edad",
    "cursos_aprobados",
    "promedio_ponderado",
    "ingresos_despues_graduacion",
    "herramienta_ia_preferida",
    "modo_transporte",
];

// ---------------------------------------------------------------------------
// Record – one normalized survey response
// ---------------------------------------------------------------------------

/// A single survey response after load-time normalization.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub career: String,
    /// Never empty: missing values hold [`UNSPECIFIED_SECTOR`].
    pub sector: String,
    pub age: i64,
    pub courses_passed: i64,
    pub weighted_average: f64,
    pub income_after_graduation: f64,
    pub preferred_ai_tool: String,
    pub transport_mode: String,
}

impl From<RawRecord> for Record {
    fn from(raw: RawRecord) -> Self {
        let sector = match raw.sector {
            Some(s) if !s.is_empty() => s,
            _ => UNSPECIFIED_SECTOR.to_string(),
        };
        Record {
            career: raw.career,
            sector,
            age: raw.age,
            courses_passed: raw.courses_passed,
            weighted_average: raw.weighted_average,
            income_after_graduation: raw.income_after_graduation,
            preferred_ai_tool: raw.preferred_ai_tool,
            transport_mode: raw.transport_mode,
        }
    }
}

// ---------------------------------------------------------------------------
// SurveyDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The loaded dataset together with the domains the filter controls offer.
#[derive(Debug, Clone, Default)]
pub struct SurveyDataset {
    /// All responses, in file order.
    pub records: Vec<Record>,
    /// Unique careers in first-observed order.
    pub careers: Vec<String>,
    /// Unique sectors (after normalization) in first-observed order.
    pub sectors: Vec<String>,
    /// Smallest and largest observed age, `None` when there are no records.
    pub age_bounds: Option<(i64, i64)>,
}

impl SurveyDataset {
    /// Build the control domains from normalized records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut careers: Vec<String> = Vec::new();
        let mut sectors: Vec<String> = Vec::new();
        let mut age_bounds: Option<(i64, i64)> = None;

        for rec in &records {
            if !careers.contains(&rec.career) {
                careers.push(rec.career.clone());
            }
            if !sectors.contains(&rec.sector) {
                sectors.push(rec.sector.clone());
            }
            age_bounds = Some(match age_bounds {
                Some((lo, hi)) => (lo.min(rec.age), hi.max(rec.age)),
                None => (rec.age, rec.age),
            });
        }

        SurveyDataset {
            records,
            careers,
            sectors,
            age_bounds,
        }
    }

    /// Normalize raw rows and build the dataset.
    pub fn from_raw(raw: Vec<RawRecord>) -> Self {
        Self::from_records(raw.into_iter().map(Record::from).collect())
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn record(career: &str, sector: &str, age: i64) -> Record {
        Record {
            career: career.to_string(),
            sector: sector.to_string(),
            age,
            courses_passed: 10,
            weighted_average: 14.0,
            income_after_graduation: 2500.0,
            preferred_ai_tool: "ChatGPT".to_string(),
            transport_mode: "Bus".to_string(),
        }
    }

    fn raw(sector: Option<&str>) -> RawRecord {
        RawRecord {
            career: "CS".to_string(),
            sector: sector.map(str::to_string),
            age: 21,
            courses_passed: 12,
            weighted_average: 15.5,
            income_after_graduation: 3200.0,
            preferred_ai_tool: "Copilot".to_string(),
            transport_mode: "Metro".to_string(),
        }
    }

    #[test]
    fn test_missing_sector_becomes_sentinel() {
        assert_eq!(Record::from(raw(None)).sector, UNSPECIFIED_SECTOR);
        assert_eq!(Record::from(raw(Some(""))).sector, UNSPECIFIED_SECTOR);
        assert_eq!(Record::from(raw(Some("Tech"))).sector, "Tech");
    }

    #[test]
    fn test_whitespace_sector_is_kept() {
        assert_eq!(Record::from(raw(Some("   "))).sector, "   ");
    }

    #[test]
    fn test_na_tokens() {
        for token in ["", "NA", "N/A", "null", "NULL", "NaN", "nan", "None", "#N/A", "n/a"] {
            assert!(is_na_token(token), "{token:?} should count as missing");
        }
        for cell in ["   ", "na", "Nada", "Tecnología", " NA"] {
            assert!(!is_na_token(cell), "{cell:?} is a real value");
        }
    }

    #[test]
    fn test_normalization_leaves_other_fields_alone() {
        let rec = Record::from(raw(None));
        assert_eq!(rec.career, "CS");
        assert_eq!(rec.age, 21);
        assert_eq!(rec.courses_passed, 12);
        assert_eq!(rec.weighted_average, 15.5);
        assert_eq!(rec.income_after_graduation, 3200.0);
        assert_eq!(rec.preferred_ai_tool, "Copilot");
        assert_eq!(rec.transport_mode, "Metro");
    }

    #[test]
    fn test_domains_keep_first_observed_order() {
        let ds = SurveyDataset::from_records(vec![
            record("Math", "Tech", 30),
            record("CS", "Health", 19),
            record("Math", "Tech", 24),
            record("Law", "Health", 22),
        ]);
        assert_eq!(ds.careers, vec!["Math", "CS", "Law"]);
        assert_eq!(ds.sectors, vec!["Tech", "Health"]);
        assert_eq!(ds.age_bounds, Some((19, 30)));
        assert_eq!(ds.len(), 4);
    }

    #[test]
    fn test_empty_dataset_has_no_age_bounds() {
        let ds = SurveyDataset::from_records(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.careers.is_empty());
        assert_eq!(ds.age_bounds, None);
    }
}
