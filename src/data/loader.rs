use std::fs::File;
use std::path::{Path, PathBuf};

use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array,
};
use arrow::datatypes::DataType;
use arrow::error::ArrowError;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use parquet::errors::ParquetError;
use thiserror::Error;

use super::model::{RawRecord, SurveyDataset, REQUIRED_COLUMNS, is_na_token};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Everything that can go wrong while loading a survey file.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot open {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("unsupported file extension: .{0}")]
    UnsupportedExtension(String),
    #[error("missing required column '{0}'")]
    MissingColumn(&'static str),
    #[error("row {row}, column '{column}': {reason}")]
    InvalidCell {
        row: usize,
        column: &'static str,
        reason: String,
    },
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed parquet: {0}")]
    Parquet(#[from] ParquetError),
    #[error("reading parquet batch: {0}")]
    Arrow(#[from] ArrowError),
}

fn open(path: &Path) -> Result<File, LoadError> {
    File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a survey dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row with the survey column names (primary format)
/// * `.json`    – `[{ "carrera": "...", "Edad": 21, ... }, ...]`
/// * `.parquet` – flat columns with the same names
///
/// Missing work sectors are replaced by [`super::model::UNSPECIFIED_SECTOR`];
/// nothing else is validated or rewritten.
pub fn load_file(path: &Path) -> Result<SurveyDataset, LoadError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let raw = match ext.as_str() {
        "csv" => read_csv(path)?,
        "json" => read_json(path)?,
        "parquet" | "pq" => read_parquet(path)?,
        other => return Err(LoadError::UnsupportedExtension(other.to_string())),
    };

    Ok(SurveyDataset::from_raw(raw))
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn read_csv(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let mut reader = csv::Reader::from_reader(open(path)?);

    let headers = reader.headers()?.clone();
    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            return Err(LoadError::MissingColumn(column));
        }
    }

    let mut rows = Vec::new();
    for result in reader.deserialize() {
        let mut row: RawRecord = result?;
        // Text markers such as `NA` or `null` stand for an empty sector.
        row.sector = row.sector.filter(|s| !is_na_token(s));
        rows.push(row);
    }
    Ok(rows)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`.
fn read_json(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let reader = std::io::BufReader::new(open(path)?);
    Ok(serde_json::from_reader(reader)?)
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Flat parquet file as written by Pandas (`df.to_parquet()`) or Polars.
fn read_parquet(path: &Path) -> Result<Vec<RawRecord>, LoadError> {
    let builder = ParquetRecordBatchReaderBuilder::try_new(open(path)?)?;
    let reader = builder.build()?;

    let mut rows = Vec::new();
    let mut offset = 0usize;

    for batch_result in reader {
        let batch = batch_result?;
        let schema = batch.schema();

        let column = |name: &'static str| -> Result<ArrayRef, LoadError> {
            let idx = schema
                .index_of(name)
                .map_err(|_| LoadError::MissingColumn(name))?;
            Ok(batch.column(idx).clone())
        };
        let career = column("carrera")?;
        let sector = column("ambito_trabajo")?;
        let age = column("Edad")?;
        let courses = column("cursos_aprobados")?;
        let average = column("promedio_ponderado")?;
        let income = column("ingresos_despues_graduacion")?;
        let tool = column("herramienta_ia_preferida")?;
        let transport = column("modo_transporte")?;

        for row in 0..batch.num_rows() {
            let at = offset + row;
            rows.push(RawRecord {
                career: required(string_cell(&career, row), at, "carrera")?,
                sector: string_cell(&sector, row).map_err(|reason| LoadError::InvalidCell {
                    row: at,
                    column: "ambito_trabajo",
                    reason,
                })?,
                age: required(int_cell(&age, row), at, "Edad")?,
                courses_passed: required(int_cell(&courses, row), at, "cursos_aprobados")?,
                weighted_average: required(float_cell(&average, row), at, "promedio_ponderado")?,
                income_after_graduation: required(
                    float_cell(&income, row),
                    at,
                    "ingresos_despues_graduacion",
                )?,
                preferred_ai_tool: required(
                    string_cell(&tool, row),
                    at,
                    "herramienta_ia_preferida",
                )?,
                transport_mode: required(string_cell(&transport, row), at, "modo_transporte")?,
            });
        }
        offset += batch.num_rows();
    }

    Ok(rows)
}

// -- Parquet / Arrow helpers --

/// Turn a cell lookup into a value, rejecting nulls.
fn required<T>(
    cell: Result<Option<T>, String>,
    row: usize,
    column: &'static str,
) -> Result<T, LoadError> {
    match cell {
        Ok(Some(v)) => Ok(v),
        Ok(None) => Err(LoadError::InvalidCell {
            row,
            column,
            reason: "null value".to_string(),
        }),
        Err(reason) => Err(LoadError::InvalidCell {
            row,
            column,
            reason,
        }),
    }
}

fn string_cell(col: &ArrayRef, row: usize) -> Result<Option<String>, String> {
    if col.is_null(row) {
        return Ok(None);
    }
    match col.data_type() {
        DataType::Utf8 => Ok(Some(col.as_string::<i32>().value(row).to_string())),
        DataType::LargeUtf8 => Ok(Some(col.as_string::<i64>().value(row).to_string())),
        other => Err(format!("expected a string column, got {other:?}")),
    }
}

fn int_cell(col: &ArrayRef, row: usize) -> Result<Option<i64>, String> {
    if col.is_null(row) {
        return Ok(None);
    }
    if let Some(arr) = col.as_any().downcast_ref::<Int64Array>() {
        Ok(Some(arr.value(row)))
    } else if let Some(arr) = col.as_any().downcast_ref::<Int32Array>() {
        Ok(Some(arr.value(row) as i64))
    } else {
        Err(format!("expected an integer column, got {:?}", col.data_type()))
    }
}

fn float_cell(col: &ArrayRef, row: usize) -> Result<Option<f64>, String> {
    if col.is_null(row) {
        return Ok(None);
    }
    if let Some(arr) = col.as_any().downcast_ref::<Float64Array>() {
        Ok(Some(arr.value(row)))
    } else if let Some(arr) = col.as_any().downcast_ref::<Float32Array>() {
        Ok(Some(arr.value(row) as f64))
    } else {
        // Integer-typed numeric columns are accepted as well.
        int_cell(col, row).map(|v| v.map(|i| i as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::UNSPECIFIED_SECTOR;
    use std::io::Write;
    use std::sync::Arc;
    use tempfile::NamedTempFile;

    const HEADER: &str = "carrera,ambito_trabajo,Edad,cursos_aprobados,promedio_ponderado,\
                          ingresos_despues_graduacion,herramienta_ia_preferida,modo_transporte";

    fn temp_file(suffix: &str, contents: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(suffix)
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_csv_normalizes_missing_sector() {
        let csv = format!(
            "{HEADER}\n\
             Ingeniería,Tecnología,21,30,15.2,4200.5,ChatGPT,Bus\n\
             Derecho,,24,41,13.8,3100,Gemini,Metro\n"
        );
        let file = temp_file(".csv", &csv);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].sector, "Tecnología");
        assert_eq!(ds.records[1].sector, UNSPECIFIED_SECTOR);
        assert_eq!(ds.records[1].career, "Derecho");
        assert_eq!(ds.records[1].age, 24);
        assert_eq!(ds.records[1].courses_passed, 41);
        assert_eq!(ds.records[1].income_after_graduation, 3100.0);
        assert_eq!(ds.records[1].transport_mode, "Metro");
        assert_eq!(ds.sectors, vec!["Tecnología", UNSPECIFIED_SECTOR]);
        assert_eq!(ds.age_bounds, Some((21, 24)));
    }

    #[test]
    fn test_load_csv_na_tokens_become_sentinel() {
        let csv = format!(
            "{HEADER}\n\
             Derecho,NA,21,10,12.0,1500,ChatGPT,Bus\n\
             Derecho,null,22,11,12.5,1600,ChatGPT,Bus\n\
             Derecho,NaN,23,12,13.0,1700,ChatGPT,Bus\n\
             Derecho,N/A,24,13,13.5,1800,ChatGPT,Bus\n\
             Derecho,\"   \",25,14,14.0,1900,ChatGPT,Bus\n\
             Derecho,Legal,26,15,14.5,2000,ChatGPT,Bus\n"
        );
        let file = temp_file(".csv", &csv);

        let ds = load_file(file.path()).unwrap();
        let sectors: Vec<&str> = ds.records.iter().map(|r| r.sector.as_str()).collect();
        assert_eq!(
            sectors,
            vec![
                UNSPECIFIED_SECTOR,
                UNSPECIFIED_SECTOR,
                UNSPECIFIED_SECTOR,
                UNSPECIFIED_SECTOR,
                "   ",
                "Legal",
            ]
        );
        assert_eq!(ds.sectors, vec![UNSPECIFIED_SECTOR, "   ", "Legal"]);

        let sel = crate::data::filter::FilterSelection {
            career: "Derecho".to_string(),
            sector: UNSPECIFIED_SECTOR.to_string(),
            age_min: 21,
            age_max: 26,
        };
        assert_eq!(
            crate::data::filter::filtered_indices(&ds, &sel),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn test_load_csv_ignores_extra_columns() {
        let csv = format!(
            "id,{HEADER}\n\
             7,Medicina,Salud,22,18,16.0,5000,Claude,Bicicleta\n"
        );
        let file = temp_file(".csv", &csv);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.records[0].preferred_ai_tool, "Claude");
    }

    #[test]
    fn test_load_csv_missing_column() {
        let csv = "carrera,Edad\nDerecho,22\n";
        let file = temp_file(".csv", csv);

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::MissingColumn("ambito_trabajo")));
    }

    #[test]
    fn test_load_csv_malformed_number() {
        let csv = format!("{HEADER}\nDerecho,Legal,veinte,10,12.0,1000,ChatGPT,Bus\n");
        let file = temp_file(".csv", &csv);

        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Csv(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_file(Path::new("/nonexistent/pollreport.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Io { .. }));
    }

    #[test]
    fn test_load_unsupported_extension() {
        let file = temp_file(".xlsx", "");
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedExtension(ext) if ext == "xlsx"));
    }

    #[test]
    fn test_load_json_records() {
        let json = r#"[
            {"carrera": "Arquitectura", "ambito_trabajo": null, "Edad": 23,
             "cursos_aprobados": 35, "promedio_ponderado": 14.1,
             "ingresos_despues_graduacion": 2800.0,
             "herramienta_ia_preferida": "Copilot", "modo_transporte": "Auto"},
            {"carrera": "Arquitectura", "ambito_trabajo": "Construcción", "Edad": 27,
             "cursos_aprobados": 52, "promedio_ponderado": 15.9,
             "ingresos_despues_graduacion": 4100.0,
             "herramienta_ia_preferida": "ChatGPT", "modo_transporte": "Bus"}
        ]"#;
        let file = temp_file(".json", json);

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].sector, UNSPECIFIED_SECTOR);
        assert_eq!(ds.records[1].sector, "Construcción");
        assert_eq!(ds.careers, vec!["Arquitectura"]);
    }

    #[test]
    fn test_load_json_not_an_array() {
        let file = temp_file(".json", r#"{"carrera": "Derecho"}"#);
        let err = load_file(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Json(_)));
    }

    #[test]
    fn test_load_parquet_with_null_sector() {
        use arrow::array::StringArray;
        use arrow::datatypes::{Field, Schema};
        use arrow::record_batch::RecordBatch;
        use parquet::arrow::ArrowWriter;

        let schema = Arc::new(Schema::new(vec![
            Field::new("carrera", DataType::Utf8, false),
            Field::new("ambito_trabajo", DataType::Utf8, true),
            Field::new("Edad", DataType::Int64, false),
            Field::new("cursos_aprobados", DataType::Int32, false),
            Field::new("promedio_ponderado", DataType::Float64, false),
            Field::new("ingresos_despues_graduacion", DataType::Int64, false),
            Field::new("herramienta_ia_preferida", DataType::Utf8, false),
            Field::new("modo_transporte", DataType::Utf8, false),
        ]));
        let columns: Vec<ArrayRef> = vec![
            Arc::new(StringArray::from(vec!["Economía", "Economía"])),
            Arc::new(StringArray::from(vec![Some("Finanzas"), None])),
            Arc::new(Int64Array::from(vec![22, 26])),
            Arc::new(Int32Array::from(vec![28, 47])),
            Arc::new(Float64Array::from(vec![13.5, 16.25])),
            Arc::new(Int64Array::from(vec![3000, 5200])),
            Arc::new(StringArray::from(vec!["ChatGPT", "Perplexity"])),
            Arc::new(StringArray::from(vec!["Bus", "Caminando"])),
        ];
        let batch = RecordBatch::try_new(schema.clone(), columns).unwrap();

        let file = tempfile::Builder::new()
            .suffix(".parquet")
            .tempfile()
            .unwrap();
        let mut writer = ArrowWriter::try_new(file.reopen().unwrap(), schema, None).unwrap();
        writer.write(&batch).unwrap();
        writer.close().unwrap();

        let ds = load_file(file.path()).unwrap();
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.records[0].sector, "Finanzas");
        assert_eq!(ds.records[1].sector, UNSPECIFIED_SECTOR);
        assert_eq!(ds.records[1].courses_passed, 47);
        assert_eq!(ds.records[1].income_after_graduation, 5200.0);
        assert_eq!(ds.age_bounds, Some((22, 26)));
    }
}
