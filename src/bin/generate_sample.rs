use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use clap::Parser;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const CAREERS: [&str; 5] = [
    "Ingeniería de Software",
    "Medicina",
    "Derecho",
    "Administración",
    "Arquitectura",
];
const SECTORS: [&str; 4] = ["Tecnología", "Salud", "Finanzas", "Educación"];
const AI_TOOLS: [&str; 5] = ["ChatGPT", "Copilot", "Gemini", "Claude", "Perplexity"];
const TRANSPORT: [&str; 5] = ["Bus", "Metro", "Auto", "Bicicleta", "Caminando"];

/// Write a synthetic student survey for trying out the dashboard.
#[derive(Parser, Debug)]
#[command(about = "Generate a sample student survey file", long_about = None)]
struct Cli {
    /// Output path; the extension picks the format (.csv or .parquet)
    #[arg(long, default_value = "data/pollreport.csv")]
    out: PathBuf,

    /// Number of survey responses
    #[arg(long, default_value_t = 500)]
    rows: usize,

    /// Seed for reproducible output
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// One survey response, with the export's column names.
#[derive(Debug, Serialize)]
struct Row {
    carrera: &'static str,
    ambito_trabajo: Option<&'static str>,
    #[serde(rename = "Edad")]
    edad: i64,
    cursos_aprobados: i64,
    promedio_ponderado: f64,
    ingresos_despues_graduacion: f64,
    herramienta_ia_preferida: &'static str,
    modo_transporte: &'static str,
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }

    fn pick<T: Copy>(&mut self, items: &[T]) -> T {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<Row> {
    (0..rows)
        .map(|_| {
            let edad = 18 + (rng.next_u64() % 13) as i64;
            // Roughly ten courses per year of study, capped at a full degree.
            let cursos = ((edad - 17) * 10 + (rng.next_u64() % 8) as i64).min(60);
            let promedio = rng.gauss(14.0, 2.0).clamp(8.0, 20.0);
            let ingresos = (1200.0 + promedio * 180.0 + rng.gauss(0.0, 400.0)).max(800.0);
            // About one in eight students leaves the sector blank.
            let ambito = if rng.next_u64() % 8 == 0 {
                None
            } else {
                Some(rng.pick(&SECTORS))
            };

            Row {
                carrera: rng.pick(&CAREERS),
                ambito_trabajo: ambito,
                edad,
                cursos_aprobados: cursos,
                promedio_ponderado: (promedio * 100.0).round() / 100.0,
                ingresos_despues_graduacion: ingresos.round(),
                herramienta_ia_preferida: rng.pick(&AI_TOOLS),
                modo_transporte: rng.pick(&TRANSPORT),
            }
        })
        .collect()
}

fn write_csv(path: &Path, rows: &[Row]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV file")?;
    Ok(())
}

fn write_parquet(path: &Path, rows: &[Row]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("carrera", DataType::Utf8, false),
        Field::new("ambito_trabajo", DataType::Utf8, true),
        Field::new("Edad", DataType::Int64, false),
        Field::new("cursos_aprobados", DataType::Int64, false),
        Field::new("promedio_ponderado", DataType::Float64, false),
        Field::new("ingresos_despues_graduacion", DataType::Float64, false),
        Field::new("herramienta_ia_preferida", DataType::Utf8, false),
        Field::new("modo_transporte", DataType::Utf8, false),
    ]));

    let columns: Vec<ArrayRef> = vec![
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.carrera))),
        Arc::new(StringArray::from(
            rows.iter().map(|r| r.ambito_trabajo).collect::<Vec<_>>(),
        )),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.edad))),
        Arc::new(Int64Array::from_iter_values(rows.iter().map(|r| r.cursos_aprobados))),
        Arc::new(Float64Array::from_iter_values(rows.iter().map(|r| r.promedio_ponderado))),
        Arc::new(Float64Array::from_iter_values(
            rows.iter().map(|r| r.ingresos_despues_graduacion),
        )),
        Arc::new(StringArray::from_iter_values(
            rows.iter().map(|r| r.herramienta_ia_preferida),
        )),
        Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.modo_transporte))),
    ];

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing record batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut rng = SimpleRng::new(cli.seed);
    let rows = generate(cli.rows, &mut rng);

    if let Some(parent) = cli.out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let ext = cli
        .out
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "csv" => write_csv(&cli.out, &rows)?,
        "parquet" | "pq" => write_parquet(&cli.out, &rows)?,
        other => bail!("Unsupported output extension: .{other}"),
    }

    println!("Wrote {} survey responses to {}", rows.len(), cli.out.display());
    Ok(())
}
