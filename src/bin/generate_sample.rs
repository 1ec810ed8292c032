use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde::Serialize;

use salary_explorer::data::Column;

/// One synthetic job listing; field order matches the CSV header.
#[derive(Debug, Serialize)]
struct Listing {
    #[serde(rename = "Job Title")]
    job_title: &'static str,
    #[serde(rename = "Salary")]
    salary: i64,
    #[serde(rename = "Employee Residence")]
    employee_residence: &'static str,
    #[serde(rename = "Experience Level")]
    experience_level: &'static str,
    #[serde(rename = "Company Size")]
    company_size: &'static str,
    #[serde(rename = "Work Year")]
    work_year: i64,
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

    fn pick<T: Copy>(&mut self, items: &[(T, f64)]) -> (T, f64) {
        items[(self.next_u64() % items.len() as u64) as usize]
    }
}

// (value, salary multiplier)
const TITLES: [(&str, f64); 6] = [
    ("Data Scientist", 1.0),
    ("Data Engineer", 0.95),
    ("Data Analyst", 0.7),
    ("Machine Learning Engineer", 1.15),
    ("Research Scientist", 1.1),
    ("Analytics Manager", 1.2),
];
const RESIDENCES: [(&str, f64); 5] = [
    ("US", 1.3),
    ("GB", 1.0),
    ("DE", 0.95),
    ("IN", 0.45),
    ("CA", 1.05),
];
const LEVELS: [(&str, f64); 4] = [("EN", 0.6), ("MI", 0.85), ("SE", 1.15), ("EX", 1.6)];
const SIZES: [(&str, f64); 3] = [("S", 0.85), ("M", 1.0), ("L", 1.1)];

fn generate(rows: usize, rng: &mut SimpleRng) -> Vec<Listing> {
    (0..rows)
        .map(|_| {
            let (job_title, t) = rng.pick(&TITLES);
            let (employee_residence, r) = rng.pick(&RESIDENCES);
            let (experience_level, l) = rng.pick(&LEVELS);
            let (company_size, s) = rng.pick(&SIZES);
            let noise = 0.85 + 0.3 * rng.next_f64();
            let salary = (100_000.0 * t * r * l * s * noise / 100.0).round() as i64 * 100;
            Listing {
                job_title,
                salary,
                employee_residence,
                experience_level,
                company_size,
                work_year: 2020 + (rng.next_u64() % 5) as i64,
            }
        })
        .collect()
}

fn write_csv(path: &str, listings: &[Listing]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).with_context(|| format!("creating {path}"))?;
    for listing in listings {
        writer.serialize(listing)?;
    }
    writer.flush()?;
    Ok(())
}

fn write_parquet(path: &str, listings: &[Listing]) -> Result<()> {
    let text = |f: fn(&Listing) -> &'static str| -> StringArray {
        StringArray::from(listings.iter().map(f).collect::<Vec<_>>())
    };

    let schema = Arc::new(Schema::new(vec![
        Field::new(Column::JobTitle.name(), DataType::Utf8, false),
        Field::new(Column::Salary.name(), DataType::Int64, false),
        Field::new(Column::EmployeeResidence.name(), DataType::Utf8, false),
        Field::new(Column::ExperienceLevel.name(), DataType::Utf8, false),
        Field::new(Column::CompanySize.name(), DataType::Utf8, false),
        Field::new("Work Year", DataType::Int64, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(text(|l| l.job_title)),
            Arc::new(Int64Array::from(listings.iter().map(|l| l.salary).collect::<Vec<_>>())),
            Arc::new(text(|l| l.employee_residence)),
            Arc::new(text(|l| l.experience_level)),
            Arc::new(text(|l| l.company_size)),
            Arc::new(Int64Array::from(listings.iter().map(|l| l.work_year).collect::<Vec<_>>())),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).with_context(|| format!("creating {path}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch)?;
    writer.close()?;
    Ok(())
}

fn main() -> Result<()> {
    let rows: usize = match std::env::args().nth(1) {
        Some(n) => n.parse().context("row count must be a positive integer")?,
        None => 500,
    };

    let mut rng = SimpleRng::new(42);
    let listings = generate(rows, &mut rng);

    write_csv("sample_jobs.csv", &listings)?;
    write_parquet("sample_jobs.parquet", &listings)?;

    println!("Wrote {} job listings to sample_jobs.csv and sample_jobs.parquet", listings.len());
    Ok(())
}
