//! In-memory regulation table loaded once from CSV.

use std::fs::File;
use std::io::Seek;
use std::path::Path;
use std::sync::Arc;

use arrow::array::{Array, StringArray};
use arrow::csv::ReaderBuilder;
use arrow::csv::reader::Format;
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use normas_core::{Regulation, RelevanceTier};
use tracing::info;

use crate::StoreError;

pub const COL_NAME: &str = "nome";
pub const COL_SUBJECT: &str = "assunto";
pub const COL_NUMBER: &str = "numero";
pub const COL_URL: &str = "url";
pub const COL_KEYWORDS: &str = "keywords";
pub const COL_TIER: &str = "relevancia";

/// Columns the table must provide. Order in the file is free and extra
/// columns are ignored.
pub const REQUIRED_COLUMNS: &[&str] = &[
    COL_NAME,
    COL_SUBJECT,
    COL_NUMBER,
    COL_URL,
    COL_KEYWORDS,
    COL_TIER,
];

/// Read-only regulation table.
///
/// Loaded once at startup and shared by reference for the rest of the
/// process; there is no reload or mutation.
#[derive(Debug, Clone, Default)]
pub struct RegulationStore {
    regulations: Vec<Regulation>,
}

impl RegulationStore {
    /// Load the table from a CSV file with a header row.
    ///
    /// Every column is read as text, so numeric-looking `numero` values keep
    /// their original spelling. A missing file, a ragged CSV, a missing
    /// required column, or an unknown `relevancia` value is an error.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::TableNotFound(path.to_path_buf()));
        }
        let mut file = File::open(path)?;

        let format = Format::default().with_header(true);
        let (inferred, _) = format.infer_schema(&mut file, None)?;
        file.rewind()?;

        let schema = Arc::new(text_schema(&inferred));
        for &col in REQUIRED_COLUMNS {
            if schema.index_of(col).is_err() {
                return Err(StoreError::MissingColumn(col));
            }
        }

        let reader = ReaderBuilder::new(schema).with_header(true).build(file)?;
        let mut regulations = Vec::new();
        for batch in reader {
            let batch = batch?;
            let first_row = regulations.len();
            regulations.extend(regulations_from_batch(&batch, first_row)?);
        }

        info!(path = %path.display(), count = regulations.len(), "loaded regulation table");
        Ok(Self { regulations })
    }

    pub fn from_regulations(regulations: Vec<Regulation>) -> Self {
        Self { regulations }
    }

    pub fn regulations(&self) -> &[Regulation] {
        &self.regulations
    }

    pub fn len(&self) -> usize {
        self.regulations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regulations.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Regulation> {
        self.regulations.iter()
    }
}

/// Same columns as `inferred`, all as nullable UTF-8 with trimmed names.
fn text_schema(inferred: &Schema) -> Schema {
    let fields: Vec<Field> = inferred
        .fields()
        .iter()
        .map(|f| {
            let name = f.name().trim_start_matches('\u{feff}').trim();
            Field::new(name, DataType::Utf8, true)
        })
        .collect();
    Schema::new(fields)
}

/// Convert one batch into regulations. `first_row` is the number of data rows
/// read before this batch; error rows are reported 1-based.
fn regulations_from_batch(
    batch: &RecordBatch,
    first_row: usize,
) -> Result<Vec<Regulation>, StoreError> {
    let name = string_column(batch, COL_NAME)?;
    let subject = string_column(batch, COL_SUBJECT)?;
    let number = string_column(batch, COL_NUMBER)?;
    let url = string_column(batch, COL_URL)?;
    let keywords = string_column(batch, COL_KEYWORDS)?;
    let tier = string_column(batch, COL_TIER)?;

    (0..batch.num_rows())
        .map(|i| -> Result<Regulation, StoreError> {
            let tier = get_string(tier, i)
                .parse::<RelevanceTier>()
                .map_err(|source| StoreError::InvalidTier {
                    row: first_row + i + 1,
                    source,
                })?;
            Ok(Regulation {
                name: get_string(name, i),
                number: get_string(number, i),
                subject: get_string(subject, i),
                url: get_string(url, i),
                keywords: get_string(keywords, i),
                tier,
            })
        })
        .collect()
}

fn string_column<'a>(batch: &'a RecordBatch, name: &'static str) -> Result<&'a StringArray, StoreError> {
    batch
        .column_by_name(name)
        .and_then(|col| col.as_any().downcast_ref::<StringArray>())
        .ok_or(StoreError::MissingColumn(name))
}

/// Trimmed cell value; nulls read as empty strings.
fn get_string(col: &StringArray, row: usize) -> String {
    if col.is_null(row) {
        String::new()
    } else {
        col.value(row).trim().to_string()
    }
}
