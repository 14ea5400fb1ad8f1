use std::io::Read;
use std::path::Path;

use miette::Diagnostic;
use thiserror::Error;

use crate::permission::path::canonicalize;
use crate::registry::{LocationRegistry, LocationRow};

/// Number of fields every location row must carry.
const ROW_FIELDS: usize = 6;

#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    #[error("Failed to open location file `{path}`")]
    #[diagnostic(
        code(territory::registry::io),
        help("Point `locations.path` (or TERRITORY__LOCATIONS__PATH) at a readable CSV file")
    )]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed location file: {0}")]
    #[diagnostic(
        code(territory::registry::csv),
        help("Expected rows of: city code, province code, country code, city name, province name, country name")
    )]
    Csv(#[from] csv::Error),
}

/// Load the location hierarchy from the CSV file at `path`.
pub fn load_locations(path: &Path) -> Result<LocationRegistry, LoadError> {
    let file = std::fs::File::open(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let registry = read_locations(file)?;

    tracing::info!(
        path = %path.display(),
        countries = registry.country_count(),
        provinces = registry.province_count(),
        cities = registry.city_count(),
        "Loaded location registry"
    );

    Ok(registry)
}

/// Build a registry from CSV data. The first row is a header and is skipped.
/// Rows that are not valid UTF-8 or do not carry exactly six fields are logged
/// and skipped.
pub fn read_locations<R: Read>(source: R) -> Result<LocationRegistry, LoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(source);

    let mut registry = LocationRegistry::new();
    let mut skipped = 0usize;

    for record in reader.byte_records() {
        let record = record?;
        let line = record.position().map(|p| p.line());
        let record = match csv::StringRecord::from_byte_record(record) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(
                    line,
                    reason = %e.utf8_error(),
                    "Skipping location row that is not valid UTF-8"
                );
                skipped += 1;
                continue;
            }
        };
        let Some(row) = parse_row(&record) else {
            tracing::warn!(
                line,
                fields = record.len(),
                row = ?record,
                "Skipping location row with invalid number of fields"
            );
            skipped += 1;
            continue;
        };
        registry.insert(row);
    }

    if skipped > 0 {
        tracing::warn!(skipped, "Some location rows were skipped");
    }

    Ok(registry)
}

fn parse_row(record: &csv::StringRecord) -> Option<LocationRow> {
    if record.len() != ROW_FIELDS {
        return None;
    }

    Some(LocationRow {
        city_code: canonicalize(&record[0]),
        province_code: canonicalize(&record[1]),
        country_code: canonicalize(&record[2]),
        city_name: canonicalize(&record[3]),
        province_name: canonicalize(&record[4]),
        country_name: canonicalize(&record[5]),
    })
}
