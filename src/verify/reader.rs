use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};

use crate::error::VerifyError;

use super::bounds::TrajectoryPoint;

/// Recognized `(x, y)` column pairs, in order of preference.
pub const COLUMN_PAIRS: [(&str, &str); 4] = [
    ("fused_x_m", "fused_y_m"),
    ("x_m", "y_m"),
    ("uwb_x_m", "uwb_y_m"),
    ("uwb_ble_x_m", "uwb_ble_y_m"),
];

#[derive(Debug, Clone)]
struct Columns {
    x: usize,
    y: usize,
    x_name: &'static str,
    y_name: &'static str,
}

/// Streaming reader over the position columns of a trajectory export.
///
/// Yields one point per data row without materializing the file.
#[derive(Debug)]
pub struct TrajectoryReader<R> {
    csv: csv::Reader<R>,
    columns: Option<Columns>,
    record: StringRecord,
    row: u64,
}

impl TrajectoryReader<File> {
    /// Open the export at `path`.
    pub fn open(path: &Path) -> Result<Self, VerifyError> {
        let file = File::open(path).map_err(|source| VerifyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_reader(file)
    }
}

impl<R: Read> TrajectoryReader<R> {
    /// Read the header from `reader` and locate the position columns.
    ///
    /// A completely empty input is accepted and yields no rows.
    pub fn from_reader(reader: R) -> Result<Self, VerifyError> {
        let mut csv = ReaderBuilder::new().trim(Trim::All).flexible(true).from_reader(reader);
        let headers = csv.headers()?.clone();

        let columns = if headers.is_empty() {
            None
        } else {
            Some(detect_columns(&headers).ok_or_else(|| VerifyError::MissingColumns {
                header: headers.iter().collect::<Vec<_>>().join(","),
            })?)
        };

        Ok(Self {
            csv,
            columns,
            record: StringRecord::new(),
            row: 0,
        })
    }

    /// Names of the columns in use, once a header was found.
    #[must_use]
    pub fn column_names(&self) -> Option<(&'static str, &'static str)> {
        self.columns.as_ref().map(|c| (c.x_name, c.y_name))
    }

    fn parse_current(&self, columns: &Columns) -> Result<TrajectoryPoint, VerifyError> {
        let x = parse_field(&self.record, columns.x, columns.x_name, self.row)?;
        let y = parse_field(&self.record, columns.y, columns.y_name, self.row)?;
        Ok(TrajectoryPoint::new(x, y))
    }
}

impl<R: Read> Iterator for TrajectoryReader<R> {
    type Item = Result<TrajectoryPoint, VerifyError>;

    fn next(&mut self) -> Option<Self::Item> {
        let columns = self.columns.clone()?;
        match self.csv.read_record(&mut self.record) {
            Ok(false) => None,
            Ok(true) => {
                self.row += 1;
                Some(self.parse_current(&columns))
            }
            Err(err) => Some(Err(err.into())),
        }
    }
}

fn detect_columns(headers: &StringRecord) -> Option<Columns> {
    let index_of = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    COLUMN_PAIRS.iter().find_map(|&(x_name, y_name)| {
        Some(Columns {
            x: index_of(x_name)?,
            y: index_of(y_name)?,
            x_name,
            y_name,
        })
    })
}

fn parse_field(record: &StringRecord, idx: usize, column: &str, row: u64) -> Result<f64, VerifyError> {
    let raw = record.get(idx).unwrap_or_default();
    raw.parse::<f64>().map_err(|_| VerifyError::InvalidValue {
        row,
        column: column.to_string(),
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn points(input: &str) -> Result<Vec<TrajectoryPoint>, VerifyError> {
        TrajectoryReader::from_reader(input.as_bytes())?.collect()
    }

    #[test]
    fn test_reads_fused_columns() {
        let pts = points("seq,fused_x_m,fused_y_m\n0,1.5,-2.0\n1,3.0000,4.2500\n").unwrap();
        assert_eq!(pts, vec![TrajectoryPoint::new(1.5, -2.0), TrajectoryPoint::new(3.0, 4.25)]);
    }

    #[test]
    fn test_header_match_is_case_insensitive_and_trimmed() {
        let reader = TrajectoryReader::from_reader(" FUSED_X_M , Fused_Y_m \n1,2\n".as_bytes()).unwrap();
        assert_eq!(reader.column_names(), Some(("fused_x_m", "fused_y_m")));
        let pts: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
        assert_eq!(pts, vec![TrajectoryPoint::new(1.0, 2.0)]);
    }

    #[test]
    fn test_fallback_columns() {
        let reader = TrajectoryReader::from_reader("uwb_x_m,uwb_y_m,x_m,y_m\n1,2,3,4\n".as_bytes()).unwrap();
        // x_m/y_m ranks above uwb_x_m/uwb_y_m.
        assert_eq!(reader.column_names(), Some(("x_m", "y_m")));
        let pts: Vec<_> = reader.collect::<Result<_, _>>().unwrap();
        assert_eq!(pts, vec![TrajectoryPoint::new(3.0, 4.0)]);
    }

    #[test]
    fn test_missing_columns() {
        let err = TrajectoryReader::from_reader("seq,lat,lon\n1,2,3\n".as_bytes()).unwrap_err();
        match err {
            VerifyError::MissingColumns { header } => assert_eq!(header, "seq,lat,lon"),
            other => panic!("expected missing columns, got {other:?}"),
        }
    }

    #[test]
    fn test_header_only_and_empty_input_yield_nothing() {
        assert!(points("seq,fused_x_m,fused_y_m\n").unwrap().is_empty());
        assert!(points("").unwrap().is_empty());
    }

    #[test]
    fn test_invalid_value_reports_row() {
        let err = points("fused_x_m,fused_y_m\n1,2\n3,oops\n").unwrap_err();
        match err {
            VerifyError::InvalidValue { row, column, value } => {
                assert_eq!(row, 2);
                assert_eq!(column, "fused_y_m");
                assert_eq!(value, "oops");
            }
            other => panic!("expected invalid value, got {other:?}"),
        }
    }

    #[test]
    fn test_short_row_is_invalid() {
        let err = points("seq,fused_x_m,fused_y_m\n1,2\n").unwrap_err();
        assert!(matches!(err, VerifyError::InvalidValue { row: 1, .. }));
    }
}
