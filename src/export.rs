//! CSV and JSON rendering of projection output

use std::io::Write;

use serde::Serialize;

use crate::projection::{ProjectionSeries, ProjectionSummary};

/// A series together with its headline figures, rendered as one document
#[derive(Debug, Clone, Serialize)]
pub struct ProjectionReport<'a> {
    pub series: &'a ProjectionSeries,
    pub summary: ProjectionSummary,
}

impl<'a> ProjectionReport<'a> {
    pub fn new(series: &'a ProjectionSeries) -> Self {
        Self {
            series,
            summary: series.summary(),
        }
    }
}

/// Write one CSV row per year, with a header
pub fn write_series_csv<W: Write>(writer: W, series: &ProjectionSeries) -> Result<(), csv::Error> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for point in series {
        csv_writer.serialize(point)?;
    }
    csv_writer.flush()?;
    Ok(())
}

pub fn series_to_json(series: &ProjectionSeries) -> serde_json::Result<String> {
    serde_json::to_string_pretty(series)
}

pub fn summary_to_json(summary: &ProjectionSummary) -> serde_json::Result<String> {
    serde_json::to_string_pretty(summary)
}

/// Series and summary as a single JSON object
pub fn report_to_json(series: &ProjectionSeries) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ProjectionReport::new(series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::{project_lumpsum, project_recurring};

    #[test]
    fn test_csv_header_and_rows() {
        let series = project_recurring(1000.0, 3, 0.0, 0.0).unwrap();
        let mut buf = Vec::new();
        write_series_csv(&mut buf, &series).unwrap();

        let text = String::from_utf8(buf).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], "year,invested_amount,expected_amount,inflation_adjusted_amount");
        assert_eq!(lines[1], "1,12000.0,12000.0,12000.0");
        assert_eq!(lines[3], "3,36000.0,36000.0,36000.0");
    }

    #[test]
    fn test_json_contains_mode_and_points() {
        let series = project_lumpsum(1000.0, 2, 10.0, 0.0).unwrap();
        let json: serde_json::Value = serde_json::from_str(&series_to_json(&series).unwrap()).unwrap();
        assert_eq!(json["mode"], "Lumpsum");
        assert_eq!(json["points"].as_array().unwrap().len(), 2);

        let summary: serde_json::Value =
            serde_json::from_str(&summary_to_json(&series.summary()).unwrap()).unwrap();
        assert_eq!(summary["years"], 2);
        assert_eq!(summary["total_invested"], 1000.0);
    }

    #[test]
    fn test_report_is_a_single_json_document() {
        let series = project_lumpsum(100_000.0, 2, 12.0, 6.0).unwrap();
        let text = report_to_json(&series).unwrap();

        let json: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(json["series"]["mode"], "Lumpsum");
        assert_eq!(json["series"]["points"].as_array().unwrap().len(), 2);
        assert_eq!(json["summary"]["years"], 2);
        assert_eq!(json["summary"]["total_invested"], 100_000.0);
    }
}
