//! Timetable ingestion.
//!
//! Reads a delimited timetable export, normalizes wall-clock strings to
//! minute-of-day values (source files encode past-midnight services as hours
//! of 24 and above), averages the slightly divergent coordinates that raw
//! data records for the same named stop across rows, and hands the cleaned
//! records to the graph builder.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use crate::domain::{ClockTime, TimeError};
use crate::graph::{ConnectionRecord, Graph};

/// Error from timetable loading.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The file could not be read or a row could not be deserialized.
    #[error("failed to read timetable: {0}")]
    Csv(#[from] csv::Error),

    /// A time field could not be normalized.
    #[error("row {row}: {source}")]
    Time {
        row: usize,
        #[source]
        source: TimeError,
    },
}

/// One raw timetable row. Deserialized by header name, so exports carrying
/// extra leading columns (row ids, operator names) are accepted as-is.
#[derive(Debug, Deserialize)]
struct RawRecord {
    line: String,
    departure_time: String,
    arrival_time: String,
    start_stop: String,
    end_stop: String,
    start_stop_lat: f64,
    start_stop_lon: f64,
    end_stop_lat: f64,
    end_stop_lon: f64,
}

/// Running per-stop coordinate mean.
#[derive(Debug, Default, Clone, Copy)]
struct CoordSum {
    lat: f64,
    lon: f64,
    count: u32,
}

impl CoordSum {
    fn add(&mut self, lat: f64, lon: f64) {
        self.lat += lat;
        self.lon += lon;
        self.count += 1;
    }

    fn mean(&self) -> (f64, f64) {
        let n = f64::from(self.count.max(1));
        (self.lat / n, self.lon / n)
    }
}

/// Load a timetable file and build the transit graph.
///
/// Stop names are stored exactly as they appear in the file; callers look
/// stops up by the same spelling.
pub fn load_graph(path: &Path) -> Result<Graph, LoadError> {
    let mut reader = csv::Reader::from_path(path)?;

    let mut rows: Vec<(RawRecord, ClockTime, ClockTime)> = Vec::new();
    for (index, result) in reader.deserialize().enumerate() {
        let raw: RawRecord = result?;
        // Row numbering is 1-based and counts the header line.
        let row = index + 2;
        let departure = normalize_time(&raw.departure_time, row)?;
        let arrival = normalize_time(&raw.arrival_time, row)?;
        rows.push((raw, departure, arrival));
    }

    // Average coordinates over every mention of a name, whether the row
    // uses it as origin or destination.
    let mut coords: HashMap<&str, CoordSum> = HashMap::new();
    for (raw, _, _) in &rows {
        coords
            .entry(raw.start_stop.as_str())
            .or_default()
            .add(raw.start_stop_lat, raw.start_stop_lon);
        coords
            .entry(raw.end_stop.as_str())
            .or_default()
            .add(raw.end_stop_lat, raw.end_stop_lon);
    }
    let averaged: HashMap<String, (f64, f64)> = coords
        .into_iter()
        .map(|(name, sum)| (name.to_owned(), sum.mean()))
        .collect();

    let records = rows.into_iter().map(|(raw, departure, arrival)| {
        let (from_lat, from_lon) = averaged[&raw.start_stop];
        let (to_lat, to_lon) = averaged[&raw.end_stop];
        ConnectionRecord {
            line: raw.line,
            departure,
            arrival,
            from_name: raw.start_stop,
            to_name: raw.end_stop,
            from_lat,
            from_lon,
            to_lat,
            to_lon,
        }
    });

    let graph = Graph::from_records(records.collect::<Vec<_>>());
    tracing::info!(
        stops = graph.stop_count(),
        connections = graph.connection_count(),
        "timetable loaded"
    );
    Ok(graph)
}

fn normalize_time(s: &str, row: usize) -> Result<ClockTime, LoadError> {
    ClockTime::parse_wrapping(s).map_err(|source| LoadError::Time { row, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const HEADER: &str = "id,company,line,departure_time,arrival_time,start_stop,end_stop,start_stop_lat,start_stop_lon,end_stop_lat,end_stop_lon";

    fn timetable(rows: &[&str]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn loads_rows_ignoring_extra_leading_columns() {
        let file = timetable(&[
            "0,MPK,1,10:00:00,10:10:00,A,B,51.10,17.00,51.11,17.01",
            "1,MPK,2,10:05:00,10:25:00,A,C,51.10,17.00,51.12,17.02",
        ]);

        let graph = load_graph(file.path()).unwrap();
        assert_eq!(graph.stop_count(), 3);
        assert_eq!(graph.connection_count(), 2);

        let a = graph.stop_id("A").unwrap();
        let first = &graph.outgoing(a)[0];
        assert_eq!(first.line, "1");
        assert_eq!(first.departure, ClockTime::parse("10:00").unwrap());
        assert_eq!(graph.stop(first.to).name(), "B");
    }

    #[test]
    fn wraps_service_day_hours_past_midnight() {
        let file = timetable(&["0,MPK,N,23:50:00,24:10:00,A,B,51.10,17.00,51.11,17.01"]);

        let graph = load_graph(file.path()).unwrap();
        let a = graph.stop_id("A").unwrap();
        let leg = &graph.outgoing(a)[0];
        assert_eq!(leg.arrival, ClockTime::parse("00:10").unwrap());
        assert_eq!(leg.departure.minutes_until(leg.arrival), 20);
    }

    #[test]
    fn averages_duplicate_stop_coordinates() {
        // "A" appears twice as origin with slightly different coordinates
        // and once as destination with a third pair.
        let file = timetable(&[
            "0,MPK,1,10:00:00,10:10:00,A,B,51.10,17.00,51.20,17.10",
            "1,MPK,1,11:00:00,11:10:00,A,B,51.14,17.04,51.20,17.10",
            "2,MPK,2,12:00:00,12:10:00,B,A,51.20,17.10,51.12,17.02",
        ]);

        let graph = load_graph(file.path()).unwrap();
        let a = graph.stop(graph.stop_id("A").unwrap());
        assert!((a.latitude() - 51.12).abs() < 1e-9);
        assert!((a.longitude() - 17.02).abs() < 1e-9);
    }

    #[test]
    fn malformed_time_reports_the_row() {
        let file = timetable(&[
            "0,MPK,1,10:00:00,10:10:00,A,B,51.10,17.00,51.11,17.01",
            "1,MPK,1,bogus,11:10:00,A,B,51.10,17.00,51.11,17.01",
        ]);

        let err = load_graph(file.path()).unwrap_err();
        assert!(matches!(err, LoadError::Time { row: 3, .. }));
    }

    #[test]
    fn missing_file_is_an_error() {
        assert!(matches!(
            load_graph(Path::new("/nonexistent/timetable.csv")),
            Err(LoadError::Csv(_))
        ));
    }
}
