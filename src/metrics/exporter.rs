use std::fmt::Display;
use std::io::Write;

use parking_lot::Mutex;

use crate::metrics::snapshot::SimMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for simulation snapshots.
///
/// Writes the Prometheus text exposition format, so the output can be
/// scraped directly or forwarded to an OpenTelemetry collector.
///
/// ```
/// use disksim::metrics::{MetricsExporter, PrometheusTextExporter, SimMetricsSnapshot};
///
/// let exporter = PrometheusTextExporter::new("disksim", Vec::new());
/// exporter.export(&SimMetricsSnapshot { head_moves: 3, ..Default::default() });
///
/// let text = String::from_utf8(exporter.into_inner()).unwrap();
/// assert!(text.contains("disksim_head_moves_total 3"));
/// ```
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }

    fn write_counter(&self, name: &str, value: impl Display) {
        self.write_metric(name, "counter", value);
    }

    fn write_gauge(&self, name: &str, value: impl Display) {
        self.write_metric(name, "gauge", value);
    }

    fn write_metric(&self, name: &str, kind: &str, value: impl Display) {
        let name = self.metric_name(name);
        let mut writer = self.writer.lock();
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<SimMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &SimMetricsSnapshot) {
        self.write_counter("head_moves_total", snapshot.head_moves);
        self.write_counter("seek_time_ms_total", snapshot.seek_time);
        self.write_counter("schedules_completed_total", snapshot.schedules_completed);
        self.write_counter("reads_issued_total", snapshot.reads_issued);
        self.write_counter("writes_issued_total", snapshot.writes_issued);
        self.write_counter("issue_time_ms_total", snapshot.issue_time);
        self.write_counter("quantum_overruns_total", snapshot.quantum_overruns);
        self.write_counter("buffers_added_total", snapshot.buffers_added);
        self.write_counter("buffer_refreshes_total", snapshot.buffer_refreshes);
        self.write_counter("buffer_promotions_total", snapshot.buffer_promotions);
        self.write_counter("buffer_evictions_total", snapshot.buffer_evictions);
        self.write_gauge("max_frequency", snapshot.max_frequency);
        self.write_gauge("resident_buffers", snapshot.resident_buffers);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_type_lines_and_values() {
        let exporter = PrometheusTextExporter::new("sim", Vec::new());
        exporter.export(&SimMetricsSnapshot {
            seek_time: 67.0,
            resident_buffers: 10,
            ..Default::default()
        });
        let text = String::from_utf8(exporter.into_inner()).unwrap();

        assert!(text.contains("# TYPE sim_seek_time_ms_total counter\nsim_seek_time_ms_total 67\n"));
        assert!(text.contains("# TYPE sim_resident_buffers gauge\nsim_resident_buffers 10\n"));
        assert_eq!(text.lines().filter(|l| l.starts_with("# TYPE")).count(), 13);
    }

    #[test]
    fn empty_prefix_leaves_names_bare() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&SimMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.starts_with("# TYPE head_moves_total counter\n"));
    }
}
