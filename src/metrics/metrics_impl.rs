use crate::events::{EventSink, SimEvent};
use crate::metrics::snapshot::SimMetricsSnapshot;
use crate::metrics::traits::{
    CacheMetricsRecorder, DriverMetricsRecorder, MetricsSnapshotProvider,
    SchedulerMetricsRecorder,
};
use crate::request::RequestKind;

/// Event-driven simulation counters.
///
/// Plug it in as the driver's sink (or tee it next to another sink) and read
/// a [`SimMetricsSnapshot`] afterwards.
///
/// ```
/// use disksim::events::{EventSink, SimEvent};
/// use disksim::metrics::{MetricsSnapshotProvider, SimMetrics};
///
/// let mut metrics = SimMetrics::default();
/// metrics.record(&SimEvent::HeadMoved { track: 70, cost: 14.0 });
/// metrics.record(&SimEvent::BufferAdded { id: 70 });
///
/// let snap = metrics.snapshot();
/// assert_eq!(snap.head_moves, 1);
/// assert_eq!(snap.seek_time, 14.0);
/// assert_eq!(snap.buffers_added, 1);
/// ```
#[derive(Debug, Default, Clone)]
pub struct SimMetrics {
    pub head_moves: u64,
    pub seek_time: f64,
    pub schedules_completed: u64,
    pub reads_issued: u64,
    pub writes_issued: u64,
    pub issue_time: f64,
    pub quantum_overruns: u64,
    pub buffers_added: u64,
    pub buffer_refreshes: u64,
    pub buffer_promotions: u64,
    pub buffer_evictions: u64,
    pub max_frequency: u32,
}

impl SimMetrics {
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

impl SchedulerMetricsRecorder for SimMetrics {
    #[inline]
    fn record_head_move(&mut self, cost: f64) {
        self.head_moves += 1;
        self.seek_time += cost;
    }

    #[inline]
    fn record_schedule_completed(&mut self) {
        self.schedules_completed += 1;
    }
}

impl CacheMetricsRecorder for SimMetrics {
    #[inline]
    fn record_buffer_added(&mut self) {
        self.buffers_added += 1;
    }

    #[inline]
    fn record_buffer_refreshed(&mut self) {
        self.buffer_refreshes += 1;
    }

    #[inline]
    fn record_buffer_promoted(&mut self, new_frequency: u32) {
        self.buffer_promotions += 1;
        self.max_frequency = self.max_frequency.max(new_frequency);
    }

    #[inline]
    fn record_buffer_evicted(&mut self, _frequency: u32) {
        self.buffer_evictions += 1;
    }
}

impl DriverMetricsRecorder for SimMetrics {
    #[inline]
    fn record_request(&mut self, kind: RequestKind, cost: f64) {
        match kind {
            RequestKind::Read => self.reads_issued += 1,
            RequestKind::Write => self.writes_issued += 1,
        }
        self.issue_time += cost;
    }

    #[inline]
    fn record_quantum_overrun(&mut self) {
        self.quantum_overruns += 1;
    }
}

impl EventSink for SimMetrics {
    fn record(&mut self, event: &SimEvent) {
        match *event {
            SimEvent::HeadMoved { cost, .. } => self.record_head_move(cost),
            SimEvent::ScheduleCompleted { .. } => self.record_schedule_completed(),
            SimEvent::RequestServiced {
                kind, total_cost, ..
            } => self.record_request(kind, total_cost),
            SimEvent::QuantumExceeded { .. } => self.record_quantum_overrun(),
            SimEvent::BufferAdded { .. } => self.record_buffer_added(),
            SimEvent::BufferRefreshed { .. } => self.record_buffer_refreshed(),
            SimEvent::BufferPromoted { new_frequency, .. } => {
                self.record_buffer_promoted(new_frequency)
            },
            SimEvent::BufferEvicted { frequency, .. } => self.record_buffer_evicted(frequency),
            SimEvent::InitialHead { .. }
            | SimEvent::SplitQueues { .. }
            | SimEvent::SimulationCompleted { .. } => {},
        }
    }
}

impl MetricsSnapshotProvider<SimMetricsSnapshot> for SimMetrics {
    fn snapshot(&self) -> SimMetricsSnapshot {
        let resident = self
            .buffers_added
            .saturating_sub(self.buffer_evictions);
        SimMetricsSnapshot {
            head_moves: self.head_moves,
            seek_time: self.seek_time,
            schedules_completed: self.schedules_completed,
            reads_issued: self.reads_issued,
            writes_issued: self.writes_issued,
            issue_time: self.issue_time,
            quantum_overruns: self.quantum_overruns,
            buffers_added: self.buffers_added,
            buffer_refreshes: self.buffer_refreshes,
            buffer_promotions: self.buffer_promotions,
            buffer_evictions: self.buffer_evictions,
            max_frequency: self.max_frequency,
            resident_buffers: resident,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_requests_by_kind() {
        let mut m = SimMetrics::default();
        for kind in [RequestKind::Read, RequestKind::Write, RequestKind::Read] {
            m.record(&SimEvent::RequestServiced {
                process_id: 1,
                track: 3,
                kind,
                total_cost: 2.0,
            });
        }
        let snap = m.snapshot();
        assert_eq!(snap.reads_issued, 2);
        assert_eq!(snap.writes_issued, 1);
        assert_eq!(snap.requests_issued(), 3);
        assert_eq!(snap.issue_time, 6.0);
    }

    #[test]
    fn cache_hit_rate_counts_refresh_and_promotion() {
        let mut m = SimMetrics::default();
        m.record(&SimEvent::BufferAdded { id: 1 });
        m.record(&SimEvent::BufferRefreshed { id: 1 });
        m.record(&SimEvent::BufferAdded { id: 2 });
        m.record(&SimEvent::BufferPromoted {
            id: 1,
            new_frequency: 2,
        });

        let snap = m.snapshot();
        assert_eq!(snap.cache_hit_rate(), 0.5);
        assert_eq!(snap.max_frequency, 2);
        assert_eq!(snap.resident_buffers, 2);
    }

    #[test]
    fn evictions_lower_residency() {
        let mut m = SimMetrics::default();
        for id in 0..4 {
            m.record(&SimEvent::BufferAdded { id });
        }
        m.record(&SimEvent::BufferEvicted { id: 0, frequency: 1 });
        assert_eq!(m.snapshot().resident_buffers, 3);
    }

    #[test]
    fn reset_clears_counters() {
        let mut m = SimMetrics::default();
        m.record(&SimEvent::HeadMoved { track: 1, cost: 4.5 });
        m.record(&SimEvent::QuantumExceeded {
            process_id: 1,
            elapsed: 22.4,
        });
        m.reset();
        assert_eq!(m.snapshot(), SimMetricsSnapshot::default());
    }

    #[test]
    fn mean_seek_time() {
        let mut m = SimMetrics::default();
        m.record(&SimEvent::HeadMoved { track: 70, cost: 14.0 });
        m.record(&SimEvent::HeadMoved { track: 10, cost: 34.0 });
        assert_eq!(m.snapshot().mean_seek_time(), 24.0);
    }
}
