/// Point-in-time copy of [`SimMetrics`](crate::metrics::SimMetrics).
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SimMetricsSnapshot {
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

    // gauges captured at snapshot time
    pub max_frequency: u32,
    pub resident_buffers: u64,
}

impl SimMetricsSnapshot {
    pub fn requests_issued(&self) -> u64 {
        self.reads_issued + self.writes_issued
    }

    /// Share of cache touches that found the track resident.
    pub fn cache_hit_rate(&self) -> f64 {
        let hits = self.buffer_refreshes + self.buffer_promotions;
        let total = hits + self.buffers_added;
        if total == 0 {
            0.0
        } else {
            hits as f64 / total as f64
        }
    }

    /// Mean head movement cost per serviced request.
    pub fn mean_seek_time(&self) -> f64 {
        if self.head_moves == 0 {
            0.0
        } else {
            self.seek_time / self.head_moves as f64
        }
    }
}
