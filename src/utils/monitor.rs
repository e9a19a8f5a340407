use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct PhaseTiming {
    pub phase: String,
    pub elapsed: Duration,
}

/// 記錄每個檢查步驟花費的時間
#[derive(Debug)]
pub struct CheckTimer {
    start_time: Instant,
    last_mark: Instant,
    phases: Vec<PhaseTiming>,
    enabled: bool,
}

impl CheckTimer {
    pub fn new(enabled: bool) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_mark: now,
            phases: Vec::new(),
            enabled,
        }
    }

    /// 標記一個階段結束，回傳該階段耗時
    pub fn mark(&mut self, phase: &str) -> Duration {
        let now = Instant::now();
        let elapsed = now.duration_since(self.last_mark);
        self.last_mark = now;

        if self.enabled {
            tracing::info!("⏱️ {} - {:?}", phase, elapsed);
        }

        self.phases.push(PhaseTiming {
            phase: phase.to_string(),
            elapsed,
        });
        elapsed
    }

    pub fn total(&self) -> Duration {
        self.start_time.elapsed()
    }

    pub fn phases(&self) -> &[PhaseTiming] {
        &self.phases
    }

    pub fn log_final_stats(&self) {
        if self.enabled {
            tracing::info!(
                "⏱️ Final Stats - Total Time: {:?}, Phases: {}",
                self.total(),
                self.phases.len()
            );
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for CheckTimer {
    fn default() -> Self {
        Self::new(false)
    }
}
