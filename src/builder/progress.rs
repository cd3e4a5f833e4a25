/// Running request counters for a build. `total` grows as deeper levels are
/// discovered, so `percent` is an estimate that only settles at the end.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildProgress {
    pub completed: usize,
    pub total: usize,
}

impl BuildProgress {
    pub fn is_done(&self) -> bool {
        self.completed >= self.total
    }

    /// 0..=100. An empty build counts as done.
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        let pct = self.completed.min(self.total) * 100 / self.total;
        pct as u8
    }
}
