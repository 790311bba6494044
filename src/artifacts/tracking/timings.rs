//! Wall-clock accounting for the expensive phases of a walk

use std::time::Duration;

/// Accumulated time per phase, reported when `--timing` is set
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseTimings {
    repository: Duration,
    parsing: Duration,
    matching: Duration,
}

impl PhaseTimings {
    pub fn add_repository(&mut self, elapsed: Duration) {
        self.repository += elapsed;
    }

    pub fn add_parsing(&mut self, elapsed: Duration) {
        self.parsing += elapsed;
    }

    pub fn add_matching(&mut self, elapsed: Duration) {
        self.matching += elapsed;
    }

    pub fn repository(&self) -> Duration {
        self.repository
    }

    pub fn parsing(&self) -> Duration {
        self.parsing
    }

    pub fn matching(&self) -> Duration {
        self.matching
    }

    /// Tab-separated table of the phases against `total` wall-clock time
    pub fn render(&self, total: Duration) -> String {
        let rows = [
            ("Total time", total),
            ("Repository operations", self.repository),
            ("Parse service calls", self.parsing),
            ("Tree matching", self.matching),
        ];

        rows.iter()
            .map(|(phase, elapsed)| {
                format!("{phase}\t{elapsed:?}\t{}%", percent_of(*elapsed, total))
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn percent_of(part: Duration, total: Duration) -> u128 {
    if total.is_zero() {
        return 0;
    }

    part.as_nanos() * 100 / total.as_nanos()
}
