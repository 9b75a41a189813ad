//! Terminal rendering of run events

use colored::*;

use crate::api::{Region, ResourceKind};
use crate::upload::{Progress, RowOutcome, RowStatus, RunObserver, RunPhase};

use super::DisplayStyle;

/// Prints run progress as it happens
pub struct TerminalRenderer {
    style: DisplayStyle,
    region: Option<Region>,
    last_phase: RunPhase,
}

impl TerminalRenderer {
    pub fn new(style: DisplayStyle, region: Option<Region>) -> Self {
        Self {
            style,
            region,
            last_phase: RunPhase::Idle,
        }
    }

    fn quiet(&self) -> bool {
        matches!(self.style, DisplayStyle::Quiet)
    }
}

impl RunObserver for TerminalRenderer {
    fn on_phase(&mut self, phase: &RunPhase) {
        if !self.quiet() {
            match phase {
                RunPhase::Authenticating => {
                    let region = self
                        .region
                        .map(|r| r.display_name())
                        .unwrap_or("unknown region");
                    println!("Authenticating with HammerTech ({})...", region.cyan());
                }
                RunPhase::Loading => {
                    if self.last_phase == RunPhase::Authenticating {
                        println!("{}", "Authentication successful.".green());
                    }
                }
                _ => {}
            }
        }
        self.last_phase = phase.clone();
    }

    fn on_row_started(&mut self, row: usize, kind: ResourceKind, label: &str) {
        if matches!(self.style, DisplayStyle::Verbose) {
            println!("Row {}: Sending {} {}...", row, kind.noun(), label);
        }
    }

    fn on_row_finished(&mut self, outcome: &RowOutcome, progress: Progress) {
        if self.quiet() {
            return;
        }

        let percent = format!("[{:>3.0}%]", progress.fraction() * 100.0).dimmed();
        let line = outcome.to_string();
        let line = match outcome.status {
            RowStatus::Success { .. } => line.green(),
            RowStatus::Previewed { .. } => line.normal(),
            RowStatus::Failed { .. } | RowStatus::Error { .. } => line.red(),
        };
        println!("{} {}", percent, line);
    }
}
