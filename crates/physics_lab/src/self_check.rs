//! Headless run of every demo.
//!
//! Each demo gets a fresh [`TabController`] over [`RecordingSurface`]s, is
//! started at t = 0 and pumped with a synthetic 16 ms clock. The report lists
//! run state, frame count and metrics per demo, and fails if any metric is not
//! finite or if a tab switch leaves a frame scheduled.

use std::fmt;
use std::time::Duration;

use tracing::{info, warn};

use crate::driver::RunState;
use crate::messages::Demo;
use crate::params::Metric;
use crate::surface::RecordingSurface;
use crate::tabs::TabController;

/// Synthetic frame interval.
pub const FRAME: Duration = Duration::from_millis(16);

/// Outcome for one demo.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoReport {
    /// Which demo ran.
    pub demo: Demo,
    /// Run state after the last frame.
    pub state: RunState,
    /// Frames the engine drew.
    pub frames: u64,
    /// Metrics after the last frame.
    pub metrics: Vec<Metric>,
    /// Whether switching away cancelled every pending frame.
    pub switch_cancelled: bool,
}

impl DemoReport {
    /// Returns `true` if every metric is finite and the switch cleaned up.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.switch_cancelled && self.metrics.iter().all(|m| m.value.is_finite())
    }
}

impl fmt::Display for DemoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed() { "ok" } else { "FAIL" };
        write!(
            f,
            "[{mark}] {}: {} after {} frames",
            self.demo, self.state, self.frames
        )?;
        for metric in &self.metrics {
            write!(f, "\n       {metric}")?;
        }
        if !self.switch_cancelled {
            write!(f, "\n       frame still pending after tab switch")?;
        }
        Ok(())
    }
}

/// Outcome for all demos.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Frame budget per demo.
    pub frame_budget: u32,
    /// One entry per demo, in tab order.
    pub demos: Vec<DemoReport>,
}

impl Report {
    /// Returns `true` if every demo passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.demos.iter().all(DemoReport::passed)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "physics_lab self-check ({} frames @ {} ms)",
            self.frame_budget,
            FRAME.as_millis()
        )?;
        for demo in &self.demos {
            writeln!(f, "{demo}")?;
        }
        write!(
            f,
            "self-check {}",
            if self.passed() { "passed" } else { "failed" }
        )
    }
}

/// Run every demo for up to `frames` frames.
#[must_use]
pub fn run(frames: u32) -> Report {
    let demos = Demo::all()
        .into_iter()
        .map(|demo| run_demo(demo, frames))
        .collect();
    Report {
        frame_budget: frames,
        demos,
    }
}

fn run_demo(demo: Demo, frames: u32) -> DemoReport {
    let mut tabs = TabController::<RecordingSurface>::new(demo);
    if !tabs.start(demo, Duration::ZERO) {
        warn!(demo = %demo, "self-check could not start demo");
    }

    for i in 1..=frames {
        if tabs.queue().pending_count() == 0 {
            break;
        }
        tabs.pump(FRAME * i);
    }

    let sim = tabs.simulation(demo);
    let state = sim.run_state();
    let frames_drawn = sim.frames_rendered();
    let metrics = sim.metrics();

    tabs.switch_to(demo.next());
    let switch_cancelled = tabs.queue().pending_count() == 0
        && tabs.simulation(demo).pending_frame().is_none()
        && tabs.simulation(demo).run_state() == RunState::Idle;

    info!(demo = %demo, state = %state, frames = frames_drawn, "self-check demo finished");
    DemoReport {
        demo,
        state,
        frames: frames_drawn,
        metrics,
        switch_cancelled,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_demo_passes() {
        let report = run(120);
        assert_eq!(report.demos.len(), 4);
        assert!(report.passed(), "{report}");
    }

    #[test]
    fn projectile_lands_within_default_budget() {
        let report = run(600);
        let projectile = &report.demos[0];
        assert_eq!(projectile.state, RunState::Settled);
        assert!(projectile.frames <= 452);
    }

    #[test]
    fn harmonic_runs_for_the_whole_budget() {
        let report = run(50);
        let harmonic = &report.demos[2];
        assert_eq!(harmonic.demo, Demo::Harmonic);
        assert_eq!(harmonic.state, RunState::Running);
        assert_eq!(harmonic.frames, 50);
    }

    #[test]
    fn report_lists_all_demos() {
        let text = run(10).to_string();
        for demo in Demo::all() {
            assert!(text.contains(demo.name()), "missing {demo}");
        }
        assert!(text.ends_with("self-check passed"));
    }

    #[test]
    fn non_finite_metric_fails() {
        let report = DemoReport {
            demo: Demo::Newton,
            state: RunState::Running,
            frames: 1,
            metrics: vec![Metric::new("Net Force", f64::NAN, "N")],
            switch_cancelled: true,
        };
        assert!(!report.passed());
        assert!(report.to_string().starts_with("[FAIL]"));
    }
}
