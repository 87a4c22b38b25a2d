//! Decorative progress bar shown after a file is picked.
//!
//! Nothing is transferred at selection time; the bar only signals that the
//! file was accepted. It fills on a fixed timer, holds, fades, and hides.
//! Each (re)start bumps a run counter so timers of an earlier run stop.

use crate::config::ProgressTiming;

/// Where the bar is in its cosmetic sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressPhase {
    Hidden,
    Filling { percent: u8 },
    Holding,
    FadingOut,
}

/// What the page should do to the bar at this step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressFrame {
    /// Show the container at full opacity with the bar at this width
    Show { percent: u8 },
    /// Set the bar width
    Width { percent: u8 },
    /// Start an opacity transition to zero
    FadeOut { duration_ms: u32 },
    /// Hide the container and restore its opacity
    Hide,
}

/// One step of the sequence plus when the next one is due.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProgressStep {
    /// Run this step belongs to
    pub run: u64,
    pub frame: ProgressFrame,
    /// Delay before calling [`DecorativeProgress::advance`] again; `None` when done
    pub next_delay_ms: Option<u32>,
}

/// Timer-driven progress bar state for one upload widget.
#[derive(Debug, Clone)]
pub struct DecorativeProgress {
    timing: ProgressTiming,
    phase: ProgressPhase,
    run: u64,
}

impl DecorativeProgress {
    pub fn new(timing: ProgressTiming) -> Self {
        Self {
            timing,
            phase: ProgressPhase::Hidden,
            run: 0,
        }
    }

    pub fn phase(&self) -> ProgressPhase {
        self.phase
    }

    /// Restart from 0%, superseding any run in flight.
    pub fn start(&mut self) -> ProgressStep {
        self.run += 1;
        self.phase = ProgressPhase::Filling { percent: 0 };
        ProgressStep {
            run: self.run,
            frame: ProgressFrame::Show { percent: 0 },
            next_delay_ms: Some(self.timing.tick_ms),
        }
    }

    /// Hide immediately, superseding any run in flight.
    pub fn stop(&mut self) -> ProgressStep {
        self.run += 1;
        self.phase = ProgressPhase::Hidden;
        ProgressStep {
            run: self.run,
            frame: ProgressFrame::Hide,
            next_delay_ms: None,
        }
    }

    /// Advance the given run. Returns `None` for a superseded or finished run.
    pub fn advance(&mut self, run: u64) -> Option<ProgressStep> {
        if run != self.run {
            return None;
        }

        let (phase, frame, next_delay_ms) = match self.phase {
            ProgressPhase::Hidden => return None,
            ProgressPhase::Filling { percent } => {
                let percent = percent.saturating_add(self.timing.step_percent).min(100);
                if percent >= 100 {
                    (
                        ProgressPhase::Holding,
                        ProgressFrame::Width { percent },
                        Some(self.timing.hold_ms),
                    )
                } else {
                    (
                        ProgressPhase::Filling { percent },
                        ProgressFrame::Width { percent },
                        Some(self.timing.tick_ms),
                    )
                }
            }
            ProgressPhase::Holding => (
                ProgressPhase::FadingOut,
                ProgressFrame::FadeOut {
                    duration_ms: self.timing.fade_ms,
                },
                Some(self.timing.fade_ms),
            ),
            ProgressPhase::FadingOut => (ProgressPhase::Hidden, ProgressFrame::Hide, None),
        };

        self.phase = phase;
        Some(ProgressStep {
            run,
            frame,
            next_delay_ms,
        })
    }
}
