use std::time::Duration;

use log::debug;

use super::ViewModel;

const MAX_CATCH_UP_TICKS: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(in crate::app) enum TickerState {
    Idle,
    Running,
    Stopped,
}

/// Repeating per-frame tick source for the force simulation.
///
/// The host calls [`FrameTicker::due_ticks`] once per frame with its clock;
/// once [`FrameTicker::stop`] has been called no further tick is ever yielded.
#[derive(Debug)]
pub(in crate::app) struct FrameTicker {
    state: TickerState,
    interval: f64,
    last_tick: Option<f64>,
}

impl FrameTicker {
    pub(in crate::app) fn new(rate_hz: f32) -> Self {
        let rate = if rate_hz.is_finite() && rate_hz > 0.0 {
            f64::from(rate_hz)
        } else {
            60.0
        };

        Self {
            state: TickerState::Idle,
            interval: 1.0 / rate,
            last_tick: None,
        }
    }

    pub(in crate::app) fn state(&self) -> TickerState {
        self.state
    }

    pub(in crate::app) fn is_running(&self) -> bool {
        self.state == TickerState::Running
    }

    pub(in crate::app) fn start(&mut self) {
        if self.state == TickerState::Idle {
            debug!("frame ticker started");
            self.state = TickerState::Running;
        }
    }

    pub(in crate::app) fn stop(&mut self) {
        if self.state != TickerState::Stopped {
            debug!("frame ticker stopped");
            self.state = TickerState::Stopped;
        }
    }

    /// Number of ticks owed at `now_secs`.
    pub(in crate::app) fn due_ticks(&mut self, now_secs: f64) -> u32 {
        if self.state != TickerState::Running {
            return 0;
        }

        let Some(last) = self.last_tick else {
            self.last_tick = Some(now_secs);
            return 1;
        };

        let elapsed = now_secs - last;
        if elapsed < self.interval {
            return 0;
        }

        let owed = (elapsed / self.interval).floor();
        if owed >= f64::from(MAX_CATCH_UP_TICKS) {
            // Far behind: run a bounded burst and resynchronise to the clock.
            self.last_tick = Some(now_secs);
            return MAX_CATCH_UP_TICKS;
        }

        self.last_tick = Some(last + owed * self.interval);
        owed as u32
    }

    pub(in crate::app) fn repaint_interval(&self) -> Duration {
        Duration::from_secs_f64(self.interval)
    }
}

impl ViewModel {
    pub(in crate::app) fn restart_ticker(&mut self) {
        self.ticker.stop();
        self.ticker = FrameTicker::new(self.config.force.tick_rate_hz);
        if self.strategy.is_continuous() && self.live_simulation {
            self.ticker.start();
        }
    }

    pub(in crate::app) fn shutdown(&mut self) {
        self.ticker.stop();
        self.interaction.end_drag(&mut self.graph, self.config.force.release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idle_ticker_yields_nothing() {
        let mut ticker = FrameTicker::new(60.0);
        assert_eq!(ticker.state(), TickerState::Idle);
        assert_eq!(ticker.due_ticks(0.0), 0);
        assert_eq!(ticker.due_ticks(10.0), 0);
    }

    #[test]
    fn first_frame_after_start_runs_one_tick() {
        let mut ticker = FrameTicker::new(60.0);
        ticker.start();
        assert!(ticker.is_running());
        assert_eq!(ticker.due_ticks(5.0), 1);
        assert_eq!(ticker.due_ticks(5.001), 0);
        assert_eq!(ticker.due_ticks(5.0 + 1.0 / 60.0 + 0.0001), 1);
    }

    #[test]
    fn slow_frames_catch_up_within_a_cap() {
        let mut ticker = FrameTicker::new(10.0);
        ticker.start();
        ticker.due_ticks(0.0);
        assert_eq!(ticker.due_ticks(0.25), 2);
        assert_eq!(ticker.due_ticks(0.31), 1);
        assert_eq!(ticker.due_ticks(60.0), MAX_CATCH_UP_TICKS);
        assert_eq!(ticker.due_ticks(60.05), 0);
    }

    #[test]
    fn stop_is_terminal_and_idempotent() {
        let mut ticker = FrameTicker::new(60.0);
        ticker.start();
        ticker.due_ticks(0.0);
        ticker.stop();
        ticker.stop();
        assert_eq!(ticker.state(), TickerState::Stopped);

        ticker.start();
        assert_eq!(ticker.state(), TickerState::Stopped);
        assert_eq!(ticker.due_ticks(100.0), 0);
    }

    #[test]
    fn invalid_rate_falls_back_to_sixty_hertz() {
        let ticker = FrameTicker::new(0.0);
        assert_eq!(ticker.repaint_interval(), Duration::from_secs_f64(1.0 / 60.0));
        let ticker = FrameTicker::new(f32::NAN);
        assert_eq!(ticker.repaint_interval(), Duration::from_secs_f64(1.0 / 60.0));
    }
}
