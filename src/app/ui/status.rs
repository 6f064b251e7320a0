use eframe::egui::Context;

use super::super::ViewModel;
use super::super::scheduler::TickerState;

const FPS_SAMPLE_WINDOW: usize = 180;

impl ViewModel {
    pub(in crate::app) fn update_fps_counter(&mut self, ctx: &Context) {
        let dt = ctx.input(|input| input.stable_dt);
        if dt <= f32::EPSILON {
            return;
        }

        self.fps_current = (1.0 / dt).clamp(0.0, 1000.0);
        self.fps_samples.push_back(self.fps_current);
        while self.fps_samples.len() > FPS_SAMPLE_WINDOW {
            self.fps_samples.pop_front();
        }
    }

    pub(in crate::app) fn status_text(&self) -> String {
        let mut parts = vec![format!("FPS {:.0}", self.fps_current)];

        if !self.fps_samples.is_empty() {
            let avg = self.fps_samples.iter().sum::<f32>() / self.fps_samples.len() as f32;
            parts.push(format!("avg {avg:.1}"));
        }

        if self.strategy.is_continuous() {
            let state = match self.ticker.state() {
                TickerState::Idle => "paused",
                TickerState::Running => "running",
                TickerState::Stopped => "stopped",
            };
            parts.push(format!("simulation {state}, {} ticks", self.simulated_ticks));
        }

        parts.join(" | ")
    }
}
