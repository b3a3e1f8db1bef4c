//! Fixed-cadence render loop.
//!
//! The panel is a singly-owned serial resource, so the loop runs on its own
//! thread: snapshot the target, advance the live state, render or blank, then
//! publish a projection for the status query. Command handling never waits on
//! a tick and a tick never waits on the network.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

use display::{FrameRenderer, MatrixOutput};
use shared::state::LiveState;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::integrator::{Integrator, MAX_TICK_SECONDS};
use crate::store::StateStore;

#[derive(Debug, Clone)]
pub struct TickerConfig {
    pub target_fps: u32,
    /// Seconds of silence before the panel blanks entirely; 0 disables.
    pub blank_after: f32,
    /// Seconds of silence before the animation clock freezes.
    pub freeze_after: f32,
}

/// Per-tick projection of the live state, published for the status query.
#[derive(Debug, Clone)]
pub struct LiveSnapshot {
    pub live: LiveState,
    pub age: f32,
    pub quiet: bool,
}

pub struct RenderLoop {
    store: Arc<StateStore>,
    renderer: Box<dyn FrameRenderer>,
    output: Box<dyn MatrixOutput>,
    config: TickerConfig,
    integrator: Integrator,
    status: watch::Sender<LiveSnapshot>,
    stop: Arc<AtomicBool>,
}

impl RenderLoop {
    pub fn new(
        store: Arc<StateStore>,
        renderer: Box<dyn FrameRenderer>,
        output: Box<dyn MatrixOutput>,
        config: TickerConfig,
        stop: Arc<AtomicBool>,
    ) -> (Self, watch::Receiver<LiveSnapshot>) {
        let live = LiveState::seeded_from(&store.snapshot());
        let (status, status_rx) = watch::channel(LiveSnapshot {
            live: live.clone(),
            age: 0.0,
            quiet: false,
        });
        let render_loop = Self {
            store,
            renderer,
            output,
            config,
            integrator: Integrator::new(live),
            status,
            stop,
        };
        (render_loop, status_rx)
    }

    /// Runs until the stop flag flips, on a thread named for the panel work.
    pub fn spawn(self) -> io::Result<thread::JoinHandle<()>> {
        thread::Builder::new()
            .name("render-tick".into())
            .spawn(move || self.run())
    }

    fn run(mut self) {
        let period = Duration::from_secs_f32(1.0 / self.config.target_fps as f32);
        let start = Instant::now();
        let mut last = start;

        debug!(fps = self.config.target_fps, "render loop started");
        while !self.stop.load(Ordering::Relaxed) {
            let tick_start = Instant::now();
            // A late tick catches up by at most the clamp, never accumulating
            // further debt.
            let dt = tick_start
                .duration_since(last)
                .as_secs_f32()
                .min(MAX_TICK_SECONDS);
            last = tick_start;

            self.tick(start, tick_start, dt);

            if let Some(remaining) = period.checked_sub(tick_start.elapsed()) {
                thread::sleep(remaining);
            }
        }
        debug!("render loop stopped");
    }

    fn tick(&mut self, start: Instant, now: Instant, dt: f32) {
        let target = self.store.snapshot();
        self.integrator.advance(&target, dt);

        let age = now.duration_since(target.updated_at).as_secs_f32();
        let clock = animation_clock(
            seconds_since(start, now),
            seconds_since(start, target.updated_at),
            age,
            self.config.freeze_after,
        );
        let quiet = should_blank(age, self.config.blank_after);

        if quiet {
            self.output.clear();
        } else {
            match self.renderer.render(self.integrator.live(), age, clock) {
                Ok(frame) => self.output.show(&frame),
                Err(error) => {
                    warn!(%error, "frame render failed, blanking this tick");
                    self.output.clear();
                }
            }
        }

        self.status.send_replace(LiveSnapshot {
            live: self.integrator.live().clone(),
            age,
            quiet,
        });
    }
}

fn seconds_since(start: Instant, instant: Instant) -> f32 {
    instant.duration_since(start).as_secs_f32()
}

/// Animation clock for time-varying effects: free-running while the signal is
/// fresh, frozen at the last update once the age passes the threshold. The
/// age itself keeps advancing from wall clock regardless.
pub fn animation_clock(now: f32, updated_at: f32, age: f32, freeze_after: f32) -> f32 {
    if age < freeze_after {
        now
    } else {
        updated_at
    }
}

/// A threshold of 0 disables blanking entirely.
pub fn should_blank(age: f32, blank_after: f32) -> bool {
    blank_after != 0.0 && age >= blank_after
}
