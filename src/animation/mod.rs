//! The per-frame animation step.
//!
//! [`AnimationLoop::step`] is what the host calls once per displayed frame:
//! it measures the time since the previous call, spins every registered node
//! by `rate * dt`, moves the camera controller and the tween tracks, and asks
//! the renderer for exactly one frame. It has no failure modes and no
//! pause state; the host simply keeps calling it.

pub mod easing;
pub mod tween;

use instant::{Duration, Instant};
use log::trace;

use crate::{
    animation::tween::TweenTrack,
    context::Context,
    render::{Frame, Renderer},
};

#[derive(Debug)]
pub struct AnimationLoop {
    /// Yaw speed in radians per millisecond.
    rate: f32,
    last_frame: Option<Instant>,
    tracks: Vec<TweenTrack>,
    frames: u64,
}

impl AnimationLoop {
    pub fn new(rate: f32) -> Self {
        Self {
            rate,
            last_frame: None,
            tracks: Vec::new(),
            frames: 0,
        }
    }

    pub fn rate(&self) -> f32 {
        self.rate
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn add_track(&mut self, track: TweenTrack) {
        self.tracks.push(track);
    }

    pub fn tracks(&self) -> &[TweenTrack] {
        &self.tracks
    }

    /// Spins every animated node by `rate * dt`. A zero `dt` changes nothing.
    pub fn advance(&self, ctx: &mut Context, dt: Duration) {
        let dt_ms = dt.as_secs_f32() * 1000.0;
        ctx.graph.spin_animated(self.rate * dt_ms);
    }

    /// Samples all tween tracks at `now`. Finished tracks, and tracks whose
    /// target is gone, are dropped after their last write.
    pub fn update_tweens(&mut self, ctx: &mut Context, now: Instant) {
        self.tracks.retain_mut(|track| track.update(ctx, now));
    }

    /// One frame: advance the scene to `now`, then render it once.
    ///
    /// The first call renders the initial state (zero elapsed time).
    pub fn step(&mut self, ctx: &mut Context, now: Instant, renderer: &mut dyn Renderer) {
        let dt = match self.last_frame {
            Some(last) if now > last => now - last,
            _ => Duration::ZERO,
        };
        self.last_frame = Some(now);

        self.advance(ctx, dt);
        ctx.camera.controller.update(&mut ctx.camera.camera);
        self.update_tweens(ctx, now);

        self.frames += 1;
        trace!("frame {} after {:?}", self.frames, dt);
        renderer.render(&Frame::collect(ctx));
    }
}
