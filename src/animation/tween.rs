//! Time driven interpolation of a single transform channel.
//!
//! A [`Tween`] is pure: it maps elapsed time to a value. A [`TweenTrack`]
//! binds a tween to a target channel and owns its own timeline, which starts
//! the first time the track is updated.

use instant::{Duration, Instant};
use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::{
    animation::easing::Easing,
    context::Context,
    data_structures::{scene_graph::NodeId, transform::Transform},
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Repeat {
    /// Number of extra runs after the first one; `Count(0)` plays once.
    Count(u32),
    Infinite,
}

impl Default for Repeat {
    fn default() -> Self {
        Repeat::Count(0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    /// Start value; taken from the target when the track starts if absent.
    pub from: Option<f32>,
    pub to: f32,
    pub duration: Duration,
    pub easing: Easing,
    pub repeat: Repeat,
    /// Reverse direction on every other run (ping-pong).
    pub yoyo: bool,
}

impl Tween {
    pub fn new(to: f32, duration: Duration) -> Self {
        Self {
            from: None,
            to,
            duration,
            easing: Easing::Linear,
            repeat: Repeat::Count(0),
            yoyo: false,
        }
    }

    /// Endless back and forth between `from` and `to`.
    pub fn ping_pong(from: f32, to: f32, duration: Duration) -> Self {
        Self {
            from: Some(from),
            repeat: Repeat::Infinite,
            yoyo: true,
            ..Self::new(to, duration)
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    pub fn with_repeat(mut self, repeat: Repeat, yoyo: bool) -> Self {
        self.repeat = repeat;
        self.yoyo = yoyo;
        self
    }

    fn runs_forward(&self, cycle: u64) -> bool {
        !self.yoyo || cycle % 2 == 0
    }

    fn final_progress(&self) -> f32 {
        let last = match self.repeat {
            Repeat::Count(n) => n as u64,
            Repeat::Infinite => 0,
        };
        if self.runs_forward(last) { 1.0 } else { 0.0 }
    }

    /// Eased progress in `[0, 1]` at `elapsed`, direction already applied.
    pub fn progress(&self, elapsed: Duration) -> f32 {
        let duration = self.duration.as_secs_f64();
        if duration <= 0.0 {
            return self.easing.apply(self.final_progress());
        }
        let elapsed = elapsed.as_secs_f64();
        let cycle = (elapsed / duration).floor() as u64;
        if let Repeat::Count(n) = self.repeat {
            if cycle > n as u64 {
                return self.easing.apply(self.final_progress());
            }
        }
        let linear = ((elapsed - cycle as f64 * duration) / duration) as f32;
        let linear = if self.runs_forward(cycle) { linear } else { 1.0 - linear };
        self.easing.apply(linear)
    }

    /// Value at `elapsed`, starting from `self.from` or `start` when unset.
    pub fn sample(&self, start: f32, elapsed: Duration) -> f32 {
        let from = self.from.unwrap_or(start);
        from + (self.to - from) * self.progress(elapsed)
    }

    pub fn is_finished(&self, elapsed: Duration) -> bool {
        match self.repeat {
            Repeat::Infinite => false,
            // f64 so that huge repeat counts and durations can't overflow
            Repeat::Count(n) => {
                elapsed.as_secs_f64() >= self.duration.as_secs_f64() * (n as f64 + 1.0)
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Y,
    Z,
}

/// Transform channels a tween may drive.
///
/// Yaw is not a channel: it belongs to the per-frame spin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Position(Axis),
    Pitch,
    Roll,
}

impl Channel {
    pub fn read(self, transform: &Transform) -> f32 {
        match self {
            Channel::Position(Axis::X) => transform.position.x,
            Channel::Position(Axis::Y) => transform.position.y,
            Channel::Position(Axis::Z) => transform.position.z,
            Channel::Pitch => transform.rotation.x.0,
            Channel::Roll => transform.rotation.z.0,
        }
    }

    pub fn write(self, transform: &mut Transform, value: f32) {
        match self {
            Channel::Position(Axis::X) => transform.position.x = value,
            Channel::Position(Axis::Y) => transform.position.y = value,
            Channel::Position(Axis::Z) => transform.position.z = value,
            Channel::Pitch => transform.rotation.x.0 = value,
            Channel::Roll => transform.rotation.z.0 = value,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TweenTarget {
    Node(NodeId, Channel),
    /// The camera eye position along one axis.
    Camera(Axis),
}

#[derive(Clone, Debug)]
pub struct TweenTrack {
    pub tween: Tween,
    pub target: TweenTarget,
    started: Option<Instant>,
    origin: Option<f32>,
}

impl TweenTrack {
    pub fn new(target: TweenTarget, tween: Tween) -> Self {
        Self {
            tween,
            target,
            started: None,
            origin: None,
        }
    }

    pub fn started(&self) -> Option<Instant> {
        self.started
    }

    fn read(&self, ctx: &Context) -> Option<f32> {
        match self.target {
            TweenTarget::Node(id, channel) => ctx.graph.get(id).map(|n| channel.read(&n.transform)),
            TweenTarget::Camera(axis) => {
                let eye = ctx.camera.camera.eye;
                Some(match axis {
                    Axis::X => eye.x,
                    Axis::Y => eye.y,
                    Axis::Z => eye.z,
                })
            }
        }
    }

    fn write(&self, ctx: &mut Context, value: f32) -> bool {
        match self.target {
            TweenTarget::Node(id, channel) => match ctx.graph.get_mut(id) {
                Some(node) => {
                    channel.write(&mut node.transform, value);
                    true
                }
                None => false,
            },
            TweenTarget::Camera(axis) => {
                let eye = &mut ctx.camera.camera.eye;
                match axis {
                    Axis::X => eye.x = value,
                    Axis::Y => eye.y = value,
                    Axis::Z => eye.z = value,
                }
                true
            }
        }
    }

    /// Writes the value for `now` into the target.
    ///
    /// Returns `false` once the track is done: its target doesn't exist, or
    /// the tween has played out and its end value has been written.
    pub fn update(&mut self, ctx: &mut Context, now: Instant) -> bool {
        let started = *self.started.get_or_insert(now);
        if self.origin.is_none() {
            self.origin = self.read(ctx);
        }
        let Some(origin) = self.origin else {
            warn!("tween target {:?} does not exist", self.target);
            return false;
        };
        let elapsed = if now > started { now - started } else { Duration::ZERO };
        if !self.write(ctx, self.tween.sample(origin, elapsed)) {
            warn!("tween target {:?} disappeared", self.target);
            return false;
        }
        if self.tween.is_finished(elapsed) {
            debug!("tween on {:?} finished after {:?}", self.target, elapsed);
            return false;
        }
        true
    }
}
