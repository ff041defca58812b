//! Transition engine — owns the stack state and choreographs each move.
//!
//! `advance` throws the front card off the top and pulls the rest of the
//! stack forward; `retreat` drops the previous card back in and pushes the
//! stack back. Either call returns immediately. The guard that blocks
//! overlapping transitions is released by `tick` once the last card tween
//! of the transition has actually finished, and the optional completion
//! handle resolves at that same moment.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::oneshot;
use tracing::debug;

use crate::anim::Ease;
use crate::config::{secs, DeckConfig, Timing};
use crate::error::StackResult;

use super::gesture::Direction;
use super::registry::{CardRegistry, CardTransform};
use super::sync::{TextSynchronizer, TextTiming};

/// Viewport height (layout units) assumed until the host reports one.
pub const DEFAULT_VIEWPORT_HEIGHT: f64 = 600.0;

/// Active index plus the in-flight guard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackState {
    pub active_index: usize,
    pub is_animating: bool,
}

/// Delivered through a [`Completion`] when a transition settles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionDone {
    pub direction: Direction,
    pub active_index: usize,
    pub settled_at: Duration,
}

/// Resolves when the transition that returned it has settled.
pub type Completion = oneshot::Receiver<TransitionDone>;

#[derive(Debug)]
struct InFlight {
    direction: Direction,
    settles_at: Duration,
    done: oneshot::Sender<TransitionDone>,
}

#[derive(Debug)]
pub struct StackController {
    registry: CardRegistry,
    state: StackState,
    sync: TextSynchronizer,
    timing: Timing,
    viewport_height: f64,
    rng: StdRng,
    in_flight: Option<InFlight>,
}

impl StackController {
    pub fn new(registry: CardRegistry, timing: Timing, rng: StdRng) -> Self {
        let title = registry.card(0).map(|c| c.title.as_str()).unwrap_or_default();
        let sync = TextSynchronizer::new(0, title, registry.len(), TextTiming::from(&timing));
        Self {
            registry,
            state: StackState::default(),
            sync,
            timing,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            rng,
            in_flight: None,
        }
    }

    /// Validate the deck and build a controller resting on card 0.
    pub fn from_config(config: &DeckConfig) -> StackResult<Self> {
        config.validate()?;
        let registry = CardRegistry::from_specs(&config.cards)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Ok(Self::new(registry, config.timing.clone(), rng))
    }

    pub fn state(&self) -> StackState {
        self.state
    }

    pub fn active_index(&self) -> usize {
        self.state.active_index
    }

    pub fn is_animating(&self) -> bool {
        self.state.is_animating
    }

    pub fn total(&self) -> usize {
        self.registry.len()
    }

    pub fn registry(&self) -> &CardRegistry {
        &self.registry
    }

    pub fn sync(&self) -> &TextSynchronizer {
        &self.sync
    }

    pub fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    /// Sets how far a thrown card travels. Running tweens keep their targets.
    pub fn set_viewport_height(&mut self, height: f64) {
        self.viewport_height = height.max(0.0);
    }

    /// True once no transition, card tween, or text phase is running.
    pub fn is_settled(&self) -> bool {
        !self.state.is_animating && !self.registry.is_animating() && self.sync.is_idle()
    }

    /// Route a normalized gesture.
    pub fn dispatch(&mut self, direction: Direction, now: Duration) -> Option<Completion> {
        match direction {
            Direction::Forward => self.advance(now),
            Direction::Backward => self.retreat(now),
        }
    }

    /// Move to the next card. No-op at the last card or mid-transition.
    pub fn advance(&mut self, now: Duration) -> Option<Completion> {
        if !self.accepts(Direction::Forward) {
            return None;
        }
        let current = self.state.active_index;
        let next = current + 1;
        let from = self.registry.transform(current)?;

        let max_tilt = self.timing.max_throw_rotation_deg;
        let rotation = self.rng.random_range(-max_tilt..=max_tilt);
        let thrown = CardTransform {
            y: -self.throw_distance(),
            rotation,
            opacity: 0.0,
            ..from
        };
        self.registry.animate(
            current,
            thrown,
            now,
            secs(self.timing.throw_secs),
            Ease::Power4In,
        );

        self.registry.animate(
            next,
            CardTransform::FRONT,
            now + secs(self.timing.front_delay_secs),
            secs(self.timing.front_secs),
            Ease::Power3Out,
        );
        self.restack(next, now);

        self.state.active_index = next;
        self.notify_sync(now);
        Some(self.begin(Direction::Forward, now))
    }

    /// Move back to the previous card. No-op at the first card or mid-transition.
    pub fn retreat(&mut self, now: Duration) -> Option<Completion> {
        if !self.accepts(Direction::Backward) {
            return None;
        }
        self.state.active_index -= 1;
        let prev = self.state.active_index;
        let from = self.registry.transform(prev)?;

        self.registry.set(
            prev,
            CardTransform {
                y: -self.throw_distance(),
                rotation: 0.0,
                opacity: 1.0,
                ..from
            },
        );
        self.registry.animate(
            prev,
            CardTransform::FRONT,
            now,
            secs(self.timing.drop_in_secs),
            Ease::Power3Out,
        );
        self.restack(prev, now);

        self.notify_sync(now);
        Some(self.begin(Direction::Backward, now))
    }

    /// Sample every animation and release the guard once the transition settles.
    pub fn tick(&mut self, now: Duration) {
        self.registry.tick(now);
        self.sync.tick(now);

        let settled = self
            .in_flight
            .as_ref()
            .is_some_and(|flight| now >= flight.settles_at);
        if !settled {
            return;
        }
        if let Some(flight) = self.in_flight.take() {
            self.state.is_animating = false;
            debug!(
                direction = ?flight.direction,
                active = self.state.active_index,
                "transition settled"
            );
            // The caller may have dropped the handle.
            let _ = flight.done.send(TransitionDone {
                direction: flight.direction,
                active_index: self.state.active_index,
                settled_at: flight.settles_at,
            });
        }
    }

    fn accepts(&self, direction: Direction) -> bool {
        if self.state.is_animating {
            debug!(?direction, "gesture dropped: transition in flight");
            return false;
        }
        let target = self.state.active_index as i64 + i64::from(direction.sign());
        (0..self.registry.len() as i64).contains(&target)
    }

    fn throw_distance(&self) -> f64 {
        self.timing.throw_distance * self.viewport_height
    }

    /// Move every card behind `front` to its rest transform relative to it.
    fn restack(&mut self, front: usize, now: Duration) {
        let duration = secs(self.timing.restack_secs);
        for i in front + 1..self.registry.len() {
            self.registry.animate(
                i,
                CardTransform::rest(i - front),
                now,
                duration,
                Ease::Power3Out,
            );
        }
    }

    fn notify_sync(&mut self, now: Duration) {
        let index = self.state.active_index;
        if let Some(card) = self.registry.card(index) {
            self.sync.update_text(index, &card.title, now);
        }
    }

    fn begin(&mut self, direction: Direction, now: Duration) -> Completion {
        let settles_at = self.registry.settles_at().unwrap_or(now);
        let (done, completion) = oneshot::channel();
        self.state.is_animating = true;
        self.in_flight = Some(InFlight {
            direction,
            settles_at,
            done,
        });
        debug!(
            ?direction,
            active = self.state.active_index,
            settles_ms = settles_at.saturating_sub(now).as_millis() as u64,
            "transition started"
        );
        completion
    }
}
