//! Card registry — the ordered deck and each card's animated transform.
//!
//! Index 0 is the top of the stack. A card's resting look depends only on
//! its depth behind the active card: every step back shrinks it by 5 %,
//! drops it 15 units and darkens it by 15 %.

use std::time::Duration;

use tracing::warn;

use crate::anim::{Animated, Ease, Lerp};
use crate::config::CardSpec;
use crate::error::{StackError, StackResult};

/// Scale lost per depth step.
pub const SCALE_STEP: f64 = 0.05;
/// Vertical offset (layout units) gained per depth step.
pub const Y_STEP: f64 = 15.0;
/// Brightness lost per depth step.
pub const BRIGHTNESS_STEP: f64 = 0.15;

/// One presentable card. Identity is `index`.
#[derive(Debug, Clone, PartialEq)]
pub struct Card {
    pub index: usize,
    pub title: String,
    pub body: Option<String>,
}

/// Visual state of a card.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardTransform {
    pub scale: f64,
    /// Vertical offset in layout units; negative is up.
    pub y: f64,
    pub brightness: f64,
    /// Degrees, clockwise.
    pub rotation: f64,
    pub opacity: f64,
}

impl CardTransform {
    /// The active card: full size, no offset, full brightness.
    pub const FRONT: Self = Self {
        scale: 1.0,
        y: 0.0,
        brightness: 1.0,
        rotation: 0.0,
        opacity: 1.0,
    };

    /// Resting transform for a card `depth` steps behind the front.
    /// Scale and brightness bottom out at zero.
    pub fn rest(depth: usize) -> Self {
        let d = depth as f64;
        Self {
            scale: (1.0 - SCALE_STEP * d).clamp(0.0, 1.0),
            y: Y_STEP * d,
            brightness: (1.0 - BRIGHTNESS_STEP * d).clamp(0.0, 1.0),
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

impl Lerp for CardTransform {
    fn lerp(self, to: Self, t: f64) -> Self {
        Self {
            scale: self.scale.lerp(to.scale, t),
            y: self.y.lerp(to.y, t),
            brightness: self.brightness.lerp(to.brightness, t),
            rotation: self.rotation.lerp(to.rotation, t),
            opacity: self.opacity.lerp(to.opacity, t),
        }
    }
}

/// First depth whose brightness reaches the floor.
fn first_dark_depth() -> usize {
    (1.0 / BRIGHTNESS_STEP).ceil() as usize
}

#[derive(Debug, Clone)]
struct Slot {
    card: Card,
    transform: Animated<CardTransform>,
}

/// The deck, in stacking order.
#[derive(Debug, Clone)]
pub struct CardRegistry {
    slots: Vec<Slot>,
}

impl CardRegistry {
    /// Build the registry and place every card at its rest transform
    /// relative to index 0.
    pub fn initialize(cards: Vec<Card>) -> StackResult<Self> {
        if cards.is_empty() {
            return Err(StackError::EmptyDeck);
        }
        if let Some(card) = cards.iter().find(|c| c.title.trim().is_empty()) {
            return Err(StackError::BlankTitle { index: card.index });
        }
        if cards.len() > first_dark_depth() {
            warn!(
                cards = cards.len(),
                "cards from depth {} onward render fully dark",
                first_dark_depth()
            );
        }

        let slots = cards
            .into_iter()
            .enumerate()
            .map(|(i, mut card)| {
                card.index = i;
                Slot {
                    card,
                    transform: Animated::new(CardTransform::rest(i)),
                }
            })
            .collect();
        Ok(Self { slots })
    }

    /// Build from deck file entries, numbering cards in order.
    pub fn from_specs(specs: &[CardSpec]) -> StackResult<Self> {
        let cards = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| Card {
                index,
                title: spec.title.clone(),
                body: spec.body.clone(),
            })
            .collect();
        Self::initialize(cards)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn card(&self, index: usize) -> Option<&Card> {
        self.slots.get(index).map(|s| &s.card)
    }

    pub fn cards(&self) -> impl Iterator<Item = &Card> {
        self.slots.iter().map(|s| &s.card)
    }

    /// Current (last sampled) transform.
    pub fn transform(&self, index: usize) -> Option<CardTransform> {
        self.slots.get(index).map(|s| s.transform.value())
    }

    /// Where the card is heading once its tween settles.
    pub fn target(&self, index: usize) -> Option<CardTransform> {
        self.slots.get(index).map(|s| s.transform.target())
    }

    /// Stacking order: higher draws on top. Lower indices sit above.
    pub fn z_index(&self, index: usize) -> usize {
        self.slots.len().saturating_sub(index)
    }

    /// Indices from the bottom of the stack to the top, for painting.
    pub fn paint_order(&self) -> impl Iterator<Item = usize> {
        let mut order: Vec<usize> = (0..self.slots.len()).collect();
        order.sort_by_key(|&index| self.z_index(index));
        order.into_iter()
    }

    pub(crate) fn set(&mut self, index: usize, transform: CardTransform) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.transform.set(transform);
        }
    }

    pub(crate) fn animate(
        &mut self,
        index: usize,
        to: CardTransform,
        start: Duration,
        duration: Duration,
        ease: Ease,
    ) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.transform.animate_to(to, start, duration, ease);
        }
    }

    /// Latest end time across running tweens.
    pub fn settles_at(&self) -> Option<Duration> {
        self.slots
            .iter()
            .filter_map(|s| s.transform.settles_at())
            .max()
    }

    pub fn is_animating(&self) -> bool {
        self.slots.iter().any(|s| s.transform.is_animating())
    }

    pub fn tick(&mut self, now: Duration) {
        for slot in &mut self.slots {
            slot.transform.tick(now);
        }
    }
}
