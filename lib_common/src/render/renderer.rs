//! # Renderer
//!
//! Side-effecting operations over an injected [`Registry`]. Writing to a
//! target the registry does not hold is logged and ignored.

use super::registry::{CardId, Registry, SlotId, SlotState};
use crate::utils::format::Tone;
use crate::utils::sentiment::SentimentBucket;
use std::sync::Arc;

/// Writes text, state and styling into render targets.
#[derive(Debug, Clone)]
pub struct Renderer {
    registry: Arc<Registry>,
}

impl Renderer {
    /// Creates a renderer over `registry`.
    pub fn new(registry: Arc<Registry>) -> Self {
        Self { registry }
    }

    /// The registry this renderer writes to.
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    /// Puts a slot into the loading state, replacing any error or value.
    pub fn show_loading(&self, slot: SlotId) {
        self.slot(slot, |s| s.state = SlotState::Loading);
    }

    /// Clears the error flag of a card.
    pub fn clear_error(&self, card: CardId) {
        self.card(card, |c| c.errored = false);
    }

    /// Shows `message` in `slot` as a failure and flags the owning card.
    ///
    /// Whatever value the slot showed before is overwritten.
    pub fn show_error(&self, card: CardId, slot: SlotId, message: &str) {
        self.slot(slot, |s| {
            s.state = SlotState::Error(message.to_string());
            s.tone = None;
            s.marker = None;
        });
        self.card(card, |c| c.errored = true);
    }

    /// Populates a slot with text.
    pub fn set_value(&self, slot: SlotId, text: impl Into<String>) {
        let text = text.into();
        self.slot(slot, |s| s.state = SlotState::Populated(text));
    }

    /// Up, down or neutral styling from the sign of `value`.
    pub fn set_directional_class(&self, slot: SlotId, value: f64) {
        self.set_tone(slot, Tone::of(value));
    }

    /// Sets a tone directly.
    pub fn set_tone(&self, slot: SlotId, tone: Tone) {
        self.slot(slot, |s| s.tone = Some(tone));
    }

    /// Populates a bar slot with its marker at `position` percent (clamped to 100).
    pub fn set_bar(&self, slot: SlotId, position: u8) {
        let position = position.min(100);
        self.slot(slot, |s| {
            s.state = SlotState::Populated(format!("{position}%"));
            s.marker = Some(position);
        });
    }

    /// Replaces the card's previous fear & greed class with `bucket`.
    pub fn set_sentiment_class(&self, card: CardId, bucket: SentimentBucket) {
        self.card(card, |c| c.sentiment = Some(bucket));
    }

    /// Toggles the refresh indicator.
    pub fn set_spinning(&self, spinning: bool) {
        self.registry.set_spinning(spinning);
    }

    fn slot(&self, id: SlotId, f: impl FnOnce(&mut super::registry::Slot)) {
        if !self.registry.update_slot(id, f) {
            log::warn!("render target {:?} is not registered", id);
        }
    }

    fn card(&self, id: CardId, f: impl FnOnce(&mut super::registry::Card)) {
        if !self.registry.update_card(id, f) {
            log::warn!("card {:?} is not registered", id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn renderer() -> Renderer {
        Renderer::new(Arc::new(Registry::standard()))
    }

    #[test]
    fn populated_replaces_loading_and_error() {
        let r = renderer();
        r.show_error(CardId::Btc, SlotId::BtcPrice, "Load failed");
        r.show_loading(SlotId::BtcPrice);
        assert_eq!(r.registry().snapshot().slot(SlotId::BtcPrice).unwrap().state, SlotState::Loading);

        r.set_value(SlotId::BtcPrice, "$1.00");
        let snap = r.registry().snapshot();
        assert_eq!(snap.slot(SlotId::BtcPrice).unwrap().state, SlotState::Populated("$1.00".into()));
    }

    #[test]
    fn error_overwrites_previous_value() {
        let r = renderer();
        r.set_value(SlotId::DxyPrice, "104.000");
        r.set_directional_class(SlotId::DxyPrice, 1.0);
        r.show_error(CardId::Dxy, SlotId::DxyPrice, "Load failed");

        let snap = r.registry().snapshot();
        let slot = snap.slot(SlotId::DxyPrice).unwrap();
        assert_eq!(slot.state, SlotState::Error("Load failed".into()));
        assert_eq!(slot.tone, None);
        assert!(snap.card(CardId::Dxy).unwrap().errored);

        r.clear_error(CardId::Dxy);
        assert!(!r.registry().snapshot().card(CardId::Dxy).unwrap().errored);
    }

    #[test]
    fn sentiment_class_is_replaced() {
        let r = renderer();
        r.set_sentiment_class(CardId::CryptoFg, SentimentBucket::Fear);
        r.set_sentiment_class(CardId::CryptoFg, SentimentBucket::Greed);
        let snap = r.registry().snapshot();
        assert_eq!(snap.card(CardId::CryptoFg).unwrap().sentiment, Some(SentimentBucket::Greed));
    }

    #[test]
    fn directional_classes() {
        let r = renderer();
        r.set_directional_class(SlotId::BtcChange, -0.5);
        assert_eq!(r.registry().snapshot().slot(SlotId::BtcChange).unwrap().tone, Some(Tone::Down));
        r.set_directional_class(SlotId::BtcChange, 0.0);
        assert_eq!(r.registry().snapshot().slot(SlotId::BtcChange).unwrap().tone, Some(Tone::Neutral));
    }

    #[test]
    fn bar_marker_is_clamped() {
        let r = renderer();
        r.set_bar(SlotId::StockFgBar, 130);
        let snap = r.registry().snapshot();
        assert_eq!(snap.slot(SlotId::StockFgBar).unwrap().marker, Some(100));
    }
}
