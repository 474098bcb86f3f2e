//! # Render-Target Registry
//!
//! Holds every named slot and card of the board. Each slot is in exactly one
//! of three states (loading, error, populated); the state is an enum so two
//! can never be visible at once.
//!
//! The registry is shared (`Arc`) between the renderer, which mutates it, and
//! presentation surfaces, which wait on [`Registry::changed`] and read
//! [`Registry::snapshot`]. Overlapping refresh cycles may write the same slot;
//! the last write wins.

use crate::utils::format::Tone;
use crate::utils::locale::Locale;
use crate::utils::sentiment::SentimentBucket;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::Notify;

/// A named text slot on the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SlotId {
    /// BTC spot price.
    BtcPrice,
    /// BTC 24h change.
    BtcChange,
    /// ETH spot price.
    EthPrice,
    /// ETH 24h change.
    EthChange,
    /// Crypto fear & greed score.
    CryptoFgValue,
    /// Crypto fear & greed label.
    CryptoFgLabel,
    /// Crypto fear & greed bar.
    CryptoFgBar,
    /// BTC perpetual premium.
    FundingValue,
    /// Last funding rate and settlement countdown.
    FundingInfo,
    /// NASDAQ composite level.
    NasdaqPrice,
    /// NASDAQ composite change.
    NasdaqChange,
    /// S&P 500 level.
    Sp500Price,
    /// S&P 500 change.
    Sp500Change,
    /// US dollar index level.
    DxyPrice,
    /// US dollar index change.
    DxyChange,
    /// Equity fear & greed score.
    StockFgValue,
    /// Equity fear & greed label.
    StockFgLabel,
    /// Equity fear & greed bar.
    StockFgBar,
    /// Time of the last finished refresh cycle.
    LastUpdate,
}

/// A metric card grouping a value slot, a detail slot and optionally a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum CardId {
    /// Bitcoin spot.
    Btc,
    /// Ether spot.
    Eth,
    /// Crypto fear & greed.
    CryptoFg,
    /// BTC perpetual premium and funding.
    Funding,
    /// NASDAQ composite.
    Nasdaq,
    /// S&P 500.
    Sp500,
    /// US dollar index.
    Dxy,
    /// Equity fear & greed.
    StockFg,
}

impl CardId {
    /// Every card in display order.
    pub const ALL: [CardId; 8] = [
        CardId::Btc,
        CardId::Eth,
        CardId::CryptoFg,
        CardId::Funding,
        CardId::Nasdaq,
        CardId::Sp500,
        CardId::Dxy,
        CardId::StockFg,
    ];

    /// Card heading.
    pub fn title(&self, locale: Locale) -> &'static str {
        match (self, locale) {
            (CardId::Btc, _) => "BTC/USDT",
            (CardId::Eth, _) => "ETH/USDT",
            (CardId::Nasdaq, _) => "NASDAQ",
            (CardId::Sp500, _) => "S&P 500",
            (CardId::Dxy, _) => "DXY",
            (CardId::CryptoFg, Locale::En) => "Crypto Fear & Greed",
            (CardId::CryptoFg, Locale::ZhCn) => "加密恐慌贪婪指数",
            (CardId::Funding, Locale::En) => "BTC Perp Premium",
            (CardId::Funding, Locale::ZhCn) => "BTC 实时溢价率",
            (CardId::StockFg, Locale::En) => "Stock Fear & Greed",
            (CardId::StockFg, Locale::ZhCn) => "美股恐慌贪婪指数",
        }
    }

    /// The slots belonging to this card: value, detail and optional bar.
    pub fn slots(&self) -> (SlotId, SlotId, Option<SlotId>) {
        match self {
            CardId::Btc => (SlotId::BtcPrice, SlotId::BtcChange, None),
            CardId::Eth => (SlotId::EthPrice, SlotId::EthChange, None),
            CardId::CryptoFg => (SlotId::CryptoFgValue, SlotId::CryptoFgLabel, Some(SlotId::CryptoFgBar)),
            CardId::Funding => (SlotId::FundingValue, SlotId::FundingInfo, None),
            CardId::Nasdaq => (SlotId::NasdaqPrice, SlotId::NasdaqChange, None),
            CardId::Sp500 => (SlotId::Sp500Price, SlotId::Sp500Change, None),
            CardId::Dxy => (SlotId::DxyPrice, SlotId::DxyChange, None),
            CardId::StockFg => (SlotId::StockFgValue, SlotId::StockFgLabel, Some(SlotId::StockFgBar)),
        }
    }
}

/// The visible state of a slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "text", rename_all = "lowercase")]
pub enum SlotState {
    /// Waiting for data.
    Loading,
    /// Load failed; carries the message shown in place of the value.
    Error(String),
    /// Showing a value.
    Populated(String),
}

/// A slot: state plus styling.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Slot {
    /// Loading, error or populated.
    #[serde(flatten)]
    pub state: SlotState,
    /// Directional styling, if any.
    pub tone: Option<Tone>,
    /// Bar marker position in percent (bar slots only).
    pub marker: Option<u8>,
}

impl Default for Slot {
    fn default() -> Self {
        Self {
            state: SlotState::Loading,
            tone: None,
            marker: None,
        }
    }
}

/// Card-level styling.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Card {
    /// Set while the card's last load failed.
    pub errored: bool,
    /// Fear & greed styling class, sentiment cards only.
    pub sentiment: Option<SentimentBucket>,
}

/// Point-in-time copy of the whole board.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BoardSnapshot {
    /// Slots by id.
    pub slots: BTreeMap<SlotId, Slot>,
    /// Cards by id.
    pub cards: BTreeMap<CardId, Card>,
    /// Refresh indicator is spinning.
    pub spinning: bool,
}

impl BoardSnapshot {
    /// Slot lookup.
    pub fn slot(&self, id: SlotId) -> Option<&Slot> {
        self.slots.get(&id)
    }

    /// Card lookup.
    pub fn card(&self, id: CardId) -> Option<&Card> {
        self.cards.get(&id)
    }

    /// Text of a slot regardless of state; empty while loading.
    pub fn text(&self, id: SlotId) -> &str {
        match self.slots.get(&id).map(|s| &s.state) {
            Some(SlotState::Error(t)) | Some(SlotState::Populated(t)) => t,
            _ => "",
        }
    }
}

/// The set of render targets the core writes to.
#[derive(Debug, Default)]
pub struct Registry {
    board: Mutex<BoardSnapshot>,
    changed: Notify,
}

impl Registry {
    /// A registry holding exactly the given targets, all slots loading.
    pub fn with_targets(slots: impl IntoIterator<Item = SlotId>, cards: impl IntoIterator<Item = CardId>) -> Self {
        let board = BoardSnapshot {
            slots: slots.into_iter().map(|id| (id, Slot::default())).collect(),
            cards: cards.into_iter().map(|id| (id, Card::default())).collect(),
            spinning: false,
        };
        Self {
            board: Mutex::new(board),
            changed: Notify::new(),
        }
    }

    /// The full dashboard layout: every card, its slots and the last-updated slot.
    pub fn standard() -> Self {
        let mut slots = vec![SlotId::LastUpdate];
        for card in CardId::ALL {
            let (value, detail, bar) = card.slots();
            slots.push(value);
            slots.push(detail);
            slots.extend(bar);
        }
        let mut registry = Self::with_targets(slots, CardId::ALL);
        // Nothing has been fetched yet; the timestamp slot starts blank rather than loading.
        if let Some(slot) = registry.board_mut().slots.get_mut(&SlotId::LastUpdate) {
            slot.state = SlotState::Populated(String::new());
        }
        registry
    }

    /// Copies the current board.
    pub fn snapshot(&self) -> BoardSnapshot {
        self.lock().clone()
    }

    /// Resolves after the next mutation. Mutations made while nobody waits are
    /// coalesced into one wake-up.
    pub async fn changed(&self) {
        self.changed.notified().await;
    }

    /// Applies `f` to a slot. Returns `false` when the slot is not registered.
    pub(crate) fn update_slot(&self, id: SlotId, f: impl FnOnce(&mut Slot)) -> bool {
        let found = {
            let mut board = self.lock();
            match board.slots.get_mut(&id) {
                Some(slot) => {
                    f(slot);
                    true
                }
                None => false,
            }
        };
        if found {
            self.changed.notify_one();
        }
        found
    }

    /// Applies `f` to a card. Returns `false` when the card is not registered.
    pub(crate) fn update_card(&self, id: CardId, f: impl FnOnce(&mut Card)) -> bool {
        let found = {
            let mut board = self.lock();
            match board.cards.get_mut(&id) {
                Some(card) => {
                    f(card);
                    true
                }
                None => false,
            }
        };
        if found {
            self.changed.notify_one();
        }
        found
    }

    pub(crate) fn set_spinning(&self, spinning: bool) {
        self.lock().spinning = spinning;
        self.changed.notify_one();
    }

    fn board_mut(&mut self) -> &mut BoardSnapshot {
        self.board.get_mut().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock(&self) -> MutexGuard<'_, BoardSnapshot> {
        // A panic while holding the lock leaves plain data behind; keep serving it.
        self.board.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
