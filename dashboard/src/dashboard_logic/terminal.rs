use colored::*;
use lib_common::render::{BoardSnapshot, CardId, Registry, Slot, SlotId, SlotState};
use lib_common::utils::format::Tone;
use lib_common::utils::locale::Locale;
use lib_common::utils::sentiment::SentimentBucket;
use std::io::Write;
use std::sync::Arc;
use tokio::sync::broadcast;

const TITLE_WIDTH: usize = 22;
const VALUE_WIDTH: usize = 14;
const BAR_WIDTH: usize = 30;
const CLEAR_SCREEN: &str = "\x1B[2J\x1B[H";

/// Redraws the board after every registry change until shutdown.
pub async fn run(registry: Arc<Registry>, locale: Locale, mut shutdown: broadcast::Receiver<()>) {
    loop {
        draw(&render_board(&registry.snapshot(), locale));

        tokio::select! {
            _ = shutdown.recv() => break,
            _ = registry.changed() => {}
        }
    }
    draw(&render_board(&registry.snapshot(), locale));
    println!();
}

fn draw(board: &str) {
    let mut stdout = std::io::stdout().lock();
    let _ = write!(stdout, "{CLEAR_SCREEN}{board}");
    let _ = stdout.flush();
}

/// Renders a snapshot as colored text, one card per row.
pub fn render_board(snapshot: &BoardSnapshot, locale: Locale) -> String {
    let mut out = String::new();

    let indicator = if snapshot.spinning { "⟳" } else { " " };
    out.push_str(&format!(
        "{} {}  {}\n\n",
        "Market Dashboard".bold(),
        indicator.cyan(),
        snapshot.text(SlotId::LastUpdate).dimmed()
    ));

    for card in CardId::ALL {
        out.push_str(&render_card(snapshot, card, locale));
    }

    out.push_str(&format!("\n{}\n", hint(locale).dimmed()));
    out
}

fn render_card(snapshot: &BoardSnapshot, card: CardId, locale: Locale) -> String {
    let (value_slot, detail_slot, bar_slot) = card.slots();
    let state = snapshot.card(card).cloned().unwrap_or_default();

    let title = format!("{:<TITLE_WIDTH$}", card.title(locale));
    let title = match (state.errored, state.sentiment) {
        (true, _) => title.red().bold(),
        (false, Some(bucket)) => paint_sentiment(&title, bucket).bold(),
        (false, None) => title.bold(),
    };

    let mut line = format!(
        "{}{}{}\n",
        title,
        paint_slot(snapshot.slot(value_slot), VALUE_WIDTH),
        paint_slot(snapshot.slot(detail_slot), 0)
    );

    if let Some(marker) = bar_slot.and_then(|id| snapshot.slot(id)).and_then(|s| s.marker) {
        let bar = gauge_bar(marker, BAR_WIDTH);
        let bar = match state.sentiment {
            Some(bucket) => paint_sentiment(&bar, bucket),
            None => bar.normal(),
        };
        line.push_str(&format!("{:TITLE_WIDTH$}{}\n", "", bar));
    }
    line
}

fn paint_slot(slot: Option<&Slot>, width: usize) -> ColoredString {
    let Some(slot) = slot else {
        return format!("{:<width$}", "").normal();
    };
    match &slot.state {
        SlotState::Loading => format!("{:<width$}", "…").dimmed(),
        SlotState::Error(message) => format!("{message:<width$}").red(),
        SlotState::Populated(text) => {
            let text = format!("{text:<width$}");
            match slot.tone {
                Some(Tone::Up) => text.green(),
                Some(Tone::Down) => text.red(),
                Some(Tone::Neutral) => text.dimmed(),
                None => text.normal(),
            }
        }
    }
}

fn paint_sentiment(text: &str, bucket: SentimentBucket) -> ColoredString {
    match bucket {
        SentimentBucket::ExtremeFear => text.truecolor(220, 38, 38),
        SentimentBucket::Fear => text.truecolor(249, 115, 22),
        SentimentBucket::Neutral => text.truecolor(234, 179, 8),
        SentimentBucket::Greed => text.truecolor(132, 204, 22),
        SentimentBucket::ExtremeGreed => text.truecolor(34, 197, 94),
    }
}

/// `[-----|----]` with the marker at `position` percent of the width.
fn gauge_bar(position: u8, width: usize) -> String {
    let at = (usize::from(position.min(100)) * (width - 1)) / 100;
    let track: String = (0..width).map(|i| if i == at { '|' } else { '-' }).collect();
    format!("[{track}]")
}

fn hint(locale: Locale) -> &'static str {
    match locale {
        Locale::En => "Enter: refresh    q: quit",
        Locale::ZhCn => "回车: 刷新    q: 退出",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_lands_on_the_track() {
        assert_eq!(gauge_bar(0, 5), "[|----]");
        assert_eq!(gauge_bar(100, 5), "[----|]");
        assert_eq!(gauge_bar(50, 5), "[--|--]");
    }

    #[test]
    fn board_lists_every_card_and_error_text() {
        colored::control::set_override(false);
        let mut snapshot = Registry::standard().snapshot();
        if let Some(slot) = snapshot.slots.get_mut(&SlotId::DxyPrice) {
            slot.state = SlotState::Error("Load failed".into());
        }
        if let Some(slot) = snapshot.slots.get_mut(&SlotId::BtcPrice) {
            slot.state = SlotState::Populated("$67,012.50".into());
        }

        let board = render_board(&snapshot, Locale::En);
        for card in CardId::ALL {
            assert!(board.contains(card.title(Locale::En)), "missing {card:?}");
        }
        assert!(board.contains("$67,012.50"));
        assert!(board.contains("Load failed"));
        assert!(board.contains("q: quit"));
    }
}
