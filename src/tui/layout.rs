//! Stage layout.
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │ CARDSTACK                            09:41 ≡ │  header
//! │        ┌──────────────────────────┐          │
//! │        │ 02                       │          │
//! │        │  Meridian                │          │  stage (cards, back to front)
//! │        └──────────────────────────┘          │
//! │         └────────────────────────┘           │
//! │  Meridian                                    │  dynamic title
//! │  ━━━━━━━━━━━━━━━━━────────────────   02 / 04 │  progress + counter
//! │  scroll · drag · j/k            q to quit    │  hint
//! └──────────────────────────────────────────────┘
//! ```

use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span, Text};
use ratatui::widgets::{Block, Clear, Paragraph, Wrap};
use ratatui::Frame;

use crate::stack::{CardTransform, TextPose};

use super::app::StackApp;

/// Rows left under the front card so deeper cards can peek out.
const STACK_PEEK_ROWS: u16 = 3;
/// Front card width as a fraction of the stage.
const CARD_WIDTH_RATIO: f64 = 0.6;
/// Cells of horizontal drift per degree of tilt, per row of card height.
const TILT_CELLS_PER_DEGREE_ROW: f64 = 0.035;
/// Cards fainter than this are skipped.
const MIN_VISIBLE_OPACITY: f64 = 0.02;

const PALETTE: [(u8, u8, u8); 6] = [
    (236, 112, 99),
    (93, 173, 226),
    (88, 214, 141),
    (244, 208, 63),
    (175, 122, 197),
    (240, 178, 122),
];

/// Base color for a card, cycling through the palette.
pub fn card_color(index: usize) -> (u8, u8, u8) {
    PALETTE[index % PALETTE.len()]
}

/// Darken `base` by brightness and fade it toward the background by opacity.
pub fn shade(base: (u8, u8, u8), brightness: f64, opacity: f64) -> Color {
    let k = (brightness * opacity).clamp(0.0, 1.0);
    let scale = |c: u8| (f64::from(c) * k).round() as u8;
    Color::Rgb(scale(base.0), scale(base.1), scale(base.2))
}

/// Screen rectangle of a card, clipped to the stage. Cards scale around
/// their bottom-center; `y` shifts them by whole rows.
pub fn card_rect(stage: Rect, transform: &CardTransform, units_per_row: f64) -> Option<Rect> {
    if stage.width == 0 || stage.height <= STACK_PEEK_ROWS {
        return None;
    }
    let base_w = (f64::from(stage.width) * CARD_WIDTH_RATIO).max(12.0);
    let base_h = f64::from(stage.height - STACK_PEEK_ROWS);
    let w = (base_w * transform.scale).round();
    let h = (base_h * transform.scale).round();
    if w < 1.0 || h < 1.0 {
        return None;
    }

    let shift_rows = (transform.y / units_per_row).round();
    let tilt = transform.rotation * TILT_CELLS_PER_DEGREE_ROW * h;
    let bottom = f64::from(stage.y) + base_h + shift_rows;
    let center_x = f64::from(stage.x) + f64::from(stage.width) / 2.0 + tilt;

    let left = (center_x - w / 2.0).round();
    let top = bottom - h;

    let clip_left = left.max(f64::from(stage.x));
    let clip_top = top.max(f64::from(stage.y));
    let clip_right = (left + w).min(f64::from(stage.right()));
    let clip_bottom = bottom.min(f64::from(stage.bottom()));
    if clip_right <= clip_left || clip_bottom <= clip_top {
        return None;
    }
    Some(Rect::new(
        clip_left as u16,
        clip_top as u16,
        (clip_right - clip_left) as u16,
        (clip_bottom - clip_top) as u16,
    ))
}

/// Cell offset and leading characters to skip for a title sliding
/// horizontally by `x_percent` of its own width.
pub fn text_offset(text_width: u16, x_percent: f64) -> i32 {
    (f64::from(text_width) * x_percent / 100.0).round() as i32
}

/// Filled and empty cell counts for a progress bar of `width` cells.
pub fn progress_cells(width: u16, ratio: f64) -> (u16, u16) {
    let filled = (f64::from(width) * ratio.clamp(0.0, 1.0)).round() as u16;
    (filled, width - filled.min(width))
}

/// Draw the full TUI layout.
pub fn draw(f: &mut Frame, app: &mut StackApp) {
    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // header
            Constraint::Min(6),    // stage
            Constraint::Length(1), // dynamic title
            Constraint::Length(1), // progress + counter
            Constraint::Length(1), // hint
        ])
        .split(f.area());

    let menu_area = draw_header(f, app, outer[0]);
    draw_stage(f, app, outer[1]);
    draw_title(f, app, outer[2]);
    let counter_area = draw_progress(f, app, outer[3]);
    draw_hint(f, outer[4]);

    // Cache hoverable regions for pointer hit-testing
    app.hover_zones = vec![menu_area, counter_area];

    draw_cursor(f, app);
}

fn draw_header(f: &mut Frame, app: &StackApp, area: Rect) -> Rect {
    f.render_widget(
        Paragraph::new(Span::styled(
            " CARDSTACK",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        area,
    );

    let clock = app.clock.text();
    let clock_width = clock.chars().count() as u16;
    let menu = Rect::new(area.right().saturating_sub(2), area.y, 1.min(area.width), 1);
    let clock_area = Rect::new(
        area.right().saturating_sub(clock_width + 4),
        area.y,
        clock_width.min(area.width),
        1,
    );
    f.render_widget(
        Paragraph::new(Span::styled(clock, Style::default().fg(Color::Gray))),
        clock_area,
    );
    f.render_widget(Paragraph::new("≡"), menu);
    menu
}

fn draw_stage(f: &mut Frame, app: &StackApp, area: Rect) {
    let registry = app.controller.registry();
    for index in registry.paint_order() {
        let (Some(card), Some(transform)) = (registry.card(index), registry.transform(index))
        else {
            continue;
        };
        if transform.opacity <= MIN_VISIBLE_OPACITY {
            continue;
        }
        let Some(rect) = card_rect(area, &transform, app.units_per_row) else {
            continue;
        };

        let base = card_color(index);
        let accent = shade(base, transform.brightness, transform.opacity);
        let ink = shade((230, 230, 230), transform.brightness, transform.opacity);

        let block = Block::bordered()
            .border_style(Style::default().fg(accent))
            .title(Span::styled(
                format!(" {:02} ", index + 1),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            ));

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                card.title.clone(),
                Style::default().fg(accent).add_modifier(Modifier::BOLD),
            )),
        ];
        if let Some(body) = &card.body {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(body.clone(), Style::default().fg(ink))));
        }

        f.render_widget(Clear, rect);
        f.render_widget(
            Paragraph::new(Text::from(lines))
                .block(block)
                .wrap(Wrap { trim: true }),
            rect,
        );
    }
}

fn draw_title(f: &mut Frame, app: &StackApp, area: Rect) {
    let sync = app.controller.sync();
    let content = sync.content();
    let TextPose { x_percent, opacity } = sync.pose();
    if opacity <= MIN_VISIBLE_OPACITY || area.width < 4 {
        return;
    }

    let inner = Rect::new(area.x + 2, area.y, area.width - 4, area.height);
    let width = content.chars().count() as u16;
    let offset = text_offset(width, x_percent);
    let (x, skip) = if offset < 0 {
        (inner.x, offset.unsigned_abs() as u16)
    } else {
        (inner.x.saturating_add(offset as u16), 0)
    };
    if x >= inner.right() {
        return;
    }
    let rect = Rect::new(x, inner.y, inner.right() - x, inner.height);
    let style = Style::default()
        .fg(shade((255, 255, 255), 1.0, opacity))
        .add_modifier(Modifier::BOLD);
    f.render_widget(
        Paragraph::new(Span::styled(content.to_string(), style)).scroll((0, skip)),
        rect,
    );
}

fn draw_progress(f: &mut Frame, app: &StackApp, area: Rect) -> Rect {
    let sync = app.controller.sync();
    let counter = sync.counter();
    let counter_width = counter.chars().count() as u16;
    let counter_area = Rect::new(
        area.right().saturating_sub(counter_width + 2),
        area.y,
        counter_width.min(area.width),
        1,
    );

    let bar_width = area.width.saturating_sub(counter_width + 7);
    let (filled, empty) = progress_cells(bar_width, sync.progress());
    let bar = Line::from(vec![
        Span::raw("  "),
        Span::styled("━".repeat(filled as usize), Style::default().fg(Color::White)),
        Span::styled("─".repeat(empty as usize), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(bar), area);
    f.render_widget(
        Paragraph::new(Span::styled(counter.to_string(), Style::default().fg(Color::Gray))),
        counter_area,
    );
    counter_area
}

fn draw_hint(f: &mut Frame, area: Rect) {
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled("  scroll · drag · j/k", Style::default().fg(Color::DarkGray)),
            Span::styled("   q to quit", Style::default().fg(Color::DarkGray)),
        ])),
        area,
    );
}

fn draw_cursor(f: &mut Frame, app: &StackApp) {
    if !app.cursor.is_visible() {
        return;
    }
    let area = f.area();
    let buf = f.buffer_mut();
    let circle_glyph = if app.cursor.is_enlarged() { "◯" } else { "○" };
    let marks = [
        (app.cursor.circle(), circle_glyph),
        (app.cursor.dot(), "•"),
    ];
    for (cell, glyph) in marks {
        let Some((x, y)) = cell else {
            continue;
        };
        let position = Position::new(x, y);
        if !area.contains(position) {
            continue;
        }
        if let Some(target) = buf.cell_mut(position) {
            target.set_symbol(glyph).set_fg(Color::White);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeckConfig;
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    fn stage() -> Rect {
        Rect::new(0, 1, 80, 23)
    }

    #[test]
    fn front_card_sits_above_peek_rows() {
        let rect = card_rect(stage(), &CardTransform::FRONT, 15.0).unwrap();
        assert_eq!(rect.width, 48);
        assert_eq!(rect.height, 20);
        assert_eq!(rect.bottom(), 1 + 20);
        assert_eq!(rect.x, 16);
    }

    #[test]
    fn deeper_cards_are_smaller_and_lower() {
        let front = card_rect(stage(), &CardTransform::FRONT, 15.0).unwrap();
        let back = card_rect(stage(), &CardTransform::rest(2), 15.0).unwrap();
        assert!(back.width < front.width);
        assert_eq!(back.bottom(), front.bottom() + 2);
    }

    #[test]
    fn thrown_card_leaves_the_stage() {
        let thrown = CardTransform {
            y: -1.2 * 23.0 * 15.0,
            ..CardTransform::FRONT
        };
        assert_eq!(card_rect(stage(), &thrown, 15.0), None);
    }

    #[test]
    fn partially_thrown_card_is_clipped() {
        let lifted = CardTransform {
            y: -10.0 * 15.0,
            ..CardTransform::FRONT
        };
        let rect = card_rect(stage(), &lifted, 15.0).unwrap();
        assert_eq!(rect.y, stage().y);
        assert_eq!(rect.height, 10);
    }

    #[test]
    fn zero_scale_has_no_rect() {
        let gone = CardTransform {
            scale: 0.0,
            ..CardTransform::FRONT
        };
        assert_eq!(card_rect(stage(), &gone, 15.0), None);
    }

    #[test]
    fn shade_scales_channels() {
        assert_eq!(shade((200, 100, 50), 1.0, 1.0), Color::Rgb(200, 100, 50));
        assert_eq!(shade((200, 100, 50), 0.5, 1.0), Color::Rgb(100, 50, 25));
        assert_eq!(shade((200, 100, 50), 1.0, 0.0), Color::Rgb(0, 0, 0));
        assert_eq!(shade((200, 100, 50), -1.0, 1.0), Color::Rgb(0, 0, 0));
    }

    #[test]
    fn text_offset_percent_of_width() {
        assert_eq!(text_offset(10, -110.0), -11);
        assert_eq!(text_offset(10, 110.0), 11);
        assert_eq!(text_offset(10, 0.0), 0);
    }

    #[test]
    fn progress_cells_split() {
        assert_eq!(progress_cells(20, 0.5), (10, 10));
        assert_eq!(progress_cells(20, 1.5), (20, 0));
        assert_eq!(progress_cells(0, 0.5), (0, 0));
    }

    #[test]
    fn draw_renders_counter_and_title() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = StackApp::new(&DeckConfig::builtin()).unwrap();
        terminal.draw(|f| draw(f, &mut app)).unwrap();

        let buffer = terminal.backend().buffer();
        let screen: String = buffer
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(screen.contains("01 / 04"));
        assert!(screen.contains("Horizon"));
        assert!(screen.contains("CARDSTACK"));
        assert_eq!(app.hover_zones.len(), 2);
    }

    #[test]
    fn cursor_drawn_only_after_pointer_moves() {
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut app = StackApp::new(&DeckConfig::builtin()).unwrap();
        let has_dot = |terminal: &Terminal<TestBackend>| {
            terminal
                .backend()
                .buffer()
                .content()
                .iter()
                .any(|cell| cell.symbol() == "•")
        };

        terminal.draw(|f| draw(f, &mut app)).unwrap();
        assert!(!has_dot(&terminal));

        app.on_pointer(40, 12, std::time::Duration::ZERO);
        terminal.draw(|f| draw(f, &mut app)).unwrap();
        assert!(has_dot(&terminal));
        assert_eq!(terminal.backend().buffer()[(40, 12)].symbol(), "•");
    }
}
