//! Results screen
//!
//! Product cards laid out side by side on a horizontal track and shifted by
//! the carousel's rendered offset. Cards are drawn into a scratch buffer and
//! copied column by column, so a card that is half off the track is clipped
//! rather than squeezed.

use super::{HitMap, HitTarget};
use crate::carousel::CarouselSnapshot;
use crate::catalog::Product;
use crate::theme::{Styles, Theme, UiConstants, UiText};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget, Wrap},
    Frame,
};

/// Render the product carousel
pub fn render_results(
    f: &mut Frame,
    area: Rect,
    products: &[Product],
    snapshot: &CarouselSnapshot,
    cell_width_px: f32,
    hits: &mut HitMap,
) {
    let [count_area, _, body_area, indicator_area, _, restart_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    let count = Paragraph::new(Span::styled(
        format!("{} products match your answers", products.len()),
        Styles::text_secondary(),
    ))
    .alignment(Alignment::Center);
    f.render_widget(count, count_area);

    let track_width = body_area
        .width
        .saturating_sub(UiConstants::ARROW_WIDTH * 2)
        .min(UiConstants::CARD_MAX_WIDTH);
    let [_, prev_area, track, next_area, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(UiConstants::ARROW_WIDTH),
        Constraint::Length(track_width),
        Constraint::Length(UiConstants::ARROW_WIDTH),
        Constraint::Fill(1),
    ])
    .areas(body_area);

    render_arrow(f, prev_area, UiText::ARROW_PREV);
    render_arrow(f, next_area, UiText::ARROW_NEXT);
    hits.push(prev_area, HitTarget::PrevArrow);
    hits.push(next_area, HitTarget::NextArrow);

    hits.set_track(track);
    render_track(f.buffer_mut(), track, products, snapshot, cell_width_px);

    render_indicators(f, indicator_area, snapshot, hits);

    let restart_width = UiText::BTN_RESTART.chars().count() as u16;
    let [_, restart_button, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(restart_width),
        Constraint::Fill(1),
    ])
    .areas(restart_area);
    f.render_widget(
        Paragraph::new(Span::styled(UiText::BTN_RESTART, Styles::button_active())),
        restart_button,
    );
    hits.push(restart_button, HitTarget::Restart);
}

/// Render the empty-result screen with a restart button
pub fn render_no_results(f: &mut Frame, area: Rect, hits: &mut HitMap) {
    let [_, message_area, _, button_area, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(3),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);

    let message = Paragraph::new(vec![
        Line::from(Span::styled(UiText::NO_PRODUCTS, Styles::warning())),
        Line::from(""),
        Line::from(Span::styled(UiText::NO_PRODUCTS_HINT, Styles::text_secondary())),
    ])
    .alignment(Alignment::Center);
    f.render_widget(message, message_area);

    let width = UiText::BTN_RESTART.chars().count() as u16;
    let [_, button, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(width),
        Constraint::Fill(1),
    ])
    .areas(button_area);
    f.render_widget(
        Paragraph::new(Span::styled(UiText::BTN_RESTART, Styles::button_active())),
        button,
    );
    hits.push(button, HitTarget::Restart);
}

fn render_arrow(f: &mut Frame, area: Rect, symbol: &'static str) {
    let [_, middle, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(area);
    f.render_widget(
        Paragraph::new(Span::styled(symbol, Styles::title())).alignment(Alignment::Center),
        middle,
    );
}

fn render_indicators(f: &mut Frame, area: Rect, snapshot: &CarouselSnapshot, hits: &mut HitMap) {
    let (first, shown) = indicator_window(
        snapshot.indicator_count,
        snapshot.active_indicator,
        area.width,
    );
    if shown == 0 {
        return;
    }
    // `shown` fits in `area.width`, so these narrowings cannot truncate
    let slots = u16::try_from(shown).unwrap_or(u16::MAX);
    let width = slots.saturating_mul(2).saturating_sub(1).min(area.width);
    let start = area.x + (area.width - width) / 2;

    let spans: Vec<Span> = (first..first + shown)
        .map(|i| {
            let active = snapshot.active_indicator == Some(i);
            Span::styled(format!("{} ", UiText::INDICATOR), Theme::indicator_style(active))
        })
        .collect();
    f.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect { x: start, width, ..area },
    );

    for (slot, index) in (0..slots).zip(first..first + shown) {
        let x = start.saturating_add(slot.saturating_mul(2));
        if x >= area.right() {
            break;
        }
        hits.push(Rect::new(x, area.y, 1, 1), HitTarget::Indicator(index));
    }
}

/// Range of indicators that fit in `width` columns, as `(first, count)`.
///
/// Indicators take two columns each. When they do not all fit, the window is
/// centred on the active indicator.
pub(super) fn indicator_window(total: usize, active: Option<usize>, width: u16) -> (usize, usize) {
    let capacity = (usize::from(width) + 1) / 2;
    let shown = total.min(capacity);
    if shown == total {
        return (0, shown);
    }
    let active = active.unwrap_or(0).min(total.saturating_sub(1));
    let first = active.saturating_sub(shown / 2).min(total - shown);
    (first, shown)
}

/// Column at which each visible slide starts, relative to the track.
///
/// Slide `i` rests at `i * track_width`; the whole strip is shifted by
/// `offset_cols`. Slides entirely outside the track are omitted.
pub(super) fn visible_slides(len: usize, track_width: u16, offset_cols: i32) -> Vec<(usize, i32)> {
    let width = i64::from(track_width);
    if width == 0 || len == 0 {
        return Vec::new();
    }
    // Only the slides around the offset can overlap the track
    let offset = i64::from(offset_cols);
    let first = (-offset).div_euclid(width).max(0);
    let last = i64::try_from(len - 1).unwrap_or(i64::MAX);
    (first..=first.saturating_add(1).min(last))
        .filter_map(|i| {
            let start = i * width + offset;
            let index = usize::try_from(i).ok()?;
            let start_col = i32::try_from(start).ok()?;
            (start < width && start + width > 0).then_some((index, start_col))
        })
        .collect()
}

fn render_track(
    buf: &mut Buffer,
    track: Rect,
    products: &[Product],
    snapshot: &CarouselSnapshot,
    cell_width_px: f32,
) {
    if track.width == 0 || track.height == 0 {
        return;
    }
    let offset_cols = (snapshot.rendered_offset / cell_width_px).round() as i32;

    for (index, start) in visible_slides(products.len(), track.width, offset_cols) {
        let Some(product) = products.get(index) else {
            continue;
        };
        let mut scratch = Buffer::empty(Rect::new(0, 0, track.width, track.height));
        product_card(product, index, products.len(), index == snapshot.active_index)
            .render(scratch.area, &mut scratch);

        for col in 0..track.width {
            let dest = start + i32::from(col);
            if !(0..i32::from(track.width)).contains(&dest) {
                continue;
            }
            for row in 0..track.height {
                let Some(src) = scratch.cell((col, row)) else {
                    continue;
                };
                let src = src.clone();
                if let Some(cell) = buf.cell_mut((track.x + dest as u16, track.y + row)) {
                    *cell = src;
                }
            }
        }
    }
}

fn product_card(product: &Product, index: usize, total: usize, active: bool) -> Paragraph<'static> {
    let mut lines = vec![Line::from("")];

    if let Some(image) = &product.image {
        lines.push(Line::from(Span::styled(format!("[image] {image}"), Styles::text_muted())));
        lines.push(Line::from(""));
    }

    let mut price_line = Vec::new();
    if let Some(old) = product.old_price_label() {
        price_line.push(Span::styled(old, Styles::old_price()));
        price_line.push(Span::raw("  "));
    }
    price_line.push(Span::styled(product.price_label(), Styles::price()));
    lines.push(Line::from(price_line));
    lines.push(Line::from(""));

    if let Some(colors) = product.colors.as_ref().filter(|c| !c.is_empty()) {
        lines.push(Line::from(Span::styled(colors.join(", "), Styles::text_secondary())));
    }
    if let Some(url) = &product.url {
        lines.push(Line::from(Span::styled(url.clone(), Styles::link())));
    }

    let border = if active {
        Styles::border_active()
    } else {
        Styles::border_inactive()
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ", product.display_name()))
        .title_bottom(Line::from(format!(" {} / {} ", index + 1, total)).right_aligned())
        .style(Styles::panel_bg());

    Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
}
