//! Question screen
//!
//! Step progress, the question title, answer options (plain text or color
//! swatches) and the Back/Next buttons.

use super::{HitMap, HitTarget};
use crate::quiz::StepView;
use crate::swatch::FALLBACK_SWATCH;
use crate::theme::{Styles, Theme, UiConstants, UiText};
use crate::types::QuestionKind;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Render one quiz step
pub fn render_question(f: &mut Frame, area: Rect, step: &StepView, cursor: usize, hits: &mut HitMap) {
    let answers_height = u16::try_from(step.answers.len())
        .unwrap_or(u16::MAX)
        .saturating_mul(UiConstants::ANSWER_HEIGHT);
    let [progress_area, _, title_area, answers_area, _, buttons_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(2),
        Constraint::Length(answers_height),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_progress(f, progress_area, step);

    let title = Paragraph::new(Line::from(Span::styled(step.title.clone(), Styles::title())))
        .alignment(Alignment::Center);
    f.render_widget(title, title_area);

    render_answers(f, answers_area, step, cursor, hits);
    render_buttons(f, buttons_area, step, hits);
}

fn render_progress(f: &mut Frame, area: Rect, step: &StepView) {
    let mut spans: Vec<Span> = step
        .progress
        .iter()
        .flat_map(|&reached| [Span::styled(UiText::STEP_MARK, Theme::step_style(reached)), Span::raw(" ")])
        .collect();
    spans.push(Span::styled(
        format!(" Step {} of {}", step.index + 1, step.total),
        Styles::text_muted(),
    ));
    f.render_widget(Paragraph::new(Line::from(spans)).alignment(Alignment::Center), area);
}

fn render_answers(f: &mut Frame, area: Rect, step: &StepView, cursor: usize, hits: &mut HitMap) {
    let rows = Layout::vertical(
        step.answers
            .iter()
            .map(|_| Constraint::Length(UiConstants::ANSWER_HEIGHT)),
    )
    .split(area);

    let width = step
        .answers
        .iter()
        .map(|a| {
            u16::try_from(a.label.chars().count())
                .unwrap_or(u16::MAX)
                .saturating_add(10)
        })
        .max()
        .unwrap_or(0)
        .min(area.width);

    for (i, (answer, row)) in step.answers.iter().zip(rows.iter()).enumerate() {
        let focused = i == cursor;
        let marker = if focused { "›" } else { " " };

        let mut spans = vec![
            Span::styled(format!("{marker} "), Styles::title()),
            Span::styled(format!("{}. ", i + 1), Styles::text_muted()),
        ];
        if step.kind == QuestionKind::Color {
            let swatch = answer.swatch.unwrap_or(FALLBACK_SWATCH);
            spans.push(Span::styled("██", Style::default().fg(Theme::swatch_color(&swatch))));
            spans.push(Span::raw(if swatch.known { " " } else { "?" }));
        }
        spans.push(Span::styled(
            format!(" {} ", answer.label),
            Theme::answer_style(answer.selected),
        ));

        let row_area = Rect {
            x: row.x + (row.width.saturating_sub(width)) / 2,
            width,
            ..*row
        };
        f.render_widget(Paragraph::new(Line::from(spans)), row_area);
        hits.push(
            row_area,
            HitTarget::Answer {
                step: step.index,
                answer: answer.label.clone(),
            },
        );
    }
}

fn render_buttons(f: &mut Frame, area: Rect, step: &StepView, hits: &mut HitMap) {
    let next_label = if step.is_last {
        UiText::BTN_SEE_RESULTS
    } else {
        UiText::BTN_NEXT
    };
    let back_width = UiText::BTN_BACK.chars().count() as u16;
    let next_width = next_label.chars().count() as u16;

    let [_, back_area, _, next_area, _] = Layout::horizontal([
        Constraint::Fill(1),
        Constraint::Length(back_width),
        Constraint::Length(4),
        Constraint::Length(next_width),
        Constraint::Fill(1),
    ])
    .areas(area);

    f.render_widget(
        Paragraph::new(Span::styled(UiText::BTN_BACK, Theme::button_style(step.back_enabled))),
        back_area,
    );
    f.render_widget(
        Paragraph::new(Span::styled(next_label, Theme::button_style(step.next_enabled))),
        next_area,
    );

    // Disabled buttons are not clickable
    if step.back_enabled {
        hits.push(back_area, HitTarget::Back);
    }
    if step.next_enabled {
        hits.push(next_area, HitTarget::Next);
    }
}
