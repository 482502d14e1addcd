//! Terminal surface: a view model updated by effects, rendered each frame.

use std::collections::{HashMap, HashSet};

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Wrap},
    Frame,
};

use super::dialogs::{self, HelpDialog};
use super::form_field::{FieldDecor, FieldWidget};
use crate::form::review::RECOMMEND_LABEL;
use crate::form::{
    section_title, BadgeStyle, CharacterCount, Effect, FieldMark, FieldSpec, NavButtons,
    ReviewSummary, ScrollTarget, Section, Toast,
};
use crate::runtime::Surface;

/// A schema field paired with its terminal control
pub struct FieldSlot {
    pub spec: FieldSpec,
    pub widget: FieldWidget,
}

#[derive(Debug, Default)]
pub struct FormView {
    pub section: Section,
    pub progress: f64,
    pub nav: Option<NavButtons>,
    pub marks: HashMap<String, FieldMark>,
    pub counters: HashMap<String, CharacterCount>,
    pub stars: HashMap<String, Vec<bool>>,
    pub shaking: HashSet<String>,
    pub toast: Option<Toast>,
    pub review: Option<ReviewSummary>,
    pub loading: bool,
    /// Set once the submission succeeded, holding the server message
    pub success: Option<Option<String>>,
    pub error: Option<String>,
    pub navigate: Option<String>,
    /// Focus/scroll request not yet consumed by the app
    pub focus_request: Option<ScrollTarget>,
}

impl Surface for FormView {
    fn apply(&mut self, effect: &Effect) {
        match effect {
            Effect::ShowSection { section, .. } => self.section = *section,
            Effect::UpdateProgress { percent } => self.progress = *percent,
            Effect::UpdateNavigation(nav) => self.nav = Some(*nav),
            Effect::MarkField { field, mark } => {
                self.marks.insert(field.clone(), *mark);
            }
            Effect::UpdateCounter { field, count } => {
                self.counters.insert(field.clone(), *count);
            }
            Effect::HighlightStars { field, stars } => {
                self.stars.insert(field.clone(), stars.clone());
            }
            Effect::Shake { fields } => self.shaking.extend(fields.iter().cloned()),
            Effect::StopShake { fields } => {
                for field in fields {
                    self.shaking.remove(field);
                }
            }
            Effect::ScrollTo(target) => self.focus_request = Some(target.clone()),
            Effect::ShowToast(toast) => self.toast = Some(toast.clone()),
            Effect::DismissToast { id } => {
                if self.toast.as_ref().is_some_and(|t| t.id == *id) {
                    self.toast = None;
                }
            }
            Effect::RenderReview(summary) => self.review = Some(summary.clone()),
            Effect::SetLoading(loading) => self.loading = *loading,
            Effect::ShowSuccess { message } => self.success = Some(message.clone()),
            Effect::ShowError { message } => self.error = Some(message.clone()),
            Effect::HideError => self.error = None,
            Effect::Navigate { url } => self.navigate = Some(url.clone()),
            Effect::StartTimer { .. } | Effect::Submit(_) => {
                tracing::warn!(?effect, "Scheduled effect reached the view");
            }
        }
    }
}

impl FormView {
    fn decor<'a>(&'a self, name: &str, focused: bool) -> FieldDecor<'a> {
        FieldDecor {
            focused,
            mark: self.marks.get(name).copied(),
            shaking: self.shaking.contains(name),
            counter: self.counters.get(name).copied(),
            stars: self.stars.get(name).map(Vec::as_slice),
        }
    }

    /// Whether key presses should reach the form
    pub fn is_blocked(&self) -> bool {
        self.loading || self.success.is_some()
    }

    pub fn render(
        &self,
        frame: &mut Frame,
        slots: &mut [FieldSlot],
        focused: Option<&str>,
        help: &HelpDialog,
    ) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(1),
                Constraint::Length(1),
            ])
            .split(frame.area());

        self.render_progress(frame, chunks[0]);
        if let Some(message) = &self.success {
            dialogs::render_success(frame, chunks[1], message.as_deref(), self.navigate.is_some());
        } else {
            self.render_section(frame, chunks[1], slots, focused);
        }
        self.render_nav(frame, chunks[2]);
        frame.render_widget(
            Paragraph::new(Line::from(Span::styled(
                " F1 help · Tab fields · PgDn next · PgUp back · Ctrl+S submit · Ctrl+C quit",
                Style::default().fg(Color::DarkGray),
            ))),
            chunks[3],
        );

        if self.loading {
            dialogs::render_loading(frame);
        }
        if let Some(message) = &self.error {
            dialogs::render_error(frame, message);
        }
        if let Some(toast) = &self.toast {
            dialogs::render_toast(frame, toast);
        }
        help.render(frame);
    }

    fn render_progress(&self, frame: &mut Frame, area: Rect) {
        let title = format!(
            " Session Feedback · Section {} · {} ",
            self.section,
            section_title(self.section)
        );
        let gauge = Gauge::default()
            .block(Block::default().title(title).borders(Borders::ALL))
            .gauge_style(Style::default().fg(Color::Cyan))
            .ratio((self.progress / 100.0).clamp(0.0, 1.0))
            .label(format!("{:.0}%", self.progress));
        frame.render_widget(gauge, area);
    }

    fn render_section(
        &self,
        frame: &mut Frame,
        area: Rect,
        slots: &mut [FieldSlot],
        focused: Option<&str>,
    ) {
        let block = Block::default()
            .title(format!(" {} ", section_title(self.section)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan));
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let review_lines = if self.section.is_last() {
            self.review.as_ref().map(review_lines).unwrap_or_default()
        } else {
            Vec::new()
        };

        let mut constraints = Vec::new();
        if !review_lines.is_empty() {
            constraints.push(Constraint::Length(review_lines.len() as u16));
        }
        let visible: Vec<&mut FieldSlot> = slots
            .iter_mut()
            .filter(|slot| slot.spec.section == self.section)
            .collect();
        constraints.extend(
            visible
                .iter()
                .map(|slot| Constraint::Length(slot.widget.render_height() + 1)),
        );
        constraints.push(Constraint::Min(0));

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(constraints)
            .split(inner);

        let mut row = 0;
        if !review_lines.is_empty() {
            frame.render_widget(
                Paragraph::new(review_lines).wrap(Wrap { trim: false }),
                rows[row],
            );
            row += 1;
        }
        for slot in visible {
            let is_focused = focused == Some(slot.spec.name.as_str());
            let decor = self.decor(&slot.spec.name, is_focused);
            slot.widget.render(frame, rows[row], &slot.spec, decor);
            row += 1;
        }
    }

    fn render_nav(&self, frame: &mut Frame, area: Rect) {
        let Some(nav) = self.nav else {
            return;
        };
        let enabled = Style::default().fg(Color::White).add_modifier(Modifier::BOLD);
        let disabled = Style::default().fg(Color::DarkGray);

        let mut spans = vec![Span::styled(
            " [PgUp] Previous ",
            if nav.prev_enabled { enabled } else { disabled },
        )];
        if let Some(label) = nav.next.label() {
            spans.push(Span::styled(format!("  [PgDn] {} ", label), enabled));
        }
        if nav.submit_visible {
            spans.push(Span::styled(
                "  [Ctrl+S] Submit Feedback ",
                Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
            ));
        }
        frame.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn review_lines(summary: &ReviewSummary) -> Vec<Line<'static>> {
    let heading = Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD);
    let mut lines = vec![Line::from(Span::styled("Ratings Summary", heading))];
    for rating in &summary.ratings {
        let mut spans = vec![Span::raw(format!("  {:<26}", rating.label))];
        if rating.rating.is_some() {
            spans.push(Span::styled(rating.glyphs(), Style::default().fg(Color::Yellow)));
            spans.push(Span::raw(format!("  {}", rating.value_label())));
        } else {
            spans.push(Span::styled(rating.value_label(), Style::default().fg(Color::DarkGray)));
        }
        lines.push(Line::from(spans));
    }

    lines.push(Line::from(Span::styled("Feedback Summary", heading)));
    let badge_color = match summary.recommend.style {
        BadgeStyle::Positive => Color::Green,
        BadgeStyle::Negative => Color::Red,
    };
    lines.push(Line::from(vec![
        Span::raw(format!("  {:<26}", RECOMMEND_LABEL)),
        Span::styled(
            format!(" {} ", summary.recommend.text),
            Style::default().fg(Color::Black).bg(badge_color),
        ),
    ]));
    for text in &summary.texts {
        lines.push(Line::from(vec![
            Span::raw(format!("  {:<26}", text.label)),
            Span::raw(text.text.clone()),
        ]));
    }
    lines.push(Line::default());
    lines
}
