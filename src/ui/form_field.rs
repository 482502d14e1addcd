//! Field widgets for the terminal form.
//!
//! Widgets hold only what the terminal needs to edit a control (text buffer,
//! option cursor, star cursor). Key presses become [`FormEvent`]s; validity
//! marks, counters and star highlights come back from the controller through
//! the view.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tui_textarea::TextArea;

use crate::form::{
    CharacterCount, CounterLevel, FieldInput, FieldKind, FieldMark, FieldSpec, FormEvent,
};

/// Per-field decorations the view tracks from effects
#[derive(Debug, Clone, Copy, Default)]
pub struct FieldDecor<'a> {
    pub focused: bool,
    pub mark: Option<FieldMark>,
    pub shaking: bool,
    pub counter: Option<CharacterCount>,
    pub stars: Option<&'a [bool]>,
}

pub enum FieldWidget {
    /// Star group with a keyboard cursor standing in for the pointer
    Stars { count: u8, cursor: Option<u8> },
    /// Multi-line text using tui-textarea
    TextArea {
        textarea: Box<TextArea<'static>>,
        max_length: Option<usize>,
    },
    /// Radio group over fixed options
    Choice {
        options: Vec<String>,
        selected: Option<usize>,
    },
    /// Numeric input within bounds
    Number { value: String },
    Checkbox { checked: bool },
}

impl FieldWidget {
    pub fn from_spec(spec: &FieldSpec) -> Self {
        match &spec.kind {
            FieldKind::Rating { max, .. } => FieldWidget::Stars {
                count: *max,
                cursor: None,
            },
            FieldKind::Text { max_length } => FieldWidget::TextArea {
                textarea: Box::new(TextArea::default()),
                max_length: *max_length,
            },
            FieldKind::Choice { options } => FieldWidget::Choice {
                options: options.clone(),
                selected: None,
            },
            FieldKind::Number { .. } => FieldWidget::Number {
                value: String::new(),
            },
            FieldKind::Checkbox => FieldWidget::Checkbox { checked: false },
        }
    }

    /// Current control value
    pub fn value(&self) -> FieldInput {
        match self {
            FieldWidget::Stars { .. } => FieldInput::Choice(None),
            FieldWidget::TextArea { textarea, .. } => FieldInput::Text(textarea.lines().join("\n")),
            FieldWidget::Choice { options, selected } => {
                FieldInput::Choice(selected.and_then(|i| options.get(i).cloned()))
            }
            FieldWidget::Number { value } => FieldInput::Text(value.clone()),
            FieldWidget::Checkbox { checked } => FieldInput::Flag(*checked),
        }
    }

    /// Handle a key for the field named `field`; returns the events it produces
    pub fn handle_key(&mut self, field: &str, key: KeyEvent) -> Vec<FormEvent> {
        match self {
            FieldWidget::Stars { count, cursor } => {
                let hover = |value: u8| FormEvent::StarHover {
                    field: field.to_string(),
                    value,
                };
                match key.code {
                    KeyCode::Right => {
                        let next = cursor.map_or(1, |c| (c + 1).min(*count));
                        *cursor = Some(next);
                        vec![hover(next)]
                    }
                    KeyCode::Left => {
                        let prev = cursor.map_or(1, |c| c.saturating_sub(1).max(1));
                        *cursor = Some(prev);
                        vec![hover(prev)]
                    }
                    KeyCode::Char(c) if c.is_ascii_digit() => {
                        let value = c.to_digit(10).map_or(0, |d| d as u8);
                        if value == 0 || value > *count {
                            return Vec::new();
                        }
                        *cursor = Some(value);
                        vec![FormEvent::rating(field, value)]
                    }
                    KeyCode::Enter | KeyCode::Char(' ') => cursor
                        .map(|value| vec![FormEvent::rating(field, value)])
                        .unwrap_or_default(),
                    _ => Vec::new(),
                }
            }
            FieldWidget::TextArea {
                textarea,
                max_length,
            } => {
                let at_limit = max_length.is_some_and(|max| {
                    textarea.lines().iter().map(|l| l.chars().count()).sum::<usize>()
                        + textarea.lines().len().saturating_sub(1)
                        >= max
                });
                let inserts = matches!(key.code, KeyCode::Char(_) | KeyCode::Enter)
                    && !key.modifiers.contains(KeyModifiers::CONTROL);
                if at_limit && inserts {
                    return Vec::new();
                }
                if !textarea.input(key) {
                    return Vec::new();
                }
                vec![FormEvent::text(field, &textarea.lines().join("\n"))]
            }
            FieldWidget::Choice { options, selected } => {
                if options.is_empty() {
                    return Vec::new();
                }
                let last = options.len() - 1;
                let next = match key.code {
                    KeyCode::Right | KeyCode::Down => selected.map_or(0, |i| (i + 1).min(last)),
                    KeyCode::Left | KeyCode::Up => selected.map_or(0, |i| i.saturating_sub(1)),
                    KeyCode::Enter | KeyCode::Char(' ') => selected.unwrap_or(0),
                    _ => return Vec::new(),
                };
                *selected = Some(next);
                vec![FormEvent::choice(field, &options[next])]
            }
            FieldWidget::Number { value } => {
                match key.code {
                    KeyCode::Char(c) if c.is_ascii_digit() || (c == '-' && value.is_empty()) => {
                        value.push(c)
                    }
                    KeyCode::Backspace => {
                        value.pop();
                    }
                    _ => return Vec::new(),
                }
                vec![FormEvent::text(field, value)]
            }
            FieldWidget::Checkbox { checked } => match key.code {
                KeyCode::Enter | KeyCode::Char(' ') => {
                    *checked = !*checked;
                    vec![FormEvent::check(field, *checked)]
                }
                _ => Vec::new(),
            },
        }
    }

    /// Events for focus leaving this field
    pub fn blur(&mut self, field: &str) -> Vec<FormEvent> {
        let mut events = Vec::new();
        if let FieldWidget::Stars { cursor, .. } = self {
            *cursor = None;
            events.push(FormEvent::StarLeave {
                field: field.to_string(),
            });
        }
        events.push(FormEvent::Blur {
            field: field.to_string(),
        });
        events
    }

    /// Rows needed, including the label line
    pub fn render_height(&self) -> u16 {
        match self {
            FieldWidget::TextArea { .. } => 7,
            _ => 2,
        }
    }

    pub fn render(&mut self, frame: &mut Frame, area: Rect, spec: &FieldSpec, decor: FieldDecor) {
        let accent = border_color(&decor);
        let label_style = if decor.focused {
            Style::default().fg(accent).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(accent)
        };
        let mut label = vec![Span::styled(spec.label.clone(), label_style)];
        if spec.required {
            label.push(Span::styled(" *", Style::default().fg(Color::Red)));
        }
        if decor.shaking {
            label.push(Span::styled(
                "  ◀ required",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            ));
        }

        match self {
            FieldWidget::TextArea { textarea, .. } => {
                let mut title = label;
                if let Some(counter) = decor.counter {
                    title.push(Span::styled(
                        format!("  {}/{}", counter.count, counter.max),
                        Style::default().fg(counter_color(counter.level)),
                    ));
                }
                textarea.set_cursor_line_style(Style::default());
                textarea.set_cursor_style(if decor.focused {
                    Style::default().add_modifier(Modifier::REVERSED)
                } else {
                    Style::default()
                });
                textarea.set_block(
                    Block::default()
                        .title(Line::from(title))
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(accent)),
                );
                frame.render_widget(&**textarea, area);
            }
            _ => {
                let control = self.control_line(&decor);
                let para = Paragraph::new(vec![Line::from(label), control]);
                frame.render_widget(para, area);
            }
        }
    }

    fn control_line(&self, decor: &FieldDecor) -> Line<'static> {
        match self {
            FieldWidget::Stars { count, .. } => {
                let filled = decor.stars.unwrap_or(&[]);
                let spans: Vec<Span> = (0..usize::from(*count))
                    .map(|i| {
                        if filled.get(i).copied().unwrap_or(false) {
                            Span::styled("★ ", Style::default().fg(Color::Yellow))
                        } else {
                            Span::styled("☆ ", Style::default().fg(Color::DarkGray))
                        }
                    })
                    .collect();
                Line::from(spans)
            }
            FieldWidget::Choice { options, selected } => {
                let spans: Vec<Span> = options
                    .iter()
                    .enumerate()
                    .map(|(i, option)| {
                        if Some(i) == *selected {
                            Span::styled(
                                format!("(•) {}  ", option),
                                Style::default().add_modifier(Modifier::BOLD),
                            )
                        } else {
                            Span::styled(format!("( ) {}  ", option), Style::default().fg(Color::Gray))
                        }
                    })
                    .collect();
                Line::from(spans)
            }
            FieldWidget::Number { value } => {
                let cursor = if decor.focused { "|" } else { "" };
                Line::from(format!("{}{}", value, cursor))
            }
            FieldWidget::Checkbox { checked } => {
                Line::from(if *checked { "[x] yes" } else { "[ ] no" })
            }
            FieldWidget::TextArea { .. } => Line::default(),
        }
    }
}

fn border_color(decor: &FieldDecor) -> Color {
    match (decor.shaking, decor.mark) {
        (true, _) | (_, Some(FieldMark::Invalid)) => Color::Red,
        (_, Some(FieldMark::Valid)) => Color::Green,
        _ if decor.focused => Color::Cyan,
        _ => Color::Gray,
    }
}

fn counter_color(level: CounterLevel) -> Color {
    match level {
        CounterLevel::Normal => Color::DarkGray,
        CounterLevel::Warning => Color::Yellow,
        CounterLevel::Danger => Color::Red,
    }
}
