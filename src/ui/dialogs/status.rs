//! Toast, loading, success and error overlays

use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::form::{Toast, ToastKind, LOADING_MESSAGE};

const SUCCESS_FALLBACK: &str = "Thank you for your feedback!";

/// Top-right notification
pub fn render_toast(frame: &mut Frame, toast: &Toast) {
    let area = frame.area();
    let width = (toast.message.chars().count() as u16 + 4).min(area.width);
    let rect = Rect::new(area.x + area.width.saturating_sub(width), area.y, width, 3.min(area.height));

    let color = match toast.kind {
        ToastKind::Info => Color::Cyan,
        ToastKind::Error => Color::Red,
    };
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(toast.message.as_str()).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(color)),
        ),
        rect,
    );
}

pub fn render_loading(frame: &mut Frame) {
    let area = centered_rect(40, 20, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                LOADING_MESSAGE,
                Style::default().add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL)),
        area,
    );
}

/// Success view, replacing the form body
pub fn render_success(frame: &mut Frame, area: Rect, message: Option<&str>, redirecting: bool) {
    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            "✓ Feedback submitted",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(message.unwrap_or(SUCCESS_FALLBACK).to_string()),
    ];
    if redirecting {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "Redirecting...",
            Style::default().fg(Color::DarkGray),
        )));
    }
    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Green)),
            ),
        area,
    );
}

/// Dismissible error panel
pub fn render_error(frame: &mut Frame, message: &str) {
    let area = centered_rect(60, 30, frame.area());
    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(vec![
            Line::from(Span::styled(
                message.to_string(),
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "[R] Retry   [Esc] Dismiss",
                Style::default().fg(Color::Gray),
            )),
        ])
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(" Submission Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        ),
        area,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_error_panel_shows_message_and_actions() {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal
            .draw(|f| render_error(f, "Duplicate"))
            .unwrap();
        let text = screen_text(&terminal);
        assert!(text.contains("Duplicate"));
        assert!(text.contains("Retry"));
    }

    #[test]
    fn test_toast_fits_narrow_terminal() {
        let mut terminal = Terminal::new(TestBackend::new(20, 5)).unwrap();
        let toast = Toast {
            id: 1,
            message: "Please fill in all required fields correctly.".to_string(),
            kind: ToastKind::Error,
        };
        terminal.draw(|f| render_toast(f, &toast)).unwrap();
    }
}
