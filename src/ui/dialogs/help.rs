use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use super::centered_rect;
use crate::ui::keybindings::shortcuts_by_category;

#[derive(Debug, Default)]
pub struct HelpDialog {
    pub visible: bool,
}

impl HelpDialog {
    pub fn new() -> Self {
        Self { visible: false }
    }

    pub fn toggle(&mut self) {
        self.visible = !self.visible;
    }

    /// Shortcut table, one heading per category
    fn lines() -> Vec<Line<'static>> {
        let mut lines = vec![
            Line::from(Span::styled(
                "Keyboard Shortcuts",
                Style::default()
                    .add_modifier(Modifier::BOLD)
                    .fg(Color::Cyan),
            )),
            Line::from(""),
        ];

        for (category, shortcuts) in shortcuts_by_category() {
            lines.push(Line::from(Span::styled(
                category.display_name(),
                Style::default().add_modifier(Modifier::BOLD),
            )));
            lines.extend(shortcuts.into_iter().map(|shortcut| {
                Line::from(vec![
                    Span::styled(
                        format!("  {}", shortcut.key_display_padded()),
                        Style::default().fg(Color::Yellow),
                    ),
                    Span::raw(shortcut.description),
                ])
            }));
            lines.push(Line::from(""));
        }

        lines.push(Line::from(Span::styled(
            "Answers are kept when moving between sections. Press any key to close.",
            Style::default().fg(Color::Gray),
        )));
        lines
    }

    pub fn render(&self, frame: &mut Frame) {
        if !self.visible {
            return;
        }

        let area = centered_rect(60, 70, frame.area());
        frame.render_widget(Clear, area);

        let help = Paragraph::new(Self::lines())
            .block(
                Block::default()
                    .title(" Feedback Form Help ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(Color::Cyan)),
            )
            .alignment(Alignment::Left)
            .wrap(Wrap { trim: false });

        frame.render_widget(help, area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_dialog_toggle() {
        let mut dialog = HelpDialog::new();
        assert!(!dialog.visible);

        dialog.toggle();
        assert!(dialog.visible);

        dialog.toggle();
        assert!(!dialog.visible);
    }

    #[test]
    fn test_help_lists_every_category() {
        let text: Vec<String> = HelpDialog::lines().iter().map(ToString::to_string).collect();
        for (category, _) in shortcuts_by_category() {
            assert!(text.iter().any(|line| line == category.display_name()));
        }
        assert!(text.iter().any(|line| line.contains("Submit feedback")));
    }
}
