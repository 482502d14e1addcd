use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::config::Config;
use crate::form::{FormController, FormEvent, FormSchema, ScrollTarget, Section};
use crate::runtime::FormRuntime;
use crate::submit::Submitter;
use crate::ui::dialogs::HelpDialog;
use crate::ui::form_field::FieldWidget;
use crate::ui::keybindings::FormAction;
use crate::ui::terminal_guard::TerminalGuard;
use crate::ui::view::{FieldSlot, FormView};

/// How the terminal form ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppExit {
    Quit,
    /// Submission succeeded and the endpoint asked for a redirect
    Redirect(String),
}

pub struct App {
    config: Config,
    runtime: FormRuntime,
    view: FormView,
    slots: Vec<FieldSlot>,
    /// Index into the current section's fields
    focus: usize,
    help_dialog: HelpDialog,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config, submitter: Arc<dyn Submitter>) -> Self {
        let controller = FormController::new(FormSchema::feedback(), config.timing.to_timings());
        let slots = controller
            .schema()
            .fields
            .iter()
            .map(|spec| FieldSlot {
                spec: spec.clone(),
                widget: FieldWidget::from_spec(spec),
            })
            .collect();

        Self {
            config,
            runtime: FormRuntime::new(controller, submitter),
            view: FormView::default(),
            slots,
            focus: 0,
            help_dialog: HelpDialog::new(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<AppExit> {
        let guard = TerminalGuard::new()?;
        let mut terminal = Terminal::new(CrosstermBackend::new(io::stdout()))?;

        self.runtime.start(&mut self.view);
        self.apply_focus_request();

        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);
        let mut exit = AppExit::Quit;

        while !self.should_quit {
            // Timers and submission results
            while let Some(form_event) = self.runtime.try_next_event() {
                self.dispatch(form_event);
            }

            if let Some(location) = self.view.navigate.take() {
                exit = AppExit::Redirect(self.config.endpoint.redirect_target(&location));
                break;
            }

            let focused = self.focused_name();
            terminal.draw(|f| {
                self.view
                    .render(f, &mut self.slots, focused.as_deref(), &self.help_dialog)
            })?;

            if event::poll(tick_rate)? {
                match event::read()? {
                    Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Event::Resize(..) => self.dispatch(FormEvent::Resize),
                    _ => {}
                }
            }
        }

        guard.release();
        terminal.show_cursor()?;
        Ok(exit)
    }

    fn dispatch(&mut self, event: FormEvent) {
        self.runtime.dispatch(event, &mut self.view);
        self.apply_focus_request();
    }

    fn section_slots(&self) -> Vec<usize> {
        let section: Section = self.view.section;
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.spec.section == section)
            .map(|(i, _)| i)
            .collect()
    }

    fn focused_slot(&self) -> Option<usize> {
        self.section_slots().get(self.focus).copied()
    }

    fn focused_name(&self) -> Option<String> {
        self.focused_slot().map(|i| self.slots[i].spec.name.clone())
    }

    fn apply_focus_request(&mut self) {
        let Some(target) = self.view.focus_request.take() else {
            return;
        };
        match target {
            ScrollTarget::Field(name) => {
                let slots = self.section_slots();
                if let Some(position) = slots.iter().position(|&i| self.slots[i].spec.name == name) {
                    self.focus = position;
                }
            }
            ScrollTarget::Top | ScrollTarget::Section(_) => self.focus = 0,
            ScrollTarget::Success | ScrollTarget::ErrorPanel => {}
        }
    }

    /// Blur the focused field before focus or section changes
    fn blur_focused(&mut self) {
        let Some(index) = self.focused_slot() else {
            return;
        };
        let slot = &mut self.slots[index];
        let events = slot.widget.blur(&slot.spec.name);
        for event in events {
            self.dispatch(event);
        }
    }

    fn move_focus(&mut self, forward: bool) {
        let count = self.section_slots().len();
        if count == 0 {
            return;
        }
        self.blur_focused();
        self.focus = if forward {
            (self.focus + 1) % count
        } else {
            (self.focus + count - 1) % count
        };
    }

    fn dump_state(&self) {
        match serde_json::to_string(self.runtime.controller().state()) {
            Ok(json) => tracing::info!(state = %json, "Form data"),
            Err(err) => tracing::warn!(error = %err, "Failed to serialize form data"),
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if self.help_dialog.visible {
            self.help_dialog.toggle();
            return;
        }

        let action = FormAction::from_key(&key);
        match action {
            Some(FormAction::Quit) => {
                self.should_quit = true;
                return;
            }
            Some(FormAction::ToggleHelp) => {
                self.help_dialog.toggle();
                return;
            }
            Some(FormAction::DumpState) => {
                self.dump_state();
                return;
            }
            _ => {}
        }

        if self.view.success.is_some() {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('q')) {
                self.should_quit = true;
            }
            return;
        }
        if self.view.is_blocked() {
            return;
        }

        if self.view.error.is_some() {
            match key.code {
                KeyCode::Char('r') | KeyCode::Char('R') => return self.dispatch(FormEvent::Retry),
                KeyCode::Esc => return self.dispatch(FormEvent::DismissError),
                _ => {}
            }
        }

        match action {
            Some(FormAction::NextSection) => {
                self.blur_focused();
                self.dispatch(FormEvent::Next);
            }
            Some(FormAction::PrevSection) => {
                self.blur_focused();
                self.dispatch(FormEvent::Prev);
            }
            Some(FormAction::Submit) => {
                self.blur_focused();
                self.dispatch(FormEvent::Submit);
            }
            Some(FormAction::FocusNext) => self.move_focus(true),
            Some(FormAction::FocusPrev) => self.move_focus(false),
            Some(FormAction::Quit | FormAction::ToggleHelp | FormAction::DumpState) => {}
            None if key.code == KeyCode::Esc => {
                if let Some(id) = self.view.toast.as_ref().map(|t| t.id) {
                    self.dispatch(FormEvent::DismissToast { id });
                }
            }
            None => {
                let Some(index) = self.focused_slot() else {
                    return;
                };
                let slot = &mut self.slots[index];
                let events = slot.widget.handle_key(&slot.spec.name, key);
                for event in events {
                    self.dispatch(event);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::submit::{SubmissionOutcome, SubmissionPayload};
    use async_trait::async_trait;
    use crossterm::event::KeyModifiers;

    struct Accepting;

    #[async_trait]
    impl Submitter for Accepting {
        async fn submit(&self, _payload: &SubmissionPayload) -> SubmissionOutcome {
            SubmissionOutcome::Success {
                message: None,
                redirect: None,
            }
        }
    }

    fn app() -> App {
        let mut app = App::new(Config::default(), Arc::new(Accepting));
        app.runtime.start(&mut app.view);
        app.apply_focus_request();
        app
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[tokio::test]
    async fn test_digits_rate_focused_field() {
        let mut app = app();
        assert_eq!(app.focused_name().as_deref(), Some("content_quality"));

        press(&mut app, KeyCode::Char('4'));

        assert_eq!(
            app.runtime.controller().state().text("content_quality"),
            Some("4")
        );
    }

    #[tokio::test]
    async fn test_tab_cycles_focus_within_section() {
        let mut app = app();
        press(&mut app, KeyCode::Tab);
        assert_eq!(app.focused_name().as_deref(), Some("clarity"));
        press(&mut app, KeyCode::BackTab);
        press(&mut app, KeyCode::BackTab);
        assert_eq!(app.focused_name().as_deref(), Some("apply_likelihood"));
    }

    #[tokio::test]
    async fn test_failed_next_focuses_first_invalid_field() {
        let mut app = app();
        press(&mut app, KeyCode::Char('5'));
        press(&mut app, KeyCode::PageDown);

        assert_eq!(app.view.section, Section::FIRST);
        assert_eq!(app.focused_name().as_deref(), Some("clarity"));
        assert!(app.view.toast.is_some());
    }

    #[tokio::test]
    async fn test_rated_section_advances() {
        let mut app = app();
        for _ in 0..5 {
            press(&mut app, KeyCode::Char('3'));
            press(&mut app, KeyCode::Tab);
        }
        press(&mut app, KeyCode::PageDown);

        assert_eq!(app.view.section, Section::new(2));
        assert_eq!(app.focused_name().as_deref(), Some("most_valuable"));
    }

    #[tokio::test]
    async fn test_ctrl_c_quits() {
        let mut app = app();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }
}
