//! Ratatui-based prompt implementation
//!
//! Implements the `Prompt` trait with a full-screen list drawn on stderr.
//! Terminal events and the current suggestion cycle are multiplexed with
//! `tokio::select!`; a query change cancels the running cycle before the next
//! one starts, so a stale snapshot can never reach the screen.

use super::events::{EventResult, handle_event};
use super::state::PromptState;
use super::theme::Theme;
use super::widgets::{ChoiceList, HelpBar, PROMPT_HINTS, SearchBar};
use crate::logging::LogGate;
use crate::select::{CancellationToken, SelectError, SuggestionSource};
use crate::ui::error::{Result, UiError};
use crate::ui::traits::{Prompt, PromptConfig};
use crossterm::{
    event::EventStream,
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    text::Span,
};
use std::io::{self, IsTerminal, Stderr};

/// Ratatui-based prompt implementation
#[derive(Debug, Default)]
pub struct RatatuiPrompt {
    theme: Theme,
}

impl RatatuiPrompt {
    /// Create a new ratatui prompt
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set custom theme
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Setup terminal for the prompt
    fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stderr>>> {
        if !io::stdin().is_terminal() || !io::stderr().is_terminal() {
            return Err(UiError::NoTerminal);
        }

        enable_raw_mode()?;
        let mut stderr = io::stderr();
        execute!(stderr, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stderr);
        Terminal::new(backend).map_err(Into::into)
    }

    /// Cleanup terminal after the prompt
    fn cleanup_terminal() -> Result<()> {
        disable_raw_mode()?;
        execute!(io::stderr(), LeaveAlternateScreen)?;
        Ok(())
    }

    /// Render the prompt
    fn render<T>(&self, frame: &mut Frame, state: &mut PromptState<T>, config: &PromptConfig) {
        let area = frame.area();

        let main_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search bar
                Constraint::Min(2),    // Choice list
                Constraint::Length(1), // Help bar
            ])
            .split(area);

        let list_height = main_layout[1].height.saturating_sub(1) as usize;
        state.set_visible_height(config.limit.map_or(list_height, |limit| limit.min(list_height)));

        let search_bar = SearchBar::new(&state.query, state.query_cursor, &state.message, &self.theme);
        frame.render_widget(search_bar, main_layout[0]);

        frame.render_widget(ChoiceList::new(state, &self.theme), main_layout[1]);

        let status = if state.loading {
            Span::styled("loading", self.theme.loading_style())
        } else {
            Span::styled("ready", self.theme.dimmed_style())
        };
        let help_bar = HelpBar::new(PROMPT_HINTS, &self.theme).status(status);
        frame.render_widget(help_bar, main_layout[2]);
    }

    /// Run the prompt event loop
    async fn run_loop<T>(
        &self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
        config: &PromptConfig,
        source: &dyn SuggestionSource<T>,
    ) -> std::result::Result<Option<T>, SelectError> {
        let mut state = PromptState::new(config.message.clone());
        let mut events = EventStream::new();

        let mut token = CancellationToken::new();
        let mut suggestions = source.suggest(String::new(), token.clone());
        let mut settled = false;

        loop {
            terminal
                .draw(|frame| self.render(frame, &mut state, config))
                .map_err(UiError::from)?;

            tokio::select! {
                event = events.next() => {
                    let Some(event) = event else {
                        token.cancel();
                        return Ok(None);
                    };
                    let event = event.map_err(UiError::from)?;

                    match handle_event(&mut state, &event) {
                        EventResult::Confirm => {
                            token.cancel();
                            return Ok(state.take_selected());
                        }
                        EventResult::Abort => {
                            token.cancel();
                            return Ok(None);
                        }
                        EventResult::QueryChanged => {
                            token.cancel();
                            token = CancellationToken::new();
                            suggestions = source.suggest(state.query.clone(), token.clone());
                            settled = false;
                            state.loading = true;
                            state.reset_cursor();
                        }
                        EventResult::Continue | EventResult::Ignored => {}
                    }
                }
                snapshot = suggestions.next(), if !settled => match snapshot {
                    Some(Ok(choices)) => state.set_choices(choices),
                    Some(Err(e)) => {
                        token.cancel();
                        return Err(e);
                    }
                    None => {
                        settled = true;
                        state.loading = false;
                    }
                },
            }
        }
    }
}

impl Prompt for RatatuiPrompt {
    async fn run<T>(
        &mut self,
        config: &PromptConfig,
        source: &dyn SuggestionSource<T>,
    ) -> std::result::Result<Option<T>, SelectError> {
        let logs = LogGate::stderr();
        logs.hold();

        let result = match Self::setup_terminal() {
            Ok(mut terminal) => {
                let result = self.run_loop(&mut terminal, config, source).await;
                if let Err(e) = Self::cleanup_terminal() {
                    tracing::warn!("terminal cleanup failed: {e}");
                }
                result
            }
            Err(e) => Err(e.into()),
        };

        if let Err(e) = logs.release() {
            tracing::warn!("failed to write buffered log lines: {e}");
        }

        result
    }
}
