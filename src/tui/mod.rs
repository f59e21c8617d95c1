pub mod form;
pub mod render;
pub mod state;

use crate::pipeline::Pipeline;
use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    ExecutableCommand,
};
use ratatui::prelude::*;
use state::AppState;
use std::io::stdout;
use std::time::Duration;

/// What a key press asks the event loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Quit,
    Submit,
}

/// Apply a key press to the form. Editing happens in place; anything the
/// loop itself must act on is returned.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Action {
    if key.kind != KeyEventKind::Press {
        return Action::None;
    }
    match key.code {
        KeyCode::Esc => return Action::Quit,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            return Action::Quit
        }
        KeyCode::Enter => return Action::Submit,
        KeyCode::Up | KeyCode::BackTab => state.form.select_prev(),
        KeyCode::Down | KeyCode::Tab => state.form.select_next(),
        KeyCode::Left => state.form.cycle(false),
        KeyCode::Right => state.form.cycle(true),
        KeyCode::Backspace => state.form.backspace(),
        KeyCode::Char(c) => state.form.type_char(c),
        _ => return Action::None,
    }
    state.refresh_metrics();
    Action::None
}

/// Run the TUI until the user quits.
pub async fn run_tui(pipeline: Pipeline) -> Result<()> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;

    let result = tui_loop(&mut terminal, pipeline).await;

    disable_raw_mode()?;
    stdout().execute(LeaveAlternateScreen)?;

    result
}

async fn tui_loop(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    pipeline: Pipeline,
) -> Result<()> {
    let mut state = AppState::new();
    state.push_log("INFO", "Ready".to_string());
    let mut spinner_frame: u8 = 0;

    loop {
        terminal.draw(|f| render::draw(f, &state, spinner_frame))?;

        // Poll for keyboard events with 100ms timeout
        if !event::poll(Duration::from_millis(100))? {
            continue;
        }
        let Event::Key(key) = event::read()? else { continue };

        match handle_key(&mut state, key) {
            Action::Quit => return Ok(()),
            Action::None => {}
            Action::Submit => {
                state.begin_submission();
                let match_state = state.form.to_match_state();
                let stage = match pipeline.predict(&match_state) {
                    Ok(stage) => stage,
                    Err(e) => {
                        state.record_prediction_error(&e);
                        continue;
                    }
                };
                state.record_prediction(stage.clone());

                // Keep redrawing the spinner until the commentary call returns.
                let commentary = pipeline.commentate(&match_state, &stage);
                tokio::pin!(commentary);
                let mut tick = tokio::time::interval(Duration::from_millis(100));
                let commentary = loop {
                    terminal.draw(|f| render::draw(f, &state, spinner_frame))?;
                    spinner_frame = spinner_frame.wrapping_add(1);
                    tokio::select! {
                        c = &mut commentary => break c,
                        _ = tick.tick() => {}
                    }
                };
                state.record_commentary(commentary);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;
    use form::FieldId;

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_quit_keys() {
        let mut state = AppState::new();
        assert_eq!(handle_key(&mut state, press(KeyCode::Esc)), Action::Quit);
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(handle_key(&mut state, ctrl_c), Action::Quit);
    }

    #[test]
    fn test_plain_c_is_not_quit() {
        let mut state = AppState::new();
        assert_eq!(handle_key(&mut state, press(KeyCode::Char('c'))), Action::None);
    }

    #[test]
    fn test_enter_submits() {
        let mut state = AppState::new();
        assert_eq!(handle_key(&mut state, press(KeyCode::Enter)), Action::Submit);
    }

    #[test]
    fn test_editing_refreshes_rates() {
        let mut state = AppState::new();
        for _ in 0..5 {
            handle_key(&mut state, press(KeyCode::Down));
        }
        assert_eq!(state.form.selected_field().id, FieldId::OversLeft);
        // "2.3" -> "2.", which no longer parses
        handle_key(&mut state, press(KeyCode::Backspace));
        assert_eq!(state.metrics.current_run_rate, 0.0);
        handle_key(&mut state, press(KeyCode::Char('3')));
        assert_eq!(state.metrics.current_run_rate, 8.57);
    }

    #[test]
    fn test_release_events_ignored() {
        let mut state = AppState::new();
        let mut key = press(KeyCode::Enter);
        key.kind = KeyEventKind::Release;
        key.state = KeyEventState::NONE;
        assert_eq!(handle_key(&mut state, key), Action::None);
    }
}
