//! TUI model and update — session state plus focus and action dispatch.

use std::sync::Arc;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use uuid::Uuid;

use super::editor::TextArea;
use crate::commands::{self, Action};
use crate::config::Config;
use crate::llm::Inference;
use crate::session::{SessionState, SessionStore};

/// Which editor pane receives keystrokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Procedure,
    Requirements,
}

/// Status bar content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    Ready,
    Busy(&'static str),
    Info(String),
    Error(String),
}

/// The TUI model: one session, two live editors, a status line.
pub struct App {
    pool: Arc<dyn Inference>,
    config: Config,
    pub store: SessionStore,
    pub session_id: Uuid,
    /// Live buffer for the procedure input pane.
    pub procedure: TextArea,
    /// Live buffer for the editable requirements pane.
    pub requirements: TextArea,
    pub focus: Focus,
    pub status: Status,
    pub should_quit: bool,
}

impl App {
    pub fn new(pool: Arc<dyn Inference>, config: Config) -> Self {
        let mut store = SessionStore::new();
        let session_id = store.create();
        Self {
            pool,
            config,
            store,
            session_id,
            procedure: TextArea::new(),
            requirements: TextArea::new(),
            focus: Focus::Procedure,
            status: Status::Ready,
            should_quit: false,
        }
    }

    /// Current session state for rendering.
    pub fn session(&self) -> &SessionState {
        static EMPTY: SessionState = SessionState::EMPTY;
        self.store.state(&self.session_id).unwrap_or(&EMPTY)
    }

    /// Map a key press to an action, if it is an action key.
    pub fn action_for_key(&self, key: &KeyEvent) -> Option<Action> {
        match key.code {
            KeyCode::F(2) => Some(Action::ReadProcedure),
            KeyCode::F(3) => Some(Action::SaveRequirements),
            KeyCode::F(4) => Some(Action::ConvertToPyspark),
            KeyCode::F(5) => Some(Action::CalculateAccuracy),
            _ => None,
        }
    }

    /// Handle a non-action key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('q') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Procedure => Focus::Requirements,
                    Focus::Requirements => Focus::Procedure,
                };
            }
            _ => {
                let editor = match self.focus {
                    Focus::Procedure => &mut self.procedure,
                    Focus::Requirements => &mut self.requirements,
                };
                editor.handle_key(key);
            }
        }
    }

    /// Run one action to completion against the session.
    ///
    /// The editors are the live view of the editable fields, so their content
    /// is synced into the session before the handler reads it.
    pub async fn dispatch(&mut self, action: Action) {
        let edited_requirements = self.requirements.content().to_string();
        let state = self.store.state_mut(self.session_id);
        state.procedure = self.procedure.content().to_string();

        let result = match action {
            Action::ReadProcedure => {
                commands::read_procedure(state, self.pool.as_ref(), &self.config).await
            }
            Action::SaveRequirements => commands::save_requirements(state, &edited_requirements),
            Action::ConvertToPyspark => {
                commands::convert_to_pyspark(state, self.pool.as_ref(), &self.config).await
            }
            Action::CalculateAccuracy => {
                commands::calculate_accuracy(state, self.pool.as_ref(), &self.config).await
            }
        };

        // Stage 1 rewrites the editable requirements pane.
        if action == Action::ReadProcedure && result.is_ok() {
            let requirements = self.session().requirements.clone();
            self.requirements.set_content(&requirements);
        }

        self.status = match result {
            Ok(msg) => Status::Info(msg),
            Err(e) => Status::Error(e.to_string()),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::llm::client::LlmError;
    use crate::llm::Completion;
    use crate::llm::types::TokenUsage;

    struct StubInference {
        reply: &'static str,
    }

    #[async_trait]
    impl Inference for StubInference {
        async fn run(&self, _model: &str, _prompt: &str) -> Result<Completion, LlmError> {
            Ok(Completion {
                content: self.reply.to_string(),
                usage: TokenUsage::Structured {
                    input_tokens: 1,
                    output_tokens: 2,
                    total_tokens: 3,
                },
            })
        }
    }

    fn app_with_stub(reply: &'static str) -> App {
        App::new(Arc::new(StubInference { reply }), Config::for_tests())
    }

    fn press(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn function_keys_map_to_actions() {
        let app = app_with_stub("");
        assert_eq!(
            app.action_for_key(&press(KeyCode::F(2))),
            Some(Action::ReadProcedure)
        );
        assert_eq!(
            app.action_for_key(&press(KeyCode::F(4))),
            Some(Action::ConvertToPyspark)
        );
        assert_eq!(app.action_for_key(&press(KeyCode::Char('x'))), None);
    }

    #[test]
    fn tab_toggles_focus_and_esc_quits() {
        let mut app = app_with_stub("");
        assert_eq!(app.focus, Focus::Procedure);
        app.handle_key(press(KeyCode::Tab));
        assert_eq!(app.focus, Focus::Requirements);
        app.handle_key(press(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn typing_goes_to_focused_editor() {
        let mut app = app_with_stub("");
        app.handle_key(press(KeyCode::Char('a')));
        app.handle_key(press(KeyCode::Tab));
        app.handle_key(press(KeyCode::Char('b')));
        assert_eq!(app.procedure.content(), "a");
        assert_eq!(app.requirements.content(), "b");
    }

    #[tokio::test]
    async fn read_procedure_fills_requirements_editor() {
        let mut app = app_with_stub("Load the orders table.");
        app.procedure.insert_str("CREATE PROCEDURE p() ...");

        app.dispatch(Action::ReadProcedure).await;

        assert_eq!(app.requirements.content(), "Load the orders table.");
        assert_eq!(app.session().requirements, "Load the orders table.");
        assert_eq!(
            app.session().requirements_metrics,
            "input_tokens=1, output_tokens=2, total_tokens=3"
        );
        assert!(matches!(app.status, Status::Info(_)));
    }

    #[tokio::test]
    async fn gating_error_lands_in_status_bar() {
        let mut app = app_with_stub("unused");
        app.dispatch(Action::ConvertToPyspark).await;

        match &app.status {
            Status::Error(msg) => assert!(msg.contains("Read Snowflake")),
            other => panic!("expected error status, got {other:?}"),
        }
        assert!(app.session().pyspark_code.is_empty());
    }

    #[tokio::test]
    async fn save_requirements_takes_editor_content() {
        let mut app = app_with_stub("unused");
        app.requirements.insert_str("hand-written requirements");
        app.dispatch(Action::SaveRequirements).await;

        assert_eq!(app.session().requirements, "hand-written requirements");
        assert_eq!(
            app.status,
            Status::Info("Requirements saved successfully!".into())
        );
    }
}
