use std::{path::PathBuf, time::Duration};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tokio::time::{Interval, MissedTickBehavior};
use tracing::error;

use crate::{
    backend::Backend,
    session::{Notice, Session, Submit},
};

pub const HEALTH_REFRESH: Duration = Duration::from_secs(15);

/// Idle health refresh. A generation call blocks the loop for minutes; the
/// ticks missed meanwhile collapse into one instead of firing back to back.
pub fn health_interval(period: Duration) -> Interval {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
    interval
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Topic,
    Message,
    Button,
}

impl Focus {
    fn next(self) -> Self {
        match self {
            Focus::Topic => Focus::Message,
            Focus::Message => Focus::Button,
            Focus::Button => Focus::Topic,
        }
    }

    fn previous(self) -> Self {
        match self {
            Focus::Topic => Focus::Button,
            Focus::Message => Focus::Topic,
            Focus::Button => Focus::Message,
        }
    }
}

pub struct App<B> {
    pub session: Session,
    pub backend: B,
    pub focus: Focus,
    pub output_dir: PathBuf,
    pub should_quit: bool,
}

impl<B: Backend> App<B> {
    pub fn new(backend: B, output_dir: PathBuf) -> Self {
        Self {
            session: Session::default(),
            backend,
            focus: Focus::Topic,
            output_dir,
            should_quit: false,
        }
    }

    pub async fn refresh_health(&mut self) -> bool {
        self.session.refresh_health(&self.backend).await
    }

    /// The backend is checked again before every press, the way the form
    /// re-checks it on each rerun.
    pub async fn press_generate(&mut self) -> Submit {
        self.refresh_health().await;
        self.session.submit()
    }

    pub fn download(&mut self) {
        if let Err(e) = self.session.download(&self.output_dir) {
            error!(task = "download", error = format!("{:#}", e));
            self.session.notice = Some(Notice::Error(format!("{:#}", e)));
        }
    }

    pub async fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('g') if ctrl => {
                self.press_generate().await;
            }
            KeyCode::Char('s') if ctrl => self.download(),
            KeyCode::Char('r') if ctrl => {
                self.refresh_health().await;
            }
            KeyCode::Tab => self.focus = self.focus.next(),
            KeyCode::BackTab => self.focus = self.focus.previous(),
            KeyCode::Enter => match self.focus {
                Focus::Topic => self.focus = Focus::Message,
                Focus::Message => self.session.personal_message.push('\n'),
                Focus::Button => {
                    self.press_generate().await;
                }
            },
            KeyCode::Backspace => {
                if let Some(field) = self.focused_field() {
                    field.pop();
                }
            }
            KeyCode::Char(c) if !ctrl => {
                if let Some(field) = self.focused_field() {
                    field.push(c);
                }
            }
            _ => {}
        }
    }

    fn focused_field(&mut self) -> Option<&mut String> {
        match self.focus {
            Focus::Topic => Some(&mut self.session.topic),
            Focus::Message => Some(&mut self.session.personal_message),
            Focus::Button => None,
        }
    }
}

#[cfg(test)]
mod test {
    use crossterm::event::{KeyEventKind, KeyEventState};

    use super::*;
    use crate::{backend::ClientError, session::EMPTY_FIELDS_WARNING};

    struct Healthy(bool);

    impl Backend for Healthy {
        async fn check_health(&self) -> bool {
            self.0
        }

        async fn generate(
            &self,
            _topic: &str,
            _personal_message: &str,
        ) -> Result<String, ClientError> {
            Ok("<html>OK</html>".to_string())
        }
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::NONE,
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    async fn type_text<B: Backend>(app: &mut App<B>, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c))).await;
        }
    }

    #[tokio::test]
    async fn test_typing_fills_focused_fields() {
        // Arrange
        let mut app = App::new(Healthy(true), PathBuf::from("."));

        // Act
        type_text(&mut app, "Rustt").await;
        app.handle_key(key(KeyCode::Backspace)).await;
        app.handle_key(key(KeyCode::Enter)).await;
        type_text(&mut app, "Hi").await;
        app.handle_key(key(KeyCode::Enter)).await;
        type_text(&mut app, "all").await;

        // Assert
        assert_eq!(app.session.topic, "Rust");
        assert_eq!(app.session.personal_message, "Hi\nall");
        assert_eq!(app.focus, Focus::Message);
    }

    #[tokio::test]
    async fn test_button_starts_generation() {
        // Arrange
        let mut app = App::new(Healthy(true), PathBuf::from("."));
        type_text(&mut app, "Rust").await;
        app.handle_key(key(KeyCode::Tab)).await;
        type_text(&mut app, "Hi").await;
        app.handle_key(key(KeyCode::Tab)).await;

        // Act
        app.handle_key(key(KeyCode::Enter)).await;

        // Assert
        assert_eq!(app.focus, Focus::Button);
        assert!(app.session.generating);
    }

    #[tokio::test]
    async fn test_shortcut_respects_unhealthy_backend() {
        // Arrange
        let mut app = App::new(Healthy(false), PathBuf::from("."));
        type_text(&mut app, "Rust").await;

        // Act
        app.handle_key(ctrl('g')).await;

        // Assert
        assert!(!app.session.backend_healthy);
        assert!(!app.session.generating);
    }

    #[tokio::test]
    async fn test_empty_fields_warn() {
        // Arrange
        let mut app = App::new(Healthy(true), PathBuf::from("."));

        // Act
        let submit = app.press_generate().await;

        // Assert
        assert_eq!(submit, Submit::Rejected);
        assert_eq!(
            app.session.notice,
            Some(Notice::Warning(EMPTY_FIELDS_WARNING.to_string()))
        );
    }

    #[tokio::test]
    async fn test_download_without_newsletter_shows_error() {
        // Arrange
        let dir = tempfile::tempdir().unwrap();
        let mut app = App::new(Healthy(true), dir.path().to_path_buf());

        // Act
        app.handle_key(ctrl('s')).await;

        // Assert
        assert!(matches!(app.session.notice, Some(Notice::Error(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn test_health_interval_skips_missed_ticks() {
        // Arrange
        let mut interval = health_interval(HEALTH_REFRESH);
        interval.tick().await;

        // Act
        tokio::time::advance(HEALTH_REFRESH * 10).await;
        interval.tick().await;
        let next = tokio::time::timeout(HEALTH_REFRESH / 2, interval.tick())
            .await;

        // Assert
        assert_eq!(interval.missed_tick_behavior(), MissedTickBehavior::Skip);
        assert!(next.is_err());
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let mut app = App::new(Healthy(true), PathBuf::from("."));
        app.handle_key(key(KeyCode::Esc)).await;
        assert!(app.should_quit);

        let mut app = App::new(Healthy(true), PathBuf::from("."));
        app.handle_key(ctrl('c')).await;
        assert!(app.should_quit);
    }
}
