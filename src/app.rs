use std::sync::Arc;
use std::time::Instant;

use color_eyre::Result;
use ratatui::{
    crossterm::event::{Event as CrosstermEvent, KeyEventKind},
    DefaultTerminal,
};
use tracing::info;

use crate::api::{HttpRoleApi, RoleApi};
use crate::config::AppConfig;
use crate::event::{AppEvent, Event, EventHandler};
use crate::role_editor::RoleEditor;

/// Application.
#[derive(Debug)]
pub struct App {
    /// Is the application running?
    pub running: bool,
    /// The one screen this console has.
    pub editor: RoleEditor,
    /// Event handler.
    pub events: EventHandler,
}

impl App {
    /// Constructs an [`App`] talking to the HTTP role API from `config`.
    pub fn new(config: &AppConfig) -> Result<Self> {
        let api = HttpRoleApi::new(config)?;
        Ok(Self::with_api(Arc::new(api), config))
    }

    pub fn with_api(api: Arc<dyn RoleApi>, config: &AppConfig) -> Self {
        let mut editor = RoleEditor::new(api, config);
        editor.start();
        Self {
            running: true,
            editor,
            events: EventHandler::new(),
        }
    }

    /// Run the application's main loop.
    pub async fn run(mut self, mut terminal: DefaultTerminal) -> Result<()> {
        let mut needs_redraw = true;

        while self.running {
            if needs_redraw {
                terminal.draw(|frame| frame.render_widget(&mut self, frame.area()))?;
                needs_redraw = false;
            }

            tokio::select! {
                event = self.events.next() => match event? {
                    Event::Tick => {
                        needs_redraw |= self.editor.on_tick(Instant::now());
                    }
                    Event::Crossterm(event) => {
                        needs_redraw |= self.handle_crossterm_event(event);
                    }
                    Event::App(app_event) => {
                        self.handle_app_event(app_event);
                        needs_redraw = true;
                    }
                },
                Some(message) = self.editor.next_message() => {
                    self.editor.apply_message(message, Instant::now());
                    needs_redraw = true;
                }
            }
        }
        Ok(())
    }

    /// Returns whether the event changed anything on screen.
    fn handle_crossterm_event(&mut self, event: CrosstermEvent) -> bool {
        match event {
            CrosstermEvent::Key(key) if key.kind == KeyEventKind::Press => {
                if let Some(app_event) = self.editor.handle_key(key, Instant::now()) {
                    self.events.send(app_event);
                }
                true
            }
            CrosstermEvent::Mouse(mouse) => {
                self.editor.handle_mouse(mouse);
                true
            }
            CrosstermEvent::Resize(_, _) => true,
            _ => false,
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::Quit => self.quit(),
            AppEvent::Submit => self.editor.submit(),
        }
    }

    /// Set running to false to quit the application.
    pub fn quit(&mut self) {
        info!("Quitting");
        self.running = false;
    }
}
