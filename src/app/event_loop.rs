use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;

use crate::app::{App, Message, Model, update};
use crate::document::Document;

/// Poll interval for terminal events; worker completions are drained on the
/// same cadence.
const POLL_INTERVAL_MS: u64 = 50;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if terminal initialization or the event loop
    /// encounters an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        // Create the image picker BEFORE initializing the terminal (it
        // queries stdio).
        let picker = if self.images_enabled {
            crate::image::create_picker()
        } else {
            None
        };

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - mdview requires an interactive terminal")?;
        let size = terminal.size()?;

        let document = Document::parse(&self.content);
        let mut model = Model::new(
            document,
            self.title.clone(),
            (size.width, size.height),
            self.cache.clone(),
        )
        .with_picker(picker);
        model.images_enabled = self.images_enabled;
        model.wrap_width = self.wrap_width;
        model.relayout();

        let (tx, rx) = mpsc::channel();
        let result = Self::event_loop(&mut terminal, &mut model, &tx, &rx);

        ratatui::restore();
        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        tx: &Sender<Message>,
        rx: &Receiver<Message>,
    ) -> Result<()> {
        let mut needs_render = true;

        loop {
            // Worker completions posted back to the UI context.
            while let Ok(msg) = rx.try_recv() {
                *model = update(std::mem::take(model), msg);
                needs_render = true;
            }

            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            // Start fetches for image slots approaching the viewport.
            if model.images_enabled && !model.editor_mode {
                needs_render |= Self::spawn_image_fetches(model, tx);
            }

            if event::poll(Duration::from_millis(POLL_INTERVAL_MS))? {
                if let Some(msg) = Self::handle_event(&event::read()?, model) {
                    *model = update(std::mem::take(model), msg);
                    needs_render = true;
                }

                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = Self::handle_event(&event::read()?, model) {
                        *model = update(std::mem::take(model), msg);
                        needs_render = true;
                    }
                }
            }

            if needs_render {
                terminal.draw(|frame| crate::ui::render(model, frame))?;
                needs_render = false;
            }

            if model.should_quit {
                break;
            }
        }
        Ok(())
    }
}
