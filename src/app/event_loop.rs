use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event;
use ratatui::DefaultTerminal;
use tracing::{debug, info};

use crate::app::{App, Message, Model, input, spawn_request};
use crate::client::{HttpRecordApi, RecordApi};

use super::update::apply;

/// How long to wait for terminal input before checking for responses.
const RESPONSE_POLL_MS: u64 = 50;

impl App {
    /// Run the main event loop.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built, the terminal
    /// cannot be initialized, or the event loop hits an I/O failure.
    pub fn run(&mut self) -> Result<()> {
        let api: Arc<dyn RecordApi> = match &self.api {
            Some(api) => Arc::clone(api),
            None => Arc::new(
                HttpRecordApi::new(self.endpoint.clone(), self.timeout)
                    .context("Failed to build HTTP client")?,
            ),
        };
        info!(endpoint = %self.endpoint, policy = ?self.reset_policy, "starting");

        let mut terminal = ratatui::try_init()
            .context("Failed to initialize terminal - recordbook requires an interactive terminal")?;

        let mut model = self.initial_model();
        let (tx, rx) = mpsc::channel();
        dispatch(&mut model, &api, &tx);

        let result = Self::event_loop(&mut terminal, &mut model, &api, &tx, &rx);

        ratatui::restore();
        result
    }

    fn event_loop(
        terminal: &mut DefaultTerminal,
        model: &mut Model,
        api: &Arc<dyn RecordApi>,
        tx: &Sender<Message>,
        rx: &Receiver<Message>,
    ) -> Result<()> {
        let mut needs_render = true;

        loop {
            if model.expire_toast(Instant::now()) {
                needs_render = true;
            }

            // Apply remote results in arrival order.
            while let Ok(msg) = rx.try_recv() {
                debug!(?msg, "response");
                apply(model, msg);
                dispatch(model, api, tx);
                needs_render = true;
            }

            let poll_ms = if needs_render { 0 } else { RESPONSE_POLL_MS };
            if event::poll(Duration::from_millis(poll_ms))? {
                if let Some(msg) = input::handle_event(&event::read()?, model) {
                    apply(model, msg);
                    dispatch(model, api, tx);
                }
                // Coalesce key repeat bursts into a single render.
                while event::poll(Duration::from_millis(0))? {
                    if let Some(msg) = input::handle_event(&event::read()?, model) {
                        apply(model, msg);
                        dispatch(model, api, tx);
                    }
                }
                needs_render = true;
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

/// Hand every queued request to a worker thread.
fn dispatch(model: &mut Model, api: &Arc<dyn RecordApi>, tx: &Sender<Message>) {
    for request in model.take_requests() {
        spawn_request(Arc::clone(api), request, tx.clone());
    }
}
