//! # Runtime
//!
//! Drives an [`Editor`] against a [`SyncClient`].
//!
//! ```text
//! handle(event) ─► Editor::dispatch ─► Command ─► spawned task ─► SyncClient
//!                        ▲                                           │
//!                        └──── apply(Completion) ◄── channel ◄───────┘
//! ```
//!
//! Commands run concurrently with further input; completions are applied
//! one at a time, in arrival order, by whoever owns the runtime.

use crate::errors::EditorError;
use crate::events::{Command, Completion, Event};
use crate::Editor;
use locations_sync::{LocationsApi, SyncClient};
use std::sync::Arc;
use tokio::sync::mpsc;

pub struct Runtime<A> {
    editor: Editor,
    client: Arc<SyncClient<A>>,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<A: LocationsApi> Runtime<A> {
    pub fn new(editor: Editor, client: SyncClient<A>) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            editor,
            client: Arc::new(client),
            completions_tx,
            completions_rx,
        }
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn client(&self) -> &SyncClient<A> {
        &self.client
    }

    /// Dispatch an event and start any remote work it requires
    ///
    /// Must be called from within a tokio runtime.
    pub fn handle(&mut self, event: Event) -> Result<(), EditorError> {
        for command in self.editor.dispatch(event)? {
            self.spawn(command);
        }
        Ok(())
    }

    /// Wait for the next finished command; `None` when nothing is in flight
    pub async fn next_completion(&mut self) -> Option<Completion> {
        if self.editor.in_flight() == 0 {
            return None;
        }
        self.completions_rx.recv().await
    }

    /// Feed a finished command back into the editor
    pub fn apply(&mut self, completion: Completion) {
        if let Err(e) = self.editor.dispatch(Event::Completed(completion)) {
            tracing::error!("Completion rejected by editor: {}", e);
        }
    }

    /// Apply completions until no command is in flight
    pub async fn settle(&mut self) {
        while let Some(completion) = self.next_completion().await {
            self.apply(completion);
        }
    }

    fn spawn(&self, command: Command) {
        tracing::debug!(operation = %command.operation(), "Starting remote command");
        let client = Arc::clone(&self.client);
        let tx = self.completions_tx.clone();

        tokio::spawn(async move {
            let completion = execute(&client, command).await;
            if tx.send(completion).is_err() {
                tracing::error!("Dropping completion: runtime has shut down");
            }
        });
    }
}

async fn execute<A: LocationsApi>(client: &SyncClient<A>, command: Command) -> Completion {
    match command {
        Command::List => Completion::Listed(client.list().await),
        Command::Create { session, draft } => Completion::Committed {
            session,
            result: client.create(&draft).await,
        },
        Command::Update {
            session,
            site_id,
            draft,
        } => Completion::Committed {
            session,
            result: client.update(&site_id, &draft).await,
        },
        Command::Delete { site_id } => {
            let result = client.delete(&site_id).await;
            Completion::Deleted { site_id, result }
        }
    }
}
