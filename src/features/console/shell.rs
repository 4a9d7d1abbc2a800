use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast::{self, error::TryRecvError};
use tokio::sync::watch;

use crate::core::config::Config;
use crate::core::error::{AppError, Result};
use crate::features::access::{AccessController, View};
use crate::features::animals::dtos::{Attachment, DeleteOutcome, DraftRecord, DRAFT_FIELDS};
use crate::features::animals::models::AnimalId;
use crate::features::animals::{MutationService, RecordApi, RecordStore, StoreEvent};
use crate::features::console::command::Command;
use crate::features::console::render;
use crate::features::stats::dtos::dashboard_charts;
use crate::features::stats::models::Distributions;
use crate::features::stats::services::aggregation;
use crate::features::stats::StatsFeed;
use crate::modules::terminal::Terminal;

/// Whether the command loop keeps going
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Interactive command loop over the client core
pub struct Console {
    config: Config,
    store: Arc<RecordStore>,
    mutations: MutationService,
    access: AccessController,
    stats: StatsFeed,
    terminal: Arc<Terminal>,
    events: broadcast::Receiver<StoreEvent>,
    draft: DraftRecord,
}

impl Console {
    /// Wire the core together around one terminal. Must run inside a tokio
    /// runtime; the stats feed spawns its task here.
    pub fn new(config: Config, api: Arc<dyn RecordApi>, terminal: Arc<Terminal>) -> Self {
        let store = Arc::new(RecordStore::new(Arc::clone(&api), &config.store));
        let events = store.subscribe();
        let stats = StatsFeed::spawn(Arc::clone(&store));
        let mutations = MutationService::new(api, Arc::clone(&store), terminal.clone());
        let access = AccessController::new(&config.access, terminal.clone());

        Self {
            config,
            store,
            mutations,
            access,
            stats,
            terminal,
            events,
            draft: DraftRecord::default(),
        }
    }

    pub fn store(&self) -> &Arc<RecordStore> {
        &self.store
    }

    pub fn view(&self) -> View {
        self.access.view()
    }

    /// Live distributions for observers outside the command loop
    pub fn stats_updates(&self) -> watch::Receiver<Distributions> {
        self.stats.subscribe()
    }

    /// Counts over the record set as it is right now
    fn distributions(&self) -> Distributions {
        aggregation::summarize(&self.store.current())
    }

    pub async fn run(&mut self) {
        self.terminal.println("Type 'help' for commands.").await;

        loop {
            self.report_store_events().await;

            let prompt = match self.view() {
                View::User => "user>",
                View::Admin => "admin>",
            };
            let Some(line) = self.terminal.prompt(prompt).await else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }
            if self.handle(&line).await == Flow::Quit {
                break;
            }
        }

        tracing::info!("Console closed");
    }

    /// Parse and run one line, printing any failure
    pub async fn handle(&mut self, line: &str) -> Flow {
        let result = match line.parse::<Command>() {
            Ok(command) => self.execute(command).await,
            Err(e) => Err(e),
        };

        match result {
            Ok(flow) => flow,
            Err(e) => {
                self.terminal.println(&e.user_message()).await;
                Flow::Continue
            }
        }
    }

    async fn execute(&mut self, command: Command) -> Result<Flow> {
        if command.requires_admin() {
            self.access.require_admin()?;
        }

        match command {
            Command::Help => {
                self.terminal.print(&render::help(self.view())).await;
            }
            Command::User => {
                self.access.request_user();
                self.list().await;
            }
            Command::Admin => {
                self.access.request_admin().await?;
                self.list().await;
            }
            Command::List => self.list().await,
            Command::Show(id) => self.show(&id).await?,
            Command::Adopt(id) => self.adopt(&id).await?,
            Command::Stats => {
                let text = render::distributions(&self.distributions());
                self.terminal.print(&text).await;
            }
            Command::Charts => {
                let text = render::charts(&dashboard_charts(&self.distributions()));
                self.terminal.print(&text).await;
            }
            Command::Add => self.add().await?,
            Command::Delete(id) => self.delete(&id).await?,
            Command::Refresh => {
                self.store.load().await?;
            }
            Command::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    /// Print notices for loads that finished since the last prompt
    async fn report_store_events(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(StoreEvent::Replaced { count, .. }) => {
                    self.terminal
                        .println(&format!("Loaded {} cats.", count))
                        .await;
                }
                Ok(StoreEvent::LoadFailed { message, .. }) => {
                    self.terminal.println(&message).await;
                }
                Err(TryRecvError::Lagged(skipped)) => {
                    tracing::debug!("Console skipped {} store events", skipped);
                }
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
            }
        }
    }

    async fn list(&self) {
        let records = self.store.current();
        let text = match self.view() {
            View::User => render::user_view(&records, &self.config.api),
            View::Admin => render::admin_table(&records),
        };
        self.terminal.print(&text).await;
    }

    async fn show(&self, id: &AnimalId) -> Result<()> {
        let record = self
            .store
            .find(id)
            .filter(|r| self.view() == View::Admin || r.is_available())
            .ok_or_else(|| AppError::NotFound(format!("No cat with id {}", id)))?;

        self.terminal
            .print(&render::record_card(&record, &self.config.api))
            .await;
        Ok(())
    }

    async fn adopt(&self, id: &AnimalId) -> Result<()> {
        let record = self
            .store
            .find(id)
            .filter(|r| r.is_available())
            .ok_or_else(|| AppError::NotFound(format!("No adoptable cat with id {}", id)))?;

        tracing::debug!("Adoption inquiry for {}", record.id);
        self.terminal
            .println(&format!(
                "For any adoption inquiries, please send an email to {}",
                self.config.access.adoption_contact_email
            ))
            .await;
        Ok(())
    }

    /// Walk the add form, keeping earlier answers as defaults, then submit
    async fn add(&mut self) -> Result<()> {
        self.terminal
            .println("Press enter to keep the value in brackets.")
            .await;

        for field in DRAFT_FIELDS {
            let current = self.current_value(field);
            let prompt = format!("{} [{}]:", render::field_label(field), current);
            let Some(answer) = self.terminal.prompt(&prompt).await else {
                self.terminal.println("Add cancelled.").await;
                return Ok(());
            };
            let answer = answer.trim();
            if !answer.is_empty() {
                self.draft.set_field(field, answer)?;
            }
        }

        let prompt = format!(
            "Pictures, comma-separated paths [{} selected]:",
            self.draft.attachments.len()
        );
        let Some(answer) = self.terminal.prompt(&prompt).await else {
            self.terminal.println("Add cancelled.").await;
            return Ok(());
        };
        let paths: Vec<&str> = answer
            .split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();
        if !paths.is_empty() {
            let mut attachments = Vec::with_capacity(paths.len());
            for path in paths {
                attachments.push(Attachment::from_path(Path::new(path)).await?);
            }
            self.draft.attachments = attachments;
        }

        let created = self.mutations.submit_create(&mut self.draft).await?;

        let message = match created.adoption_chance {
            Some(chance) => format!("Cat added successfully! Adoption Chance: {}%", chance),
            None => "Cat added successfully!".to_string(),
        };
        self.terminal.println(&message).await;
        Ok(())
    }

    fn current_value(&self, field: &str) -> String {
        self.draft
            .scalar_fields()
            .into_iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value)
            .unwrap_or_default()
    }

    async fn delete(&self, id: &AnimalId) -> Result<()> {
        match self.mutations.submit_delete(id).await? {
            DeleteOutcome::Cancelled => self.terminal.println("Delete cancelled.").await,
            DeleteOutcome::Deleted { message } => self.terminal.println(&message).await,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_helpers::{sample_record, FakeRecordApi};
    use tokio::io::{AsyncReadExt, BufReader};

    /// Console whose terminal reads `input` and writes into a pipe the test
    /// can drain afterwards
    fn console(
        api: Arc<FakeRecordApi>,
        input: &'static [u8],
    ) -> (Console, tokio::io::DuplexStream) {
        let (writer, reader) = tokio::io::duplex(64 * 1024);
        let terminal = Arc::new(Terminal::new(BufReader::new(input), writer));
        let config = Config {
            api: Default::default(),
            access: Default::default(),
            store: Default::default(),
        };
        (Console::new(config, api, terminal), reader)
    }

    async fn output(console: Console, mut reader: tokio::io::DuplexStream) -> String {
        drop(console);
        let mut text = String::new();
        reader.read_to_string(&mut text).await.unwrap();
        text
    }

    fn api() -> Arc<FakeRecordApi> {
        Arc::new(FakeRecordApi::with_records(vec![
            sample_record("1", "Available"),
            sample_record("2", "Adopted"),
        ]))
    }

    #[tokio::test]
    async fn test_admin_commands_need_unlock() {
        let api = api();
        let (mut console, reader) = console(api.clone(), b"");
        console.store().load().await.unwrap();

        assert_eq!(console.handle("delete 1").await, Flow::Continue);
        assert_eq!(api.delete_calls(), 0);

        let text = output(console, reader).await;
        assert!(text.contains("Switch to the admin view first"));
    }

    #[tokio::test]
    async fn test_wrong_code_keeps_user_view() {
        let (mut console, reader) = console(api(), b"999999\n");
        console.handle("admin").await;
        assert_eq!(console.view(), View::User);

        let text = output(console, reader).await;
        assert!(text.contains("Incorrect code."));
    }

    #[tokio::test]
    async fn test_unlock_then_delete_with_confirmation() {
        let api = api();
        let (mut console, reader) = console(api.clone(), b"123123\ny\n");
        console.store().load().await.unwrap();

        console.handle("admin").await;
        assert_eq!(console.view(), View::Admin);

        console.handle("delete 1").await;
        assert_eq!(api.delete_calls(), 1);
        assert!(console.store().find(&AnimalId::new("1")).is_none());

        let text = output(console, reader).await;
        assert!(text.contains("Manage Cats"));
    }

    #[tokio::test]
    async fn test_adopt_prints_contact_email() {
        let (mut console, reader) = console(api(), b"");
        console.store().load().await.unwrap();

        console.handle("adopt 1").await;
        console.handle("adopt 2").await;

        let text = output(console, reader).await;
        assert!(text.contains("please send an email to 123@gmail.com"));
        assert!(text.contains("No adoptable cat with id 2"));
    }

    #[tokio::test]
    async fn test_user_list_hides_adopted() {
        let (mut console, reader) = console(api(), b"");
        console.store().load().await.unwrap();
        console.handle("list").await;

        let text = output(console, reader).await;
        assert!(text.contains("[1] Cat 1"));
        assert!(!text.contains("Cat 2"));
    }

    #[tokio::test]
    async fn test_add_without_pictures_sends_nothing() {
        let api = api();
        let input: &'static [u8] =
            b"123123\nMochi\n120\nFemale\nNo\nTabby\nOrange\nStray\nNormal\n\n\n";
        let (mut console, reader) = console(api.clone(), input);

        console.handle("admin").await;
        console.handle("add").await;

        assert_eq!(api.create_calls(), 0);
        // The typed fields survive for the next attempt
        assert_eq!(console.draft.name, "Mochi");
        assert_eq!(console.draft.status, "Available");

        let text = output(console, reader).await;
        assert!(text.contains("picture"));
    }

    #[tokio::test]
    async fn test_stats_reflect_refresh_immediately() {
        let api = api();
        let (mut console, reader) = console(api.clone(), b"123123\n");
        console.handle("admin").await;

        console.handle("refresh").await;
        console.handle("stats").await;

        api.set_records(vec![
            sample_record("1", "Available"),
            sample_record("2", "Adopted"),
            sample_record("3", "Adopted"),
        ]);
        console.handle("refresh").await;
        console.handle("charts").await;

        let text = output(console, reader).await;
        assert!(text.contains("Status (total 2)"));
        assert!(text.contains("Breed (total 2)"));
        assert!(text.contains("Tabby  2"));
        // Charts after the second refresh show the new Adopted count
        let charts = text.split("Cats by Status [pie]").nth(1).unwrap();
        assert!(charts.contains("Adopted"));
        assert!(charts.lines().any(|l| l.contains("Adopted") && l.contains("   2  ")));
    }

    #[tokio::test]
    async fn test_stats_updates_follow_loads() {
        let (console, _reader) = console(api(), b"");
        let mut updates = console.stats_updates();

        console.store().load().await.unwrap();
        updates.changed().await.unwrap();
        assert_eq!(updates.borrow().status.total(), 2);
    }

    #[tokio::test]
    async fn test_quit() {
        let (mut console, _reader) = console(api(), b"");
        assert_eq!(console.handle("quit").await, Flow::Quit);
        assert_eq!(console.handle("bogus").await, Flow::Continue);
    }

    #[tokio::test]
    async fn test_run_reports_load_and_stops_at_end_of_input() {
        let (mut console, reader) = console(api(), b"list\n");
        console.store().load().await.unwrap();
        console.run().await;

        let text = output(console, reader).await;
        assert!(text.contains("Loaded 2 cats."));
        assert!(text.contains("Available Cats for Adoption"));
    }
}
