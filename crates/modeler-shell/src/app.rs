use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use diagram::{summarize, DiagramSummary, Document};
use modeler_bridge::{
    dispatch, BridgeError, ContentSaved, DocumentStore, EditorHandle, EditorOptions,
    EmbeddedEditor, EventKind, EventReceiver, MemoryEditor, Memo, ModelerEventHandler,
    Notification, ProcessEditor, SavedModel,
};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TryRecvError};
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::config::Config;
use crate::document_view::DocumentView;
use crate::panel_state::PanelStateStore;
use crate::ui_state::UIState;

/// Configured options plus the remembered panel width they are derived from.
type OptionsKey = (EditorOptions, Option<u32>);
type SaveOutcome = Result<SavedModel, BridgeError>;

pub struct App {
    pub config: Config,
    pub ui_state: UIState,
    pub view: DocumentView,
    documents: DocumentStore,
    summary: DiagramSummary,
    handle: EditorHandle,
    editor_name: Option<String>,
    events: Option<EventReceiver>,
    panel_state: PanelStateStore,
    // Read once at startup so option identity stays put for the session.
    remembered_width: Option<u32>,
    // Single writer so remembered widths land in the order they were reported.
    panel_writer: Option<watch::Sender<u32>>,
    options_memo: Memo<OptionsKey, EditorOptions>,
    configured: Option<Arc<EditorOptions>>,
    save_tx: mpsc::UnboundedSender<SaveOutcome>,
    save_rx: mpsc::UnboundedReceiver<SaveOutcome>,
    last_saved: Option<SavedModel>,
}

impl App {
    pub async fn new(initial_xml: String) -> Result<Self> {
        let config = Config::load().await?;
        let panel_state = PanelStateStore::new()?;
        Ok(Self::with_parts(config, panel_state, initial_xml).await)
    }

    pub async fn with_parts(
        config: Config,
        panel_state: PanelStateStore,
        initial_xml: impl Into<String>,
    ) -> Self {
        let remembered_width = if config.ui.remember_panel_width {
            match panel_state.load().await {
                Ok(state) => state.map(|s| s.properties_panel_width),
                Err(e) => {
                    log::warn!("Failed to load panel state: {}", e);
                    None
                }
            }
        } else {
            None
        };

        let initial = Document::new(initial_xml);
        let summary = summarize(&initial.xml);
        let mut documents = DocumentStore::new(initial);
        documents.subscribe(|doc, reason| {
            log::info!("Model has been changed because of {}", reason);
            log::debug!("New model revision {} ({} bytes)", doc.revision, doc.byte_len());
        });

        let (save_tx, save_rx) = mpsc::unbounded_channel();

        Self {
            ui_state: UIState::new(config.ui.event_log_capacity),
            config,
            view: DocumentView::new(),
            documents,
            summary,
            handle: EditorHandle::new(),
            editor_name: None,
            events: None,
            panel_state,
            remembered_width,
            panel_writer: None,
            options_memo: Memo::new(),
            configured: None,
            save_tx,
            save_rx,
            last_saved: None,
        }
    }

    pub fn document(&self) -> &Document {
        self.documents.get()
    }

    pub fn summary(&self) -> &DiagramSummary {
        &self.summary
    }

    pub fn editor_name(&self) -> Option<&str> {
        self.editor_name.as_deref()
    }

    pub fn last_saved(&self) -> Option<&SavedModel> {
        self.last_saved.as_ref()
    }

    /// Options for the editor, rebuilt only when the inputs change.
    pub fn editor_options(&mut self) -> Arc<EditorOptions> {
        let key = (self.config.options.clone(), self.remembered_width);
        self.options_memo
            .get_or_build(&key, |(options, width)| options.clone().with_panel_width(*width))
    }

    /// Start the configured editor with the current document.
    pub async fn mount(&mut self) -> Result<()> {
        let options = self.editor_options();
        let xml = self.documents.get().xml.clone();

        let (editor, events) = match self.config.editor.command.clone() {
            Some(command) => {
                log::info!("Launching editor process: {}", command);
                let (editor, events) =
                    ProcessEditor::launch(&command, &self.config.editor.args, &xml, options.clone())
                        .await?;
                (editor as Arc<dyn EmbeddedEditor>, events)
            }
            None => {
                let (editor, events) = MemoryEditor::mount(xml, options.clone());
                (editor as Arc<dyn EmbeddedEditor>, events)
            }
        };

        self.attach(editor, events, options).await;
        Ok(())
    }

    /// Bind an already mounted editor that was handed `options`.
    pub async fn attach(
        &mut self,
        editor: Arc<dyn EmbeddedEditor>,
        events: EventReceiver,
        options: Arc<EditorOptions>,
    ) {
        let name = editor.name().to_string();
        self.handle.bind(editor).await;
        self.events = Some(events);
        self.configured = Some(options);
        self.ui_state
            .status_manager
            .set_info(format!("Editor '{}' mounted", name));
        self.editor_name = Some(name);
    }

    /// Hand the editor new options if, and only if, their identity changed.
    pub async fn sync_options(&mut self) -> Result<bool, BridgeError> {
        let options = self.editor_options();
        if self
            .configured
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &options))
        {
            return Ok(false);
        }
        if !self.handle.is_bound().await {
            return Ok(false);
        }

        // Recorded before the call so a failing editor is not retried every frame.
        self.configured = Some(options.clone());
        self.handle.configure(options).await?;
        log::info!("Editor options changed, editor reconfigured");
        Ok(true)
    }

    /// Dispatch every editor event that has arrived since the last call.
    pub fn pump_events(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let Some(events) = self.events.as_mut() else {
                break;
            };
            let record = match events.try_recv() {
                Ok(record) => record,
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    log::warn!("Editor event stream closed");
                    self.events = None;
                    break;
                }
            };

            dispatch(&record, self);
            handled += 1;
        }
        handled
    }

    /// Ask the editor for its current state without blocking the UI loop.
    ///
    /// The outcome arrives through [`poll_save_results`](Self::poll_save_results).
    /// If the shell is gone by then, it is dropped. Returns `None` when a
    /// save is already in flight.
    pub fn trigger_save(&mut self) -> Option<JoinHandle<()>> {
        if self.ui_state.save_in_flight {
            self.ui_state.status_manager.set_info("Save already in progress");
            return None;
        }

        log::info!("Saving model...");
        self.ui_state.save_in_flight = true;
        self.ui_state.status_manager.set_info("Saving model...");

        let handle = self.handle.clone();
        let results = self.save_tx.clone();
        Some(tokio::spawn(async move {
            let outcome = handle.request_serialize().await;
            if results.send(outcome).is_err() {
                log::debug!("Shell is gone, dropping save outcome");
            }
        }))
    }

    pub fn poll_save_results(&mut self) -> usize {
        let mut received = 0;
        while let Ok(outcome) = self.save_rx.try_recv() {
            self.apply_save_outcome(outcome);
            received += 1;
        }
        received
    }

    fn apply_save_outcome(&mut self, outcome: SaveOutcome) {
        self.ui_state.save_in_flight = false;
        match outcome {
            Ok(model) => {
                log::info!(
                    "Saved model! ({} bytes of XML, preview: {})",
                    model.xml.len(),
                    model.svg.as_ref().map_or(0, String::len)
                );
                self.ui_state
                    .status_manager
                    .set_success(format!("Saved model! ({} bytes)", model.xml.len()));
                self.last_saved = Some(model);
            }
            Err(e) => {
                log::warn!("Save failed: {}", e);
                self.ui_state.status_manager.surface(&e);
            }
        }
    }

    pub async fn reload_config(&mut self) {
        match Config::load().await {
            Ok(config) => {
                self.ui_state
                    .set_event_log_capacity(config.ui.event_log_capacity);
                self.config = config;
                self.ui_state.status_manager.set_info("Configuration reloaded");
            }
            Err(e) => {
                log::error!("Failed to reload config: {}", e);
                self.ui_state
                    .status_manager
                    .set_error(format!("Failed to reload config: {}", e));
            }
        }
    }

    /// Bring the document pane up to the latest revision.
    pub fn sync_view(&mut self) -> bool {
        self.view.sync(self.documents.get())
    }

    pub async fn handle_key_event(&mut self, key: KeyEvent) -> Result<()> {
        if self.ui_state.is_help_shown() {
            if matches!(
                key.code,
                KeyCode::Char('?') | KeyCode::Char('q') | KeyCode::Esc
            ) {
                self.ui_state.hide_help();
            }
            return Ok(());
        }

        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('s') if ctrl => {
                self.trigger_save();
            }
            KeyCode::Char('c') if ctrl => self.quit(),
            KeyCode::Enter | KeyCode::Char('s') => {
                self.trigger_save();
            }
            KeyCode::Char('q') | KeyCode::Esc => self.quit(),
            KeyCode::Char('?') => self.ui_state.toggle_help(),
            KeyCode::Char('r') => self.reload_config().await,
            KeyCode::Up | KeyCode::Char('k') => self.view.scroll_up(1),
            KeyCode::Down | KeyCode::Char('j') => self.view.scroll_down(1),
            KeyCode::PageUp => self.view.page_up(),
            KeyCode::PageDown => self.view.page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.view.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.view.scroll_to_bottom(),
            _ => {}
        }
        Ok(())
    }

    pub fn update_status(&mut self) {
        self.ui_state.update_status();
    }

    pub fn quit(&mut self) {
        self.ui_state.quit();
    }

    pub fn should_quit(&self) -> bool {
        self.ui_state.should_quit()
    }

    /// Unmount the editor. Events still queued are discarded.
    pub async fn shutdown(&mut self) {
        if let Err(e) = self.handle.unmount().await {
            log::warn!("Editor did not shut down cleanly: {}", e);
        }
        self.events = None;
        self.editor_name = None;
    }

    /// Hand `width` to the panel state writer. Widths reported while a
    /// write is running collapse into the latest one.
    fn remember_panel_width(&mut self, width: u32) {
        if let Some(writer) = &self.panel_writer {
            if writer.send(width).is_ok() {
                return;
            }
        }

        let runtime = match tokio::runtime::Handle::try_current() {
            Ok(runtime) => runtime,
            Err(_) => {
                log::debug!("No runtime, not remembering panel width");
                return;
            }
        };

        let (writer, mut widths) = watch::channel(width);
        let store = self.panel_state.clone();
        runtime.spawn(async move {
            loop {
                let width = *widths.borrow_and_update();
                if let Err(e) = store.save(width).await {
                    log::warn!("Failed to remember panel width: {}", e);
                }
                // Ends once the shell is gone and the last width is written.
                if widths.changed().await.is_err() {
                    break;
                }
            }
        });
        self.panel_writer = Some(writer);
    }
}

impl ModelerEventHandler for App {
    fn on_content_saved(&mut self, saved: ContentSaved) {
        let reason = saved.reason;
        let document = saved.into_document();

        self.summary = summarize(&document.xml);
        self.ui_state.log_event(
            EventKind::ContentSaved,
            format!("{} ({} lines)", reason, document.line_count()),
        );
        self.documents.set(document, reason);
    }

    fn on_notification(&mut self, notification: Notification) {
        log::info!(
            "Editor notification ({}): {}",
            notification.level,
            notification.message
        );
        self.ui_state.log_event(
            EventKind::Notification,
            format!("{}: {}", notification.level, notification.message),
        );
        self.ui_state
            .status_manager
            .surface(&BridgeError::from(notification));
    }

    fn on_ui_update_required(&mut self) {
        log::debug!("Editor requested a UI update");
        self.ui_state
            .log_event(EventKind::UiUpdateRequired, "ui update required");
        self.ui_state.request_redraw();
    }

    fn on_panel_resized(&mut self, width: u32) {
        log::info!("Properties panel has been resized to {}", width);
        self.ui_state.panel_width = Some(width);
        self.ui_state.log_event(
            EventKind::PanelResized,
            format!("properties panel width {}", width),
        );
        if self.config.ui.remember_panel_width {
            self.remember_panel_width(width);
        }
    }

    fn on_inner_event(&mut self, name: &str, _data: &Value) {
        log::trace!("bpmn.io event: {}", name);
        self.ui_state.count_inner_event();
    }

    fn on_unhandled(&mut self, record: &Value, reason: &BridgeError) {
        let kind = match reason {
            BridgeError::MalformedEvent { kind, .. } => {
                log::warn!("{}: {}", reason, record);
                *kind
            }
            _ => {
                log::info!("Unhandled event received: {}", record);
                EventKind::Unknown
            }
        };
        self.ui_state.log_event(kind, reason.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panel_state::PanelState;
    use crate::status_manager::MessageType;
    use diagram::{ChangeReason, DEMO_BPMN};
    use modeler_bridge::{ModelerEvent, NotificationLevel, PanelResized};
    use std::time::Duration;
    use tempfile::TempDir;

    async fn test_app(temp_dir: &TempDir, config: Config, xml: &str) -> App {
        let panel_state = PanelStateStore::at(temp_dir.path().join("panel-state.json"));
        App::with_parts(config, panel_state, xml).await
    }

    async fn mounted_app(temp_dir: &TempDir, xml: &str) -> (App, Arc<MemoryEditor>) {
        let mut app = test_app(temp_dir, Config::default(), xml).await;
        let options = app.editor_options();
        let (editor, events) = MemoryEditor::mount(xml, options.clone());
        app.attach(editor.clone(), events, options).await;
        (app, editor)
    }

    async fn settle_save(app: &mut App) -> SaveOutcome {
        let outcome = app.save_rx.recv().await.unwrap();
        app.apply_save_outcome(outcome.clone());
        outcome
    }

    #[tokio::test]
    async fn test_mount_uses_memory_editor_by_default() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = test_app(&temp_dir, Config::default(), DEMO_BPMN).await;

        app.mount().await.unwrap();
        assert_eq!(app.editor_name(), Some("memory"));
        assert!(app.handle.is_bound().await);

        // import.done from the editor is counted, not logged
        assert_eq!(app.pump_events(), 1);
        assert_eq!(app.ui_state.inner_event_count(), 1);
        assert_eq!(app.ui_state.event_log_len(), 0);
        assert_eq!(app.summary().task_count, 5);
    }

    #[tokio::test]
    async fn test_rerender_keeps_option_identity() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, editor) = mounted_app(&temp_dir, "<d0/>").await;

        let first = app.editor_options();
        for _ in 0..3 {
            assert!(!app.sync_options().await.unwrap());
            assert!(Arc::ptr_eq(&first, &app.editor_options()));
        }

        assert_eq!(editor.configure_calls(), 0);
        assert_eq!(app.options_memo.builds(), 1);
    }

    #[tokio::test]
    async fn test_config_change_reconfigures_once() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, editor) = mounted_app(&temp_dir, "<d0/>").await;

        app.config.options.modeler_tab.properties_panel.hidden = Some(true);
        assert!(app.sync_options().await.unwrap());
        assert!(!app.sync_options().await.unwrap());

        assert_eq!(editor.configure_calls(), 1);
        assert_eq!(
            editor.options().await.modeler_tab.properties_panel.hidden,
            Some(true)
        );
    }

    #[tokio::test]
    async fn test_content_saved_replaces_document() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, editor) = mounted_app(&temp_dir, "<d0/>").await;

        editor.edit(DEMO_BPMN).await;
        editor.commit(ChangeReason::ModelChanged).await;
        app.pump_events();

        assert_eq!(app.document().xml, DEMO_BPMN);
        assert_eq!(app.document().revision, 1);
        assert!(app.document().has_preview());
        assert_eq!(
            app.summary().process_id.as_deref(),
            Some("Process_1j0yj4d")
        );
        let entry = app.ui_state.event_log().last().unwrap();
        assert_eq!(entry.kind, EventKind::ContentSaved);
        assert!(entry.summary.starts_with("model.changed"));

        assert!(app.sync_view());
        assert!(!app.sync_view());
    }

    #[tokio::test]
    async fn test_notification_reaches_status_line() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, editor) = mounted_app(&temp_dir, "<d0/>").await;

        editor.emit(
            ModelerEvent::Notification(Notification {
                level: NotificationLevel::Error,
                message: "Failed to import diagram".to_string(),
            })
            .to_record(),
        );
        app.pump_events();

        let message = app.ui_state.status_manager.current().unwrap();
        assert_eq!(message.message_type, MessageType::Error);
        assert_eq!(message.content, "Failed to import diagram");
        assert_eq!(app.document().revision, 0);
    }

    #[tokio::test]
    async fn test_panel_resize_is_remembered() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, editor) = mounted_app(&temp_dir, "<d0/>").await;

        editor.emit(ModelerEvent::PanelResized(PanelResized { width: 240 }).to_record());
        app.pump_events();

        assert_eq!(app.ui_state.panel_width, Some(240));
        assert_eq!(app.document().xml, "<d0/>");
        assert_eq!(app.document().revision, 0);

        let mut remembered = None;
        for _ in 0..50 {
            remembered = app.panel_state.load().await.unwrap();
            if remembered.is_some() {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(remembered.map(|s| s.properties_panel_width), Some(240));
    }

    #[tokio::test]
    async fn test_burst_of_resizes_keeps_latest_width() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, editor) = mounted_app(&temp_dir, "<d0/>").await;

        for width in [100, 200, 300] {
            editor.emit(ModelerEvent::PanelResized(PanelResized { width }).to_record());
        }
        app.pump_events();
        assert_eq!(app.ui_state.panel_width, Some(300));

        let mut remembered = None;
        for _ in 0..50 {
            remembered = app
                .panel_state
                .load()
                .await
                .unwrap()
                .map(|s| s.properties_panel_width);
            if remembered == Some(300) {
                break;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        assert_eq!(remembered, Some(300));

        // Nothing older lands after the latest width.
        tokio::time::sleep(Duration::from_millis(50)).await;
        let state = app.panel_state.load().await.unwrap().unwrap();
        assert_eq!(state.properties_panel_width, 300);
    }

    #[tokio::test]
    async fn test_remembered_width_seeds_options() {
        let temp_dir = TempDir::new().unwrap();
        let store = PanelStateStore::at(temp_dir.path().join("panel-state.json"));
        let saved: PanelState = store.save(310).await.unwrap();
        assert_eq!(saved.properties_panel_width, 310);

        let mut app = test_app(&temp_dir, Config::default(), "<d0/>").await;
        let initial = app.editor_options().modeler_tab.properties_panel.size.initial;
        assert_eq!(initial, Some(310));

        let mut config = Config::default();
        config.options.modeler_tab.properties_panel.size.initial = Some(200);
        let mut app = test_app(&temp_dir, config, "<d0/>").await;
        let initial = app.editor_options().modeler_tab.properties_panel.size.initial;
        assert_eq!(initial, Some(200));

        let mut config = Config::default();
        config.ui.remember_panel_width = false;
        let mut app = test_app(&temp_dir, config, "<d0/>").await;
        let initial = app.editor_options().modeler_tab.properties_panel.size.initial;
        assert_eq!(initial, None);
    }

    #[tokio::test]
    async fn test_save_returns_editor_state() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, editor) = mounted_app(&temp_dir, "<d0/>").await;

        editor.edit("<d2/>").await;
        app.trigger_save();
        assert!(app.ui_state.save_in_flight);

        let outcome = settle_save(&mut app).await;
        assert_eq!(outcome.unwrap().xml, "<d2/>");
        assert_eq!(app.last_saved().unwrap().xml, "<d2/>");
        assert!(!app.ui_state.save_in_flight);
        // Saving does not touch the document; only content-saved events do.
        assert_eq!(app.document().xml, "<d0/>");
        assert_eq!(
            app.ui_state.status_manager.current().unwrap().message_type,
            MessageType::Success
        );
    }

    #[tokio::test]
    async fn test_save_without_editor_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = test_app(&temp_dir, Config::default(), "<d0/>").await;

        app.trigger_save();
        assert_eq!(
            settle_save(&mut app).await,
            Err(BridgeError::HandleUnavailable)
        );
        assert!(app.last_saved().is_none());
        assert_eq!(
            app.ui_state.status_manager.current().unwrap().message_type,
            MessageType::Warning
        );
    }

    #[tokio::test]
    async fn test_save_after_shutdown_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, editor) = mounted_app(&temp_dir, "<d0/>").await;

        app.shutdown().await;
        assert!(!editor.is_alive());
        assert_eq!(app.editor_name(), None);

        app.trigger_save();
        assert_eq!(
            settle_save(&mut app).await,
            Err(BridgeError::HandleUnavailable)
        );
    }

    #[tokio::test]
    async fn test_save_in_flight_at_teardown_is_dropped() {
        let temp_dir = TempDir::new().unwrap();
        let mut app = test_app(&temp_dir, Config::default(), "<d0/>").await;
        let options = app.editor_options();
        let (editor, events) =
            MemoryEditor::mount_with_delay("<d0/>", options.clone(), Some(Duration::from_millis(50)));
        app.attach(editor.clone(), events, options).await;

        let in_flight = app.trigger_save().unwrap();
        assert!(app.trigger_save().is_none());
        drop(app);

        tokio::time::timeout(Duration::from_secs(2), in_flight)
            .await
            .unwrap()
            .unwrap();
        assert!(editor.is_alive());
    }

    #[tokio::test]
    async fn test_reload_config_resizes_event_log() {
        use crate::config::tests::{env_lock, restore_config_path, set_config_path};

        let _guard = env_lock();
        let temp_dir = TempDir::new().unwrap();
        let (mut app, editor) = mounted_app(&temp_dir, "<d0/>").await;

        for i in 0..5 {
            editor.emit(serde_json::json!({"source": "elsewhere", "event": format!("ping {}", i)}));
        }
        app.pump_events();
        assert_eq!(app.ui_state.event_log_len(), 5);

        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{"ui": {"line_numbers": true, "event_log_capacity": 2, "remember_panel_width": true}}"#)
            .unwrap();
        let previous = set_config_path(&path);
        app.reload_config().await;
        restore_config_path(previous);

        assert_eq!(app.config.ui.event_log_capacity, 2);
        assert_eq!(app.ui_state.event_log_len(), 2);

        editor.emit(serde_json::json!({"source": "elsewhere", "event": "ping 5"}));
        app.pump_events();
        assert_eq!(app.ui_state.event_log_len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_and_malformed_events_are_logged() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, editor) = mounted_app(&temp_dir, "<d0/>").await;

        editor.emit(serde_json::json!({"source": "elsewhere", "event": "ping"}));
        editor.emit(serde_json::json!({
            "source": "modeler",
            "event": "properties-panel.resized",
            "data": {"width": "wide"}
        }));
        app.pump_events();

        let kinds: Vec<_> = app.ui_state.event_log().map(|e| e.kind).collect();
        assert_eq!(kinds, vec![EventKind::Unknown, EventKind::PanelResized]);
        assert_eq!(app.ui_state.panel_width, None);
        assert_eq!(app.document().revision, 0);
    }

    #[tokio::test]
    async fn test_key_bindings() {
        let temp_dir = TempDir::new().unwrap();
        let (mut app, _editor) = mounted_app(&temp_dir, "<d0/>").await;

        app.handle_key_event(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::NONE))
            .await
            .unwrap();
        assert!(app.ui_state.is_help_shown());

        // Keys other than the close keys are swallowed by the help screen
        app.handle_key_event(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE))
            .await
            .unwrap();
        assert!(!app.ui_state.save_in_flight);

        app.handle_key_event(KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE))
            .await
            .unwrap();
        assert!(!app.ui_state.is_help_shown());
        assert!(!app.should_quit());

        app.handle_key_event(KeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL))
            .await
            .unwrap();
        assert!(app.ui_state.save_in_flight);
        settle_save(&mut app).await.unwrap();

        app.handle_key_event(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE))
            .await
            .unwrap();
        assert!(app.should_quit());
    }
}
