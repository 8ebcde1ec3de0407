// App state and main event loop.
// Wires the tab navigator, panes, fetch-status modal, and API tasks together.
// All state mutation happens on the event-loop task; spawned API futures
// communicate back only through channels.

use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::prelude::*;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use crate::api::{ApiClient, ConfigDeploymentDetails, RemoteConfig, RemoteConfigDetails};
use crate::cache;
use crate::error::Result;
use crate::state::form::FIELD_TOKEN;
use crate::state::{
    Alert, AlertFeed, AlertLevel, ConfigsPaneState, FetchDetailsState, LoadingState,
    NavigatorConfig, Notifier, SettingsForm, TabNavigator, TabPane,
};
use crate::ui;

/// Pane order in the navigator.
pub const CONFIGURATIONS_PANE: usize = 0;
pub const SETTINGS_PANE: usize = 1;
pub const ACTIVITY_PANE: usize = 2;

/// Messages sent back to the event loop from navigator callbacks and spawned
/// API tasks.
pub enum AppEvent {
    NavigatorInitialized {
        panes_length: usize,
    },
    TabChanged {
        index: usize,
    },
    ConfigsLoaded(std::result::Result<Vec<RemoteConfig>, String>),
    DetailsLoaded {
        id: String,
        result: std::result::Result<RemoteConfigDetails, String>,
    },
    StatusLoaded {
        id: String,
        result: std::result::Result<ConfigDeploymentDetails, String>,
    },
    RedeployFinished {
        id: String,
    },
    ConfigSaved {
        id: String,
        success: bool,
    },
}

/// State the panes render from. Kept apart from the navigator so pane render
/// functions can borrow it mutably while the navigator stays immutable.
pub struct PaneContext {
    pub configs: ConfigsPaneState,
    pub settings: SettingsForm,
    pub alerts: AlertFeed,
}

fn render_configurations_pane(frame: &mut Frame, area: Rect, ctx: &mut PaneContext) {
    ui::list::render_configs_list(frame, &mut ctx.configs.list, area);
}

fn render_settings_pane(frame: &mut Frame, area: Rect, ctx: &mut PaneContext) {
    ui::form::render_settings(frame, &ctx.settings, area);
}

fn render_activity_pane(frame: &mut Frame, area: Rect, ctx: &mut PaneContext) {
    ui::render_activity(frame, &mut ctx.alerts, area);
}

/// Main application state.
pub struct App {
    pub navigator: TabNavigator<PaneContext>,
    pub ctx: PaneContext,
    /// Fetch-status modal, when open.
    pub modal: Option<FetchDetailsState>,
    pub client: Option<ApiClient>,
    /// Pane count reported by the navigator at mount.
    pub panes_length: usize,
    pub should_quit: bool,
    notifier: Notifier,
    alerts_rx: UnboundedReceiver<Alert>,
    events_tx: UnboundedSender<AppEvent>,
    events_rx: UnboundedReceiver<AppEvent>,
}

impl App {
    pub fn new(client: Result<ApiClient>, start_tab: Option<String>) -> Self {
        let (notifier, alerts_rx) = Notifier::channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let panes = vec![
            TabPane::new("Configurations", render_configurations_pane)
                .with_identifier("configurations"),
            TabPane::new("Settings", render_settings_pane).with_identifier("settings"),
            TabPane::new("Activity", render_activity_pane).with_identifier("activity"),
        ];

        let init_tx = events_tx.clone();
        let change_tx = events_tx.clone();
        let navigator = TabNavigator::new(NavigatorConfig {
            panes,
            default_active_index: CONFIGURATIONS_PANE,
            redirect_enabled: start_tab.is_some(),
            redirect_identifier: start_tab,
            on_initialize: Some(Box::new(move |init| {
                let _ = init_tx.send(AppEvent::NavigatorInitialized {
                    panes_length: init.panes_length,
                });
            })),
            on_tab_change: Some(Box::new(move |_event: &KeyEvent, index| {
                let _ = change_tx.send(AppEvent::TabChanged { index });
            })),
        });

        let mut ctx = PaneContext {
            configs: ConfigsPaneState::new(),
            settings: SettingsForm::new(),
            alerts: AlertFeed::new(),
        };

        let client = match client {
            Ok(client) => Some(client),
            Err(err) => {
                ctx.alerts
                    .push(Alert::warning("Not connected", err.to_string()));
                None
            }
        };

        Self {
            navigator,
            ctx,
            modal: None,
            client,
            panes_length: 0,
            should_quit: false,
            notifier,
            alerts_rx,
            events_tx,
            events_rx,
        }
    }

    /// Main event loop.
    pub async fn run(&mut self, terminal: &mut Terminal<impl Backend>) -> Result<()> {
        self.navigator.mount();
        self.load_configs(false);

        while !self.should_quit {
            terminal.draw(|frame| ui::draw(frame, self))?;
            self.drain_events();
            self.handle_input()?;
        }
        Ok(())
    }

    /// Drain alerts and app events produced since the last tick.
    fn drain_events(&mut self) {
        while let Ok(alert) = self.alerts_rx.try_recv() {
            self.ctx.alerts.push(alert);
        }
        while let Ok(event) = self.events_rx.try_recv() {
            self.handle_app_event(event);
        }
        // Alerts arriving while the feed is visible are read immediately
        if self.navigator.current_index() == ACTIVITY_PANE {
            self.ctx.alerts.mark_read();
        }
    }

    fn handle_app_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::NavigatorInitialized { panes_length } => {
                self.panes_length = panes_length;
            }
            AppEvent::TabChanged { index } => {
                if index == ACTIVITY_PANE {
                    self.ctx.alerts.mark_read();
                }
                if index == SETTINGS_PANE {
                    self.load_selected_details();
                }
            }
            AppEvent::ConfigsLoaded(result) => match result {
                Ok(items) => {
                    self.ctx.configs.list.set_loaded(items);
                    // A deep link straight to Settings arrives before any
                    // data; bind the form once the list is available.
                    if self.navigator.current_index() == SETTINGS_PANE
                        && self.ctx.settings.config_id.is_none()
                    {
                        self.load_selected_details();
                    }
                }
                Err(e) => {
                    self.ctx.configs.list.set_error(e);
                    // The failure landed in the Activity feed; make that pane
                    // the default so it is what the user sees
                    self.navigator.set_default_active_index(ACTIVITY_PANE);
                }
            },
            AppEvent::DetailsLoaded { id, result } => match result {
                Ok(details) => {
                    let selected = self
                        .ctx
                        .configs
                        .list
                        .selected_item()
                        .map(|config| config.id.clone());
                    if selected.as_deref() == Some(id.as_str()) {
                        self.ctx.settings.populate(&details);
                    }
                    self.ctx.settings.loading = false;
                    self.ctx.configs.details = LoadingState::Loaded(details);
                }
                Err(e) => {
                    self.ctx.settings.loading = false;
                    self.ctx.configs.details = LoadingState::Error(e);
                }
            },
            AppEvent::StatusLoaded { id, result } => {
                if let Some(modal) = self.modal.as_mut() {
                    if modal.config_id == id {
                        match result {
                            Ok(details) => modal.status_loaded(details),
                            Err(e) => modal.status_failed(e),
                        }
                    }
                }
            }
            AppEvent::RedeployFinished { id } => {
                if let Some(modal) = self.modal.as_mut() {
                    if modal.config_id == id {
                        modal.redeploying = false;
                    }
                }
            }
            AppEvent::ConfigSaved { id: _, success } => {
                if success {
                    self.ctx.settings.saved();
                } else {
                    self.ctx.settings.saving = false;
                }
            }
        }
    }

    /// Handle keyboard events, routed by what currently captures input.
    fn handle_input(&mut self) -> Result<()> {
        if !event::poll(Duration::from_millis(100))? {
            return Ok(());
        }
        let Event::Key(key) = event::read()? else {
            return Ok(());
        };
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        if self.modal.is_some() {
            self.handle_modal_key(key);
            return Ok(());
        }
        if self.navigator.current_index() == SETTINGS_PANE && self.ctx.settings.editing {
            self.handle_editing_key(key);
            return Ok(());
        }
        self.handle_global_key(key);
        Ok(())
    }

    fn handle_global_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab => self.navigator.select_next_by_user(&key),
            KeyCode::BackTab => self.navigator.select_prev_by_user(&key),
            KeyCode::Char(c @ '1'..='9') => {
                // Direct selection is not bounds-checked; an out-of-range pane
                // simply renders nothing until the next selection.
                let index = (c as usize) - ('1' as usize);
                self.navigator.select_by_user(&key, index);
            }
            KeyCode::Char('r') => self.refresh_current_pane(),
            _ => match self.navigator.current_index() {
                CONFIGURATIONS_PANE => self.handle_configs_key(key),
                SETTINGS_PANE => self.handle_settings_key(key),
                ACTIVITY_PANE => self.handle_activity_key(key),
                _ => {}
            },
        }
    }

    fn handle_configs_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.ctx.configs.list.select_prev(),
            KeyCode::Down => self.ctx.configs.list.select_next(),
            KeyCode::Enter => self.open_fetch_details(),
            _ => {}
        }
    }

    fn handle_settings_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.ctx.settings.focus_prev(),
            KeyCode::Down => self.ctx.settings.focus_next(),
            KeyCode::Enter => self.ctx.settings.activate_focused(),
            KeyCode::Char('s') => self.save_settings(),
            KeyCode::Char('v') => {
                if self.ctx.settings.focus == FIELD_TOKEN {
                    self.ctx.settings.token.revealed = !self.ctx.settings.token.revealed;
                }
            }
            _ => {}
        }
    }

    fn handle_activity_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.ctx.alerts.select_prev(),
            KeyCode::Down => self.ctx.alerts.select_next(),
            _ => {}
        }
    }

    fn handle_editing_key(&mut self, key: KeyEvent) {
        let form = &mut self.ctx.settings;
        match key.code {
            KeyCode::Esc => form.stop_editing(),
            KeyCode::Enter => form.activate_focused(),
            KeyCode::Tab => form.focus_next(),
            KeyCode::Backspace => {
                if let Some(field) = form.focused_field_mut() {
                    field.backspace();
                }
            }
            KeyCode::Char(c) => {
                if let Some(field) = form.focused_field_mut() {
                    field.on_change(c);
                }
            }
            _ => {}
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.modal = None,
            KeyCode::Char('r') => self.trigger_redeploy(),
            code => {
                if let Some(modal) = self.modal.as_mut() {
                    match code {
                        KeyCode::Up => modal.cursor_prev(),
                        KeyCode::Down => modal.cursor_next(),
                        KeyCode::Enter => {
                            let index = modal.cursor;
                            modal.toggle_section(index);
                        }
                        KeyCode::Char('j') => modal.scroll_down(),
                        KeyCode::Char('k') => modal.scroll_up(),
                        KeyCode::PageDown => modal.page_down(),
                        KeyCode::PageUp => modal.page_up(),
                        _ => {}
                    }
                }
            }
        }
    }

    fn refresh_current_pane(&mut self) {
        match self.navigator.current_index() {
            CONFIGURATIONS_PANE => self.load_configs(true),
            SETTINGS_PANE => {
                let Some(id) = self.ctx.settings.config_id.clone() else {
                    return;
                };
                self.ctx.settings.loading = true;
                self.spawn_details_fetch(id);
            }
            _ => {}
        }
    }

    /// Load the configuration list, from the cache when fresh unless forced.
    fn load_configs(&mut self, force: bool) {
        let Some(client) = self.client.clone() else {
            self.ctx
                .configs
                .list
                .set_error("Not connected to an identity server".to_string());
            return;
        };

        if !force {
            if let Some(path) = cache::paths::configs_path(client.server_url()) {
                if let Ok(Some(configs)) = cache::store::read_fresh::<Vec<RemoteConfig>>(
                    &path,
                    cache::store::DEFAULT_TTL,
                ) {
                    self.ctx.configs.list.set_loaded(configs);
                    return;
                }
            }
        }

        self.ctx.configs.list.set_loading();
        let notifier = self.notifier.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = match client.list_remote_configs().await {
                Ok(configs) => {
                    if let Some(path) = cache::paths::configs_path(client.server_url()) {
                        let _ = cache::store::write_entry(&path, &configs);
                    }
                    Ok(configs)
                }
                Err(err) => {
                    notifier.notify(
                        AlertLevel::Error,
                        "Failed to load configurations",
                        err.to_string(),
                    );
                    Err(err.to_string())
                }
            };
            let _ = tx.send(AppEvent::ConfigsLoaded(result));
        });
    }

    /// Bind the Settings form to the selected configuration, fetching its
    /// details when they are not already loaded.
    fn load_selected_details(&mut self) {
        let Some(id) = self
            .ctx
            .configs
            .list
            .selected_item()
            .map(|config| config.id.clone())
        else {
            return;
        };

        if let Some(details) = self.ctx.configs.details_for(&id) {
            let details = details.clone();
            self.ctx.settings.populate(&details);
            return;
        }

        self.ctx.settings.loading = true;
        self.spawn_details_fetch(id);
    }

    fn spawn_details_fetch(&mut self, id: String) {
        let Some(client) = self.client.clone() else {
            self.ctx.settings.loading = false;
            return;
        };

        self.ctx.configs.details = LoadingState::Loading;
        let notifier = self.notifier.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.get_remote_config(&id).await.map_err(|err| {
                notifier.notify(
                    AlertLevel::Error,
                    "Failed to load configuration details",
                    err.to_string(),
                );
                err.to_string()
            });
            let _ = tx.send(AppEvent::DetailsLoaded { id, result });
        });
    }

    /// Open the fetch-status modal for the selected configuration.
    fn open_fetch_details(&mut self) {
        let Some(config) = self.ctx.configs.list.selected_item().cloned() else {
            return;
        };
        if self.client.is_none() {
            self.ctx.alerts.push(Alert::warning(
                "Not connected",
                "Connect to an identity server to inspect deployment status",
            ));
            return;
        }

        self.modal = Some(FetchDetailsState::open(&config));
        self.spawn_status_fetch(config.id.clone());

        // The modal header shows the repository URI from the details
        if self.ctx.configs.details_for(&config.id).is_none() {
            self.spawn_details_fetch(config.id);
        }
    }

    fn spawn_status_fetch(&mut self, id: String) {
        let Some(client) = self.client.clone() else {
            return;
        };

        let notifier = self.notifier.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let result = client.get_config_deployment_details(&id).await.map_err(|err| {
                notifier.notify(
                    AlertLevel::Error,
                    "Error while fetching the remote configuration details",
                    err.to_string(),
                );
                err.to_string()
            });
            let _ = tx.send(AppEvent::StatusLoaded { id, result });
        });
    }

    /// Trigger a redeployment from the fetch-status modal.
    fn trigger_redeploy(&mut self) {
        let Some(modal) = self.modal.as_mut() else {
            return;
        };
        if modal.redeploying {
            return;
        }
        let Some(client) = self.client.clone() else {
            return;
        };

        modal.redeploying = true;
        let id = modal.config_id.clone();
        let notifier = self.notifier.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            match client.trigger_config_deployment(&id).await {
                Ok(()) => notifier.notify(
                    AlertLevel::Success,
                    "Successfully refetched applications",
                    "The applications were queued for redeployment",
                ),
                Err(err) => notifier.notify(
                    AlertLevel::Error,
                    "Error while refetching applications",
                    err.to_string(),
                ),
            }
            let _ = tx.send(AppEvent::RedeployFinished { id });
        });
    }

    /// Validate and save the Settings form.
    fn save_settings(&mut self) {
        if self.ctx.settings.saving {
            return;
        }
        let Some(id) = self.ctx.settings.config_id.clone() else {
            self.ctx.alerts.push(Alert::warning(
                "Nothing to save",
                "Select a configuration first",
            ));
            return;
        };
        if !self.ctx.settings.validate_all() {
            self.ctx.alerts.push(Alert::warning(
                "Validation failed",
                "Fix the highlighted fields and try again",
            ));
            return;
        }
        let Some(client) = self.client.clone() else {
            return;
        };

        self.ctx.settings.saving = true;
        let attributes = self.ctx.settings.attributes();
        let is_enabled = self.ctx.settings.enabled.checked;
        let notifier = self.notifier.clone();
        let tx = self.events_tx.clone();
        tokio::spawn(async move {
            let success = match client.update_remote_config(&id, is_enabled, &attributes).await {
                Ok(()) => {
                    notifier.notify(
                        AlertLevel::Success,
                        "Configuration updated",
                        "Saved repository attributes",
                    );
                    // The cached list no longer reflects the server
                    if let Some(path) = cache::paths::configs_path(client.server_url()) {
                        let _ = cache::store::invalidate(&path);
                    }
                    true
                }
                Err(err) => {
                    notifier.notify(
                        AlertLevel::Error,
                        "Failed to update configuration",
                        err.to_string(),
                    );
                    false
                }
            };
            let _ = tx.send(AppEvent::ConfigSaved { id, success });
        });
    }
}
