// State management module.
// Pane navigation, alert feed, configuration data, modal, and form state.

#![allow(dead_code)]

pub mod alerts;
pub mod configs;
pub mod fetch_details;
pub mod form;
pub mod tabs;

pub use alerts::{Alert, AlertFeed, AlertLevel, Notifier};
pub use configs::{ConfigsPaneState, LoadingState, SelectableList};
pub use fetch_details::FetchDetailsState;
pub use form::SettingsForm;
pub use tabs::{NavigatorConfig, PanesInit, TabNavigator, TabPane};
