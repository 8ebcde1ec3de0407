// Configurations pane state.
// Holds the remote configuration list, the selected configuration's details,
// and generic loading/list-selection helpers shared by the other panes.

use ratatui::widgets::ListState;

use crate::api::{RemoteConfig, RemoteConfigDetails};

/// Loading state for async data.
#[derive(Debug, Clone, Default)]
pub enum LoadingState<T> {
    #[default]
    Idle,
    Loading,
    Loaded(T),
    Error(String),
}

impl<T> LoadingState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadingState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadingState::Loaded(data) => Some(data),
            _ => None,
        }
    }
}

/// State for a selectable list with keyboard navigation.
#[derive(Debug, Clone)]
pub struct SelectableList<T> {
    pub data: LoadingState<Vec<T>>,
    pub list_state: ListState,
}

impl<T> Default for SelectableList<T> {
    fn default() -> Self {
        Self {
            data: LoadingState::Idle,
            list_state: ListState::default(),
        }
    }
}

impl<T> SelectableList<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the currently selected index.
    pub fn selected(&self) -> Option<usize> {
        self.list_state.selected()
    }

    /// Select the next item in the list.
    pub fn select_next(&mut self) {
        if let Some(items) = self.data.data() {
            if items.is_empty() {
                return;
            }
            let i = match self.list_state.selected() {
                Some(i) => (i + 1).min(items.len() - 1),
                None => 0,
            };
            self.list_state.select(Some(i));
        }
    }

    /// Select the previous item in the list.
    pub fn select_prev(&mut self) {
        if let Some(items) = self.data.data() {
            if items.is_empty() {
                return;
            }
            let i = match self.list_state.selected() {
                Some(i) => i.saturating_sub(1),
                None => 0,
            };
            self.list_state.select(Some(i));
        }
    }

    /// Get the selected item.
    pub fn selected_item(&self) -> Option<&T> {
        let index = self.list_state.selected()?;
        self.data.data()?.get(index)
    }

    /// Reset selection to the first item.
    pub fn reset_selection(&mut self) {
        match self.data.data() {
            Some(items) if !items.is_empty() => self.list_state.select(Some(0)),
            _ => self.list_state.select(None),
        }
    }

    /// Set loaded data.
    pub fn set_loaded(&mut self, items: Vec<T>) {
        self.data = LoadingState::Loaded(items);
        self.reset_selection();
    }

    /// Set loading state.
    pub fn set_loading(&mut self) {
        self.data = LoadingState::Loading;
    }

    /// Set error state.
    pub fn set_error(&mut self, error: String) {
        self.data = LoadingState::Error(error);
    }
}

/// Complete state for the Configurations pane.
#[derive(Debug, Default)]
pub struct ConfigsPaneState {
    /// Remote-fetch configurations registered on the server.
    pub list: SelectableList<RemoteConfig>,
    /// Details of the most recently requested configuration.
    pub details: LoadingState<RemoteConfigDetails>,
}

impl ConfigsPaneState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Details for the given configuration, if they are what's loaded.
    pub fn details_for(&self, id: &str) -> Option<&RemoteConfigDetails> {
        self.details.data().filter(|details| details.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(id: &str, name: &str) -> RemoteConfig {
        RemoteConfig {
            id: id.to_string(),
            remote_fetch_name: name.to_string(),
            is_enabled: true,
            repository_manager_type: "GIT".to_string(),
            action_listener_type: "POLLING".to_string(),
            config_deployer_type: "SP".to_string(),
        }
    }

    #[test]
    fn test_selection_clamps_at_both_ends() {
        let mut list = SelectableList::new();
        list.set_loaded(vec![config("1", "a"), config("2", "b"), config("3", "c")]);
        assert_eq!(list.selected(), Some(0));

        list.select_prev();
        assert_eq!(list.selected(), Some(0));

        list.select_next();
        list.select_next();
        list.select_next();
        assert_eq!(list.selected(), Some(2));
        assert_eq!(list.selected_item().unwrap().id, "3");
    }

    #[test]
    fn test_selection_ignored_while_not_loaded() {
        let mut list: SelectableList<RemoteConfig> = SelectableList::new();
        list.select_next();
        assert_eq!(list.selected(), None);

        list.set_loading();
        assert!(list.data.is_loading());
        list.select_next();
        assert_eq!(list.selected(), None);
    }

    #[test]
    fn test_empty_load_clears_selection() {
        let mut list: SelectableList<RemoteConfig> = SelectableList::new();
        list.set_loaded(vec![config("1", "a")]);
        assert_eq!(list.selected(), Some(0));

        list.set_loaded(Vec::new());
        assert_eq!(list.selected(), None);
    }
}
