// Fetch-status modal state.
// Tracks the deployment status request for one configuration, the accordion
// of expanded failure sections, and the redeploy trigger.

use crate::api::{ConfigDeploymentDetails, RemoteConfig};

use super::configs::LoadingState;

/// State for the fetch-status modal of a single configuration.
#[derive(Debug)]
pub struct FetchDetailsState {
    pub config_id: String,
    pub config_name: String,
    /// Deployment status, loaded when the modal opens.
    pub status: LoadingState<ConfigDeploymentDetails>,
    /// Indices of expanded failure sections, in toggle order.
    expanded: Vec<usize>,
    /// Highlighted failure section.
    pub cursor: usize,
    /// A redeploy trigger is in flight.
    pub redeploying: bool,
    /// Vertical scroll of the modal body.
    pub scroll: u16,
}

impl FetchDetailsState {
    pub fn open(config: &RemoteConfig) -> Self {
        Self {
            config_id: config.id.clone(),
            config_name: config.remote_fetch_name.clone(),
            status: LoadingState::Loading,
            expanded: Vec::new(),
            cursor: 0,
            redeploying: false,
            scroll: 0,
        }
    }

    /// Expand a collapsed section, collapse an expanded one.
    pub fn toggle_section(&mut self, index: usize) {
        if let Some(pos) = self.expanded.iter().position(|&i| i == index) {
            self.expanded.remove(pos);
        } else {
            self.expanded.push(index);
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    /// Number of failed revisions in the loaded status.
    pub fn failed_count(&self) -> usize {
        self.status
            .data()
            .map(|details| details.failed_revisions().count())
            .unwrap_or(0)
    }

    pub fn cursor_next(&mut self) {
        let count = self.failed_count();
        if count > 0 {
            self.cursor = (self.cursor + 1).min(count - 1);
        }
    }

    pub fn cursor_prev(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn page_down(&mut self) {
        self.scroll = self.scroll.saturating_add(10);
    }

    pub fn page_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(10);
    }

    /// Record the arrived deployment status, keeping the cursor in range.
    pub fn status_loaded(&mut self, details: ConfigDeploymentDetails) {
        self.status = LoadingState::Loaded(details);
        self.expanded.clear();
        self.cursor = 0;
        self.scroll = 0;
    }

    pub fn status_failed(&mut self, error: String) {
        self.status = LoadingState::Error(error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{DeployedStatus, RemoteFetchStatus};
    use chrono::Utc;

    fn config() -> RemoteConfig {
        RemoteConfig {
            id: "cfg-1".to_string(),
            remote_fetch_name: "sp-sync".to_string(),
            is_enabled: true,
            repository_manager_type: "GIT".to_string(),
            action_listener_type: "POLLING".to_string(),
            config_deployer_type: "SP".to_string(),
        }
    }

    fn revision(name: &str, status: DeployedStatus) -> RemoteFetchStatus {
        RemoteFetchStatus {
            item_name: name.to_string(),
            deployed_status: status,
            deployed_time: Utc::now(),
            deployment_error_report: String::new(),
        }
    }

    fn status_with(failed: usize, succeeded: usize) -> ConfigDeploymentDetails {
        let mut revisions = Vec::new();
        for i in 0..failed {
            revisions.push(revision(&format!("fail-{}", i), DeployedStatus::Fail));
        }
        for i in 0..succeeded {
            revisions.push(revision(&format!("ok-{}", i), DeployedStatus::Success));
        }
        ConfigDeploymentDetails {
            count: (failed + succeeded) as u32,
            successful_deployments: succeeded as u32,
            failed_deployments: failed as u32,
            last_synchronized_time: None,
            remote_fetch_revision_statuses: revisions,
        }
    }

    #[test]
    fn test_toggle_section_expands_and_collapses() {
        let mut modal = FetchDetailsState::open(&config());

        modal.toggle_section(1);
        modal.toggle_section(3);
        assert!(modal.is_expanded(1));
        assert!(modal.is_expanded(3));
        assert!(!modal.is_expanded(2));

        // Toggling again collapses without disturbing the other section
        modal.toggle_section(1);
        assert!(!modal.is_expanded(1));
        assert!(modal.is_expanded(3));
    }

    #[test]
    fn test_cursor_bounded_by_failed_revisions() {
        let mut modal = FetchDetailsState::open(&config());
        modal.status_loaded(status_with(2, 3));

        assert_eq!(modal.failed_count(), 2);
        modal.cursor_next();
        modal.cursor_next();
        modal.cursor_next();
        assert_eq!(modal.cursor, 1);

        modal.cursor_prev();
        modal.cursor_prev();
        assert_eq!(modal.cursor, 0);
    }

    #[test]
    fn test_cursor_frozen_without_failures() {
        let mut modal = FetchDetailsState::open(&config());
        modal.status_loaded(status_with(0, 2));

        modal.cursor_next();
        assert_eq!(modal.cursor, 0);
    }

    #[test]
    fn test_status_reload_resets_accordion() {
        let mut modal = FetchDetailsState::open(&config());
        modal.status_loaded(status_with(3, 0));
        modal.toggle_section(0);
        modal.cursor_next();

        modal.status_loaded(status_with(1, 0));
        assert!(!modal.is_expanded(0));
        assert_eq!(modal.cursor, 0);
    }
}
