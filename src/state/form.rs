// Settings form state.
// Field adapters over the selected configuration's repository attributes:
// value editing, blur-time validation, and dirty tracking.

use crate::api::{RemoteConfigDetails, RepositoryManagerAttributes};

/// Validates a field value, returning an error message on failure.
pub type ValidateFn = fn(&str) -> Option<String>;

/// A single editable text field.
#[derive(Debug, Clone)]
pub struct FieldState {
    pub label: String,
    pub value: String,
    initial: String,
    pub required: bool,
    /// The user changed the value at least once.
    pub modified: bool,
    /// The field lost focus at least once.
    pub touched: bool,
    pub error: Option<String>,
    /// Render the value masked unless revealed.
    pub secret: bool,
    pub revealed: bool,
    validate: Option<ValidateFn>,
}

impl FieldState {
    pub fn text(label: impl Into<String>, required: bool) -> Self {
        Self {
            label: label.into(),
            value: String::new(),
            initial: String::new(),
            required,
            modified: false,
            touched: false,
            error: None,
            secret: false,
            revealed: false,
            validate: None,
        }
    }

    pub fn secret(label: impl Into<String>, required: bool) -> Self {
        Self {
            secret: true,
            ..Self::text(label, required)
        }
    }

    pub fn with_validator(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    /// Replace the value from loaded data and clear edit tracking.
    pub fn reset(&mut self, value: impl Into<String>) {
        self.value = value.into();
        self.initial = self.value.clone();
        self.modified = false;
        self.touched = false;
        self.error = None;
    }

    /// Append a typed character.
    pub fn on_change(&mut self, c: char) {
        self.value.push(c);
        self.modified = true;
    }

    pub fn backspace(&mut self) {
        if self.value.pop().is_some() {
            self.modified = true;
        }
    }

    /// Leaving the field validates it.
    pub fn on_blur(&mut self) {
        self.touched = true;
        self.error = self.run_validation();
    }

    fn run_validation(&self) -> Option<String> {
        if self.required && self.value.trim().is_empty() {
            return Some(format!("{} is required", self.label));
        }
        self.validate.and_then(|validate| validate(&self.value))
    }

    /// Error to render beneath the field. Pristine fields stay silent even
    /// when invalid; only a modified or blurred field shows its error.
    pub fn display_error(&self) -> Option<&str> {
        if self.modified || self.touched {
            self.error.as_deref()
        } else {
            None
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.value != self.initial
    }

    /// Value as rendered: secrets are masked unless revealed.
    pub fn display_value(&self) -> String {
        if self.secret && !self.revealed {
            "•".repeat(self.value.chars().count())
        } else {
            self.value.clone()
        }
    }
}

/// A boolean toggle field.
#[derive(Debug, Clone)]
pub struct ToggleState {
    pub label: String,
    pub checked: bool,
    initial: bool,
}

impl ToggleState {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            checked: false,
            initial: false,
        }
    }

    pub fn reset(&mut self, checked: bool) {
        self.checked = checked;
        self.initial = checked;
    }

    pub fn toggle(&mut self) {
        self.checked = !self.checked;
    }

    pub fn is_dirty(&self) -> bool {
        self.checked != self.initial
    }
}

fn validate_uri(value: &str) -> Option<String> {
    let value = value.trim();
    if value.is_empty() {
        return None; // required-ness is checked separately
    }
    let looks_like_repo = value.starts_with("https://")
        || value.starts_with("http://")
        || value.starts_with("git@")
        || value.starts_with("ssh://");
    if looks_like_repo {
        None
    } else {
        Some("URI must be an http(s), ssh, or git remote".to_string())
    }
}

/// Fields of the Settings pane, in focus order.
pub const FIELD_URI: usize = 0;
pub const FIELD_BRANCH: usize = 1;
pub const FIELD_DIRECTORY: usize = 2;
pub const FIELD_TOKEN: usize = 3;
pub const FIELD_ENABLED: usize = 4;
pub const FIELD_COUNT: usize = 5;

/// Form over the selected configuration's repository attributes.
#[derive(Debug)]
pub struct SettingsForm {
    /// Configuration the form is bound to, once details have loaded.
    pub config_id: Option<String>,
    pub loading: bool,
    pub saving: bool,
    pub uri: FieldState,
    pub branch: FieldState,
    pub directory: FieldState,
    pub token: FieldState,
    pub enabled: ToggleState,
    /// Focused field, indexed by the FIELD_* constants.
    pub focus: usize,
    /// The focused text field is in edit mode and captures keystrokes.
    pub editing: bool,
}

impl Default for SettingsForm {
    fn default() -> Self {
        Self {
            config_id: None,
            loading: false,
            saving: false,
            uri: FieldState::text("Repository URI", true).with_validator(validate_uri),
            branch: FieldState::text("Branch", true),
            directory: FieldState::text("Directory", false),
            token: FieldState::secret("Access token", false),
            enabled: ToggleState::new("Fetch enabled"),
            focus: FIELD_URI,
            editing: false,
        }
    }
}

impl SettingsForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind the form to a loaded configuration.
    pub fn populate(&mut self, details: &RemoteConfigDetails) {
        let attributes = &details.repository_manager_attributes;
        self.config_id = Some(details.id.clone());
        self.loading = false;
        self.uri.reset(attributes.uri.clone());
        self.branch.reset(attributes.branch.clone());
        self.directory.reset(attributes.directory.clone());
        self.token.reset(attributes.access_token.clone().unwrap_or_default());
        self.enabled.reset(details.is_enabled);
        self.focus = FIELD_URI;
        self.editing = false;
    }

    pub fn focused_field_mut(&mut self) -> Option<&mut FieldState> {
        match self.focus {
            FIELD_URI => Some(&mut self.uri),
            FIELD_BRANCH => Some(&mut self.branch),
            FIELD_DIRECTORY => Some(&mut self.directory),
            FIELD_TOKEN => Some(&mut self.token),
            _ => None,
        }
    }

    fn blur_focused(&mut self) {
        if let Some(field) = self.focused_field_mut() {
            field.on_blur();
        }
    }

    /// Move focus down one field, blurring the current one.
    pub fn focus_next(&mut self) {
        self.blur_focused();
        self.editing = false;
        self.focus = (self.focus + 1) % FIELD_COUNT;
    }

    /// Move focus up one field, blurring the current one.
    pub fn focus_prev(&mut self) {
        self.blur_focused();
        self.editing = false;
        self.focus = if self.focus == 0 {
            FIELD_COUNT - 1
        } else {
            self.focus - 1
        };
    }

    /// Enter acts on the focused field: toggles the checkbox, or starts /
    /// ends editing on a text field (ending blurs, per field semantics).
    pub fn activate_focused(&mut self) {
        if self.focus == FIELD_ENABLED {
            self.enabled.toggle();
            return;
        }
        if self.editing {
            self.editing = false;
            self.blur_focused();
        } else {
            self.editing = true;
        }
    }

    /// Stop editing without moving focus (Escape).
    pub fn stop_editing(&mut self) {
        if self.editing {
            self.editing = false;
            self.blur_focused();
        }
    }

    /// Blur-validate every field. True when the form is submittable.
    pub fn validate_all(&mut self) -> bool {
        self.uri.on_blur();
        self.branch.on_blur();
        self.directory.on_blur();
        self.token.on_blur();
        self.uri.error.is_none()
            && self.branch.error.is_none()
            && self.directory.error.is_none()
            && self.token.error.is_none()
    }

    pub fn is_dirty(&self) -> bool {
        self.uri.is_dirty()
            || self.branch.is_dirty()
            || self.directory.is_dirty()
            || self.token.is_dirty()
            || self.enabled.is_dirty()
    }

    /// Current values as repository attributes for the update call.
    pub fn attributes(&self) -> RepositoryManagerAttributes {
        let token = self.token.value.trim();
        RepositoryManagerAttributes {
            uri: self.uri.value.trim().to_string(),
            branch: self.branch.value.trim().to_string(),
            directory: self.directory.value.trim().to_string(),
            access_token: (!token.is_empty()).then(|| token.to_string()),
            polling_frequency: None,
        }
    }

    /// Mark the saved values as the new pristine baseline.
    pub fn saved(&mut self) {
        self.saving = false;
        let uri = self.uri.value.clone();
        self.uri.reset(uri);
        let branch = self.branch.value.clone();
        self.branch.reset(branch);
        let directory = self.directory.value.clone();
        self.directory.reset(directory);
        let token = self.token.value.clone();
        self.token.reset(token);
        self.enabled.reset(self.enabled.checked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details() -> RemoteConfigDetails {
        RemoteConfigDetails {
            id: "cfg-1".to_string(),
            remote_fetch_name: "sp-sync".to_string(),
            is_enabled: true,
            repository_manager_type: "GIT".to_string(),
            action_listener_type: "POLLING".to_string(),
            config_deployer_type: "SP".to_string(),
            repository_manager_attributes: RepositoryManagerAttributes {
                uri: "https://github.com/acme/idp-configs".to_string(),
                branch: "main".to_string(),
                directory: "sps/".to_string(),
                access_token: None,
                polling_frequency: None,
            },
        }
    }

    #[test]
    fn test_pristine_field_hides_its_error() {
        let mut form = SettingsForm::new();
        form.populate(&details());
        form.branch.reset("");

        // Invalid but untouched: nothing rendered
        assert!(form.branch.display_error().is_none());

        form.branch.on_blur();
        assert_eq!(form.branch.display_error(), Some("Branch is required"));
    }

    #[test]
    fn test_uri_validation_on_blur() {
        let mut form = SettingsForm::new();
        form.populate(&details());

        form.uri.reset("");
        for c in "not a uri".chars() {
            form.uri.on_change(c);
        }
        form.uri.on_blur();
        assert!(form.uri.display_error().unwrap().contains("URI"));

        form.uri.reset("git@github.com:acme/idp-configs.git");
        form.uri.on_blur();
        assert!(form.uri.display_error().is_none());
    }

    #[test]
    fn test_validate_all_gates_submission() {
        let mut form = SettingsForm::new();
        form.populate(&details());
        assert!(form.validate_all());

        form.branch.reset("");
        assert!(!form.validate_all());
    }

    #[test]
    fn test_dirty_tracking_and_saved_baseline() {
        let mut form = SettingsForm::new();
        form.populate(&details());
        assert!(!form.is_dirty());

        form.branch.on_change('x');
        assert!(form.is_dirty());

        form.saved();
        assert!(!form.is_dirty());
        assert_eq!(form.branch.value, "mainx");
    }

    #[test]
    fn test_enter_toggles_editing_and_blurs() {
        let mut form = SettingsForm::new();
        form.populate(&details());

        form.activate_focused();
        assert!(form.editing);

        form.activate_focused();
        assert!(!form.editing);
        assert!(form.uri.touched);
    }

    #[test]
    fn test_focus_wraps_and_enter_toggles_checkbox() {
        let mut form = SettingsForm::new();
        form.populate(&details());

        form.focus_prev();
        assert_eq!(form.focus, FIELD_ENABLED);

        form.activate_focused();
        assert!(!form.enabled.checked);
        assert!(form.enabled.is_dirty());

        form.focus_next();
        assert_eq!(form.focus, FIELD_URI);
    }

    #[test]
    fn test_secret_display_masks_value() {
        let mut field = FieldState::secret("Token", true);
        field.reset("hunter2");
        assert_eq!(field.display_value(), "•••••••");

        field.revealed = true;
        assert_eq!(field.display_value(), "hunter2");
    }
}
