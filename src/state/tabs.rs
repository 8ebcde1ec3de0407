// Tabbed pane navigation for resource screens.
// Owns the active pane index and reconciles it against the caller-supplied
// default, an optional identifier-based redirect at mount, and user selection.

use crossterm::event::KeyEvent;
use ratatui::prelude::*;

/// Render function for a pane's content. The navigator owns no pane content;
/// the caller's context type `C` carries whatever state the pane draws from.
pub type PaneRenderFn<C> = Box<dyn Fn(&mut Frame, Rect, &mut C)>;

/// Callback fired once at mount with the registered pane count.
pub type InitializeFn = Box<dyn FnMut(PanesInit)>;

/// Callback fired on every user-driven pane selection with the raw key event
/// and the newly selected index. Programmatic selection never fires it.
pub type TabChangeFn = Box<dyn FnMut(&KeyEvent, usize)>;

/// Payload passed to the `on_initialize` callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanesInit {
    pub panes_length: usize,
}

/// One selectable content unit within the tabbed navigator.
pub struct TabPane<C> {
    /// Label shown in the tab bar.
    pub menu_item_label: String,
    /// Optional identifier used for redirect resolution. Must be unique among
    /// panes that set one.
    pub identifier: Option<String>,
    /// Draws the pane's content into the given area.
    pub render: PaneRenderFn<C>,
}

impl<C> TabPane<C> {
    pub fn new(
        label: impl Into<String>,
        render: impl Fn(&mut Frame, Rect, &mut C) + 'static,
    ) -> Self {
        Self {
            menu_item_label: label.into(),
            identifier: None,
            render: Box::new(render),
        }
    }

    pub fn with_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.identifier = Some(identifier.into());
        self
    }
}

/// Construction-time configuration for a [`TabNavigator`].
pub struct NavigatorConfig<C> {
    pub panes: Vec<TabPane<C>>,
    pub default_active_index: usize,
    /// When true, the redirect identifier is resolved once at mount.
    pub redirect_enabled: bool,
    pub redirect_identifier: Option<String>,
    pub on_initialize: Option<InitializeFn>,
    pub on_tab_change: Option<TabChangeFn>,
}

impl<C> Default for NavigatorConfig<C> {
    fn default() -> Self {
        Self {
            panes: Vec::new(),
            default_active_index: 0,
            redirect_enabled: false,
            redirect_identifier: None,
            on_initialize: None,
            on_tab_change: None,
        }
    }
}

/// Tabbed navigator over an ordered set of panes.
///
/// The active index is exclusively owned here. It changes through three
/// triggers: a changed default index (continuous sync), the one-shot redirect
/// at mount, and user selection. Selection is not bounds-checked; an
/// out-of-range index deterministically renders no pane rather than failing.
pub struct TabNavigator<C> {
    panes: Vec<TabPane<C>>,
    default_active_index: usize,
    active_index: usize,
    redirect_enabled: bool,
    redirect_identifier: Option<String>,
    mounted: bool,
    on_initialize: Option<InitializeFn>,
    on_tab_change: Option<TabChangeFn>,
}

impl<C> TabNavigator<C> {
    pub fn new(config: NavigatorConfig<C>) -> Self {
        Self {
            active_index: config.default_active_index,
            panes: config.panes,
            default_active_index: config.default_active_index,
            redirect_enabled: config.redirect_enabled,
            redirect_identifier: config.redirect_identifier,
            mounted: false,
            on_initialize: config.on_initialize,
            on_tab_change: config.on_tab_change,
        }
    }

    /// One-shot lifecycle hook: runs the redirect resolution and the
    /// initialization notification. Must be called after construction, before
    /// the first external event is handled. Subsequent calls are no-ops, and a
    /// navigator dropped without being mounted runs neither effect.
    pub fn mount(&mut self) {
        if self.mounted {
            return;
        }
        self.mounted = true;

        if self.redirect_enabled {
            self.resolve_redirect();
        }

        let panes_length = self.panes.len();
        if let Some(on_initialize) = self.on_initialize.as_mut() {
            on_initialize(PanesInit { panes_length });
        }
    }

    /// Map the redirect identifier to a pane index. A miss (no matching pane,
    /// or no identifier supplied) forces the index back to the default rather
    /// than leaving it unchanged.
    fn resolve_redirect(&mut self) {
        let found = self.redirect_identifier.as_deref().and_then(|identifier| {
            self.panes
                .iter()
                .position(|pane| pane.identifier.as_deref() == Some(identifier))
        });

        match found {
            // Already active: skip the redundant write
            Some(index) if index == self.active_index => {}
            Some(index) => self.select(index),
            None => self.select(self.default_active_index),
        }
    }

    /// The currently active pane index.
    pub fn current_index(&self) -> usize {
        self.active_index
    }

    /// Tab bar labels in pane order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.panes.iter().map(|pane| pane.menu_item_label.as_str())
    }

    /// Programmatic selection. Not bounds-checked and fires no callback.
    pub fn select(&mut self, index: usize) {
        self.active_index = index;
    }

    /// User-driven selection: updates the index, then fires `on_tab_change`
    /// with the originating key event.
    pub fn select_by_user(&mut self, event: &KeyEvent, index: usize) {
        self.select(index);
        if let Some(on_tab_change) = self.on_tab_change.as_mut() {
            on_tab_change(event, index);
        }
    }

    /// Cycle forward to the next pane as a user-driven selection.
    pub fn select_next_by_user(&mut self, event: &KeyEvent) {
        if self.panes.is_empty() {
            return;
        }
        let next = (self.active_index + 1) % self.panes.len();
        self.select_by_user(event, next);
    }

    /// Cycle backward to the previous pane as a user-driven selection.
    pub fn select_prev_by_user(&mut self, event: &KeyEvent) {
        if self.panes.is_empty() {
            return;
        }
        let prev = if self.active_index == 0 {
            self.panes.len() - 1
        } else {
            (self.active_index - 1).min(self.panes.len() - 1)
        };
        self.select_by_user(event, prev);
    }

    /// Continuous synchronization with the caller's default index: whenever
    /// the supplied value differs from the stored default, the active index is
    /// reset to match it. No callback fires for these resets.
    pub fn set_default_active_index(&mut self, index: usize) {
        if index != self.default_active_index {
            self.default_active_index = index;
            self.active_index = index;
        }
    }

    /// Draw the active pane's content, or nothing when the active index is out
    /// of range. Pure projection; every switch re-invokes the pane's render.
    pub fn render(&self, frame: &mut Frame, area: Rect, ctx: &mut C) {
        if let Some(pane) = self.panes.get(self.active_index) {
            (pane.render)(frame, area, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn pane(label: &str) -> TabPane<u32> {
        TabPane::new(label, |_frame: &mut Frame, _area: Rect, _ctx: &mut u32| {})
    }

    fn pane_with_id(label: &str, identifier: &str) -> TabPane<u32> {
        pane(label).with_identifier(identifier)
    }

    fn three_panes() -> Vec<TabPane<u32>> {
        vec![
            pane_with_id("General", "general"),
            pane_with_id("Attributes", "attributes"),
            pane_with_id("Advanced", "advanced"),
        ]
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn test_mount_without_redirect_keeps_default() {
        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 1,
            ..Default::default()
        });
        nav.mount();
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_redirect_selects_matching_pane() {
        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 0,
            redirect_enabled: true,
            redirect_identifier: Some("advanced".to_string()),
            ..Default::default()
        });
        nav.mount();
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_redirect_miss_falls_back_to_default() {
        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 1,
            redirect_enabled: true,
            redirect_identifier: Some("nonexistent".to_string()),
            ..Default::default()
        });
        nav.mount();
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_redirect_without_identifier_falls_back_to_default() {
        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 2,
            redirect_enabled: true,
            redirect_identifier: None,
            ..Default::default()
        });
        nav.mount();
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_redirect_disabled_ignores_identifier() {
        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 0,
            redirect_enabled: false,
            redirect_identifier: Some("advanced".to_string()),
            ..Default::default()
        });
        nav.mount();
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_mount_is_idempotent() {
        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 0,
            redirect_enabled: true,
            redirect_identifier: Some("attributes".to_string()),
            ..Default::default()
        });
        nav.mount();
        let after_first = nav.current_index();
        nav.mount();
        assert_eq!(nav.current_index(), after_first);
        assert_eq!(after_first, 1);
    }

    #[test]
    fn test_default_index_change_resets_active() {
        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 0,
            ..Default::default()
        });
        nav.mount();
        nav.set_default_active_index(2);
        assert_eq!(nav.current_index(), 2);
    }

    #[test]
    fn test_unchanged_default_does_not_override_user_selection() {
        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 0,
            ..Default::default()
        });
        nav.mount();
        nav.select_by_user(&key(KeyCode::Char('2')), 1);
        // Same default as before: no reset
        nav.set_default_active_index(0);
        assert_eq!(nav.current_index(), 1);
    }

    #[test]
    fn test_on_initialize_fires_once_with_pane_count() {
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 0,
            on_initialize: Some(Box::new(move |init: PanesInit| {
                sink.borrow_mut().push(init.panes_length);
            })),
            ..Default::default()
        });
        nav.mount();
        nav.mount();

        assert_eq!(*seen.borrow(), vec![3]);
    }

    #[test]
    fn test_on_initialize_absent_is_fine() {
        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 0,
            ..Default::default()
        });
        nav.mount();
        assert_eq!(nav.current_index(), 0);
    }

    #[test]
    fn test_dropped_unmounted_navigator_runs_no_effects() {
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 0,
            redirect_enabled: true,
            redirect_identifier: Some("advanced".to_string()),
            on_initialize: Some(Box::new(move |init: PanesInit| {
                sink.borrow_mut().push(init.panes_length);
            })),
            ..Default::default()
        });
        drop(nav);

        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_user_selection_fires_on_tab_change_once() {
        let seen: Rc<RefCell<Vec<(KeyCode, usize)>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 0,
            on_tab_change: Some(Box::new(move |event: &KeyEvent, index| {
                sink.borrow_mut().push((event.code, index));
            })),
            ..Default::default()
        });
        nav.mount();

        nav.select_by_user(&key(KeyCode::Char('2')), 1);
        assert_eq!(*seen.borrow(), vec![(KeyCode::Char('2'), 1)]);

        // Prop-driven reset to the same value stays silent
        nav.set_default_active_index(1);
        assert_eq!(seen.borrow().len(), 1);

        // Programmatic selection stays silent too
        nav.select(2);
        assert_eq!(seen.borrow().len(), 1);
    }

    #[test]
    fn test_cycling_wraps_in_both_directions() {
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);

        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: three_panes(),
            default_active_index: 2,
            on_tab_change: Some(Box::new(move |_event: &KeyEvent, index| {
                sink.borrow_mut().push(index);
            })),
            ..Default::default()
        });
        nav.mount();

        nav.select_next_by_user(&key(KeyCode::Tab));
        assert_eq!(nav.current_index(), 0);
        nav.select_prev_by_user(&key(KeyCode::BackTab));
        assert_eq!(nav.current_index(), 2);

        assert_eq!(*seen.borrow(), vec![0, 2]);
    }

    #[test]
    fn test_out_of_range_index_renders_no_pane() {
        let rendered: Rc<RefCell<Vec<&'static str>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&rendered);

        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: vec![TabPane::new(
                "Only",
                move |_frame: &mut Frame, _area: Rect, _ctx: &mut u32| {
                    sink.borrow_mut().push("only");
                },
            )],
            default_active_index: 0,
            ..Default::default()
        });
        nav.mount();
        nav.select(9);

        let backend = TestBackend::new(20, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut ctx = 0u32;
        terminal
            .draw(|frame| {
                let area = frame.area();
                nav.render(frame, area, &mut ctx);
            })
            .unwrap();

        assert!(rendered.borrow().is_empty());

        // Back in range, the pane renders again
        nav.select(0);
        terminal
            .draw(|frame| {
                let area = frame.area();
                nav.render(frame, area, &mut ctx);
            })
            .unwrap();
        assert_eq!(*rendered.borrow(), vec!["only"]);
    }

    #[test]
    fn test_render_reprojects_on_every_switch() {
        let count: Rc<RefCell<usize>> = Rc::new(RefCell::new(0));
        let sink = Rc::clone(&count);

        let mut nav = TabNavigator::new(NavigatorConfig {
            panes: vec![
                TabPane::new("A", move |_frame: &mut Frame, _area: Rect, _ctx: &mut u32| {
                    *sink.borrow_mut() += 1;
                }),
                pane("B"),
            ],
            default_active_index: 0,
            ..Default::default()
        });
        nav.mount();

        let backend = TestBackend::new(20, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut ctx = 0u32;

        for _ in 0..2 {
            nav.select(0);
            terminal
                .draw(|frame| {
                    let area = frame.area();
                    nav.render(frame, area, &mut ctx);
                })
                .unwrap();
            nav.select(1);
            terminal
                .draw(|frame| {
                    let area = frame.area();
                    nav.render(frame, area, &mut ctx);
                })
                .unwrap();
        }

        assert_eq!(*count.borrow(), 2);
    }
}
