// Generic list rendering for selectable items.
// Provides styled list views with loading, error, and empty states.

use chrono::{DateTime, Utc};
use ratatui::{prelude::*, widgets::*};

use crate::api::RemoteConfig;
use crate::state::{LoadingState, SelectableList};

/// Format a timestamp as relative time (e.g., "2h ago").
pub fn format_relative_time(dt: &DateTime<Utc>) -> String {
    let now = Utc::now();
    let duration = now.signed_duration_since(*dt);

    if duration.num_days() > 0 {
        format!("{}d ago", duration.num_days())
    } else if duration.num_hours() > 0 {
        format!("{}h ago", duration.num_hours())
    } else if duration.num_minutes() > 0 {
        format!("{}m ago", duration.num_minutes())
    } else {
        "just now".to_string()
    }
}

/// Render a loading indicator.
pub fn render_loading(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(format!("⏳ {}...", message))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Yellow));
    frame.render_widget(text, area);
}

/// Render an error message.
pub fn render_error(frame: &mut Frame, area: Rect, error: &str) {
    let text = Paragraph::new(format!("❌ {}", error))
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Red));
    frame.render_widget(text, area);
}

/// Render an empty state message.
pub fn render_empty(frame: &mut Frame, area: Rect, message: &str) {
    let text = Paragraph::new(message)
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(text, area);
}

/// Render the remote configurations list.
pub fn render_configs_list(frame: &mut Frame, list: &mut SelectableList<RemoteConfig>, area: Rect) {
    match &list.data {
        LoadingState::Idle => render_empty(frame, area, "Press r to load configurations"),
        LoadingState::Loading => render_loading(frame, area, "Loading configurations"),
        LoadingState::Error(e) => render_error(frame, area, e),
        LoadingState::Loaded(items) => {
            if items.is_empty() {
                render_empty(frame, area, "No remote configurations registered");
            } else {
                let rows: Vec<ListItem> = items
                    .iter()
                    .map(|config| {
                        let enabled = if config.is_enabled {
                            Span::styled("● ", Style::default().fg(Color::Green))
                        } else {
                            Span::styled("○ ", Style::default().fg(Color::DarkGray))
                        };

                        ListItem::new(Line::from(vec![
                            enabled,
                            Span::styled(
                                &config.remote_fetch_name,
                                Style::default().fg(Color::Cyan),
                            ),
                            Span::styled(
                                format!("  {}", config.repository_manager_type),
                                Style::default().fg(Color::DarkGray),
                            ),
                            Span::styled(
                                format!(" → {}", config.config_deployer_type),
                                Style::default().fg(Color::DarkGray),
                            ),
                            Span::styled(
                                format!("  {}", config.action_listener_type),
                                Style::default().fg(Color::Magenta),
                            ),
                        ]))
                    })
                    .collect();

                let list_widget = List::new(rows)
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(" Remote Configurations "),
                    )
                    .highlight_style(
                        Style::default()
                            .bg(Color::DarkGray)
                            .add_modifier(Modifier::BOLD),
                    )
                    .highlight_symbol("> ");

                frame.render_stateful_widget(list_widget, area, &mut list.list_state);
            }
        }
    }
}
