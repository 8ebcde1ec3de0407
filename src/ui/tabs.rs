// Tab bar rendering with an unread-error badge on the Activity pane.
// Handles visual indication of the active pane.

use ratatui::{prelude::*, widgets::*};

use crate::app::{ACTIVITY_PANE, App};

/// Draw the tab bar at the top of the screen.
pub fn draw_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let unread = app.ctx.alerts.unread_errors();
    let active = app.navigator.current_index();

    let tab_titles: Vec<Line> = app
        .navigator
        .labels()
        .enumerate()
        .map(|(i, label)| {
            let title = if i == ACTIVITY_PANE && unread > 0 {
                format!("{} ({})", label, unread)
            } else {
                label.to_string()
            };

            let style = if i == active {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else if i == ACTIVITY_PANE && unread > 0 {
                Style::default().fg(Color::Red)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(Span::styled(title, style))
        })
        .collect();

    let tabs_widget = Tabs::new(tab_titles)
        .block(
            Block::default()
                .borders(Borders::BOTTOM)
                .border_style(Style::default().fg(Color::DarkGray))
                .title(" warden ")
                .title_style(
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .select(active)
        .highlight_style(Style::default().fg(Color::Yellow))
        .divider(Span::raw(" │ "));

    frame.render_widget(tabs_widget, area);
}
