// UI module for rendering the TUI.
// Layout, tab bar, pane content, status bar, and the fetch-status modal.

pub mod form;
pub mod list;
pub mod modal;
pub mod tabs;

use ratatui::{prelude::*, widgets::*};

use crate::app::App;
use crate::state::{AlertFeed, AlertLevel};

/// Main draw function that renders the entire UI.
pub fn draw(frame: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Tab bar
            Constraint::Min(1),    // Pane content
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    tabs::draw_tabs(frame, app, chunks[0]);

    // Active pane content
    app.navigator.render(frame, chunks[1], &mut app.ctx);

    draw_status_bar(frame, app, chunks[2]);

    // Modal is rendered last, on top of everything
    if let Some(modal_state) = &app.modal {
        let uri = app
            .ctx
            .configs
            .details_for(&modal_state.config_id)
            .map(|details| details.repository_manager_attributes.uri.as_str());
        modal::draw_fetch_modal(frame, modal_state, uri);
    }
}

/// Draw the Activity pane with the alert feed, newest first.
pub fn render_activity(frame: &mut Frame, feed: &mut AlertFeed, area: Rect) {
    let block = Block::default().borders(Borders::ALL).title(" Activity ");

    if feed.is_empty() {
        let text = Paragraph::new("No alerts")
            .alignment(Alignment::Center)
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        frame.render_widget(text, area);
        return;
    }

    let items: Vec<ListItem> = feed
        .alerts()
        .iter()
        .rev()
        .map(|alert| {
            let (icon, color) = match alert.level {
                AlertLevel::Error => ("❌", Color::Red),
                AlertLevel::Warning => ("⚠️", Color::Yellow),
                AlertLevel::Success => ("✅", Color::Green),
                AlertLevel::Info => ("ℹ️", Color::Cyan),
            };

            let time = list::format_relative_time(&alert.timestamp);

            let mut spans = vec![
                Span::raw(format!("{} ", icon)),
                Span::styled(time, Style::default().fg(Color::DarkGray)),
                Span::raw(" "),
                Span::styled(alert.message.clone(), Style::default().fg(color)),
            ];
            if !alert.description.is_empty() {
                spans.push(Span::styled(
                    format!("  {}", alert.description),
                    Style::default().fg(Color::DarkGray),
                ));
            }

            ListItem::new(Line::from(spans))
        })
        .collect();

    let list_widget = List::new(items)
        .block(block)
        .highlight_style(
            Style::default()
                .bg(Color::DarkGray)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    frame.render_stateful_widget(list_widget, area, &mut feed.list_state);
}

/// Draw the status bar with keybinding hints and connection info.
fn draw_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut hints = if app.modal.is_some() {
        vec![
            Span::raw(" ↑↓ "),
            Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Expand", Style::default().fg(Color::DarkGray)),
            Span::raw("  r "),
            Span::styled("Refetch", Style::default().fg(Color::DarkGray)),
            Span::raw("  Esc "),
            Span::styled("Close", Style::default().fg(Color::DarkGray)),
        ]
    } else {
        vec![
            Span::raw(" ↑↓ "),
            Span::styled("Navigate", Style::default().fg(Color::DarkGray)),
            Span::raw("  ↵ "),
            Span::styled("Select", Style::default().fg(Color::DarkGray)),
            Span::raw("  Tab "),
            Span::styled("Switch pane", Style::default().fg(Color::DarkGray)),
            Span::raw("  r "),
            Span::styled("Refresh", Style::default().fg(Color::DarkGray)),
            Span::raw("  q "),
            Span::styled("Quit", Style::default().fg(Color::DarkGray)),
        ]
    };

    if app.panes_length > 0 {
        hints.push(Span::styled(
            format!("  {} panes", app.panes_length),
            Style::default().fg(Color::DarkGray),
        ));
    }

    if let Some(client) = &app.client {
        hints.push(Span::styled(
            format!("  {}", client.server_url()),
            Style::default().fg(Color::DarkGray),
        ));
    } else {
        hints.push(Span::styled("  offline", Style::default().fg(Color::Red)));
    }

    let status = Paragraph::new(Line::from(hints));
    frame.render_widget(status, area);
}
