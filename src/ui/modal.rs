// Fetch-status modal rendering.
// Deployment summary with an accordion of failed revisions and their error reports.

use ratatui::{prelude::*, widgets::*};

use crate::state::{FetchDetailsState, LoadingState};

use super::list::format_relative_time;

/// Draw the fetch-status modal on top of the current view.
pub fn draw_fetch_modal(frame: &mut Frame, modal: &FetchDetailsState, uri: Option<&str>) {
    let area = frame.area();

    let modal_width = area.width.min(74);
    let modal_height = area.height.min(22);
    let modal_x = (area.width.saturating_sub(modal_width)) / 2;
    let modal_y = (area.height.saturating_sub(modal_height)) / 2;
    let modal_area = Rect::new(modal_x, modal_y, modal_width, modal_height);

    // Clear the area behind the modal
    frame.render_widget(Clear, modal_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan))
        .title(format!(" Fetch Status: {} ", modal.config_name));
    let inner = block.inner(modal_area);
    frame.render_widget(block, modal_area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Repository hint
            Constraint::Min(1),    // Status body
            Constraint::Length(1), // Instructions
        ])
        .split(inner);

    let hint = Line::from(vec![
        Span::styled(" 🔗 ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            uri.unwrap_or("(repository unknown)").to_string(),
            Style::default().fg(Color::DarkGray),
        ),
    ]);
    frame.render_widget(Paragraph::new(hint), chunks[0]);

    draw_body(frame, modal, chunks[1]);
    draw_instructions(frame, modal, chunks[2]);
}

fn draw_body(frame: &mut Frame, modal: &FetchDetailsState, area: Rect) {
    match &modal.status {
        LoadingState::Idle | LoadingState::Loading => {
            let text = Paragraph::new("⏳ Loading deployment status...")
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Yellow));
            frame.render_widget(text, area);
        }
        LoadingState::Error(e) => {
            let text = Paragraph::new(format!("❌ {}", e))
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::Red));
            frame.render_widget(text, area);
        }
        LoadingState::Loaded(details) => {
            let mut lines: Vec<Line> = Vec::new();

            let mut summary = vec![
                Span::raw(format!(" {} deployments", details.count)),
                Span::styled(
                    format!("  ✓ {}", details.successful_deployments),
                    Style::default().fg(Color::Green),
                ),
                Span::styled(
                    format!("  ✗ {}", details.failed_deployments),
                    Style::default().fg(Color::Red),
                ),
            ];
            if let Some(last) = &details.last_synchronized_time {
                summary.push(Span::styled(
                    format!("  synced {}", format_relative_time(last)),
                    Style::default().fg(Color::DarkGray),
                ));
            }
            lines.push(Line::from(summary));
            lines.push(Line::from(""));

            let failed: Vec<_> = details.failed_revisions().collect();
            if failed.is_empty() {
                lines.push(Line::from(Span::styled(
                    " All applications deployed successfully",
                    Style::default().fg(Color::Green),
                )));
            }

            for (i, revision) in failed.iter().enumerate() {
                let marker = if modal.is_expanded(i) { "▾" } else { "▸" };
                let title_style = if i == modal.cursor {
                    Style::default()
                        .bg(Color::DarkGray)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };

                lines.push(Line::from(vec![
                    Span::styled(format!(" {} ", marker), title_style),
                    Span::styled("✗ ", title_style.fg(Color::Red)),
                    Span::styled(revision.item_name.clone(), title_style),
                    Span::styled(
                        format!("   deployed {}", format_relative_time(&revision.deployed_time)),
                        title_style.fg(Color::Gray),
                    ),
                ]));

                if modal.is_expanded(i) {
                    if revision.deployment_error_report.is_empty() {
                        lines.push(Line::from(Span::styled(
                            "      (no error report)",
                            Style::default().fg(Color::DarkGray),
                        )));
                    } else {
                        for report_line in revision.deployment_error_report.lines() {
                            lines.push(Line::from(Span::styled(
                                format!("      {}", report_line),
                                Style::default().fg(Color::Gray),
                            )));
                        }
                    }
                }
            }

            let text = Paragraph::new(lines).scroll((modal.scroll, 0));
            frame.render_widget(text, area);
        }
    }
}

fn draw_instructions(frame: &mut Frame, modal: &FetchDetailsState, area: Rect) {
    let line = if modal.redeploying {
        Line::from(Span::styled(
            " ⏳ Triggering refetch...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        Line::from(vec![
            Span::styled(" ↑↓", Style::default().fg(Color::Yellow)),
            Span::styled(" = Navigate  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled(" = Expand  ", Style::default().fg(Color::DarkGray)),
            Span::styled("r", Style::default().fg(Color::Yellow)),
            Span::styled(" = Refetch applications  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Esc", Style::default().fg(Color::Yellow)),
            Span::styled(" = Close ", Style::default().fg(Color::DarkGray)),
        ])
    };

    frame.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}
