// Settings form rendering.
// Field adapters drawn as labeled inputs with inline validation errors.

use ratatui::{prelude::*, widgets::*};

use crate::state::SettingsForm;
use crate::state::form::{
    FIELD_BRANCH, FIELD_DIRECTORY, FIELD_ENABLED, FIELD_TOKEN, FIELD_URI, FieldState,
};

use super::list::{render_empty, render_loading};

/// Draw the Settings pane for the selected configuration.
pub fn render_settings(frame: &mut Frame, form: &SettingsForm, area: Rect) {
    if form.loading {
        render_loading(frame, area, "Loading configuration details");
        return;
    }
    if form.config_id.is_none() {
        render_empty(
            frame,
            area,
            "Select a configuration on the Configurations pane to edit its settings",
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Repository URI
            Constraint::Length(3), // Branch
            Constraint::Length(3), // Directory
            Constraint::Length(3), // Access token
            Constraint::Length(1), // Enabled toggle
            Constraint::Length(1), // Spacer
            Constraint::Length(1), // Hints
            Constraint::Min(0),
        ])
        .split(area);

    draw_field(frame, &form.uri, form, FIELD_URI, chunks[0]);
    draw_field(frame, &form.branch, form, FIELD_BRANCH, chunks[1]);
    draw_field(frame, &form.directory, form, FIELD_DIRECTORY, chunks[2]);
    draw_field(frame, &form.token, form, FIELD_TOKEN, chunks[3]);
    draw_toggle(frame, form, chunks[4]);
    draw_hints(frame, form, chunks[6]);
}

fn draw_field(frame: &mut Frame, field: &FieldState, form: &SettingsForm, index: usize, area: Rect) {
    let focused = form.focus == index;
    let editing = focused && form.editing;

    let border_style = if field.display_error().is_some() {
        Style::default().fg(Color::Red)
    } else if editing {
        Style::default().fg(Color::Yellow)
    } else if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let required_mark = if field.required { " *" } else { "" };
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {}{} ", field.label, required_mark));

    if let Some(error) = field.display_error() {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {} ", error),
            Style::default().fg(Color::Red),
        )));
    }

    let mut spans = vec![Span::raw(field.display_value())];
    if editing {
        spans.push(Span::styled("█", Style::default().fg(Color::Yellow)));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn draw_toggle(frame: &mut Frame, form: &SettingsForm, area: Rect) {
    let focused = form.focus == FIELD_ENABLED;
    let mark = if form.enabled.checked { "[x]" } else { "[ ]" };
    let style = if focused {
        Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} {}", mark, form.enabled.label), style),
        Span::styled("  (Enter to toggle)", Style::default().fg(Color::DarkGray)),
    ]);
    frame.render_widget(Paragraph::new(line), area);
}

fn draw_hints(frame: &mut Frame, form: &SettingsForm, area: Rect) {
    let line = if form.saving {
        Line::from(Span::styled(
            " ⏳ Saving...",
            Style::default().fg(Color::Yellow),
        ))
    } else {
        let mut spans = vec![
            Span::styled(" s", Style::default().fg(Color::Yellow)),
            Span::styled(" = Save  ", Style::default().fg(Color::DarkGray)),
            Span::styled("Enter", Style::default().fg(Color::Yellow)),
            Span::styled(" = Edit field  ", Style::default().fg(Color::DarkGray)),
            Span::styled("v", Style::default().fg(Color::Yellow)),
            Span::styled(" = Reveal token", Style::default().fg(Color::DarkGray)),
        ];
        if form.is_dirty() {
            spans.push(Span::styled(
                "  ● unsaved changes",
                Style::default().fg(Color::Yellow),
            ));
        }
        Line::from(spans)
    };

    frame.render_widget(Paragraph::new(line), area);
}
