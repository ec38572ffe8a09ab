//! Risks view rendering.
//!
//! One table row per rule: category, level, description and suggestion.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use envwatch_types::RiskLevel;

use crate::app::App;

/// Render the Risks view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref screen) = app.screen else {
        frame.render_widget(
            Paragraph::new(" No assessments yet").block(
                Block::default()
                    .title(" Risks ")
                    .borders(Borders::ALL)
                    .border_type(app.theme.border_type),
            ),
            area,
        );
        return;
    };

    let header = Row::new(vec![
        Cell::from("Risk"),
        Cell::from("Level"),
        Cell::from("Description"),
        Cell::from("Suggestion"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = screen
        .risks
        .iter()
        .map(|a| {
            Row::new(vec![
                Cell::from(a.category.label())
                    .style(Style::default().add_modifier(Modifier::BOLD)),
                Cell::from(a.level.label()).style(app.theme.level_style(a.level)),
                Cell::from(a.description),
                Cell::from(a.suggestion).style(Style::default().add_modifier(Modifier::DIM)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(13), // Risk
        Constraint::Length(9),  // Level
        Constraint::Fill(3),    // Description
        Constraint::Fill(4),    // Suggestion
    ];

    let border_color = match screen.risks.worst() {
        RiskLevel::Low => app.theme.border,
        RiskLevel::High => app.theme.warning,
        RiskLevel::Critical => app.theme.critical,
    };

    let title = format!(
        " Risks ({} elevated) [{}/4] ",
        screen.risks.elevated_count(),
        app.selected_risk + 1
    );

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(Style::default().fg(border_color)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_risk));

    frame.render_stateful_widget(table, area, &mut state);
}
