//! Overview rendering: six reading cards above four risk badges.

use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use envwatch_types::{FormattedMetric, RiskAssessment};

use crate::app::App;

/// Render the Overview view.
pub fn render(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref screen) = app.screen else {
        render_waiting(frame, app, area);
        return;
    };

    let chunks = Layout::vertical([
        Constraint::Length(8), // Two rows of reading cards
        Constraint::Min(6),    // Risk badges
        Constraint::Length(1), // Last updated
    ])
    .split(area);

    let rows = Layout::vertical([Constraint::Ratio(1, 2); 2]).split(chunks[0]);
    for (row, metrics) in rows.iter().zip(screen.metrics.chunks(3)) {
        let cells = Layout::horizontal([Constraint::Ratio(1, 3); 3]).split(*row);
        for (cell, metric) in cells.iter().zip(metrics) {
            render_metric_card(frame, app, metric, *cell);
        }
    }

    let badges = Layout::horizontal([Constraint::Ratio(1, 4); 4]).split(chunks[1]);
    for (index, (badge, assessment)) in badges.iter().zip(&screen.risks).enumerate() {
        render_risk_badge(frame, app, assessment, index == app.selected_risk, *badge);
    }

    let updated = screen.updated.as_deref().unwrap_or("Last updated: unknown");
    frame.render_widget(
        Paragraph::new(updated)
            .alignment(Alignment::Right)
            .style(Style::default().add_modifier(Modifier::DIM)),
        chunks[2],
    );
}

fn render_waiting(frame: &mut Frame, app: &App, area: Rect) {
    let text = match app.load_error {
        Some(ref err) => format!("No data yet\n\n{}", err),
        None => format!("Waiting for data from {}...", app.source_description()),
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    frame.render_widget(
        Paragraph::new(text)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

fn render_metric_card(frame: &mut Frame, app: &App, metric: &FormattedMetric, area: Rect) {
    let value_style = if metric.is_placeholder() {
        Style::default().fg(app.theme.muted)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };

    let block = Block::default()
        .title(format!(" {} ", metric.field.label()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(metric.text.clone(), value_style)),
    ];

    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center).block(block),
        area,
    );
}

fn render_risk_badge(
    frame: &mut Frame,
    app: &App,
    assessment: &RiskAssessment,
    selected: bool,
    area: Rect,
) {
    let level_style = app.theme.level_style(assessment.level);
    let border_style = if selected {
        Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(app.theme.border)
    };

    let block = Block::default()
        .title(format!(" {} ", assessment.category.label()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(border_style);

    let lines = vec![
        Line::from(Span::styled(
            assessment.level.label(),
            level_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(assessment.description),
    ];

    frame.render_widget(
        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .block(block),
        area,
    );
}

#[cfg(test)]
mod tests {
    use crate::app::tests::test_app;
    use crate::ui::tests::render_to_string;
    use envwatch_adapters::FeedEntry;

    #[test]
    fn test_cards_show_formatted_values_and_placeholders() {
        let (tx, _errors, mut app) = test_app();
        tx.send(Some(FeedEntry {
            created_at: Some("2025-06-01T10:00:00Z".to_string()),
            field1: Some("23.456".to_string()),
            ..Default::default()
        }))
        .unwrap();
        app.reload_data().unwrap();

        let text = render_to_string(&app, 100, 30);
        assert!(text.contains("Temperature"));
        assert!(text.contains("23.46 °C"));
        assert!(text.contains("Total Rain"));
        assert!(text.contains("--"));
        assert!(text.contains("Last updated: "));
    }
}
