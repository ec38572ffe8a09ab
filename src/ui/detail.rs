//! Detail overlay rendering.
//!
//! Displays a modal overlay for the selected risk: its level and advice,
//! the rule that decides it, and the readings the rule looked at.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use envwatch_types::{MetricField, RiskCategory, RiskThresholds};

use crate::app::App;

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 50;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Readings a rule depends on.
pub fn rule_inputs(category: RiskCategory) -> &'static [MetricField] {
    match category {
        RiskCategory::Thunderstorm => &[
            MetricField::Humidity,
            MetricField::Temperature,
            MetricField::Pressure,
        ],
        RiskCategory::Drought => &[MetricField::SoilMoisture, MetricField::Humidity],
        RiskCategory::Flood => &[MetricField::WaterLevel, MetricField::Rain],
        RiskCategory::Cyclone => &[MetricField::Pressure],
    }
}

/// Human-readable condition for the elevated branch of a rule.
pub fn rule_text(category: RiskCategory, t: &RiskThresholds) -> String {
    match category {
        RiskCategory::Thunderstorm => format!(
            "Critical when humidity > {} %, temperature > {} °C and pressure < {} hPa",
            t.storm_humidity_above, t.storm_temperature_above, t.storm_pressure_below
        ),
        RiskCategory::Drought => format!(
            "High when soil moisture < {} % and humidity < {} %",
            t.drought_soil_moisture_below, t.drought_humidity_below
        ),
        RiskCategory::Flood => format!(
            "High when water level > {} cm or rain > {} mm",
            t.flood_water_level_above, t.flood_rain_above
        ),
        RiskCategory::Cyclone => format!("High when pressure < {} hPa", t.cyclone_pressure_below),
    }
}

/// Render the risk detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let (Some(screen), Some(assessment)) = (app.screen.as_ref(), app.selected_assessment()) else {
        return;
    };

    let overlay_width = (area.width * 80 / 100).clamp(MIN_OVERLAY_WIDTH, 90);
    let overlay_height = (area.height * 70 / 100).clamp(MIN_OVERLAY_HEIGHT, 24);
    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    frame.render_widget(Clear, overlay_area);

    let block = Block::default()
        .title(format!(" {} Risk ", assessment.category.label()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));
    let inner = block.inner(overlay_area);
    frame.render_widget(block, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Min(6),    // Assessment
        Constraint::Length(5), // Inputs
        Constraint::Length(1), // Footer
    ])
    .split(inner);

    let bold = Style::default().add_modifier(Modifier::BOLD);
    let lines = vec![
        Line::from(vec![
            Span::raw(" Level: "),
            Span::styled(
                assessment.level.label(),
                app.theme.level_style(assessment.level).add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(" Description: ", bold), Span::raw(assessment.description)]),
        Line::from(vec![Span::styled(" Suggestion: ", bold), Span::raw(assessment.suggestion)]),
        Line::from(""),
        Line::from(Span::styled(
            format!(" {}", rule_text(assessment.category, app.thresholds())),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[0]);

    let mut input_lines = vec![Line::from(Span::styled(" Readings", app.theme.header))];
    for field in rule_inputs(assessment.category) {
        let value = screen.rule_inputs.and_then(|sample| sample.get(*field));
        input_lines.push(Line::from(format!(
            "   {:<14} {}",
            field.label(),
            field.format(value)
        )));
    }
    frame.render_widget(Paragraph::new(input_lines), chunks[1]);

    frame.render_widget(
        Paragraph::new(" ↑↓:other risk  Esc:close")
            .style(Style::default().add_modifier(Modifier::DIM)),
        chunks[2],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use crate::ui::tests::render_to_string;
    use envwatch_adapters::FeedEntry;

    #[test]
    fn test_rule_text_uses_thresholds() {
        let t = RiskThresholds::default();
        assert_eq!(
            rule_text(RiskCategory::Cyclone, &t),
            "High when pressure < 990 hPa"
        );
        assert_eq!(
            rule_text(RiskCategory::Flood, &t),
            "High when water level > 80 cm or rain > 50 mm"
        );
    }

    #[test]
    fn test_overlay_shows_rule_readings() {
        let (tx, _errors, mut app) = test_app();
        tx.send(Some(FeedEntry {
            field5: Some("985".to_string()),
            field7: Some("1010".to_string()),
            ..Default::default()
        }))
        .unwrap();
        app.reload_data().unwrap();
        app.select_last();
        app.enter_detail();

        let text = render_to_string(&app, 100, 30);
        assert!(text.contains("Cyclone Risk"));
        assert!(text.contains("Pressure       985.00 hPa"));
        assert!(!text.contains("Pressure       1010.00 hPa"));
    }

    #[test]
    fn test_every_rule_has_inputs() {
        for category in RiskCategory::ALL {
            assert!(!rule_inputs(category).is_empty());
        }
        assert_eq!(rule_inputs(RiskCategory::Thunderstorm).len(), 3);
    }
}
