//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Tabs},
    Frame,
};

use envwatch_types::RiskLevel;

use crate::app::{App, View};

/// Render the header bar with the overall risk picture.
///
/// Displays: status indicator, source, worst level, elevated rule count.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref screen) = app.screen else {
        let line = Line::from(vec![
            Span::styled(" ENVWATCH ", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(format!("│ {} │ Waiting for data...", app.source_description())),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    let worst = screen.risks.worst();
    let elevated = screen.risks.elevated_count();
    let level_style = app.theme.level_style(worst);

    let line = Line::from(vec![
        Span::styled(" ● ", level_style),
        Span::styled("ENVWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw(format!("│ {} │ ", app.source_description())),
        Span::raw("worst: "),
        Span::styled(worst.label(), level_style.add_modifier(Modifier::BOLD)),
        Span::raw(" │ "),
        if elevated > 0 {
            Span::styled(
                format!("{}", elevated),
                app.theme.level_style(RiskLevel::High),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" of 4 elevated"),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = TABS.iter().map(|(title, _)| Line::from(*title)).collect();

    let selected = match app.current_view {
        View::Overview => 0,
        View::Risks => 1,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider(TAB_DIVIDER);

    frame.render_widget(tabs, area);
}

/// Tab titles in bar order.
const TABS: [(&str, View); 2] = [(" 1:Overview ", View::Overview), (" 2:Risks ", View::Risks)];
const TAB_DIVIDER: &str = "|";
/// `Tabs` pads every title with one cell on each side.
const TAB_PADDING: u16 = 1;

/// The tab drawn at a column of the tab bar, if any.
///
/// Each tab spans its title plus padding; dividers belong to no tab.
pub fn tab_at(column: u16) -> Option<View> {
    let mut start = 0u16;
    for (title, view) in TABS {
        let end = start + TAB_PADDING * 2 + Line::from(title).width() as u16;
        if column < start {
            return None;
        }
        if column < end {
            return Some(view);
        }
        start = end + Line::from(TAB_DIVIDER).width() as u16;
    }
    None
}

/// Render the status bar at the bottom.
///
/// Shows: data age, last fetch error, available controls.
/// Temporary status messages take precedence.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let controls = "Tab:switch ↑↓:select Enter:detail r:refresh ?:help q:quit";

    let line = match (&app.screen, &app.load_error) {
        (Some(screen), Some(err)) => Line::from(vec![
            Span::raw(format!(
                " {} | Received {}s ago | ",
                app.current_view.label(),
                screen.received_at.elapsed().as_secs()
            )),
            Span::styled(format!("Error: {}", err), Style::default().fg(app.theme.critical)),
            Span::raw(format!(" | {}", controls)),
        ]),
        (Some(screen), None) => Line::from(format!(
            " {} | Received {}s ago | {}",
            app.current_view.label(),
            screen.received_at.elapsed().as_secs(),
            controls
        )),
        (None, Some(err)) => Line::from(vec![
            Span::styled(format!(" Error: {}", err), Style::default().fg(app.theme.critical)),
            Span::raw(" | r:retry q:quit"),
        ]),
        (None, None) => Line::from(" Loading... | q:quit"),
    };

    let paragraph = Paragraph::new(line).style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let section = |title: &'static str| {
        Line::from(vec![Span::styled(
            title,
            Style::default().add_modifier(Modifier::BOLD),
        )])
    };

    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        section(" Navigation"),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  1/2         Jump to view"),
        Line::from("  ↑/↓ j/k     Select risk"),
        Line::from("  Home/End    First/last risk"),
        Line::from("  Enter       Risk detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        section(" General"),
        Line::from("  r           Refresh now"),
        Line::from("  q           Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 40u16.min(area.width.saturating_sub(4));
    let help_height = 17u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    frame.render_widget(Clear, help_area);
    frame.render_widget(paragraph, help_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_at_covers_padding() {
        // " 1:Overview " is 12 cells, padded to 0..=13; divider at 14
        assert_eq!(tab_at(0), Some(View::Overview));
        assert_eq!(tab_at(13), Some(View::Overview));
        assert_eq!(tab_at(14), None);
        // " 2:Risks " is 9 cells, padded to 15..=25
        assert_eq!(tab_at(15), Some(View::Risks));
        assert_eq!(tab_at(25), Some(View::Risks));
        assert_eq!(tab_at(26), None);
    }
}
