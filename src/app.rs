//! Application state and navigation logic.

use std::time::{Duration, Instant};

use anyhow::Result;
use tracing::debug;

use envwatch_types::{
    FieldMaps, FormattedMetric, RiskAssessment, RiskCategory, RiskEngine, RiskReport,
    RiskThresholds, Sample,
};

use crate::data::Dashboard;
use crate::render::Renderer;
use crate::source::DataSource;
use crate::ui::Theme;

/// The current view/tab in the TUI.
///
/// Risk detail is shown as an overlay (controlled by `App::show_detail_overlay`)
/// rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Reading cards and risk badges.
    Overview,
    /// Table of the four assessments with their advice.
    Risks,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Overview => View::Risks,
            View::Risks => View::Overview,
        }
    }

    /// Cycle to the previous view. With two views this equals `next`.
    pub fn prev(self) -> Self {
        self.next()
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Overview => "Overview",
            View::Risks => "Risks",
        }
    }
}

/// What is currently on screen.
#[derive(Debug, Clone)]
pub struct Screen {
    pub metrics: Vec<FormattedMetric>,
    pub risks: RiskReport,
    /// Readings the risks were evaluated on, when known.
    pub rule_inputs: Option<Sample>,
    pub updated: Option<String>,
    /// When this screen was last replaced.
    pub received_at: Instant,
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    field_maps: FieldMaps,
    engine: RiskEngine,
    pub screen: Option<Screen>,
    pub load_error: Option<String>,

    // Navigation state
    pub selected_risk: usize,

    // UI
    pub theme: Theme,

    refresh_requested: bool,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App reading from the given source.
    pub fn new(source: Box<dyn DataSource>, field_maps: FieldMaps, engine: RiskEngine) -> Self {
        Self::with_theme(source, field_maps, engine, Theme::auto_detect())
    }

    /// Create a new App with an explicit theme.
    pub fn with_theme(
        source: Box<dyn DataSource>,
        field_maps: FieldMaps,
        engine: RiskEngine,
        theme: Theme,
    ) -> Self {
        Self {
            running: true,
            current_view: View::Overview,
            show_help: false,
            show_detail_overlay: false,
            source,
            field_maps,
            engine,
            screen: None,
            load_error: None,
            selected_risk: 0,
            theme,
            refresh_requested: false,
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        match &self.status_message {
            Some((msg, time)) if time.elapsed() < Duration::from_secs(3) => Some(msg),
            _ => None,
        }
    }

    /// Poll the data source for a new entry.
    ///
    /// Returns true if the screen was replaced. A failed fetch only updates
    /// `load_error`; whatever was on screen stays.
    pub fn reload_data(&mut self) -> Result<bool> {
        self.load_error = self.source.error();

        let Some(entry) = self.source.poll() else {
            return Ok(false);
        };

        debug!(entry_id = ?entry.entry_id, "Rendering new entry");
        let dashboard = Dashboard::from_entry(&entry, &self.field_maps, &self.engine);
        self.display(
            &dashboard.metrics,
            &dashboard.risks,
            dashboard.updated.as_deref(),
        )?;
        if let Some(screen) = self.screen.as_mut() {
            screen.rule_inputs = Some(dashboard.rule_inputs);
        }
        Ok(true)
    }

    /// Thresholds the risk rules are evaluated against.
    pub fn thresholds(&self) -> &RiskThresholds {
        self.engine.thresholds()
    }

    /// Assessment under the cursor, if data has arrived.
    pub fn selected_assessment(&self) -> Option<&RiskAssessment> {
        let screen = self.screen.as_ref()?;
        let category = RiskCategory::ALL.get(self.selected_risk)?;
        Some(screen.risks.get(*category))
    }

    /// Switch to the next view.
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view.
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one risk.
    pub fn select_next(&mut self) {
        self.selected_risk = (self.selected_risk + 1).min(RiskCategory::ALL.len() - 1);
    }

    /// Move selection up by one risk.
    pub fn select_prev(&mut self) {
        self.selected_risk = self.selected_risk.saturating_sub(1);
    }

    /// Jump to the first risk.
    pub fn select_first(&mut self) {
        self.selected_risk = 0;
    }

    /// Jump to the last risk.
    pub fn select_last(&mut self) {
        self.selected_risk = RiskCategory::ALL.len() - 1;
    }

    /// Open the detail overlay for the selected risk.
    pub fn enter_detail(&mut self) {
        if self.screen.is_some() {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlay first, then return to Overview.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
        } else if self.current_view != View::Overview {
            self.current_view = View::Overview;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Ask the poller for an immediate fetch.
    pub fn request_refresh(&mut self) {
        self.refresh_requested = true;
        self.set_status_message("Refreshing…".to_string());
    }

    /// Take a pending refresh request, clearing it.
    pub fn take_refresh_request(&mut self) -> bool {
        std::mem::take(&mut self.refresh_requested)
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }
}

impl Renderer for App {
    fn display(
        &mut self,
        metrics: &[FormattedMetric],
        assessments: &RiskReport,
        updated: Option<&str>,
    ) -> Result<()> {
        self.screen = Some(Screen {
            metrics: metrics.to_vec(),
            risks: *assessments,
            rule_inputs: None,
            updated: updated.map(str::to_string),
            received_at: Instant::now(),
        });
        Ok(())
    }
}
