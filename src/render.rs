//! Rendering surfaces.
//!
//! A [`Renderer`] receives the formatted readings, the four assessments and
//! the last-updated line of one cycle. The TUI [`App`](crate::App) is one;
//! [`TextRenderer`] and [`JsonRenderer`] write to any [`io::Write`] for the
//! one-shot mode.

use std::collections::BTreeMap;
use std::io;

use anyhow::Result;
use serde::Serialize;

use envwatch_types::{FormattedMetric, RiskReport};

/// Something that can present one cycle's output.
pub trait Renderer {
    fn display(
        &mut self,
        metrics: &[FormattedMetric],
        assessments: &RiskReport,
        updated: Option<&str>,
    ) -> Result<()>;
}

/// Plain text report.
///
/// ```
/// use envwatch::TextRenderer;
/// use envwatch::Renderer;
/// use envwatch_types::{format_sample, RiskEngine, Sample};
///
/// let sample = Sample::builder().pressure(985.0).build();
/// let mut out = Vec::new();
/// TextRenderer::new(&mut out)
///     .display(&format_sample(&sample), &RiskEngine::default().evaluate(&sample), None)
///     .unwrap();
///
/// let text = String::from_utf8(out).unwrap();
/// assert!(text.contains("Pressure"));
/// assert!(text.contains("985.00 hPa"));
/// assert!(text.contains("Cyclone"));
/// ```
pub struct TextRenderer<W> {
    out: W,
}

impl<W: io::Write> TextRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

impl<W: io::Write> Renderer for TextRenderer<W> {
    fn display(
        &mut self,
        metrics: &[FormattedMetric],
        assessments: &RiskReport,
        updated: Option<&str>,
    ) -> Result<()> {
        let width = metrics
            .iter()
            .map(|m| m.field.label().len())
            .max()
            .unwrap_or(0);

        writeln!(self.out, "Readings")?;
        for metric in metrics {
            writeln!(
                self.out,
                "  {:<width$}  {}",
                metric.field.label(),
                metric.text,
                width = width
            )?;
        }

        writeln!(self.out)?;
        writeln!(self.out, "Risks")?;
        for a in assessments {
            writeln!(
                self.out,
                "  {:<12}  {:<8}  {}",
                a.category.label(),
                a.level.label(),
                a.description
            )?;
            writeln!(self.out, "  {:<12}  {:<8}  {}", "", "", a.suggestion)?;
        }

        if let Some(updated) = updated {
            writeln!(self.out)?;
            writeln!(self.out, "{}", updated)?;
        }

        self.out.flush()?;
        Ok(())
    }
}

/// Pretty-printed JSON report.
pub struct JsonRenderer<W> {
    out: W,
}

impl<W: io::Write> JsonRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    metrics: BTreeMap<&'static str, &'a str>,
    risks: &'a RiskReport,
    updated: Option<&'a str>,
}

impl<W: io::Write> Renderer for JsonRenderer<W> {
    fn display(
        &mut self,
        metrics: &[FormattedMetric],
        assessments: &RiskReport,
        updated: Option<&str>,
    ) -> Result<()> {
        let report = JsonReport {
            metrics: metrics
                .iter()
                .map(|m| (m.field.id(), m.text.as_str()))
                .collect(),
            risks: assessments,
            updated,
        };

        serde_json::to_writer_pretty(&mut self.out, &report)?;
        writeln!(self.out)?;
        self.out.flush()?;
        Ok(())
    }
}
