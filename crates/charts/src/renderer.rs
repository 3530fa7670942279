use crate::error::RenderError;
use crate::panels::{Panel, Stroke, build_panels, shared_x_range};
use analytics::Analysis;
use configuration::ChartSettings;
use core_types::MarketData;
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::series::{DashedLineSeries, LineSeries};
use plotters::style::{FontStyle, register_font};
use std::ops::Range;
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Font family every text element is drawn with.
const FONT_FAMILY: &str = "sans-serif";

/// The font registered for this process, if any. Registration is global in
/// plotters, so the first renderer decides it.
static REGISTERED_FONT: OnceLock<Option<PathBuf>> = OnceLock::new();

/// Draws the 4-panel summary chart.
pub struct ChartRenderer {
    width: u32,
    height: u32,
    labelled: bool,
}

impl ChartRenderer {
    /// Creates a renderer and makes the first readable font candidate
    /// available for titles, legends and tick labels.
    ///
    /// Without a usable font the chart is still drawn, but without any text.
    pub fn new(settings: &ChartSettings) -> Self {
        let font = REGISTERED_FONT.get_or_init(|| register_first_font(&settings.font_candidates));
        if font.is_none() {
            tracing::warn!(
                candidates = settings.font_candidates.len(),
                "No usable font found; the chart will have no titles, legends or tick labels."
            );
        }

        Self::with_labels(settings.width, settings.height, font.is_some())
    }

    /// Creates a renderer without touching font registration. `labelled`
    /// must only be set once a font has been registered.
    pub fn with_labels(width: u32, height: u32, labelled: bool) -> Self {
        Self {
            width,
            height,
            labelled,
        }
    }

    /// Whether titles, legends and tick labels will be drawn.
    pub fn is_labelled(&self) -> bool {
        self.labelled
    }

    /// Renders the chart to `path` as a PNG, replacing any existing file.
    ///
    /// Panels are composed in memory first; nothing is written unless every
    /// panel was drawn.
    pub fn render(
        &self,
        data: &MarketData,
        analysis: &Analysis,
        path: &Path,
    ) -> Result<(), RenderError> {
        let panels = build_panels(data, analysis);
        let x_range = shared_x_range(&panels);

        let mut buffer = vec![0u8; self.width as usize * self.height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (self.width, self.height))
                .into_drawing_area();
            root.fill(&WHITE).map_err(draw_error("canvas"))?;

            let areas = root.margin(10, 10, 10, 10).split_evenly((panels.len(), 1));
            for (area, panel) in areas.iter().zip(&panels) {
                self.draw_panel(area, panel, x_range.clone())?;
            }
            root.present().map_err(draw_error("canvas"))?;
        }

        let image = RgbImage::from_raw(self.width, self.height, buffer).ok_or(
            RenderError::Buffer {
                width: self.width,
                height: self.height,
            },
        )?;
        image.save_with_format(path, ImageFormat::Png)?;

        tracing::info!(?path, panels = panels.len(), "Chart written.");
        Ok(())
    }

    fn draw_panel<DB: DrawingBackend>(
        &self,
        area: &DrawingArea<DB, Shift>,
        panel: &Panel,
        x_range: Range<f64>,
    ) -> Result<(), RenderError> {
        let on_error = draw_error(panel.title);

        let mut builder = ChartBuilder::on(area);
        builder.margin(8);
        if self.labelled {
            builder
                .caption(panel.title, (FONT_FAMILY, 18).into_font())
                .x_label_area_size(28)
                .y_label_area_size(60);
        }
        let y_range = panel.y_range();
        let mut chart = builder
            .build_cartesian_2d(x_range.clone(), y_range.clone())
            .map_err(&on_error)?;

        if self.labelled {
            let mut mesh = chart.configure_mesh();
            mesh.x_labels(10).y_labels(6);
            if let Some(desc) = panel.y_desc {
                mesh.y_desc(desc);
            }
            mesh.draw().map_err(&on_error)?;
        }

        // Only differs from the data when it is wider than any f64 range.
        let (x0, x1, y0, y1) = (x_range.start, x_range.end, y_range.start, y_range.end);
        let clamp = move |(x, y): (f64, f64)| (x.clamp(x0, x1), y.clamp(y0, y1));

        for series in &panel.series {
            let style = series.style;
            let points = series.points.iter().copied().map(clamp);
            let annotation = match series.stroke {
                Stroke::Solid => chart.draw_series(LineSeries::new(points, style)),
                Stroke::Dashed => chart.draw_series(DashedLineSeries::new(points, 8, 5, style)),
            }
            .map_err(&on_error)?;
            annotation
                .label(series.label)
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
        }

        if panel.zero_line {
            let baseline = [(x_range.start, 0.0), (x_range.end, 0.0)];
            chart
                .draw_series(DashedLineSeries::new(
                    baseline,
                    2,
                    4,
                    BLACK.mix(0.5).stroke_width(1),
                ))
                .map_err(&on_error)?;
        }

        if self.labelled && panel.legend {
            chart
                .configure_series_labels()
                .position(SeriesLabelPosition::UpperRight)
                .background_style(&WHITE.mix(0.8))
                .border_style(&BLACK)
                .draw()
                .map_err(&on_error)?;
        }

        Ok(())
    }
}

fn draw_error<E>(panel: &'static str) -> impl Fn(DrawingAreaErrorKind<E>) -> RenderError
where
    E: std::error::Error + Send + Sync,
{
    move |e| RenderError::Draw {
        panel,
        message: e.to_string(),
    }
}

/// Registers the first candidate that can be read and parsed as a font.
fn register_first_font(candidates: &[PathBuf]) -> Option<PathBuf> {
    for path in candidates {
        let Ok(bytes) = std::fs::read(path) else {
            continue;
        };
        // plotters keeps registered font data for the life of the process.
        let bytes: &'static [u8] = Box::leak(bytes.into_boxed_slice());
        match register_font(FONT_FAMILY, FontStyle::Normal, bytes) {
            Ok(()) => {
                tracing::debug!(?path, "Registered chart font.");
                return Some(path.clone());
            }
            // plotters' font error implements neither Display nor Debug.
            Err(_) => tracing::warn!(?path, "Skipping unreadable font."),
        }
    }
    None
}
