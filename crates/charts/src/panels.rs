use analytics::Analysis;
use core_types::MarketData;
use plotters::style::{BLACK, BLUE, Color, GREEN, RED, RGBColor, ShapeStyle};
use std::ops::Range;

const PURPLE: RGBColor = RGBColor(128, 0, 128);
const BROWN: RGBColor = RGBColor(165, 42, 42);
const ORANGE: RGBColor = RGBColor(255, 165, 0);

/// How a series is stroked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stroke {
    Solid,
    Dashed,
}

/// One line in a panel.
#[derive(Clone)]
pub struct Series {
    pub label: &'static str,
    pub points: Vec<(f64, f64)>,
    pub style: ShapeStyle,
    pub stroke: Stroke,
}

/// One of the four stacked plots.
#[derive(Clone)]
pub struct Panel {
    pub title: &'static str,
    pub y_desc: Option<&'static str>,
    pub series: Vec<Series>,
    /// Draw a dotted horizontal reference line at zero.
    pub zero_line: bool,
    pub legend: bool,
}

impl Panel {
    /// Vertical range covering every finite point (and zero when the
    /// reference line is drawn), padded by 5%.
    pub fn y_range(&self) -> Range<f64> {
        let ys = self
            .series
            .iter()
            .flat_map(|s| s.points.iter().map(|&(_, y)| y))
            .chain(self.zero_line.then_some(0.0));
        padded(ys)
    }
}

/// The fixed layout, top to bottom: prices and quotes, spread, inventory,
/// skew.
pub fn build_panels(data: &MarketData, analysis: &Analysis) -> Vec<Panel> {
    let prices = Panel {
        title: "Market Price & MM Quotes (Avellaneda-Stoikov)",
        y_desc: None,
        series: vec![
            series(
                "Mid Price",
                data.book.iter().map(|b| (b.timestamp, b.mid_price)),
                BLACK.mix(0.5).stroke_width(2),
                Stroke::Solid,
            ),
            series(
                "MM Bid",
                data.quotes.iter().map(|q| (q.timestamp, q.bid_price)),
                GREEN.stroke_width(1),
                Stroke::Dashed,
            ),
            series(
                "MM Ask",
                data.quotes.iter().map(|q| (q.timestamp, q.ask_price)),
                RED.stroke_width(1),
                Stroke::Dashed,
            ),
            series(
                "Reservation Price",
                data.quotes.iter().map(|q| (q.timestamp, q.reservation_price)),
                BLUE.mix(0.3).stroke_width(2),
                Stroke::Solid,
            ),
        ],
        zero_line: false,
        legend: true,
    };

    let spread = Panel {
        title: "Quoted Spread",
        y_desc: Some("Spread"),
        series: vec![series(
            "MM Spread",
            analysis.spreads.iter().map(|s| (s.timestamp, s.spread)),
            PURPLE.stroke_width(1),
            Stroke::Solid,
        )],
        zero_line: false,
        legend: false,
    };

    let inventory = Panel {
        title: "Inventory Position",
        y_desc: None,
        series: vec![series(
            "MM Inventory",
            data.book.iter().map(|b| (b.timestamp, b.inventory)),
            BROWN.stroke_width(1),
            Stroke::Solid,
        )],
        zero_line: true,
        legend: true,
    };

    let skew = Panel {
        title: "Inventory Skew Pressure (Reservation - Mid)",
        y_desc: None,
        series: vec![series(
            "Reservation Price Skew (r - mid)",
            analysis.merged.iter().map(|m| (m.timestamp, m.skew)),
            ORANGE.stroke_width(1),
            Stroke::Solid,
        )],
        zero_line: true,
        legend: true,
    };

    vec![prices, spread, inventory, skew]
}

/// Horizontal range shared by all panels.
pub fn shared_x_range(panels: &[Panel]) -> Range<f64> {
    padded(
        panels
            .iter()
            .flat_map(|p| p.series.iter())
            .flat_map(|s| s.points.iter().map(|&(x, _)| x)),
    )
}

/// Builds a series in source order. Non-finite points cannot be placed on
/// the canvas and are left out.
fn series(
    label: &'static str,
    points: impl Iterator<Item = (f64, f64)>,
    style: ShapeStyle,
    stroke: Stroke,
) -> Series {
    Series {
        label,
        points: points.filter(|(x, y)| x.is_finite() && y.is_finite()).collect(),
        style,
        stroke,
    }
}

fn padded(values: impl Iterator<Item = f64>) -> Range<f64> {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if min > max {
        return 0.0..1.0;
    }
    // Scaled before subtracting so values near f64::MAX cannot overflow.
    let pad = if min == max {
        (min.abs() * 0.05).max(0.5)
    } else {
        max * 0.05 - min * 0.05
    };
    let lo = (min - pad).max(f64::MIN);
    let hi = (max + pad).min(f64::MAX);
    if (hi - lo).is_finite() {
        return lo..hi;
    }
    if (max - min).is_finite() {
        return min..max;
    }
    // The data is wider than any f64 range; points are clamped into this one.
    (f64::MIN / 2.0)..(f64::MAX / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use analytics::AnalyticsEngine;
    use core_types::{BookRecord, QuoteRecord};

    fn scenario() -> (MarketData, Analysis) {
        let data = MarketData {
            book: vec![
                BookRecord {
                    timestamp: 0.0,
                    mid_price: 100.0,
                    inventory: 0.0,
                },
                BookRecord {
                    timestamp: 1.0,
                    mid_price: 101.0,
                    inventory: 5.0,
                },
            ],
            quotes: vec![QuoteRecord {
                timestamp: 0.9,
                bid_price: 100.4,
                ask_price: 100.8,
                reservation_price: 100.6,
            }],
            ..MarketData::default()
        };
        let analysis = AnalyticsEngine::new().analyze(&data).unwrap();
        (data, analysis)
    }

    #[test]
    fn layout_has_four_panels_in_fixed_order() {
        let (data, analysis) = scenario();
        let panels = build_panels(&data, &analysis);

        let titles: Vec<_> = panels.iter().map(|p| p.title).collect();
        assert_eq!(
            titles,
            vec![
                "Market Price & MM Quotes (Avellaneda-Stoikov)",
                "Quoted Spread",
                "Inventory Position",
                "Inventory Skew Pressure (Reservation - Mid)",
            ]
        );
        assert_eq!(panels[0].series.len(), 4);
        assert_eq!(panels[0].series[1].stroke, Stroke::Dashed);
        assert_eq!(panels[1].y_desc, Some("Spread"));
        assert!(!panels[1].legend);
        assert!(panels[2].zero_line && panels[3].zero_line);
    }

    #[test]
    fn panels_plot_the_derived_columns() {
        let (data, analysis) = scenario();
        let panels = build_panels(&data, &analysis);

        assert_eq!(panels[0].series[0].points, vec![(0.0, 100.0), (1.0, 101.0)]);
        let (t, spread) = panels[1].series[0].points[0];
        assert_eq!(t, 0.9);
        assert!((spread - 0.4).abs() < 1e-9);
        assert_eq!(panels[2].series[0].points, vec![(0.0, 0.0), (1.0, 5.0)]);
        let (_, skew) = panels[3].series[0].points[0];
        assert!((skew - (-0.4)).abs() < 1e-9);
    }

    #[test]
    fn shared_x_range_spans_book_and_quotes() {
        let (data, analysis) = scenario();
        let x = shared_x_range(&build_panels(&data, &analysis));

        assert!(x.start < 0.0 && x.end > 1.0);
    }

    #[test]
    fn zero_line_panels_always_include_zero() {
        let (data, analysis) = scenario();
        let panels = build_panels(&data, &analysis);

        // Skew is strictly negative but the range still reaches zero.
        let y = panels[3].y_range();
        assert!(y.start < -0.4 && y.end >= 0.0);
    }

    #[test]
    fn empty_inputs_give_usable_ranges() {
        let data = MarketData::default();
        let analysis = AnalyticsEngine::new().analyze(&data).unwrap();
        let panels = build_panels(&data, &analysis);

        assert!(panels.iter().all(|p| p.series.iter().all(|s| s.points.is_empty())));
        assert_eq!(shared_x_range(&panels), 0.0..1.0);
        assert_eq!(panels[1].y_range(), 0.0..1.0);
        assert_eq!(panels[2].y_range(), -0.5..0.5);
    }

    #[test]
    fn non_finite_points_are_skipped() {
        let s = series(
            "x",
            vec![(0.0, 1.0), (1.0, f64::NAN), (2.0, 3.0)].into_iter(),
            BLACK.stroke_width(1),
            Stroke::Solid,
        );

        assert_eq!(s.points, vec![(0.0, 1.0), (2.0, 3.0)]);
    }

    #[test]
    fn extreme_values_still_give_finite_ranges() {
        let data = MarketData {
            book: vec![
                BookRecord {
                    timestamp: 0.0,
                    mid_price: 1.7e308,
                    inventory: 0.0,
                },
                BookRecord {
                    timestamp: 1.0,
                    mid_price: -1.7e308,
                    inventory: 5.0,
                },
            ],
            ..MarketData::default()
        };
        let analysis = AnalyticsEngine::new().analyze(&data).unwrap();
        let panels = build_panels(&data, &analysis);

        let y = panels[0].y_range();
        assert!(y.start.is_finite() && y.end.is_finite());
        assert!((y.end - y.start).is_finite() && y.start < y.end);

        // Near the edge of f64 but still representable: the range covers the data.
        let y = padded([f64::MAX * 0.99, 0.0].into_iter());
        assert!((y.end - y.start).is_finite());
        assert!(y.start <= 0.0 && y.end >= f64::MAX * 0.99);

        let y = padded([1e308, 1e308].into_iter());
        assert!(y.start < 1e308 && y.end > 1e308);
        assert!((y.end - y.start).is_finite());
    }
}
