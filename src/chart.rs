use crate::calc::format_calories;
use crate::models::Section;
use std::fmt::Write;
use tracing::debug;

pub const COLORS: [&str; 5] = ["#ffa07a", "#f08080", "#e9967a", "#fafad2", "#90ee90"];

const WIDTH: f64 = 600.0;
const HEIGHT: f64 = 260.0;
const PADDING_X: f64 = 44.0;
const PADDING_Y: f64 = 34.0;
const TOP: f64 = 24.0;

#[derive(Debug, Clone, PartialEq)]
pub struct BarChart {
    pub labels: [&'static str; 5],
    pub series: [f64; 5],
    pub colors: [&'static str; 5],
}

impl BarChart {
    pub fn new(series: [f64; 5]) -> Self {
        Self {
            labels: Section::ALL.map(Section::label),
            series,
            colors: COLORS,
        }
    }

    pub fn to_svg(&self) -> String {
        let mut min = self.series.iter().copied().fold(0.0_f64, f64::min);
        let mut max = self.series.iter().copied().fold(0.0_f64, f64::max);
        if min == max {
            min -= 1.0;
            max += 1.0;
        }

        let range = max - min;
        let scale_y = (HEIGHT - TOP - PADDING_Y) / range;
        let y = |value: f64| HEIGHT - PADDING_Y - (value - min) * scale_y;
        let slot = (WIDTH - PADDING_X * 2.0) / self.series.len() as f64;
        let bar_width = slot * 0.6;

        let mut svg = format!(
            r#"<svg id="calorieChart" viewBox="0 0 {WIDTH} {HEIGHT}" role="img" aria-label="Calories by section">"#
        );

        let ticks = 4;
        for i in 0..=ticks {
            let value = min + range * f64::from(i) / f64::from(ticks);
            let y_pos = y(value);
            let _ = write!(
                svg,
                r#"<line class="chart-grid" x1="{PADDING_X}" y1="{y_pos:.2}" x2="{}" y2="{y_pos:.2}" /><text class="chart-label" x="{}" y="{:.2}" text-anchor="end">{}</text>"#,
                WIDTH - PADDING_X,
                PADDING_X - 10.0,
                y_pos + 4.0,
                format_calories(value.round()),
            );
        }

        let zero = y(0.0);
        for (index, ((label, value), color)) in self
            .labels
            .iter()
            .zip(self.series)
            .zip(self.colors)
            .enumerate()
        {
            let center = PADDING_X + slot * (index as f64 + 0.5);
            let top = y(value).min(zero);
            let height = (y(value) - zero).abs();
            let _ = write!(
                svg,
                r#"<rect class="chart-bar" x="{:.2}" y="{top:.2}" width="{bar_width:.2}" height="{height:.2}" fill="{color}"><title>{label}: {}</title></rect><text class="chart-label" x="{center:.2}" y="{:.2}" text-anchor="middle">{label}</text>"#,
                center - bar_width / 2.0,
                format_calories(value),
                HEIGHT - PADDING_Y + 18.0,
            );
        }

        let _ = write!(
            svg,
            r#"<line class="chart-axis" x1="{PADDING_X}" y1="{zero:.2}" x2="{}" y2="{zero:.2}" /></svg>"#,
            WIDTH - PADDING_X,
        );
        svg
    }
}

/// Holds at most one live chart. Rendering always tears down the previous one first.
#[derive(Debug, Default)]
pub struct ChartSlot {
    current: Option<BarChart>,
}

impl ChartSlot {
    pub fn render(&mut self, series: [f64; 5]) -> &BarChart {
        self.destroy();
        debug!(?series, "rendering chart");
        self.current.insert(BarChart::new(series))
    }

    /// Returns whether a chart was torn down.
    pub fn destroy(&mut self) -> bool {
        let destroyed = self.current.take().is_some();
        if destroyed {
            debug!("chart destroyed");
        }
        destroyed
    }

    pub fn current(&self) -> Option<&BarChart> {
        self.current.as_ref()
    }
}
