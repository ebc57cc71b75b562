use std::f32::consts::FRAC_PI_2;

use eframe::egui::{self, Align2, Color32, FontId, Rect, Sense, Stroke, Ui, pos2, vec2};
use eframe::egui::epaint::TextShape;
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoints, Points};

use crate::color::{HueColors, categorical_palette, contrast_text, diverging_color};
use crate::data::series::{ColumnSelection, CountBar, ScatterSeries};
use crate::data::stats::CorrelationMatrix;

const UNCOLORED: Color32 = Color32::from_rgb(76, 114, 176);

// ---------------------------------------------------------------------------
// Correlation heatmap
// ---------------------------------------------------------------------------

/// Annotated heatmap of the correlation matrix with a colour bar.
pub fn correlation_heatmap(ui: &mut Ui, matrix: &CorrelationMatrix) {
    if matrix.is_empty() {
        ui.label("No columns to correlate.");
        return;
    }
    let n = matrix.len();

    let cell = 54.0;
    let gap = 6.0;
    let bar_width = 18.0;
    let font = FontId::proportional(12.0);
    let text_color = ui.visuals().text_color();

    let labels: Vec<_> = matrix
        .names
        .iter()
        .map(|name| ui.painter().layout_no_wrap(name.clone(), font.clone(), text_color))
        .collect();
    let label_len = labels.iter().map(|g| g.size().x).fold(0.0, f32::max) + gap;
    let label_thickness = labels.iter().map(|g| g.size().y).fold(0.0, f32::max);

    let grid = n as f32 * cell;
    let size = vec2(label_len + grid + 3.0 * gap + bar_width + 40.0, grid + label_len);
    let (response, painter) = ui.allocate_painter(size, Sense::hover());
    let origin = response.rect.min + vec2(label_len, 0.0);

    for i in 0..n {
        for j in 0..n {
            let value = matrix.get(i, j);
            let rect = Rect::from_min_size(
                origin + vec2(j as f32 * cell, i as f32 * cell),
                vec2(cell, cell),
            );
            let fill = diverging_color(value);
            painter.rect_filled(rect, 0.0, fill);
            if !value.is_nan() {
                painter.text(
                    rect.center(),
                    Align2::CENTER_CENTER,
                    format!("{value:.2}"),
                    font.clone(),
                    contrast_text(fill),
                );
            }
        }
    }

    for (idx, galley) in labels.into_iter().enumerate() {
        let center = idx as f32 * cell + cell / 2.0;
        let width = galley.size().x;

        // Row label, right-aligned against the grid.
        painter.galley(
            pos2(origin.x - gap - width, origin.y + center - galley.size().y / 2.0),
            galley.clone(),
            text_color,
        );

        // Column label, reading upwards and ending just under the grid.
        let anchor = pos2(
            origin.x + center - label_thickness / 2.0,
            origin.y + grid + gap + width,
        );
        painter.add(TextShape::new(anchor, galley, text_color).with_angle(-FRAC_PI_2));
    }

    // Colour bar from +1 (top) to -1 (bottom).
    let bar_left = origin.x + grid + 2.0 * gap;
    let steps = 40;
    let step_h = grid / steps as f32;
    for s in 0..steps {
        let value = 1.0 - 2.0 * (s as f64 + 0.5) / steps as f64;
        let rect = Rect::from_min_size(
            pos2(bar_left, origin.y + s as f32 * step_h),
            vec2(bar_width, step_h + 0.5),
        );
        painter.rect_filled(rect, 0.0, diverging_color(value));
    }
    painter.rect_stroke(
        Rect::from_min_size(pos2(bar_left, origin.y), vec2(bar_width, grid)),
        0.0,
        Stroke::new(1.0, ui.visuals().weak_text_color()),
        egui::StrokeKind::Outside,
    );
    for (value, frac) in [(1.0, 0.0), (0.0, 0.5), (-1.0, 1.0)] {
        painter.text(
            pos2(bar_left + bar_width + gap, origin.y + frac * grid),
            Align2::LEFT_CENTER,
            format!("{value:.1}"),
            font.clone(),
            text_color,
        );
    }
}

// ---------------------------------------------------------------------------
// Scatter plot
// ---------------------------------------------------------------------------

/// Id salt of the scatter plot. Zoom and pan are remembered per X/Y pair,
/// so picking other axes starts again from auto bounds.
fn scatter_plot_salt(selection: &ColumnSelection) -> (&'static str, &str, &str) {
    ("scatter_plot", selection.x.as_str(), selection.y.as_str())
}

/// Y vs X, one series per hue group (or a single uncoloured series).
pub fn scatter_plot(ui: &mut Ui, series: &[ScatterSeries], selection: &ColumnSelection) {
    let hue_name = selection.effective_hue();
    let colors = HueColors::new(series.iter().filter_map(|s| s.hue.as_ref()));

    let mut plot = Plot::new(scatter_plot_salt(selection))
        .x_axis_label(selection.x.as_str())
        .y_axis_label(selection.y.as_str())
        .height(420.0)
        .allow_scroll(false)
        .allow_boxed_zoom(true);
    if hue_name.is_some() {
        plot = plot.legend(Legend::default());
    }

    plot.show(ui, |plot_ui| {
        for s in series {
            let points: PlotPoints = s.points.iter().copied().collect();
            let (name, color) = match (&s.hue, hue_name) {
                (Some(key), Some(hue)) => (format!("{hue} = {key}"), colors.color_for(key)),
                _ => (format!("{} vs {}", selection.y, selection.x), UNCOLORED),
            };
            plot_ui.points(
                Points::new(points)
                    .name(name)
                    .color(color)
                    .radius(2.5)
                    .filled(true),
            );
        }
    });
}

// ---------------------------------------------------------------------------
// Count plot
// ---------------------------------------------------------------------------

/// One bar per distinct quality score, height = number of rows.
pub fn quality_plot(ui: &mut Ui, bars: &[CountBar]) {
    let palette = categorical_palette(bars.len());
    let chart: Vec<Bar> = bars
        .iter()
        .zip(palette)
        .map(|(bar, color)| {
            Bar::new(bar.value.0, bar.count as f64)
                .name(format!("quality {}", bar.value))
                .fill(color)
                .width(0.8)
        })
        .collect();

    Plot::new("quality_plot")
        .x_axis_label("quality")
        .y_axis_label("count")
        .height(320.0)
        .allow_scroll(false)
        .allow_drag(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(chart));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn select(x: &str, y: &str, hue: Option<&str>) -> ColumnSelection {
        ColumnSelection {
            x: x.to_string(),
            y: y.to_string(),
            hue: hue.map(str::to_string),
        }
    }

    fn plot_id(selection: &ColumnSelection) -> egui::Id {
        egui::Id::new(scatter_plot_salt(selection))
    }

    #[test]
    fn changing_axes_gives_fresh_plot_memory() {
        let base = plot_id(&select("alcohol", "pH", None));
        assert_ne!(base, plot_id(&select("density", "pH", None)));
        assert_ne!(base, plot_id(&select("alcohol", "density", None)));
        assert_ne!(base, plot_id(&select("pH", "alcohol", None)));
    }

    #[test]
    fn changing_hue_keeps_zoom() {
        assert_eq!(
            plot_id(&select("alcohol", "pH", None)),
            plot_id(&select("alcohol", "pH", Some("quality")))
        );
    }
}
