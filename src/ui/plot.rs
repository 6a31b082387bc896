use eframe::egui::{Color32, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot};

use delivery_dashboard::data::aggregate::{GroupMean, Histogram};

use crate::color::CategoryColors;

const PLOT_HEIGHT: f32 = 220.0;

// ---------------------------------------------------------------------------
// Delivery time histogram
// ---------------------------------------------------------------------------

pub fn duration_histogram(ui: &mut Ui, histogram: Option<&Histogram>) {
    let Some(hist) = histogram else {
        ui.label("No delivery times to plot.");
        return;
    };

    let width = hist.bin_width();
    let bars: Vec<Bar> = hist
        .centers()
        .zip(&hist.counts)
        .map(|(x, &count)| Bar::new(x, count as f64).width(width))
        .collect();

    Plot::new("duration_histogram")
        .height(PLOT_HEIGHT)
        .x_axis_label("Time taken (min)")
        .y_axis_label("Deliveries")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(
                BarChart::new(bars)
                    .name("Deliveries")
                    .color(Color32::LIGHT_BLUE),
            );
        });
}

// ---------------------------------------------------------------------------
// Grouped means (traffic / weather)
// ---------------------------------------------------------------------------

/// One bar per category, each its own chart so the legend names it.
pub fn group_mean_chart(ui: &mut Ui, id: &str, means: &[GroupMean], colors: &CategoryColors) {
    if means.is_empty() {
        ui.label("No delivery times to plot.");
        return;
    }

    Plot::new(id)
        .legend(Legend::default())
        .height(PLOT_HEIGHT)
        .y_axis_label("Mean time taken (min)")
        .allow_drag(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            for (i, group) in means.iter().enumerate() {
                let bar = Bar::new(i as f64, group.mean)
                    .width(0.7)
                    .name(&group.key);
                plot_ui.bar_chart(
                    BarChart::new(vec![bar])
                        .name(&group.key)
                        .color(colors.color_for(&group.key)),
                );
            }
        });
}
