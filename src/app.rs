use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use delivery_dashboard::config::DashboardConfig;

use crate::color::CategoryColors;
use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct DeliveryDashboardApp {
    pub state: AppState,
}

impl DeliveryDashboardApp {
    /// Build the app and load the configured dataset right away.
    pub fn new(config: DashboardConfig) -> Self {
        let mut state = AppState::new(config);
        state.load(state.data_path.clone());
        Self { state }
    }
}

impl eframe::App for DeliveryDashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: filters ----
        egui::SidePanel::left("filter_panel")
            .default_width(240.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &mut self.state);
            });

        // ---- Central panel: tables and charts ----
        egui::CentralPanel::default().show(ctx, |ui| {
            dashboard(ui, &self.state);
        });
    }
}

fn dashboard(ui: &mut Ui, state: &AppState) {
    let Some(data) = &state.table else {
        ui.centered_and_justified(|ui: &mut Ui| {
            match &state.status_message {
                Some(msg) => ui.heading(RichText::new(msg.as_str()).color(Color32::RED)),
                None => ui.heading("Open a delivery CSV to begin  (File → Open…)"),
            };
        });
        return;
    };

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.heading("Amazon-Style Delivery Analytics");
            ui.separator();

            ui.strong("Data Preview");
            table::preview_table(ui, data, &state.preview_indices);
            ui.add_space(8.0);

            ui.strong("Delivery Time Summary");
            table::summary_grid(ui, &state.derived.summary);
            ui.add_space(8.0);

            ui.strong("Delivery Time Distribution");
            plot::duration_histogram(ui, state.derived.histogram.as_ref());
            ui.add_space(8.0);

            ui.strong("Traffic Density Impact");
            plot::group_mean_chart(
                ui,
                "traffic_chart",
                &state.derived.traffic_means,
                &state.traffic_colors,
            );
            table::group_mean_grid(ui, "traffic_grid", "Traffic", &state.derived.traffic_means);
            ui.add_space(8.0);

            ui.strong("Weather Impact on Delivery Time");
            let keys: Vec<String> = state
                .derived
                .weather_means
                .iter()
                .map(|g| g.key.clone())
                .collect();
            plot::group_mean_chart(
                ui,
                "weather_chart",
                &state.derived.weather_means,
                &CategoryColors::new(&keys),
            );
            table::group_mean_grid(ui, "weather_grid", "Weather", &state.derived.weather_means);
        });
}
