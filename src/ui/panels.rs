use eframe::egui::{self, Color32, RichText, ScrollArea, Slider, Ui};

use delivery_dashboard::data::schema::{CITY, ORDER_DATE, VEHICLE_TYPE};

use crate::state::AppState;

const ALL: &str = "All";

// ---------------------------------------------------------------------------
// Left side panel – filter widgets
// ---------------------------------------------------------------------------

/// Render the left filter panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Filter Options");
    ui.separator();

    let Some(table) = state.table.clone() else {
        ui.label("No dataset loaded.");
        return;
    };

    let mut changed = false;

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            changed |= category_combo(
                ui,
                "Select City",
                &table.categories(CITY),
                &mut state.filter.city,
            );
            changed |= category_combo(
                ui,
                "Select Vehicle Type",
                &table.categories(VEHICLE_TYPE),
                &mut state.filter.vehicle,
            );
            changed |= category_combo(
                ui,
                "Select Order Date",
                &table.categories(ORDER_DATE),
                &mut state.filter.order_date,
            );
            ui.separator();

            // ---- Traffic density (multi-select) ----
            let levels = state.traffic_levels();
            let n_selected = levels.iter().filter(|l| state.traffic_selected(l)).count();
            ui.strong(format!("Road traffic density  ({n_selected}/{})", levels.len()));
            ui.horizontal(|ui: &mut Ui| {
                if ui.small_button(ALL).clicked() {
                    state.select_all_traffic();
                }
                if ui.small_button("None").clicked() {
                    state.select_no_traffic();
                }
            });
            for level in &levels {
                let mut checked = state.traffic_selected(level);
                let text = RichText::new(level.as_str()).color(state.traffic_colors.color_for(level));
                if ui.checkbox(&mut checked, text).changed() {
                    state.toggle_traffic(level);
                }
            }
            ui.separator();

            // ---- Numeric sliders ----
            let max_duration = table.max_duration().unwrap_or(0.0);
            changed |= ui
                .add(
                    Slider::new(&mut state.min_duration, 0.0..=max_duration)
                        .text("Min delivery time (min)"),
                )
                .changed();

            let max_rows = table.len().max(1);
            changed |= ui
                .add(Slider::new(&mut state.preview_rows, 1..=max_rows).text("Number of records"))
                .changed();
        });

    if changed {
        state.refilter();
    }
}

/// "All" plus one entry per category.  Returns whether the selection changed.
fn category_combo(
    ui: &mut Ui,
    label: &str,
    options: &[String],
    selected: &mut Option<String>,
) -> bool {
    let mut changed = false;
    ui.strong(label);
    let current = selected.clone().unwrap_or_else(|| ALL.to_string());
    egui::ComboBox::from_id_salt(label)
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            if ui.selectable_label(selected.is_none(), ALL).clicked() {
                *selected = None;
                changed = true;
            }
            for opt in options {
                let is_current = selected.as_deref() == Some(opt.as_str());
                if ui.selectable_label(is_current, opt.as_str()).clicked() {
                    *selected = Some(opt.clone());
                    changed = true;
                }
            }
        });
    ui.add_space(4.0);
    changed
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
        });

        ui.separator();
        ui.label(state.data_path.display().to_string());

        if let Some(table) = &state.table {
            ui.separator();
            ui.label(format!(
                "{} records loaded, {} match",
                table.len(),
                state.visible_indices.len()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg.as_str()).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open delivery data")
        .add_filter("CSV", &["csv", "tsv", "txt"])
        .pick_file();

    if let Some(path) = file {
        state.load(path);
    }
}
