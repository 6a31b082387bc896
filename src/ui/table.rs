use eframe::egui::{self, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};

use delivery_dashboard::data::DeliveryTable;
use delivery_dashboard::data::aggregate::{DurationSummary, GroupMean};

/// Show the given rows verbatim, every column.
pub fn preview_table(ui: &mut Ui, table: &DeliveryTable, rows: &[usize]) {
    if rows.is_empty() {
        ui.label("No records match the current filters.");
        return;
    }

    ScrollArea::horizontal()
        .id_salt("preview_scroll")
        .show(ui, |ui: &mut Ui| {
            TableBuilder::new(ui)
                .striped(true)
                .resizable(true)
                .vscroll(false)
                .cell_layout(egui::Layout::left_to_right(egui::Align::Center))
                .columns(Column::auto().at_least(60.0), table.columns.len())
                .header(20.0, |mut header| {
                    for name in &table.columns {
                        header.col(|ui| {
                            ui.strong(name.as_str());
                        });
                    }
                })
                .body(|body| {
                    body.rows(18.0, rows.len(), |mut row| {
                        let record = &table.records[rows[row.index()]];
                        for cell in &record.cells {
                            row.col(|ui| {
                                ui.label(cell.to_string());
                            });
                        }
                    });
                });
        });
}

pub fn summary_grid(ui: &mut Ui, summary: &DurationSummary) {
    egui::Grid::new("duration_summary")
        .num_columns(2)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.label("Deliveries");
            ui.label(summary.rows.to_string());
            ui.end_row();

            ui.label("Without a delivery time");
            ui.label(summary.missing.to_string());
            ui.end_row();

            ui.label("Mean (min)");
            ui.label(minutes(summary.mean));
            ui.end_row();

            ui.label("Fastest (min)");
            ui.label(minutes(summary.min));
            ui.end_row();

            ui.label("Slowest (min)");
            ui.label(minutes(summary.max));
            ui.end_row();
        });
}

pub fn group_mean_grid(ui: &mut Ui, id: &str, heading: &str, means: &[GroupMean]) {
    egui::Grid::new(id)
        .num_columns(3)
        .striped(true)
        .show(ui, |ui: &mut Ui| {
            ui.strong(heading);
            ui.strong("Mean (min)");
            ui.strong("Deliveries");
            ui.end_row();
            for group in means {
                ui.label(group.key.as_str());
                ui.label(format!("{:.2}", group.mean));
                ui.label(group.count.to_string());
                ui.end_row();
            }
        });
}

fn minutes(value: Option<f64>) -> String {
    value.map_or_else(|| "–".to_string(), |v| format!("{v:.2}"))
}
