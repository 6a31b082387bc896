use std::collections::BTreeSet;
use std::path::PathBuf;
use std::sync::Arc;

use delivery_dashboard::config::DashboardConfig;
use delivery_dashboard::data::aggregate::{
    DurationSummary, GroupMean, Histogram, duration_histogram, duration_summary, group_mean,
};
use delivery_dashboard::data::filter::DeliveryFilter;
use delivery_dashboard::data::schema::{TRAFFIC_DENSITY, WEATHER};
use delivery_dashboard::data::{DatasetCache, DeliveryTable};

use crate::color::CategoryColors;

// ---------------------------------------------------------------------------
// Derived views of the filtered rows
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct Derived {
    pub summary: DurationSummary,
    pub histogram: Option<Histogram>,
    pub traffic_means: Vec<GroupMean>,
    pub weather_means: Vec<GroupMean>,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,
    cache: DatasetCache,

    /// File currently shown.
    pub data_path: PathBuf,

    /// Validated dataset; `None` while nothing is loaded or the last load failed.
    pub table: Option<Arc<DeliveryTable>>,

    /// Current filter selection; `limit` is driven by `preview_rows`.
    pub filter: DeliveryFilter,

    /// Minimum delivery time slider; 0 disables the bound.
    pub min_duration: f64,

    /// Rows shown in the preview table.
    pub preview_rows: usize,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// First `preview_rows` of `visible_indices`.
    pub preview_indices: Vec<usize>,

    pub derived: Derived,

    pub traffic_colors: CategoryColors,

    /// Load error shown instead of the dashboard.
    pub status_message: Option<String>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let cache = DatasetCache::new(config.load_options());
        Self {
            data_path: config.data_path.clone(),
            preview_rows: config.preview_rows,
            config,
            cache,
            table: None,
            filter: DeliveryFilter::default(),
            min_duration: 0.0,
            preview_indices: Vec::new(),
            visible_indices: Vec::new(),
            derived: Derived::default(),
            traffic_colors: CategoryColors::default(),
            status_message: None,
        }
    }

    /// Load (or fetch from cache) `path` and make it the current dataset.
    ///
    /// On failure the previous dataset is dropped: nothing is rendered from
    /// data that did not validate.
    pub fn load(&mut self, path: PathBuf) {
        self.data_path = path;
        match self.cache.get_or_load(&self.data_path) {
            Ok(table) => {
                log::info!(
                    "Showing {} records with columns {:?}",
                    table.len(),
                    table.columns
                );
                self.set_table(table);
            }
            Err(e) => {
                log::error!("Failed to load {} ({}): {e}", self.data_path.display(), e.kind());
                self.table = None;
                self.visible_indices.clear();
                self.preview_indices.clear();
                self.derived = Derived::default();
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Re-read the current file, bypassing the cache.
    pub fn reload(&mut self) {
        self.cache.invalidate(&self.data_path);
        self.load(self.data_path.clone());
    }

    /// Ingest a newly loaded table and reset the filters.
    pub fn set_table(&mut self, table: Arc<DeliveryTable>) {
        let same = self
            .table
            .as_ref()
            .is_some_and(|current| Arc::ptr_eq(current, &table));
        if !same {
            self.filter = DeliveryFilter::default();
            self.min_duration = 0.0;
            self.traffic_colors = CategoryColors::new(&table.categories(TRAFFIC_DENSITY));
        }
        self.table = Some(table);
        self.status_message = None;
        self.refilter();
    }

    /// Recompute visible rows and aggregates after a filter change.
    pub fn refilter(&mut self) {
        let Some(table) = &self.table else {
            return;
        };
        self.filter.min_duration = (self.min_duration > 0.0).then_some(self.min_duration);

        self.filter.limit = None;
        self.visible_indices = self.filter.apply(table);

        let preview = DeliveryFilter {
            limit: Some(self.preview_rows),
            ..self.filter.clone()
        };
        self.preview_indices = preview.apply(table);

        let rows = &self.visible_indices;
        self.derived = Derived {
            summary: duration_summary(table, rows),
            histogram: duration_histogram(table, rows, self.config.histogram_bins),
            traffic_means: group_mean(table, rows, TRAFFIC_DENSITY),
            weather_means: group_mean(table, rows, WEATHER),
        };
    }

    /// Toggle a single traffic density in the membership filter.
    pub fn toggle_traffic(&mut self, value: &str) {
        let all = self.traffic_levels();
        let selected = self
            .filter
            .traffic
            .get_or_insert_with(|| all.iter().cloned().collect());
        if !selected.remove(value) {
            selected.insert(value.to_string());
        }
        if selected.len() == all.len() {
            self.filter.traffic = None;
        }
        self.refilter();
    }

    /// Whether a traffic density passes the membership filter.
    pub fn traffic_selected(&self, value: &str) -> bool {
        self.filter
            .traffic
            .as_ref()
            .map_or(true, |set| set.contains(value))
    }

    pub fn select_all_traffic(&mut self) {
        self.filter.traffic = None;
        self.refilter();
    }

    pub fn select_no_traffic(&mut self) {
        self.filter.traffic = Some(BTreeSet::new());
        self.refilter();
    }

    pub fn traffic_levels(&self) -> Vec<String> {
        self.table
            .as_ref()
            .map(|t| t.categories(TRAFFIC_DENSITY))
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn state_with(rows: &[&str]) -> (tempfile::TempDir, AppState) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("delivery_data.csv");
        let mut out = String::from(
            "Order_Date,City,Type_of_vehicle,Road_traffic_density,Weatherconditions,Time_taken(min)\n",
        );
        for row in rows {
            out.push_str(row);
            out.push('\n');
        }
        fs::write(&path, out).unwrap();
        let mut state = AppState::new(DashboardConfig::default());
        state.load(path);
        (dir, state)
    }

    #[test]
    fn load_populates_views() {
        let (_dir, state) = state_with(&[
            "19-03-2022,Urban,motorcycle,High,Sunny,(min) 24",
            "19-03-2022,Urban,scooter,Jam,Fog,(min) 40",
        ]);
        assert!(state.status_message.is_none());
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.derived.summary.mean, Some(32.0));
        assert_eq!(state.derived.traffic_means.len(), 2);
    }

    #[test]
    fn failed_load_clears_dataset() {
        let (dir, mut state) = state_with(&["19-03-2022,Urban,motorcycle,High,Sunny,24"]);
        state.load(dir.path().join("amazon.csv"));
        assert!(state.table.is_none());
        assert!(state.visible_indices.is_empty());
        let msg = state.status_message.unwrap();
        assert!(msg.contains("amazon.csv"), "{msg}");
    }

    #[test]
    fn traffic_toggle_and_min_duration() {
        let (_dir, mut state) = state_with(&[
            "19-03-2022,Urban,motorcycle,High,Sunny,24",
            "19-03-2022,Urban,scooter,Jam,Fog,40",
            "20-03-2022,Urban,scooter,Low,Fog,18",
        ]);
        state.toggle_traffic("Jam");
        assert!(!state.traffic_selected("Jam"));
        assert_eq!(state.visible_indices, vec![0, 2]);

        state.min_duration = 20.0;
        state.refilter();
        assert_eq!(state.visible_indices, vec![0]);

        state.toggle_traffic("Jam");
        assert!(state.filter.traffic.is_none());
        assert_eq!(state.visible_indices, vec![0, 1]);

        state.select_no_traffic();
        assert!(state.visible_indices.is_empty());
    }

    #[test]
    fn preview_is_limited() {
        let (_dir, mut state) = state_with(&[
            "19-03-2022,Urban,motorcycle,High,Sunny,24",
            "19-03-2022,Urban,scooter,Jam,Fog,40",
            "20-03-2022,Urban,scooter,Low,Fog,18",
        ]);
        state.preview_rows = 2;
        state.refilter();
        assert_eq!(state.preview_indices, vec![0, 1]);
        assert_eq!(state.visible_indices.len(), 3);
    }
}
