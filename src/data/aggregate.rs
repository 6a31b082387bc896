use std::collections::BTreeMap;

use super::model::DeliveryTable;

/// Mean delivery time of one category.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMean {
    pub key: String,
    pub mean: f64,
    /// Rows that contributed a duration.
    pub count: usize,
}

/// Mean duration per distinct value of `column` over the rows in `indices`.
///
/// Missing durations are skipped; categories with no durations at all are
/// left out.  Output is sorted by key.
pub fn group_mean(table: &DeliveryTable, indices: &[usize], column: &str) -> Vec<GroupMean> {
    let Some(col) = table.column_index(column) else {
        return Vec::new();
    };

    let mut sums: BTreeMap<String, (f64, usize)> = BTreeMap::new();
    for &i in indices {
        let Some(duration) = table.duration(i) else {
            continue;
        };
        let Some(key) = table.records[i].get(col).and_then(|c| c.as_text()) else {
            continue;
        };
        let slot = sums.entry(key.to_string()).or_insert((0.0, 0));
        slot.0 += duration;
        slot.1 += 1;
    }

    sums.into_iter()
        .map(|(key, (sum, count))| GroupMean {
            key,
            mean: sum / count as f64,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `counts.len() + 1` ascending bin edges.
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [a, b, ..] => b - a,
            _ => 0.0,
        }
    }

    /// Centre of each bin, for plotting.
    pub fn centers(&self) -> impl Iterator<Item = f64> + '_ {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Equal-width histogram of the present durations in `indices`.
///
/// Bins span `min..=max`; the last bin is closed.  With a single distinct
/// value everything lands in one bin of width 1.  `None` when there is
/// nothing to count or `bins` is zero.
pub fn duration_histogram(table: &DeliveryTable, indices: &[usize], bins: usize) -> Option<Histogram> {
    if bins == 0 {
        return None;
    }
    let values: Vec<f64> = indices.iter().filter_map(|&i| table.duration(i)).collect();
    let min = values.iter().copied().reduce(f64::min)?;
    let max = values.iter().copied().reduce(f64::max)?;

    if max - min < f64::EPSILON {
        return Some(Histogram {
            edges: vec![min - 0.5, min + 0.5],
            counts: vec![values.len()],
        });
    }

    let width = (max - min) / bins as f64;
    let edges = (0..=bins).map(|i| min + width * i as f64).collect();
    let mut counts = vec![0usize; bins];
    for v in values {
        let bin = (((v - min) / width) as usize).min(bins - 1);
        counts[bin] += 1;
    }
    Some(Histogram { edges, counts })
}

// ---------------------------------------------------------------------------
// Summary statistics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DurationSummary {
    pub rows: usize,
    pub missing: usize,
    pub mean: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

pub fn duration_summary(table: &DeliveryTable, indices: &[usize]) -> DurationSummary {
    let values: Vec<f64> = indices.iter().filter_map(|&i| table.duration(i)).collect();
    let mean = if values.is_empty() {
        None
    } else {
        Some(values.iter().sum::<f64>() / values.len() as f64)
    };
    DurationSummary {
        rows: indices.len(),
        missing: indices.len() - values.len(),
        mean,
        min: values.iter().copied().reduce(f64::min),
        max: values.iter().copied().reduce(f64::max),
    }
}
