/// Data layer: core types, loading, caching, filtering and aggregation.
///
/// Architecture:
/// ```text
///   delivery_data.csv
///        │
///        ▼
///   ┌──────────┐
///   │  cache    │  path + mtime/len → Arc<DeliveryTable>
///   └──────────┘
///        │ miss
///        ▼
///   ┌──────────┐
///   │  loader   │  parse, trim headers, schema check, clean durations
///   └──────────┘
///        │
///        ▼
///   ┌───────────────┐
///   │ DeliveryTable  │  Vec<DeliveryRecord>, column index
///   └───────────────┘
///        │
///        ▼
///   ┌──────────┐      ┌───────────┐
///   │  filter   │ ───▶ │ aggregate │  grouped means, histogram
///   └──────────┘      └───────────┘
/// ```

pub mod aggregate;
pub mod cache;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod schema;

pub use cache::DatasetCache;
pub use error::LoadError;
pub use loader::{LoadOptions, load_file};
pub use model::{Cell, DeliveryRecord, DeliveryTable};
