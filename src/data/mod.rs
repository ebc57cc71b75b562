/// Data layer: table model, loading, statistics and chart series.
///
/// Architecture:
/// ```text
///   winequality-red.csv  (semicolon-delimited)
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  parse file → Dataset   (re-read on every visit)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  Dataset  │  named numeric columns, header order
///   └──────────┘
///        │
///        ├──────────────┐
///        ▼              ▼
///   ┌──────────┐   ┌──────────┐
///   │  stats    │   │  series   │  scatter groups by hue, quality counts
///   └──────────┘   └──────────┘
///   describe / corr
/// ```

pub mod loader;
pub mod model;
pub mod series;
pub mod stats;
