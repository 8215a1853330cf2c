//! Platform-agnostic chart state: normalization, legend, projection, layout
//! and the redraw lifecycle, plus the small platform shims they need.

pub mod events;
pub mod fixtures;
pub mod format;
pub mod keyframes;
pub mod layout;
pub mod legend;
pub mod normalize;
pub mod palette;
pub mod platform;
pub mod projection;
pub mod redraw;
pub mod state;
pub mod storage;
pub mod timing;
pub mod viewport;

pub use events::ChartFilters;
pub use legend::{LegendEntry, LegendStore, ToggleAllOutcome, ToggleOutcome};
pub use normalize::{CategoryRecord, InputShape};
pub use palette::ColorScale;
pub use projection::ProjectionPolicy;
pub use state::FilterableChart;
