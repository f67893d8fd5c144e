// Adapters layer: concrete data sources and output renderers.

pub mod csv_source;
pub mod output;
