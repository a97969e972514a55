//! Documentation bundles and resolver config from disk.

mod index_loader;

pub use index_loader::{LoadError, load_config, load_index, parse_config, parse_index};
