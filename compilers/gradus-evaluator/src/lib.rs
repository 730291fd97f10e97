pub mod analyzer;
pub mod builtin;
pub mod error;
pub mod evaluator;
pub mod loader;

pub use analyzer::Analyzer;
pub use builtin::{builtin, english_a1, italian_a1};
pub use error::InventoryError;
pub use evaluator::Evaluator;
pub use loader::{load_inventory, parse_inventory_archive, parse_inventory_json};
