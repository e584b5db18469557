//! The configuration loader (component B): reads the declarative
//! `config.toml` file and produces an immutable catalogue of reminder
//! definitions plus general presentation settings.

mod catalogue;
mod loader;
mod scaffold;

pub use catalogue::Catalogue;
pub use loader::load;
pub use scaffold::write_example;
