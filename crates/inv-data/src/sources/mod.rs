pub mod csv_source;
pub mod fixtures;

pub use csv_source::CsvImport;
pub use fixtures::FixtureSet;
