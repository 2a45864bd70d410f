//! IO utilities for loading labelled feature tables.

pub mod csv_table;

pub use csv_table::{read_table_csv, read_table_csv_with_config, TableReaderConfig};
