//! Export of municipality selections

pub mod csv_exporter;

pub use csv_exporter::{default_file_name, export_to_path, write_csv};
