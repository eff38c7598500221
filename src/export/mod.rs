mod csv_export;

pub(crate) use csv_export::{entries_to_csv, write_csv};
