/// Positional column names of the headerless source file.
///
/// The source carries no header, so meaning comes purely from position:
/// swapping two columns in the input silently corrupts the load.
pub const COLUMNS: [&str; 8] = [
    "gps_str",
    "plantingdate",
    "seedlingsplanted",
    "month_year",
    "lat",
    "lon",
    "temperature",
    "rainfall",
];

pub const GPS_STR: usize = 0;
pub const PLANTING_DATE: usize = 1;
pub const SEEDLINGS: usize = 2;
pub const MONTH_YEAR: usize = 3;
pub const LAT: usize = 4;
pub const LON: usize = 5;
pub const TEMPERATURE: usize = 6;
pub const RAINFALL: usize = 7;

pub const FIELD_COUNT: usize = COLUMNS.len();
