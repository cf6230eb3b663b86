// Column names of the seat-allotment export. "Couse" is the exporter's spelling
// and must match literally.
pub const COLUMN_YEAR: &str = "Year";
pub const COLUMN_ROUND: &str = "Round";
pub const COLUMN_COLLEGE: &str = "College";
pub const COLUMN_COURSE: &str = "Couse";
pub const COLUMN_QUOTA: &str = "Quota";
pub const COLUMN_SEAT_TYPE: &str = "Seat Type";
pub const COLUMN_GENDER: &str = "Gender";
pub const COLUMN_OPENING_RANK: &str = "Opening Rank";
pub const COLUMN_CLOSING_RANK: &str = "Closing Rank";

pub const EXPECTED_HEADERS: [&str; 9] = [
    COLUMN_YEAR,
    COLUMN_ROUND,
    COLUMN_COLLEGE,
    COLUMN_COURSE,
    COLUMN_QUOTA,
    COLUMN_SEAT_TYPE,
    COLUMN_GENDER,
    COLUMN_OPENING_RANK,
    COLUMN_CLOSING_RANK,
];

pub const REQUIRED_ROW_FIELDS: [&str; 4] = [
    COLUMN_COLLEGE,
    COLUMN_COURSE,
    COLUMN_OPENING_RANK,
    COLUMN_CLOSING_RANK,
];

pub const CSV_FIELD_SEPARATOR: char = ',';
pub const CSV_QUOTE_CHAR: char = '"';
pub const CSV_EXTENSION: &str = "csv";

// Spreadsheet exports often prefix the header with a UTF-8 byte-order mark.
pub const UTF8_BOM: char = '\u{feff}';

pub const DEFAULT_CHUNK_SIZE_LINES: usize = 100;
pub const MIN_CHUNK_SIZE_LINES: usize = 1;
pub const MAX_CHUNK_SIZE_LINES: usize = 100_000;
pub const DEFAULT_PREVIEW_ROWS: usize = 5;
pub const MAX_PREVIEW_ROWS: usize = 100;

pub const DEFAULT_YEAR: &str = "2025";
pub const DEFAULT_QUOTA: &str = "AI";
pub const DEFAULT_GENDER: &str = "Gender-Neutral";
pub const DEFAULT_CATEGORY: &str = "OPEN";
pub const DEFAULT_ROUND_NUMBER: &str = "1";

pub const ROUND_VALUE_PREFIX: &str = "Round-";
pub const ROUND_LABEL_PREFIX: &str = "Round ";
pub const ROUND_STATUS_COMPLETED: &str = "Completed";

pub const GENERIC_INSTITUTE_CODE: &str = "INST001";
pub const FALLBACK_INSTITUTE_SUFFIX: &str = "001";
pub const INSTITUTE_CODE_WORD_CHARS: usize = 3;
pub const DEFAULT_LOCATION: &str = "India";
pub const DEFAULT_DURATION: &str = "4 Years";
pub const PROGRAM_CODE_LENGTH: usize = 4;

pub const PWD_RANK_SUFFIX: char = 'P';

pub const DEFAULT_SNAPSHOT_PATH: &str = "data/snapshot.json";
pub const SNAPSHOT_TEMP_EXTENSION: &str = "json.tmp";

pub const PERCENT_100: f64 = 100.0;
pub const SECONDS_PER_MINUTE: u64 = 60;
pub const SECONDS_PER_HOUR: u64 = 3600;
