/// Slots in one row of the month grid.
pub const DAYS_IN_WEEK: usize = 7;

/// Column headers for the grid, Sunday first.
pub const WEEKDAY_LABELS: [&str; DAYS_IN_WEEK] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Format used for times in input and in the event file.
pub const TIME_FORMAT: &str = "%H:%M";

pub const DATA_FILE_NAME: &str = "events.json";
