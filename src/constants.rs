pub const USAGE_STREAM_EVENT: &str = "usage://stats";
pub const USAGE_STREAM_ERROR_EVENT: &str = "usage://error";
pub const USAGE_QUERY_ERROR_CODE: &str = "USAGE_QUERY_FAILED";
pub const STREAM_TICK_MS: u64 = 5_000;
pub const ICON_MAX_DIM: u32 = 96;
pub const DAY_MS: i64 = 24 * 60 * 60 * 1000;
pub const WEEK_MS: i64 = 7 * DAY_MS;
