pub const DEFAULT_TAG: &str = "POLYX";
pub const DEFAULT_THRESHOLD: i32 = -1; // negative disables the FILTER
pub const DEFAULT_SKIP_FILTERED: bool = false;
pub const DEFAULT_NO_VERSION: bool = false;

pub const INFO_DESCRIPTION: &str = "Number of repeated bases around REF";
pub const FILTER_DESCRIPTION_PREFIX: &str =
    "Number of repeated bases around REF is greater or equal to";
pub const FILTER_ID_SEPARATOR: &str = "_ge_";

pub const PASS_FILTER: &[u8] = b"PASS";

pub const PROGRESS_INTERVAL: u64 = 100_000;
