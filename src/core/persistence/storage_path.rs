use std::path::{Path, PathBuf};

pub const EVENT_FILE_EXTENSION: &str = "rce";

/// `{data_dir}/events/{kind}`
pub fn events_dir(data_dir: &Path, kind: &str) -> PathBuf {
    data_dir.join("events").join(kind)
}

/// `{events_dir}/{year}.rce`
pub fn event_year_file_path(events_dir: &Path, year: i32) -> PathBuf {
    events_dir.join(format!("{}.{}", year, EVENT_FILE_EXTENSION))
}

/// Year encoded in an event file name, `None` for foreign files.
pub fn event_file_year(path: &Path) -> Option<i32> {
    if path.extension()?.to_str()? != EVENT_FILE_EXTENSION {
        return None;
    }
    path.file_stem()?.to_str()?.parse().ok()
}
