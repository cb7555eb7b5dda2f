//! HTTP date formatting (IMF-fixdate) for `Date` and `Last-Modified`

use chrono::{DateTime, Utc};
use std::time::SystemTime;

const IMF_FIXDATE: &str = "%a, %d %b %Y %H:%M:%S GMT";

pub fn format_http_date(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).format(IMF_FIXDATE).to_string()
}

pub fn now() -> String {
    format_http_date(SystemTime::now())
}
