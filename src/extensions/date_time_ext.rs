use chrono::{DateTime, SecondsFormat, TimeZone, Utc};

pub trait ToWireTime {
    /// ISO-8601 in UTC with millisecond precision, e.g. `2024-03-01T10:15:30.250Z`.
    fn to_iso_millis(&self) -> String;

    /// RFC-1123 in GMT, e.g. `Fri, 01 Mar 2024 10:15:30 GMT`.
    fn to_rfc1123(&self) -> String;
}

impl<Tz: TimeZone> ToWireTime for DateTime<Tz> {
    fn to_iso_millis(&self) -> String {
        self.with_timezone(&Utc).to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    fn to_rfc1123(&self) -> String {
        self.with_timezone(&Utc).format("%a, %d %b %Y %H:%M:%S GMT").to_string()
    }
}
