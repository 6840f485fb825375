//! SQL dialect strategy: every piece of backend-specific SQL lives here.
//!
//! Callers build queries through these helpers and never branch on the
//! backend themselves. Adding a backend means adding a variant and filling
//! in the match arms below.

use std::fmt;

use chrono::NaiveDateTime;

use crate::models::period::Period;

/// Text layout used when timestamps cross the driver boundary as strings.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Backend family behind the configured connection URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    Postgres,
    MySql,
    Sqlite,
}

impl Dialect {
    /// Pick the dialect from a connection URL scheme. Unknown schemes are
    /// treated as SQLite.
    pub fn from_url(database_url: &str) -> Self {
        let scheme = database_url
            .split_once(':')
            .map(|(scheme, _)| scheme.to_ascii_lowercase())
            .unwrap_or_default();

        match scheme.as_str() {
            "postgres" | "postgresql" => Dialect::Postgres,
            "mysql" | "mariadb" => Dialect::MySql,
            _ => Dialect::Sqlite,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Dialect::Postgres => "postgres",
            Dialect::MySql => "mysql",
            Dialect::Sqlite => "sqlite",
        }
    }

    /// Format string producing the bucket label for `period`.
    pub fn bucket_format(&self, period: Period) -> &'static str {
        match (self, period) {
            (Dialect::Postgres, Period::Day) => "HH24:00",
            (Dialect::Postgres, Period::Week | Period::Month) => "YYYY-MM-DD",
            (Dialect::Postgres, Period::Year) => "YYYY-MM",
            (Dialect::MySql | Dialect::Sqlite, Period::Day) => "%H:00",
            (Dialect::MySql | Dialect::Sqlite, Period::Week | Period::Month) => "%Y-%m-%d",
            (Dialect::MySql | Dialect::Sqlite, Period::Year) => "%Y-%m",
        }
    }

    /// Expression rendering `column` as its bucket label.
    pub fn bucket_expression(&self, column: &str, period: Period) -> String {
        let format = self.bucket_format(period);
        match self {
            Dialect::Postgres => format!("TO_CHAR({column}::timestamp, '{format}')"),
            Dialect::MySql => format!("DATE_FORMAT({column}, '{format}')"),
            Dialect::Sqlite => format!("strftime('{format}', {column})"),
        }
    }

    /// Positional bind placeholder, 1-based.
    pub fn placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("${index}"),
            Dialect::MySql | Dialect::Sqlite => "?".to_string(),
        }
    }

    /// Placeholder for a timestamp bound as text (see [`timestamp_value`]).
    ///
    /// [`timestamp_value`]: Dialect::timestamp_value
    pub fn timestamp_placeholder(&self, index: usize) -> String {
        match self {
            Dialect::Postgres => format!("CAST(${index} AS TIMESTAMP)"),
            Dialect::MySql | Dialect::Sqlite => "?".to_string(),
        }
    }

    /// Text value to bind for a timestamp, shared by every backend: Postgres
    /// casts it, MySQL and SQLite compare it as is. Fractional seconds are
    /// only emitted when non-zero so whole-second values compare equal to
    /// stored SQLite text.
    pub fn timestamp_value(value: NaiveDateTime) -> String {
        value.format("%Y-%m-%d %H:%M:%S%.f").to_string()
    }

    /// Expression reading a timestamp column back as `TIMESTAMP_FORMAT` text.
    pub fn timestamp_text(&self, column: &str) -> String {
        match self {
            Dialect::Postgres => format!("TO_CHAR({column}, 'YYYY-MM-DD HH24:MI:SS')"),
            Dialect::MySql => format!("DATE_FORMAT({column}, '%Y-%m-%d %H:%i:%s')"),
            Dialect::Sqlite => format!("strftime('%Y-%m-%d %H:%M:%S', {column})"),
        }
    }

    /// Whether `INSERT ... RETURNING` is available.
    pub fn supports_returning(&self) -> bool {
        !matches!(self, Dialect::MySql)
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
