//! Declarative column descriptions
//!
//! A [`ColumnSpec`] says where a column's value comes from, how it becomes
//! text, how it is colored, and how much room it wants.

use super::time;
use chrono::{DateTime, Utc};
use colored::Color;
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use unicode_width::UnicodeWidthStr;

/// Key used by lookup tables and color maps for "any other value"
pub const OTHER: &str = "__other__";

/// Plain text for a raw value
///
/// `null` is empty, strings are unquoted, everything else is compact JSON.
#[must_use]
pub fn value_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Look up a dotted path such as `State.Name` or `Tags[0].Value`
///
/// Missing segments yield `Value::Null`.
#[must_use]
pub fn value_at_path(value: &Value, path: &str) -> Value {
    let mut current = value;
    for segment in path.split('.') {
        let (key, indices) = match segment.find('[') {
            Some(pos) => segment.split_at(pos),
            None => (segment, ""),
        };

        if !key.is_empty() {
            match current.get(key) {
                Some(next) => current = next,
                None => return Value::Null,
            }
        }

        for index in indices
            .split(['[', ']'])
            .filter(|part| !part.is_empty())
        {
            match index.parse::<usize>().ok().and_then(|i| current.get(i)) {
                Some(next) => current = next,
                None => return Value::Null,
            }
        }
    }
    current.clone()
}

type Getter<T> = Box<dyn Fn(&T) -> Value>;
type Formatter = Box<dyn Fn(&Value) -> String>;

/// How a raw value becomes display text
pub enum Format {
    /// The value's own text
    Plain,
    /// Value-to-text table, with an optional fallback for unlisted values
    Lookup {
        table: HashMap<String, String>,
        other: Option<Formatter>,
    },
    /// Arbitrary function
    With(Formatter),
    /// "5 minutes ago"
    RelativeTime,
    /// `YYYY/MM/DD HH:MM`
    Date,
    /// `YYYY/MM/DD HH:MM:SS.mmm`
    Timestamp,
}

impl Format {
    /// Build a lookup table format
    pub fn lookup<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Lookup {
            table: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            other: None,
        }
    }

    /// Build a lookup table format with a fallback for unlisted values
    pub fn lookup_or<I, K, V>(entries: I, other: impl Fn(&Value) -> String + 'static) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Lookup {
            table: entries.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
            other: Some(Box::new(other)),
        }
    }

    /// Build a function format
    pub fn with(format: impl Fn(&Value) -> String + 'static) -> Self {
        Self::With(Box::new(format))
    }

    /// Render `value`; `null` always renders empty
    #[must_use]
    pub fn apply(&self, value: &Value, now: DateTime<Utc>) -> String {
        if value.is_null() {
            return String::new();
        }

        match self {
            Self::Plain => value_text(value),
            Self::Lookup { table, other } => {
                let text = value_text(value);
                match (table.get(&text), other) {
                    (Some(mapped), _) => mapped.clone(),
                    (None, Some(other)) => other(value),
                    (None, None) => text,
                }
            }
            Self::With(format) => format(value),
            Self::RelativeTime => time::relative(value, now),
            Self::Date => time::date(value),
            Self::Timestamp => time::timestamp(value),
        }
    }

    /// Width a column gets regardless of its declared sizing
    ///
    /// Time columns are pinned to a reference rendering so rows don't jitter
    /// as their content changes length.
    #[must_use]
    pub fn implicit_width(&self) -> Option<usize> {
        match self {
            Self::RelativeTime => Some(time::RELATIVE_TIME_REFERENCE.width()),
            Self::Date => Some(time::DATE_REFERENCE.width()),
            Self::Timestamp => Some(time::TIMESTAMP_REFERENCE.width()),
            _ => None,
        }
    }
}

impl fmt::Debug for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Plain => f.write_str("Plain"),
            Self::Lookup { table, other } => f
                .debug_struct("Lookup")
                .field("table", table)
                .field("other", &other.is_some())
                .finish(),
            Self::With(_) => f.write_str("With(..)"),
            Self::RelativeTime => f.write_str("RelativeTime"),
            Self::Date => f.write_str("Date"),
            Self::Timestamp => f.write_str("Timestamp"),
        }
    }
}

/// Value-keyed colors with an optional fallback
#[derive(Debug, Clone, Default)]
pub struct ColorMap {
    colors: HashMap<String, Color>,
}

impl ColorMap {
    /// Create an empty color map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Color cells whose raw value is `value`
    #[must_use]
    pub fn on(mut self, value: impl Into<String>, color: Color) -> Self {
        self.colors.insert(value.into(), color);
        self
    }

    /// Color cells whose value is not listed
    #[must_use]
    pub fn other(self, color: Color) -> Self {
        self.on(OTHER, color)
    }

    /// Color for a raw value, falling back to the "other" entry
    #[must_use]
    pub fn color_for(&self, value: &Value) -> Option<Color> {
        self.colors
            .get(&value_text(value))
            .or_else(|| self.colors.get(OTHER))
            .copied()
    }

    /// Whether any colors are declared
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

/// One column of a rendered row
pub struct ColumnSpec<T> {
    pub(crate) get: Getter<T>,
    pub(crate) format: Format,
    pub(crate) colors: ColorMap,
    pub(crate) width: Option<usize>,
    pub(crate) min_width: Option<usize>,
    pub(crate) grow: Option<usize>,
    pub(crate) show_recent: bool,
}

impl<T> ColumnSpec<T> {
    /// Column whose value is computed from the item
    pub fn computed(get: impl Fn(&T) -> Value + 'static) -> Self {
        Self {
            get: Box::new(get),
            format: Format::Plain,
            colors: ColorMap::default(),
            width: None,
            min_width: None,
            grow: None,
            show_recent: false,
        }
    }

    /// Set the formatter
    #[must_use]
    pub fn format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Set value-keyed colors
    #[must_use]
    pub fn colors(mut self, colors: ColorMap) -> Self {
        self.colors = colors;
        self
    }

    /// Fix the column width
    #[must_use]
    pub const fn width(mut self, width: usize) -> Self {
        self.width = Some(width);
        self
    }

    /// Never shrink below this width while there is room
    #[must_use]
    pub const fn min_width(mut self, min_width: usize) -> Self {
        self.min_width = Some(min_width);
        self
    }

    /// Share of the leftover width, relative to other growing columns
    #[must_use]
    pub const fn grow(mut self, grow: usize) -> Self {
        self.grow = Some(grow);
        self
    }

    /// Show a "(recent)" marker in this column for recent items
    #[must_use]
    pub const fn show_recent(mut self) -> Self {
        self.show_recent = true;
        self
    }

    /// Raw value of this column for `item`
    #[must_use]
    pub fn value(&self, item: &T) -> Value {
        (self.get)(item)
    }
}

impl ColumnSpec<Value> {
    /// Column reading a dotted path from a JSON item
    #[must_use]
    pub fn path(path: &str) -> Self {
        let path = path.to_string();
        Self::computed(move |item: &Value| value_at_path(item, &path))
    }
}

impl<T> fmt::Debug for ColumnSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ColumnSpec")
            .field("format", &self.format)
            .field("colors", &self.colors)
            .field("width", &self.width)
            .field("min_width", &self.min_width)
            .field("grow", &self.grow)
            .field("show_recent", &self.show_recent)
            .finish_non_exhaustive()
    }
}
