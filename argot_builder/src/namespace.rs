use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::constant::{FALSE, TRUE};
use crate::error::NamespaceError;

/// The raw representation of one destination in a [`Namespace`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Stored {
    /// Nothing was stored.
    #[default]
    Absent,
    /// Omitted from the namespace (see [`DefaultValue::Suppress`](crate::DefaultValue::Suppress)).
    Suppressed,
    /// A single value.
    Single(String),
    /// A sequence of values.
    Sequence(Vec<String>),
    /// A sequence of groups of values, one group per occurrence.
    Nested(Vec<Vec<String>>),
}

impl Stored {
    /// Whether the value exists (is neither absent nor suppressed).
    pub fn exists(&self) -> bool {
        !matches!(self, Stored::Absent | Stored::Suppressed)
    }

    fn shape(&self) -> &'static str {
        match self {
            Stored::Absent => "nothing",
            Stored::Suppressed => "a suppressed value",
            Stored::Single(_) => "a single value",
            Stored::Sequence(_) => "a sequence",
            Stored::Nested(_) => "a nested sequence",
        }
    }

    pub(crate) fn push_item(self, item: String) -> Stored {
        match self {
            Stored::Sequence(mut items) => {
                items.push(item);
                Stored::Sequence(items)
            }
            Stored::Nested(mut groups) => {
                groups.push(vec![item]);
                Stored::Nested(groups)
            }
            Stored::Single(existing) => Stored::Sequence(vec![existing, item]),
            Stored::Absent | Stored::Suppressed => Stored::Sequence(vec![item]),
        }
    }

    pub(crate) fn push_group(self, group: Vec<String>) -> Stored {
        match self {
            Stored::Nested(mut groups) => {
                groups.push(group);
                Stored::Nested(groups)
            }
            Stored::Sequence(items) => {
                let mut groups: Vec<Vec<String>> = items.into_iter().map(|i| vec![i]).collect();
                groups.push(group);
                Stored::Nested(groups)
            }
            Stored::Single(existing) => Stored::Nested(vec![vec![existing], group]),
            Stored::Absent | Stored::Suppressed => Stored::Nested(vec![group]),
        }
    }

    pub(crate) fn extend(self, items: Vec<String>) -> Stored {
        match self {
            Stored::Sequence(mut existing) => {
                existing.extend(items);
                Stored::Sequence(existing)
            }
            Stored::Nested(mut groups) => {
                groups.extend(items.into_iter().map(|i| vec![i]));
                Stored::Nested(groups)
            }
            Stored::Single(existing) => {
                let mut all = vec![existing];
                all.extend(items);
                Stored::Sequence(all)
            }
            Stored::Absent | Stored::Suppressed => Stored::Sequence(items),
        }
    }
}

impl From<&str> for Stored {
    fn from(value: &str) -> Self {
        Stored::Single(value.to_string())
    }
}

impl From<String> for Stored {
    fn from(value: String) -> Self {
        Stored::Single(value)
    }
}

impl From<bool> for Stored {
    fn from(value: bool) -> Self {
        Stored::Single(if value { TRUE } else { FALSE }.to_string())
    }
}

impl From<Vec<&str>> for Stored {
    fn from(value: Vec<&str>) -> Self {
        Stored::Sequence(value.into_iter().map(str::to_string).collect())
    }
}

impl From<Vec<String>> for Stored {
    fn from(value: Vec<String>) -> Self {
        Stored::Sequence(value)
    }
}

impl From<Vec<Vec<String>>> for Stored {
    fn from(value: Vec<Vec<String>>) -> Self {
        Stored::Nested(value)
    }
}

static ABSENT: Stored = Stored::Absent;

/// The result of a parse: every destination mapped to its stored value.
///
/// Values are kept as raw strings; the typed accessors parse them on the way out.
///
/// ### Example
/// ```
/// # use argot_builder as argot;
/// use argot::{CommandLineParser, Nargs, Parameter};
///
/// let parser = CommandLineParser::new("summer")
///     .add(Parameter::argument("items").nargs(Nargs::AtLeastOne))
///     .unwrap()
///     .build();
/// let namespace = parser.try_parse_tokens(&["1", "2", "3"]).unwrap();
/// let items: Vec<u32> = namespace.get_all("items").unwrap();
/// assert_eq!(items, vec![1, 2, 3]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    values: BTreeMap<String, Stored>,
}

impl Namespace {
    /// An empty namespace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `dest` holds a value.
    pub fn contains(&self, dest: &str) -> bool {
        self.stored(dest).exists()
    }

    /// The raw stored value of `dest`.
    pub fn stored(&self, dest: &str) -> &Stored {
        self.values.get(dest).unwrap_or(&ABSENT)
    }

    /// Set the raw stored value of `dest`.
    pub fn set(&mut self, dest: impl Into<String>, value: impl Into<Stored>) {
        self.values.insert(dest.into(), value.into());
    }

    /// Remove `dest`, returning what it held.
    pub fn remove(&mut self, dest: &str) -> Stored {
        self.values.remove(dest).unwrap_or_default()
    }

    /// Every destination and its stored value, sorted by destination.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Stored)> {
        self.values.iter().map(|(dest, value)| (dest.as_str(), value))
    }

    /// Whether `dest` has an entry at all (including absent and suppressed ones).
    pub(crate) fn is_set(&self, dest: &str) -> bool {
        self.values.contains_key(dest)
    }

    /// Overwrite with every entry of `other`; suppressed entries never overwrite.
    pub(crate) fn merge(&mut self, other: Namespace) {
        for (dest, value) in other.values {
            if value != Stored::Suppressed || !self.is_set(&dest) {
                self.values.insert(dest, value);
            }
        }
    }

    /// Get the single value of `dest`, parsed as `T`.
    pub fn get<T: FromStr>(&self, dest: &str) -> Result<T, NamespaceError> {
        self.try_get(dest)?
            .ok_or_else(|| NamespaceError::Missing(dest.to_string()))
    }

    /// Get the single value of `dest` parsed as `T`, or `None` when nothing is stored.
    pub fn try_get<T: FromStr>(&self, dest: &str) -> Result<Option<T>, NamespaceError> {
        match self.stored(dest) {
            Stored::Absent | Stored::Suppressed => Ok(None),
            Stored::Single(value) => convert(dest, value).map(Some),
            Stored::Sequence(values) if values.len() == 1 => convert(dest, &values[0]).map(Some),
            other => Err(NamespaceError::Shape {
                dest: dest.to_string(),
                expected: "a single value",
                found: other.shape(),
            }),
        }
    }

    /// Get every value of `dest`, parsed as `T`.
    /// Nested groups are flattened.
    pub fn get_all<T: FromStr>(&self, dest: &str) -> Result<Vec<T>, NamespaceError> {
        match self.stored(dest) {
            Stored::Absent | Stored::Suppressed => Err(NamespaceError::Missing(dest.to_string())),
            Stored::Single(value) => Ok(vec![convert(dest, value)?]),
            Stored::Sequence(values) => values.iter().map(|v| convert(dest, v)).collect(),
            Stored::Nested(groups) => groups.iter().flatten().map(|v| convert(dest, v)).collect(),
        }
    }

    /// Get every group of `dest`, parsed as `T`.
    pub fn get_nested<T: FromStr>(&self, dest: &str) -> Result<Vec<Vec<T>>, NamespaceError> {
        match self.stored(dest) {
            Stored::Absent | Stored::Suppressed => Err(NamespaceError::Missing(dest.to_string())),
            Stored::Single(value) => Ok(vec![vec![convert(dest, value)?]]),
            Stored::Sequence(values) => values
                .iter()
                .map(|v| convert(dest, v).map(|item| vec![item]))
                .collect(),
            Stored::Nested(groups) => groups
                .iter()
                .map(|group| group.iter().map(|v| convert(dest, v)).collect())
                .collect(),
        }
    }

    /// Get the value(s) of `dest` split on `delimiter`, each piece parsed as `T`.
    ///
    /// ### Example
    /// ```
    /// # use argot_builder as argot;
    /// use argot::Namespace;
    ///
    /// let mut namespace = Namespace::new();
    /// namespace.set("point", "1,2,3");
    /// let point: Vec<i32> = namespace.get_delimited("point", ",").unwrap();
    /// assert_eq!(point, vec![1, 2, 3]);
    /// ```
    pub fn get_delimited<T: FromStr>(
        &self,
        dest: &str,
        delimiter: &str,
    ) -> Result<Vec<T>, NamespaceError> {
        match self.stored(dest) {
            Stored::Absent | Stored::Suppressed => Err(NamespaceError::Missing(dest.to_string())),
            Stored::Single(value) => split(dest, value, delimiter),
            Stored::Sequence(values) => {
                let mut out = Vec::default();
                for value in values {
                    out.extend(split(dest, value, delimiter)?);
                }
                Ok(out)
            }
            other => Err(NamespaceError::Shape {
                dest: dest.to_string(),
                expected: "a single value or sequence",
                found: other.shape(),
            }),
        }
    }
}

fn convert<T: FromStr>(dest: &str, value: &str) -> Result<T, NamespaceError> {
    T::from_str(value).map_err(|_| NamespaceError::Conversion {
        dest: dest.to_string(),
        value: value.to_string(),
        type_name: std::any::type_name::<T>(),
    })
}

fn split<T: FromStr>(dest: &str, value: &str, delimiter: &str) -> Result<Vec<T>, NamespaceError> {
    if value.is_empty() {
        return Ok(Vec::default());
    }

    value.split(delimiter).map(|piece| convert(dest, piece)).collect()
}

fn render_single(value: &str) -> String {
    match value {
        TRUE | FALSE => value.to_string(),
        _ => format!("'{value}'"),
    }
}

fn render_list<'a>(values: impl Iterator<Item = &'a String>) -> String {
    let items: Vec<String> = values.map(|v| render_single(v)).collect();
    format!("[{}]", items.join(", "))
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries = Vec::default();

        for (dest, value) in &self.values {
            let rendered = match value {
                Stored::Suppressed => continue,
                Stored::Absent => "None".to_string(),
                Stored::Single(v) => render_single(v),
                Stored::Sequence(vs) => render_list(vs.iter()),
                Stored::Nested(groups) => {
                    let inner: Vec<String> = groups.iter().map(|g| render_list(g.iter())).collect();
                    format!("[{}]", inner.join(", "))
                }
            };
            entries.push(format!("{dest}={rendered}"));
        }

        write!(f, "Namespace({})", entries.join(", "))
    }
}
