use std::cmp::Ordering;
use std::path::PathBuf;

use crate::foundation::error::{GalleryError, GalleryResult};

/// Global display-order key of a [`Person`].
///
/// Numbers and text never mix within one run; [`GalleryDefinition::new`] rejects such input so
/// that every pair of keys is comparable. Integers and floats compare by exact numeric value.
#[derive(Clone, Debug)]
pub enum SortKey {
    /// Integer key, covering the full `i64` and `u64` ranges.
    Integer(i128),
    /// Floating point key (always finite).
    Float(f64),
    /// Text key, compared lexicographically by code point.
    Text(String),
}

impl SortKey {
    fn kind_name(&self) -> &'static str {
        match self {
            Self::Integer(_) | Self::Float(_) => "number",
            Self::Text(_) => "text",
        }
    }
}

impl PartialEq for SortKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for SortKey {}

impl PartialOrd for SortKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SortKey {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::Integer(a), Self::Integer(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => a.partial_cmp(b).unwrap_or_else(|| a.total_cmp(b)),
            (Self::Integer(a), Self::Float(b)) => cmp_integer_float(*a, *b),
            (Self::Float(a), Self::Integer(b)) => cmp_integer_float(*b, *a).reverse(),
            (Self::Text(a), Self::Text(b)) => a.cmp(b),
            (Self::Text(_), _) => Ordering::Greater,
            (_, Self::Text(_)) => Ordering::Less,
        }
    }
}

/// Exact comparison of an integer against a finite float, without rounding the integer.
fn cmp_integer_float(int: i128, float: f64) -> Ordering {
    // 2^127, exactly representable.
    const BOUND: f64 = -(i128::MIN as f64);

    let whole = float.trunc();
    if whole >= BOUND {
        return Ordering::Less;
    }
    if whole < -BOUND {
        return Ordering::Greater;
    }
    match int.cmp(&(whole as i128)) {
        Ordering::Equal => {
            let frac = float - whole;
            if frac > 0.0 {
                Ordering::Less
            } else if frac < 0.0 {
                Ordering::Greater
            } else {
                Ordering::Equal
            }
        }
        ord => ord,
    }
}

impl From<i64> for SortKey {
    fn from(v: i64) -> Self {
        Self::Integer(i128::from(v))
    }
}

impl From<&str> for SortKey {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

/// One gallery entry, validated once at load time and never mutated afterwards.
#[derive(Clone, Debug, PartialEq)]
pub struct Person {
    /// Given name(s), printed first in the caption.
    pub given_names: String,
    /// Family name.
    pub family_name: String,
    /// Global ordering key.
    pub sort_key: SortKey,
    /// Entry date, displayed verbatim on the second caption line.
    pub date_of_entry: String,
    /// Portrait path, already resolved against the portrait base directory.
    pub portrait: PathBuf,
}

impl Person {
    /// First caption line: `"{given_names} {family_name}"`.
    pub fn caption_name(&self) -> String {
        format!("{} {}", self.given_names, self.family_name)
    }

    /// Name used in diagnostics: `"{family_name}, {given_names}"`.
    pub fn diagnostic_name(&self) -> String {
        format!("{}, {}", self.family_name, self.given_names)
    }
}

/// Validated contents of a definition file.
#[derive(Clone, Debug, Default)]
pub struct GalleryDefinition {
    persons: Vec<Person>,
}

impl GalleryDefinition {
    /// Wrap `persons`, checking that all sort keys are mutually comparable.
    pub fn new(persons: Vec<Person>) -> GalleryResult<Self> {
        if let Some(first) = persons.first() {
            let kind = first.sort_key.kind_name();
            for (idx, p) in persons.iter().enumerate() {
                let other = p.sort_key.kind_name();
                if other != kind {
                    return Err(GalleryError::parse(format!(
                        "persons[{idx}] ({}): sorting is a {other} but earlier entries use {kind}; \
                         keys must be totally orderable",
                        p.diagnostic_name()
                    )));
                }
            }
        }
        Ok(Self { persons })
    }

    /// Entries in definition-file order.
    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    /// Consume the definition, yielding the entries in definition-file order.
    pub fn into_persons(self) -> Vec<Person> {
        self.persons
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/model.rs"]
mod tests;
