use std::path::Path;

use serde_yaml::Value;

use crate::{
    foundation::error::{GalleryError, GalleryResult},
    gallery::model::{GalleryDefinition, Person, SortKey},
};

const PERSONS_ROOT: &str = "persons";
const FIELD_GIVEN_NAMES: &str = "given_names";
const FIELD_FAMILY_NAME: &str = "family_name";
const FIELD_SORTING: &str = "sorting";
const FIELD_DATE_OF_ENTRY: &str = "date_of_entry";
const FIELD_PORTRAIT_FILE: &str = "portrait_file";

impl GalleryDefinition {
    /// Read and validate a YAML definition file.
    ///
    /// `portrait_file` entries are joined onto `portrait_dir`.
    pub fn from_path(path: &Path, portrait_dir: &Path) -> GalleryResult<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            GalleryError::parse(format!("cannot read definition file '{}': {e}", path.display()))
        })?;
        Self::from_yaml_str(&text, portrait_dir)
    }

    /// Parse and validate YAML definition text.
    pub fn from_yaml_str(text: &str, portrait_dir: &Path) -> GalleryResult<Self> {
        let doc: Value = serde_yaml::from_str(text)
            .map_err(|e| GalleryError::parse(format!("malformed definition file: {e}")))?;

        let Value::Mapping(root) = doc else {
            return Err(GalleryError::parse(
                "definition file must be a mapping at the top level",
            ));
        };
        let records = match root.get(PERSONS_ROOT) {
            Some(Value::Sequence(seq)) => seq,
            Some(Value::Null) => return GalleryDefinition::new(Vec::new()),
            Some(_) => {
                return Err(GalleryError::parse(format!(
                    "'{PERSONS_ROOT}' must be a sequence of records"
                )));
            }
            None => {
                return Err(GalleryError::parse(format!(
                    "missing top-level key '{PERSONS_ROOT}'"
                )));
            }
        };

        let mut persons = Vec::with_capacity(records.len());
        for (idx, record) in records.iter().enumerate() {
            persons.push(person_from_record(idx, record, portrait_dir)?);
        }
        tracing::debug!(count = persons.len(), "loaded definition");
        GalleryDefinition::new(persons)
    }
}

fn person_from_record(idx: usize, record: &Value, portrait_dir: &Path) -> GalleryResult<Person> {
    let Value::Mapping(map) = record else {
        return Err(GalleryError::parse(format!(
            "{PERSONS_ROOT}[{idx}] must be a mapping"
        )));
    };
    let field = |name: &str| -> GalleryResult<&Value> {
        map.get(name).ok_or_else(|| {
            GalleryError::parse(format!("{PERSONS_ROOT}[{idx}] is missing field '{name}'"))
        })
    };

    let given_names = string_field(idx, FIELD_GIVEN_NAMES, field(FIELD_GIVEN_NAMES)?)?;
    let family_name = string_field(idx, FIELD_FAMILY_NAME, field(FIELD_FAMILY_NAME)?)?;
    let sort_key = sort_key_field(idx, field(FIELD_SORTING)?)?;
    let date_of_entry = scalar_text_field(idx, FIELD_DATE_OF_ENTRY, field(FIELD_DATE_OF_ENTRY)?)?;
    let portrait_file = string_field(idx, FIELD_PORTRAIT_FILE, field(FIELD_PORTRAIT_FILE)?)?;
    if portrait_file.trim().is_empty() {
        return Err(GalleryError::parse(format!(
            "{PERSONS_ROOT}[{idx}].{FIELD_PORTRAIT_FILE} must be non-empty"
        )));
    }

    Ok(Person {
        given_names,
        family_name,
        sort_key,
        date_of_entry,
        portrait: portrait_dir.join(portrait_file),
    })
}

fn string_field(idx: usize, name: &str, v: &Value) -> GalleryResult<String> {
    match v {
        Value::String(s) => Ok(s.clone()),
        _ => Err(GalleryError::parse(format!(
            "{PERSONS_ROOT}[{idx}].{name} must be a string"
        ))),
    }
}

fn scalar_text_field(idx: usize, name: &str, v: &Value) -> GalleryResult<String> {
    match v {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        _ => Err(GalleryError::parse(format!(
            "{PERSONS_ROOT}[{idx}].{name} must be a string or number"
        ))),
    }
}

fn sort_key_field(idx: usize, v: &Value) -> GalleryResult<SortKey> {
    match v {
        Value::Number(n) => {
            if let Some(int) = n.as_i64() {
                return Ok(SortKey::Integer(i128::from(int)));
            }
            if let Some(int) = n.as_u64() {
                return Ok(SortKey::Integer(i128::from(int)));
            }
            let value = n.as_f64().filter(|f| f.is_finite()).ok_or_else(|| {
                GalleryError::parse(format!(
                    "{PERSONS_ROOT}[{idx}].{FIELD_SORTING} must be a finite number"
                ))
            })?;
            Ok(SortKey::Float(value))
        }
        Value::String(s) => Ok(SortKey::Text(s.clone())),
        Value::Null => Err(GalleryError::parse(format!(
            "{PERSONS_ROOT}[{idx}].{FIELD_SORTING} must be present"
        ))),
        _ => Err(GalleryError::parse(format!(
            "{PERSONS_ROOT}[{idx}].{FIELD_SORTING} must be a number or string"
        ))),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/gallery/source.rs"]
mod tests;
