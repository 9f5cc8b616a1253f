use crate::error::{FlattenError, Result};
use crate::flatten::types::{FlattenConfig, Flattened};
use crate::table::{Row, Table, TableBuilder};
use log::{debug, trace};
use serde_json::{Map, Value};

const FEATURES: &str = "features";
const PROPERTIES: &str = "properties";

/// Feature keys that tagging must never overwrite
const STRUCTURAL_KEYS: [&str; 3] = ["type", "geometry", PROPERTIES];

/// Flattens the `properties` of every feature in a collection into one table
/// row each, tagging features with a sequential identifier on the way.
///
/// The identifier lets a consumer join table rows back to the geometries
/// they came from, which is why it is written into the document as well as
/// the table.
pub struct Flattener {
    config: FlattenConfig,
}

impl Flattener {
    pub fn new(config: FlattenConfig) -> Self {
        Flattener { config }
    }

    /// Tag every feature of `document` and return the properties table.
    ///
    /// The whole collection is checked before anything is written, so on
    /// error `document` is unchanged.
    pub fn flatten_in_place(&self, document: &mut Value) -> Result<Table> {
        let count = Self::validate(document)?;
        self.check_config(count)?;
        let features = features_mut(document)?;

        let mut builder = TableBuilder::with_capacity(count);
        for (idx, feature) in features.iter_mut().enumerate() {
            let id = self.id_for(idx);
            let feature = feature_mut(feature, idx)?;

            properties_mut(feature, idx)?.insert(self.config.id_field.clone(), id.clone());
            if self.config.tag_feature {
                feature.insert(self.config.id_field.clone(), id);
            }

            let properties = properties_mut(feature, idx)?;
            trace!("feature {} has {} properties", idx, properties.len());
            builder.push_row(Row::from(&*properties));
        }

        let table = builder.finish();
        debug!(
            "flattened {} features into {} columns",
            table.len(),
            table.columns().len()
        );
        Ok(table)
    }

    /// Flatten a copy of `document`, leaving the caller's value untouched
    pub fn flatten_copy(&self, document: &Value) -> Result<Flattened> {
        self.flatten(document.clone())
    }

    /// Take ownership of `document`, tag it, and hand it back with its table
    pub fn flatten(&self, mut document: Value) -> Result<Flattened> {
        let table = self.flatten_in_place(&mut document)?;
        Ok(Flattened { document, table })
    }

    /// Check the shape of the whole collection, returning the feature count
    fn validate(document: &Value) -> Result<usize> {
        let features = features(document)?;
        for (idx, feature) in features.iter().enumerate() {
            let Some(obj) = feature.as_object() else {
                return Err(FlattenError::mismatch(feature_path(idx), "object", feature));
            };
            match obj.get(PROPERTIES) {
                None => return Err(FlattenError::missing(PROPERTIES, Some(idx))),
                Some(Value::Object(_)) => {}
                Some(other) => {
                    return Err(FlattenError::mismatch(properties_path(idx), "object", other));
                }
            }
        }
        Ok(features.len())
    }

    /// Reject settings that would corrupt the document or the id column
    fn check_config(&self, count: usize) -> Result<()> {
        let id_field = self.config.id_field.as_str();
        if self.config.tag_feature && STRUCTURAL_KEYS.contains(&id_field) {
            return Err(FlattenError::ReservedIdField(self.config.id_field.clone()));
        }

        // No features, no ids to range-check
        let start_id = self.config.start_id;
        let last_id = match count {
            0 => return Ok(()),
            n => start_id.checked_add(n as u64 - 1),
        };
        match last_id {
            Some(last) if last <= i64::MAX as u64 => Ok(()),
            _ => Err(FlattenError::IdOutOfRange { start_id, count }),
        }
    }

    /// Only valid once `check_config` has accepted the feature count
    fn id_for(&self, idx: usize) -> Value {
        Value::from(self.config.start_id + idx as u64)
    }
}

impl Default for Flattener {
    fn default() -> Self {
        Flattener::new(FlattenConfig::default())
    }
}

/// Flatten `document` in place with the default configuration.
///
/// Equivalent to `Flattener::default().flatten_in_place(document)`.
pub fn flatten(document: &mut Value) -> Result<Table> {
    Flattener::default().flatten_in_place(document)
}

fn features(document: &Value) -> Result<&Vec<Value>> {
    let Some(root) = document.as_object() else {
        return Err(FlattenError::mismatch("$", "object", document));
    };
    match root.get(FEATURES) {
        None => Err(FlattenError::missing(FEATURES, None)),
        Some(Value::Array(features)) => Ok(features),
        Some(other) => Err(FlattenError::mismatch(FEATURES, "array", other)),
    }
}

fn features_mut(document: &mut Value) -> Result<&mut Vec<Value>> {
    if !document.is_object() {
        return Err(FlattenError::mismatch("$", "object", document));
    }
    match document.get_mut(FEATURES) {
        None => Err(FlattenError::missing(FEATURES, None)),
        Some(Value::Array(features)) => Ok(features),
        Some(other) => Err(FlattenError::mismatch(FEATURES, "array", other)),
    }
}

fn feature_mut(feature: &mut Value, idx: usize) -> Result<&mut Map<String, Value>> {
    match feature {
        Value::Object(obj) => Ok(obj),
        other => Err(FlattenError::mismatch(feature_path(idx), "object", other)),
    }
}

fn properties_mut(feature: &mut Map<String, Value>, idx: usize) -> Result<&mut Map<String, Value>> {
    match feature.get_mut(PROPERTIES) {
        None => Err(FlattenError::missing(PROPERTIES, Some(idx))),
        Some(Value::Object(properties)) => Ok(properties),
        Some(other) => Err(FlattenError::mismatch(properties_path(idx), "object", other)),
    }
}

fn feature_path(idx: usize) -> String {
    format!("{}[{}]", FEATURES, idx)
}

fn properties_path(idx: usize) -> String {
    format!("{}[{}].{}", FEATURES, idx, PROPERTIES)
}
