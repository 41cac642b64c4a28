//! Layering of YAML configuration files.
//!
//! `config.local.yml` sits on top of `config.yml`:
//!
//! - mappings merge key by key, recursively
//! - sequences and scalars in the upper layer replace the lower value
//! - an explicit `null` in the upper layer removes the key, restoring the
//!   built-in default once the result is deserialized

use serde_yaml::{Mapping, Value};

/// Overlay `upper` onto `lower`.
pub fn deep_merge(lower: &Value, upper: &Value) -> Value {
    let (Value::Mapping(lower_map), Value::Mapping(upper_map)) = (lower, upper) else {
        return upper.clone();
    };

    let mut merged = lower_map.clone();
    for (key, value) in upper_map {
        if value.is_null() {
            merged.remove(key);
            continue;
        }
        let next = match lower_map.get(key) {
            Some(existing) => deep_merge(existing, value),
            None => value.clone(),
        };
        merged.insert(key.clone(), next);
    }
    Value::Mapping(merged)
}

/// Merge layers in order, lowest priority first.
pub fn merge_configs(layers: &[Value]) -> Value {
    layers.iter().fold(Value::Mapping(Mapping::new()), |acc, layer| {
        // An empty file parses as null; it contributes nothing.
        if layer.is_null() {
            acc
        } else {
            deep_merge(&acc, layer)
        }
    })
}
