/*
 * Copyright © 2025, United States Government, as represented by the Administrator of 
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License"); 
 * you may not use this file except in compliance with the License. You may obtain a copy 
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */

use std::path::Path;
use gdal::vector::{FieldValue, LayerAccess};

use crate::open_dataset;
use crate::errors::{Result, layer_error};

/// read the values of the requested `field_names` for every feature of the first layer in the vector
/// dataset at `path`. Values are returned as strings in feature order, missing/null fields and fields of
/// unsupported types are returned as None.
pub fn read_layer_fields (path: impl AsRef<Path>, field_names: &[&str])->Result<Vec<Vec<Option<String>>>> {
    let path = path.as_ref();
    let ds = open_dataset( path)?;
    if ds.layer_count() < 1 { return Err( layer_error( format!("no vector layer in {path:?}"))) }

    let mut layer = ds.layer(0)?;
    let mut records: Vec<Vec<Option<String>>> = Vec::new();

    for feature in layer.features() {
        let mut values: Vec<Option<String>> = Vec::with_capacity( field_names.len());
        for name in field_names {
            let value = match feature.field_index( name) {
                Ok(idx) => feature.field( idx)?.and_then( field_value_to_string),
                Err(_) => None
            };
            values.push( value);
        }
        records.push( values);
    }

    Ok(records)
}

fn field_value_to_string (value: FieldValue)->Option<String> {
    match value {
        FieldValue::IntegerValue(v) => Some( v.to_string()),
        FieldValue::Integer64Value(v) => Some( v.to_string()),
        FieldValue::RealValue(v) => Some( v.to_string()),
        FieldValue::StringValue(s) => Some(s),
        _ => None
    }
}
