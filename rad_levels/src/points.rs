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

//! loading of point features and their conversion into an ordered list of raster coordinates.
//!
//! Features are ordered by ascending id. The position of a point within the resulting [`CoordinateList`]
//! is its identity for the rest of the pipeline.

use std::{cmp::Ordering, fmt, path::Path};
use geo::{Coord, Point};
use tracing::{debug, info, warn};

use rad_common::fs::lowercase_extension;
use rad_gdal::{CrsSpec, SpatialRef, transform_coords, vector::read_layer_fields};
use crate::errors::{Result, RadLevelsError, schema_error};

pub const ID_FIELD: &str = "id";
pub const LON_FIELD: &str = "longitude";
pub const LAT_FIELD: &str = "latitude";

/// (x,y) pairs in the raster CRS, ordered by ascending point id
pub type CoordinateList = Vec<Coord<f64>>;

/* #region point ids *********************************************************************************************/

/// unique key of a point feature. All ids of a vector file are of the same kind: integer if all raw
/// values parse as integers, real if they all parse as finite numbers and text otherwise
#[derive(Debug,Clone)]
pub enum PointId {
    Integer(i128),
    Real(f64),
    Text(String),
}

impl PointId {
    pub fn from_raw_ids (raw_ids: Vec<String>)->Vec<PointId> {
        if raw_ids.iter().all(|s| s.parse::<i128>().is_ok()) {
            raw_ids.iter().filter_map(|s| s.parse::<i128>().ok()).map(PointId::Integer).collect()

        } else if raw_ids.iter().all(|s| s.parse::<f64>().map(|v| v.is_finite()).unwrap_or(false)) {
            raw_ids.iter().filter_map(|s| s.parse::<f64>().ok()).map(PointId::Real).collect()

        } else {
            raw_ids.into_iter().map(PointId::Text).collect()
        }
    }

    fn rank (&self)->u8 {
        match self {
            PointId::Integer(_) | PointId::Real(_) => 0,
            PointId::Text(_) => 1,
        }
    }
}

impl Ord for PointId {
    fn cmp (&self, other: &Self)->Ordering {
        match (self, other) {
            (PointId::Integer(a), PointId::Integer(b)) => a.cmp(b),
            (PointId::Real(a), PointId::Real(b)) => a.total_cmp(b),
            (PointId::Integer(a), PointId::Real(b)) => (*a as f64).total_cmp(b),
            (PointId::Real(a), PointId::Integer(b)) => a.total_cmp( &(*b as f64)),
            (PointId::Text(a), PointId::Text(b)) => a.cmp(b),
            _ => self.rank().cmp( &other.rank())
        }
    }
}

impl PartialOrd for PointId {
    fn partial_cmp (&self, other: &Self)->Option<Ordering> { Some(self.cmp(other)) }
}

impl PartialEq for PointId {
    fn eq (&self, other: &Self)->bool { self.cmp(other) == Ordering::Equal }
}

impl Eq for PointId {}

impl fmt::Display for PointId {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        match self {
            PointId::Integer(v) => write!(f, "{v}"),
            PointId::Real(v) => write!(f, "{v}"),
            PointId::Text(s) => write!(f, "{s}"),
        }
    }
}

/* #endregion point ids */

/* #region point features ****************************************************************************************/

#[derive(Debug,Clone,PartialEq)]
pub struct PointFeature {
    pub id: PointId,
    pub longitude: f64,
    pub latitude: f64,
}

impl PointFeature {
    /// the point geometry in the input CRS
    pub fn point (&self)->Point<f64> { Point::new( self.longitude, self.latitude) }
}

/// the unparsed field values of a vector record. `record` is the 1-based record number within the source
#[derive(Debug,Clone,Default)]
pub struct RawRecord {
    pub record: usize,
    pub id: Option<String>,
    pub longitude: Option<String>,
    pub latitude: Option<String>,
}

fn required_field<'a> (value: &'a Option<String>, name: &str, record: usize)->Result<&'a str> {
    match value.as_deref().map(str::trim) {
        Some(s) if !s.is_empty() => Ok(s),
        _ => Err( schema_error( format!("record {record}: missing field '{name}'")))
    }
}

fn coordinate_field (value: &Option<String>, name: &str, record: usize)->Result<f64> {
    let s = required_field( value, name, record)?;
    match s.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err( schema_error( format!("record {record}: invalid {name} '{s}'")))
    }
}

/// turn raw records into (unordered) point features, checking that all required fields are present
pub fn features_from_raw (records: Vec<RawRecord>)->Result<Vec<PointFeature>> {
    let mut raw_ids: Vec<String> = Vec::with_capacity( records.len());
    let mut positions: Vec<(f64,f64)> = Vec::with_capacity( records.len());

    for rec in &records {
        raw_ids.push( required_field( &rec.id, ID_FIELD, rec.record)?.to_string());
        let lon = coordinate_field( &rec.longitude, LON_FIELD, rec.record)?;
        let lat = coordinate_field( &rec.latitude, LAT_FIELD, rec.record)?;
        positions.push( (lon,lat));
    }

    let features = PointId::from_raw_ids( raw_ids).into_iter()
        .zip( positions)
        .map( |(id,(longitude,latitude))| PointFeature { id, longitude, latitude })
        .collect();
    Ok(features)
}

/// sort features by ascending id. Duplicate ids are rejected
pub fn order_features (mut features: Vec<PointFeature>)->Result<Vec<PointFeature>> {
    features.sort_by( |a,b| a.id.cmp( &b.id));

    if let Some(w) = features.windows(2).find( |w| w[0].id == w[1].id) {
        return Err( RadLevelsError::DuplicateKey( w[0].id.to_string()))
    }
    Ok(features)
}

/* #endregion point features */

/* #region loaders ***********************************************************************************************/

/// abstraction for vector formats we can read point features from
pub trait VectorPointLoader {
    /// read the raw point records of `path` in file order
    fn read_records (&self, path: &Path)->Result<Vec<RawRecord>>;

    /// read and validate point features in file order
    fn read_features (&self, path: &Path)->Result<Vec<PointFeature>> {
        features_from_raw( self.read_records( path)?)
    }
}

/// reads comma separated files with a header row that contains (at least) `id`, `longitude` and `latitude` columns
pub struct CsvPointLoader;

impl VectorPointLoader for CsvPointLoader {
    fn read_records (&self, path: &Path)->Result<Vec<RawRecord>> {
        let mut reader = csv::ReaderBuilder::new()
            .trim( csv::Trim::All)
            .flexible( true)
            .from_path( path)?;

        let headers = reader.headers()?.clone();
        let column = |name: &str| -> Result<usize> {
            headers.iter().position( |h| h == name)
                .ok_or_else( || schema_error( format!("missing field '{name}' in {path:?}")))
        };
        let (id_col, lon_col, lat_col) = (column(ID_FIELD)?, column(LON_FIELD)?, column(LAT_FIELD)?);

        let mut records: Vec<RawRecord> = Vec::new();
        for (i,rec) in reader.records().enumerate() {
            let rec = rec?;
            let field = |col: usize| rec.get(col).map( |s| s.to_string());

            records.push( RawRecord { record: i+1, id: field(id_col), longitude: field(lon_col), latitude: field(lat_col) });
        }
        Ok(records)
    }
}

/// reads the first layer of any vector format supported by GDAL/OGR (GeoJSON, Shapefile, GeoPackage ..)
pub struct OgrPointLoader;

impl VectorPointLoader for OgrPointLoader {
    fn read_records (&self, path: &Path)->Result<Vec<RawRecord>> {
        let rows = read_layer_fields( path, &[ID_FIELD, LON_FIELD, LAT_FIELD])?;

        let records = rows.into_iter().enumerate().map( |(i,mut values)| {
            let latitude = values.pop().flatten();
            let longitude = values.pop().flatten();
            let id = values.pop().flatten();
            RawRecord { record: i+1, id, longitude, latitude }
        }).collect();
        Ok(records)
    }
}

pub fn loader_for_path (path: &Path)->Box<dyn VectorPointLoader> {
    match lowercase_extension( &path).as_deref() {
        Some("csv") | Some("txt") => Box::new( CsvPointLoader),
        _ => Box::new( OgrPointLoader)
    }
}

/// read the point features of `path`, ordered by ascending id
pub fn load_points (path: &Path)->Result<Vec<PointFeature>> {
    if !path.is_file() { return Err( RadLevelsError::FileNotFound( format!("{path:?}"))) }

    let features = loader_for_path( path).read_features( path)?;
    order_features( features)
}

/// load the point features of `vector_path` with coordinates in `input_crs`, order them by ascending id and
/// transform their coordinates into `raster_srs`. If there is no raster SRS coordinates are not transformed
pub fn load_coordinates (vector_path: &Path, input_crs: &CrsSpec, raster_srs: Option<&SpatialRef>)->Result<CoordinateList> {
    let features = load_points( vector_path)?;
    let input_srs = input_crs.spatial_ref()?;

    let mut coords: CoordinateList = features.iter().map( |f| f.point().into()).collect();
    info!("loaded {} point features from {:?}", coords.len(), vector_path);

    if let Some(raster_srs) = raster_srs {
        transform_coords( &input_srs, raster_srs, &mut coords)?;
        debug!("transformed point coordinates from {input_crs}");
    } else {
        warn!("raster has no spatial reference, using {input_crs} coordinates as is");
    }

    Ok(coords)
}

/* #endregion loaders */
