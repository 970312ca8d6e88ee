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
#![allow(unused)]

pub mod errors;
pub mod sampler;
pub mod vector;

use std::{fmt, path::Path, str::FromStr};
use serde::{Deserialize, Serialize};
use geo::Coord;
use tracing::debug;

// we re-export these so that other crates don't need a direct gdal dependency
pub use gdal::{self, Dataset, DriverManager, GeoTransform, GeoTransformEx, errors::GdalError};
pub use gdal::raster::Buffer;
pub use gdal::spatial_ref::{AxisMappingStrategy, CoordTransform, SpatialRef};

pub use sampler::{RasterSampler, Samples, DEFAULT_NO_DATA};
use crate::errors::{Result, RadGdalError, crs_error, file_not_found, open_error};

/* #region spatial reference specs *******************************************************************************/

pub const EPSG_WGS84: u32 = 4326;

/// user provided spatial reference specifier. Parsed from either an EPSG code ("4326", "EPSG:4326")
/// or anything else GDAL accepts as user input (WKT, PROJ string, well known names such as "WGS84")
#[derive(Debug,Clone,PartialEq,Eq,Serialize,Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CrsSpec {
    Epsg(u32),
    Definition(String),
}

impl Default for CrsSpec {
    fn default()->Self { CrsSpec::Epsg(EPSG_WGS84) }
}

impl CrsSpec {
    /// create the corresponding SpatialRef. Note this always uses x=lon/easting, y=lat/northing axis order
    pub fn spatial_ref (&self)->Result<SpatialRef> {
        let srs = match self {
            CrsSpec::Epsg(code) => SpatialRef::from_epsg(*code),
            CrsSpec::Definition(def) => SpatialRef::from_definition(def),
        };
        let mut srs = srs.map_err(|e| crs_error( format!("{self} ({e})")))?;
        srs.set_axis_mapping_strategy( AxisMappingStrategy::TraditionalGisOrder);
        Ok(srs)
    }
}

impl FromStr for CrsSpec {
    type Err = RadGdalError;

    fn from_str (s: &str)->Result<Self> {
        let s = s.trim();
        if s.is_empty() { return Err( crs_error("empty spatial reference spec")) }

        let code = match s.get(..5) {
            Some(prefix) if prefix.eq_ignore_ascii_case("epsg:") => &s[5..],
            _ => s
        };
        if let Ok(epsg) = code.parse::<u32>() {
            Ok( CrsSpec::Epsg(epsg))
        } else if code.len() < s.len() { // "epsg:" prefix without a valid number
            Err( crs_error( format!("invalid EPSG code: {s}")))
        } else {
            Ok( CrsSpec::Definition(s.to_string()))
        }
    }
}

impl TryFrom<String> for CrsSpec {
    type Error = RadGdalError;
    fn try_from (s: String)->Result<Self> { s.parse() }
}

impl From<CrsSpec> for String {
    fn from (spec: CrsSpec)->String { spec.to_string() }
}

impl fmt::Display for CrsSpec {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        match self {
            CrsSpec::Epsg(code) => write!(f, "EPSG:{code}"),
            CrsSpec::Definition(def) => write!(f, "{def}"),
        }
    }
}

/* #endregion spatial reference specs */

/* #region coordinate transformation *****************************************************************************/

/// transform all `coords` in place from `s_srs` into `t_srs`.
/// Both SpatialRefs are expected to use traditional GIS axis order (see [`CrsSpec::spatial_ref`])
pub fn transform_coords (s_srs: &SpatialRef, t_srs: &SpatialRef, coords: &mut [Coord<f64>])->Result<()> {
    if coords.is_empty() || s_srs == t_srs { return Ok(()) }

    let transform = CoordTransform::new( s_srs, t_srs).map_err(|e| crs_error( format!("no transformation available ({e})")))?;

    let mut xs: Vec<f64> = coords.iter().map(|c| c.x).collect();
    let mut ys: Vec<f64> = coords.iter().map(|c| c.y).collect();
    let mut zs: [f64;0] = [];

    transform.transform_coords( &mut xs, &mut ys, &mut zs).map_err(|e| crs_error( format!("coordinate transformation failed ({e})")))?;

    for (c,(x,y)) in coords.iter_mut().zip( xs.into_iter().zip(ys)) {
        c.x = x;
        c.y = y;
    }
    Ok(())
}

/* #endregion coordinate transformation */

/* #region dataset access ****************************************************************************************/

/// open a GDAL dataset, distinguishing between missing files and files GDAL can't decode
pub fn open_dataset (path: impl AsRef<Path>)->Result<Dataset> {
    let path = path.as_ref();
    if !path.is_file() { return Err( file_not_found( format!("{path:?}"))) }

    Dataset::open(path).map_err(|e| open_error( format!("{path:?} ({e})")))
}

pub fn dataset_spatial_ref (ds: &Dataset)->Option<SpatialRef> {
    match ds.spatial_ref() {
        Ok(mut srs) => {
            srs.set_axis_mapping_strategy( AxisMappingStrategy::TraditionalGisOrder);
            Some(srs)
        }
        Err(e) => {
            debug!("dataset has no spatial reference: {e}");
            None
        }
    }
}

/// create a single band f64 GeoTIFF at `path` from the provided row-major `values`
pub fn create_geotiff (path: impl AsRef<Path>, geo_transform: &GeoTransform, width: usize, height: usize, values: Vec<f64>,
                       srs: Option<&SpatialRef>, no_data: Option<f64>)->Result<()> {
    if values.len() != width * height {
        return Err( GdalError::BadArgument( format!("{} values for {width}x{height} raster", values.len())).into())
    }

    let driver = DriverManager::get_driver_by_name("GTiff")?;
    let mut ds = driver.create_with_band_type::<f64,_>( path.as_ref(), width, height, 1)?;
    ds.set_geo_transform( geo_transform)?;
    if let Some(srs) = srs { ds.set_spatial_ref( srs)?; }

    let mut band = ds.rasterband(1)?;
    if no_data.is_some() { band.set_no_data_value( no_data)?; }
    let mut buffer = Buffer::new( (width,height), values);
    band.write( (0,0), (width,height), &mut buffer)?;

    Ok(()) // dataset gets flushed and closed when dropped
}

/* #endregion dataset access */

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_crs_spec() {
        assert_eq!( "4326".parse::<CrsSpec>().unwrap(), CrsSpec::Epsg(4326));
        assert_eq!( "EPSG:32610".parse::<CrsSpec>().unwrap(), CrsSpec::Epsg(32610));
        assert_eq!( " epsg:3857 ".parse::<CrsSpec>().unwrap(), CrsSpec::Epsg(3857));
        assert_eq!( "WGS84".parse::<CrsSpec>().unwrap(), CrsSpec::Definition("WGS84".to_string()));

        // prefix check must not split multi-byte characters
        assert_eq!( "abcdé-lambert".parse::<CrsSpec>().unwrap(), CrsSpec::Definition("abcdé-lambert".to_string()));
        assert_eq!( "épsg:4326".parse::<CrsSpec>().unwrap(), CrsSpec::Definition("épsg:4326".to_string()));
        assert!( "abcdé-lambert".parse::<CrsSpec>().unwrap().spatial_ref().is_err());

        assert!( "".parse::<CrsSpec>().is_err());
        assert!( "EPSG:abc".parse::<CrsSpec>().is_err());
    }

    #[test]
    fn test_crs_spec_display() {
        assert_eq!( CrsSpec::default().to_string(), "EPSG:4326");
        let spec: CrsSpec = "+proj=longlat +datum=WGS84".parse().unwrap();
        assert_eq!( spec.to_string(), "+proj=longlat +datum=WGS84");
    }
}
