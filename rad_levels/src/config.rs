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

use std::{fmt, path::{Path,PathBuf}, str::FromStr};
use serde::{Deserialize, Serialize};
use chrono::NaiveDate;
use clap::ValueEnum;

use rad_common::{fs::{path_in_dir, path_to_lossy_string}, datetime::day_stamped_filename};
use rad_gdal::CrsSpec;
use crate::errors::{Result, RadLevelsError, config_error};

/// the output file types we know about. Only `Csv` is currently supported, the others are reserved for
/// geometry aware writers
#[derive(Debug,Clone,Copy,PartialEq,Eq,Default,Serialize,Deserialize,ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    #[value(alias = "json")]
    Geojson,
    #[serde(rename = "shp")]
    #[value(name = "shp")]
    Shapefile,
}

impl OutputFormat {
    pub fn extension (&self)->&'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Geojson => "geojson",
            OutputFormat::Shapefile => "shp",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result { write!(f, "{}", self.extension()) }
}

impl FromStr for OutputFormat {
    type Err = RadLevelsError;

    fn from_str (s: &str)->Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "geojson" | "json" => Ok(OutputFormat::Geojson),
            "shp" => Ok(OutputFormat::Shapefile),
            other => Err( RadLevelsError::UnsupportedOutputFormat( other.to_string()))
        }
    }
}

/// the tool configuration. This can be loaded from a RON file such as
/// ```ron
/// RadLevelsConfig(
///     data_dir: "data",
///     vector_file: "sites.csv",
///     raster_file: "irradiation.tif",
///     input_crs: "EPSG:4326",
///     out_file_prefix: "Output",
///     out_file_type: csv,
///     no_data: Some(-1.0),
/// )
/// ```
#[derive(Debug,Clone,Serialize,Deserialize)]
pub struct RadLevelsConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// point features (id, longitude, latitude), relative to `data_dir` unless absolute
    pub vector_file: PathBuf,

    /// single band raster, relative to `data_dir` unless absolute
    pub raster_file: PathBuf,

    /// CRS of the longitude/latitude values in `vector_file`
    #[serde(default)]
    pub input_crs: CrsSpec,

    #[serde(default = "default_out_file_prefix")]
    pub out_file_prefix: String,

    #[serde(default)]
    pub out_file_type: OutputFormat,

    /// optional substitute for no-data samples. If not set we use the no-data value of the raster
    #[serde(default)]
    pub no_data: Option<f64>,
}

// serde only supports default functions
fn default_data_dir()->PathBuf { PathBuf::from("data") }
fn default_out_file_prefix()->String { "Output".into() }

impl RadLevelsConfig {
    pub fn new (vector_file: impl Into<PathBuf>, raster_file: impl Into<PathBuf>)->Self {
        RadLevelsConfig {
            data_dir: default_data_dir(),
            vector_file: vector_file.into(),
            raster_file: raster_file.into(),
            input_crs: CrsSpec::default(),
            out_file_prefix: default_out_file_prefix(),
            out_file_type: OutputFormat::default(),
            no_data: None,
        }
    }

    pub fn vector_path (&self)->PathBuf { path_in_dir( &self.data_dir, &self.vector_file) }

    pub fn raster_path (&self)->PathBuf { path_in_dir( &self.data_dir, &self.raster_file) }

    /// `<data_dir>/<prefix>_<weekday>_<day>.<ext>`
    pub fn output_path (&self, date: &NaiveDate)->PathBuf {
        let fname = day_stamped_filename( &self.out_file_prefix, date, self.out_file_type.extension());
        self.data_dir.join( fname)
    }

    /// check values that can't be enforced by the type system
    pub fn validate (&self)->Result<()> {
        if path_to_lossy_string( &self.vector_file).is_empty() { return Err( config_error("no vector file")) }
        if path_to_lossy_string( &self.raster_file).is_empty() { return Err( config_error("no raster file")) }
        if self.out_file_prefix.is_empty() || self.out_file_prefix.contains( std::path::is_separator) {
            return Err( config_error( format!("invalid output file prefix '{}'", self.out_file_prefix)))
        }
        Ok(())
    }
}

pub fn load_config (path: impl AsRef<Path>)->Result<RadLevelsConfig> {
    let contents = std::fs::read_to_string( path.as_ref())?;
    let config: RadLevelsConfig = ron::from_str( &contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        let mut config = RadLevelsConfig::new( "sites.csv", "rad.tif");
        let date = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
        assert_eq!( config.output_path( &date), PathBuf::from("data/Output_Monday_19.csv"));

        config.data_dir = PathBuf::from("/tmp/work");
        config.out_file_prefix = "Kenya".into();
        assert_eq!( config.output_path( &date), PathBuf::from("/tmp/work/Kenya_Monday_19.csv"));
        assert_eq!( config.vector_path(), PathBuf::from("/tmp/work/sites.csv"));

        config.raster_file = PathBuf::from("/abs/rad.tif");
        assert_eq!( config.raster_path(), PathBuf::from("/abs/rad.tif"));
    }

    #[test]
    fn test_parse_ron() {
        let input = r#"RadLevelsConfig(
            vector_file: "sites.geojson",
            raster_file: "rad.tif",
            input_crs: "EPSG:32737",
            out_file_type: csv,
            no_data: Some(-1.0),
        )"#;
        let config: RadLevelsConfig = ron::from_str( input).unwrap();
        assert_eq!( config.data_dir, PathBuf::from("data"));
        assert_eq!( config.input_crs, CrsSpec::Epsg(32737));
        assert_eq!( config.out_file_prefix, "Output");
        assert_eq!( config.out_file_type, OutputFormat::Csv);
        assert_eq!( config.no_data, Some(-1.0));
        assert!( config.validate().is_ok());
    }

    #[test]
    fn test_load_config_file() {
        let config = load_config( concat!( env!("CARGO_MANIFEST_DIR"), "/configs/rad_levels.ron")).unwrap();
        assert_eq!( config.raster_file, PathBuf::from("irradiation.tif"));
        assert_eq!( config.input_crs, CrsSpec::default());
        assert_eq!( config.no_data, None);

        assert!( matches!( load_config("no/such/config.ron"), Err(RadLevelsError::IOError(_))));
    }

    #[test]
    fn test_output_format() {
        assert_eq!( "CSV".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert_eq!( "shp".parse::<OutputFormat>().unwrap(), OutputFormat::Shapefile);
        assert!( matches!( "xlsx".parse::<OutputFormat>(), Err(RadLevelsError::UnsupportedOutputFormat(_))));
    }
}
