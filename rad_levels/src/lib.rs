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

//! sample a single band raster (e.g. an irradiation surface) at the point locations of a vector file.
//!
//! A run goes strictly through `load -> sample -> write`, any error aborts the run:
//! 1. point features are loaded, ordered by ascending id and transformed into the raster CRS
//! 2. the raster is sampled (nearest pixel) at each coordinate, lazily and in order
//! 3. `<index>, [<x>, <y>], <value>` rows are streamed into the output file

use std::path::{Path,PathBuf};
use chrono::NaiveDate;
use tracing::{debug, error, info, warn};

use rad_common::fs::{create_dir_if_missing, is_existing_file, remove_existing_file};
use rad_gdal::RasterSampler;

pub mod errors;
pub mod config;
pub mod points;
pub mod writer;

use errors::{Result, RadLevelsError};
pub use config::{RadLevelsConfig, OutputFormat, load_config};
pub use points::{CoordinateList, PointFeature, PointId, load_coordinates, load_points};
pub use writer::{SampleResult, ResultWriter, DelimitedRowWriter, create_writer, write_results};

/// what a successful run produced
#[derive(Debug)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub rows: usize,
}

/// make sure the data directory exists. If it doesn't we create it but return a `MissingDirectory` error since
/// there can't be any input files in it yet
pub fn init_data_dir (data_dir: &Path)->Result<()> {
    if create_dir_if_missing( data_dir)? {
        warn!("data directory not found, created {data_dir:?}");
        Err( RadLevelsError::MissingDirectory( data_dir.to_path_buf()))
    } else {
        info!("configured data directory {data_dir:?}");
        Ok(())
    }
}

/// check that both input files exist, reporting the status of each of them
pub fn check_input_files (config: &RadLevelsConfig)->Result<(PathBuf,PathBuf)> {
    let vector_path = config.vector_path();
    let raster_path = config.raster_path();
    let vector_found = is_existing_file( &vector_path);
    let raster_found = is_existing_file( &raster_path);

    if vector_found && raster_found {
        info!("configured input files {vector_path:?} and {raster_path:?}");
        Ok( (vector_path, raster_path) )
    } else {
        if !vector_found { error!("vector file {vector_path:?} not found") }
        if !raster_found { error!("raster file {raster_path:?} not found") }
        Err( RadLevelsError::MissingFile { vector_found, raster_found })
    }
}

/// get the day stamped output path, removing any previous file of the same name
pub fn config_output_file (config: &RadLevelsConfig, date: &NaiveDate)->Result<PathBuf> {
    if config.out_file_type != OutputFormat::Csv {
        return Err( RadLevelsError::UnsupportedOutputFormat( config.out_file_type.to_string()))
    }

    let output_path = config.output_path( date);
    if remove_existing_file( &output_path)? {
        info!("output file {output_path:?} exists, overwriting it");
    }
    Ok(output_path)
}

/// execute a complete run for the given configuration, using `date` to stamp the output filename
pub fn run (config: &RadLevelsConfig, date: &NaiveDate)->Result<RunSummary> {
    config.validate()?;
    init_data_dir( &config.data_dir)?;
    let (vector_path, raster_path) = check_input_files( config)?;
    let output_path = config_output_file( config, date)?;

    let sampler = RasterSampler::open( &raster_path, config.no_data)?;

    debug!("loading points");
    let coords = load_coordinates( &vector_path, &config.input_crs, sampler.spatial_ref().as_ref())?;

    debug!("sampling {:?}", raster_path);
    let mut writer = create_writer( config.out_file_type, &output_path)?;
    let rows = write_results( writer.as_mut(), &coords, sampler.samples( &coords)?)?;

    info!("wrote {rows} rows to {output_path:?}");
    Ok( RunSummary { output_path, rows } )
}
