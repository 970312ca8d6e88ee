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
use std::path::PathBuf;
use thiserror::Error;
use rad_gdal::errors::RadGdalError;

pub type Result<T> = std::result::Result<T, RadLevelsError>;

#[derive(Error,Debug)]
pub enum RadLevelsError {

    #[error("data directory {0:?} not found - created it, please copy the data files into it and run again")]
    MissingDirectory(PathBuf),

    #[error("input file(s) not found (found vector: {vector_found}, found raster: {raster_found})")]
    MissingFile { vector_found: bool, raster_found: bool },

    #[error("invalid point record: {0}")]
    SchemaError(String),

    #[error("duplicate point id: {0}")]
    DuplicateKey(String),

    #[error("invalid or unsupported spatial reference: {0}")]
    CrsError(String),

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("cannot read dataset: {0}")]
    DatasetError(String),

    #[error("raster sampling failed: {0}")]
    SamplingError(String),

    #[error("unsupported output file type: {0}")]
    UnsupportedOutputFormat(String),

    #[error("invalid configuration: {0}")]
    ConfigError(String),

    #[error("config parse error {0}")]
    RonError( #[from] ron::error::SpannedError),

    #[error("CSV error {0}")]
    CsvError( #[from] csv::Error),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),
}

impl From<RadGdalError> for RadLevelsError {
    fn from (e: RadGdalError)->Self {
        match e {
            RadGdalError::FileNotFound(s) => RadLevelsError::FileNotFound(s),
            RadGdalError::OpenError(s) => RadLevelsError::DatasetError(s),
            RadGdalError::CrsError(s) => RadLevelsError::CrsError(s),
            RadGdalError::SamplingError(s) => RadLevelsError::SamplingError(s),
            RadGdalError::LayerError(s) => RadLevelsError::DatasetError(s),
            RadGdalError::GdalError(e) => RadLevelsError::DatasetError(e.to_string()),
            RadGdalError::IOError(e) => RadLevelsError::IOError(e),
        }
    }
}

pub fn schema_error<S: ToString> (msg: S)->RadLevelsError {
    RadLevelsError::SchemaError(msg.to_string())
}

pub fn sampling_error<S: ToString> (msg: S)->RadLevelsError {
    RadLevelsError::SamplingError(msg.to_string())
}

pub fn config_error<S: ToString> (msg: S)->RadLevelsError {
    RadLevelsError::ConfigError(msg.to_string())
}
