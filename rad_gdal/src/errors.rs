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
use thiserror::Error;
use gdal::errors::GdalError;

pub type Result<T> = std::result::Result<T, RadGdalError>;

#[derive(Error,Debug)]
pub enum RadGdalError {

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("cannot open dataset: {0}")]
    OpenError(String),

    #[error("invalid or unsupported spatial reference: {0}")]
    CrsError(String),

    #[error("raster sampling failed: {0}")]
    SamplingError(String),

    #[error("vector layer error: {0}")]
    LayerError(String),

    // pass through for GdalErrors we don't map explicitly
    #[error("GDAL error {0}")]
    GdalError( #[from] GdalError),

    #[error("IO error {0}")]
    IOError( #[from] std::io::Error),
}

pub fn file_not_found<S: ToString> (path: S)->RadGdalError {
    RadGdalError::FileNotFound(path.to_string())
}

pub fn open_error<S: ToString> (msg: S)->RadGdalError {
    RadGdalError::OpenError(msg.to_string())
}

pub fn crs_error<S: ToString> (msg: S)->RadGdalError {
    RadGdalError::CrsError(msg.to_string())
}

pub fn sampling_error<S: ToString> (msg: S)->RadGdalError {
    RadGdalError::SamplingError(msg.to_string())
}

pub fn layer_error<S: ToString> (msg: S)->RadGdalError {
    RadGdalError::LayerError(msg.to_string())
}
