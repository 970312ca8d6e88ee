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

use std::{path::PathBuf, process::ExitCode};
use anyhow::{anyhow, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use rad_common::{define_cli, datetime::local_today};
use rad_gdal::CrsSpec;
use rad_levels::{load_config, run, OutputFormat, RadLevelsConfig, RunSummary};

define_cli! { ARGS [about="rad_levels - get raster (irradiation) values at the point locations of a vector file"] =
    data_dir: PathBuf [help="directory containing the working files", long="data_dir", default_value="data"],
    epsg: String [help="EPSG code (or other spatial reference spec) of the input vector coordinates", long, default_value="4326"],
    out_file_prefix: String [help="prefix for the output file", long="out_file_prefix", default_value="Output"],
    out_file_type: OutputFormat [help="output file type", long="out_file_type", value_enum, default_value="csv"],
    no_data: Option<f64> [help="value to report for points without raster data", long="no_data", allow_hyphen_values=true],
    config: Option<PathBuf> [help="RON file with the tool configuration (vector/raster/no_data arguments override it)", long],
    vector: Option<PathBuf> [help="vector file with point features (id,longitude,latitude) representing sites"],
    raster: Option<PathBuf> [help="raster data set to sample"]
}

fn main ()->ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter( EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));

    match get_config().and_then( |config| Ok( run( &config, &local_today())? )) {
        Ok(RunSummary { output_path, rows }) => {
            info!("finished successfully, {rows} points written to {output_path:?}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn get_config ()->Result<RadLevelsConfig> {
    let mut config = if let Some(path) = &ARGS.config {
        let mut config = load_config( path)?;
        if let Some(vector) = &ARGS.vector { config.vector_file = vector.clone() }
        if let Some(raster) = &ARGS.raster { config.raster_file = raster.clone() }
        config

    } else {
        let vector = ARGS.vector.clone().ok_or_else( || anyhow!("no vector file specified"))?;
        let raster = ARGS.raster.clone().ok_or_else( || anyhow!("no raster file specified"))?;

        let mut config = RadLevelsConfig::new( vector, raster);
        config.data_dir = ARGS.data_dir.clone();
        config.input_crs = ARGS.epsg.parse::<CrsSpec>()?;
        config.out_file_prefix = ARGS.out_file_prefix.clone();
        config.out_file_type = ARGS.out_file_type;
        config
    };

    if ARGS.no_data.is_some() { config.no_data = ARGS.no_data }
    Ok(config)
}
