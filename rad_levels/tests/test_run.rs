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

use std::{fs, path::{Path,PathBuf}};
use chrono::NaiveDate;
use rad_gdal::{create_geotiff, CrsSpec, GeoTransform, DEFAULT_NO_DATA};
use rad_levels::{run, RadLevelsConfig, OutputFormat};
use rad_levels::errors::RadLevelsError;

// run with "cargo test test_xx -- --nocapture"

/// 20x20 raster covering lon 36..38, lat -2..0 with 0.1 deg pixels
const GEO_GT: GeoTransform = [36.0, 0.1, 0.0, 0.0, 0.0, -0.1];

/// 20x20 web mercator raster covering x 4000km..4200km, y -200km..0 with 10km pixels
const MERC_GT: GeoTransform = [4000000.0, 10000.0, 0.0, 0.0, 0.0, -10000.0];

const SITES_CSV: &str = "id,longitude,latitude\n2,36.8,-1.3\n1,36.9,-1.2\n";

fn date ()->NaiveDate { NaiveDate::from_ymd_opt(2026, 10, 19).unwrap() }

fn constant_raster (path: &Path, value: f64) {
    let srs = CrsSpec::Epsg(4326).spatial_ref().unwrap();
    create_geotiff( path, &GEO_GT, 20, 20, vec![value; 400], Some(&srs), None).unwrap();
}

fn setup (vector_name: &str, vector_contents: &str)->(tempfile::TempDir, RadLevelsConfig) {
    let tmp = tempfile::tempdir().unwrap();
    let data_dir = tmp.path().join("data");
    fs::create_dir(&data_dir).unwrap();
    fs::write( data_dir.join(vector_name), vector_contents).unwrap();

    let mut config = RadLevelsConfig::new( vector_name, "rad.tif");
    config.data_dir = data_dir;
    (tmp, config)
}

/// parse "<index>, [<x>, <y>], <value>"
fn parse_row (line: &str)->(usize,f64,f64,f64) {
    let line = line.replace('[', "").replace(']', "");
    let parts: Vec<&str> = line.split(", ").collect();
    assert_eq!( parts.len(), 4, "malformed row '{line}'");
    (parts[0].parse().unwrap(), parts[1].parse().unwrap(), parts[2].parse().unwrap(), parts[3].parse().unwrap())
}

fn output_rows (path: &Path)->Vec<(usize,f64,f64,f64)> {
    fs::read_to_string(path).unwrap().lines().map(parse_row).collect()
}

fn assert_close (a: f64, b: f64) {
    assert!( (a - b).abs() < 1e-6, "{a} != {b}");
}

#[test]
fn test_constant_raster_example() {
    let (tmp, config) = setup( "sites.csv", SITES_CSV);
    constant_raster( &config.data_dir.join("rad.tif"), 42.0);

    let summary = run( &config, &date()).unwrap();
    println!("{summary:?}");
    assert_eq!( summary.rows, 2);
    assert_eq!( summary.output_path, config.data_dir.join("Output_Monday_19.csv"));

    let rows = output_rows( &summary.output_path);
    assert_eq!( rows.len(), 2);

    // ordered by id, i.e. id=1 first
    assert_eq!( rows[0].0, 0);
    assert_close( rows[0].1, 36.9);
    assert_close( rows[0].2, -1.2);
    assert_eq!( rows[0].3, 42.0);

    assert_eq!( rows[1].0, 1);
    assert_close( rows[1].1, 36.8);
    assert_close( rows[1].2, -1.3);
    assert_eq!( rows[1].3, 42.0);
}

#[test]
fn test_reprojection() {
    let (tmp, config) = setup( "sites.csv", "id,longitude,latitude\n3,36.85,-0.05\n1,36.8,-1.3\n2,36.9,-1.2\n4,10.0,50.0\n");

    let srs = CrsSpec::Epsg(3857).spatial_ref().unwrap();
    let values: Vec<f64> = (0..400).map(|i| i as f64).collect(); // value = row * 20 + col
    create_geotiff( &config.data_dir.join("rad.tif"), &MERC_GT, 20, 20, values, Some(&srs), None).unwrap();

    let summary = run( &config, &date()).unwrap();
    let rows = output_rows( &summary.output_path);
    let values: Vec<f64> = rows.iter().map(|r| r.3).collect();
    assert_eq!( values, vec![289.0, 270.0, 10.0, DEFAULT_NO_DATA]);

    // coordinates are reported in the raster CRS
    assert!( (rows[0].1 - 4096557.26).abs() < 0.1);
    assert!( (rows[0].2 + 144727.76).abs() < 0.1);
}

#[test]
fn test_raster_without_srs() {
    // projected input coordinates are used as is if the raster has no spatial reference
    let (tmp, mut config) = setup( "sites.csv", "id,longitude,latitude\n1,4096557.26,-144727.76\n2,4005000.0,-5000.0\n");
    config.input_crs = CrsSpec::Epsg(3857);

    let values: Vec<f64> = (0..400).map(|i| i as f64).collect();
    create_geotiff( &config.data_dir.join("rad.tif"), &MERC_GT, 20, 20, values, None, None).unwrap();

    let rows = output_rows( &run( &config, &date()).unwrap().output_path);
    assert_eq!( rows.len(), 2);
    assert_close( rows[0].1, 4096557.26);
    assert_close( rows[0].2, -144727.76);
    assert_eq!( rows[0].3, 289.0);
    assert_close( rows[1].1, 4005000.0);
    assert_eq!( rows[1].3, 0.0);
}

#[test]
fn test_out_of_bounds_and_duplicate_coordinates() {
    let (tmp, mut config) = setup( "sites.csv", "id,longitude,latitude\n1,36.8,-1.3\n2,36.8,-1.3\n3,0.0,0.0\n");
    constant_raster( &config.data_dir.join("rad.tif"), 42.0);

    let rows = output_rows( &run( &config, &date()).unwrap().output_path);
    let summary: Vec<(usize,f64)> = rows.iter().map(|r| (r.0, r.3)).collect();
    assert_eq!( summary, vec![(0, 42.0), (1, 42.0), (2, DEFAULT_NO_DATA)]);

    config.no_data = Some(-1.0);
    let rows = output_rows( &run( &config, &date()).unwrap().output_path);
    assert_eq!( rows[2].3, -1.0);
}

#[test]
fn test_overwrite() {
    let (tmp, config) = setup( "sites.csv", SITES_CSV);
    constant_raster( &config.data_dir.join("rad.tif"), 42.0);

    let output_path = config.output_path( &date());
    fs::write( &output_path, "stale line 1\nstale line 2\nstale line 3\n").unwrap();

    run( &config, &date()).unwrap();
    let first = fs::read_to_string( &output_path).unwrap();
    assert!( !first.contains("stale"));

    run( &config, &date()).unwrap();
    let second = fs::read_to_string( &output_path).unwrap();
    assert_eq!( first, second);
    assert_eq!( second.lines().count(), 2);
}

#[test]
fn test_missing_raster() {
    let (tmp, config) = setup( "sites.csv", SITES_CSV);

    match run( &config, &date()) {
        Err(RadLevelsError::MissingFile { vector_found, raster_found }) => {
            assert!( vector_found);
            assert!( !raster_found);
        }
        other => panic!("expected MissingFile error, got {other:?}")
    }
    assert!( !config.output_path( &date()).exists());
}

#[test]
fn test_missing_data_dir() {
    let tmp = tempfile::tempdir().unwrap();
    let mut config = RadLevelsConfig::new( "sites.csv", "rad.tif");
    config.data_dir = tmp.path().join("not_yet");

    assert!( matches!( run( &config, &date()), Err(RadLevelsError::MissingDirectory(_))));
    assert!( config.data_dir.is_dir());

    // now it exists but is empty
    assert!( matches!( run( &config, &date()), Err(RadLevelsError::MissingFile { vector_found: false, raster_found: false })));
}

#[test]
fn test_geojson_input() {
    let geojson = r#"{
  "type": "FeatureCollection",
  "features": [
    { "type": "Feature", "properties": { "id": 2, "longitude": 36.8, "latitude": -1.3 }, "geometry": { "type": "Point", "coordinates": [36.8, -1.3] } },
    { "type": "Feature", "properties": { "id": 1, "longitude": 36.9, "latitude": -1.2 }, "geometry": { "type": "Point", "coordinates": [36.9, -1.2] } }
  ]
}"#;
    let (tmp, config) = setup( "sites.geojson", geojson);
    constant_raster( &config.data_dir.join("rad.tif"), 7.0);

    let rows = output_rows( &run( &config, &date()).unwrap().output_path);
    assert_eq!( rows.len(), 2);
    assert_close( rows[0].1, 36.9);
    assert_close( rows[1].1, 36.8);
    assert!( rows.iter().all(|r| r.3 == 7.0));
}

#[test]
fn test_invalid_inputs() {
    let (tmp, mut config) = setup( "sites.csv", "id,longitude\n1,36.8\n");
    constant_raster( &config.data_dir.join("rad.tif"), 42.0);
    assert!( matches!( run( &config, &date()), Err(RadLevelsError::SchemaError(_))));
    assert!( !config.output_path( &date()).exists());

    fs::write( config.vector_path(), "id,longitude,latitude\n1,36.8,-1.3\n1,36.9,-1.2\n").unwrap();
    assert!( matches!( run( &config, &date()), Err(RadLevelsError::DuplicateKey(_))));

    fs::write( config.vector_path(), SITES_CSV).unwrap();
    config.input_crs = CrsSpec::Epsg(999999);
    assert!( matches!( run( &config, &date()), Err(RadLevelsError::CrsError(_))));

    config.input_crs = CrsSpec::default();
    config.out_file_type = OutputFormat::Geojson;
    assert!( matches!( run( &config, &date()), Err(RadLevelsError::UnsupportedOutputFormat(_))));
}

#[test]
fn test_corrupt_raster() {
    let (tmp, config) = setup( "sites.csv", SITES_CSV);
    fs::write( config.raster_path(), "not a raster").unwrap();
    assert!( matches!( run( &config, &date()), Err(RadLevelsError::DatasetError(_))));
}
