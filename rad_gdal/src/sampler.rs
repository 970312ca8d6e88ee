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

//! nearest-pixel sampling of band 1 of a GDAL raster dataset.
//!
//! The [`RasterSampler`] owns the opened [`Dataset`], which is closed when the sampler is dropped (on both
//! success and error paths). Values are produced lazily through the [`Samples`] iterator so that callers can
//! stream them directly into an output sink.

use std::path::{Path,PathBuf};
use geo::Coord;
use tracing::debug;

use gdal::{Dataset, GeoTransform, GeoTransformEx};
use gdal::raster::RasterBand;
use gdal::spatial_ref::SpatialRef;

use crate::{open_dataset, dataset_spatial_ref};
use crate::errors::{Result, sampling_error};

/// the no-data sentinel we use if neither the raster nor the caller declare one
pub const DEFAULT_NO_DATA: f64 = -9999.0;

const BAND_INDEX: usize = 1;

pub struct RasterSampler {
    path: PathBuf,
    ds: Dataset,
    geo_to_pixel: GeoTransform,
    width: usize,
    height: usize,
    declared_no_data: Option<f64>,
    sub_no_data: Option<f64>,
}

impl RasterSampler {

    /// open the raster at `path`. If provided, `sub_no_data` replaces both out-of-extent samples and
    /// pixels that hold the declared no-data value of the band
    pub fn open (path: impl AsRef<Path>, sub_no_data: Option<f64>)->Result<Self> {
        let path = path.as_ref();
        let ds = open_dataset( path)?;

        if ds.raster_count() < 1 { return Err( sampling_error( format!("no raster band in {path:?}"))) }
        let declared_no_data = ds.rasterband(BAND_INDEX)?.no_data_value();

        let pixel_to_geo = ds.geo_transform().map_err(|e| sampling_error( format!("no geotransform in {path:?} ({e})")))?;
        let geo_to_pixel = pixel_to_geo.invert().map_err(|e| sampling_error( format!("geotransform of {path:?} not invertible ({e})")))?;
        let (width, height) = ds.raster_size();

        debug!("opened raster {path:?} ({width}x{height}, no_data: {declared_no_data:?})");
        Ok( RasterSampler { path: path.to_path_buf(), ds, geo_to_pixel, width, height, declared_no_data, sub_no_data } )
    }

    pub fn path (&self)->&Path { &self.path }

    pub fn size (&self)->(usize,usize) { (self.width, self.height) }

    pub fn spatial_ref (&self)->Option<SpatialRef> { dataset_spatial_ref( &self.ds) }

    pub fn declared_no_data (&self)->Option<f64> { self.declared_no_data }

    /// the value we report for coordinates outside the raster extent
    pub fn no_data_value (&self)->f64 {
        self.sub_no_data.or( self.declared_no_data).unwrap_or( DEFAULT_NO_DATA)
    }

    /// (column,row) of the pixel that covers `coord`, or None if it is outside the raster extent
    pub fn pixel_of (&self, coord: &Coord<f64>)->Option<(isize,isize)> {
        let (px, py) = self.geo_to_pixel.apply( coord.x, coord.y);
        if !px.is_finite() || !py.is_finite() { return None }

        let (col, row) = (px.floor(), py.floor());
        if col < 0.0 || row < 0.0 || col >= self.width as f64 || row >= self.height as f64 {
            None
        } else {
            Some( (col as isize, row as isize) )
        }
    }

    /// lazily sample all `coords` in iteration order
    pub fn samples<'a,I> (&'a self, coords: I)->Result<Samples<'a,I::IntoIter>> where I: IntoIterator<Item=&'a Coord<f64>> {
        let band = self.ds.rasterband(BAND_INDEX)?;
        Ok( Samples { sampler: self, band, coords: coords.into_iter(), data: [0.0f64;1] } )
    }

    /// convenience function to sample all `coords` at once
    pub fn sample_all (&self, coords: &[Coord<f64>])->Result<Vec<f64>> {
        self.samples( coords)?.collect()
    }
}

/// iterator over the sampled values for a sequence of coordinates
pub struct Samples<'a,I> where I: Iterator<Item=&'a Coord<f64>> {
    sampler: &'a RasterSampler,
    band: RasterBand<'a>,
    coords: I,
    data: [f64;1],
}

impl <'a,I> Samples<'a,I> where I: Iterator<Item=&'a Coord<f64>> {
    fn read_pixel (&mut self, xy: (isize,isize))->Result<f64> {
        self.band.read_into_slice( xy, (1,1), (1,1), &mut self.data, None)
            .map_err(|e| sampling_error( format!("failed to read pixel {xy:?} of {:?} ({e})", self.sampler.path)))?;

        let v = self.data[0];
        match (self.sampler.declared_no_data, self.sampler.sub_no_data) {
            (Some(no_data), Some(sub_no_data)) if is_no_data( v, no_data) => Ok(sub_no_data),
            _ => Ok(v)
        }
    }
}

/// NaN is a valid declared no-data value for float bands
fn is_no_data (v: f64, no_data: f64)->bool {
    v == no_data || (no_data.is_nan() && v.is_nan())
}

impl <'a,I> Iterator for Samples<'a,I> where I: Iterator<Item=&'a Coord<f64>> {
    type Item = Result<f64>;

    fn next (&mut self)->Option<Self::Item> {
        let coord = self.coords.next()?;
        let v = match self.sampler.pixel_of( coord) {
            Some(xy) => self.read_pixel( xy),
            None => Ok( self.sampler.no_data_value())
        };
        Some(v)
    }

    fn size_hint (&self)->(usize, Option<usize>) {
        self.coords.size_hint()
    }
}
