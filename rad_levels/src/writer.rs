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

use std::{fmt, fs::File, io::{BufWriter, Write}, path::Path};
use geo::Coord;
use tracing::debug;

use rad_common::fs::remove_existing_file;
use crate::config::OutputFormat;
use crate::errors::{Result, RadLevelsError, sampling_error};

/// the sampled value for the point at position `index` of the ordered coordinate list
#[derive(Debug,Clone,Copy,PartialEq)]
pub struct SampleResult {
    pub index: usize,
    pub coord: Coord<f64>,
    pub value: f64,
}

/// `<index>, [<x>, <y>], <value>`
impl fmt::Display for SampleResult {
    fn fmt (&self, f: &mut fmt::Formatter<'_>)->fmt::Result {
        write!(f, "{}, [{}, {}], {}", self.index, self.coord.x, self.coord.y, self.value)
    }
}

/// the output sink abstraction. Rows have to be written in index order
pub trait ResultWriter {
    fn write_result (&mut self, result: &SampleResult)->Result<()>;

    /// flush buffered output. No more results can be written after this
    fn finish (&mut self)->Result<()>;
}

/// writes one `<index>, [<x>, <y>], <value>` text line per result
pub struct DelimitedRowWriter<W: Write> {
    out: W,
}

impl <W: Write> DelimitedRowWriter<W> {
    pub fn new (out: W)->Self { DelimitedRowWriter { out } }

    pub fn into_inner (self)->W { self.out }
}

impl DelimitedRowWriter<BufWriter<File>> {
    /// create a new output file at `path`. Any existing file at this location gets removed first
    pub fn create (path: impl AsRef<Path>)->Result<Self> {
        let path = path.as_ref();
        if remove_existing_file( path)? { debug!("removed existing output file {path:?}") }

        let file = File::create( path)?;
        Ok( DelimitedRowWriter::new( BufWriter::new( file)) )
    }
}

impl <W: Write> ResultWriter for DelimitedRowWriter<W> {
    fn write_result (&mut self, result: &SampleResult)->Result<()> {
        writeln!( self.out, "{result}")?;
        Ok(())
    }

    fn finish (&mut self)->Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// create the writer for the given output format. Geometry aware formats are not supported yet
pub fn create_writer (format: OutputFormat, path: &Path)->Result<Box<dyn ResultWriter>> {
    match format {
        OutputFormat::Csv => Ok( Box::new( DelimitedRowWriter::create( path)?)),
        other => Err( RadLevelsError::UnsupportedOutputFormat( other.to_string()))
    }
}

/// write one row per coordinate, pairing each coordinate with the next sampled value. Indices are the positions
/// within `coords`, i.e. duplicate coordinates still get their own rows. Returns the number of rows written
pub fn write_results<I,E> (writer: &mut dyn ResultWriter, coords: &[Coord<f64>], values: I)->Result<usize>
    where I: IntoIterator<Item=std::result::Result<f64,E>>, RadLevelsError: From<E>
{
    let mut values = values.into_iter();

    for (index, coord) in coords.iter().enumerate() {
        let value = values.next().ok_or_else( || sampling_error( format!("no sample value for point {index}")))??;
        writer.write_result( &SampleResult { index, coord: *coord, value })?;
    }

    if values.next().is_some() {
        return Err( sampling_error( format!("more sample values than the {} points", coords.len())))
    }

    writer.finish()?;
    Ok( coords.len())
}
