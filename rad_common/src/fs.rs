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

use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path,PathBuf};

use crate::io_error;

type Result<T> = std::result::Result<T,std::io::Error>;

pub fn filename<'a,T: AsRef<Path>> (path: &'a T)->Option<&'a str> {
    path.as_ref().file_name().and_then(|ostr| ostr.to_str())
}

/// lower case extension of the provided path (if any)
pub fn lowercase_extension<T: AsRef<Path>> (path: &T)->Option<String> {
    path.as_ref().extension().and_then(|ostr| ostr.to_str()).map( |s| s.to_ascii_lowercase())
}

/// create dir (including parents) if it does not exist yet. Returns true if it had to be created
pub fn create_dir_if_missing (path: impl AsRef<Path>)->Result<bool> {
    let path = path.as_ref();
    if path.is_dir() {
        Ok(false)
    } else if path.exists() {
        Err(io_error!(ErrorKind::NotADirectory, "not a directory: {:?}", path))
    } else {
        fs::create_dir_all(path)?;
        Ok(true)
    }
}

pub fn is_existing_file (path: impl AsRef<Path>)->bool {
    path.as_ref().is_file()
}

/// resolve `path` relative to `dir` unless it is already absolute
pub fn path_in_dir (dir: impl AsRef<Path>, path: impl AsRef<Path>)->PathBuf {
    dir.as_ref().join(path)
}

/// remove file at `path` if it exists. Returns true if there was a file to remove
pub fn remove_existing_file (path: impl AsRef<Path>)->Result<bool> {
    let path = path.as_ref();
    if path.is_file() {
        fs::remove_file(path)?;
        Ok(true)
    } else if path.exists() {
        Err(io_error!(ErrorKind::IsADirectory, "not a regular file: {:?}", path))
    } else {
        Ok(false)
    }
}

pub fn path_to_lossy_string (path: impl AsRef<Path>) -> String {
    path.as_ref().to_string_lossy().as_ref().to_string()
}
