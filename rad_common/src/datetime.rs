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

use chrono::{Local, NaiveDate};

pub fn local_today ()->NaiveDate {
    Local::now().date_naive()
}

/// filename of the form `<prefix>_<weekday-name>_<day-of-month>.<ext>` (e.g. "Output_Monday_07.csv")
pub fn day_stamped_filename (prefix: &str, date: &NaiveDate, ext: &str)->String {
    format!("{}_{}.{}", prefix, date.format("%A_%d"), ext)
}
