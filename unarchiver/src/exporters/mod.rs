/*!
 This module contains the output projections for resolved archives.
*/

pub mod json;
