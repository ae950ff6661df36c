/*!
 This module contains the runtime that wraps the `keyed-archive` library for the command line.
*/

pub mod error;
pub mod options;
pub mod runtime;
