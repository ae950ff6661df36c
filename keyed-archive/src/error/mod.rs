/*!
 This module defines the errors that can happen when decoding keyed archives.
*/

pub mod archive;
