/*!
 Contains logic and data structures used to decode `NSKeyedArchiver` data into native Rust data structures.

 ## Overview

 `NSKeyedArchiver` is a serialization format used by Apple's Foundation framework. It flattens an
 object graph into a property list containing a table of objects, where each object refers to the
 others by integer reference (UID), plus a set of named entry points into that table.

 Decoding happens in two stages: the [`plist`] crate turns the raw bytes into a generic value tree,
 then [`models::Archive`] validates that tree and [`resolver::Unarchiver`] walks it, replacing every
 reference with the value it points at.
*/

pub mod models;
pub mod resolver;
mod tests;
