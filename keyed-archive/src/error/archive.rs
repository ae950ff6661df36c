/*!
 Errors that can happen when parsing keyed archive data.
*/

use std::fmt::{Display, Formatter, Result};

use plist::Error as PlistError;

/// Errors that can happen when parsing keyed archive data
#[derive(Debug)]
pub enum ArchiveError {
    /// The property list decoder could not produce a value tree
    Plist(PlistError),
    /// The decoded property list is not shaped like a keyed archive
    MalformedArchive(String),
    /// The conventional `root` entry point is absent
    MissingRootEntry,
    /// A reference indexes outside of the object table; holds the reference and the table length
    ReferenceOutOfRange(u64, usize),
    /// An archived object has no `$class` reference
    MissingClassReference(u64),
    /// A `$class` reference points at something that is not class metadata
    InvalidClassMetadata(u64),
}

impl Display for ArchiveError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result {
        match self {
            ArchiveError::Plist(why) => write!(fmt, "Unable to read property list: {why}"),
            ArchiveError::MalformedArchive(why) => write!(fmt, "Malformed keyed archive: {why}"),
            ArchiveError::MissingRootEntry => write!(fmt, "Missing root object"),
            ArchiveError::ReferenceOutOfRange(uid, len) => {
                write!(fmt, "Reference {uid} is outside of object table range {len}!")
            }
            ArchiveError::MissingClassReference(uid) => {
                write!(fmt, "Missing class name for object {uid}")
            }
            ArchiveError::InvalidClassMetadata(uid) => {
                write!(fmt, "Object {uid} is not class metadata")
            }
        }
    }
}
