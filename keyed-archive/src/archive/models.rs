/*!
 Data structures used to represent a keyed archive and the values resolved out of it.
*/

use std::path::Path;

use plist::{Date, Value};

use crate::error::archive::ArchiveError;

/// Key under which an archive stores its format version
pub const VERSION_KEY: &str = "$version";
/// Key under which an archive stores the name of the archiver that wrote it
pub const ARCHIVER_KEY: &str = "$archiver";
/// Key under which an archive stores its entry points
pub const TOP_KEY: &str = "$top";
/// Key under which an archive stores its object table
pub const OBJECTS_KEY: &str = "$objects";
/// Key holding the reference to an archived object's class metadata
pub const CLASS_KEY: &str = "$class";
/// Key holding the class name inside a class metadata object
pub const CLASS_NAME_KEY: &str = "$classname";
/// Key added to resolved objects to carry their original class name
pub const TYPE_KEY: &str = "$type";
/// The conventional name of an archive's primary entry point
pub const ROOT_ENTRY: &str = "root";

/// Represents the four required fields of a keyed archive, validated once per run
///
/// The archive is the flat form of the object graph: [`Archive::objects`] holds every archived
/// value, and references between them are indexes into that table. Reference `0` is reserved
/// and always decodes to null.
#[derive(Debug)]
pub struct Archive {
    /// The archive format version, informational only
    pub version: u64,
    /// The name of the archiver that wrote the file, informational only
    pub archiver: String,
    /// Named entry points into the object table, in the order the archive lists them
    pub entry_points: Vec<(String, u64)>,
    /// The object table, indexed by reference
    pub objects: Vec<Value>,
}

impl Archive {
    /// Read a property list from `path` and validate it as a keyed archive
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ArchiveError> {
        Self::from_value(Value::from_file(path).map_err(ArchiveError::Plist)?)
    }

    /// Validate a decoded property list as a keyed archive
    ///
    /// The top level must be a dictionary containing [`VERSION_KEY`], [`ARCHIVER_KEY`],
    /// [`TOP_KEY`], and [`OBJECTS_KEY`] with the expected shapes; any other keys are ignored.
    pub fn from_value(plist: Value) -> Result<Self, ArchiveError> {
        let mut plist = match plist {
            Value::Dictionary(dict) => dict,
            _ => {
                return Err(ArchiveError::MalformedArchive(
                    "top level is not a dictionary".to_string(),
                ))
            }
        };

        let version = match plist.remove(VERSION_KEY) {
            Some(Value::Integer(int)) => int.as_unsigned().ok_or_else(|| {
                ArchiveError::MalformedArchive(format!("`{VERSION_KEY}` is negative"))
            })?,
            _ => {
                return Err(ArchiveError::MalformedArchive(format!(
                    "`{VERSION_KEY}` is missing or not an integer"
                )))
            }
        };

        let archiver = match plist.remove(ARCHIVER_KEY) {
            Some(Value::String(name)) => name,
            _ => {
                return Err(ArchiveError::MalformedArchive(format!(
                    "`{ARCHIVER_KEY}` is missing or not a string"
                )))
            }
        };

        let top = match plist.remove(TOP_KEY) {
            Some(Value::Dictionary(top)) => top,
            _ => {
                return Err(ArchiveError::MalformedArchive(format!(
                    "`{TOP_KEY}` is missing or not a dictionary"
                )))
            }
        };

        let mut entry_points = Vec::with_capacity(top.len());
        for (name, value) in top {
            match value {
                Value::Uid(uid) => entry_points.push((name, uid.get())),
                _ => {
                    return Err(ArchiveError::MalformedArchive(format!(
                        "`{TOP_KEY}` entry `{name}` is not a reference"
                    )))
                }
            }
        }

        let objects = match plist.remove(OBJECTS_KEY) {
            Some(Value::Array(objects)) => objects,
            _ => {
                return Err(ArchiveError::MalformedArchive(format!(
                    "`{OBJECTS_KEY}` is missing or not an array"
                )))
            }
        };

        Ok(Archive {
            version,
            archiver,
            entry_points,
            objects,
        })
    }

    /// Look up the raw value a reference points at, if the reference is within the bounds
    /// of the object table
    pub fn object(&self, uid: u64) -> Result<&Value, ArchiveError> {
        self.objects
            .get(uid as usize)
            .ok_or(ArchiveError::ReferenceOutOfRange(uid, self.objects.len()))
    }

    /// Get the reference behind a named entry point
    pub fn entry_point(&self, name: &str) -> Option<u64> {
        self.entry_points
            .iter()
            .find(|(entry, _)| entry == name)
            .map(|(_, uid)| *uid)
    }
}

/// Rust structures containing values resolved out of an archive's object table
///
/// Unlike [`plist::Value`], this tree is reference-free: resolution has already replaced every
/// reference with the value it points at, or with [`ResolvedValue::Cycle`] where following the
/// reference would loop.
#[derive(Debug, Clone, PartialEq)]
pub enum ResolvedValue {
    /// The null reference, or an explicitly null value
    Null,
    /// Boolean data
    Boolean(bool),
    /// Signed integer types are coerced into this container
    SignedInteger(i64),
    /// Unsigned integers too large for [`ResolvedValue::SignedInteger`]
    UnsignedInteger(u64),
    /// Floating point numbers
    Double(f64),
    /// Text data
    String(String),
    /// Binary data, encoded as base64 text
    Data(String),
    /// Date data, carried through for the output layer to flag
    Date(Date),
    /// An ordered sequence of resolved values
    Array(Vec<ResolvedValue>),
    /// A reconstructed object; the first entry is [`TYPE_KEY`] holding the original class name
    Dictionary(Vec<(String, ResolvedValue)>),
    /// Stands in for a value whose resolution was already in progress when it was referenced
    /// again, i.e. the point at which the object graph loops back on itself
    Cycle,
    /// A property list kind this decoder does not model
    Unsupported(&'static str),
}

impl ResolvedValue {
    /// Get the value stored under `key`, if this is a resolved dictionary
    pub fn get(&self, key: &str) -> Option<&ResolvedValue> {
        match self {
            ResolvedValue::Dictionary(entries) => entries
                .iter()
                .find(|(entry, _)| entry == key)
                .map(|(_, value)| value),
            _ => None,
        }
    }

    /// Get the text content, if this is a resolved string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ResolvedValue::String(string) => Some(string),
            _ => None,
        }
    }
}

/// The state of one reference in the resolution cache
///
/// A reference enters the cache as [`CacheEntry::InProgress`] before its target is walked and is
/// overwritten with [`CacheEntry::Resolved`] once the walk completes. Seeing `InProgress` on
/// lookup therefore means the reference points back into an object currently being resolved
/// higher up the call stack, and the resolver answers with [`ResolvedValue::Cycle`] instead of
/// recursing forever.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum CacheEntry {
    /// Resolution of this reference is in progress somewhere on the call stack
    InProgress,
    /// The finished value for this reference
    Resolved(ResolvedValue),
}
