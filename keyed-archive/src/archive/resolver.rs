/*!
 Contains the logic used to resolve references in a keyed archive back into the nested object
 graph the archive was created from.

 Resolution logic referenced from Apple's `NSKeyedUnarchiver` documentation:
   - [`NSKeyedArchiver`](https://developer.apple.com/documentation/foundation/nskeyedarchiver)
   - [`NSKeyedUnarchiver`](https://developer.apple.com/documentation/foundation/nskeyedunarchiver)
*/

use std::collections::HashMap;

use base64::{prelude::BASE64_STANDARD, Engine};
use plist::{Dictionary, Value};

use crate::{
    archive::models::{
        Archive, CacheEntry, ResolvedValue, CLASS_KEY, CLASS_NAME_KEY, ROOT_ENTRY, TYPE_KEY,
    },
    error::archive::ArchiveError,
};

/// Contains logic and data used to resolve the references in one [`Archive`]
///
/// Each instance is a single resolution pass: the cache it carries is private to the pass and
/// is dropped with it, so separate archives can be resolved independently with no coordination.
#[derive(Debug)]
pub struct Unarchiver<'a> {
    /// The archive we want to resolve
    archive: &'a Archive,
    /// Values already resolved during this pass, so shared substructures are only walked once
    ///
    /// A reference mid-resolution holds [`CacheEntry::InProgress`], which is how the resolver
    /// notices the object graph looping back on itself.
    cache: HashMap<u64, CacheEntry>,
    /// The number of full (non-cached) resolutions performed, used to verify memoization
    pub(crate) resolutions: usize,
}

impl<'a> Unarchiver<'a> {
    pub fn new(archive: &'a Archive) -> Self {
        Self {
            archive,
            cache: HashMap::new(),
            resolutions: 0,
        }
    }

    /// Resolve every entry point in the archive, in the order the archive lists them
    ///
    /// This is the main entry point for callers; the output pairs each entry point name with
    /// the fully resolved value behind it.
    pub fn parse(&mut self) -> Result<Vec<(String, ResolvedValue)>, ArchiveError> {
        let archive = self.archive;
        let mut out_v = Vec::with_capacity(archive.entry_points.len());
        for (name, uid) in &archive.entry_points {
            out_v.push((name.clone(), self.resolve(*uid)?));
        }
        Ok(out_v)
    }

    /// Resolve the conventional `root` entry point
    ///
    /// Archives are not required to carry a `root` entry; [`Unarchiver::parse`] works for any
    /// set of entry points. This is a convenience for callers that expect the convention.
    pub fn root(&mut self) -> Result<ResolvedValue, ArchiveError> {
        let uid = self
            .archive
            .entry_point(ROOT_ENTRY)
            .ok_or(ArchiveError::MissingRootEntry)?;
        self.resolve(uid)
    }

    /// Resolve a single reference to the value it points at
    ///
    /// Reference `0` is always null and never touches the cache or the object table. Any other
    /// reference is looked up in the cache first; on a miss the target is walked, with the
    /// in-progress marker installed up front so cyclic references terminate in
    /// [`ResolvedValue::Cycle`] instead of recursing forever.
    pub fn resolve(&mut self, uid: u64) -> Result<ResolvedValue, ArchiveError> {
        // UID 0 is always nil
        if uid == 0 {
            return Ok(ResolvedValue::Null);
        }

        match self.cache.get(&uid) {
            Some(CacheEntry::Resolved(value)) => return Ok(value.clone()),
            Some(CacheEntry::InProgress) => return Ok(ResolvedValue::Cycle),
            None => {}
        }

        self.cache.insert(uid, CacheEntry::InProgress);
        self.resolutions += 1;

        let archive = self.archive;
        let resolved = match archive.object(uid)? {
            Value::Dictionary(target) => self.resolve_object(uid, target)?,
            other => self.resolve_value(other)?,
        };

        self.cache.insert(uid, CacheEntry::Resolved(resolved.clone()));
        Ok(resolved)
    }

    /// Reconstruct an archived object from a dictionary in the object table
    ///
    /// The dictionary's `$class` reference is resolved to a class name stored under
    /// [`TYPE_KEY`]; the remaining keys are carried over with their values resolved, except
    /// for the reserved `$`-prefixed ones.
    fn resolve_object(
        &mut self,
        uid: u64,
        target: &Dictionary,
    ) -> Result<ResolvedValue, ArchiveError> {
        let class_uid = match target.get(CLASS_KEY) {
            // A null class reference is as good as a missing one
            Some(Value::Uid(class_uid)) if class_uid.get() != 0 => class_uid.get(),
            _ => return Err(ArchiveError::MissingClassReference(uid)),
        };

        let mut entries = vec![(
            TYPE_KEY.to_string(),
            ResolvedValue::String(self.class_name(class_uid)?),
        )];

        for (key, value) in target.iter() {
            if key.starts_with('$') {
                continue;
            }
            entries.push((key.clone(), self.resolve_value(value)?));
        }

        Ok(ResolvedValue::Dictionary(entries))
    }

    /// Resolve a raw value found inside the object table
    ///
    /// References are followed, sequences and embedded mappings are resolved element by
    /// element with order preserved, binary data becomes base64 text, and scalars pass
    /// through unchanged.
    fn resolve_value(&mut self, value: &Value) -> Result<ResolvedValue, ArchiveError> {
        Ok(match value {
            Value::Uid(uid) => self.resolve(uid.get())?,
            Value::Array(elements) => {
                let mut out_v = Vec::with_capacity(elements.len());
                for element in elements {
                    out_v.push(self.resolve_value(element)?);
                }
                ResolvedValue::Array(out_v)
            }
            // A mapping stored inline rather than by reference; not an archived object,
            // so there is no class metadata to annotate it with
            Value::Dictionary(dict) => {
                let mut entries = Vec::with_capacity(dict.len());
                for (key, element) in dict.iter() {
                    entries.push((key.clone(), self.resolve_value(element)?));
                }
                ResolvedValue::Dictionary(entries)
            }
            Value::Data(bytes) => ResolvedValue::Data(BASE64_STANDARD.encode(bytes)),
            Value::Boolean(boolean) => ResolvedValue::Boolean(*boolean),
            Value::Integer(int) => match int.as_signed() {
                Some(signed) => ResolvedValue::SignedInteger(signed),
                None => ResolvedValue::UnsignedInteger(int.as_unsigned().unwrap_or(u64::MAX)),
            },
            Value::Real(double) => ResolvedValue::Double(*double),
            Value::String(string) => ResolvedValue::String(string.clone()),
            Value::Date(date) => ResolvedValue::Date(date.clone()),
            _ => ResolvedValue::Unsupported("unrecognized property list value"),
        })
    }

    /// Look up the class name stored in a class metadata object
    fn class_name(&self, class_uid: u64) -> Result<String, ArchiveError> {
        match self.archive.object(class_uid)? {
            Value::Dictionary(metadata) => match metadata.get(CLASS_NAME_KEY) {
                Some(Value::String(name)) => Ok(name.clone()),
                _ => Err(ArchiveError::InvalidClassMetadata(class_uid)),
            },
            _ => Err(ArchiveError::InvalidClassMetadata(class_uid)),
        }
    }
}
