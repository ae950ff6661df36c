/*!
 Projects resolved archive values into a JSON document.
*/

use json::{object::Object, JsonValue};

use keyed_archive::archive::models::ResolvedValue;

/// Text emitted in place of the value at which the object graph loops back on itself
pub const CYCLE_PLACEHOLDER: &str = "...";

/// Build the output document, pairing each entry point name with its projected value
pub fn as_json(entries: Vec<(String, ResolvedValue)>) -> JsonValue {
    let mut document = Object::new();
    for (name, value) in entries {
        document.insert(&name, project(value));
    }
    JsonValue::Object(document)
}

/// Convert one resolved value into JSON
///
/// A property list can carry value kinds JSON cannot; those are replaced inline with a
/// diagnostic string rather than aborting an otherwise successful decode.
pub fn project(value: ResolvedValue) -> JsonValue {
    match value {
        ResolvedValue::Null => JsonValue::Null,
        ResolvedValue::Boolean(boolean) => boolean.into(),
        ResolvedValue::SignedInteger(int) => int.into(),
        ResolvedValue::UnsignedInteger(int) => int.into(),
        ResolvedValue::Double(double) => double.into(),
        ResolvedValue::String(string) => string.into(),
        ResolvedValue::Data(text) => text.into(),
        ResolvedValue::Array(items) => {
            JsonValue::Array(items.into_iter().map(project).collect())
        }
        ResolvedValue::Dictionary(entries) => {
            let mut object = Object::new();
            for (key, value) in entries {
                object.insert(&key, project(value));
            }
            JsonValue::Object(object)
        }
        ResolvedValue::Cycle => CYCLE_PLACEHOLDER.into(),
        ResolvedValue::Date(_) => invalid_type_warning("date").into(),
        ResolvedValue::Unsupported(kind) => invalid_type_warning(kind).into(),
    }
}

/// The diagnostic placeholder emitted for value kinds JSON cannot carry
fn invalid_type_warning(kind: &str) -> String {
    format!("<ERROR: encountered invalid type while parsing: {kind}>\nPlease report a github issue.")
}
