//! Fail-deferred accessors for decoded JSON documents.
//!
//! A [`MapAccessor`] or [`ArrayAccessor`] wraps either a value or the first
//! error met while navigating to it. Chained calls never fail eagerly: a
//! missing key, an out-of-range index or a type mismatch is frozen into the
//! accessor and handed back, unchanged, by the terminal call at the end of
//! the chain. Errors report the path of the last step that resolved.
//!
//! # Example
//!
//! ```
//! use json_joy_json_accessor::MapAccessor;
//!
//! let data = br#"{
//!     "people": [
//!         {"name": "alice", "score": 89.5, "friends": ["bob"], "deleted": false},
//!         {"name": "bob", "score": 75.5, "friends": [], "deleted": false}
//!     ]
//! }"#;
//! let doc = MapAccessor::from_slice(data);
//!
//! let people = doc.array("people");
//! let alice = people.map(0);
//! assert_eq!(alice.string("name").unwrap(), "alice");
//! assert_eq!(alice.float("score").unwrap(), 89.5);
//! assert_eq!(alice.array("friends").len().unwrap(), 1);
//!
//! // The failing key and the keys that exist are both reported.
//! let err = doc.array("entries").map(0).float("score").unwrap_err();
//! assert!(err.to_string().contains("entries"));
//! assert!(err.to_string().contains("people"));
//!
//! // Failed navigation keeps the path where the chain stopped.
//! let bob = people.map(1);
//! let err = bob.array("friends").string(0).unwrap_err();
//! assert_eq!(
//!     err.to_string(),
//!     "invalid index: 0 at $['people'][1]['friends']; the array is empty"
//! );
//! ```

mod accessor;
mod array;
mod error;
mod map;
pub mod path;
pub mod value;

pub use accessor::Serializer;
pub use array::ArrayAccessor;
pub use error::{AccessError, Shape};
pub use map::MapAccessor;
pub use path::{Path, PathStep};
pub use value::{Kind, Object, Value};

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE: &[u8] = br#"{
        "object": {
            "strKey": "strValue",
            "boolKey": true,
            "intKey": 42,
            "floatKey": 1.21,
            "arrayObjKey": [{"val": 1}, {"val": 2}],
            "nestedArrayKey": [[3, 4, 5]],
            "arrayStrKey": ["str1", "str2"]
        }
    }"#;

    #[test]
    fn test_nested_array_value() {
        let m = MapAccessor::from_slice(SIMPLE);
        let f = m.map("object").array("nestedArrayKey").array(0).float(2);
        assert_eq!(f.unwrap(), 5.0);
    }

    #[test]
    fn test_nested_array_bad_index() {
        let m = MapAccessor::from_slice(SIMPLE);
        let f = m.map("object").array("nestedArrayKey").array(1).float(2);
        assert!(f.is_err());
        assert_eq!(f.unwrap_or_default(), 0.0);
    }

    #[test]
    fn test_missing_array_len() {
        let m = MapAccessor::from_slice(SIMPLE);
        let not_found = m.array("missing");
        assert!(not_found.err().is_some());
        assert!(not_found.len().is_err());
    }

    #[test]
    fn test_missing_map_string() {
        let m = MapAccessor::from_slice(SIMPLE);
        let missing = m.map("missing");
        assert!(missing.string("strKey").is_err());
        assert_eq!(missing.path(), &Path::root());
    }

    #[test]
    fn test_accessors_are_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<MapAccessor<'static>>();
        assert_send_sync::<ArrayAccessor<'static>>();
        assert_send_sync::<AccessError>();
    }

    #[test]
    fn test_string() {
        let m = MapAccessor::from_slice(SIMPLE);
        assert_eq!(m.map("object").string("strKey").unwrap(), "strValue");
        assert_eq!(m.map("object").int("intKey").unwrap(), 42);
        assert_eq!(m.map("object").int("floatKey").unwrap(), 1);
        assert_eq!(m.map("object").array("arrayObjKey").map(1).int("val").unwrap(), 2);
    }
}
