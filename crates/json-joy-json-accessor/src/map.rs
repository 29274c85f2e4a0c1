//! Fail-deferred access into JSON objects.

use std::borrow::Cow;
use std::io::Read;

use crate::accessor::{self, must, Serializer};
use crate::array::ArrayAccessor;
use crate::error::{AccessError, Shape};
use crate::path::{Path, PathStep};
use crate::value::{Object, Value};

/// Navigates the content of a JSON object, or carries the first error met
/// on the way to it.
///
/// Navigation never fails eagerly: [`MapAccessor::map`] and
/// [`MapAccessor::array`] always return an accessor, and any error surfaces
/// at the terminal call.
///
/// ```
/// use json_joy_json_accessor::MapAccessor;
///
/// let data = br#"{"people": [{"name": "alice", "score": 89.5}]}"#;
/// let root = MapAccessor::from_slice(data);
///
/// assert_eq!(root.array("people").map(0).float("score").unwrap(), 89.5);
///
/// let err = root.array("entries").map(0).float("score").unwrap_err();
/// assert_eq!(err.to_string(), "key not found: 'entries' at $; valid keys: [people]");
/// ```
#[derive(Debug, Clone)]
pub struct MapAccessor<'a> {
    path: Path,
    state: Result<Cow<'a, Object>, AccessError>,
}

impl MapAccessor<'static> {
    /// Decodes a JSON object from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::decoded(accessor::decode_slice(bytes))
    }

    /// Decodes a JSON object from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Self {
        Self::decoded(accessor::decode_reader(reader))
    }

    /// Wraps an owned object at the root path.
    pub fn new(map: Object) -> Self {
        Self {
            path: Path::root(),
            state: Ok(Cow::Owned(map)),
        }
    }

    fn decoded(state: Result<Object, AccessError>) -> Self {
        Self {
            path: Path::root(),
            state: state.map(Cow::Owned),
        }
    }
}

impl<'a> MapAccessor<'a> {
    /// Wraps a borrowed object at the root path.
    pub fn borrowed(map: &'a Object) -> Self {
        Self {
            path: Path::root(),
            state: Ok(Cow::Borrowed(map)),
        }
    }

    pub(crate) fn resolved(map: &'a Object, path: Path) -> Self {
        Self {
            path,
            state: Ok(Cow::Borrowed(map)),
        }
    }

    pub(crate) fn failed(err: AccessError, path: Path) -> Self {
        Self { path, state: Err(err) }
    }

    /// Path of the held object; when errored, the path of the last step that
    /// resolved.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The error frozen into this accessor, if any.
    pub fn err(&self) -> Option<&AccessError> {
        self.state.as_ref().err()
    }

    /// Detaches the accessor from the tree it borrows from.
    pub fn into_owned(self) -> MapAccessor<'static> {
        MapAccessor {
            path: self.path,
            state: self.state.map(|map| Cow::Owned(map.into_owned())),
        }
    }

    fn object(&self) -> Result<&Object, AccessError> {
        match &self.state {
            Ok(map) => Ok(&**map),
            Err(err) => Err(err.clone()),
        }
    }

    fn lookup(&self, key: &str) -> Result<&Value, AccessError> {
        let map = self.object()?;
        map.get(key).ok_or_else(|| {
            accessor::fail(
                &self.path,
                AccessError::KeyNotFound {
                    key: key.to_owned(),
                    path: self.path.clone(),
                    valid_keys: map.keys().cloned().collect(),
                },
            )
        })
    }

    fn extract<'s, T>(
        &'s self,
        key: &str,
        expected: Shape,
        pick: impl FnOnce(&'s Value) -> Option<T>,
    ) -> Result<T, AccessError> {
        let value = self.lookup(key)?;
        pick(value).ok_or_else(|| {
            accessor::fail(
                &self.path,
                AccessError::TypeMismatch {
                    path: self.path.clone(),
                    step: PathStep::Key(key.to_owned()),
                    expected,
                    actual: value.kind(),
                },
            )
        })
    }

    /// Whether the object has `key`. Absence is not an error.
    pub fn has(&self, key: &str) -> Result<bool, AccessError> {
        Ok(self.object()?.contains_key(key))
    }

    /// The string at `key`.
    pub fn string(&self, key: &str) -> Result<&str, AccessError> {
        self.extract(key, Shape::String, Value::as_str)
    }

    /// The number at `key`.
    pub fn float(&self, key: &str) -> Result<f64, AccessError> {
        self.extract(key, Shape::Float, Value::as_f64)
    }

    /// The number at `key`, truncated toward zero.
    pub fn int(&self, key: &str) -> Result<i64, AccessError> {
        self.extract(key, Shape::Int, Value::as_i64)
    }

    /// The boolean at `key`.
    pub fn bool(&self, key: &str) -> Result<bool, AccessError> {
        self.extract(key, Shape::Bool, Value::as_bool)
    }

    /// The object at `key`.
    ///
    /// On failure the returned accessor keeps this accessor's path: the failed
    /// step is never part of it.
    pub fn map(&self, key: &str) -> MapAccessor<'_> {
        match self.extract(key, Shape::Map, Value::as_object) {
            Ok(map) => MapAccessor::resolved(map, self.path.append_key(key)),
            Err(err) => MapAccessor::failed(err, self.path.clone()),
        }
    }

    /// The array at `key`, with the same failure policy as [`MapAccessor::map`].
    pub fn array(&self, key: &str) -> ArrayAccessor<'_> {
        match self.extract(key, Shape::Array, Value::as_array) {
            Ok(arr) => ArrayAccessor::resolved(arr, self.path.append_key(key)),
            Err(err) => ArrayAccessor::failed(err, self.path.clone()),
        }
    }

    /// The held object.
    pub fn inner(&self) -> Result<&Object, AccessError> {
        self.object()
    }

    /// Consumes the accessor, returning the held object.
    pub fn into_inner(self) -> Result<Object, AccessError> {
        self.state.map(Cow::into_owned)
    }

    /// Serializes the held object as compact JSON.
    pub fn bytes(&self) -> Result<Vec<u8>, AccessError> {
        accessor::encode(self.object()?)
    }

    /// Like [`MapAccessor::has`], but panics with the error text.
    #[track_caller]
    pub fn must_has(&self, key: &str) -> bool {
        must(self.has(key))
    }

    /// Like [`MapAccessor::string`], but panics with the error text.
    #[track_caller]
    pub fn must_string(&self, key: &str) -> &str {
        must(self.string(key))
    }

    /// Like [`MapAccessor::float`], but panics with the error text.
    #[track_caller]
    pub fn must_float(&self, key: &str) -> f64 {
        must(self.float(key))
    }

    /// Like [`MapAccessor::int`], but panics with the error text.
    #[track_caller]
    pub fn must_int(&self, key: &str) -> i64 {
        must(self.int(key))
    }

    /// Like [`MapAccessor::bool`], but panics with the error text.
    #[track_caller]
    pub fn must_bool(&self, key: &str) -> bool {
        must(self.bool(key))
    }

    /// Like [`MapAccessor::inner`], but panics with the error text.
    #[track_caller]
    pub fn must_inner(&self) -> &Object {
        must(self.inner())
    }

    /// Like [`MapAccessor::bytes`], but panics with the error text.
    #[track_caller]
    pub fn must_bytes(&self) -> Vec<u8> {
        must(self.bytes())
    }
}

impl Serializer for MapAccessor<'_> {
    fn bytes(&self) -> Result<Vec<u8>, AccessError> {
        MapAccessor::bytes(self)
    }
}

impl From<Object> for MapAccessor<'static> {
    fn from(map: Object) -> Self {
        MapAccessor::new(map)
    }
}

impl<'a> From<&'a Object> for MapAccessor<'a> {
    fn from(map: &'a Object) -> Self {
        MapAccessor::borrowed(map)
    }
}
