//! Fail-deferred access into JSON arrays.

use std::borrow::Cow;
use std::io::Read;

use crate::accessor::{self, must, Serializer};
use crate::error::{AccessError, Shape};
use crate::map::MapAccessor;
use crate::path::{Path, PathStep};
use crate::value::Value;

/// Navigates the content of a JSON array, or carries the first error met on
/// the way to it. Indexing is validated against `[0, len)` before any type
/// check.
///
/// ```
/// use json_joy_json_accessor::ArrayAccessor;
///
/// let arr = ArrayAccessor::from_slice(b"[[3, 4, 5]]");
/// assert_eq!(arr.array(0).float(2).unwrap(), 5.0);
///
/// let err = arr.array(1).float(2).unwrap_err();
/// assert_eq!(err.to_string(), "invalid index: 1 at $; it should be between 0 and 0");
/// ```
#[derive(Debug, Clone)]
pub struct ArrayAccessor<'a> {
    path: Path,
    state: Result<Cow<'a, [Value]>, AccessError>,
}

impl ArrayAccessor<'static> {
    /// Decodes a JSON array from a byte slice.
    pub fn from_slice(bytes: &[u8]) -> Self {
        Self::decoded(accessor::decode_slice(bytes))
    }

    /// Decodes a JSON array from a reader.
    pub fn from_reader<R: Read>(reader: R) -> Self {
        Self::decoded(accessor::decode_reader(reader))
    }

    /// Wraps an owned array at the root path.
    pub fn new(arr: Vec<Value>) -> Self {
        Self {
            path: Path::root(),
            state: Ok(Cow::Owned(arr)),
        }
    }

    fn decoded(state: Result<Vec<Value>, AccessError>) -> Self {
        Self {
            path: Path::root(),
            state: state.map(Cow::Owned),
        }
    }
}

impl<'a> ArrayAccessor<'a> {
    /// Wraps a borrowed slice at the root path.
    pub fn borrowed(arr: &'a [Value]) -> Self {
        Self {
            path: Path::root(),
            state: Ok(Cow::Borrowed(arr)),
        }
    }

    pub(crate) fn resolved(arr: &'a [Value], path: Path) -> Self {
        Self {
            path,
            state: Ok(Cow::Borrowed(arr)),
        }
    }

    pub(crate) fn failed(err: AccessError, path: Path) -> Self {
        Self { path, state: Err(err) }
    }

    /// Path of the held array; when errored, the path of the last step that
    /// resolved.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The error frozen into this accessor, if any.
    pub fn err(&self) -> Option<&AccessError> {
        self.state.as_ref().err()
    }

    /// Detaches the accessor from the tree it borrows from.
    pub fn into_owned(self) -> ArrayAccessor<'static> {
        ArrayAccessor {
            path: self.path,
            state: self.state.map(|arr| Cow::Owned(arr.into_owned())),
        }
    }

    fn items(&self) -> Result<&[Value], AccessError> {
        match &self.state {
            Ok(arr) => Ok(&**arr),
            Err(err) => Err(err.clone()),
        }
    }

    fn lookup(&self, idx: usize) -> Result<&Value, AccessError> {
        let arr = self.items()?;
        arr.get(idx).ok_or_else(|| {
            accessor::fail(
                &self.path,
                AccessError::IndexOutOfRange {
                    index: idx,
                    len: arr.len(),
                    path: self.path.clone(),
                },
            )
        })
    }

    fn extract<'s, T>(
        &'s self,
        idx: usize,
        expected: Shape,
        pick: impl FnOnce(&'s Value) -> Option<T>,
    ) -> Result<T, AccessError> {
        let value = self.lookup(idx)?;
        pick(value).ok_or_else(|| {
            accessor::fail(
                &self.path,
                AccessError::TypeMismatch {
                    path: self.path.clone(),
                    step: PathStep::Index(idx),
                    expected,
                    actual: value.kind(),
                },
            )
        })
    }

    /// Number of elements.
    pub fn len(&self) -> Result<usize, AccessError> {
        Ok(self.items()?.len())
    }

    /// Whether the array has no elements.
    pub fn is_empty(&self) -> Result<bool, AccessError> {
        Ok(self.items()?.is_empty())
    }

    /// The string at `idx`.
    pub fn string(&self, idx: usize) -> Result<&str, AccessError> {
        self.extract(idx, Shape::String, Value::as_str)
    }

    /// The number at `idx`.
    pub fn float(&self, idx: usize) -> Result<f64, AccessError> {
        self.extract(idx, Shape::Float, Value::as_f64)
    }

    /// The number at `idx`, truncated toward zero.
    pub fn int(&self, idx: usize) -> Result<i64, AccessError> {
        self.extract(idx, Shape::Int, Value::as_i64)
    }

    /// The boolean at `idx`.
    pub fn bool(&self, idx: usize) -> Result<bool, AccessError> {
        self.extract(idx, Shape::Bool, Value::as_bool)
    }

    /// The object at `idx`. A failed step keeps this accessor's path.
    pub fn map(&self, idx: usize) -> MapAccessor<'_> {
        match self.extract(idx, Shape::Map, Value::as_object) {
            Ok(map) => MapAccessor::resolved(map, self.path.append_index(idx)),
            Err(err) => MapAccessor::failed(err, self.path.clone()),
        }
    }

    /// The array at `idx`. A failed step keeps this accessor's path.
    pub fn array(&self, idx: usize) -> ArrayAccessor<'_> {
        match self.extract(idx, Shape::Array, Value::as_array) {
            Ok(arr) => ArrayAccessor::resolved(arr, self.path.append_index(idx)),
            Err(err) => ArrayAccessor::failed(err, self.path.clone()),
        }
    }

    /// The held elements.
    pub fn inner(&self) -> Result<&[Value], AccessError> {
        self.items()
    }

    /// Consumes the accessor, returning the held elements.
    pub fn into_inner(self) -> Result<Vec<Value>, AccessError> {
        self.state.map(Cow::into_owned)
    }

    /// Serializes the held array as compact JSON.
    pub fn bytes(&self) -> Result<Vec<u8>, AccessError> {
        accessor::encode(self.items()?)
    }

    /// Iterates the objects of an array of objects, one accessor per element.
    ///
    /// Elements that are not objects yield errored accessors. An errored
    /// array yields a single accessor carrying its frozen error and path.
    pub fn maps(&self) -> impl Iterator<Item = MapAccessor<'_>> + '_ {
        let (len, frozen) = match &self.state {
            Ok(arr) => (arr.len(), None),
            Err(err) => (0, Some(MapAccessor::failed(err.clone(), self.path.clone()))),
        };
        frozen
            .into_iter()
            .chain((0..len).map(move |idx| self.map(idx)))
    }

    /// Like [`ArrayAccessor::len`], but panics with the error text.
    #[track_caller]
    pub fn must_len(&self) -> usize {
        must(self.len())
    }

    /// Like [`ArrayAccessor::is_empty`], but panics with the error text.
    #[track_caller]
    pub fn must_is_empty(&self) -> bool {
        must(self.is_empty())
    }

    /// Like [`ArrayAccessor::string`], but panics with the error text.
    #[track_caller]
    pub fn must_string(&self, idx: usize) -> &str {
        must(self.string(idx))
    }

    /// Like [`ArrayAccessor::float`], but panics with the error text.
    #[track_caller]
    pub fn must_float(&self, idx: usize) -> f64 {
        must(self.float(idx))
    }

    /// Like [`ArrayAccessor::int`], but panics with the error text.
    #[track_caller]
    pub fn must_int(&self, idx: usize) -> i64 {
        must(self.int(idx))
    }

    /// Like [`ArrayAccessor::bool`], but panics with the error text.
    #[track_caller]
    pub fn must_bool(&self, idx: usize) -> bool {
        must(self.bool(idx))
    }

    /// Like [`ArrayAccessor::inner`], but panics with the error text.
    #[track_caller]
    pub fn must_inner(&self) -> &[Value] {
        must(self.inner())
    }

    /// Like [`ArrayAccessor::bytes`], but panics with the error text.
    #[track_caller]
    pub fn must_bytes(&self) -> Vec<u8> {
        must(self.bytes())
    }
}

impl Serializer for ArrayAccessor<'_> {
    fn bytes(&self) -> Result<Vec<u8>, AccessError> {
        ArrayAccessor::bytes(self)
    }
}

impl From<Vec<Value>> for ArrayAccessor<'static> {
    fn from(arr: Vec<Value>) -> Self {
        ArrayAccessor::new(arr)
    }
}

impl<'a> From<&'a [Value]> for ArrayAccessor<'a> {
    fn from(arr: &'a [Value]) -> Self {
        ArrayAccessor::borrowed(arr)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_terminal_values() {
        let arr = ArrayAccessor::from_slice(br#"["s", 2.75, true, -7.5, null]"#);
        assert_eq!(arr.len().unwrap(), 5);
        assert_eq!(arr.string(0).unwrap(), "s");
        assert_eq!(arr.float(1).unwrap(), 2.75);
        assert!(arr.bool(2).unwrap());
        assert_eq!(arr.int(3).unwrap(), -7);
    }

    #[test]
    fn test_empty_array_boundary() {
        let arr = ArrayAccessor::new(Vec::new());
        assert_eq!(arr.len().unwrap(), 0);
        assert!(arr.is_empty().unwrap());
        assert!(arr.must_is_empty());
        let err = arr.float(0).unwrap_err();
        assert_eq!(err.to_string(), "invalid index: 0 at $; the array is empty");
    }

    #[test]
    fn test_index_checked_before_type() {
        let arr = ArrayAccessor::from_slice(br#"["s"]"#);
        assert!(matches!(
            arr.float(3).unwrap_err(),
            AccessError::IndexOutOfRange { index: 3, len: 1, .. }
        ));
        assert!(matches!(
            arr.float(0).unwrap_err(),
            AccessError::TypeMismatch { step: PathStep::Index(0), .. }
        ));
    }

    #[test]
    fn test_type_mismatch_on_null() {
        let arr = ArrayAccessor::from_slice(b"[null]");
        assert_eq!(
            arr.map(0).err().unwrap().to_string(),
            "type mismatch at $: item [0] was a null, not a map"
        );
    }

    #[test]
    fn test_nested_paths() {
        let arr = ArrayAccessor::from_slice(br#"[{"k": [[1]]}]"#);
        let first = arr.map(0);
        let inner = first.array("k");
        let leaf = inner.array(0);
        assert_eq!(leaf.path().to_string(), "$[0]['k'][0]");
        let failed = leaf.array(0);
        assert_eq!(failed.path().to_string(), "$[0]['k'][0]");
        assert_eq!(
            failed.len().unwrap_err().to_string(),
            "type mismatch at $[0]['k'][0]: item [0] was a number, not an array"
        );
    }

    #[test]
    fn test_errored_array_is_sticky() {
        let arr = ArrayAccessor::from_slice(br#"{"not": "an array"}"#);
        let text = arr.err().unwrap().to_string();
        assert_eq!(arr.len().unwrap_err().to_string(), text);
        assert_eq!(arr.map(7).array("x").float(1).unwrap_err().to_string(), text);
        assert_eq!(arr.inner().unwrap_err().to_string(), text);
    }

    #[test]
    fn test_maps_on_errored_array_carries_the_error() {
        let doc = MapAccessor::from_slice(br#"{"people": [{"name": "alice"}]}"#);
        let people = doc.array("peple");
        let text = people.err().unwrap().to_string();
        let maps: Vec<_> = people.maps().collect();
        assert_eq!(maps.len(), 1);
        assert_eq!(maps[0].err().unwrap().to_string(), text);
        assert_eq!(maps[0].path(), people.path());
        assert_eq!(maps[0].string("name").unwrap_err().to_string(), text);
    }

    #[test]
    #[should_panic(expected = "key not found: 'missing' at $")]
    fn test_must_is_empty_panics_on_errored_array() {
        let doc = MapAccessor::from_slice(br#"{"k": []}"#);
        doc.array("missing").must_is_empty();
    }

    #[test]
    fn test_maps_iterates_elements() {
        let arr = ArrayAccessor::from_slice(br#"[{"v": 1}, {"v": 2}, 3]"#);
        let values: Vec<_> = arr.maps().map(|m| m.int("v")).collect();
        assert_eq!(values[0].as_ref().unwrap(), &1);
        assert_eq!(values[1].as_ref().unwrap(), &2);
        assert!(values[2].is_err());
    }

    #[test]
    #[should_panic(expected = "invalid index: 2 at $")]
    fn test_must_float_panics_out_of_range() {
        ArrayAccessor::from_slice(b"[1, 2]").must_float(2);
    }

    #[test]
    fn test_bytes() {
        let arr = ArrayAccessor::new(vec![Value::from("a"), Value::Number(3.0), Value::Null]);
        assert_eq!(arr.bytes().unwrap(), br#"["a",3,null]"#.to_vec());
    }
}
