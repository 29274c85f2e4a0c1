//! Helpers shared by [`MapAccessor`](crate::MapAccessor) and
//! [`ArrayAccessor`](crate::ArrayAccessor).

use std::io::Read;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::AccessError;
use crate::path::Path;

/// Serialization of the sub-tree an accessor holds.
pub trait Serializer {
    /// Compact JSON bytes of the held value, or the frozen error.
    fn bytes(&self) -> Result<Vec<u8>, AccessError>;

    /// Like [`Serializer::bytes`], but panics with the error text.
    #[track_caller]
    fn must_bytes(&self) -> Vec<u8> {
        must(self.bytes())
    }
}

/// Unwraps a result for the `must_*` surface.
///
/// The panic message is the error's `Display` text, byte for byte.
#[track_caller]
pub(crate) fn must<T>(result: Result<T, AccessError>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("{}", err),
    }
}

/// Records the first failure of a chain. Propagated errors are not logged.
pub(crate) fn fail(path: &Path, err: AccessError) -> AccessError {
    log::debug!("accessor failed at {}: {}", path, err);
    err
}

pub(crate) fn decode_slice<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, AccessError> {
    match serde_json::from_slice(bytes) {
        Ok(value) => {
            log::trace!("decoded {} bytes", bytes.len());
            Ok(value)
        }
        Err(err) => Err(fail(&Path::root(), AccessError::decode(err))),
    }
}

pub(crate) fn decode_reader<T: DeserializeOwned, R: Read>(reader: R) -> Result<T, AccessError> {
    serde_json::from_reader(reader).map_err(|err| fail(&Path::root(), AccessError::decode(err)))
}

pub(crate) fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, AccessError> {
    serde_json::to_vec(value).map_err(AccessError::encode)
}
