//! Thin wrapper over the `kerberos_asn1` codec so decode failures surface as
//! [`KdcRequestError::Encoding`].

use crate::error::{KdcRequestError, Result};

use kerberos_asn1::Asn1Object;

/// Canonical DER encoding of a protocol value.
pub fn encode<T : Asn1Object>(value : &T) -> Vec<u8> {
	value.build()
}

/// Decode a protocol value, ignoring any trailing bytes.
pub fn decode<T : Asn1Object>(raw : &[u8]) -> Result<T> {
	let (_, value) = T::parse(raw).map_err(KdcRequestError::Encoding)?;
	Ok(value)
}
