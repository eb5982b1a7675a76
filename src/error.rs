use thiserror::Error;

pub type Result<T> = std::result::Result<T, KdcRequestError>;

#[derive(Debug, Error)]
pub enum KdcRequestError {
	/// A field the message cannot be built without was not supplied.
	#[error("missing required field: {0}")]
	MissingField(&'static str),

	#[error("unsupported encryption type {0}")]
	UnsupportedEtype(i32),

	#[error("unsupported checksum type {0}")]
	UnsupportedChecksum(i32),

	/// Raised by the ASN.1 codec, propagated unchanged.
	#[error("encoding failure: {0:?}")]
	Encoding(kerberos_asn1::Error),

	/// Raised by the crypto backend, propagated unchanged.
	#[error("cryptographic failure: {0:?}")]
	Crypto(kerberos_crypto::Error),

	#[error("invalid credential: {0}")]
	InvalidCredential(String),

	#[error("KDC transport failure: {0}")]
	Io(#[from] std::io::Error),
}

impl KdcRequestError {
	pub fn is_missing_field(&self) -> bool {
		matches!(self, KdcRequestError::MissingField(_))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn missing_field_names_the_field() {
		let err = KdcRequestError::MissingField("ticket");
		assert!(err.is_missing_field());
		assert_eq!(err.to_string(), "missing required field: ticket");
	}

	#[test]
	fn io_errors_convert() {
		let io = std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "refused");
		let err : KdcRequestError = io.into();
		assert!(!err.is_missing_field());
		assert!(err.to_string().contains("refused"));
	}
}
