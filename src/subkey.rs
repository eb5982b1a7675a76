use crate::error::Result;
use crate::kdc_req::KdcRequestBuilder;

use kerberos_asn1::EncryptionKey;
use kerberos_constants::etypes::RC4_HMAC;

use rand::RngCore;

use tracing::trace;

/// Inputs for [`KdcRequestBuilder::build_subkey`].
#[derive(Debug, Clone, Default)]
pub struct SubkeyConfig {
	/// Encryption type of the key. Defaults to RC4-HMAC.
	pub etype: Option<i32>,
	/// Raw key bytes. Fresh random bytes of the etype's key size when absent.
	pub value: Option<Vec<u8>>
}

impl KdcRequestBuilder {
	/// Produce the request-scoped subkey.
	///
	/// Caller-supplied bytes are taken as they are; their length is left for the
	/// crypto backend to judge when the key is used.
	pub fn build_subkey(&mut self, config : SubkeyConfig) -> Result<EncryptionKey> {
		let etype = config.etype.unwrap_or(RC4_HMAC);
		let keyvalue = match config.value {
			Some(value) => value,
			None => {
				let size = self.crypto.key_size(etype)?;
				let mut value = vec![0u8; size];
				self.rng.fill_bytes(&mut value);
				value
			}
		};
		trace!(etype, key_len = keyvalue.len(), "subkey resolved");

		Ok(EncryptionKey {
			keytype: etype,
			keyvalue
		})
	}
}
