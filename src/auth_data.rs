use crate::codec;
use crate::error::{KdcRequestError, Result};
use crate::kdc_req::KdcRequestBuilder;
use crate::subkey::SubkeyConfig;

use kerberos_asn1::AuthorizationData;
use kerberos_asn1::EncryptedData;
use kerberos_asn1::EncryptionKey;

use kerberos_constants::key_usages::KEY_USAGE_TGS_REQ_AUTH_DATA_AUTHEN_SUBKEY;

use tracing::debug;

/// Inputs for [`KdcRequestBuilder::build_enc_auth_data`].
#[derive(Debug, Clone, Default)]
pub struct AuthDataConfig {
	/// Required.
	pub auth_data: Option<AuthorizationData>,
	/// Defaults to a freshly generated subkey.
	pub subkey: Option<EncryptionKey>
}

impl KdcRequestBuilder {
	/// Encrypt authorization data under the subkey for the request body's
	/// enc-authorization-data field.
	pub fn build_enc_auth_data(&mut self, config : AuthDataConfig) -> Result<EncryptedData> {
		let auth_data = config.auth_data.ok_or(KdcRequestError::MissingField("auth_data"))?;
		let subkey = match config.subkey {
			Some(subkey) => subkey,
			None => self.build_subkey(SubkeyConfig::default())?
		};

		let cipher = self.crypto.encrypt(&subkey, KEY_USAGE_TGS_REQ_AUTH_DATA_AUTHEN_SUBKEY, &codec::encode(&auth_data))?;
		debug!(etype = subkey.keytype, entries = auth_data.len(), "encrypted authorization data");

		Ok(EncryptedData {
			etype: subkey.keytype,
			kvno: None,
			cipher
		})
	}

	/// Inverse of [`KdcRequestBuilder::build_enc_auth_data`].
	pub fn decrypt_enc_auth_data(&self, enc_auth_data : &EncryptedData, subkey : &EncryptionKey) -> Result<AuthorizationData> {
		let plain = self.crypto.decrypt(subkey, KEY_USAGE_TGS_REQ_AUTH_DATA_AUTHEN_SUBKEY, &enc_auth_data.cipher)?;
		codec::decode(&plain)
	}
}
