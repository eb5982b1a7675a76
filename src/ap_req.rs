use crate::authenticator::AuthenticatorConfig;
use crate::codec;
use crate::error::{KdcRequestError, Result};
use crate::kdc_req::KdcRequestBuilder;
use crate::subkey::SubkeyConfig;

use kerberos_asn1::ApReq;
use kerberos_asn1::Authenticator;
use kerberos_asn1::EncryptedData;
use kerberos_asn1::EncryptionKey;
use kerberos_asn1::Ticket;

use kerberos_constants::key_usages::KEY_USAGE_TGS_REQ_AUTHEN;
use kerberos_constants::message_types::KRB_AP_REQ;
use kerberos_constants::protocol_version::PVNO;

use tracing::{debug,warn};

/// Inputs for [`KdcRequestBuilder::build_ap_req`].
#[derive(Debug, Clone, Default)]
pub struct ApReqConfig {
	/// Defaults to 5.
	pub pvno: Option<i32>,
	/// Defaults to KRB_AP_REQ.
	pub msg_type: Option<i32>,
	/// AP options bitmask. Defaults to 0.
	pub options: Option<u32>,
	/// Required.
	pub ticket: Option<Ticket>,
	/// Defaults to an authenticator built with every default.
	pub authenticator: Option<Authenticator>,
	/// The ticket's session key. Real requests must supply it: without it a
	/// random key is generated and the KDC will reject the request.
	pub session_key: Option<EncryptionKey>
}

impl KdcRequestBuilder {
	/// Encrypt the authenticator under the ticket's session key and wrap it
	/// with the ticket.
	pub fn build_ap_req(&mut self, config : ApReqConfig) -> Result<ApReq> {
		let ticket = config.ticket.ok_or(KdcRequestError::MissingField("ticket"))?;
		let authenticator = match config.authenticator {
			Some(authenticator) => authenticator,
			None => self.build_authenticator(AuthenticatorConfig::default())?
		};
		let session_key = match config.session_key {
			Some(session_key) => session_key,
			None => {
				warn!("no session key supplied for the AP-REQ, encrypting the authenticator with a generated key");
				self.build_subkey(SubkeyConfig::default())?
			}
		};

		// Encrypt the Authenticator with the session key, never the subkey.
		let cipher = self.crypto.encrypt(&session_key, KEY_USAGE_TGS_REQ_AUTHEN, &codec::encode(&authenticator))?;
		let encrypted_authenticator = EncryptedData {
			etype: session_key.keytype,
			kvno: None,
			cipher
		};

		let ap_req = ApReq {
			pvno: config.pvno.unwrap_or(PVNO),
			msg_type: config.msg_type.unwrap_or(KRB_AP_REQ),
			ap_options: config.options.unwrap_or(0).into(),
			ticket,
			authenticator: encrypted_authenticator
		};
		debug!(etype = ap_req.authenticator.etype, realm = %ap_req.ticket.realm, "built AP-REQ");
		Ok(ap_req)
	}

	/// Recover the authenticator of an AP-REQ with the session key it was
	/// encrypted under.
	pub fn decrypt_authenticator(&self, ap_req : &ApReq, session_key : &EncryptionKey) -> Result<Authenticator> {
		let plain = self.crypto.decrypt(session_key, KEY_USAGE_TGS_REQ_AUTHEN, &ap_req.authenticator.cipher)?;
		codec::decode(&plain)
	}
}
