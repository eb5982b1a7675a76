use crate::codec;
use crate::crypto::RSA_MD5;
use crate::error::Result;
use crate::kdc_req::{KdcRequestBuilder,ReqBodyConfig};

use kerberos_asn1::Checksum;
use kerberos_asn1::KdcReqBody;

use tracing::trace;

impl KdcRequestBuilder {
	/// Checksum the DER encoding of `body` with RSA-MD5, the checksum carried
	/// in the authenticator of an RC4-HMAC TGS-REQ.
	///
	/// Without a body, one is built with every default, which is only useful
	/// for a standalone authenticator.
	pub fn build_tgs_body_checksum(&mut self, body : Option<&KdcReqBody>) -> Result<Checksum> {
		let encoded = match body {
			Some(body) => codec::encode(body),
			None => codec::encode(&self.build_tgs_request_body(ReqBodyConfig::default()))
		};
		let checksum = self.crypto.checksum(RSA_MD5, &encoded)?;
		trace!(cksumtype = RSA_MD5, body_len = encoded.len(), checksum = %hex::encode(&checksum));

		Ok(Checksum {
			cksumtype: RSA_MD5,
			checksum
		})
	}
}
