use crate::error::Result;
use crate::kdc_req::KdcRequestBuilder;
use crate::subkey::SubkeyConfig;

use kerberos_asn1::Authenticator;
use kerberos_asn1::Checksum;
use kerberos_asn1::EncryptionKey;
use kerberos_asn1::PrincipalName;

use kerberos_constants::principal_names::NT_PRINCIPAL;
use kerberos_constants::protocol_version::PVNO;

use chrono::DateTime;
use chrono::Utc;

use tracing::debug;

/// Inputs for [`KdcRequestBuilder::build_authenticator`].
#[derive(Debug, Clone, Default)]
pub struct AuthenticatorConfig {
	/// Defaults to an empty NT-PRINCIPAL name.
	pub cname: Option<PrincipalName>,
	/// Defaults to the empty realm.
	pub realm: Option<String>,
	/// Defaults to the builder clock's current time.
	pub ctime: Option<DateTime<Utc>>,
	/// Defaults to the microseconds part of `ctime`.
	pub cusec: Option<i32>,
	/// Defaults to a checksum over a default request body.
	pub checksum: Option<Checksum>,
	/// Defaults to a freshly generated subkey.
	pub subkey: Option<EncryptionKey>,
	pub seq_number: Option<u32>
}

impl KdcRequestBuilder {
	pub fn build_authenticator(&mut self, config : AuthenticatorConfig) -> Result<Authenticator> {
		let ctime = config.ctime.unwrap_or_else(|| self.clock.now());
		let cusec = config.cusec.unwrap_or_else(|| ctime.timestamp_subsec_micros() as i32);
		let checksum = match config.checksum {
			Some(checksum) => checksum,
			None => self.build_tgs_body_checksum(None)?
		};
		let subkey = match config.subkey {
			Some(subkey) => subkey,
			None => self.build_subkey(SubkeyConfig::default())?
		};

		let mut authenticator = Authenticator::default();
		authenticator.authenticator_vno = PVNO;
		authenticator.crealm = config.realm.unwrap_or_default();
		authenticator.cname = config.cname.unwrap_or_else(|| PrincipalName {
			name_type: NT_PRINCIPAL,
			name_string: vec![String::new()]
		});
		authenticator.cksum = Some(checksum);
		authenticator.cusec = cusec;
		authenticator.ctime = ctime.into();
		authenticator.subkey = Some(subkey);
		authenticator.seq_number = config.seq_number;

		debug!(crealm = %authenticator.crealm, %ctime, cusec, "built authenticator");
		Ok(authenticator)
	}
}
