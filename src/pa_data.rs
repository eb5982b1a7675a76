//! Constructors for the PA-DATA entries a TGS-REQ may carry after its
//! mandatory PA-TGS-REQ.

use crate::codec;
use crate::principal;

use kerberos_asn1::ApReq;
use kerberos_asn1::EncryptionKey;
use kerberos_asn1::KerbPaPacRequest;
use kerberos_asn1::PaData;
use kerberos_asn1::PaForUser;
use kerberos_asn1::PaPacOptions;

use kerberos_constants::checksum_types::HMAC_MD5;
use kerberos_constants::key_usages::KEY_USAGE_KERB_NON_KERB_CKSUM_SALT;
use kerberos_constants::pa_data_types::{PA_FOR_USER,PA_PAC_OPTIONS,PA_PAC_REQUEST,PA_TGS_REQ};

/// PA-TGS-REQ carrying an encoded AP-REQ.
pub fn new_pa_data_ap_req(ap_req : &ApReq) -> PaData {
	PaData::new(PA_TGS_REQ, codec::encode(ap_req))
}

/// PA-PAC-REQUEST asking the KDC to include (or omit) a PAC.
pub fn new_pa_data_pac_request(include_pac : bool) -> PaData {
	PaData::new(PA_PAC_REQUEST, codec::encode(&KerbPaPacRequest::new(include_pac)))
}

/// PA-PAC-OPTIONS, e.g. resource-based constrained delegation for S4U2Proxy.
pub fn new_pa_data_pac_options(pac_options : u32) -> PaData {
	let pac_options = PaPacOptions {
		kerberos_flags: pac_options.into()
	};
	PaData::new(PA_PAC_OPTIONS, codec::encode(&pac_options))
}

/// PA-FOR-USER naming the user to impersonate in an S4U2Self request.
///
/// The checksum is HMAC-MD5 keyed with the TGT session key over the name
/// type (little endian), the user name, the realm and the auth package.
pub fn new_pa_data_pa_for_user(username : &str, userrealm : &str, session_key : &EncryptionKey) -> PaData {
	let mut pa_for_user = PaForUser::default();
	pa_for_user.username = principal::new_nt_principal(username);
	pa_for_user.userrealm = userrealm.to_string();
	pa_for_user.auth_package = "Kerberos".to_string();

	let mut ck_value = pa_for_user.username.name_type.to_le_bytes().to_vec();
	for part in &pa_for_user.username.name_string {
		ck_value.extend_from_slice(part.as_bytes());
	}
	ck_value.extend_from_slice(pa_for_user.userrealm.as_bytes());
	ck_value.extend_from_slice(pa_for_user.auth_package.as_bytes());

	pa_for_user.cksum.cksumtype = HMAC_MD5;
	pa_for_user.cksum.checksum = kerberos_crypto::checksum_hmac_md5(
		&session_key.keyvalue,
		KEY_USAGE_KERB_NON_KERB_CKSUM_SALT,
		&ck_value
	);

	PaData::new(PA_FOR_USER, codec::encode(&pa_for_user))
}
