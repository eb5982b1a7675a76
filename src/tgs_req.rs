use crate::ap_req::ApReqConfig;
use crate::auth_data::AuthDataConfig;
use crate::authenticator::AuthenticatorConfig;
use crate::error::Result;
use crate::kdc_req::{KdcRequestBuilder,ReqBodyConfig};
use crate::pa_data;
use crate::subkey::SubkeyConfig;

use kerberos_asn1::ApReq;
use kerberos_asn1::Authenticator;
use kerberos_asn1::AuthorizationData;
use kerberos_asn1::Checksum;
use kerberos_asn1::EncryptionKey;
use kerberos_asn1::PaData;
use kerberos_asn1::TgsReq;

use kerberos_constants::message_types::KRB_TGS_REQ;
use kerberos_constants::protocol_version::PVNO;

use tracing::{debug,info};

/// Inputs for [`KdcRequestBuilder::build_tgs_request`]. Any pre-built artifact
/// replaces the stage that would otherwise build it.
#[derive(Debug, Clone, Default)]
pub struct TgsReqConfig {
	/// Pre-built subkey. Generated from `subkey_config` when absent.
	pub subkey: Option<EncryptionKey>,
	pub subkey_config: SubkeyConfig,
	/// Plain authorization data, encrypted under the subkey. Ignored when
	/// `body.enc_auth_data` is already set.
	pub auth_data: Option<AuthorizationData>,
	pub body: ReqBodyConfig,
	/// Pre-built checksum. Computed over the request body when absent.
	pub checksum: Option<Checksum>,
	pub authenticator: Option<Authenticator>,
	/// Unset checksum and subkey are filled with the resolved ones, unset
	/// client name and realm with the body's. Values set here are kept, so an
	/// authenticator subkey distinct from the authorization data's is possible.
	pub authenticator_config: AuthenticatorConfig,
	/// Pre-built AP-REQ. No ticket is needed when this is set.
	pub ap_req: Option<ApReq>,
	/// An unset authenticator is filled with the resolved one.
	pub ap_req_config: ApReqConfig,
	/// Extra PA-DATA sent after the PA-TGS-REQ, in this order.
	pub pa_data: Vec<PaData>
}

// TGSREQ

impl KdcRequestBuilder {
	/// Build a complete TGS-REQ. Nothing is returned unless every stage
	/// succeeds.
	pub fn build_tgs_request(&mut self, config : TgsReqConfig) -> Result<TgsReq> {
		let TgsReqConfig {
			subkey,
			subkey_config,
			auth_data,
			mut body,
			checksum,
			authenticator,
			mut authenticator_config,
			ap_req,
			mut ap_req_config,
			pa_data: extra_pa_data
		} = config;

		// Resolve the subkey shared by the authorization data and the authenticator.
		let subkey = match subkey {
			Some(subkey) => subkey,
			None => self.build_subkey(subkey_config)?
		};

		// Encrypt the authorization data, unless it came pre-encrypted.
		if body.enc_auth_data.is_none() {
			if let Some(auth_data) = auth_data {
				body.enc_auth_data = Some(self.build_enc_auth_data(AuthDataConfig {
					auth_data: Some(auth_data),
					subkey: Some(subkey.clone())
				})?);
			}
		}

		// The authenticator names the same client as the body unless told otherwise.
		if authenticator_config.cname.is_none() {
			authenticator_config.cname = body.cname.clone();
		}
		if authenticator_config.realm.is_none() {
			authenticator_config.realm = body.realm.clone();
		}

		let body = self.build_tgs_request_body(body);

		// The checksum must cover the body exactly as it is sent.
		let checksum = match checksum {
			Some(checksum) => checksum,
			None => self.build_tgs_body_checksum(Some(&body))?
		};

		let ap_req = match ap_req {
			Some(ap_req) => ap_req,
			None => {
				let authenticator = match authenticator.or_else(|| ap_req_config.authenticator.take()) {
					Some(authenticator) => authenticator,
					None => {
						authenticator_config.checksum.get_or_insert(checksum);
						authenticator_config.subkey.get_or_insert(subkey);
						self.build_authenticator(authenticator_config)?
					}
				};
				ap_req_config.authenticator = Some(authenticator);
				self.build_ap_req(ap_req_config)?
			}
		};

		// PA-TGS-REQ always goes first.
		let mut padata = Vec::with_capacity(1 + extra_pa_data.len());
		padata.push(pa_data::new_pa_data_ap_req(&ap_req));
		padata.extend(extra_pa_data);
		debug!(entries = padata.len(), types = ?padata.iter().map(|p| p.padata_type).collect::<Vec<_>>(), "assembled PA-DATA");

		info!(realm = %body.realm, nonce = body.nonce, "built TGS-REQ");
		Ok(TgsReq {
			pvno: PVNO,
			msg_type: KRB_TGS_REQ,
			padata: Some(padata),
			req_body: body
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	use crate::codec;
	use crate::error::KdcRequestError;
	use crate::principal;

	use kerberos_asn1::{AuthorizationDataEntry,EncryptedData,KdcReqBody,Ticket};
	use kerberos_constants::etypes::{AES256_CTS_HMAC_SHA1_96,RC4_HMAC};
	use kerberos_constants::pa_data_types::{PA_PAC_REQUEST,PA_TGS_REQ};

	use chrono::{TimeZone,Utc};
	use md5::{Digest,Md5};

	fn ticket() -> Ticket {
		let mut ticket = Ticket::default();
		ticket.tkt_vno = PVNO;
		ticket.realm = "EXAMPLE.COM".to_string();
		ticket.sname = principal::krbtgt("EXAMPLE.COM");
		ticket.enc_part = EncryptedData {
			etype: RC4_HMAC,
			kvno: Some(2),
			cipher: vec![0x5c; 64]
		};
		ticket
	}

	fn session_key() -> EncryptionKey {
		EncryptionKey {
			keytype: RC4_HMAC,
			keyvalue: vec![0x9e; 16]
		}
	}

	fn builder() -> KdcRequestBuilder {
		KdcRequestBuilder::deterministic(23, Utc.with_ymd_and_hms(2023, 5, 1, 12, 0, 0).unwrap())
	}

	fn config() -> TgsReqConfig {
		TgsReqConfig {
			body: ReqBodyConfig {
				cname: Some(principal::new_nt_principal("alice")),
				realm: Some("EXAMPLE.COM".to_string()),
				..Default::default()
			},
			ap_req_config: ApReqConfig {
				ticket: Some(ticket()),
				session_key: Some(session_key()),
				..Default::default()
			},
			..Default::default()
		}
	}

	fn ap_req_of(req : &TgsReq) -> ApReq {
		let padata = req.padata.as_ref().unwrap();
		assert_eq!(padata[0].padata_type, PA_TGS_REQ);
		codec::decode(&padata[0].padata_value).unwrap()
	}

	#[test]
	fn missing_ticket_fails() {
		let mut config = config();
		config.ap_req_config.ticket = None;
		let err = builder().build_tgs_request(config).unwrap_err();
		assert!(matches!(err, KdcRequestError::MissingField("ticket")));
	}

	#[test]
	fn prebuilt_ap_req_needs_no_ticket_config() {
		let mut builder = builder();
		let ap_req = builder.build_ap_req(ApReqConfig {
			ticket: Some(ticket()),
			session_key: Some(session_key()),
			..Default::default()
		}).unwrap();

		let mut config = config();
		config.ap_req_config.ticket = None;
		config.ap_req = Some(ap_req.clone());
		let req = builder.build_tgs_request(config).unwrap();
		assert_eq!(codec::encode(&ap_req_of(&req)), codec::encode(&ap_req));
	}

	#[test]
	fn authenticator_binds_body_and_subkey() {
		let mut builder = builder();
		let subkey = EncryptionKey {
			keytype: AES256_CTS_HMAC_SHA1_96,
			keyvalue: vec![0x21; 32]
		};
		let mut config = config();
		config.subkey = Some(subkey.clone());

		let req = builder.build_tgs_request(config).unwrap();
		let authenticator = builder.decrypt_authenticator(&ap_req_of(&req), &session_key()).unwrap();

		let embedded = authenticator.subkey.unwrap();
		assert_eq!(embedded.keytype, AES256_CTS_HMAC_SHA1_96);
		assert_eq!(embedded.keyvalue, subkey.keyvalue);

		let cksum = authenticator.cksum.unwrap();
		assert_eq!(cksum.cksumtype, 7);
		assert_eq!(cksum.checksum, Md5::digest(codec::encode(&req.req_body)).to_vec());

		// Client identity follows the body.
		assert_eq!(authenticator.crealm, "EXAMPLE.COM");
		assert_eq!(authenticator.cname.name_string, vec!["alice".to_string()]);
	}

	#[test]
	fn checksum_survives_wire_encoding() {
		let mut builder = builder();
		let req = builder.build_tgs_request(config()).unwrap();
		let wire : TgsReq = codec::decode(&codec::encode(&req)).unwrap();

		let authenticator = builder.decrypt_authenticator(&ap_req_of(&wire), &session_key()).unwrap();
		let recomputed = builder.build_tgs_body_checksum(Some(&wire.req_body)).unwrap();
		assert_eq!(authenticator.cksum.unwrap().checksum, recomputed.checksum);
	}

	#[test]
	fn auth_data_uses_the_authenticator_subkey() {
		let mut builder = builder();
		let mut config = config();
		config.auth_data = Some(vec![AuthorizationDataEntry {
			ad_type: 1,
			ad_data: vec![1, 2, 3, 4]
		}]);

		let req = builder.build_tgs_request(config).unwrap();
		let authenticator = builder.decrypt_authenticator(&ap_req_of(&req), &session_key()).unwrap();
		let subkey = authenticator.subkey.unwrap();

		let enc = req.req_body.enc_authorization_data.as_ref().unwrap();
		assert_eq!(enc.etype, subkey.keytype);
		let auth_data = builder.decrypt_enc_auth_data(enc, &subkey).unwrap();
		assert_eq!(auth_data[0].ad_data, vec![1, 2, 3, 4]);
	}

	#[test]
	fn pre_encrypted_auth_data_passes_through() {
		let enc = EncryptedData {
			etype: RC4_HMAC,
			kvno: None,
			cipher: vec![0xee; 40]
		};
		let mut config = config();
		config.body.enc_auth_data = Some(enc.clone());
		config.auth_data = Some(vec![AuthorizationDataEntry { ad_type: 1, ad_data: vec![9] }]);

		let req = builder().build_tgs_request(config).unwrap();
		assert_eq!(req.req_body.enc_authorization_data.unwrap().cipher, enc.cipher);
	}

	#[test]
	fn no_auth_data_leaves_field_empty() {
		let req = builder().build_tgs_request(config()).unwrap();
		assert!(req.req_body.enc_authorization_data.is_none());
	}

	#[test]
	fn extra_pa_data_follows_in_order() {
		let mut config = config();
		config.pa_data = vec![
			PaData::new(PA_PAC_REQUEST, vec![1]),
			PaData::new(129, vec![2]),
			PaData::new(PA_PAC_REQUEST, vec![3]),
		];
		let req = builder().build_tgs_request(config).unwrap();
		let padata = req.padata.unwrap();

		assert_eq!(padata.len(), 4);
		assert_eq!(padata[0].padata_type, PA_TGS_REQ);
		let rest : Vec<(i32, Vec<u8>)> = padata[1..].iter()
			.map(|p| (p.padata_type, p.padata_value.clone()))
			.collect();
		assert_eq!(rest, vec![(PA_PAC_REQUEST, vec![1]), (129, vec![2]), (PA_PAC_REQUEST, vec![3])]);
	}

	#[test]
	fn distinct_authenticator_subkey_is_kept() {
		let mut builder = builder();
		let mut config = config();
		config.subkey = Some(EncryptionKey { keytype: RC4_HMAC, keyvalue: vec![0x11; 16] });
		config.authenticator_config.subkey = Some(EncryptionKey { keytype: RC4_HMAC, keyvalue: vec![0x22; 16] });
		config.auth_data = Some(vec![AuthorizationDataEntry { ad_type: 1, ad_data: vec![7] }]);

		let req = builder.build_tgs_request(config).unwrap();
		let authenticator = builder.decrypt_authenticator(&ap_req_of(&req), &session_key()).unwrap();
		assert_eq!(authenticator.subkey.unwrap().keyvalue, vec![0x22; 16]);

		// The authorization data stays under the request subkey.
		let enc = req.req_body.enc_authorization_data.as_ref().unwrap();
		let subkey = EncryptionKey { keytype: RC4_HMAC, keyvalue: vec![0x11; 16] };
		assert_eq!(builder.decrypt_enc_auth_data(enc, &subkey).unwrap()[0].ad_data, vec![7]);
	}

	#[test]
	fn authenticator_config_checksum_is_kept() {
		let mut builder = builder();
		let mut config = config();
		config.authenticator_config.checksum = Some(Checksum { cksumtype: 7, checksum: vec![0xcc; 16] });

		let req = builder.build_tgs_request(config).unwrap();
		let authenticator = builder.decrypt_authenticator(&ap_req_of(&req), &session_key()).unwrap();
		assert_eq!(authenticator.cksum.unwrap().checksum, vec![0xcc; 16]);
	}

	#[test]
	fn ap_req_config_authenticator_is_kept() {
		let mut builder = builder();
		let authenticator = builder.build_authenticator(AuthenticatorConfig {
			realm: Some("OTHER.REALM".to_string()),
			..Default::default()
		}).unwrap();
		let mut config = config();
		config.ap_req_config.authenticator = Some(authenticator);

		let req = builder.build_tgs_request(config).unwrap();
		let decrypted = builder.decrypt_authenticator(&ap_req_of(&req), &session_key()).unwrap();
		assert_eq!(decrypted.crealm, "OTHER.REALM");
	}

	#[test]
	fn overridden_checksum_is_used_verbatim() {
		let mut builder = builder();
		let mut config = config();
		config.checksum = Some(Checksum { cksumtype: 7, checksum: vec![0; 16] });

		let req = builder.build_tgs_request(config).unwrap();
		let authenticator = builder.decrypt_authenticator(&ap_req_of(&req), &session_key()).unwrap();
		assert_eq!(authenticator.cksum.unwrap().checksum, vec![0; 16]);
	}

	#[test]
	fn deterministic_builders_agree() {
		// Ciphertexts carry a random confounder; the body and keys do not.
		let mut first = builder();
		let mut second = builder();
		let a = first.build_tgs_request(config()).unwrap();
		let b = second.build_tgs_request(config()).unwrap();
		assert_eq!(codec::encode(&a.req_body), codec::encode(&b.req_body));

		let a = first.decrypt_authenticator(&ap_req_of(&a), &session_key()).unwrap();
		let b = second.decrypt_authenticator(&ap_req_of(&b), &session_key()).unwrap();
		assert_eq!(a.subkey.unwrap().keyvalue, b.subkey.unwrap().keyvalue);
	}

	#[test]
	fn body_is_sent_unchanged() {
		let mut builder = builder();
		let req = builder.build_tgs_request(config()).unwrap();
		let body : &KdcReqBody = &req.req_body;
		assert_eq!(req.pvno, 5);
		assert_eq!(req.msg_type, KRB_TGS_REQ);
		assert_eq!(body.realm, "EXAMPLE.COM");
		assert_eq!(principal::principal_to_string(body.sname.as_ref().unwrap()), "krbtgt/EXAMPLE.COM");
	}
}
