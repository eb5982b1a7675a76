use crate::codec;
use crate::error::{KdcRequestError, Result};

use kerberos_asn1::Ticket;
use kerberos_asn1::EncryptionKey;
use kerberos_asn1::EncKrbCredPart;
use kerberos_asn1::KrbCred;
use kerberos_asn1::PrincipalName;

use kerberos_constants::etypes::NO_ENCRYPTION;

/// Represents a kerberos ticket together with the session key required to use it.

#[derive(Debug)]
pub struct KerberosTicket {
	pub ticket : Ticket,
	pub session_key : EncryptionKey,
	pub client : Option<PrincipalName>,
	pub realm : Option<String>
}

// Constructors

impl KerberosTicket {
	pub fn new(ticket : Ticket, session_key : EncryptionKey) -> Self {
		Self {
			ticket,
			session_key,
			client: None,
			realm: None
		}
	}

	/// Load the first ticket of a KRB-CRED (KIRBI) blob whose enc-part is unencrypted.
	pub fn from_kirbi(raw : &[u8]) -> Result<KerberosTicket> {
		let krb_cred : KrbCred = codec::decode(raw)?;
		if krb_cred.enc_part.etype != NO_ENCRYPTION {
			return Err(KdcRequestError::InvalidCredential(format!("KRB-CRED enc-part is encrypted (etype {})", krb_cred.enc_part.etype)));
		}

		// The credential info carries the session key for each ticket, in order.
		let enc_part : EncKrbCredPart = codec::decode(&krb_cred.enc_part.cipher)?;
		let info = match enc_part.ticket_info.into_iter().next() {
			Some(info) => info,
			None => return Err(KdcRequestError::InvalidCredential("KRB-CRED holds no ticket info".to_string()))
		};
		let ticket = match krb_cred.tickets.into_iter().next() {
			Some(ticket) => ticket,
			None => return Err(KdcRequestError::InvalidCredential("KRB-CRED holds no ticket".to_string()))
		};

		Ok(KerberosTicket {
			ticket,
			session_key: info.key,
			client: info.pname,
			realm: info.prealm
		})
	}
}

// Methods

impl KerberosTicket {
	pub fn get_session_key(&self) -> EncryptionKey {
		self.session_key.clone()
	}
}
