use crate::clock::{Clock,FixedClock,SystemClock,kerberos_epoch};
use crate::crypto::{KerberosCrypto,StandardCrypto};
use crate::principal;

use kerberos_asn1::KdcReqBody;
use kerberos_asn1::EncryptedData;
use kerberos_asn1::PrincipalName;
use kerberos_asn1::Ticket;

use kerberos_constants::kdc_options::{FORWARDABLE,PROXIABLE,RENEWABLE};
use kerberos_constants::etypes::RC4_HMAC;
use kerberos_constants::principal_names::NT_PRINCIPAL;

use chrono::DateTime;
use chrono::Utc;

use rand::Rng;
use rand::RngCore;
use rand::SeedableRng;
use rand::rngs::{OsRng,StdRng};

use tracing::debug;

/// Forwardable | Proxiable | Renewable
pub const DEFAULT_KDC_OPTIONS : u32 = FORWARDABLE | PROXIABLE | RENEWABLE;

/// Builds the pieces of a TGS-REQ and the request itself.
///
/// The builder owns its crypto backend, clock and random source, so
/// independent builders never share state and can run on separate threads.
pub struct KdcRequestBuilder {
	pub(crate) crypto: Box<dyn KerberosCrypto>,
	pub(crate) clock: Box<dyn Clock>,
	pub(crate) rng: Box<dyn RngCore + Send>
}

impl KdcRequestBuilder {
	/// Production builder: `kerberos_crypto` ciphers, the system clock and
	/// the operating system's random source.
	pub fn new() -> Self {
		Self {
			crypto: Box::new(StandardCrypto),
			clock: Box::new(SystemClock),
			rng: Box::new(OsRng)
		}
	}

	/// Reproducible builder for test vectors: a seeded generator and a
	/// clock frozen at `now`. Never use it for requests sent to a real KDC.
	pub fn deterministic(seed : u64, now : DateTime<Utc>) -> Self {
		Self {
			crypto: Box::new(StandardCrypto),
			clock: Box::new(FixedClock(now)),
			rng: Box::new(StdRng::seed_from_u64(seed))
		}
	}

	pub fn with_crypto(mut self, crypto : impl KerberosCrypto + 'static) -> Self {
		self.crypto = Box::new(crypto);
		self
	}

	pub fn with_clock(mut self, clock : impl Clock + 'static) -> Self {
		self.clock = Box::new(clock);
		self
	}

	pub fn with_rng(mut self, rng : impl RngCore + Send + 'static) -> Self {
		self.rng = Box::new(rng);
		self
	}
}

impl Default for KdcRequestBuilder {
	fn default() -> Self {
		Self::new()
	}
}

/// Inputs for [`KdcRequestBuilder::build_tgs_request_body`].
#[derive(Debug, Clone, Default)]
pub struct ReqBodyConfig {
	/// KDC options bitmask. Defaults to [`DEFAULT_KDC_OPTIONS`].
	pub options: Option<u32>,
	/// Requested start time. Defaults to the epoch sentinel.
	pub from: Option<DateTime<Utc>>,
	/// Requested end time. Defaults to the epoch sentinel.
	pub till: Option<DateTime<Utc>>,
	/// Requested renew-till time. Defaults to the epoch sentinel.
	pub rtime: Option<DateTime<Utc>>,
	/// Defaults to a random value below 1,000,000.
	pub nonce: Option<u32>,
	/// Acceptable enctypes, in preference order. Defaults to `[RC4_HMAC]`.
	pub etypes: Option<Vec<i32>>,
	/// Defaults to an empty NT-PRINCIPAL name.
	pub cname: Option<PrincipalName>,
	/// Defaults to the empty realm.
	pub realm: Option<String>,
	/// Defaults to "krbtgt/REALM".
	pub sname: Option<PrincipalName>,
	pub enc_auth_data: Option<EncryptedData>,
	/// Evidence tickets, as used by S4U2Proxy.
	pub additional_tickets: Option<Vec<Ticket>>
}

// Helper functions for KdcReqBody

impl KdcRequestBuilder {
	fn generate_nonce(&mut self) -> u32 {
		// Six decimal digits.
		self.rng.gen_range(0..1_000_000)
	}
}

// TGSREQ body

impl KdcRequestBuilder {
	/// Assemble an unencrypted TGS request body. Principal names and the realm
	/// are passed through unvalidated.
	pub fn build_tgs_request_body(&mut self, config : ReqBodyConfig) -> KdcReqBody {
		let mut body = KdcReqBody::default();

		// Set KDC options.
		body.kdc_options = config.options.unwrap_or(DEFAULT_KDC_OPTIONS).into();

		// Set realm and principals.
		let realm = config.realm.unwrap_or_default();
		body.cname = Some(config.cname.unwrap_or_else(|| PrincipalName {
			name_type: NT_PRINCIPAL,
			name_string: vec![String::new()]
		}));
		body.sname = Some(config.sname.unwrap_or_else(|| principal::krbtgt(&realm)));
		body.realm = realm;

		// Leave the ticket lifetime to the KDC unless told otherwise.
		body.from = Some(config.from.unwrap_or_else(kerberos_epoch).into());
		body.till = config.till.unwrap_or_else(kerberos_epoch).into();
		body.rtime = Some(config.rtime.unwrap_or_else(kerberos_epoch).into());

		body.nonce = match config.nonce {
			Some(nonce) => nonce,
			None => self.generate_nonce()
		};
		body.etypes = config.etypes.unwrap_or_else(|| vec![RC4_HMAC]);

		body.enc_authorization_data = config.enc_auth_data;
		body.additional_tickets = config.additional_tickets;

		debug!(
			realm = %body.realm,
			sname = ?body.sname.as_ref().map(principal::principal_to_string),
			nonce = body.nonce,
			etypes = ?body.etypes,
			"built TGS request body"
		);
		body
	}
}
