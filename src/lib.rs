//! Construction of Kerberos TGS-REQ messages (RFC 4120 §3.3).
//!
//! The request body, its checksum, the authenticator, the AP-REQ and the final
//! KDC request are each built by a method on [`KdcRequestBuilder`]. Every stage
//! accepts a pre-built artifact in place of building its own.

pub mod ap_req;
pub mod auth_data;
pub mod authenticator;
pub mod checksum;
pub mod clock;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod kdc_req;
pub mod net;
pub mod pa_data;
pub mod principal;
pub mod subkey;
pub mod tgs_req;
pub mod ticket;

pub use ap_req::ApReqConfig;
pub use auth_data::AuthDataConfig;
pub use authenticator::AuthenticatorConfig;
pub use clock::{Clock, FixedClock, SystemClock};
pub use crypto::{KerberosCrypto, StandardCrypto};
pub use error::{KdcRequestError, Result};
pub use kdc_req::{KdcRequestBuilder, ReqBodyConfig};
pub use subkey::SubkeyConfig;
pub use tgs_req::TgsReqConfig;
pub use ticket::KerberosTicket;
