//! Blocking TCP transport to a KDC (RFC 4120 §7.2.2). Replies are returned raw.

use crate::codec;
use crate::error::Result;

use std::io;
use std::io::Read;
use std::io::Write;
use std::net::TcpStream;

use kerberos_asn1::TgsReq;

use tracing::debug;

/// Largest reply accepted from a KDC. Real replies are a few kilobytes, PACs included.
pub const MAX_REPLY_LEN : u32 = 1 << 20;

/// The top bit of the record length is reserved (RFC 4120 §7.2.2).
const RESERVED_LENGTH_BIT : u32 = 0x8000_0000;

pub fn pack_request(raw : &[u8]) -> Vec<u8> {
	// Each TCP record is the DER message behind its 4-byte big-endian length.
	let mut request : Vec<u8> = Vec::with_capacity(raw.len() + 4);
	request.extend_from_slice(&(raw.len() as u32).to_be_bytes());
	request.extend_from_slice(raw);
	request
}

pub fn read_response(conn : &mut impl Read) -> Result<Vec<u8>> {
	let mut header : [u8;4] = [0;4];
	conn.read_exact(&mut header)?;
	let len = u32::from_be_bytes(header);

	if len & RESERVED_LENGTH_BIT != 0 {
		return Err(io::Error::new(io::ErrorKind::InvalidData, "reserved bit set in KDC record length").into());
	}
	if len > MAX_REPLY_LEN {
		return Err(io::Error::new(io::ErrorKind::InvalidData, format!("KDC record of {} bytes exceeds {}", len, MAX_REPLY_LEN)).into());
	}

	// Grow with the bytes that actually arrive rather than the announced length.
	let mut resp : Vec<u8> = Vec::new();
	conn.by_ref().take(len as u64).read_to_end(&mut resp)?;
	if resp.len() != len as usize {
		return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "KDC record truncated").into());
	}
	Ok(resp)
}

pub fn send_request(server : &str, request : &[u8]) -> Result<Vec<u8>> {
	let mut conn = TcpStream::connect(server)?;

	conn.write_all(&pack_request(request))?;
	debug!(server, len = request.len(), "sent request");

	let resp = read_response(&mut conn)?;
	debug!(server, len = resp.len(), "received reply");
	Ok(resp)
}

pub fn send_tgs_request(server : &str, tgs_req : &TgsReq) -> Result<Vec<u8>> {
	send_request(server, &codec::encode(tgs_req))
}
