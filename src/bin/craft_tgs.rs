use tgsreq::codec;
use tgsreq::principal;
use tgsreq::{ApReqConfig,KdcRequestBuilder,KerberosTicket,ReqBodyConfig,SubkeyConfig,TgsReqConfig};

use kerberos_constants::etypes::{AES128_CTS_HMAC_SHA1_96,AES256_CTS_HMAC_SHA1_96,RC4_HMAC};

use clap::Command;
use clap::arg;
use clap::value_parser;

/// A tool to craft a TGS-REQ from a TGT in KIRBI format, and optionally send it to the KDC.

fn parse_etype(name : &str) -> Option<i32> {
	match name {
		"rc4" => Some(RC4_HMAC),
		"aes128" => Some(AES128_CTS_HMAC_SHA1_96),
		"aes256" => Some(AES256_CTS_HMAC_SHA1_96),
		_ => None
	}
}

fn main() {
	let _ = tracing_subscriber::fmt::try_init();

	let matches = Command::new("CraftTgs")
		.about("A tool to craft a TGS-REQ from a TGT in KIRBI format, and optionally send it to the KDC.")
		.arg(arg!(--ticket <PATH>).short('t').required(true).help("TGT to use, in KIRBI format."))
		.arg(arg!(--spn <SPN>).short('S').required(true).help("Service principal name to request a ticket for."))
		.arg(arg!(--domain <DOMAIN>).short('d').required(false).help("Realm to send in the request, if different from the ticket's."))
		.arg(arg!(--user <USER>).short('u').required(false).help("Client name to send in the request, if different from the ticket's."))
		.arg(arg!(--etype <ETYPE>).short('e').required(false).help("Subkey and requested encryption type: rc4, aes128 or aes256 (default rc4)."))
		.arg(arg!(--subkey <HEX>).required(false).help("Subkey value, in hex. Random if omitted."))
		.arg(arg!(--outfile <PATH>).short('O').required(true).help("Path to write the DER request to, or the raw reply when --kdc is given."))
		.arg(arg!(--kdc <HOST>).short('K').required(false).help("IP address or hostname of the KDC to send the request to."))
		.arg(arg!(--port <PORT>).short('P').required(false).value_parser(value_parser!(u16)).help("Port number to use for the KDC, if different from the default port."))
		.get_matches();

	let ticket_path = matches.get_one::<String>("ticket").unwrap();
	let spn = matches.get_one::<String>("spn").unwrap();
	let path = matches.get_one::<String>("outfile").unwrap();
	let port = matches.get_one::<u16>("port").copied().unwrap_or(88);

	// Load the TGT and its session key.
	let raw = match std::fs::read(ticket_path) {
		Ok(raw) => raw,
		Err(e) => {
			println!("[-] Failed to read '{}': {}", ticket_path, e);
			return;
		}
	};
	let tgt = match KerberosTicket::from_kirbi(&raw) {
		Ok(tgt) => tgt,
		Err(e) => {
			println!("[-] Failed to load the TGT: {}", e);
			return;
		}
	};

	let realm = match matches.get_one::<String>("domain") {
		Some(domain) => domain.to_ascii_uppercase(),
		None => tgt.realm.clone().unwrap_or_else(|| tgt.ticket.realm.clone())
	};
	let cname = match matches.get_one::<String>("user") {
		Some(user) => Some(principal::new_nt_principal(user)),
		None => tgt.client.clone()
	};

	let etype = match matches.get_one::<String>("etype") {
		Some(name) => match parse_etype(name) {
			Some(etype) => etype,
			None => {
				println!("[-] Unknown encryption type '{}'.", name);
				return;
			}
		},
		None => RC4_HMAC
	};
	let subkey_value = match matches.get_one::<String>("subkey") {
		Some(hex_str) => match hex::decode(hex_str) {
			Ok(value) => Some(value),
			Err(e) => {
				println!("[-] Failed to decode subkey: {}", e);
				return;
			}
		},
		None => None
	};

	// Build the TGSREQ.
	let config = TgsReqConfig {
		subkey_config: SubkeyConfig {
			etype: Some(etype),
			value: subkey_value
		},
		body: ReqBodyConfig {
			cname,
			realm: Some(realm.clone()),
			sname: Some(principal::new_nt_srv_inst(spn)),
			etypes: Some(vec![etype]),
			..Default::default()
		},
		ap_req_config: ApReqConfig {
			ticket: Some(tgt.ticket.clone()),
			session_key: Some(tgt.get_session_key()),
			..Default::default()
		},
		..Default::default()
	};
	let mut builder = KdcRequestBuilder::new();
	let tgs_req = match builder.build_tgs_request(config) {
		Ok(tgs_req) => tgs_req,
		Err(e) => {
			println!("[-] Failed to build the TGSREQ: {}", e);
			return;
		}
	};
	println!("[+] Built TGSREQ for '{}' in {}", spn, realm);

	let output = match matches.get_one::<String>("kdc") {
		Some(server) => {
			println!("[+] Sending TGSREQ...");
			match tgsreq::net::send_tgs_request(&format!("{}:{}", server, port), &tgs_req) {
				Ok(reply) => {
					println!("[+] Received {} bytes in reply.", reply.len());
					reply
				},
				Err(e) => {
					println!("[-] Failed to send TGSREQ: {}", e);
					return;
				}
			}
		},
		None => codec::encode(&tgs_req)
	};

	if let Err(e) = std::fs::write(path, output) {
		println!("[-] Failed to write '{}': {}", path, e);
		return;
	}
	println!("[!] Written to '{}'", path);
}
