use crate::error::{KdcRequestError, Result};

use kerberos_asn1::EncryptionKey;

use kerberos_crypto::KerberosCipher;

use kerberos_constants::etypes::{AES128_CTS_HMAC_SHA1_96,AES256_CTS_HMAC_SHA1_96,RC4_HMAC};

use md5::{Digest,Md5};

/// Unkeyed RSA-MD5 checksum (RFC 3961 §6.1.3).
pub const RSA_MD5 : i32 = 7;

/// The cryptographic operations request construction relies on, keyed by
/// enctype and checksum-type identifiers.
pub trait KerberosCrypto : Send + Sync {
	/// Byte length of a raw key for `etype`.
	fn key_size(&self, etype : i32) -> Result<usize>;

	fn encrypt(&self, key : &EncryptionKey, key_usage : i32, plaintext : &[u8]) -> Result<Vec<u8>>;

	fn decrypt(&self, key : &EncryptionKey, key_usage : i32, ciphertext : &[u8]) -> Result<Vec<u8>>;

	fn checksum(&self, cksumtype : i32, data : &[u8]) -> Result<Vec<u8>>;
}

/// Backed by `kerberos_crypto` ciphers (RC4-HMAC, AES128/256-CTS-HMAC-SHA1-96)
/// and RSA-MD5 for request body checksums.
#[derive(Default)]
pub struct StandardCrypto;

impl StandardCrypto {
	fn cipher(&self, etype : i32) -> Result<Box<dyn KerberosCipher>> {
		kerberos_crypto::new_kerberos_cipher(etype).map_err(|_| KdcRequestError::UnsupportedEtype(etype))
	}
}

impl KerberosCrypto for StandardCrypto {
	fn key_size(&self, etype : i32) -> Result<usize> {
		match etype {
			RC4_HMAC => Ok(16),
			AES128_CTS_HMAC_SHA1_96 => Ok(16),
			AES256_CTS_HMAC_SHA1_96 => Ok(32),
			unknown => Err(KdcRequestError::UnsupportedEtype(unknown))
		}
	}

	fn encrypt(&self, key : &EncryptionKey, key_usage : i32, plaintext : &[u8]) -> Result<Vec<u8>> {
		let cipher = self.cipher(key.keytype)?;
		Ok(cipher.encrypt(&key.keyvalue, key_usage, plaintext))
	}

	fn decrypt(&self, key : &EncryptionKey, key_usage : i32, ciphertext : &[u8]) -> Result<Vec<u8>> {
		let cipher = self.cipher(key.keytype)?;
		cipher.decrypt(&key.keyvalue, key_usage, ciphertext).map_err(KdcRequestError::Crypto)
	}

	fn checksum(&self, cksumtype : i32, data : &[u8]) -> Result<Vec<u8>> {
		match cksumtype {
			RSA_MD5 => Ok(Md5::digest(data).to_vec()),
			unknown => Err(KdcRequestError::UnsupportedChecksum(unknown))
		}
	}
}
