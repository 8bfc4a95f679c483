//! SS58 address encoding/decoding utilities.
//!
//! SS58 is the address format used by Substrate-based chains including Torus.

use crate::config::SS58_FORMAT;
use crate::errors::{InvalidAddress, TorusResult};
use sp_core::crypto::{AccountId32, Ss58AddressFormat, Ss58Codec};

/// Encode a 32-byte public key to an SS58 address
pub fn ss58_encode(public_key: &[u8; 32]) -> String {
    let account = AccountId32::from(*public_key);
    account.to_ss58check_with_version(Ss58AddressFormat::custom(SS58_FORMAT))
}

/// Decode an SS58 address to a 32-byte public key
pub fn ss58_decode(address: &str) -> TorusResult<[u8; 32]> {
    let account = AccountId32::from_ss58check(address)
        .map_err(|e| InvalidAddress::new(address, format!("{:?}", e)))?;
    Ok(account.into())
}

/// Check if a string is a valid SS58 address
pub fn is_valid_ss58_address(address: &str) -> bool {
    AccountId32::from_ss58check(address).is_ok()
}

/// Convert bytes to AccountId32
pub fn bytes_to_account(bytes: &[u8]) -> TorusResult<AccountId32> {
    if bytes.len() != 32 {
        return Err(InvalidAddress::new(
            hex::encode(bytes),
            format!("invalid public key length: expected 32, got {}", bytes.len()),
        )
        .into());
    }
    let mut arr = [0u8; 32];
    arr.copy_from_slice(bytes);
    Ok(AccountId32::from(arr))
}

/// Convert a hex string (with or without 0x prefix) to an SS58 address
pub fn hex_to_ss58(hex_str: &str) -> TorusResult<String> {
    let stripped = hex_str.trim_start_matches("0x");
    let bytes = hex::decode(stripped)
        .map_err(|e| InvalidAddress::new(hex_str, format!("invalid hex: {}", e)))?;
    let account = bytes_to_account(&bytes)?;
    Ok(account.to_ss58check_with_version(Ss58AddressFormat::custom(SS58_FORMAT)))
}
