use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};

use crate::error::TypeError;

/// Base58 alphabet used by ledger addresses.
const ALPHABET: &[u8; 58] = b"rpshnaf39wBUDNEGHJKLM4PQRST7VWXYZ2bcdeCg65jkm8oFqi1tuvAxyz";

/// Token type prefixed to an account identifier before encoding.
const ACCOUNT_ID_VERSION: u8 = 0x00;

/// Longest base58 text a 25-byte payload can encode to.
const MAX_ADDRESS_LEN: usize = 35;

const INDEX: [u8; 128] = build_index();

const fn build_index() -> [u8; 128] {
    let mut table = [0xFFu8; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// 160-bit account identifier.
///
/// The textual form is a base58check address: version byte `0x00`, the 20
/// identifier bytes, and a 4-byte double SHA-256 checksum, encoded with the
/// ledger's alphabet (so every address starts with `r`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId([u8; 20]);

impl AccountId {
    /// Width of an account identifier in bytes.
    pub const LEN: usize = 20;

    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// The zero account. Its address decodes, but it never owns entries.
    pub const fn zero() -> Self {
        Self([0u8; 20])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0u8; 20]
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Encode as a base58check address.
    pub fn to_base58(&self) -> String {
        let mut payload = Vec::with_capacity(1 + Self::LEN + 4);
        payload.push(ACCOUNT_ID_VERSION);
        payload.extend_from_slice(&self.0);
        let check = checksum(&payload);
        payload.extend_from_slice(&check);
        encode_base58(&payload)
    }

    /// Decode a base58check address.
    pub fn from_base58(address: &str) -> Result<Self, TypeError> {
        let invalid = |reason: &str| TypeError::InvalidAddress(format!("{address:?}: {reason}"));

        if address.len() > MAX_ADDRESS_LEN {
            return Err(TypeError::InvalidAddress(format!(
                "{} characters, longer than any address",
                address.len()
            )));
        }
        let decoded = decode_base58(address).ok_or_else(|| invalid("not base58"))?;
        if decoded.len() != 1 + Self::LEN + 4 {
            return Err(invalid("wrong length"));
        }
        let (body, check) = decoded.split_at(1 + Self::LEN);
        if body[0] != ACCOUNT_ID_VERSION {
            return Err(invalid("wrong version"));
        }
        if checksum(body) != check {
            return Err(invalid("checksum mismatch"));
        }
        let mut bytes = [0u8; 20];
        bytes.copy_from_slice(&body[1..]);
        Ok(Self(bytes))
    }

    pub fn to_hex(&self) -> String {
        hex::encode_upper(self.0)
    }
}

fn checksum(data: &[u8]) -> [u8; 4] {
    let first = Sha256::digest(data);
    let second = Sha256::digest(first);
    let mut out = [0u8; 4];
    out.copy_from_slice(&second[..4]);
    out
}

fn encode_base58(data: &[u8]) -> String {
    let zeros = data.iter().take_while(|&&b| b == 0).count();
    // Little-endian base58 digits of the big-endian input.
    let mut digits: Vec<u8> = Vec::with_capacity(data.len() * 138 / 100 + 1);
    for &byte in &data[zeros..] {
        let mut carry = byte as u32;
        for digit in digits.iter_mut() {
            carry += (*digit as u32) << 8;
            *digit = (carry % 58) as u8;
            carry /= 58;
        }
        while carry > 0 {
            digits.push((carry % 58) as u8);
            carry /= 58;
        }
    }
    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat(ALPHABET[0] as char).take(zeros));
    out.extend(digits.iter().rev().map(|&d| ALPHABET[d as usize] as char));
    out
}

fn decode_base58(text: &str) -> Option<Vec<u8>> {
    let zeros = text.bytes().take_while(|&c| c == ALPHABET[0]).count();
    // Little-endian bytes of the decoded number.
    let mut bytes: Vec<u8> = Vec::with_capacity(text.len());
    for c in text.bytes().skip(zeros) {
        let digit = *INDEX.get(c as usize)?;
        if digit == 0xFF {
            return None;
        }
        let mut carry = digit as u32;
        for byte in bytes.iter_mut() {
            carry += (*byte as u32) * 58;
            *byte = (carry & 0xFF) as u8;
            carry >>= 8;
        }
        while carry > 0 {
            bytes.push((carry & 0xFF) as u8);
            carry >>= 8;
        }
    }
    let mut out = vec![0u8; zeros];
    out.extend(bytes.iter().rev());
    Some(out)
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_base58())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_base58())
    }
}

impl std::str::FromStr for AccountId {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_base58(s)
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_base58())
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_base58(&s).map_err(serde::de::Error::custom)
        } else {
            <[u8; 20]>::deserialize(deserializer).map(Self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GENESIS: &str = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";
    const GENESIS_HEX: &str = "B5F762798A53D543A014CAF8B297CFF8F2F937E8";

    #[test]
    fn decodes_known_address() {
        let id = AccountId::from_base58(GENESIS).unwrap();
        assert_eq!(id.to_hex(), GENESIS_HEX);
        assert_eq!(id.to_base58(), GENESIS);
    }

    #[test]
    fn zero_account_address() {
        let id = AccountId::from_base58("rrrrrrrrrrrrrrrrrrrrrhoLvTp").unwrap();
        assert!(id.is_zero());
        assert_eq!(AccountId::zero().to_base58(), "rrrrrrrrrrrrrrrrrrrrrhoLvTp");
    }

    #[test]
    fn rejects_bad_checksum() {
        // Last character altered.
        let tampered = format!("{}i", &GENESIS[..GENESIS.len() - 1]);
        assert!(AccountId::from_base58(&tampered).is_err());
    }

    #[test]
    fn rejects_characters_outside_alphabet() {
        // '0', 'O', 'I' and 'l' are not in the alphabet.
        assert!(AccountId::from_base58("r0b9CJAWyB4rj91VRWn96DkukG4bwdtyTh").is_err());
        assert!(AccountId::from_base58("rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTé").is_err());
    }

    #[test]
    fn rejects_wrong_length() {
        assert!(AccountId::from_base58("").is_err());
        assert!(AccountId::from_base58("r").is_err());
        assert!(AccountId::from_base58(&GENESIS[..20]).is_err());
    }

    #[test]
    fn rejects_overlong_address_before_decoding() {
        let long = "z".repeat(100_000);
        let start = std::time::Instant::now();
        assert!(AccountId::from_base58(&long).is_err());
        assert!(start.elapsed() < std::time::Duration::from_millis(50));
        // A valid address with leading padding is still too long.
        assert!(AccountId::from_base58(&format!("rr{GENESIS}")).is_err());
    }

    #[test]
    fn json_form_is_address() {
        let id = AccountId::from_base58(GENESIS).unwrap();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{GENESIS}\""));
        let back: AccountId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    proptest! {
        #[test]
        fn address_roundtrip(bytes in any::<[u8; 20]>()) {
            let id = AccountId::from_bytes(bytes);
            let address = id.to_base58();
            prop_assert!(address.starts_with('r'));
            prop_assert_eq!(AccountId::from_base58(&address).unwrap(), id);
        }
    }
}
