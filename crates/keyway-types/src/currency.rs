use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::TypeError;

/// Code of the native asset.
pub const NATIVE_CODE: &str = "XRP";

/// Characters allowed in a three-character currency code.
const ISO_CHARSET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789<>(){}[]|?!@#$%^&*";

/// 160-bit currency identifier.
///
/// Three-character codes occupy bytes 12..15 with every other byte zero. The
/// native asset is the all-zero value.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Currency([u8; 20]);

impl Currency {
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// The native asset.
    pub const fn native() -> Self {
        Self([0u8; 20])
    }

    /// Placeholder meaning "no currency". Never valid in an issue.
    pub const fn no_currency() -> Self {
        let mut bytes = [0u8; 20];
        bytes[19] = 1;
        Self(bytes)
    }

    /// The native code spelled in the three-character layout. Never valid in
    /// an issue.
    pub const fn bad_currency() -> Self {
        let mut bytes = [0u8; 20];
        bytes[12] = b'X';
        bytes[13] = b'R';
        bytes[14] = b'P';
        Self(bytes)
    }

    pub fn is_native(&self) -> bool {
        self.0 == [0u8; 20]
    }

    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Parse a currency from its text form.
    ///
    /// Accepts the empty string or `XRP` (native), three characters from the
    /// code charset (upper-cased), or 40 hex characters.
    pub fn from_code(code: &str) -> Result<Self, TypeError> {
        if code.is_empty() || code == NATIVE_CODE {
            return Ok(Self::native());
        }
        if code.len() == 3 {
            if !code.chars().all(|c| ISO_CHARSET.contains(c)) {
                return Err(TypeError::InvalidCurrency(code.to_string()));
            }
            let mut bytes = [0u8; 20];
            for (slot, c) in bytes[12..15].iter_mut().zip(code.bytes()) {
                *slot = c.to_ascii_uppercase();
            }
            return Ok(Self(bytes));
        }
        if code.len() == 40 {
            let raw = hex::decode(code).map_err(|_| TypeError::InvalidCurrency(code.to_string()))?;
            let mut bytes = [0u8; 20];
            bytes.copy_from_slice(&raw);
            return Ok(Self(bytes));
        }
        Err(TypeError::InvalidCurrency(code.to_string()))
    }

    /// The three-character code, if this currency uses that layout.
    fn iso_code(&self) -> Option<&str> {
        let layout_ok = self.0[..12].iter().all(|&b| b == 0) && self.0[15..].iter().all(|&b| b == 0);
        if !layout_ok {
            return None;
        }
        let code = std::str::from_utf8(&self.0[12..15]).ok()?;
        if code != NATIVE_CODE && code.chars().all(|c| ISO_CHARSET.contains(c)) {
            Some(code)
        } else {
            None
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_native() {
            return write!(f, "{NATIVE_CODE}");
        }
        if *self == Self::no_currency() {
            return write!(f, "1");
        }
        match self.iso_code() {
            Some(code) => write!(f, "{code}"),
            None => write!(f, "{}", hex::encode_upper(self.0)),
        }
    }
}

impl fmt::Debug for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Currency({self})")
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.collect_str(self)
        } else {
            self.0.serialize(serializer)
        }
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_code(&s).map_err(serde::de::Error::custom)
        } else {
            <[u8; 20]>::deserialize(deserializer).map(Self)
        }
    }
}
