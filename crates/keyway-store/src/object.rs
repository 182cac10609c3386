use std::collections::BTreeMap;

use keyway_types::{AccountId, Currency, Issue, Key256, LedgerEntryType};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::error::{StoreError, StoreResult};

/// A balance or limit: native drops, or a decimal value of an issued currency.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Amount {
    Native(u64),
    Issued { value: String, issue: Issue },
}

impl Amount {
    pub fn to_json(&self) -> Value {
        match self {
            Self::Native(drops) => Value::String(drops.to_string()),
            Self::Issued { value, issue } => json!({
                "currency": issue.currency.to_string(),
                "issuer": issue.account.to_base58(),
                "value": value,
            }),
        }
    }
}

/// One typed field of a ledger entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldValue {
    UInt8(u8),
    UInt16(u16),
    UInt32(u32),
    UInt64(u64),
    Hash256(Key256),
    Account(AccountId),
    Currency(Currency),
    Issue(Issue),
    Amount(Amount),
    Blob(#[serde(with = "hex_blob")] Vec<u8>),
    Vector256(Vec<Key256>),
}

impl FieldValue {
    /// Structured rendering of the value.
    ///
    /// 64-bit integers render as unpadded lower-case hex strings; keys and
    /// blobs as upper-case hex.
    pub fn to_json(&self) -> Value {
        match self {
            Self::UInt8(v) => json!(v),
            Self::UInt16(v) => json!(v),
            Self::UInt32(v) => json!(v),
            Self::UInt64(v) => Value::String(format!("{v:x}")),
            Self::Hash256(key) => Value::String(key.to_hex()),
            Self::Account(account) => Value::String(account.to_base58()),
            Self::Currency(currency) => Value::String(currency.to_string()),
            Self::Issue(issue) => issue_to_json(issue),
            Self::Amount(amount) => amount.to_json(),
            Self::Blob(bytes) => Value::String(hex::encode_upper(bytes)),
            Self::Vector256(keys) => {
                Value::Array(keys.iter().map(|k| Value::String(k.to_hex())).collect())
            }
        }
    }
}

fn issue_to_json(issue: &Issue) -> Value {
    if issue.is_native() {
        json!({ "currency": issue.currency.to_string() })
    } else {
        json!({
            "currency": issue.currency.to_string(),
            "issuer": issue.account.to_base58(),
        })
    }
}

/// A ledger entry as stored in a snapshot: its type tag and named fields.
///
/// Fields are kept in a `BTreeMap` so that both encodings are canonical:
/// the same entry always produces the same bytes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerObject {
    pub entry_type: LedgerEntryType,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl LedgerObject {
    pub fn new(entry_type: LedgerEntryType) -> Self {
        Self {
            entry_type,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion.
    pub fn with(mut self, name: impl Into<String>, value: FieldValue) -> Self {
        self.fields.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Canonical binary encoding: big-endian entry type code followed by the
    /// bincode-encoded field map.
    pub fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        let payload =
            bincode::serialize(&self.fields).map_err(|e| StoreError::Serialization(e.to_string()))?;
        let mut buf = Vec::with_capacity(2 + payload.len());
        buf.extend_from_slice(&self.entry_type.code().to_be_bytes());
        buf.extend_from_slice(&payload);
        Ok(buf)
    }

    /// Decode the canonical binary encoding.
    pub fn from_bytes(data: &[u8]) -> StoreResult<Self> {
        if data.len() < 2 {
            return Err(StoreError::Serialization(format!(
                "entry too short: {} bytes",
                data.len()
            )));
        }
        let code = u16::from_be_bytes([data[0], data[1]]);
        let entry_type = LedgerEntryType::from_code(code).ok_or(StoreError::UnknownEntryType(code))?;
        let fields = bincode::deserialize(&data[2..])
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        Ok(Self { entry_type, fields })
    }

    /// Structured rendering: every field, plus `LedgerEntryType` and `index`.
    pub fn to_json(&self, index: &Key256) -> Value {
        let mut map = Map::new();
        for (name, value) in &self.fields {
            map.insert(name.clone(), value.to_json());
        }
        map.insert(
            "LedgerEntryType".into(),
            Value::String(self.entry_type.name().into()),
        );
        map.insert("index".into(), Value::String(index.to_hex()));
        Value::Object(map)
    }
}

mod hex_blob {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&hex::encode_upper(bytes))
        } else {
            bytes.serialize(serializer)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            hex::decode(s).map_err(serde::de::Error::custom)
        } else {
            Vec::<u8>::deserialize(deserializer)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> AccountId {
        AccountId::from_bytes([0xA1; 20])
    }

    fn account_root() -> LedgerObject {
        LedgerObject::new(LedgerEntryType::AccountRoot)
            .with("Account", FieldValue::Account(alice()))
            .with("Balance", FieldValue::Amount(Amount::Native(1_000_000)))
            .with("Sequence", FieldValue::UInt32(5))
            .with("OwnerCount", FieldValue::UInt32(0))
            .with("Flags", FieldValue::UInt32(0))
    }

    #[test]
    fn binary_encoding_starts_with_type_code() {
        let bytes = account_root().to_bytes().unwrap();
        assert_eq!(&bytes[..2], &[0x00, 0x61]);
    }

    #[test]
    fn binary_encoding_decodes() {
        let obj = account_root()
            .with("PreviousTxnID", FieldValue::Hash256(Key256::from_hash([3; 32])))
            .with("Domain", FieldValue::Blob(b"example.com".to_vec()));
        let decoded = LedgerObject::from_bytes(&obj.to_bytes().unwrap()).unwrap();
        assert_eq!(decoded, obj);
    }

    #[test]
    fn binary_encoding_is_canonical() {
        let a = LedgerObject::new(LedgerEntryType::Ticket)
            .with("Account", FieldValue::Account(alice()))
            .with("TicketSequence", FieldValue::UInt32(9));
        let b = LedgerObject::new(LedgerEntryType::Ticket)
            .with("TicketSequence", FieldValue::UInt32(9))
            .with("Account", FieldValue::Account(alice()));
        assert_eq!(a.to_bytes().unwrap(), b.to_bytes().unwrap());
    }

    #[test]
    fn decode_rejects_unknown_type() {
        let err = LedgerObject::from_bytes(&[0xFF, 0xFF, 0]).unwrap_err();
        assert!(matches!(err, StoreError::UnknownEntryType(0xFFFF)));
    }

    #[test]
    fn decode_rejects_truncated() {
        assert!(matches!(
            LedgerObject::from_bytes(&[0x00]),
            Err(StoreError::Serialization(_))
        ));
    }

    #[test]
    fn structured_form() {
        let index = Key256::from_hash([0xAB; 32]);
        let json = account_root().to_json(&index);
        assert_eq!(json["LedgerEntryType"], "AccountRoot");
        assert_eq!(json["index"], index.to_hex());
        assert_eq!(json["Account"], alice().to_base58());
        assert_eq!(json["Balance"], "1000000");
        assert_eq!(json["Sequence"], 5);
    }

    #[test]
    fn structured_amounts_and_issues() {
        let usd = Issue::new(Currency::from_code("USD").unwrap(), alice());
        let line = LedgerObject::new(LedgerEntryType::RippleState)
            .with(
                "Balance",
                FieldValue::Amount(Amount::Issued {
                    value: "-10".into(),
                    issue: usd,
                }),
            )
            .with("Asset", FieldValue::Issue(Issue::native()))
            .with("OwnerNode", FieldValue::UInt64(255));
        let json = line.to_json(&Key256::zero());
        assert_eq!(json["Balance"]["currency"], "USD");
        assert_eq!(json["Balance"]["issuer"], alice().to_base58());
        assert_eq!(json["Balance"]["value"], "-10");
        assert_eq!(json["Asset"], serde_json::json!({ "currency": "XRP" }));
        assert_eq!(json["OwnerNode"], "ff");
    }

    #[test]
    fn fixture_json_form() {
        let text = r#"{
            "entry_type": "DirectoryNode",
            "fields": {
                "Indexes": { "Vector256": ["0000000000000000000000000000000000000000000000000000000000000001"] },
                "Domain": { "Blob": "CAFE" }
            }
        }"#;
        let obj: LedgerObject = serde_json::from_str(text).unwrap();
        assert_eq!(obj.entry_type, LedgerEntryType::DirectoryNode);
        assert_eq!(obj.get("Domain"), Some(&FieldValue::Blob(vec![0xCA, 0xFE])));
    }
}
