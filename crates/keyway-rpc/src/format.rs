use keyway_store::{LedgerObject, StoreResult};
use keyway_types::Key256;
use serde_json::{Map, Value};

/// How a found entry is rendered.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputMode {
    /// `node`: the entry's fields as JSON.
    #[default]
    Structured,
    /// `node_binary`: hex of the canonical binary encoding.
    Binary,
}

impl OutputMode {
    pub fn from_flag(binary: bool) -> Self {
        if binary {
            Self::Binary
        } else {
            Self::Structured
        }
    }
}

/// Write the entry and its `index` into `result`.
pub fn format_entry(
    result: &mut Map<String, Value>,
    key: &Key256,
    object: &LedgerObject,
    mode: OutputMode,
) -> StoreResult<()> {
    match mode {
        OutputMode::Binary => {
            let bytes = object.to_bytes()?;
            result.insert("node_binary".into(), Value::String(hex::encode_upper(bytes)));
        }
        OutputMode::Structured => {
            result.insert("node".into(), object.to_json(key));
        }
    }
    result.insert("index".into(), Value::String(key.to_hex()));
    Ok(())
}
