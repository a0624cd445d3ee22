// Hashes ledger transactions into 256-bit digests.

use primitive_types::H256;
use serde_json::Value;
use sha2::{Digest, Sha256};
use std::collections::BTreeMap;

// Domain separation so a transaction digest can never collide with another kind of record.
const TX_DOMAIN: &[u8] = b"TRUECHAINTX";

/// Sorts a JSON object's keys recursively so serialization is canonical.
fn sort_json_value(value: &Value) -> Value {
    match value {
        Value::Object(map) => {
            let sorted_map: BTreeMap<String, Value> = map
                .iter()
                .map(|(k, v)| (k.clone(), sort_json_value(v)))
                .collect();
            Value::Object(sorted_map.into_iter().collect())
        }
        Value::Array(arr) => Value::Array(arr.iter().map(sort_json_value).collect()),
        _ => value.clone(),
    }
}

/// Hashes the canonical form of a transaction body.
pub fn hash_transaction_body(body: &Value) -> H256 {
    let canonical_string = sort_json_value(body).to_string();

    let mut hasher = Sha256::new();
    hasher.update(TX_DOMAIN);
    hasher.update(canonical_string.as_bytes());
    H256::from_slice(&hasher.finalize())
}

/// `0x`-prefixed lowercase hex of the full digest.
pub fn to_hex(hash: H256) -> String {
    format!("0x{}", hex::encode(hash.as_bytes()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn key_order_does_not_change_the_digest() {
        let a = json!({ "action": "SHIPPED", "location": "Pune", "nested": { "b": 1, "a": 2 } });
        let b = json!({ "nested": { "a": 2, "b": 1 }, "location": "Pune", "action": "SHIPPED" });
        assert_eq!(hash_transaction_body(&a), hash_transaction_body(&b));
    }

    #[test]
    fn hex_is_full_width() {
        let h = to_hex(H256::zero());
        assert_eq!(h.len(), 66);
        assert!(h.starts_with("0x000"));
    }
}
