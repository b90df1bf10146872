//! Canonical serialization and SHA-256 hashing of fingerprint records.

use rxstation_types::models::{FingerprintHash, FingerprintRecord, HashScope};
use serde::Serialize;
use sha2::{Digest, Sha256};

/// Compact JSON with object keys in lexicographic order.
///
/// Going through `serde_json::Value` sorts keys (its map is a `BTreeMap`),
/// so the output does not depend on struct field order.
pub fn canonical_json<T: Serialize>(value: &T) -> Result<String, serde_json::Error> {
    let value = serde_json::to_value(value)?;
    serde_json::to_string(&value)
}

pub fn hash_canonical<T: Serialize>(value: &T) -> Result<FingerprintHash, serde_json::Error> {
    let json = canonical_json(value)?;
    Ok(FingerprintHash::from_sha256(Sha256::digest(json.as_bytes()).into()))
}

/// Hash a record under the given scope.
pub fn hash_record(
    record: &FingerprintRecord,
    scope: HashScope,
) -> Result<FingerprintHash, serde_json::Error> {
    match scope {
        HashScope::Full => hash_canonical(record),
        HashScope::Stable => hash_canonical(&record.stable_signals()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fingerprint::test_support::sample_record;

    #[test]
    fn test_canonical_json_sorts_keys() {
        let json = canonical_json(&serde_json::json!({"b": 1, "a": {"d": 2, "c": 3}})).unwrap();
        assert_eq!(json, r#"{"a":{"c":3,"d":2},"b":1}"#);
    }

    #[test]
    fn test_known_digest() {
        // sha256 of the two bytes `{}`
        let hash = hash_canonical(&serde_json::json!({})).unwrap();
        assert_eq!(
            hash.as_str(),
            "44136fa355b3678a1146ad16f7e8649e94fb4fc21fe77e8310c060f61caaff8a"
        );
    }

    #[test]
    fn test_hash_is_deterministic() {
        let record = sample_record();
        let first = hash_record(&record, HashScope::Full).unwrap();
        let second = hash_record(&record.clone(), HashScope::Full).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.as_str().len(), 64);
    }

    #[test]
    fn test_any_single_field_change_alters_hash() {
        let base = sample_record();
        let base_hash = hash_record(&base, HashScope::Full).unwrap();

        let mutations: Vec<Box<dyn Fn(&mut FingerprintRecord)>> = vec![
            Box::new(|r| r.user_agent.push('x')),
            Box::new(|r| r.hardware_concurrency = Some(64)),
            Box::new(|r| r.screen_resolution = "1x1".to_string()),
            Box::new(|r| r.timezone_offset = Some(-60)),
            Box::new(|r| r.canvas.push('A')),
            Box::new(|r| r.fonts.push("Zapfino".to_string())),
            Box::new(|r| r.local_storage = !r.local_storage),
            Box::new(|r| r.battery = None),
            Box::new(|r| r.serial = !r.serial),
        ];

        for (i, mutate) in mutations.iter().enumerate() {
            let mut changed = base.clone();
            mutate(&mut changed);
            assert_ne!(hash_record(&changed, HashScope::Full).unwrap(), base_hash, "mutation {}", i);
        }
    }

    #[test]
    fn test_stable_scope_ignores_volatile_signals() {
        let base = sample_record();
        let mut drifted = base.clone();
        drifted.canvas = "data:image/png;base64,AAAA".to_string();
        drifted.battery = None;
        drifted.media_devices.clear();

        assert_eq!(
            hash_record(&base, HashScope::Stable).unwrap(),
            hash_record(&drifted, HashScope::Stable).unwrap()
        );
        assert_ne!(
            hash_record(&base, HashScope::Full).unwrap(),
            hash_record(&drifted, HashScope::Full).unwrap()
        );

        let mut moved = drifted.clone();
        moved.platform = "MacIntel".to_string();
        assert_ne!(
            hash_record(&base, HashScope::Stable).unwrap(),
            hash_record(&moved, HashScope::Stable).unwrap()
        );

        let mut upgraded = drifted;
        upgraded.hardware_concurrency = Some(16);
        assert_ne!(
            hash_record(&base, HashScope::Stable).unwrap(),
            hash_record(&upgraded, HashScope::Stable).unwrap()
        );
    }
}
