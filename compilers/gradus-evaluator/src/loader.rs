use std::path::Path;

use gradus_protocol::{ConstraintInventory, INVENTORY_FORMAT_VERSION};
use rkyv::AlignedVec;
use tracing::info;

use crate::error::InventoryError;

fn check_version(inventory: ConstraintInventory) -> Result<ConstraintInventory, InventoryError> {
    if inventory.version != INVENTORY_FORMAT_VERSION {
        return Err(InventoryError::UnsupportedVersion {
            found: inventory.version,
            expected: INVENTORY_FORMAT_VERSION,
        });
    }
    Ok(inventory)
}

pub fn parse_inventory_json(json: &str) -> Result<ConstraintInventory, InventoryError> {
    check_version(serde_json::from_str(json)?)
}

/// Validates and deserializes an inventory compiled by `gradus compile`.
pub fn parse_inventory_archive(bytes: &[u8]) -> Result<ConstraintInventory, InventoryError> {
    let mut aligned = AlignedVec::with_capacity(bytes.len());
    aligned.extend_from_slice(bytes);
    let inventory = rkyv::from_bytes::<ConstraintInventory>(&aligned)
        .map_err(|e| InventoryError::CorruptArchive(e.to_string()))?;
    check_version(inventory)
}

/// Loads an inventory from JSON, or from an rkyv archive when the file ends in `.rkyv`/`.bin`.
pub fn load_inventory(path: &Path) -> Result<ConstraintInventory, InventoryError> {
    let bytes = std::fs::read(path).map_err(|source| InventoryError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let archived = path.extension().is_some_and(|ext| ext == "rkyv" || ext == "bin");
    let inventory = if archived {
        parse_inventory_archive(&bytes)?
    } else {
        check_version(serde_json::from_slice(&bytes)?)?
    };

    info!(
        path = %path.display(),
        language = %inventory.language,
        level = %inventory.level,
        "loaded constraint inventory"
    );
    Ok(inventory)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::italian_a1;
    use rkyv::ser::{serializers::AllocSerializer, Serializer};

    #[test]
    fn test_json_round_trip_of_builtin() {
        let json = serde_json::to_string(&italian_a1()).expect("serializable");
        assert_eq!(parse_inventory_json(&json).expect("valid"), italian_a1());
    }

    #[test]
    fn test_archive_round_trip_of_builtin() {
        let mut serializer = AllocSerializer::<4096>::default();
        serializer.serialize_value(&italian_a1()).expect("serializable");
        let bytes = serializer.into_serializer().into_inner();

        assert_eq!(parse_inventory_archive(&bytes).expect("valid"), italian_a1());
    }

    #[test]
    fn test_future_version_rejected() {
        let json = r#"{ "version": 9, "language": "english", "level": "A1" }"#;
        assert!(matches!(
            parse_inventory_json(json),
            Err(InventoryError::UnsupportedVersion { found: 9, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = load_inventory(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, InventoryError::Io { .. }));
    }
}
