use crate::error::{Result, StateError};
use crate::format::SchemaVersion;
use crate::wire::{decode_varint32, Tag, WireType};

/// Reads the schema version of a persisted record without decoding the rest of it.
///
/// Every schema except the legacy one writes its version as field 1 with varint wire type, and
/// always first. A record whose leading tag has any other wire type is reported as
/// [`SchemaVersion::LEGACY`]. The returned version is not checked against the known set.
pub fn sniff_version(buf: &[u8]) -> Result<SchemaVersion> {
    let tag = Tag::read(buf, 0)?;
    if tag.wire_type != WireType::Varint {
        return Ok(SchemaVersion::LEGACY);
    }
    let (version, _) = decode_varint32(buf, 1)?;
    Ok(SchemaVersion(version))
}

/// Like [`sniff_version`], but rejects versions no snapshot decoder is registered for.
pub fn sniff_known_version(buf: &[u8]) -> Result<SchemaVersion> {
    let version = sniff_version(buf)?;
    if !version.is_known() {
        return Err(StateError::UnknownVersion(version));
    }
    Ok(version)
}
