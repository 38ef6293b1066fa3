/// Version tag carried in field 1 of every persisted state record (except the legacy one).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SchemaVersion(pub u32);

impl SchemaVersion {
    /// The original schema. It has no version field; its first field is the global auth block,
    /// which is length-delimited, so the sniffer reports this sentinel for it.
    ///
    /// No real version number may ever take this value.
    pub const LEGACY: SchemaVersion = SchemaVersion(u32::MAX);
    /// Version field introduced; global flat auth token still present.
    pub const V1: SchemaVersion = SchemaVersion(1);
    /// Profile map keys become typed profile ids; global auth becomes a tagged union.
    pub const V2: SchemaVersion = SchemaVersion(2);
    /// Global auth removed in favour of per-profile auth; `active_profile_id` added.
    pub const V3: SchemaVersion = SchemaVersion(3);
    /// Per-profile notification state added.
    pub const V4: SchemaVersion = SchemaVersion(4);
    /// Guest sessions record the server they browse against.
    pub const V5: SchemaVersion = SchemaVersion(5);

    /// Bumped exactly once per schema change.
    pub const CURRENT: SchemaVersion = SchemaVersion::V5;

    /// Every snapshot version the engine can decode, oldest first.
    pub const ALL: [SchemaVersion; 6] = [
        SchemaVersion::LEGACY,
        SchemaVersion::V1,
        SchemaVersion::V2,
        SchemaVersion::V3,
        SchemaVersion::V4,
        SchemaVersion::V5,
    ];

    pub fn name(self) -> Option<&'static str> {
        match self {
            SchemaVersion::LEGACY => Some("LEGACY"),
            SchemaVersion::V1 => Some("V1"),
            SchemaVersion::V2 => Some("V2"),
            SchemaVersion::V3 => Some("V3"),
            SchemaVersion::V4 => Some("V4"),
            SchemaVersion::V5 => Some("V5"),
            _ => None,
        }
    }

    pub fn is_known(self) -> bool {
        self.name().is_some()
    }
}

impl core::fmt::Display for SchemaVersion {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if let Some(name) = self.name() {
            write!(f, "{name}({})", self.0)
        } else {
            write!(f, "SchemaVersion({})", self.0)
        }
    }
}

/// Top-level field numbers that a schema version retired.
///
/// Bytes found at these numbers are skipped on decode and never written. A new schema must not
/// assign a new meaning to any of them.
pub fn reserved_fields(version: SchemaVersion) -> &'static [u32] {
    match version {
        // Field 2 was the flat global auth token.
        SchemaVersion::V2 => &[2],
        // Field 5 was the tagged-union global auth token.
        SchemaVersion::V3 | SchemaVersion::V4 | SchemaVersion::V5 => &[2, 5],
        _ => &[],
    }
}
