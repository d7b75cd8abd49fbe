use plugbus::testing::suffix;
use plugbus::{Manifest, ModuleDef};

// ============================================================================
// Module Fixtures
// ============================================================================

/// A manifest registering `suffix(tag)` under each of `topics`.
pub fn tagged_manifest(tag: &str, topics: &[&str]) -> Manifest<String> {
    let mut manifest = Manifest::new();
    for topic in topics {
        manifest = manifest.on(*topic, suffix(tag));
    }
    manifest
}

/// An initializer module registering `suffix(tag)` under each of `topics`.
pub fn tagged_init(tag: &str, topics: &[&str]) -> ModuleDef<String> {
    let manifest = tagged_manifest(tag, topics);
    ModuleDef::init(move |_bus, _config| async move { Ok(Some(manifest)) })
}

/// An initializer that fails with `message`.
pub fn failing_init(message: &'static str) -> ModuleDef<String> {
    ModuleDef::init(move |_bus, _config| async move { Err(message.into()) })
}
