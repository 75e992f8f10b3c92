//! The fixed catalog of node icons.
//!
//! Every node names one catalog entry through its category tag. The catalog
//! is closed: tags outside it are rejected when the node is declared, so a
//! typo never survives until render time.

use thiserror::Error;

use crate::draw::Glyph;

/// Raised when a node is declared with a category tag the catalog does not
/// contain.
#[derive(Debug, Clone, Error)]
#[error("unknown icon category '{0}' (known: {hint})", hint = known_tags_hint())]
pub struct UnknownCategory(pub String);

/// One entry of the icon catalog.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IconDefinition {
    tag: &'static str,
    title: &'static str,
    glyph: Glyph,
    /// CSS color used as the glyph fill accent.
    accent: &'static str,
}

impl IconDefinition {
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn glyph(&self) -> Glyph {
        self.glyph
    }

    pub fn accent(&self) -> &'static str {
        self.accent
    }
}

const fn entry(
    tag: &'static str,
    title: &'static str,
    glyph: Glyph,
    accent: &'static str,
) -> IconDefinition {
    IconDefinition {
        tag,
        title,
        glyph,
        accent,
    }
}

/// All supported icons, in catalog order.
static CATALOG: &[IconDefinition] = &[
    entry("server", "Server", Glyph::Card, "#546e7a"),
    entry("database", "Database", Glyph::Cylinder, "#1565c0"),
    entry("queue", "Message Queue", Glyph::Capsule, "#6d4c41"),
    entry("firewall", "Firewall", Glyph::Shield, "#c62828"),
    entry("loadbalancer", "Load Balancer", Glyph::Hexagon, "#2e7d32"),
    entry("user", "User", Glyph::Person, "#455a64"),
    entry("vault", "Vault", Glyph::Shield, "#ffcf0d"),
    entry("github", "GitHub", Glyph::Card, "#24292e"),
    entry("token", "Token", Glyph::Tag, "#ef6c00"),
    entry("envoy", "Envoy", Glyph::Hexagon, "#ac6199"),
    entry("containerd", "Containerd", Glyph::Cube, "#575757"),
    entry("pod", "Pod", Glyph::Capsule, "#326ce5"),
    entry("configmap", "ConfigMap", Glyph::Gear, "#326ce5"),
    entry("crd", "CRD", Glyph::Document, "#326ce5"),
];

/// Looks up a category tag.
///
/// Tags are matched after ASCII-lowercasing, so `"Server"` and `"server"`
/// resolve to the same entry.
pub fn resolve(tag: &str) -> Result<&'static IconDefinition, UnknownCategory> {
    let normalized = tag.to_ascii_lowercase();
    CATALOG
        .iter()
        .find(|icon| icon.tag == normalized)
        .ok_or_else(|| UnknownCategory(tag.to_string()))
}

/// Iterator over every catalog entry, in catalog order.
pub fn entries() -> impl Iterator<Item = &'static IconDefinition> {
    CATALOG.iter()
}

fn known_tags_hint() -> String {
    CATALOG
        .iter()
        .map(|icon| icon.tag)
        .collect::<Vec<_>>()
        .join(", ")
}
