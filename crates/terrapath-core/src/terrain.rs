//! Terrain types and the catalog that maps names to movement costs.
//!
//! A [`TerrainCatalog`] is built once and never mutated afterwards. The
//! standard catalog is shared process-wide through
//! [`TerrainCatalog::standard`]; custom catalogs can be built with
//! [`TerrainCatalog::new`] for maps that need other terrain kinds.

use std::fmt;
use std::sync::{Arc, LazyLock};

/// Index of an entry inside its [`TerrainCatalog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainId(pub u16);

impl TerrainId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// One kind of terrain.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TerrainEntry {
    /// Lower-case name used for lookups.
    pub name: String,
    /// Factor applied to the base step cost when entering a cell of this
    /// terrain. `f64::INFINITY` for impassable terrain.
    pub multiplier: f64,
    pub walkable: bool,
    /// Terrain the hazard-avoidance policy steers away from.
    pub hazard: bool,
    /// Symbol used by text renderers.
    pub glyph: char,
}

impl TerrainEntry {
    /// Create a walkable-or-not entry with no hazard flag and `'?'` glyph.
    pub fn new(name: &str, multiplier: f64, walkable: bool) -> Self {
        Self {
            name: name.to_lowercase(),
            multiplier,
            walkable,
            hazard: false,
            glyph: '?',
        }
    }

    /// Mark the terrain as hazard (builder).
    #[inline]
    pub fn with_hazard(mut self) -> Self {
        self.hazard = true;
        self
    }

    /// Set the render glyph (builder).
    #[inline]
    pub fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }
}

// ---------------------------------------------------------------------------
// Catalog
// ---------------------------------------------------------------------------

static STANDARD: LazyLock<Arc<TerrainCatalog>> = LazyLock::new(|| {
    Arc::new(TerrainCatalog {
        entries: vec![
            TerrainEntry::new("normal", 1.0, true).with_glyph('.'),
            TerrainEntry::new("grass", 1.3, true).with_glyph('"'),
            TerrainEntry::new("sand", 1.7, true).with_glyph(':'),
            TerrainEntry::new("water", f64::INFINITY, false)
                .with_hazard()
                .with_glyph('~'),
            TerrainEntry::new("mountain", 2.5, true).with_glyph('^'),
            TerrainEntry::new("road", 0.7, true).with_glyph('='),
        ],
        default: TerrainId(0),
    })
});

/// Immutable registry of terrain entries with a default fallback.
///
/// Lookups are case-insensitive. Unknown names resolve to the default entry
/// instead of failing.
#[derive(Debug, Clone, PartialEq)]
pub struct TerrainCatalog {
    entries: Vec<TerrainEntry>,
    default: TerrainId,
}

impl TerrainCatalog {
    /// The standard six-entry catalog (`normal`, `grass`, `sand`, `water`,
    /// `mountain`, `road`), with `normal` as default and `water` as hazard.
    pub fn standard() -> Arc<TerrainCatalog> {
        Arc::clone(&STANDARD)
    }

    /// Build a custom catalog.
    ///
    /// Names are compared case-insensitively. Every multiplier must be
    /// positive; an infinite multiplier is only allowed on non-walkable
    /// entries.
    pub fn new(entries: Vec<TerrainEntry>, default_name: &str) -> Result<Self, CatalogError> {
        if entries.is_empty() {
            return Err(CatalogError::Empty);
        }
        if entries.len() > u16::MAX as usize {
            return Err(CatalogError::TooManyEntries(entries.len()));
        }
        let mut normalized: Vec<TerrainEntry> = Vec::with_capacity(entries.len());
        for mut e in entries {
            e.name = e.name.to_lowercase();
            if normalized.iter().any(|o| o.name == e.name) {
                return Err(CatalogError::DuplicateName(e.name));
            }
            if e.multiplier.is_nan() || e.multiplier <= 0.0 {
                return Err(CatalogError::InvalidMultiplier {
                    name: e.name,
                    multiplier: e.multiplier,
                });
            }
            if e.multiplier.is_infinite() && e.walkable {
                return Err(CatalogError::InfiniteWalkable(e.name));
            }
            normalized.push(e);
        }
        let default_name = default_name.to_lowercase();
        let default = normalized
            .iter()
            .position(|e| e.name == default_name)
            .map(|i| TerrainId(i as u16))
            .ok_or(CatalogError::UnknownDefault(default_name))?;
        Ok(Self {
            entries: normalized,
            default,
        })
    }

    /// Resolve a name to its id, falling back to the default entry.
    pub fn id_of(&self, name: &str) -> TerrainId {
        self.find(name).unwrap_or(self.default)
    }

    /// Resolve a name to its id, or `None` if the catalog has no such entry.
    pub fn find(&self, name: &str) -> Option<TerrainId> {
        // Stored names are already lowercased by `new`.
        let name = name.to_lowercase();
        self.entries
            .iter()
            .position(|e| e.name == name)
            .map(|i| TerrainId(i as u16))
    }

    /// Entry for `name`, or the default entry for unknown names.
    pub fn lookup(&self, name: &str) -> &TerrainEntry {
        self.entry(self.id_of(name))
    }

    /// Entry for an id obtained from this catalog.
    ///
    /// Ids from another catalog that are out of range map to the default.
    pub fn entry(&self, id: TerrainId) -> &TerrainEntry {
        self.entries
            .get(id.index())
            .unwrap_or(&self.entries[self.default.index()])
    }

    pub fn is_walkable(&self, name: &str) -> bool {
        self.lookup(name).walkable
    }

    pub fn cost_of(&self, name: &str) -> f64 {
        self.lookup(name).multiplier
    }

    #[inline]
    pub fn default_id(&self) -> TerrainId {
        self.default
    }

    /// All entries in declaration order.
    pub fn entries(&self) -> &[TerrainEntry] {
        &self.entries
    }

    /// Smallest multiplier among walkable entries.
    ///
    /// Scaling a straight-line distance by this value gives a lower bound on
    /// the true travel cost. Returns `1.0` if no entry is walkable.
    pub fn min_walkable_multiplier(&self) -> f64 {
        self.entries
            .iter()
            .filter(|e| e.walkable && e.multiplier.is_finite())
            .map(|e| e.multiplier)
            .reduce(f64::min)
            .unwrap_or(1.0)
    }
}

/// Errors that can occur when building a custom catalog.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    /// No entries were given.
    Empty,
    /// More entries than a [`TerrainId`] can address.
    TooManyEntries(usize),
    /// Two entries share a (case-insensitive) name.
    DuplicateName(String),
    /// Multiplier is zero, negative or NaN.
    InvalidMultiplier { name: String, multiplier: f64 },
    /// A walkable entry has an infinite multiplier.
    InfiniteWalkable(String),
    /// The default name is not among the entries.
    UnknownDefault(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "terrain catalog: no entries"),
            Self::TooManyEntries(n) => write!(f, "terrain catalog: too many entries ({n})"),
            Self::DuplicateName(name) => write!(f, "terrain catalog: duplicate entry \u{201c}{name}\u{201d}"),
            Self::InvalidMultiplier { name, multiplier } => write!(
                f,
                "terrain catalog: entry \u{201c}{name}\u{201d} has invalid multiplier {multiplier}"
            ),
            Self::InfiniteWalkable(name) => write!(
                f,
                "terrain catalog: walkable entry \u{201c}{name}\u{201d} has infinite multiplier"
            ),
            Self::UnknownDefault(name) => {
                write!(f, "terrain catalog: default \u{201c}{name}\u{201d} is not an entry")
            }
        }
    }
}

impl std::error::Error for CatalogError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_ascii_names_match_any_case() {
        let c = TerrainCatalog::new(
            vec![
                TerrainEntry::new("normal", 1.0, true),
                TerrainEntry::new("Éboulis", 3.0, true),
            ],
            "normal",
        )
        .unwrap();
        assert_eq!(c.entries()[1].name, "éboulis");
        assert_eq!(c.find("ÉBOULIS"), Some(TerrainId(1)));
        assert_eq!(c.lookup("éBoulis").name, "éboulis");
        assert_eq!(c.cost_of("ÉBOULIS"), 3.0);
    }

    #[test]
    fn standard_table() {
        let c = TerrainCatalog::standard();
        let expect = [
            ("normal", 1.0, true),
            ("grass", 1.3, true),
            ("sand", 1.7, true),
            ("mountain", 2.5, true),
            ("road", 0.7, true),
        ];
        for (name, cost, walkable) in expect {
            assert_eq!(c.cost_of(name), cost, "{name}");
            assert_eq!(c.is_walkable(name), walkable, "{name}");
        }
        assert!(c.cost_of("water").is_infinite());
        assert!(!c.is_walkable("water"));
        assert!(c.lookup("water").hazard);
        assert_eq!(c.entries().iter().filter(|e| e.hazard).count(), 1);
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let c = TerrainCatalog::standard();
        assert_eq!(c.lookup("GRASS").name, "grass");
        assert_eq!(c.lookup("Mountain").multiplier, 2.5);
        assert_eq!(c.find("RoAd"), c.find("road"));
    }

    #[test]
    fn unknown_name_falls_back_to_normal() {
        let c = TerrainCatalog::standard();
        assert_eq!(c.lookup("lava"), c.lookup("normal"));
        assert_eq!(c.id_of(""), c.default_id());
        assert_eq!(c.find("lava"), None);
    }

    #[test]
    fn standard_is_shared() {
        let a = TerrainCatalog::standard();
        let b = TerrainCatalog::standard();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn min_walkable_multiplier_ignores_impassable() {
        assert_eq!(TerrainCatalog::standard().min_walkable_multiplier(), 0.7);
        let c = TerrainCatalog::new(
            vec![
                TerrainEntry::new("floor", 1.0, true),
                TerrainEntry::new("wall", f64::INFINITY, false),
            ],
            "floor",
        )
        .unwrap();
        assert_eq!(c.min_walkable_multiplier(), 1.0);
    }

    #[test]
    fn custom_catalog_validation() {
        assert_eq!(TerrainCatalog::new(vec![], "x"), Err(CatalogError::Empty));

        let dup = TerrainCatalog::new(
            vec![
                TerrainEntry::new("Floor", 1.0, true),
                TerrainEntry::new("floor", 2.0, true),
            ],
            "floor",
        );
        assert_eq!(dup, Err(CatalogError::DuplicateName("floor".into())));

        let zero = TerrainCatalog::new(vec![TerrainEntry::new("ice", 0.0, true)], "ice");
        assert!(matches!(zero, Err(CatalogError::InvalidMultiplier { .. })));

        let inf = TerrainCatalog::new(vec![TerrainEntry::new("pit", f64::INFINITY, true)], "pit");
        assert_eq!(inf, Err(CatalogError::InfiniteWalkable("pit".into())));

        let missing = TerrainCatalog::new(vec![TerrainEntry::new("floor", 1.0, true)], "void");
        assert_eq!(missing, Err(CatalogError::UnknownDefault("void".into())));
    }

    #[test]
    fn custom_default_is_case_insensitive() {
        let c = TerrainCatalog::new(
            vec![
                TerrainEntry::new("marsh", 3.0, true).with_hazard(),
                TerrainEntry::new("Floor", 1.0, true),
            ],
            "FLOOR",
        )
        .unwrap();
        assert_eq!(c.lookup("unknown").name, "floor");
        assert!(c.lookup("MARSH").hazard);
    }

    #[test]
    fn error_display() {
        let e = CatalogError::UnknownDefault("void".into());
        assert!(e.to_string().contains("void"));
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn entry_round_trip() {
        let e = TerrainEntry::new("marsh", 3.0, true).with_hazard().with_glyph('%');
        let json = serde_json::to_string(&e).unwrap();
        let back: TerrainEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(e, back);
    }
}
