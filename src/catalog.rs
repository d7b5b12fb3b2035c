//! Symbol catalog for base signs, missions and colour palettes
//!
//! The catalog is loaded once from a TOML file (or the built-in default) and
//! then only read. Lookups are by name; a base sign or mission may be known
//! under several names.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use log::{debug, warn};
use serde::Deserialize;
use thiserror::Error;

/// Errors that can occur when loading or validating a catalog
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse catalog TOML: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("entry '{id}' has invalid dimensions {width}x{height}")]
    InvalidDimensions { id: String, width: f64, height: f64 },
    #[error("duplicate {kind} name '{name}'")]
    DuplicateName { kind: LookupKind, name: String },
}

/// Which part of the catalog a lookup went to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    BaseSign,
    Mission,
    Palette,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::BaseSign => write!(f, "base sign"),
            LookupKind::Mission => write!(f, "mission"),
            LookupKind::Palette => write!(f, "palette"),
        }
    }
}

/// A name that is not present in the catalog
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown {kind} '{name}'")]
pub struct LookupError {
    pub kind: LookupKind,
    pub name: String,
}

/// A base sign or mission fragment with its intrinsic size
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CatalogEntry {
    pub id: String,
    /// All names this entry answers to
    pub names: Vec<String>,
    #[serde(rename = "width")]
    pub intrinsic_width: f64,
    #[serde(rename = "height")]
    pub intrinsic_height: f64,
    /// Raw SVG markup of the fragment, possibly several sibling elements
    #[serde(rename = "svg")]
    pub fragment_markup: String,
}

/// A named palette: fill, border and line colours plus the owning organisation
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ColorSpec {
    pub name: String,
    pub fill: String,
    pub border: String,
    pub line: String,
    pub organisation: String,
}

/// TOML structure for deserializing catalogs
#[derive(Deserialize)]
struct TomlCatalog {
    #[serde(default)]
    base_signs: Vec<CatalogEntry>,
    #[serde(default)]
    missions: Vec<CatalogEntry>,
    #[serde(default)]
    palettes: Vec<ColorSpec>,
}

/// Built-in catalog shipped with the crate
const DEFAULT_CATALOG: &str = include_str!("../catalog/tz.toml");

/// Entries of one kind, indexed by every name they carry
#[derive(Debug, Clone, Default)]
struct EntryTable {
    entries: Vec<CatalogEntry>,
    by_name: HashMap<String, usize>,
}

impl EntryTable {
    fn build(entries: Vec<CatalogEntry>, kind: LookupKind) -> Result<Self, CatalogError> {
        let mut by_name = HashMap::new();
        for (index, entry) in entries.iter().enumerate() {
            let valid = |v: f64| v.is_finite() && v > 0.0;
            if !valid(entry.intrinsic_width) || !valid(entry.intrinsic_height) {
                return Err(CatalogError::InvalidDimensions {
                    id: entry.id.clone(),
                    width: entry.intrinsic_width,
                    height: entry.intrinsic_height,
                });
            }
            for name in &entry.names {
                if by_name.insert(name.clone(), index).is_some() {
                    return Err(CatalogError::DuplicateName {
                        kind,
                        name: name.clone(),
                    });
                }
            }
        }
        Ok(Self { entries, by_name })
    }

    fn get(&self, name: &str) -> Option<&CatalogEntry> {
        self.by_name.get(name).map(|&i| &self.entries[i])
    }

    fn names(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|e| e.names.iter().map(|n| n.as_str()))
    }
}

/// Read-only symbol catalog
#[derive(Debug, Clone)]
pub struct SymbolCatalog {
    base_signs: EntryTable,
    missions: EntryTable,
    palettes: HashMap<String, ColorSpec>,
    palette_order: Vec<String>,
}

impl SymbolCatalog {
    /// Load a catalog from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load a catalog from a TOML string
    pub fn from_str(content: &str) -> Result<Self, CatalogError> {
        let parsed: TomlCatalog = toml::from_str(content)?;

        let base_signs = EntryTable::build(parsed.base_signs, LookupKind::BaseSign)?;
        let missions = EntryTable::build(parsed.missions, LookupKind::Mission)?;

        let mut palettes = HashMap::new();
        let mut palette_order = Vec::new();
        for palette in parsed.palettes {
            if palettes.contains_key(&palette.name) {
                return Err(CatalogError::DuplicateName {
                    kind: LookupKind::Palette,
                    name: palette.name,
                });
            }
            palette_order.push(palette.name.clone());
            palettes.insert(palette.name.clone(), palette);
        }

        debug!(
            "loaded catalog: {} base signs, {} missions, {} palettes",
            base_signs.entries.len(),
            missions.entries.len(),
            palettes.len()
        );

        Ok(Self {
            base_signs,
            missions,
            palettes,
            palette_order,
        })
    }

    /// Resolve a base sign by any of its names
    pub fn base_sign(&self, name: &str) -> Result<&CatalogEntry, LookupError> {
        self.base_signs
            .get(name)
            .ok_or_else(|| not_found(LookupKind::BaseSign, name))
    }

    /// Resolve a mission overlay by any of its names
    pub fn mission(&self, name: &str) -> Result<&CatalogEntry, LookupError> {
        self.missions
            .get(name)
            .ok_or_else(|| not_found(LookupKind::Mission, name))
    }

    /// Resolve a palette by name
    pub fn colors(&self, name: &str) -> Result<&ColorSpec, LookupError> {
        self.palettes
            .get(name)
            .ok_or_else(|| not_found(LookupKind::Palette, name))
    }

    pub fn base_sign_names(&self) -> impl Iterator<Item = &str> {
        self.base_signs.names()
    }

    pub fn mission_names(&self) -> impl Iterator<Item = &str> {
        self.missions.names()
    }

    /// Palette names in catalog order
    pub fn palette_names(&self) -> impl Iterator<Item = &str> {
        self.palette_order.iter().map(|s| s.as_str())
    }
}

fn not_found(kind: LookupKind, name: &str) -> LookupError {
    warn!("catalog has no {} named '{}'", kind, name);
    LookupError {
        kind,
        name: name.to_string(),
    }
}

impl Default for SymbolCatalog {
    fn default() -> Self {
        Self::from_str(DEFAULT_CATALOG).expect("Built-in catalog should be valid TOML")
    }
}
