//! Set of sink zone apexes.
//!
//! Loads the AS112 zone list at compile time and classifies names as
//! an apex, a name below an apex, or neither.

use rustc_hash::FxHashSet;

use crate::dns::Name;

/// Embedded AS112 zone list, loaded at compile time.
const AS112_ZONES: &str = include_str!("as112.txt");

/// Where a name falls relative to the sink zones.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoneMatch {
    /// The name is a zone apex.
    Apex,
    /// The name is one or more labels below an apex.
    Below,
}

/// A set of sink zone apexes for efficient lookup.
///
/// Apexes are kept lower-cased in wire form, so every suffix of a name's
/// wire encoding can be looked up directly.
pub struct SinkZones {
    apexes: FxHashSet<Vec<u8>>,
}

impl SinkZones {
    /// Build the set from the embedded AS112 list.
    pub fn as112() -> Self {
        Self::from_list(AS112_ZONES)
    }

    /// Build the set from newline separated zone names. Blank lines,
    /// lines starting with `#` and names that are not valid are skipped.
    pub fn from_list(list: &str) -> Self {
        let apexes = list
            .lines()
            .filter_map(|line| {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    return None;
                }
                let name = line.parse::<Name>().ok()?;
                Some(name.to_ascii_lowercase().as_wire().to_vec())
            })
            .collect();

        Self { apexes }
    }

    /// Classify a lower-cased name.
    pub fn classify(&self, name: &Name) -> Option<ZoneMatch> {
        let wire = name.as_wire();
        if self.apexes.contains(wire) {
            return Some(ZoneMatch::Apex);
        }

        // Drop one leading label at a time until only the root is left.
        let mut offset = 0;
        while let Some(&len) = wire.get(offset) {
            if len == 0 {
                break;
            }
            offset += len as usize + 1;
            match wire.get(offset..) {
                Some(suffix) if self.apexes.contains(suffix) => return Some(ZoneMatch::Below),
                Some(_) => {}
                None => break,
            }
        }

        None
    }

    /// Returns the number of apexes in the set.
    pub fn len(&self) -> usize {
        self.apexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.apexes.is_empty()
    }
}

impl Default for SinkZones {
    fn default() -> Self {
        Self::as112()
    }
}
