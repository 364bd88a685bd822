// Static region hierarchy: parent region -> every leaf region beneath it

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::path::Path;

/// The region tree shipped with the service.
pub const DEFAULT_REGIONS_JSON: &str = include_str!("../data/regions.json");

#[derive(Deserialize, Debug, Clone)]
pub struct Region {
    pub id: i32,
    #[serde(default)]
    pub subregions: Vec<Region>,
}

/// Read-only after construction; shared between all requests.
#[derive(Debug, Default)]
pub struct RegionHierarchy {
    leaves: HashMap<i32, HashSet<i32>>,
}

impl RegionHierarchy {
    pub fn from_tree(root: &Region) -> Result<Self> {
        let mut hierarchy = RegionHierarchy::default();
        let mut seen = HashSet::new();
        hierarchy.collect_leaves(root, &mut seen)?;
        Ok(hierarchy)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let root: Region = serde_json::from_str(json).context("Failed to parse region tree")?;
        Self::from_tree(&root)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read region tree from {}", path.display()))?;
        Self::from_json(&content)
    }

    pub fn default_tree() -> Result<Self> {
        Self::from_json(DEFAULT_REGIONS_JSON)
    }

    // Returns the leaves under `region` (or the region itself if it is a leaf)
    fn collect_leaves(&mut self, region: &Region, seen: &mut HashSet<i32>) -> Result<Vec<i32>> {
        if !seen.insert(region.id) {
            bail!("Duplicate region id {} in region tree", region.id);
        }
        if region.subregions.is_empty() {
            return Ok(vec![region.id]);
        }

        let mut leaves = Vec::new();
        for subregion in &region.subregions {
            leaves.extend(self.collect_leaves(subregion, seen)?);
        }
        self.leaves.insert(region.id, leaves.iter().copied().collect());
        Ok(leaves)
    }

    /// `None` means the region is a leaf (or unknown) and only matches itself.
    pub fn leaves_of(&self, region_id: i32) -> Option<&HashSet<i32>> {
        self.leaves.get(&region_id)
    }

    pub fn is_parent(&self, region_id: i32) -> bool {
        self.leaves.contains_key(&region_id)
    }

    pub fn contains(&self, requested: i32, most_specific: i32) -> bool {
        match self.leaves_of(requested) {
            Some(leaves) => leaves.contains(&most_specific),
            None => requested == most_specific,
        }
    }

    pub fn parent_count(&self) -> usize {
        self.leaves.len()
    }
}
