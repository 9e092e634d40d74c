//! Connected-component labelling.

use wayline_core::{ComponentLookup, GameMap, TileRef};

use crate::SearchSpace;
use crate::adapters::WaterAdapter;
use crate::traits::{NodeId, Pather};

impl SearchSpace {
    /// Label every node with a connected-component ID.
    ///
    /// Two nodes belong to the same component if there is a path of
    /// neighbours (as defined by `pather`) between them. Labels are assigned
    /// in ascending order of each component's smallest node id. After this
    /// call use [`cc_at`](Self::cc_at) to query the label of a node.
    pub fn cc_map_all<P: Pather>(&mut self, pather: &P) {
        let len = pather.num_nodes();
        self.cc_labels.clear();
        self.cc_labels.resize(len, -1);

        let mut label: i64 = 0;
        let mut nbuf = std::mem::take(&mut self.nbuf);

        for start in 0..len {
            if self.cc_labels[start] >= 0 {
                continue;
            }

            // Iterative DFS from `start`.
            self.cc_stack.clear();
            self.cc_stack.push(start as NodeId);
            self.cc_labels[start] = label;

            while let Some(ci) = self.cc_stack.pop() {
                nbuf.clear();
                pather.neighbors(ci, &mut nbuf);

                for &ni in nbuf.iter() {
                    let Some(l) = self.cc_labels.get_mut(ni as usize) else {
                        continue;
                    };
                    if *l < 0 {
                        *l = label;
                        self.cc_stack.push(ni);
                    }
                }
            }

            label += 1;
        }

        self.nbuf = nbuf;
    }

    /// Query the connected-component label of a node.
    ///
    /// Returns `None` if the node is out of range or `cc_map_all` has not
    /// been called yet.
    pub fn cc_at(&self, n: NodeId) -> Option<u32> {
        let label = *self.cc_labels.get(n as usize)?;
        if label < 0 { None } else { Some(label as u32) }
    }
}

/// Water-region labels for every tile of a map.
///
/// Land tiles have no component. Ids are dense and ordered by each region's
/// first tile in row-major order, so two independent computations over the
/// same map agree exactly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaterComponents {
    labels: Vec<Option<u32>>,
}

impl WaterComponents {
    /// Label the 4-connected water regions of `map`.
    pub fn compute<M: GameMap>(map: &M) -> Self {
        let adapter = WaterAdapter::new(map, 0);
        let mut space = SearchSpace::default();
        space.cc_map_all(&adapter);

        // Land nodes got singleton labels; drop them and renumber.
        let mut remap: Vec<Option<u32>> = Vec::new();
        let mut next = 0u32;
        let labels = (0..map.num_tiles() as TileRef)
            .map(|t| {
                if map.is_land(t) {
                    return None;
                }
                let raw = space.cc_at(t)? as usize;
                if remap.len() <= raw {
                    remap.resize(raw + 1, None);
                }
                Some(*remap[raw].get_or_insert_with(|| {
                    next += 1;
                    next - 1
                }))
            })
            .collect();
        log::debug!("labelled {next} water components");
        Self { labels }
    }

    /// Number of distinct water components.
    pub fn count(&self) -> usize {
        self.labels
            .iter()
            .flatten()
            .max()
            .map_or(0, |&m| m as usize + 1)
    }
}

impl ComponentLookup for WaterComponents {
    fn component(&self, t: TileRef) -> Option<u32> {
        self.labels.get(t as usize).copied().flatten()
    }
}
