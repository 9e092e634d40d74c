//! Fluent assembly of search pipelines.
//!
//! Stages are stacked inside-out in call order: the first call wraps the
//! core finder, the last call becomes the outermost stage.

use wayline_core::{ComponentLookup, GameMap, TileRef};

use crate::AstarFinder;
use crate::adapters::{AirAdapter, RailAdapter, StationGraph, WaterAdapter};
use crate::config::SearchConfig;
use crate::stepper::{SearchBudget, Stepper};
use crate::traits::{AstarPather, PathFinder};
use crate::transform::{ComponentGuard, MiniMapped, ShoreCoercion, Smoothed};

/// Builder stacking transformers around a core finder.
pub struct PipelineBuilder<F> {
    finder: F,
}

impl<A: AstarPather> PipelineBuilder<AstarFinder<A>> {
    /// Start from A* over `adapter`.
    pub fn astar(adapter: A) -> Self {
        Self::new(AstarFinder::new(adapter))
    }
}

impl<F: PathFinder> PipelineBuilder<F> {
    pub fn new(core: F) -> Self {
        Self { finder: core }
    }

    /// Translate between the full map and the half-resolution mini-map the
    /// current stages search on.
    pub fn mini_map<M: GameMap, B: GameMap>(self, full: M, mini: &B) -> PipelineBuilder<MiniMapped<F, M>> {
        PipelineBuilder::new(MiniMapped::new(self.finder, full, mini))
    }

    /// Reject queries across water components without searching.
    pub fn component_guard<C: ComponentLookup>(self, components: C) -> PipelineBuilder<ComponentGuard<F, C>> {
        PipelineBuilder::new(ComponentGuard::new(self.finder, components))
    }

    /// Snap land endpoints onto adjacent water.
    pub fn shore_coercion<M: GameMap>(self, map: M) -> PipelineBuilder<ShoreCoercion<F, M>> {
        PipelineBuilder::new(ShoreCoercion::new(self.finder, map))
    }

    /// Line-of-sight smoothing with a custom traversability predicate.
    pub fn smoothing<M, P>(self, map: M, traversable: P) -> PipelineBuilder<Smoothed<F, M, P>>
    where
        M: GameMap,
        P: Fn(&M, TileRef) -> bool,
    {
        PipelineBuilder::new(Smoothed::new(self.finder, map, traversable))
    }

    /// Line-of-sight smoothing over water and shoreline.
    pub fn naval_smoothing<M: GameMap>(self, map: M) -> PipelineBuilder<Smoothed<F, M>> {
        PipelineBuilder::new(Smoothed::naval(self.finder, map))
    }

    /// Finish with the one-shot contract.
    pub fn build(self) -> F {
        self.finder
    }

    /// Finish with the per-tick stepping contract.
    pub fn stepper(self, budget: SearchBudget) -> Stepper<F> {
        Stepper::new(self.finder, budget)
    }
}

/// The naval pipeline: mini-map A* behind a component guard and shore
/// coercion, both at full resolution.
pub type WaterPathFinder<M, C> = ShoreCoercion<ComponentGuard<MiniMapped<AstarFinder<WaterAdapter<M>>, M>, C>, M>;

/// Assemble the naval pipeline over `map`, its mini-map and the full-map
/// water components.
pub fn water_path_finder<M, C>(map: M, mini: M, components: C, config: &SearchConfig) -> WaterPathFinder<M, C>
where
    M: GameMap + Clone,
    C: ComponentLookup,
{
    PipelineBuilder::astar(WaterAdapter::new(mini.clone(), config.shore_penalty))
        .mini_map(map.clone(), &mini)
        .component_guard(components)
        .shore_coercion(map)
        .build()
}

/// A* restricted to rail tiles.
pub fn rail_path_finder<M: GameMap>(map: M) -> AstarFinder<RailAdapter<M>> {
    AstarFinder::new(RailAdapter::new(map))
}

/// A* between stations of a rail network. Node ids are station ids.
pub fn station_path_finder(graph: StationGraph) -> AstarFinder<StationGraph> {
    AstarFinder::new(graph)
}

/// Unconstrained flight across `map`.
pub fn air_path_finder<M: GameMap>(map: &M) -> AstarFinder<AirAdapter> {
    AstarFinder::new(AirAdapter::for_map(map))
}
