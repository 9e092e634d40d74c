use wayline_core::{ComponentLookup, TileRef};

use crate::traits::PathFinder;

/// Rejects queries whose endpoints lie in different water components
/// before the wrapped search ever runs.
///
/// Sources are filtered down to those sharing the target's component; a
/// target without a component, or no surviving source, is "not found".
pub struct ComponentGuard<F, C> {
    inner: F,
    components: C,
}

impl<F: PathFinder, C: ComponentLookup> ComponentGuard<F, C> {
    pub fn new(inner: F, components: C) -> Self {
        Self { inner, components }
    }

    pub fn inner(&self) -> &F {
        &self.inner
    }
}

impl<F: PathFinder, C: ComponentLookup> PathFinder for ComponentGuard<F, C> {
    fn find_path(&mut self, from: &[TileRef], to: TileRef) -> Option<Vec<TileRef>> {
        let target = self.components.component(to)?;
        let sources: Vec<TileRef> = from
            .iter()
            .copied()
            .filter(|&t| self.components.component(t) == Some(target))
            .collect();
        if sources.is_empty() {
            log::trace!("component guard: no source shares component {target} with {to}");
            return None;
        }
        self.inner.find_path(&sources, to)
    }
}
