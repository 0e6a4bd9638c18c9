use tracing::debug;

use crate::core::{
    ItemBinding, PaneDescriptor, PaneId, PaneLimits, PaneOptions, PaneView, RenderableItem,
    ScreenRect,
};
use crate::error::{ChartError, ChartResult};
use crate::render::Renderer;

use super::ChartSession;

impl<R: Renderer> ChartSession<R> {
    /// Registers a pane below the existing ones. The first pane registered
    /// drives the shared x range.
    pub fn add_pane(&mut self, id: impl Into<PaneId>, options: PaneOptions) -> ChartResult<()> {
        let id = id.into();
        self.model.panes.register(id.clone(), options)?;
        self.model.sync.track_pane(id.clone());
        self.model.sync_panes();
        debug!(pane = %id, primary = options.primary, "add pane");
        Ok(())
    }

    /// Attaches an item to an existing pane.
    ///
    /// Binding to an unknown pane is refused with `ChartError::UnboundPane`.
    /// An item bound after history was loaded is fed the current bars.
    pub fn bind_item(
        &mut self,
        name: impl Into<String>,
        item: Box<dyn RenderableItem>,
        pane: impl Into<PaneId>,
    ) -> ChartResult<()> {
        let name = name.into();
        let pane = pane.into();
        if !self.model.panes.contains(&pane) {
            return Err(ChartError::UnboundPane { item: name, pane });
        }
        if self.model.bindings.iter().any(|binding| binding.name == name) {
            return Err(ChartError::DuplicateItem(name));
        }

        let mut item = item;
        if !self.model.series.is_empty() {
            item.on_history_loaded(self.model.series.bars(), &Default::default());
        }
        debug!(item = %name, pane = %pane, "bind item");
        self.model.bindings.push(ItemBinding { name, pane, item });
        self.model.sync_panes();
        Ok(())
    }

    /// Records where the host placed a pane on screen.
    pub fn set_pane_geometry(&mut self, pane: &PaneId, rect: ScreenRect) -> ChartResult<()> {
        self.model.panes.set_geometry(pane, rect)
    }

    pub fn panes(&self) -> impl Iterator<Item = &PaneDescriptor> {
        self.model.panes.iter()
    }

    #[must_use]
    pub fn primary_pane_id(&self) -> Option<&PaneId> {
        self.model.panes.primary_pane_id()
    }

    /// Item names bound to `pane`, in binding order.
    #[must_use]
    pub fn pane_items(&self, pane: &PaneId) -> Vec<&str> {
        self.model
            .bindings
            .iter()
            .filter(|binding| &binding.pane == pane)
            .map(|binding| binding.name.as_str())
            .collect()
    }

    #[must_use]
    pub fn pane_limits(&self, pane: &PaneId) -> Option<PaneLimits> {
        self.model.sync.limits(pane)
    }

    #[must_use]
    pub fn pane_view(&self, pane: &PaneId) -> Option<PaneView> {
        self.model.sync.view(pane).copied()
    }
}
