use tracing::debug;

use crate::core::{BarSeries, PaneSynchronizer, ViewportController};
use crate::error::ChartResult;
use crate::extensions::{SessionEvent, SessionObserver};
use crate::render::{PaneFrame, Renderer, ViewportFrame};

use super::{ChartSessionConfig, session_model::SessionModel};

/// Owning aggregate of one interactive chart.
///
/// `ChartSession` holds the bar series, pane registry, item bindings,
/// viewport and cursor, and routes decoded input events to them. All methods
/// run to completion on the caller's thread.
pub struct ChartSession<R: Renderer> {
    pub(super) renderer: R,
    pub(super) model: SessionModel,
    pub(super) config: ChartSessionConfig,
    pub(super) observers: Vec<Box<dyn SessionObserver>>,
}

impl<R: Renderer> ChartSession<R> {
    pub fn new(renderer: R, config: ChartSessionConfig) -> ChartResult<Self> {
        config.validate()?;
        let viewport = ViewportController::new(config.min_bar_count)?;
        let sync = PaneSynchronizer::new(config.padding())?;
        debug!(
            min_bar_count = config.min_bar_count,
            zoom_step = config.zoom_step,
            "create chart session"
        );
        Ok(Self {
            renderer,
            model: SessionModel::new(viewport, sync),
            config,
            observers: Vec::new(),
        })
    }

    #[must_use]
    pub fn config(&self) -> &ChartSessionConfig {
        &self.config
    }

    #[must_use]
    pub fn series(&self) -> &BarSeries {
        &self.model.series
    }

    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Builds the frame for the current state.
    #[must_use]
    pub fn frame(&self) -> ViewportFrame {
        let count = self.model.series.count();
        let panes = self
            .model
            .panes
            .iter()
            .map(|pane| PaneFrame {
                pane: pane.id.clone(),
                geometry: pane.geometry,
                view: self.model.sync.view(&pane.id).copied().unwrap_or_default(),
            })
            .collect();
        ViewportFrame {
            window: self.model.viewport.window(),
            effective_window: self.model.viewport.effective_window(count),
            panes,
            cursor: self.cursor_overlay(),
        }
    }

    /// Validates the current frame and hands it to the renderer.
    ///
    /// Render feedback reported during this call is not applied until the
    /// next input event.
    pub fn render(&mut self) -> ChartResult<()> {
        let frame = self.frame();
        frame.validate()?;
        self.renderer.render(&frame)?;
        self.emit_session_event(SessionEvent::Rendered);
        Ok(())
    }

    #[must_use]
    pub fn into_renderer(self) -> R {
        self.renderer
    }
}
