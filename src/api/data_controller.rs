use tracing::{debug, trace};

use crate::core::{Bar, BarUpdate, HistoryAnnotations};
use crate::error::ChartResult;
use crate::extensions::SessionEvent;
use crate::render::Renderer;

use super::ChartSession;

impl<R: Renderer> ChartSession<R> {
    /// Replaces the series with `bars`, feeds every item, and moves the
    /// window to the newest bar.
    ///
    /// Annotation lines are given in input order; they follow their bars
    /// through sorting and deduplication.
    pub fn load_history(&mut self, bars: Vec<Bar>, mut annotations: HistoryAnnotations) {
        self.apply_render_feedback();
        let original_count = bars.len();
        let kept = self.model.series.load(bars);
        annotations.realign_lines(&kept);
        debug!(
            original_count,
            canonical_count = self.model.series.count(),
            lines = annotations.lines.len(),
            trades = annotations.trades.len(),
            "load history"
        );

        for binding in &mut self.model.bindings {
            binding
                .item
                .on_history_loaded(self.model.series.bars(), &annotations);
        }
        self.model.cursor.clamp_to_count(self.model.series.count());

        self.emit_session_event(SessionEvent::HistoryLoaded {
            bars: self.model.series.count(),
        });
        self.reset_to_end();
    }

    /// Applies one realtime bar: appends when newer than the latest bar,
    /// replaces the latest bar when stamped at the same datetime.
    ///
    /// The series is updated before any derived state so index clamps see
    /// the new count.
    pub fn append_bar(&mut self, bar: Bar) -> ChartResult<BarUpdate> {
        self.apply_render_feedback();
        let update = self.model.series.update(bar)?;
        let index = update.index();
        trace!(index, count = self.model.series.count(), "append bar");

        for binding in &mut self.model.bindings {
            binding.item.on_bar_appended(&bar, index);
        }
        self.emit_session_event(SessionEvent::BarAppended {
            index,
            replaced: matches!(update, BarUpdate::Replaced { .. }),
        });

        let count = self.model.series.count();
        let window = self.model.viewport.window();
        if self.config.auto_follow_latest && window.right_ix >= count.saturating_sub(window.bar_count / 2)
        {
            self.reset_to_end();
        } else {
            self.model.sync_panes();
        }
        Ok(update)
    }

    /// Drops all bars, item state and cursor state.
    pub fn clear_all(&mut self) {
        self.model.series.clear();
        for binding in &mut self.model.bindings {
            binding.item.clear();
        }
        self.model.cursor.clear();
        self.model.viewport.clear();
        self.model.sync.reset();
        debug!("clear chart session");
        self.emit_session_event(SessionEvent::Cleared);
    }
}
