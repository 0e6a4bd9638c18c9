pub mod candle_item;
pub mod item;
pub mod line_item;
pub mod pane;
pub mod pane_sync;
pub mod primitives;
pub mod scale;
pub mod series;
pub mod types;
pub mod windowing;

pub use candle_item::{CandleItem, VolumeItem, bar_price_range};
pub use item::{HistoryAnnotations, ItemBinding, RenderableItem, TradeDirection, TradeMarker};
pub use line_item::LineItem;
pub use pane::{PaneDescriptor, PaneId, PaneOptions, PaneRegistry};
pub use pane_sync::{PaddingPolicy, PaneSynchronizer, PaneView};
pub use scale::{LinearScale, PaneTransform};
pub use series::{BarSeries, BarUpdate};
pub use types::{Bar, PaneLimits, ScreenPoint, ScreenRect, ValueRange};
pub use windowing::{DEFAULT_MIN_BAR_COUNT, DEFAULT_ZOOM_STEP, ViewportController, VisibleWindow};
