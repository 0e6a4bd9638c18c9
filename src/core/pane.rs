use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::{ScreenPoint, ScreenRect};
use crate::error::{ChartError, ChartResult};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PaneId(String);

impl PaneId {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PaneId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Layout hints forwarded to the host when it stacks panes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaneOptions {
    /// Price pane whose info text renders into the header label.
    pub primary: bool,
    pub minimum_height: u32,
    pub maximum_height: Option<u32>,
    pub hide_x_axis: bool,
}

impl Default for PaneOptions {
    fn default() -> Self {
        Self {
            primary: false,
            minimum_height: 80,
            maximum_height: None,
            hide_x_axis: false,
        }
    }
}

impl PaneOptions {
    #[must_use]
    pub fn primary() -> Self {
        Self {
            primary: true,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_height_bounds(mut self, minimum_height: u32, maximum_height: Option<u32>) -> Self {
        self.minimum_height = minimum_height;
        self.maximum_height = maximum_height;
        self
    }

    #[must_use]
    pub fn with_hidden_x_axis(mut self) -> Self {
        self.hide_x_axis = true;
        self
    }

    fn validate(self) -> ChartResult<Self> {
        if let Some(maximum) = self.maximum_height {
            if maximum < self.minimum_height {
                return Err(ChartError::InvalidConfig(format!(
                    "pane maximum height {maximum} is below minimum height {}",
                    self.minimum_height
                )));
            }
        }
        Ok(self)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaneDescriptor {
    pub id: PaneId,
    pub options: PaneOptions,
    pub geometry: Option<ScreenRect>,
}

/// Insertion-ordered panes; order is the top-to-bottom stacking order and
/// the first pane drives the shared x range.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaneRegistry {
    panes: IndexMap<PaneId, PaneDescriptor>,
}

impl PaneRegistry {
    pub fn register(&mut self, id: PaneId, options: PaneOptions) -> ChartResult<()> {
        let options = options.validate()?;
        if self.panes.contains_key(&id) {
            return Err(ChartError::DuplicatePane(id));
        }
        if options.primary {
            if let Some(existing) = self.primary_pane_id() {
                return Err(ChartError::PrimaryPaneAlreadySet(existing.clone()));
            }
        }
        self.panes.insert(
            id.clone(),
            PaneDescriptor {
                id,
                options,
                geometry: None,
            },
        );
        Ok(())
    }

    pub fn set_geometry(&mut self, id: &PaneId, rect: ScreenRect) -> ChartResult<()> {
        let Some(pane) = self.panes.get_mut(id) else {
            return Err(ChartError::InvalidData(format!("unknown pane `{id}`")));
        };
        pane.geometry = Some(rect);
        Ok(())
    }

    #[must_use]
    pub fn contains(&self, id: &PaneId) -> bool {
        self.panes.contains_key(id)
    }

    #[must_use]
    pub fn get(&self, id: &PaneId) -> Option<&PaneDescriptor> {
        self.panes.get(id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PaneDescriptor> {
        self.panes.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &PaneId> {
        self.panes.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panes.is_empty()
    }

    #[must_use]
    pub fn master_pane_id(&self) -> Option<&PaneId> {
        self.panes.keys().next()
    }

    #[must_use]
    pub fn bottom_pane_id(&self) -> Option<&PaneId> {
        self.panes.keys().last()
    }

    #[must_use]
    pub fn primary_pane_id(&self) -> Option<&PaneId> {
        self.panes
            .values()
            .find(|pane| pane.options.primary)
            .map(|pane| &pane.id)
    }

    /// First pane, in stacking order, whose geometry contains the point.
    #[must_use]
    pub fn hit_test(&self, point: ScreenPoint) -> Option<&PaneDescriptor> {
        self.panes
            .values()
            .find(|pane| pane.geometry.is_some_and(|rect| rect.contains(point)))
    }
}

#[cfg(test)]
mod tests {
    use super::{PaneId, PaneOptions, PaneRegistry};
    use crate::core::{ScreenPoint, ScreenRect};
    use crate::error::ChartError;

    #[test]
    fn registry_keeps_insertion_order_and_master() {
        let mut panes = PaneRegistry::default();
        panes.register("candle".into(), PaneOptions::primary()).expect("candle");
        panes.register("volume".into(), PaneOptions::default()).expect("volume");
        let order: Vec<&str> = panes.ids().map(PaneId::as_str).collect();
        assert_eq!(order, vec!["candle", "volume"]);
        assert_eq!(panes.master_pane_id().map(PaneId::as_str), Some("candle"));
        assert_eq!(panes.bottom_pane_id().map(PaneId::as_str), Some("volume"));
        assert_eq!(panes.primary_pane_id().map(PaneId::as_str), Some("candle"));
    }

    #[test]
    fn registry_rejects_duplicates_and_second_primary() {
        let mut panes = PaneRegistry::default();
        panes.register("a".into(), PaneOptions::primary()).expect("a");
        assert!(matches!(
            panes.register("a".into(), PaneOptions::default()),
            Err(ChartError::DuplicatePane(_))
        ));
        assert!(matches!(
            panes.register("b".into(), PaneOptions::primary()),
            Err(ChartError::PrimaryPaneAlreadySet(_))
        ));
        assert!(matches!(
            panes.register(
                "c".into(),
                PaneOptions::default().with_height_bounds(100, Some(50))
            ),
            Err(ChartError::InvalidConfig(_))
        ));
    }

    #[test]
    fn hit_test_returns_first_pane_in_order() {
        let mut panes = PaneRegistry::default();
        panes.register("a".into(), PaneOptions::default()).expect("a");
        panes.register("b".into(), PaneOptions::default()).expect("b");
        let rect = ScreenRect::new(0.0, 0.0, 100.0, 100.0).expect("rect");
        panes.set_geometry(&"a".into(), rect).expect("geometry a");
        panes.set_geometry(&"b".into(), rect).expect("geometry b");
        let hit = panes.hit_test(ScreenPoint::new(5.0, 5.0)).expect("hit");
        assert_eq!(hit.id.as_str(), "a");
        assert!(panes.hit_test(ScreenPoint::new(500.0, 5.0)).is_none());
    }
}
