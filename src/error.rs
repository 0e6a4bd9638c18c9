use thiserror::Error;

use crate::core::PaneId;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("item `{item}` references unknown pane `{pane}`")]
    UnboundPane { item: String, pane: PaneId },

    #[error("pane `{0}` is already registered")]
    DuplicatePane(PaneId),

    #[error("item `{0}` is already bound")]
    DuplicateItem(String),

    #[error("a primary pane is already registered: `{0}`")]
    PrimaryPaneAlreadySet(PaneId),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("failed to parse session config: {0}")]
    Config(#[from] serde_json::Error),
}
