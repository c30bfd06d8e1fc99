//! What the viewer currently shows.

/// Published state of the viewer.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState {
    /// A load is in flight.
    Loading,
    /// Normalized, animated markup ready to embed.
    Ready(String),
    /// Nothing to show: no input yet, or the last load failed.
    #[default]
    Empty,
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[cfg(test)]
    pub fn markup(&self) -> Option<&str> {
        match self {
            Self::Ready(markup) => Some(markup),
            _ => None,
        }
    }

    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Ready(_) => "ready",
            Self::Empty => "empty",
        }
    }
}

/// One published value of the viewer's output cell.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    /// Incremented for every distinct input; 0 before the first one.
    pub generation: u64,
    pub state: ViewState,
}
