/// Fetch lifecycle of a list view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Loaded,
    Errored(String),
}

impl LoadState {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn error(&self) -> Option<String> {
        match self {
            LoadState::Errored(message) => Some(message.clone()),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_only_when_errored() {
        assert_eq!(LoadState::Loaded.error(), None);
        assert_eq!(
            LoadState::Errored("Failed to fetch documents".into()).error().as_deref(),
            Some("Failed to fetch documents")
        );
        assert!(LoadState::Loading.is_loading());
        assert!(!LoadState::default().is_loading());
    }
}
