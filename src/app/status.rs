//! Status surface: the single loading / error / empty indicator.
//!
//! At most one indicator is presented at a time. Setting one replaces
//! whichever was showing; clearing a flag only has an effect when that flag is
//! the one being shown, so a late `set_loading(false)` cannot wipe an error.

/// Shown instead of an empty grid when a search matches nothing.
pub const NO_RESULTS_MESSAGE: &str = "No results found. Try a different search term or image.";

/// What the status line currently shows.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum StatusIndicator {
    #[default]
    None,
    Loading,
    Error(String),
    Empty,
}

/// Holder for the current [`StatusIndicator`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatusSurface {
    indicator: StatusIndicator,
}

impl StatusSurface {
    /// Shows or clears the loading indicator.
    ///
    /// Re-entrant: setting it while already loading changes nothing.
    pub fn set_loading(&mut self, loading: bool) {
        if loading {
            self.indicator = StatusIndicator::Loading;
        } else if self.indicator == StatusIndicator::Loading {
            self.indicator = StatusIndicator::None;
        }
    }

    /// Shows `message` as an error, or clears a showing error on `None`.
    pub fn set_error(&mut self, message: Option<String>) {
        match message {
            Some(message) => self.indicator = StatusIndicator::Error(message),
            None => {
                if matches!(self.indicator, StatusIndicator::Error(_)) {
                    self.indicator = StatusIndicator::None;
                }
            }
        }
    }

    /// Shows or clears the "no results" indicator.
    pub fn set_empty(&mut self, empty: bool) {
        if empty {
            self.indicator = StatusIndicator::Empty;
        } else if self.indicator == StatusIndicator::Empty {
            self.indicator = StatusIndicator::None;
        }
    }

    /// Clears whatever is showing.
    pub fn clear(&mut self) {
        self.indicator = StatusIndicator::None;
    }

    #[must_use]
    pub const fn indicator(&self) -> &StatusIndicator {
        &self.indicator
    }

    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self.indicator, StatusIndicator::None)
    }

    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self.indicator, StatusIndicator::Loading)
    }

    /// The error message, if an error is showing.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match &self.indicator {
            StatusIndicator::Error(message) => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indicators_are_mutually_exclusive() {
        let mut status = StatusSurface::default();
        status.set_loading(true);
        status.set_error(Some("boom".to_string()));
        assert_eq!(status.indicator(), &StatusIndicator::Error("boom".to_string()));

        status.set_empty(true);
        assert_eq!(status.indicator(), &StatusIndicator::Empty);
        assert!(status.error().is_none());
    }

    #[test]
    fn loading_twice_is_one_indicator() {
        let mut status = StatusSurface::default();
        status.set_loading(true);
        let once = status.clone();
        status.set_loading(true);
        assert_eq!(status, once);
        assert!(status.is_loading());
    }

    #[test]
    fn clearing_a_flag_that_is_not_shown_is_a_no_op() {
        let mut status = StatusSurface::default();
        status.set_error(Some("boom".to_string()));
        status.set_loading(false);
        status.set_empty(false);
        assert_eq!(status.error(), Some("boom"));

        status.set_error(None);
        assert!(status.is_none());
    }
}
