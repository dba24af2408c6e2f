use crate::error::{BuilderStateError, Result};

/// Lifecycle of a signature builder.
///
/// Every mutator checks for `Open` on entry; `build()` moves the builder
/// to `Built`, after which every call fails with
/// [`BuilderStateError::AlreadyBuilt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BuilderState {
    #[default]
    Open,
    Built,
}

impl BuilderState {
    pub(crate) fn ensure_open(self) -> Result<()> {
        match self {
            BuilderState::Open => Ok(()),
            BuilderState::Built => Err(BuilderStateError::AlreadyBuilt.into()),
        }
    }

    pub(crate) fn finish(&mut self) {
        *self = BuilderState::Built;
    }

    pub fn is_open(self) -> bool {
        self == BuilderState::Open
    }
}

/// Store `value` into a single-assignment slot.
pub(crate) fn set_once<T>(slot: &mut Option<T>, value: T, field: &'static str) -> Result<()> {
    if slot.is_some() {
        return Err(BuilderStateError::AlreadySet(field).into());
    }
    *slot = Some(value);
    Ok(())
}

/// Take a mandatory slot at build time.
pub(crate) fn require<T: Clone>(slot: &Option<T>, field: &'static str) -> Result<T> {
    slot.clone()
        .ok_or_else(|| BuilderStateError::MissingRequired(field).into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SignatureError;

    #[test]
    fn built_state_rejects_mutation() {
        let mut state = BuilderState::default();
        assert!(state.ensure_open().is_ok());
        state.finish();
        assert!(!state.is_open());
        assert_eq!(
            state.ensure_open().unwrap_err(),
            SignatureError::Builder(BuilderStateError::AlreadyBuilt)
        );
    }

    #[test]
    fn set_once_rejects_second_value() {
        let mut slot = None;
        set_once(&mut slot, 1, "value").unwrap();
        assert_eq!(
            set_once(&mut slot, 2, "value").unwrap_err(),
            SignatureError::Builder(BuilderStateError::AlreadySet("value"))
        );
        assert_eq!(slot, Some(1));
    }

    #[test]
    fn require_reports_missing_field() {
        let slot: Option<u8> = None;
        assert_eq!(
            require(&slot, "super class").unwrap_err(),
            SignatureError::Builder(BuilderStateError::MissingRequired("super class"))
        );
    }
}
