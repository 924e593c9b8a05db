use remodel_core::Mode;

/// Settings a [`Registry`](crate::Registry) builds with.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuildConfig {
    /// How forgiving construction is. Defaults to [`Mode::Permissive`].
    pub mode: Mode,
}

impl BuildConfig {
    /// Copy what cannot be rebuilt, skip what does not fit.
    pub const fn permissive() -> Self {
        Self {
            mode: Mode::Permissive,
        }
    }

    /// Reject unresolved field types, unknown keys and non-mapping documents.
    pub const fn strict() -> Self {
        Self { mode: Mode::Strict }
    }

    /// Replaces the mode.
    #[must_use]
    pub const fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }
}
