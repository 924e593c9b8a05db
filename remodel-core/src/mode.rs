/// How forgiving construction is about documents that do not fit the model.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Copy what cannot be rebuilt verbatim, skip keys the model does not
    /// have, and build non-mapping documents into default instances.
    #[default]
    Permissive,

    /// Reject unresolved field types, unknown keys and non-mapping documents.
    Strict,
}

impl Mode {
    /// Returns true for [`Mode::Strict`].
    pub fn is_strict(self) -> bool {
        matches!(self, Mode::Strict)
    }
}
