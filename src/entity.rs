//! Entity contract shared by every record kind the data accessor stores.

/// A record that can live in a [`DataAccessor`](crate::DataAccessor).
///
/// The only capability required is a read/write integer identifier, unique
/// among entities of the same kind. An identifier of `0` (or below) means
/// the entity has not been stored yet.
///
/// ```ignore
/// #[derive(Clone)]
/// struct Note {
///     id: i32,
///     body: String,
/// }
///
/// impl Entity for Note {
///     const KIND: &'static str = "note";
///     fn id(&self) -> i32 { self.id }
///     fn set_id(&mut self, id: i32) { self.id = id; }
/// }
/// ```
pub trait Entity: Clone + Send + Sync + 'static {
    /// Kind name used in log fields and error messages (e.g. "sticker").
    const KIND: &'static str;

    /// Returns the identifier of this entity.
    fn id(&self) -> i32;

    /// Overwrites the identifier of this entity.
    fn set_id(&mut self, id: i32);

    /// True once the entity has been assigned an identifier by a store.
    fn is_persisted(&self) -> bool {
        self.id() > 0
    }
}
