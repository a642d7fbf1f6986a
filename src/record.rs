use crate::taglist::TagList;

/// The thing a filter is evaluated against: one file with its tags.
///
/// The filter engine only reads records. Backends adapt whatever in-memory
/// representation they keep into this shape.
pub trait Record {
    /// Path of the file, matched by the `filename` keyword.
    fn path(&self) -> &str;

    /// Identifier of the backend that read the tags, matched by `backend`.
    fn backend_id(&self) -> &str;

    /// Every value of `key`, in file order. Empty means the tag is undefined.
    fn lookup(&self, key: &str) -> Vec<String>;
}

impl<R: Record + ?Sized> Record for &R {
    fn path(&self) -> &str {
        (**self).path()
    }

    fn backend_id(&self) -> &str {
        (**self).backend_id()
    }

    fn lookup(&self, key: &str) -> Vec<String> {
        (**self).lookup(key)
    }
}

/// In-memory [`Record`] backed by a [`TagList`].
///
/// # Examples
///
/// ```
/// use tagfilter::{Record, TagRecord};
///
/// let record = TagRecord::new("music/track01.flac", "libFLAC")
///     .with_tag("artist", "A")
///     .with_tag("artist", "B");
///
/// assert_eq!(record.lookup("artist"), vec!["A", "B"]);
/// assert!(record.lookup("genre").is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagRecord {
    pub path: String,
    pub backend: String,
    pub tags: TagList,
}

impl TagRecord {
    pub fn new(path: impl Into<String>, backend: impl Into<String>) -> Self {
        TagRecord {
            path: path.into(),
            backend: backend.into(),
            tags: TagList::new(),
        }
    }

    pub fn with_tag(mut self, key: &str, value: impl Into<String>) -> Self {
        self.tags.insert(key, value);
        self
    }

    pub fn with_tags(mut self, tags: TagList) -> Self {
        self.tags = tags;
        self
    }
}

impl Record for TagRecord {
    fn path(&self) -> &str {
        &self.path
    }

    fn backend_id(&self) -> &str {
        &self.backend
    }

    fn lookup(&self, key: &str) -> Vec<String> {
        self.tags.values(key)
    }
}
