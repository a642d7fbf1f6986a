//! Ordered, multi-valued tag storage.
//!
//! A music file may carry the same key several times (two `artist` tags, for
//! instance), and the order matters for positional selection. Keys compare
//! case-insensitively and are stored lowercased.

/// A single `key=value` tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    pub key: String,
    pub value: String,
}

impl Tag {
    pub fn new(key: &str, value: impl Into<String>) -> Self {
        Tag {
            key: key.to_lowercase(),
            value: value.into(),
        }
    }
}

/// Tags in file order.
///
/// # Examples
///
/// ```
/// use tagfilter::TagList;
///
/// let mut tags = TagList::new();
/// tags.insert("Artist", "A");
/// tags.insert("title", "Song");
/// tags.insert("ARTIST", "B");
///
/// assert_eq!(tags.find_all("artist").join(" - "), "A - B");
/// assert_eq!(tags.tag_at(1).map(|t| t.value.as_str()), Some("Song"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList {
    tags: Vec<Tag>,
}

impl TagList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a tag, after every existing one.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) {
        self.tags.push(Tag::new(key, value));
    }

    /// All tags whose key matches `key`, in file order.
    pub fn find_all(&self, key: &str) -> TagList {
        let key = key.to_lowercase();
        self.tags
            .iter()
            .filter(|t| t.key == key)
            .cloned()
            .collect()
    }

    /// Values of all tags matching `key`, in file order.
    pub fn values(&self, key: &str) -> Vec<String> {
        self.find_all(key).tags.into_iter().map(|t| t.value).collect()
    }

    /// The tag at position `index`, if any.
    pub fn tag_at(&self, index: usize) -> Option<&Tag> {
        self.tags.get(index)
    }

    /// Every value, in order, separated by `glue`.
    pub fn join(&self, glue: &str) -> String {
        self.tags
            .iter()
            .map(|t| t.value.as_str())
            .collect::<Vec<_>>()
            .join(glue)
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Tag> {
        self.tags.iter()
    }
}

impl<K: AsRef<str>, V: Into<String>> FromIterator<(K, V)> for TagList {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut list = TagList::new();
        for (key, value) in iter {
            list.insert(key.as_ref(), value);
        }
        list
    }
}

impl FromIterator<Tag> for TagList {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        TagList {
            tags: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a TagList {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}
