//! Dotted field paths used to locate diagnostics.

use std::fmt;

/// One step of a [`FieldPath`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum PathSegment {
    /// A named field or document key.
    Field(String),
    /// A position inside a sequence.
    Index(usize),
}

/// Location from the document root, rendered as `outer.inner[2]`.
///
/// # Examples
///
/// ```
/// use layered_config::FieldPath;
/// let path = FieldPath::root().child("field_message").child("items").index(2);
/// assert_eq!(path.to_string(), "field_message.items[2]");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct FieldPath(Vec<PathSegment>);

impl FieldPath {
    /// The empty path.
    #[must_use]
    pub const fn root() -> Self {
        Self(Vec::new())
    }

    /// Extends the path with a named field.
    #[must_use]
    pub fn child(&self, name: &str) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Field(name.to_owned()));
        Self(segments)
    }

    /// Extends the path with a sequence index.
    #[must_use]
    pub fn index(&self, position: usize) -> Self {
        let mut segments = self.0.clone();
        segments.push(PathSegment::Index(position));
        Self(segments)
    }

    /// Whether this is the empty path.
    #[must_use]
    pub const fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments from the root outwards.
    #[must_use]
    pub fn segments(&self) -> &[PathSegment] {
        &self.0
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            match segment {
                PathSegment::Field(name) if i == 0 => f.write_str(name)?,
                PathSegment::Field(name) => write!(f, ".{name}")?,
                PathSegment::Index(position) => write!(f, "[{position}]")?,
            }
        }
        Ok(())
    }
}

impl<S: AsRef<str>> FromIterator<S> for FieldPath {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|name| PathSegment::Field(name.as_ref().to_owned()))
                .collect(),
        )
    }
}
