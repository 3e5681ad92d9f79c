use std::fmt;
use crate::LoadError;

/**
 * Deconstructed path to a map or tileset file.
 */
#[derive(Clone, Eq, PartialEq, Default, Debug, Hash)]
pub struct MapPath {
    pub prefix: Option<String>,
    pub body: String,
    pub extension: String,
}

impl MapPath {

    pub fn parse(path: &str) -> Result<Self, LoadError> {
        let (body, extension) = match path.rsplit_once('.') {
            Some((left, right)) if !right.contains('/') && !left.is_empty() => (left, right),
            _ => return Err(LoadError::PathMissingExtension),
        };
        Ok(Self {
            prefix: None,
            body: body.into(),
            extension: extension.into(),
        })
    }

    /// Prefix, body and extension.
    pub fn full_path(&self) -> String {
        match self.prefix.as_deref() {
            Some(prefix) => format!("{}/{}.{}", prefix, self.body, self.extension),
            None => format!("{}.{}", self.body, self.extension),
        }
    }

    /// Parent directory of this file, without the prefix.
    /// None if it's at the root.
    pub fn parent(&self) -> Option<String> {
        let (parent, _) = self.body.rsplit_once('/')?;
        Some(String::from(parent))
    }
}

impl fmt::Display for MapPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.full_path())
    }
}

/**
 * Wrapper for the hash of a path.
 */
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub struct PathHash(pub u64);
impl PathHash {
    pub fn of(path: &str) -> Self {
        Self(fxhash::hash64(path))
    }
}

#[cfg(test)]
mod test {
    use crate::{LoadError, MapPath};

    #[test]
    fn parse() {
        let path = MapPath::parse("maps/town/square.tmx").unwrap();
        assert_eq!("maps/town/square", path.body);
        assert_eq!("tmx", path.extension);
        assert_eq!(Some(String::from("maps/town")), path.parent());
        assert_eq!("maps/town/square.tmx", path.full_path());
    }

    #[test]
    fn prefix() {
        let mut path = MapPath::parse("square.tmx").unwrap();
        assert_eq!(None, path.parent());
        path.prefix = Some(String::from("assets"));
        assert_eq!("assets/square.tmx", path.to_string());
    }

    #[test]
    fn dotted_directory() {
        let path = MapPath::parse("maps.v2/square.tmx").unwrap();
        assert_eq!("maps.v2/square", path.body);
        assert_eq!(Err(LoadError::PathMissingExtension), MapPath::parse("maps.v2/square"));
        assert_eq!(Err(LoadError::PathMissingExtension), MapPath::parse(".tmx"));
    }
}
