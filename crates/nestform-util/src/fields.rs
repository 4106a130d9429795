/// One or more field paths.
///
/// Operations that accept "a path or a list of paths" take
/// `impl Into<Fields>`, so callers can pass `"a.b"`, a `String`, an array or
/// a `Vec`.
///
/// # Examples
///
/// ```
/// use nestform_util::Fields;
///
/// let one: Fields = "user.name".into();
/// let many: Fields = ["user.name", "user.email"].into();
///
/// assert_eq!(one.as_slice(), ["user.name"]);
/// assert_eq!(many.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fields(Vec<String>);

impl Fields {
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|f| f == field)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<&str> for Fields {
    fn from(field: &str) -> Self {
        Fields(vec![field.to_string()])
    }
}

impl From<String> for Fields {
    fn from(field: String) -> Self {
        Fields(vec![field])
    }
}

impl From<&String> for Fields {
    fn from(field: &String) -> Self {
        Fields(vec![field.clone()])
    }
}

impl From<Vec<String>> for Fields {
    fn from(fields: Vec<String>) -> Self {
        Fields(fields)
    }
}

impl From<Vec<&str>> for Fields {
    fn from(fields: Vec<&str>) -> Self {
        Fields(fields.into_iter().map(str::to_string).collect())
    }
}

impl From<&[&str]> for Fields {
    fn from(fields: &[&str]) -> Self {
        Fields(fields.iter().map(|f| f.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for Fields {
    fn from(fields: [&str; N]) -> Self {
        Fields(fields.iter().map(|f| f.to_string()).collect())
    }
}

impl<'a> IntoIterator for &'a Fields {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for Fields {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_becomes_list() {
        let fields: Fields = "hello".into();
        assert_eq!(fields.as_slice(), ["hello"]);
    }

    #[test]
    fn test_list_kept() {
        let fields: Fields = vec!["one", "two", "three"].into();
        assert_eq!(fields.as_slice(), ["one", "two", "three"]);
        assert!(fields.contains("two"));
        assert!(!fields.contains("four"));
    }

    #[test]
    fn test_owned_strings() {
        let fields: Fields = vec!["a".to_string()].into();
        assert_eq!(fields.into_iter().collect::<Vec<_>>(), vec!["a".to_string()]);
    }
}
