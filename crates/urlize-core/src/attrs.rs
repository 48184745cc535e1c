use crate::text::escape_attr;

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum AttrValue {
    Text(String),
    List(Vec<String>),
}

impl AttrValue {
    fn joined(&self) -> Option<String> {
        match self {
            AttrValue::Text(text) if !text.is_empty() => Some(text.clone()),
            AttrValue::List(items) if !items.is_empty() => Some(items.join(" ")),
            _ => None,
        }
    }
}

/// Ordered attribute set for one anchor tag.
///
/// Keys keep their first insertion position; setting a key again replaces the
/// value in place.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HtmlAttrs {
    items: Vec<(&'static str, AttrValue)>,
}

impl HtmlAttrs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: &'static str, value: AttrValue) {
        match self.items.iter_mut().find(|(name, _)| *name == key) {
            Some((_, slot)) => *slot = value,
            None => self.items.push((key, value)),
        }
    }

    pub fn set_text(&mut self, key: &'static str, value: impl Into<String>) {
        self.set(key, AttrValue::Text(value.into()));
    }

    /// Appends a token to a list attribute, creating it if needed.
    pub fn push_token(&mut self, key: &'static str, token: impl Into<String>) {
        let token = token.into();
        match self.items.iter_mut().find(|(name, _)| *name == key) {
            Some((_, AttrValue::List(items))) => items.push(token),
            Some((_, slot)) => *slot = AttrValue::List(vec![token]),
            None => self.items.push((key, AttrValue::List(vec![token]))),
        }
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.items
            .iter()
            .find(|(name, _)| *name == key)
            .map(|(_, value)| value)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Serializes as ` key="value"` pairs, skipping empty text and empty lists.
    pub fn render(&self) -> String {
        let mut out = String::new();
        for (key, value) in &self.items {
            if let Some(value) = value.joined() {
                out.push_str(&format!(" {}=\"{}\"", key, escape_attr(&value)));
            }
        }
        out
    }
}
