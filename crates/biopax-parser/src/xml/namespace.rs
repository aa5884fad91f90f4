//! Prefix scoping for namespace declarations.

use std::rc::Rc;

use biopax_core::namespace::XML;

/// A prefix with no `xmlns:` declaration in scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct UndeclaredPrefix;

/// The in-scope `xmlns` declarations while walking a document.
///
/// Each open element pushes one scope, possibly empty; lookups search from
/// the innermost scope outwards. The `xml` prefix is always bound.
#[derive(Debug)]
pub(crate) struct NamespaceStack {
    scopes: Vec<Vec<(Option<String>, Option<Rc<str>>)>>,
}

impl NamespaceStack {
    pub fn new() -> Self {
        Self {
            scopes: vec![vec![(Some("xml".to_string()), Some(Rc::from(XML)))]],
        }
    }

    /// Opens a scope with the given `(prefix, uri)` declarations. A `None`
    /// prefix declares the default namespace; an empty URI undeclares it.
    pub fn push(&mut self, declarations: Vec<(Option<String>, String)>) {
        let scope = declarations
            .into_iter()
            .map(|(prefix, uri)| {
                let uri = (!uri.is_empty()).then(|| Rc::from(uri.as_str()));
                (prefix, uri)
            })
            .collect();
        self.scopes.push(scope);
    }

    pub fn pop(&mut self) {
        // The predefined scope is never popped.
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Namespace of an element name with the given prefix.
    ///
    /// Fails for an undeclared prefix. Unprefixed element names
    /// fall in the default namespace, if one is declared.
    pub fn element_namespace(
        &self,
        prefix: Option<&str>,
    ) -> Result<Option<Rc<str>>, UndeclaredPrefix> {
        match self.find(prefix) {
            Some(uri) => Ok(uri),
            None if prefix.is_none() => Ok(None),
            None => Err(UndeclaredPrefix),
        }
    }

    /// Namespace of an attribute name. Unprefixed attributes have none.
    pub fn attribute_namespace(
        &self,
        prefix: Option<&str>,
    ) -> Result<Option<Rc<str>>, UndeclaredPrefix> {
        match prefix {
            None => Ok(None),
            Some(_) => self.find(prefix).ok_or(UndeclaredPrefix),
        }
    }

    fn find(&self, prefix: Option<&str>) -> Option<Option<Rc<str>>> {
        self.scopes.iter().rev().find_map(|scope| {
            scope
                .iter()
                .rev()
                .find(|(declared, _)| declared.as_deref() == prefix)
                .map(|(_, uri)| uri.clone())
        })
    }
}

/// Splits `prefix:local` into its parts.
pub(crate) fn split_qualified(name: &str) -> (Option<&str>, &str) {
    match name.split_once(':') {
        Some((prefix, local)) => (Some(prefix), local),
        None => (None, name),
    }
}
