//! Minimal path queries over [`XmlElement`] trees.
//!
//! Supported syntax is the subset the extractors use:
//! `w:p`, `w:pPr/w:pStyle`, `.//w:t`, `w:tbl//w:tc` and `*`.
//! Results are always in document order without duplicates.
use super::tree::XmlElement;

/// A fixed prefix→URI table used to interpret path steps.
#[derive(Debug, Clone, Copy)]
pub struct NamespaceMap {
    entries: &'static [(&'static str, &'static str)],
}

impl NamespaceMap {
    /// Create a map from static `(prefix, uri)` pairs.
    pub const fn new(entries: &'static [(&'static str, &'static str)]) -> Self {
        Self { entries }
    }

    /// Namespace URI bound to `prefix`.
    pub fn uri(&self, prefix: &str) -> Option<&'static str> {
        self.entries
            .iter()
            .find(|(p, _)| *p == prefix)
            .map(|(_, uri)| *uri)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, Copy)]
enum NameTest<'p> {
    Any,
    Local(&'p str),
    Qualified(&'static str, &'p str),
    /// Prefix missing from the namespace map; matches nothing.
    Unbound,
}

impl NameTest<'_> {
    fn matches(&self, element: &XmlElement) -> bool {
        match *self {
            NameTest::Any => true,
            NameTest::Local(local) => element.name() == local,
            NameTest::Qualified(uri, local) => element.is(uri, local),
            NameTest::Unbound => false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Step<'p> {
    axis: Axis,
    test: NameTest<'p>,
}

fn compile<'p>(path: &'p str, namespaces: &NamespaceMap) -> Vec<Step<'p>> {
    let (mut axis, rest) = if let Some(rest) = path.strip_prefix(".//") {
        (Axis::Descendant, rest)
    } else if let Some(rest) = path.strip_prefix("//") {
        (Axis::Descendant, rest)
    } else if let Some(rest) = path.strip_prefix("./") {
        (Axis::Child, rest)
    } else {
        (Axis::Child, path)
    };

    let mut steps = Vec::new();
    for segment in rest.split('/') {
        if segment.is_empty() {
            axis = Axis::Descendant;
            continue;
        }
        let test = match segment.split_once(':') {
            _ if segment == "*" => NameTest::Any,
            Some((prefix, local)) => match namespaces.uri(prefix) {
                Some(uri) => NameTest::Qualified(uri, local),
                None => {
                    log::warn!("path {:?} uses unbound prefix {:?}", path, prefix);
                    NameTest::Unbound
                },
            },
            None => NameTest::Local(segment),
        };
        steps.push(Step { axis, test });
        axis = Axis::Child;
    }
    steps
}

/// All elements reached from `scope` by `path`, in document order.
pub fn find_all<'a>(scope: &'a XmlElement, path: &str, namespaces: &NamespaceMap) -> Vec<&'a XmlElement> {
    let steps = compile(path, namespaces);
    if steps.is_empty() {
        return vec![scope];
    }

    let mut current: Vec<&'a XmlElement> = vec![scope];
    for step in &steps {
        let mut next: Vec<&'a XmlElement> = Vec::new();
        for &node in &current {
            match step.axis {
                Axis::Child => next.extend(node.child_elements().filter(|e| step.test.matches(e))),
                Axis::Descendant => next.extend(node.descendants().filter(|e| step.test.matches(e))),
            }
        }
        // Overlapping descendant scans can revisit elements
        next.sort_by_key(|e| e.position());
        next.dedup_by_key(|e| e.position());
        current = next;
        if current.is_empty() {
            break;
        }
    }
    current
}

/// First element reached from `scope` by `path`, in document order.
pub fn find_first<'a>(scope: &'a XmlElement, path: &str, namespaces: &NamespaceMap) -> Option<&'a XmlElement> {
    find_all(scope, path, namespaces).into_iter().next()
}
