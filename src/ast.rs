/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! The AST model (`spec.md` §3, §4.5): a uniform node type with
//! parent/child linkage, a descendant cache with upward invalidation,
//! derived queries, and canonical re-serialization.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use crate::position::Position;

/// The closed set of AST node kinds.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum NodeType {
    SelectorList,
    Selector,
    SimpleSelectorSequence,
    TypeSelector,
    UniversalSelector,
    IdSelector,
    ClassSelector,
    AttributeSelector,
    PseudoClass,
    PseudoElement,
    PseudoFunction,
    Attribute,
    Value,
    EqualOperator,
    IncludesOperator,
    DashmatchOperator,
    PrefixmatchOperator,
    SuffixmatchOperator,
    SubstringmatchOperator,
    Argument,
    AnPlusB,
    ChildCombinator,
    AdjacentCombinator,
    SiblingCombinator,
    DescendantCombinator,
}

struct NodeData {
    node_type: NodeType,
    value: Option<String>,
    children: Vec<Node>,
    parent: Option<Weak<RefCell<NodeData>>>,
    position: Position,
    descendants_cache: Option<Rc<Vec<Node>>>,
}

/// A handle to one AST node.
///
/// Cloning a `Node` clones the handle (an `Rc`), not the subtree: all
/// clones refer to the same underlying node. The tree exclusively owns
/// its nodes through `children`; `parent` is a weak back-reference,
/// never an ownership edge (`spec.md` §3 "Ownership").
#[derive(Clone)]
pub struct Node(Rc<RefCell<NodeData>>);

impl Node {
    /// Creates a new, parentless, childless node.
    pub fn new(node_type: NodeType, value: Option<String>, position: Position) -> Node {
        Node(Rc::new(RefCell::new(NodeData {
            node_type,
            value,
            children: Vec::new(),
            parent: None,
            position,
            descendants_cache: None,
        })))
    }

    pub fn node_type(&self) -> NodeType {
        self.0.borrow().node_type
    }

    pub fn value(&self) -> Option<String> {
        self.0.borrow().value.clone()
    }

    pub fn position(&self) -> Position {
        self.0.borrow().position
    }

    pub fn children(&self) -> Vec<Node> {
        self.0.borrow().children.clone()
    }

    pub fn child_count(&self) -> usize {
        self.0.borrow().children.len()
    }

    pub fn parent(&self) -> Option<Node> {
        self.0
            .borrow()
            .parent
            .as_ref()
            .and_then(Weak::upgrade)
            .map(Node)
    }

    /// Appends `child`, sets its parent to `self`, and invalidates the
    /// descendant cache on `self` and every ancestor.
    pub fn add_child(&self, child: Node) {
        child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children.push(child);
        self.invalidate_cache_upward();
    }

    /// Replaces `children[index]` with `new_child`, detaching the old
    /// child's parent link, and invalidates the descendant cache on
    /// `self` and every ancestor. Out-of-range indices are a no-op.
    pub fn replace_child(&self, index: usize, new_child: Node) {
        let len = self.0.borrow().children.len();
        if index >= len {
            return;
        }
        let old = self.0.borrow().children[index].clone();
        old.0.borrow_mut().parent = None;
        new_child.0.borrow_mut().parent = Some(Rc::downgrade(&self.0));
        self.0.borrow_mut().children[index] = new_child;
        self.invalidate_cache_upward();
    }

    fn invalidate_cache_upward(&self) {
        let mut current = Some(self.clone());
        while let Some(node) = current {
            node.0.borrow_mut().descendants_cache = None;
            current = node.parent();
        }
    }

    /// All nodes reachable through `children`, self excluded, in
    /// pre-order. Cached: repeat calls return the same `Rc` (same
    /// object identity) until `add_child`/`replace_child` invalidates
    /// it somewhere in the subtree.
    pub fn descendants(&self) -> Rc<Vec<Node>> {
        if let Some(cached) = self.0.borrow().descendants_cache.as_ref() {
            return Rc::clone(cached);
        }
        let mut out = Vec::new();
        for child in self.children() {
            out.push(child.clone());
            out.extend(child.descendants().iter().cloned());
        }
        let out = Rc::new(out);
        self.0.borrow_mut().descendants_cache = Some(Rc::clone(&out));
        out
    }

    /// `parent`, grandparent, … up to the root. Not cached.
    pub fn ancestors(&self) -> Vec<Node> {
        let mut out = Vec::new();
        let mut current = self.parent();
        while let Some(node) = current {
            current = node.parent();
            out.push(node);
        }
        out
    }

    /// `parent.children` minus `self`, in order. Empty if `self` is
    /// the root.
    pub fn siblings(&self) -> Vec<Node> {
        match self.parent() {
            None => Vec::new(),
            Some(parent) => parent
                .children()
                .into_iter()
                .filter(|n| !Rc::ptr_eq(&n.0, &self.0))
                .collect(),
        }
    }

    fn self_and_descendants(&self) -> Vec<Node> {
        let mut out = vec![self.clone()];
        out.extend(self.descendants().iter().cloned());
        out
    }

    /// The first `id_selector`'s value found in `self` or its
    /// descendants, in tree order.
    pub fn id(&self) -> Option<String> {
        self.self_and_descendants()
            .into_iter()
            .find(|n| n.node_type() == NodeType::IdSelector)
            .and_then(|n| n.value())
    }

    pub fn has_id(&self) -> bool {
        self.id().is_some()
    }

    /// Every `class_selector`'s value, in tree order.
    pub fn classes(&self) -> Vec<String> {
        self.self_and_descendants()
            .into_iter()
            .filter(|n| n.node_type() == NodeType::ClassSelector)
            .filter_map(|n| n.value())
            .collect()
    }

    /// Every attribute selector in `self` or its descendants, in tree
    /// order.
    pub fn attributes(&self) -> Vec<AttributeInfo> {
        self.self_and_descendants()
            .into_iter()
            .filter(|n| n.node_type() == NodeType::AttributeSelector)
            .map(AttributeInfo::from_node)
            .collect()
    }

    pub fn has_attribute(&self) -> bool {
        self.self_and_descendants()
            .iter()
            .any(|n| n.node_type() == NodeType::AttributeSelector)
    }

    /// The value of every `pseudo_class`, `pseudo_element`, or
    /// `pseudo_function` node, in tree order.
    pub fn pseudo_classes(&self) -> Vec<String> {
        self.self_and_descendants()
            .into_iter()
            .filter(|n| {
                matches!(
                    n.node_type(),
                    NodeType::PseudoClass | NodeType::PseudoElement | NodeType::PseudoFunction
                )
            })
            .filter_map(|n| n.value())
            .collect()
    }

    /// True iff `self`'s direct children mix at least two distinct
    /// kinds from {id, class, attribute, pseudo, type}. Two classes do
    /// not count as compound.
    pub fn is_compound_selector(&self) -> bool {
        let mut kinds = std::collections::HashSet::new();
        for child in self.children() {
            let kind = match child.node_type() {
                NodeType::IdSelector => "id",
                NodeType::ClassSelector => "class",
                NodeType::AttributeSelector => "attribute",
                NodeType::PseudoClass | NodeType::PseudoElement | NodeType::PseudoFunction => {
                    "pseudo"
                }
                NodeType::TypeSelector | NodeType::UniversalSelector => "type",
                _ => continue,
            };
            kinds.insert(kind);
        }
        kinds.len() >= 2
    }

    /// True iff any `type_selector` appears in `self` or its
    /// descendants.
    pub fn has_type_selector(&self) -> bool {
        self.self_and_descendants()
            .iter()
            .any(|n| n.node_type() == NodeType::TypeSelector)
    }

    /// Deterministic canonical re-serialization (`spec.md` §4.5). Not
    /// lossless: original whitespace, quote style, and escape encoding
    /// are normalized.
    pub fn to_selector(&self) -> String {
        let data = self.0.borrow();
        match data.node_type {
            NodeType::SelectorList => data
                .children
                .iter()
                .map(Node::to_selector)
                .collect::<Vec<_>>()
                .join(", "),
            NodeType::Selector | NodeType::SimpleSelectorSequence => {
                data.children.iter().map(Node::to_selector).collect()
            }
            NodeType::TypeSelector | NodeType::UniversalSelector => {
                data.value.clone().unwrap_or_default()
            }
            NodeType::IdSelector => format!("#{}", data.value.as_deref().unwrap_or("")),
            NodeType::ClassSelector => format!(".{}", data.value.as_deref().unwrap_or("")),
            NodeType::PseudoClass => format!(":{}", data.value.as_deref().unwrap_or("")),
            NodeType::PseudoElement => format!("::{}", data.value.as_deref().unwrap_or("")),
            NodeType::PseudoFunction => {
                let arg = data
                    .children
                    .first()
                    .map(Node::to_selector)
                    .unwrap_or_default();
                format!(":{}({})", data.value.as_deref().unwrap_or(""), arg)
            }
            NodeType::AttributeSelector => serialize_attribute(&data),
            NodeType::Argument => quote_value(data.value.as_deref().unwrap_or("")),
            NodeType::AnPlusB => data.value.clone().unwrap_or_default(),
            NodeType::ChildCombinator => " > ".to_string(),
            NodeType::AdjacentCombinator => " + ".to_string(),
            NodeType::SiblingCombinator => " ~ ".to_string(),
            NodeType::DescendantCombinator => " ".to_string(),
            NodeType::Attribute | NodeType::Value => data.value.clone().unwrap_or_default(),
            NodeType::EqualOperator
            | NodeType::IncludesOperator
            | NodeType::DashmatchOperator
            | NodeType::PrefixmatchOperator
            | NodeType::SuffixmatchOperator
            | NodeType::SubstringmatchOperator => data.value.clone().unwrap_or_default(),
        }
    }
}

fn serialize_attribute(data: &NodeData) -> String {
    if data.children.is_empty() {
        return format!("[{}]", data.value.as_deref().unwrap_or(""));
    }
    let name = data.children[0].value().unwrap_or_default();
    let operator = operator_symbol(data.children[1].node_type());
    let value = data.children[2].value().unwrap_or_default();
    format!("[{}{}{}]", name, operator, quote_value(&value))
}

/// Wraps a raw `Argument`/attribute value in quotes for re-serialization.
///
/// The lexer never unescapes quoted-string content (`spec.md` §9), so a
/// backslash this function inserts survives literally on re-parse
/// rather than collapsing back to the original text — escaping a value
/// containing a `"` would therefore not round-trip back to the same
/// value. Switching the output delimiter to `'` avoids that for the
/// common case (a value with a `"` but no `'`); only a value containing
/// both quote characters falls back to escaping, which stays
/// re-parseable but is not perfectly lossless.
fn quote_value(value: &str) -> String {
    if value.contains('"') && !value.contains('\'') {
        format!("'{value}'")
    } else {
        format!("\"{}\"", value.replace('"', "\\\""))
    }
}

fn operator_symbol(node_type: NodeType) -> &'static str {
    match node_type {
        NodeType::EqualOperator => "=",
        NodeType::IncludesOperator => "~=",
        NodeType::DashmatchOperator => "|=",
        NodeType::PrefixmatchOperator => "^=",
        NodeType::SuffixmatchOperator => "$=",
        NodeType::SubstringmatchOperator => "*=",
        _ => "",
    }
}

/// One attribute selector's decomposed shape, returned by
/// [`Node::attributes`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct AttributeInfo {
    pub name: String,
    pub operator: Option<String>,
    pub value: Option<String>,
}

impl AttributeInfo {
    fn from_node(node: Node) -> AttributeInfo {
        if node.child_count() == 0 {
            return AttributeInfo {
                name: node.value().unwrap_or_default(),
                operator: None,
                value: None,
            };
        }
        let children = node.children();
        AttributeInfo {
            name: children[0].value().unwrap_or_default(),
            operator: Some(operator_symbol(children[1].node_type()).to_string()),
            value: children[2].value(),
        }
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let data = self.0.borrow();
        let mut dbg = f.debug_struct("Node");
        dbg.field("node_type", &data.node_type);
        if let Some(value) = &data.value {
            dbg.field("value", value);
        }
        if !data.children.is_empty() {
            dbg.field("children", &data.children);
        }
        dbg.finish()
    }
}

impl PartialEq for Node {
    /// Structural equality: compares `node_type`, `value`, and
    /// `children` recursively. `parent` links and the descendant
    /// cache are identity/performance bookkeeping, not tree content,
    /// so they're excluded.
    fn eq(&self, other: &Node) -> bool {
        let a = self.0.borrow();
        let b = other.0.borrow();
        a.node_type == b.node_type && a.value == b.value && a.children == b.children
    }
}

impl Eq for Node {}
