#![forbid(unsafe_code)]

//! Arena-backed component tree.
//!
//! Nodes live in a [`ComponentTree`] and are addressed by copyable
//! [`NodeId`] handles. Argument and extra lists are the owning edges; the
//! `parent` link is a plain index used for style inheritance only.
//!
//! # Invariants
//!
//! 1. **Single parent**: a node appears in at most one argument or extra list.
//!    Attaching it elsewhere removes it from the old list first.
//! 2. **Acyclic**: a node can never be attached under itself or one of its
//!    descendants, so style walks and rendering always terminate.
//! 3. **Stable handles**: nodes are never removed; a replaced argument just
//!    becomes a parentless root.
//!
//! # Example
//!
//! ```
//! use chat_component::ComponentTree;
//! use chat_style::ChatColor;
//!
//! let mut tree = ComponentTree::default();
//! let name = tree.text("Steve");
//! tree.set_color(name, Some(ChatColor::Yellow)).unwrap();
//! let joined = tree.translatable("multiplayer.player.joined", [name]).unwrap();
//! tree.add_argument(joined, "extra").unwrap();
//!
//! assert_eq!(tree.parent(name).unwrap(), Some(joined));
//! assert_eq!(tree.arguments(joined).unwrap().len(), 2);
//! ```

use std::fmt;
use std::sync::Arc;

use chat_i18n::{LocaleDictionary, StringCatalog};
use chat_style::{ChatColor, Format, Style};
use smallvec::SmallVec;

use crate::error::{ChatError, Result};

/// Owning child list of a node.
pub type Children = SmallVec<[NodeId; 4]>;

/// Handle to a node inside a [`ComponentTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    /// Position of the node in its arena.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Content variant of a node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Literal text.
    Text { text: String },
    /// Text looked up by key, with placeholders filled by `arguments`.
    Translatable { key: String, arguments: Children },
}

/// A single component: content, own style, trailing extras, parent link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    style: Style,
    parent: Option<NodeId>,
    extra: Children,
}

impl Node {
    fn new(kind: NodeKind) -> Self {
        Self {
            kind,
            style: Style::new(),
            parent: None,
            extra: Children::new(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// The node's own style, before inheritance.
    #[must_use]
    pub fn style(&self) -> &Style {
        &self.style
    }

    #[must_use]
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children rendered after the node's own content.
    #[must_use]
    pub fn extras(&self) -> &[NodeId] {
        &self.extra
    }

    /// Arguments of a translatable node; empty for other kinds.
    #[must_use]
    pub fn arguments(&self) -> &[NodeId] {
        match &self.kind {
            NodeKind::Translatable { arguments, .. } => arguments.as_slice(),
            NodeKind::Text { .. } => &[],
        }
    }
}

/// A value usable as a translation argument or extra: either raw text,
/// wrapped into a new text node on attachment, or an existing node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Argument {
    Text(String),
    Node(NodeId),
}

impl From<&str> for Argument {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for Argument {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<NodeId> for Argument {
    fn from(id: NodeId) -> Self {
        Self::Node(id)
    }
}

/// Which owning list of the parent a child goes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    Arguments,
    Extra,
}

/// Arena of chat components sharing one locale dictionary.
pub struct ComponentTree {
    nodes: Vec<Node>,
    dictionary: Arc<dyn LocaleDictionary>,
    root_color: Option<ChatColor>,
}

impl fmt::Debug for ComponentTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ComponentTree")
            .field("nodes", &self.nodes.len())
            .field("root_color", &self.root_color)
            .finish_non_exhaustive()
    }
}

impl Default for ComponentTree {
    fn default() -> Self {
        Self::new(Arc::new(StringCatalog::new()))
    }
}

impl ComponentTree {
    /// Create an empty tree resolving keys through `dictionary`.
    #[must_use]
    pub fn new(dictionary: Arc<dyn LocaleDictionary>) -> Self {
        Self {
            nodes: Vec::new(),
            dictionary,
            root_color: None,
        }
    }

    /// Color assumed when no node up to the root sets one.
    ///
    /// With no root color, uncolored literals get no marker, so a legacy
    /// client keeps the color and formats of the preceding argument:
    /// `"%s!"` with a red bold argument renders `§c§lAlice!`. Use
    /// `Some(ChatColor::White)` for output where every literal run restates
    /// its style (`§c§lAlice§f!`).
    #[must_use]
    pub fn with_root_color(mut self, color: Option<ChatColor>) -> Self {
        self.root_color = color;
        self
    }

    #[must_use]
    pub fn root_color(&self) -> Option<ChatColor> {
        self.root_color
    }

    /// The dictionary used to resolve translation keys.
    #[must_use]
    pub fn dictionary(&self) -> &dyn LocaleDictionary {
        self.dictionary.as_ref()
    }

    /// Swap the dictionary; affects subsequent renders only.
    pub fn set_dictionary(&mut self, dictionary: Arc<dyn LocaleDictionary>) {
        self.dictionary = dictionary;
    }

    /// Number of nodes ever created in this tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Borrow a node.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id.0).ok_or(ChatError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node> {
        self.nodes.get_mut(id.0).ok_or(ChatError::UnknownNode(id))
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(kind));
        id
    }

    // ── Construction ────────────────────────────────────────────────────

    /// Create a parentless text node.
    pub fn text(&mut self, text: impl Into<String>) -> NodeId {
        self.push(NodeKind::Text { text: text.into() })
    }

    /// Create a translatable node with the given arguments.
    ///
    /// Strings become new text nodes; node handles are moved under the new
    /// node, leaving any previous parent.
    pub fn translatable<I, A>(&mut self, key: impl Into<String>, values: I) -> Result<NodeId>
    where
        I: IntoIterator<Item = A>,
        A: Into<Argument>,
    {
        let values: Vec<Argument> = values.into_iter().map(Into::into).collect();
        self.validate_children(None, &values)?;
        let id = self.push(NodeKind::Translatable {
            key: key.into(),
            arguments: Children::new(),
        });
        let children = self.materialize(values);
        self.adopt_all(id, &children);
        self.translatable_arguments_mut(id)?.extend(children);
        Ok(id)
    }

    /// Deep-copy the subtree rooted at `id`. The copy has no parent.
    pub fn duplicate(&mut self, id: NodeId) -> Result<NodeId> {
        let source = self.node(id)?.clone();
        let kind = match &source.kind {
            NodeKind::Text { text } => NodeKind::Text { text: text.clone() },
            NodeKind::Translatable { key, .. } => NodeKind::Translatable {
                key: key.clone(),
                arguments: Children::new(),
            },
        };
        let copy = self.push(kind);
        self.nodes[copy.0].style = source.style;

        for &argument in source.arguments() {
            let child = self.duplicate(argument)?;
            self.nodes[child.0].parent = Some(copy);
            self.translatable_arguments_mut(copy)?.push(child);
        }
        for &extra in &source.extra {
            let child = self.duplicate(extra)?;
            self.nodes[child.0].parent = Some(copy);
            self.nodes[copy.0].extra.push(child);
        }
        Ok(copy)
    }

    // ── Translatable operations ─────────────────────────────────────────

    /// The translation key of a translatable node.
    pub fn translation_key(&self, id: NodeId) -> Result<&str> {
        match &self.node(id)?.kind {
            NodeKind::Translatable { key, .. } => Ok(key.as_str()),
            NodeKind::Text { .. } => Err(ChatError::NotTranslatable(id)),
        }
    }

    /// Overwrite the translation key. Any string is accepted; unknown keys
    /// render as themselves.
    pub fn set_translation_key(&mut self, id: NodeId, key: impl Into<String>) -> Result<()> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Translatable { key: slot, .. } => {
                *slot = key.into();
                Ok(())
            }
            NodeKind::Text { .. } => Err(ChatError::NotTranslatable(id)),
        }
    }

    /// The ordered arguments of a translatable node.
    pub fn arguments(&self, id: NodeId) -> Result<&[NodeId]> {
        match &self.node(id)?.kind {
            NodeKind::Translatable { arguments, .. } => Ok(arguments.as_slice()),
            NodeKind::Text { .. } => Err(ChatError::NotTranslatable(id)),
        }
    }

    /// Replace the whole argument list.
    ///
    /// Previous arguments that are not reused become parentless. Fails
    /// without modifying anything if a value is unknown, repeated, or would
    /// create a cycle.
    pub fn set_arguments<I, A>(&mut self, id: NodeId, values: I) -> Result<()>
    where
        I: IntoIterator<Item = A>,
        A: Into<Argument>,
    {
        self.translation_key(id)?;
        let values: Vec<Argument> = values.into_iter().map(Into::into).collect();
        self.validate_children(Some(id), &values)?;

        let previous = std::mem::take(self.translatable_arguments_mut(id)?);
        for old in previous {
            self.nodes[old.0].parent = None;
        }
        let children = self.materialize(values);
        self.adopt_all(id, &children);
        tracing::debug!(
            node = id.index(),
            arguments = children.len(),
            "Replaced translation arguments"
        );
        self.translatable_arguments_mut(id)?.extend(children);
        Ok(())
    }

    /// Append one argument.
    pub fn add_argument(&mut self, id: NodeId, value: impl Into<Argument>) -> Result<()> {
        self.translation_key(id)?;
        self.attach(id, value.into(), Slot::Arguments)
    }

    // ── Generic operations ──────────────────────────────────────────────

    /// Append a child rendered after this node's own content.
    pub fn add_extra(&mut self, id: NodeId, value: impl Into<Argument>) -> Result<()> {
        self.node(id)?;
        self.attach(id, value.into(), Slot::Extra)
    }

    /// Extra children of any node.
    pub fn extras(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(id)?.extras())
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    /// The node's own style, before inheritance.
    pub fn style(&self, id: NodeId) -> Result<Style> {
        Ok(self.node(id)?.style)
    }

    pub fn set_style(&mut self, id: NodeId, style: Style) -> Result<()> {
        self.node_mut(id)?.style = style;
        Ok(())
    }

    pub fn set_color(&mut self, id: NodeId, color: Option<ChatColor>) -> Result<()> {
        self.node_mut(id)?.style.color = color;
        Ok(())
    }

    /// Set or clear (`None` = inherit) one format flag.
    pub fn set_format(&mut self, id: NodeId, format: Format, value: Option<bool>) -> Result<()> {
        self.node_mut(id)?.style.set_format(format, value);
        Ok(())
    }

    /// The style after inheriting unset attributes from every ancestor.
    ///
    /// Unset flags at the root stay `None` (read as `false`); an unset color
    /// at the root becomes the tree's root color, if any.
    pub fn effective_style(&self, id: NodeId) -> Result<Style> {
        let node = self.node(id)?;
        let mut style = node.style;
        let mut current = node.parent;
        while let Some(parent) = current {
            if style.is_complete() {
                break;
            }
            let parent = &self.nodes[parent.0];
            style = style.inherit(&parent.style);
            current = parent.parent;
        }
        if style.color.is_none() {
            style.color = self.root_color;
        }
        Ok(style)
    }

    /// One-line structural summary of a subtree, for diagnostics.
    pub fn describe(&self, id: NodeId) -> Result<String> {
        let node = self.node(id)?;
        let mut out = match &node.kind {
            NodeKind::Text { text } => format!("TextComponent{{text={text}, "),
            NodeKind::Translatable { key, arguments } => {
                let with = arguments
                    .iter()
                    .map(|&arg| self.describe(arg))
                    .collect::<Result<Vec<_>>>()?;
                format!(
                    "TranslatableComponent{{translate={key}, with=[{}], ",
                    with.join(", ")
                )
            }
        };
        out.push_str(&format!("style={:?}", node.style));
        if !node.extra.is_empty() {
            let extra = node
                .extra
                .iter()
                .map(|&child| self.describe(child))
                .collect::<Result<Vec<_>>>()?;
            out.push_str(&format!(", extra=[{}]", extra.join(", ")));
        }
        out.push('}');
        Ok(out)
    }

    // ── Attachment internals ────────────────────────────────────────────

    fn translatable_arguments_mut(&mut self, id: NodeId) -> Result<&mut Children> {
        match &mut self.node_mut(id)?.kind {
            NodeKind::Translatable { arguments, .. } => Ok(arguments),
            NodeKind::Text { .. } => Err(ChatError::NotTranslatable(id)),
        }
    }

    /// Check that every node handle in `values` exists, is listed once, and
    /// can legally be placed under `parent`.
    fn validate_children(&self, parent: Option<NodeId>, values: &[Argument]) -> Result<()> {
        let mut seen: SmallVec<[NodeId; 8]> = SmallVec::new();
        for value in values {
            let Argument::Node(child) = *value else {
                continue;
            };
            self.node(child)?;
            if seen.contains(&child) {
                return Err(ChatError::DuplicateChild(child));
            }
            seen.push(child);
            if let Some(parent) = parent {
                self.ensure_acyclic(parent, child)?;
            }
        }
        Ok(())
    }

    /// `child` must not be `parent` or any ancestor of it.
    fn ensure_acyclic(&self, parent: NodeId, child: NodeId) -> Result<()> {
        let mut current = Some(parent);
        while let Some(id) = current {
            if id == child {
                return Err(ChatError::CycleDetected { parent, child });
            }
            current = self.nodes[id.0].parent;
        }
        Ok(())
    }

    /// Turn validated values into node handles, creating text nodes.
    fn materialize(&mut self, values: Vec<Argument>) -> Children {
        values
            .into_iter()
            .map(|value| match value {
                Argument::Text(text) => self.text(text),
                Argument::Node(id) => id,
            })
            .collect()
    }

    fn adopt_all(&mut self, parent: NodeId, children: &[NodeId]) {
        for &child in children {
            self.detach(child);
            self.nodes[child.0].parent = Some(parent);
        }
    }

    /// Remove `child` from its parent's lists, if it has a parent.
    fn detach(&mut self, child: NodeId) {
        let Some(parent) = self.nodes[child.0].parent.take() else {
            return;
        };
        let node = &mut self.nodes[parent.0];
        node.extra.retain(|id| *id != child);
        if let NodeKind::Translatable { arguments, .. } = &mut node.kind {
            arguments.retain(|id| *id != child);
        }
        tracing::debug!(
            node = child.index(),
            previous_parent = parent.index(),
            "Detached component from previous parent"
        );
    }

    fn attach(&mut self, parent: NodeId, value: Argument, slot: Slot) -> Result<()> {
        self.validate_children(Some(parent), std::slice::from_ref(&value))?;
        let child = match value {
            Argument::Text(text) => self.text(text),
            Argument::Node(id) => id,
        };
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        match slot {
            Slot::Arguments => self.translatable_arguments_mut(parent)?.push(child),
            Slot::Extra => self.nodes[parent.0].extra.push(child),
        }
        Ok(())
    }
}
