#![forbid(unsafe_code)]

//! Plain and legacy rendering of component trees.
//!
//! Both modes walk the tree the same way: a node writes its own content and
//! then each of its extras. A translatable node scans its template with
//! [`chat_i18n::parse`], copies literals, and renders each referenced
//! argument recursively in the same mode.
//!
//! Legacy mode additionally writes the node's effective style markers before
//! every literal run. Legacy text has no nesting, so after an argument has
//! written its own markers the node must re-assert its own style.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Behavior |
//! |---------|-------|----------|
//! | Unknown key | Dictionary has no template | Raw key rendered, no error |
//! | Missing argument | `%3$s` with two arguments | `ArgumentIndexOutOfRange` |
//! | Unknown conversion | `%x` in template | Renders nothing |

use chat_i18n::{FormatKind, Segment, parse};
use chat_style::Style;

use crate::error::{ChatError, Result};
use crate::tree::{ComponentTree, NodeId, NodeKind};

/// Output flavor of a render.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    /// Text only.
    Plain,
    /// Text with inline section-sign style markers.
    Legacy,
}

/// Maps template placeholders to a node's arguments.
///
/// Placeholders without an explicit index take arguments in order through a
/// zero-based cursor; explicit `%n$` placeholders take argument `n` (1-based)
/// and leave the cursor alone.
#[derive(Debug, Clone)]
pub struct ArgumentResolver<'a> {
    key: &'a str,
    arguments: &'a [NodeId],
    next: usize,
}

impl<'a> ArgumentResolver<'a> {
    /// Start resolving for the translation `key` with `arguments`.
    #[must_use]
    pub fn new(key: &'a str, arguments: &'a [NodeId]) -> Self {
        Self {
            key,
            arguments,
            next: 0,
        }
    }

    /// Resolve one argument-taking placeholder.
    pub fn resolve(&mut self, index: Option<usize>) -> Result<NodeId> {
        let position = match index {
            Some(explicit) => explicit,
            None => {
                self.next += 1;
                self.next
            }
        };
        position
            .checked_sub(1)
            .and_then(|slot| self.arguments.get(slot).copied())
            .ok_or_else(|| {
                tracing::debug!(
                    key = self.key,
                    index = position,
                    len = self.arguments.len(),
                    "Template references a missing argument"
                );
                ChatError::ArgumentIndexOutOfRange {
                    key: self.key.to_string(),
                    index: position,
                    len: self.arguments.len(),
                }
            })
    }

    /// Number of arguments consumed sequentially so far.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.next
    }
}

struct Renderer<'t> {
    tree: &'t ComponentTree,
    mode: RenderMode,
}

impl Renderer<'_> {
    /// Render `id`. `inherited` is the parent's effective style when the
    /// caller already knows it (legacy mode only).
    fn render(&self, id: NodeId, inherited: Option<&Style>, out: &mut String) -> Result<()> {
        let node = self.tree.node(id)?;
        tracing::trace!(node = id.index(), mode = ?self.mode, "Rendering component");

        let style = match (self.mode, inherited) {
            (RenderMode::Plain, _) => None,
            (RenderMode::Legacy, Some(parent)) => Some(node.style().inherit(parent)),
            (RenderMode::Legacy, None) => Some(self.tree.effective_style(id)?),
        };
        let style = style.as_ref();

        match node.kind() {
            NodeKind::Text { text } => self.write_literal(style, text, out),
            NodeKind::Translatable { key, arguments } => {
                self.render_translation(key, arguments, style, out)?;
            }
        }

        for &child in node.extras() {
            self.render(child, style, out)?;
        }
        Ok(())
    }

    fn render_translation(
        &self,
        key: &str,
        arguments: &[NodeId],
        style: Option<&Style>,
        out: &mut String,
    ) -> Result<()> {
        let Some(template) = self.tree.dictionary().lookup(key) else {
            tracing::debug!(key, "No translation found, rendering raw key");
            self.write_literal(style, key, out);
            return Ok(());
        };

        let mut resolver = ArgumentResolver::new(key, arguments);
        for segment in parse(template) {
            match segment {
                Segment::Literal(text) => self.write_literal(style, text, out),
                Segment::Placeholder {
                    kind: FormatKind::PercentLiteral,
                    ..
                } => self.write_literal(style, "%", out),
                Segment::Placeholder { index, .. } => {
                    let argument = resolver.resolve(index)?;
                    self.render(argument, style, out)?;
                }
                Segment::Unrecognized(_) => {}
            }
        }
        Ok(())
    }

    fn write_literal(&self, style: Option<&Style>, text: &str, out: &mut String) {
        if let Some(style) = style {
            style.write_legacy(out);
        }
        out.push_str(text);
    }
}

impl ComponentTree {
    /// Append the rendering of `id` in `mode` to `out`.
    ///
    /// On error `out` may hold a partial rendering.
    pub fn render_into(&self, id: NodeId, mode: RenderMode, out: &mut String) -> Result<()> {
        Renderer { tree: self, mode }.render(id, None, out)
    }

    /// Render `id` without any style markers.
    pub fn to_plain_text(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        self.render_into(id, RenderMode::Plain, &mut out)?;
        Ok(out)
    }

    /// Render `id` with section-sign style markers.
    pub fn to_legacy_text(&self, id: NodeId) -> Result<String> {
        let mut out = String::new();
        self.render_into(id, RenderMode::Legacy, &mut out)?;
        Ok(out)
    }

    /// Render several components back to back without markers.
    pub fn to_plain_text_all(&self, ids: &[NodeId]) -> Result<String> {
        let mut out = String::new();
        for &id in ids {
            self.render_into(id, RenderMode::Plain, &mut out)?;
        }
        Ok(out)
    }

    /// Render several components back to back with markers.
    pub fn to_legacy_text_all(&self, ids: &[NodeId]) -> Result<String> {
        let mut out = String::new();
        for &id in ids {
            self.render_into(id, RenderMode::Legacy, &mut out)?;
        }
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;

    use chat_style::{ChatColor, Format};

    use super::*;
    use crate::tree::Argument;

    fn tree_with(entries: &[(&str, &str)]) -> ComponentTree {
        let map: HashMap<String, String> = entries
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ComponentTree::new(Arc::new(map))
    }

    fn ids(n: usize) -> Vec<NodeId> {
        let mut tree = ComponentTree::default();
        (0..n).map(|i| tree.text(i.to_string())).collect()
    }

    #[test]
    fn resolver_sequential_in_order() {
        let args = ids(3);
        let mut resolver = ArgumentResolver::new("k", &args);
        assert_eq!(resolver.resolve(None), Ok(args[0]));
        assert_eq!(resolver.resolve(None), Ok(args[1]));
        assert_eq!(resolver.cursor(), 2);
    }

    #[test]
    fn resolver_explicit_does_not_move_cursor() {
        let args = ids(3);
        let mut resolver = ArgumentResolver::new("k", &args);
        assert_eq!(resolver.resolve(Some(3)), Ok(args[2]));
        assert_eq!(resolver.resolve(None), Ok(args[0]));
        assert_eq!(resolver.resolve(Some(1)), Ok(args[0]));
        assert_eq!(resolver.resolve(None), Ok(args[1]));
    }

    #[test]
    fn resolver_out_of_range() {
        let args = ids(2);
        let mut resolver = ArgumentResolver::new("k", &args);
        let expected = |index| ChatError::ArgumentIndexOutOfRange {
            key: "k".into(),
            index,
            len: 2,
        };
        assert_eq!(resolver.resolve(Some(3)), Err(expected(3)));
        assert_eq!(resolver.resolve(Some(0)), Err(expected(0)));
        assert_eq!(resolver.resolve(Some(usize::MAX)), Err(expected(usize::MAX)));
        resolver.resolve(None).unwrap();
        resolver.resolve(None).unwrap();
        assert_eq!(resolver.resolve(None), Err(expected(3)));
    }

    #[test]
    fn resolver_with_no_arguments() {
        let mut resolver = ArgumentResolver::new("k", &[]);
        assert!(resolver.resolve(None).is_err());
    }

    #[test]
    fn missing_key_renders_key() {
        let mut tree = tree_with(&[]);
        let node = tree.translatable("no.such.key", ["ignored"]).unwrap();
        assert_eq!(tree.to_plain_text(node).unwrap(), "no.such.key");
    }

    #[test]
    fn missing_key_legacy_has_style_first() {
        let mut tree = tree_with(&[]);
        let node = tree.translatable("no.such.key", Vec::<Argument>::new()).unwrap();
        tree.set_color(node, Some(ChatColor::Gray)).unwrap();
        assert_eq!(tree.to_legacy_text(node).unwrap(), "\u{a7}7no.such.key");
    }

    #[test]
    fn sequential_substitution() {
        let mut tree = tree_with(&[("msg", "Hello, %s! You have %d new messages.")]);
        let node = tree.translatable("msg", ["Alice", "5"]).unwrap();
        assert_eq!(
            tree.to_plain_text(node).unwrap(),
            "Hello, Alice! You have 5 new messages."
        );
    }

    #[test]
    fn explicit_substitution() {
        let mut tree = tree_with(&[("order", "%2$s before %1$s")]);
        let node = tree.translatable("order", ["A", "B"]).unwrap();
        assert_eq!(tree.to_plain_text(node).unwrap(), "B before A");
    }

    #[test]
    fn percent_literal_needs_no_argument() {
        let mut tree = tree_with(&[("pct", "100%% done %%")]);
        let node = tree.translatable("pct", Vec::<Argument>::new()).unwrap();
        assert_eq!(tree.to_plain_text(node).unwrap(), "100% done %");
    }

    #[test]
    fn unrecognized_conversion_renders_nothing() {
        let mut tree = tree_with(&[("odd", "a%xb%sc")]);
        let node = tree.translatable("odd", ["X"]).unwrap();
        assert_eq!(tree.to_plain_text(node).unwrap(), "abXc");
    }

    #[test]
    fn out_of_range_propagates() {
        let mut tree = tree_with(&[("three", "%3$s")]);
        let node = tree.translatable("three", ["a", "b"]).unwrap();
        assert_eq!(
            tree.to_plain_text(node),
            Err(ChatError::ArgumentIndexOutOfRange {
                key: "three".into(),
                index: 3,
                len: 2
            })
        );
        assert!(tree.to_legacy_text(node).is_err());
    }

    #[test]
    fn nested_error_propagates_from_argument() {
        let mut tree = tree_with(&[("outer", "[%s]"), ("inner", "%s %s")]);
        let inner = tree.translatable("inner", ["only"]).unwrap();
        let outer = tree.translatable("outer", [inner]).unwrap();
        let err = tree.to_plain_text(outer).unwrap_err();
        assert!(matches!(
            err,
            ChatError::ArgumentIndexOutOfRange { ref key, index: 2, len: 1 } if key == "inner"
        ));
    }

    #[test]
    fn nested_translations_render_recursively() {
        let mut tree = tree_with(&[
            ("death.attack.player", "%s was slain by %s"),
            ("entity.zombie", "Zombie"),
        ]);
        let mob = tree.translatable("entity.zombie", Vec::<Argument>::new()).unwrap();
        let node = tree
            .translatable("death.attack.player", [Argument::from("Alex"), mob.into()])
            .unwrap();
        assert_eq!(tree.to_plain_text(node).unwrap(), "Alex was slain by Zombie");
    }

    #[test]
    fn extras_follow_translation() {
        let mut tree = tree_with(&[("hi", "Hi %s")]);
        let node = tree.translatable("hi", ["Bob"]).unwrap();
        tree.add_extra(node, "!").unwrap();
        assert_eq!(tree.to_plain_text(node).unwrap(), "Hi Bob!");
    }

    #[test]
    fn legacy_reasserts_style_after_argument() {
        let mut tree = tree_with(&[("excl", "%s!")]).with_root_color(Some(ChatColor::White));
        let name = tree.text("Alice");
        tree.set_color(name, Some(ChatColor::Red)).unwrap();
        tree.set_format(name, Format::Bold, Some(true)).unwrap();
        let node = tree.translatable("excl", [name]).unwrap();

        assert_eq!(
            tree.to_legacy_text(node).unwrap(),
            "\u{a7}c\u{a7}lAlice\u{a7}f!"
        );
        assert_eq!(tree.to_plain_text(node).unwrap(), "Alice!");
    }

    #[test]
    fn legacy_without_root_color_emits_no_marker_for_plain_style() {
        let mut tree = tree_with(&[("excl", "%s!")]);
        let name = tree.text("Alice");
        tree.set_style(name, Style::new().color(ChatColor::Red).bold(true))
            .unwrap();
        let node = tree.translatable("excl", [name]).unwrap();
        assert_eq!(tree.to_legacy_text(node).unwrap(), "\u{a7}c\u{a7}lAlice!");
    }

    #[test]
    fn legacy_markers_before_each_literal_and_percent() {
        let mut tree = tree_with(&[("t", "a%sb%%")]);
        let node = tree.translatable("t", ["X"]).unwrap();
        tree.set_color(node, Some(ChatColor::Gold)).unwrap();
        assert_eq!(
            tree.to_legacy_text(node).unwrap(),
            "\u{a7}6a\u{a7}6X\u{a7}6b\u{a7}6%"
        );
    }

    #[test]
    fn legacy_argument_inherits_node_style() {
        let mut tree = tree_with(&[("t", "<%s>")]);
        let arg = tree.text("name");
        tree.set_format(arg, Format::Italic, Some(true)).unwrap();
        let node = tree.translatable("t", [arg]).unwrap();
        tree.set_style(node, Style::new().color(ChatColor::Green).bold(true))
            .unwrap();
        assert_eq!(
            tree.to_legacy_text(node).unwrap(),
            "\u{a7}a\u{a7}l<\u{a7}a\u{a7}l\u{a7}oname\u{a7}a\u{a7}l>"
        );
    }

    #[test]
    fn legacy_of_subtree_uses_ancestor_style() {
        let mut tree = tree_with(&[("outer", "%s")]);
        let inner = tree.text("inner");
        let outer = tree.translatable("outer", [inner]).unwrap();
        tree.set_color(outer, Some(ChatColor::DarkPurple)).unwrap();
        assert_eq!(tree.to_legacy_text(inner).unwrap(), "\u{a7}5inner");
    }

    #[test]
    fn render_all_concatenates() {
        let mut tree = tree_with(&[("a", "A%s")]);
        let first = tree.translatable("a", ["1"]).unwrap();
        let second = tree.text("B");
        tree.set_color(second, Some(ChatColor::Blue)).unwrap();
        assert_eq!(tree.to_plain_text_all(&[first, second]).unwrap(), "A1B");
        assert_eq!(
            tree.to_legacy_text_all(&[first, second]).unwrap(),
            "A1\u{a7}9B"
        );
    }

    #[test]
    fn empty_template_renders_only_extras() {
        let mut tree = tree_with(&[("empty", "")]);
        let node = tree.translatable("empty", Vec::<Argument>::new()).unwrap();
        tree.add_extra(node, "x").unwrap();
        assert_eq!(tree.to_plain_text(node).unwrap(), "x");
        assert_eq!(tree.to_legacy_text(node).unwrap(), "x");
    }
}
