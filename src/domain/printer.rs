//! Level-by-level rendering of a [`BinaryTree`].
//!
//! One line per depth level, left-aligned. Empty child slots print a placeholder and
//! expand into two empty slots on the next level, so every line shows the full
//! `2^level` slots. Rendering stops after the first level without a real node.
//!
//! Consecutive empty slots are kept as a single [`SlotRun::Empty`] run, so memory
//! follows the number of real nodes on a level while the printed width doubles.
//! Lines are handed out one at a time as soon as a level is finished.

use std::borrow::Cow;
use std::convert::Infallible;
use std::io;

use itertools::Itertools;
use tracing::instrument;

use crate::domain::arena::{BinaryTree, Value};

/// Consecutive slots of one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotRun<T = Value> {
    /// A real node
    Node(T),
    /// This many empty slots in a row
    Empty(usize),
}

fn push_run<T>(runs: &mut Vec<SlotRun<T>>, run: SlotRun<T>) {
    if let SlotRun::Empty(n) = run {
        if let Some(SlotRun::Empty(last)) = runs.last_mut() {
            *last = last.saturating_add(n);
            return;
        }
    }
    runs.push(run);
}

/// Walks the tree level by level and calls `visit` once per finished level.
///
/// The first error returned by `visit` stops the walk.
#[instrument(level = "debug", skip(tree, visit), fields(nodes = tree.len()))]
pub fn walk_levels<E, F>(tree: &BinaryTree, mut visit: F) -> Result<(), E>
where
    F: FnMut(&[SlotRun]) -> Result<(), E>,
{
    let mut queue = vec![match tree.root() {
        Some(idx) => SlotRun::Node(idx),
        None => SlotRun::Empty(1),
    }];
    let mut level: Vec<SlotRun> = Vec::new();

    while !queue.is_empty() {
        let mut next = Vec::with_capacity(queue.len() * 2);
        let mut found_node = false;
        level.clear();

        for entry in queue.drain(..) {
            let node = match entry {
                SlotRun::Node(idx) => tree.get_node(idx),
                SlotRun::Empty(_) => None,
            };
            match (entry, node) {
                (_, Some(node)) => {
                    found_node = true;
                    push_run(&mut level, SlotRun::Node(node.value));
                    for child in [node.left, node.right] {
                        push_run(
                            &mut next,
                            child.map_or(SlotRun::Empty(1), SlotRun::Node),
                        );
                    }
                }
                (SlotRun::Empty(n), None) => {
                    push_run(&mut level, SlotRun::Empty(n));
                    push_run(&mut next, SlotRun::Empty(n.saturating_mul(2)));
                }
                (SlotRun::Node(_), None) => {
                    push_run(&mut level, SlotRun::Empty(1));
                    push_run(&mut next, SlotRun::Empty(2));
                }
            }
        }

        visit(&level)?;
        if !found_node {
            break;
        }
        queue = next;
    }

    Ok(())
}

/// Layout of a tree: one entry per level, `None` marking an empty slot.
///
/// The empty tree yields a single level holding one empty slot. A tree of depth `d`
/// yields `d` levels with real nodes followed by one level of empty slots. This
/// expands every run, use [`walk_levels`] for deep trees.
pub fn level_slots(tree: &BinaryTree) -> Vec<Vec<Option<Value>>> {
    let mut levels = Vec::new();
    let walked = walk_levels::<Infallible, _>(tree, |level| {
        let slots = level
            .iter()
            .flat_map(|run| match *run {
                SlotRun::Node(value) => itertools::repeat_n(Some(value), 1),
                SlotRun::Empty(n) => itertools::repeat_n(None, n),
            })
            .collect();
        levels.push(slots);
        Ok(())
    });
    match walked {
        Ok(()) => levels,
        Err(never) => match never {},
    }
}

/// Text style for level rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintStyle {
    /// Prefix of every line
    pub indent: String,
    /// Between two slots of a line
    pub separator: String,
    /// Printed for an empty slot
    pub placeholder: String,
}

impl Default for PrintStyle {
    fn default() -> Self {
        Self {
            indent: "  ".into(),
            separator: " ".into(),
            placeholder: ".".into(),
        }
    }
}

/// Renders trees with a fixed [`PrintStyle`].
#[derive(Debug, Clone, Default)]
pub struct LevelPrinter {
    style: PrintStyle,
}

impl LevelPrinter {
    pub fn new(style: PrintStyle) -> Self {
        Self { style }
    }

    /// Renders every level as one newline-terminated line.
    pub fn render(&self, tree: &BinaryTree) -> String {
        let mut text = String::new();
        let walked = walk_levels::<Infallible, _>(tree, |level| {
            text.push_str(&self.render_level(level));
            text.push('\n');
            Ok(())
        });
        match walked {
            Ok(()) => text,
            Err(never) => match never {},
        }
    }

    /// Writes each level as soon as it is finished and stops at the first write error.
    pub fn write_to<W: io::Write>(&self, tree: &BinaryTree, mut out: W) -> io::Result<()> {
        walk_levels(tree, |level| self.write_level(&mut out, level))?;
        out.flush()
    }

    fn write_level<W: io::Write>(&self, out: &mut W, level: &[SlotRun]) -> io::Result<()> {
        out.write_all(self.style.indent.as_bytes())?;
        for (i, text) in self.slot_texts(level).enumerate() {
            if i > 0 {
                out.write_all(self.style.separator.as_bytes())?;
            }
            out.write_all(text.as_bytes())?;
        }
        out.write_all(b"\n")
    }

    fn render_level(&self, level: &[SlotRun]) -> String {
        format!(
            "{}{}",
            self.style.indent,
            self.slot_texts(level).join(&self.style.separator)
        )
    }

    fn slot_texts<'a>(&'a self, level: &'a [SlotRun]) -> impl Iterator<Item = Cow<'a, str>> + 'a {
        level.iter().flat_map(move |run| match *run {
            SlotRun::Node(value) => itertools::repeat_n(Cow::Owned(value.to_string()), 1),
            SlotRun::Empty(n) => {
                itertools::repeat_n(Cow::Borrowed(self.style.placeholder.as_str()), n)
            }
        })
    }
}
