//! Path lookups over the arena.
//!
//! A path is a `/`-separated list of steps evaluated against a context node:
//!
//! - `name`: child elements with that local name (namespace prefix ignored).
//! - `*`: any child element.
//! - `.`: the context node itself.
//! - `text()`: text children.
//!
//! A leading `//` (or an empty step, as in `a//b`) switches the next step to
//! the descendant axis.

use super::{Document, NodeId};
use std::collections::HashSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Axis {
    Child,
    Descendant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Test<'p> {
    Name(&'p str),
    AnyElement,
    SelfNode,
    Text,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step<'p> {
    axis: Axis,
    test: Test<'p>,
}

fn compile(path: &str) -> Vec<Step<'_>> {
    let mut steps = Vec::new();
    let mut axis = Axis::Child;

    for raw in path.trim().split('/') {
        let raw = raw.trim();
        if raw.is_empty() {
            axis = Axis::Descendant;
            continue;
        }
        let test = match raw {
            "*" => Test::AnyElement,
            "." => Test::SelfNode,
            "text()" => Test::Text,
            name => Test::Name(name),
        };
        steps.push(Step { axis, test });
        axis = Axis::Child;
    }
    steps
}

pub(super) fn evaluate(doc: &Document, context: NodeId, path: &str) -> Vec<NodeId> {
    let mut current = vec![context];

    for step in compile(path) {
        let mut seen = HashSet::new();
        let mut next = Vec::new();

        for node in current {
            let candidates = match step.axis {
                Axis::Child => doc.children(node).to_vec(),
                // descendant-or-self keeps `//x` from the root able to select the root itself
                Axis::Descendant => doc.descendants(node),
            };
            let candidates = match step.test {
                Test::SelfNode => vec![node],
                _ => candidates,
            };

            for candidate in candidates {
                if matches(doc, candidate, &step.test) && seen.insert(candidate) {
                    next.push(candidate);
                }
            }
        }
        current = next;
    }

    current
}

fn matches(doc: &Document, node: NodeId, test: &Test<'_>) -> bool {
    match test {
        Test::Name(name) => doc.local_name(node) == Some(*name),
        Test::AnyElement => doc.element(node).is_some(),
        Test::SelfNode => true,
        Test::Text => doc.text_value(node).is_some(),
    }
}
