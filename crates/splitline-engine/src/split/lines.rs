use log::trace;

use crate::dom::{Document, NodeId};
use crate::layout::PositionProbe;

use super::wrap::create_wrapper;

/// Partition the children of `container` into runs that share one vertical
/// position.
///
/// Only element children are measured. Text children (the whitespace between
/// words) join whichever group is open when they are reached, so a leading
/// run lands in the first group. Positions are compared with exact equality.
pub fn line_groups<P: PositionProbe + ?Sized>(
    doc: &Document,
    container: NodeId,
    probe: &mut P,
) -> Vec<Vec<NodeId>> {
    let mut groups = Vec::new();
    let mut current = Vec::new();
    let mut last_top: Option<f32> = None;

    for &child in doc.children(container) {
        if !doc.is_element(child) {
            current.push(child);
            continue;
        }

        let top = probe.offset_top(doc, child);
        let marker = *last_top.get_or_insert(top);
        if top != marker {
            trace!("line break before {child:?}: top {marker} -> {top}");
            groups.push(std::mem::take(&mut current));
            last_top = Some(top);
        }
        current.push(child);
    }
    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

/// Move each group into a new line wrapper and make the wrappers the only
/// children of `container`. Nodes are moved, so their ids stay valid.
pub fn wrap_lines(
    doc: &mut Document,
    container: NodeId,
    groups: Vec<Vec<NodeId>>,
    line_class: &str,
) -> Vec<NodeId> {
    // Detached children move without scanning their old siblings
    doc.replace_children(container, []);
    let mut lines = Vec::with_capacity(groups.len());
    for group in groups {
        let line = create_wrapper(doc, line_class);
        doc.append_children(line, group);
        lines.push(line);
    }
    doc.append_children(container, lines.iter().copied());
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::FnProbe;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    /// Container whose children are built from a pattern: `w` is a word
    /// element, `_` a whitespace text node
    fn container(pattern: &str) -> (Document, NodeId, Vec<NodeId>) {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let children: Vec<_> = pattern
            .chars()
            .map(|c| match c {
                'w' => doc.create_element("span"),
                _ => doc.create_text(" "),
            })
            .collect();
        doc.append_children(div, children.iter().copied());
        let root = doc.root();
        doc.append_child(root, div);
        (doc, div, children)
    }

    #[test]
    fn test_groups_break_when_top_changes() {
        let (doc, div, nodes) = container("w_w_w_w");
        let table: HashMap<NodeId, f32> = HashMap::from([
            (nodes[0], 0.0),
            (nodes[2], 0.0),
            (nodes[4], 20.0),
            (nodes[6], 40.0),
        ]);
        let mut probe = FnProbe(|_: &Document, n: NodeId| table[&n]);

        let groups = line_groups(&doc, div, &mut probe);

        assert_eq!(
            groups,
            vec![
                vec![nodes[0], nodes[1], nodes[2], nodes[3]],
                vec![nodes[4], nodes[5]],
                vec![nodes[6]],
            ]
        );
    }

    #[test]
    fn test_whitespace_is_never_measured() {
        let (doc, div, nodes) = container("_w_w_");
        let mut asked = Vec::new();
        let mut probe = FnProbe(|_: &Document, n: NodeId| -> f32 {
            asked.push(n);
            0.0
        });

        let groups = line_groups(&doc, div, &mut probe);

        assert_eq!(groups, vec![nodes.clone()]);
        assert_eq!(asked, vec![nodes[1], nodes[3]]);
    }

    #[test]
    fn test_leading_whitespace_falls_into_first_group() {
        let (doc, div, nodes) = container("_w_w");
        let mut probe = FnProbe(|_: &Document, n: NodeId| -> f32 {
            if n == nodes[3] { 1.0 } else { 0.0 }
        });

        let groups = line_groups(&doc, div, &mut probe);

        assert_eq!(groups, vec![vec![nodes[0], nodes[1], nodes[2]], vec![nodes[3]]]);
    }

    #[test]
    fn test_no_tolerance_for_subpixel_differences() {
        let (doc, div, nodes) = container("w_w");
        let mut probe = FnProbe(|_: &Document, n: NodeId| -> f32 {
            if n == nodes[2] { 0.1 } else { 0.0 }
        });

        let groups = line_groups(&doc, div, &mut probe);

        assert_eq!(groups.len(), 2);
    }

    #[test]
    fn test_returning_to_earlier_top_starts_new_group() {
        let (doc, div, nodes) = container("www");
        let tops: [f32; 3] = [0.0, 10.0, 0.0];
        let mut probe = FnProbe(|_: &Document, n: NodeId| {
            tops[nodes.iter().position(|&x| x == n).unwrap()]
        });

        let groups = line_groups(&doc, div, &mut probe);

        assert_eq!(groups, vec![vec![nodes[0]], vec![nodes[1]], vec![nodes[2]]]);
    }

    #[test]
    fn test_empty_container_has_no_groups() {
        let (doc, div, _) = container("");
        let mut probe = FnProbe(|_: &Document, _: NodeId| 0.0_f32);
        assert!(line_groups(&doc, div, &mut probe).is_empty());
    }

    #[test]
    fn test_wrap_lines_moves_nodes_in_order() {
        let (mut doc, div, nodes) = container("w_w_w");
        let groups = vec![nodes[..4].to_vec(), nodes[4..].to_vec()];

        let lines = wrap_lines(&mut doc, div, groups, "line");

        assert_eq!(doc.children(div), lines.as_slice());
        assert_eq!(doc.children(lines[0]), &nodes[..4]);
        assert_eq!(doc.children(lines[1]), &nodes[4..]);
        for &line in &lines {
            assert!(doc.has_class(line, "line"));
            assert_eq!(doc.style_property(line, "display"), Some("inline-block"));
        }
        assert_eq!(doc.parent(nodes[4]), Some(lines[1]));
    }

    #[test]
    fn test_wrap_lines_over_a_large_container() {
        let pattern = "w_".repeat(20_000);
        let (mut doc, div, nodes) = container(&pattern);
        let groups: Vec<Vec<NodeId>> = nodes.chunks(8).map(<[NodeId]>::to_vec).collect();

        let lines = wrap_lines(&mut doc, div, groups, "line");

        assert_eq!(lines.len(), 5_000);
        assert_eq!(doc.children(div), lines.as_slice());
        let moved: Vec<NodeId> = lines
            .iter()
            .flat_map(|&line| doc.children(line).to_vec())
            .collect();
        assert_eq!(moved, nodes);
        for (i, &node) in nodes.iter().enumerate() {
            assert_eq!(doc.parent(node), Some(lines[i / 8]));
        }
    }

    #[test]
    fn test_wrap_lines_drops_ungrouped_children() {
        let (mut doc, div, nodes) = container("w_w");

        let lines = wrap_lines(&mut doc, div, vec![vec![nodes[0]]], "line");

        assert_eq!(doc.children(div), lines.as_slice());
        assert_eq!(doc.parent(nodes[1]), None);
        assert_eq!(doc.parent(nodes[2]), None);
    }
}
