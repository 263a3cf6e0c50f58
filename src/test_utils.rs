use std::fmt::{Display, Write};

use crate::{node::NodeRef, SplayTree};

/// Render the tree in graphviz DOT format, for use in assertion messages.
pub(crate) fn print_dot<T>(t: &SplayTree<T>) -> String
where
    T: Display,
{
    let mut buf = String::new();

    writeln!(buf, "digraph {{").unwrap();
    writeln!(buf, r#"bgcolor = "transparent";"#).unwrap();
    writeln!(
        buf,
        r#"node [shape = record; style = filled; fontcolor = orange4; fillcolor = white;];"#
    )
    .unwrap();
    if let Some(root) = t.root() {
        recurse(root, &mut buf);
    }
    writeln!(buf, "}}").unwrap();

    buf
}

fn recurse<T, W>(n: NodeRef<'_, T>, buf: &mut W)
where
    W: std::fmt::Write,
    T: Display,
{
    writeln!(buf, r#""{}" [label="{}"];"#, n.value(), n.value()).unwrap();

    for v in [n.left(), n.right()] {
        match v {
            Some(v) => {
                writeln!(
                    buf,
                    "\"{}\" -> \"{}\" [color = \"orange1\";];",
                    n.value(),
                    v.value()
                )
                .unwrap();
                recurse(v, buf);
            }
            None => {
                writeln!(buf, "\"null_{}\" [shape=point,style=invis];", n.value()).unwrap();
                writeln!(
                    buf,
                    "\"{}\" -> \"null_{}\" [style=invis];",
                    n.value(),
                    n.value()
                )
                .unwrap();
            }
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_dot() {
        let mut t = SplayTree::new();
        t.insert(2).unwrap();
        t.insert(1).unwrap();

        let dot = print_dot(&t);
        assert!(dot.starts_with("digraph {"));
        assert!(dot.contains(r#""1" -> "2""#));
        assert!(dot.contains(r#""null_2" [shape=point,style=invis];"#));

        assert_eq!(print_dot(&SplayTree::<u8>::new()).lines().count(), 4);
    }
}
