use super::brick::Brick;
use super::connection::{Connection, ConnectionKind};
use itertools::Itertools;
use std::fmt::Write;

/// Renders a playbook as a Graphviz `dot` digraph for debugging and
/// documentation. Conditional connections are dashed and carry their
/// predicate as the edge label; error connections are drawn in red.
pub fn to_dot(bricks: &[Brick], connections: &[Connection]) -> String {
    let mut output = String::new();
    writeln!(&mut output, "digraph playbook {{").unwrap();
    writeln!(&mut output, "    rankdir=TB;").unwrap();
    writeln!(&mut output, "    node [shape=box, fontname=\"Helvetica\"];").unwrap();

    for brick in bricks {
        writeln!(
            &mut output,
            "    \"{}\" [label=\"{}\\n({})\"];",
            escape(&brick.id),
            escape(&brick.label),
            brick.category
        )
        .unwrap();
    }

    for connection in connections {
        let mut attrs: Vec<String> = Vec::new();
        if let Some(label) = &connection.label {
            attrs.push(format!("label=\"{}\"", escape(label)));
        }
        match connection.kind {
            ConnectionKind::Conditional => {
                attrs.push("style=dashed".to_string());
                if let Some(condition) = &connection.condition {
                    attrs.push(format!(
                        "taillabel=\"{} = {}\"",
                        escape(&condition.field),
                        escape(&condition.value)
                    ));
                }
            }
            ConnectionKind::Error => attrs.push("color=crimson".to_string()),
            ConnectionKind::Default => {}
        }

        let attr_str = if attrs.is_empty() {
            String::new()
        } else {
            format!(" [{}]", attrs.iter().join(", "))
        };
        writeln!(
            &mut output,
            "    \"{}\" -> \"{}\"{};",
            escape(&connection.source),
            escape(&connection.target),
            attr_str
        )
        .unwrap();
    }

    writeln!(&mut output, "}}").unwrap();
    output
}

fn escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
