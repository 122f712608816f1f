use brickflow::prelude::*;
use clap::{Parser, ValueEnum};
use serde::Deserialize;
use std::fs;
use std::io::{self, Write};
use std::time::Instant;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

// --- JSON Deserialization Structs (Input Format Specific) ---
// These structs match the visual editor's export format and are only used
// here for conversion.

#[derive(Deserialize)]
struct RawPlaybook {
    nodes: Vec<RawNode>,
    edges: Vec<RawEdge>,
}

#[derive(Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    position: RawPosition,
    data: RawNodeData,
}

#[derive(Deserialize, Default)]
struct RawPosition {
    #[serde(default)]
    x: f64,
    #[serde(default)]
    y: f64,
}

#[derive(Deserialize)]
struct RawNodeData {
    #[serde(alias = "brickType")]
    brick_type: String,
    label: String,
    #[serde(default)]
    config: serde_json::Map<String, serde_json::Value>,
}

#[derive(Deserialize)]
struct RawEdge {
    id: String,
    source: String,
    target: String,
    #[serde(default, alias = "sourceHandle")]
    source_handle: Option<String>,
    #[serde(default, alias = "targetHandle")]
    target_handle: Option<String>,
    #[serde(default)]
    data: Option<RawEdgeData>,
}

#[derive(Deserialize)]
struct RawEdgeData {
    #[serde(default = "default_edge_type", alias = "edgeType")]
    edge_type: String,
    #[serde(default)]
    condition: Option<RawCondition>,
    #[serde(default)]
    label: Option<String>,
}

#[derive(Deserialize)]
struct RawCondition {
    field: String,
    value: String,
}

fn default_edge_type() -> String {
    "default".to_string()
}

/// The input layout to parse.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatCli {
    /// Visual editor export: nodes/edges with a nested data object
    Editor,
    /// Flat row layout as persisted by hosts
    Rows,
}

// --- Converter Implementation ---
// This implements the conversion from the editor's export model to
// brickflow's canonical PlaybookDefinition.

impl IntoPlaybook for RawPlaybook {
    fn into_playbook(self) -> std::result::Result<PlaybookDefinition, ConversionError> {
        let mut bricks = Vec::with_capacity(self.nodes.len());
        for node in self.nodes {
            let Some(category) = BrickCategory::from_key(&node.data.brick_type) else {
                return Err(ConversionError::UnknownCategory {
                    brick_id: node.id,
                    category: node.data.brick_type,
                });
            };
            bricks.push(Brick {
                id: node.id,
                category,
                label: node.data.label,
                config: node.data.config.into_iter().collect(),
                position: Position::new(node.position.x, node.position.y),
                validity: None,
            });
        }

        let connections = self
            .edges
            .into_iter()
            .map(|edge| {
                let (kind, condition, label) = match edge.data {
                    Some(data) => (
                        ConnectionKind::from_key(&data.edge_type),
                        data.condition,
                        data.label,
                    ),
                    None => (ConnectionKind::Default, None, None),
                };
                let condition = if kind == ConnectionKind::Conditional {
                    condition.map(|c| Condition {
                        field: c.field,
                        value: c.value,
                    })
                } else {
                    None
                };
                Connection {
                    id: edge.id,
                    source: edge.source,
                    target: edge.target,
                    kind,
                    condition,
                    label,
                    source_handle: edge.source_handle.as_deref().and_then(HandleSide::from_key),
                    target_handle: edge.target_handle.as_deref().and_then(HandleSide::from_key),
                }
            })
            .collect();

        Ok(PlaybookDefinition {
            bricks,
            connections,
        })
    }
}

/// A playbook graph inspection CLI: validates structure, reports data
/// flow, and computes editor layouts.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Path to the playbook JSON file
    playbook_path: Option<String>,

    /// The input layout to parse
    #[arg(short, long, value_enum)]
    format: Option<FormatCli>,

    /// Print the data-flow report for this brick id
    #[arg(short, long)]
    brick: Option<String>,

    /// Apply the auto-layout and print the computed positions
    #[arg(short, long)]
    layout: bool,

    /// Write a Graphviz export of the playbook to this path
    #[arg(short, long)]
    dot: Option<String>,

    /// Run in interactive mode to be prompted for inputs
    #[arg(short = 'i', long, help = "Run in interactive 'human' mode")]
    human: bool,
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    if cli.human {
        run_interactive();
    } else {
        run_non_interactive(cli);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new("warn,brickflow=info"))
        .unwrap();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();
}

fn run_inspection(
    playbook_path: String,
    format: FormatCli,
    brick_id: Option<String>,
    apply_layout: bool,
    dot_path: Option<String>,
) {
    let total_start = Instant::now();

    // --- 1. File Loading ---
    let load_start = Instant::now();
    let playbook_json = fs::read_to_string(&playbook_path).unwrap_or_else(|e| {
        exit_with_error(&format!(
            "Failed to read playbook file '{}': {}",
            &playbook_path, e
        ))
    });
    let load_duration = load_start.elapsed();

    // --- 2. Parsing and Conversion ---
    let parse_start = Instant::now();
    let definition = match format {
        FormatCli::Editor => {
            let raw: RawPlaybook = serde_json::from_str(&playbook_json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse playbook JSON: {}", e)));
            raw.into_playbook()
        }
        FormatCli::Rows => {
            let rows: PlaybookRows = serde_json::from_str(&playbook_json)
                .unwrap_or_else(|e| exit_with_error(&format!("Failed to parse playbook JSON: {}", e)));
            rows.into_playbook()
        }
    }
    .unwrap_or_else(|e| exit_with_error(&format!("Failed to convert playbook: {}", e)));
    let parse_duration = parse_start.elapsed();

    let mut session = PlaybookSession::from_definition(definition);
    println!(
        "Playbook loaded: {} bricks, {} connections",
        session.bricks().len(),
        session.connections().len()
    );

    // --- 3. Validation ---
    println!("\nValidating playbook structure...");
    let validate_start = Instant::now();
    let issues = session.validate();
    let validate_duration = validate_start.elapsed();

    if issues.is_empty() {
        println!("  -> No issues found");
    } else {
        for issue in &issues {
            match &issue.brick_id {
                Some(id) => println!("  -> [{}] {} ({})", issue.severity, issue.message, id),
                None => println!("  -> [{}] {}", issue.severity, issue.message),
            }
        }
    }

    // --- 4. Data-Flow Report ---
    let mut analysis_duration = None;
    if let Some(brick_id) = &brick_id {
        let analysis_start = Instant::now();
        let analyzer = session.analyzer();
        match analyzer.field_data_flow(brick_id) {
            Some(flow) => {
                let brick_label = analyzer
                    .brick(brick_id)
                    .map(|b| b.label.clone())
                    .unwrap_or_default();
                println!("\nData flow for '{}':", brick_label);

                println!("  Receives {} upstream fields:", flow.receives.len());
                for received in &flow.receives {
                    println!(
                        "  -> {} ({}) from '{}'",
                        received.field.name, received.field.field_type, received.source_label
                    );
                }

                println!("  Emits {} fields:", flow.outputs.len());
                for output in &flow.outputs {
                    let origin = output
                        .produced_by
                        .as_ref()
                        .map(|by| format!("first produced by '{}'", by.label))
                        .unwrap_or_else(|| "originates here".to_string());
                    let consumers: Vec<&str> = output
                        .delivered_to
                        .iter()
                        .map(|to| to.label.as_str())
                        .collect();
                    println!(
                        "  -> {} ({}), delivered to [{}]",
                        output.field.name,
                        origin,
                        consumers.join(", ")
                    );
                }

                let documents = analyzer.nearest_upstream_documents(brick_id);
                if !documents.is_empty() {
                    println!("  Nearest upstream documents:");
                    for document in documents {
                        println!("  -> '{}'", document.label);
                    }
                }
            }
            None => exit_with_error(&format!("No brick with id '{}' in the playbook", brick_id)),
        }
        analysis_duration = Some(analysis_start.elapsed());
    }

    // --- 5. Layout ---
    let mut layout_duration = None;
    if apply_layout {
        println!("\nApplying auto-layout...");
        let layout_start = Instant::now();
        session.auto_layout();
        layout_duration = Some(layout_start.elapsed());
        for brick in session.bricks() {
            println!(
                "  -> '{}' at ({:.0}, {:.0})",
                brick.label, brick.position.x, brick.position.y
            );
        }
    }

    // --- 6. Graphviz Export ---
    if let Some(dot_path) = &dot_path {
        let dot = to_dot(session.bricks(), session.connections());
        fs::write(dot_path, dot).unwrap_or_else(|e| {
            exit_with_error(&format!("Failed to write DOT file '{}': {}", dot_path, e))
        });
        println!("\nWrote Graphviz export to '{}'", dot_path);
    }

    // --- 7. Summary ---
    let total_duration = total_start.elapsed();
    let errors = issues
        .iter()
        .filter(|i| i.severity == Severity::Error)
        .count();
    let warnings = issues.len() - errors;

    println!("\n--- Playbook Summary ---");
    println!("Bricks:      {}", session.bricks().len());
    println!("Connections: {}", session.connections().len());
    println!("Errors:      {}", errors);
    println!("Warnings:    {}", warnings);

    println!("\n--- Performance Summary ---");
    println!("File Loading:   {:?}", load_duration);
    println!("Parsing:        {:?}", parse_duration);
    println!("Validation:     {:?}", validate_duration);
    if let Some(duration) = analysis_duration {
        println!("Data-Flow:      {:?}", duration);
    }
    if let Some(duration) = layout_duration {
        println!("Layout:         {:?}", duration);
    }
    println!("---------------------------");
    println!("Total Execution: {:?}", total_duration);
    println!();
}

/// Runs the CLI in non-interactive mode, taking all arguments from the command line.
fn run_non_interactive(cli: Cli) {
    let playbook_path = cli.playbook_path.unwrap_or_else(|| {
        exit_with_error("Playbook path is required in non-interactive mode.");
    });
    let format = cli.format.unwrap_or(FormatCli::Editor);

    run_inspection(playbook_path, format, cli.brick, cli.layout, cli.dot);
}

/// Runs the CLI in an interactive, human-friendly mode with prompts.
fn run_interactive() {
    println!("--- Brickflow Interactive Mode ---");

    let playbook_path = prompt_for_input("Enter playbook path", Some("data/playbook.json"));

    let format = loop {
        println!("\nPlease select the input layout:");
        println!("  1: Editor export (nodes/edges with nested data)");
        println!("  2: Row layout (flat records)");
        let choice_str = prompt_for_input("Enter choice", Some("1"));

        match choice_str.trim() {
            "1" => break FormatCli::Editor,
            "2" => break FormatCli::Rows,
            _ => println!("Invalid choice. Please enter 1 or 2."),
        }
    };

    let brick_id_str = prompt_for_input("Enter brick id for a data-flow report (optional)", None);
    let brick_id = if brick_id_str.is_empty() {
        None
    } else {
        Some(brick_id_str)
    };

    let layout_str = prompt_for_input("Apply auto-layout? (y/n)", Some("n"));
    let apply_layout = layout_str.trim().eq_ignore_ascii_case("y");

    run_inspection(playbook_path, format, brick_id, apply_layout, None);
}

/// A helper function to prompt the user and read a line of input.
fn prompt_for_input(prompt_text: &str, default: Option<&str>) -> String {
    let mut line = String::new();
    let default_prompt = default.map_or("".to_string(), |d| format!(" [default: {}]", d));

    print!("> {}{}: ", prompt_text, default_prompt);
    io::stdout().flush().unwrap();

    io::stdin()
        .read_line(&mut line)
        .expect("Failed to read line");
    let trimmed = line.trim().to_string();

    if trimmed.is_empty() {
        default.unwrap_or("").to_string()
    } else {
        trimmed
    }
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    std::process::exit(1);
}
