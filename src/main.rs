use brickflow::prelude::*;
use std::env;
use std::fs;

fn main() {
    // Create output directory
    const TMP_DIR: &str = "tmp";
    if let Err(e) = fs::create_dir_all(TMP_DIR) {
        eprintln!("Failed to create tmp directory: {}", e);
        std::process::exit(1);
    }

    // Parse command line arguments
    let args: Vec<String> = env::args().collect();
    if args.len() > 2 {
        eprintln!("Usage: cargo run -- [path/to/playbook.json]");
        std::process::exit(1);
    }

    let mut session = match args.get(1) {
        Some(path) => {
            println!("Loading playbook from: {}", path);
            let json = match fs::read_to_string(path) {
                Ok(content) => content,
                Err(e) => {
                    eprintln!("Failed to read playbook file '{}': {}", path, e);
                    std::process::exit(1);
                }
            };
            let rows: PlaybookRows = match serde_json::from_str(&json) {
                Ok(rows) => rows,
                Err(e) => {
                    eprintln!("Failed to parse playbook file '{}': {}", path, e);
                    std::process::exit(1);
                }
            };
            match rows.into_playbook() {
                Ok(definition) => PlaybookSession::from_definition(definition),
                Err(e) => {
                    eprintln!("Failed to convert playbook: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("No playbook file provided. Building the demo NDA playbook.");
            demo_session()
        }
    };

    println!(
        "\nPlaybook loaded: {} bricks, {} connections",
        session.bricks().len(),
        session.connections().len()
    );
    for brick in session.bricks() {
        println!("  -> [{}] {}", brick.category, brick.label);
    }

    // Validation phase
    println!("\nValidating playbook structure...");
    let issues = session.validate();
    if issues.is_empty() {
        println!("  -> No issues found");
    } else {
        for issue in &issues {
            println!("  -> {}: {}", issue.severity, issue.message);
        }
    }

    // Template coverage for documentation bricks
    println!("\nChecking template coverage...");
    let mut checked_any = false;
    for brick in session.bricks() {
        if brick.category != BrickCategory::Documentation {
            continue;
        }
        let Some(template_id) = brick.config_str("template_id") else {
            continue;
        };
        match session.template_coverage(&brick.id, template_id) {
            Some(coverage) => {
                checked_any = true;
                println!("  '{}' (template '{}'):", brick.label, template_id);
                for entry in &coverage {
                    let mark = if entry.resolution.is_resolved() {
                        "ok"
                    } else {
                        "MISSING"
                    };
                    println!(
                        "  -> {{{{{}}}}} {} ({})",
                        entry.variable.raw,
                        mark,
                        entry.resolution.source_label()
                    );
                }
            }
            None => {
                println!("  -> template '{}' is not in the directory", template_id);
            }
        }
    }
    if !checked_any {
        println!("  -> No documentation brick references a known template");
    }

    // Upstream analysis for a terminal brick
    let analyzer = session.analyzer();
    if let Some(terminal) = session
        .bricks()
        .iter()
        .find(|b| analyzer.immediate_downstream(&b.id).is_empty())
    {
        let upstream = analyzer.available_upstream_outputs(&terminal.id);
        println!(
            "\n'{}' can read {} upstream fields:",
            terminal.label,
            upstream.len()
        );
        for output in &upstream {
            println!(
                "  -> {} ({}) from '{}'",
                output.field.name, output.field.field_type, output.source_label
            );
        }
    }

    // Layout phase
    println!("\nApplying auto-layout...");
    session.auto_layout();
    for brick in session.bricks() {
        println!(
            "  -> '{}' at ({:.0}, {:.0})",
            brick.label, brick.position.x, brick.position.y
        );
    }

    // Write the Graphviz export next to the other artifacts
    let dot = to_dot(session.bricks(), session.connections());
    let dot_path = format!("{}/playbook.dot", TMP_DIR);
    if let Err(e) = fs::write(&dot_path, dot) {
        eprintln!("Failed to write DOT file '{}': {}", dot_path, e);
        std::process::exit(1);
    }
    println!("\nWrote Graphviz export to '{}'", dot_path);
}

/// The playbook every demo run edits: collect deal facts, draft the NDA,
/// review it, approve it, collect the signature.
fn demo_session() -> PlaybookSession {
    let templates = StaticTemplates::new().with_template(
        "tpl-nda",
        "NDA",
        "Dear {{user.name}}, the NDA with {{previous_output.counterparty}} for {{workstream.name}} is attached.",
    );
    let mut session = PlaybookSession::new().with_templates(templates);

    let intake = session
        .add_brick(BrickCategory::Collection, Position::default())
        .id
        .clone();
    session.update_brick_label(&intake, "Collect Deal Facts");
    session.update_brick_config(
        &intake,
        [(
            "fields".to_string(),
            serde_json::json!([
                { "name": "counterparty", "label": "Counterparty" },
                { "name": "deal_size", "label": "Deal Size", "fieldType": "number" },
            ]),
        )],
    );

    let draft = session
        .add_brick(BrickCategory::Documentation, Position::default())
        .id
        .clone();
    session.update_brick_label(&draft, "Generate NDA");
    session.update_brick_config(
        &draft,
        [("template_id".to_string(), serde_json::json!("tpl-nda"))],
    );

    let review = session
        .add_brick(BrickCategory::Review, Position::default())
        .id
        .clone();
    let approval = session
        .add_brick(BrickCategory::Approval, Position::default())
        .id
        .clone();
    let signature = session
        .add_brick(BrickCategory::Commitment, Position::default())
        .id
        .clone();

    let chain = [
        (&intake, &draft),
        (&draft, &review),
        (&review, &approval),
        (&approval, &signature),
    ];
    for (source, target) in chain {
        if session.connect(source, target).is_none() {
            eprintln!("Failed to connect demo bricks");
            std::process::exit(1);
        }
    }
    session
}
