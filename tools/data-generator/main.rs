use ahash::AHashSet;
use brickflow::catalog::BrickCategory;
use brickflow::store::{BrickRow, ConditionRow, ConnectionRow, PlaybookRows};
use clap::Parser;
use rand::{Rng, rngs::ThreadRng};
use std::fs;

/// A CLI tool to generate sample playbooks for the brickflow inspector
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// The path to write the generated JSON file to
    #[arg(short, long, default_value = "generated_playbook.json")]
    output: String,

    /// The number of bricks to generate
    #[arg(long, default_value_t = 8)]
    bricks: usize,

    /// The number of extra cross connections beyond the spanning chain
    #[arg(long, default_value_t = 2)]
    extra: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let mut rng = rand::rng();

    if cli.bricks == 0 {
        eprintln!("Error: --bricks must be at least 1");
        std::process::exit(1);
    }

    println!(
        "Generating a playbook with {} bricks and up to {} extra connections...",
        cli.bricks, cli.extra
    );

    let bricks = generate_bricks(&mut rng, cli.bricks);
    let connections = generate_connections(&mut rng, &bricks, cli.extra);

    let playbook = PlaybookRows {
        bricks,
        connections,
    };

    let json_output = serde_json::to_string_pretty(&playbook)?;
    fs::write(&cli.output, json_output)?;

    println!(
        "Successfully generated and saved the playbook to '{}'",
        cli.output
    );

    Ok(())
}

/// Generates the brick rows. The first brick is always a collection step so
/// downstream bricks have fields to read; the rest are drawn at random.
fn generate_bricks(rng: &mut ThreadRng, count: usize) -> Vec<BrickRow> {
    let mut bricks = Vec::with_capacity(count);
    for i in 0..count {
        let category = if i == 0 {
            BrickCategory::Collection
        } else {
            BrickCategory::ALL[rng.random_range(0..BrickCategory::ALL.len())]
        };

        let mut config = serde_json::Map::new();
        if category == BrickCategory::Collection {
            config.insert(
                "fields".to_string(),
                serde_json::Value::Array(generate_fields(rng)),
            );
        }

        bricks.push(BrickRow {
            id: format!("brick-{:02}", i + 1),
            brick_type: category.as_key().to_string(),
            label: random_label(rng, category),
            config,
            position_x: rng.random_range(0.0..800.0),
            position_y: rng.random_range(0.0..600.0),
        });
    }
    println!("-> Generated {} bricks.", bricks.len());
    bricks
}

/// Wires every brick after the first to a random earlier brick, so the
/// result is always a connected DAG, then sprinkles in extra forward
/// connections. Duplicate (source, target) pairs are skipped.
fn generate_connections(
    rng: &mut ThreadRng,
    bricks: &[BrickRow],
    extra: usize,
) -> Vec<ConnectionRow> {
    let mut connections = Vec::new();
    let mut pairs: AHashSet<(usize, usize)> = AHashSet::new();

    for target in 1..bricks.len() {
        let source = rng.random_range(0..target);
        pairs.insert((source, target));
        connections.push(make_connection(rng, bricks, source, target, connections.len()));
    }

    let mut added = 0;
    if bricks.len() > 2 {
        for _ in 0..extra * 4 {
            if added == extra {
                break;
            }
            let source = rng.random_range(0..bricks.len() - 1);
            let target = rng.random_range(source + 1..bricks.len());
            if !pairs.insert((source, target)) {
                continue;
            }
            connections.push(make_connection(rng, bricks, source, target, connections.len()));
            added += 1;
        }
    }

    println!(
        "-> Generated {} connections ({} extra).",
        connections.len(),
        added
    );
    connections
}

fn make_connection(
    rng: &mut ThreadRng,
    bricks: &[BrickRow],
    source: usize,
    target: usize,
    index: usize,
) -> ConnectionRow {
    // Review and approval outcomes occasionally gate the next step.
    let condition_field = match bricks[source].brick_type.as_str() {
        "review" => Some("review_status"),
        "approval" => Some("approval_status"),
        _ => None,
    };
    let conditional = condition_field.is_some() && rng.random_bool(0.25);

    ConnectionRow {
        id: format!("conn-{:02}", index + 1),
        source_brick_id: bricks[source].id.clone(),
        target_brick_id: bricks[target].id.clone(),
        edge_type: if conditional { "conditional" } else { "default" }.to_string(),
        condition: if conditional {
            condition_field.map(|field| ConditionRow {
                field: field.to_string(),
                value: "approved".to_string(),
            })
        } else {
            None
        },
        label: None,
        source_handle: None,
        target_handle: None,
    }
}

fn generate_fields(rng: &mut ThreadRng) -> Vec<serde_json::Value> {
    const FIELD_POOL: [(&str, &str, &str); 6] = [
        ("counterparty", "Counterparty", "string"),
        ("deal_size", "Deal Size", "number"),
        ("effective_date", "Effective Date", "date"),
        ("governing_law", "Governing Law", "string"),
        ("payment_terms", "Payment Terms", "string"),
        ("renewal_term", "Renewal Term", "string"),
    ];

    let count = rng.random_range(1..=3);
    let start = rng.random_range(0..FIELD_POOL.len());
    (0..count)
        .map(|offset| {
            let (name, label, field_type) = FIELD_POOL[(start + offset) % FIELD_POOL.len()];
            serde_json::json!({ "name": name, "label": label, "fieldType": field_type })
        })
        .collect()
}

fn random_label(rng: &mut ThreadRng, category: BrickCategory) -> String {
    let options: &[&str] = match category {
        BrickCategory::Collection => &[
            "Collect Deal Facts",
            "Gather Counterparty Details",
            "Collect Pricing Inputs",
        ],
        BrickCategory::Review => &["Review Draft", "Legal Review", "Commercial Review"],
        BrickCategory::Approval => &["Request Approval", "Finance Approval", "Legal Sign-off"],
        BrickCategory::Documentation => &["Generate NDA", "Draft MSA", "Generate Order Form"],
        BrickCategory::Commitment => &["Collect Signature", "Countersign Agreement"],
    };
    options[rng.random_range(0..options.len())].to_string()
}
