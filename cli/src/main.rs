//! Shortest Route CLI: a terminal front end for the route planner
//!
//! Builds a session from `--node`/`--edge` flags, then answers one command,
//! or keeps reading commands interactively with `shell`.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use serde_json::json;
use shortest_route::{Route, RouteSession, SessionConfig};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "shortest-route", version, about = "Shortest route planner")]
struct Cli {
    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    /// Treat every edge as two-way
    #[arg(long, global = true)]
    undirected: bool,

    /// Add a node (repeatable)
    #[arg(long = "node", value_name = "NAME", global = true)]
    nodes: Vec<String>,

    /// Add an edge (repeatable)
    #[arg(long = "edge", value_name = "ORIGIN:DESTINATION:WEIGHT", global = true)]
    edges: Vec<String>,

    /// Log every graph operation
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute the shortest route between two nodes
    Path {
        /// Origin node
        origin: String,
        /// Destination node
        destination: String,
    },
    /// Compute node positions for drawing
    Layout {
        /// Node placed on the top level
        #[arg(long)]
        root: Option<String>,

        /// Width of the drawing surface
        #[arg(long, default_value_t = 800.0, env = "SHORTEST_ROUTE_CANVAS_WIDTH")]
        width: f64,
    },
    /// List nodes and edges
    Show,
    /// Start an interactive shell
    Shell,
}

fn main() {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = build_session(&cli).and_then(|mut session| match &cli.command {
        Commands::Path {
            origin,
            destination,
        } => run_path(&session, origin, destination, &cli.format),
        Commands::Layout { root, width } => {
            run_layout(&session, root.as_deref(), *width, &cli.format)
        }
        Commands::Show => run_show(&session, &cli.format),
        Commands::Shell => run_shell(&mut session, &cli.format),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn build_session(cli: &Cli) -> Result<RouteSession, Box<dyn std::error::Error>> {
    let mut session = RouteSession::new(SessionConfig {
        directed: !cli.undirected,
        ..SessionConfig::default()
    });

    for name in &cli.nodes {
        session.add_node(name)?;
    }
    for spec in &cli.edges {
        let (origin, destination, weight) = parse_edge(spec)?;
        session.add_edge_text(origin, destination, weight)?;
    }

    Ok(session)
}

/// Split `ORIGIN:DESTINATION:WEIGHT`
fn parse_edge(spec: &str) -> Result<(&str, &str, &str), Box<dyn std::error::Error>> {
    let mut parts = spec.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(origin), Some(destination), Some(weight)) => Ok((origin, destination, weight)),
        _ => Err(format!("edge {:?} must look like ORIGIN:DESTINATION:WEIGHT", spec).into()),
    }
}

fn run_path(
    session: &RouteSession,
    origin: &str,
    destination: &str,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let route = session.shortest_path(origin, destination)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&route_json(origin, destination, &route))?);
        }
        OutputFormat::Table => {
            if !route.is_reachable() {
                println!("(no route from {} to {})", origin, destination);
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Step", "Node", "Distance"]);

            let mut travelled = 0.0;
            table.add_row(vec!["0".to_string(), route.path[0].to_string(), "0".to_string()]);
            for (step, (from, to)) in route.segments().iter().enumerate() {
                travelled += session.graph().weight(from.as_str(), to.as_str()).unwrap_or(0.0);
                table.add_row(vec![(step + 1).to_string(), to.to_string(), travelled.to_string()]);
            }

            println!("{}", table);
            println!("Total distance: {}", route.distance);
        }
    }

    Ok(())
}

fn route_json(origin: &str, destination: &str, route: &Route) -> serde_json::Value {
    let reachable = route.is_reachable();
    json!({
        "origin": origin,
        "destination": destination,
        "reachable": reachable,
        "distance": if reachable { json!(route.distance) } else { serde_json::Value::Null },
        "path": route.path,
    })
}

fn run_layout(
    session: &RouteSession,
    root: Option<&str>,
    width: f64,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let layout = session.layout(root, width)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&layout)?);
        }
        OutputFormat::Table => {
            if layout.positions.is_empty() {
                println!("(empty graph)");
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Node", "Level", "X", "Y"]);

            for (level, members) in layout.levels.iter().enumerate() {
                let tag = if layout.orphan_level == Some(level) {
                    format!("{} (unreached)", level)
                } else {
                    level.to_string()
                };
                for name in members {
                    if let Some(pos) = layout.positions.get(name) {
                        table.add_row(vec![
                            name.to_string(),
                            tag.clone(),
                            format!("{:.1}", pos.x),
                            format!("{:.1}", pos.y),
                        ]);
                    }
                }
            }

            println!("{}", table);
            println!("Canvas width: {}", layout.canvas_width);
        }
    }

    Ok(())
}

fn run_show(
    session: &RouteSession,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    match format {
        OutputFormat::Json => {
            let graph = json!({
                "directed": session.graph().directed(),
                "nodes": session.nodes(),
                "edges": session.edges(),
            });
            println!("{}", serde_json::to_string_pretty(&graph)?);
        }
        OutputFormat::Table => {
            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Origin", "Destination", "Weight"]);
            for edge in session.edges() {
                table.add_row(vec![
                    edge.origin.to_string(),
                    edge.destination.to_string(),
                    edge.weight.to_string(),
                ]);
            }

            println!("{}", table);
            println!(
                "{} node(s), {} edge(s), {}",
                session.graph().node_count(),
                session.graph().edge_count(),
                if session.graph().directed() { "directed" } else { "undirected" }
            );
        }
    }

    Ok(())
}

fn run_shell(
    session: &mut RouteSession,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("Shortest Route Interactive Shell");
    println!("Type :help for commands. :quit to exit.\n");

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("route> ");

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break; // EOF
        }

        let words: Vec<&str> = line.split_whitespace().collect();
        let result: Result<(), Box<dyn std::error::Error>> = match words.as_slice() {
            [] => continue,
            [":quit" | ":exit" | ":q"] => break,
            [":help" | ":h"] => {
                println!("Commands:");
                println!("  node NAME               Add a node");
                println!("  edge FROM TO WEIGHT     Add or overwrite an edge");
                println!("  path FROM TO            Shortest route");
                println!("  layout [ROOT] [WIDTH]   Node positions");
                println!("  root [NAME]             Remember or forget the layout root");
                println!("  rm-node NAME            Remove a node and its edges");
                println!("  rm-edge FROM TO         Remove an edge");
                println!("  show                    List nodes and edges");
                println!("  :quit                   Exit shell");
                Ok(())
            }
            ["node", name] => session.add_node(name).map_err(Into::into),
            ["edge", origin, destination, weight] => session
                .add_edge_text(origin, destination, weight)
                .map_err(Into::into),
            ["path", origin, destination] => run_path(session, origin, destination, format),
            ["layout"] => run_layout(session, None, 800.0, format),
            ["layout", root] => run_layout(session, Some(*root), 800.0, format),
            ["layout", root, width] => match width.parse::<f64>() {
                Ok(width) => run_layout(session, Some(*root), width, format),
                Err(_) => Err(format!("width {:?} is not a number", width).into()),
            },
            ["root"] => session.set_layout_root(None).map_err(Into::into),
            ["root", name] => session.set_layout_root(Some(*name)).map_err(Into::into),
            ["rm-node", name] => session.remove_node(name).map_err(Into::into),
            ["rm-edge", origin, destination] => session
                .remove_edge(origin, destination)
                .map(|removed| {
                    if !removed {
                        println!("(no edge {} -> {})", origin, destination);
                    }
                })
                .map_err(Into::into),
            ["show"] => run_show(session, format),
            _ => Err(format!("unknown command {:?}, try :help", line.trim()).into()),
        };

        if let Err(e) = result {
            eprintln!("Error: {}", e);
        }
    }

    println!("Bye!");
    Ok(())
}
