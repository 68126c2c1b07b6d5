use shortest_route::{GraphError, Route, RouteSession, SessionConfig};

fn main() -> Result<(), GraphError> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    println!("Shortest Route v{}", shortest_route::version());
    println!("==========================================");
    println!();

    // Demo 1: Directed graph
    demo_directed_routes()?;

    // Demo 2: Undirected graph
    demo_undirected_routes()?;

    // Demo 3: Layout
    demo_layout()?;

    Ok(())
}

fn demo_directed_routes() -> Result<(), GraphError> {
    println!("=== Demo 1: Directed Routes ===");
    let mut session = RouteSession::new(SessionConfig::default());

    session.add_edge("A", "B", 1.0)?;
    session.add_edge("B", "C", 2.0)?;
    session.add_edge("A", "C", 5.0)?;
    session.add_edge("C", "D", 1.0)?;
    println!("✓ A -> B (1), B -> C (2), A -> C (5), C -> D (1)");

    println!("\nAdjacency:");
    print!("{}", session.graph());

    print_route("A", "D", &session.shortest_path("A", "D")?);
    print_route("D", "A", &session.shortest_path("D", "A")?);

    match session.add_edge_text("D", "A", "far") {
        Err(e) if e.is_validation() => println!("✓ Rejected weight input: {}", e),
        other => println!("Unexpected: {:?}", other),
    }
    Ok(())
}

fn demo_undirected_routes() -> Result<(), GraphError> {
    println!("\n=== Demo 2: Undirected Routes ===");
    let mut session = RouteSession::new(SessionConfig {
        directed: false,
        ..SessionConfig::default()
    });

    session.add_edge("A", "B", 3.0)?;
    session.add_edge("B", "C", 3.0)?;
    session.add_edge("A", "C", 10.0)?;
    println!("✓ A - B (3), B - C (3), A - C (10)");

    print_route("A", "C", &session.shortest_path("A", "C")?);
    print_route("C", "A", &session.shortest_path("C", "A")?);
    Ok(())
}

fn demo_layout() -> Result<(), GraphError> {
    println!("\n=== Demo 3: Layout ===");
    let mut session = RouteSession::default();

    session.add_edge("A", "B", 1.0)?;
    session.add_edge("A", "C", 1.0)?;
    session.add_edge("C", "D", 1.0)?;
    session.add_node("E")?;

    let layout = session.layout(Some("A"), 600.0)?;
    for (level, members) in layout.levels.iter().enumerate() {
        let names: Vec<&str> = members.iter().map(|n| n.as_str()).collect();
        let tag = if layout.orphan_level == Some(level) { " (unreached)" } else { "" };
        println!("  Level {}{}: {}", level, tag, names.join(", "));
    }
    for (name, pos) in &layout.positions {
        println!("  {} at ({:.0}, {:.0})", name, pos.x, pos.y);
    }
    Ok(())
}

fn print_route(origin: &str, destination: &str, route: &Route) {
    if route.is_reachable() {
        let names: Vec<&str> = route.path.iter().map(|n| n.as_str()).collect();
        println!(
            "  {} → {}: distance {} via {}",
            origin,
            destination,
            route.distance,
            names.join(" → ")
        );
    } else {
        println!("  {} → {}: no route", origin, destination);
    }
}
