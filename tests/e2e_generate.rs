//! End-to-end tests: schema text → Cypher script.
//!
//! Each test exercises: scan → classify → build → generate → render,
//! with a seeded generator so failures reproduce.

use std::collections::HashSet;

use pgschema_gen::counts::read_table;
use pgschema_gen::export::{self, parse_property_block, NODES_HEADER, RELATIONSHIPS_HEADER};
use pgschema_gen::generate::generate;
use pgschema_gen::{generate_script, schema, CountResolver, Error, Synthesizer, Value};
use rand::SeedableRng;
use rand::rngs::StdRng;

const COMPANY: &str = "CREATE GRAPH TYPE Company STRICT {
    (EmployeeType: Employee {name STRING, employee_id INT}),
    (DepartmentType: Department {name STRING, department_id INT}),
    (:EmployeeType)-[WorksInType: worksIn]->(:DepartmentType)
}";

fn company_counts() -> CountResolver {
    let mut counts = CountResolver::new(4, 5);
    counts.extend(read_table("EmployeeType,3\nDepartmentType,2\n".as_bytes()).unwrap());
    counts
}

/// `CREATE (Var:Label {...});` → (Var, Label, block)
fn split_node_statement(stmt: &str) -> (&str, &str, Option<&str>) {
    let inner = stmt
        .strip_prefix("CREATE (")
        .and_then(|s| s.strip_suffix(");"))
        .unwrap_or_else(|| panic!("not a node statement: {stmt}"));
    let (var, rest) = inner.split_once(':').unwrap();
    match rest.split_once(' ') {
        Some((label, block)) => (var, label, Some(block)),
        None => (var, rest, None),
    }
}

/// `CREATE (Src)-[:label]->(Dst);` → (Src, label, Dst)
fn split_edge_statement(stmt: &str) -> (&str, &str, &str) {
    let inner = stmt
        .strip_prefix("CREATE (")
        .and_then(|s| s.strip_suffix(");"))
        .unwrap_or_else(|| panic!("not an edge statement: {stmt}"));
    let (src, rest) = inner.split_once(")-[:").unwrap();
    let (label, dst) = rest.split_once("]->(").unwrap();
    (src, label, dst)
}

// ============================================================================
// Company scenario
// ============================================================================

#[test]
fn test_company_scenario_counts() {
    let mut rng = StdRng::seed_from_u64(2024);
    let script = generate_script(COMPANY, &company_counts(), &Synthesizer::default(), &mut rng).unwrap();

    let employees: Vec<_> = script.nodes.iter()
        .map(|s| split_node_statement(s))
        .filter(|(_, label, _)| *label == "Employee")
        .map(|(var, _, _)| var.to_string())
        .collect();
    let departments: Vec<_> = script.nodes.iter()
        .map(|s| split_node_statement(s))
        .filter(|(_, label, _)| *label == "Department")
        .map(|(var, _, _)| var.to_string())
        .collect();

    assert_eq!(employees, vec!["EmployeeType_0", "EmployeeType_1", "EmployeeType_2"]);
    assert_eq!(departments, vec!["DepartmentType_0", "DepartmentType_1"]);
    assert_eq!(script.nodes.len(), 5);
    assert_eq!(script.edges.len(), 5);

    let employees: HashSet<_> = employees.into_iter().collect();
    let departments: HashSet<_> = departments.into_iter().collect();
    for stmt in &script.edges {
        let (src, label, dst) = split_edge_statement(stmt);
        assert_eq!(label, "worksIn");
        assert!(employees.contains(src), "{stmt}");
        assert!(departments.contains(dst), "{stmt}");
    }
}

#[test]
fn test_company_scenario_property_blocks() {
    let mut rng = StdRng::seed_from_u64(7);
    let script = generate_script(COMPANY, &company_counts(), &Synthesizer::default(), &mut rng).unwrap();

    for stmt in &script.nodes {
        let (_, label, block) = split_node_statement(stmt);
        let props = parse_property_block(block.unwrap()).unwrap();
        let id_key = if label == "Employee" { "employee_id" } else { "department_id" };
        let keys: Vec<_> = props.keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["name", id_key]);

        let name = props["name"].as_str().unwrap();
        assert_eq!(name.len(), 8);
        assert!(name.chars().all(|c| c.is_ascii_uppercase()));
        let id = props[id_key].as_int().unwrap();
        assert!((1..=1000).contains(&id));
    }
}

#[test]
fn test_nodes_precede_edges() {
    let mut rng = StdRng::seed_from_u64(1);
    let script = generate_script(COMPANY, &company_counts(), &Synthesizer::default(), &mut rng).unwrap();
    let lines: Vec<_> = script.lines().collect();

    assert_eq!(lines[0], NODES_HEADER);
    assert_eq!(lines[6], RELATIONSHIPS_HEADER);
    assert!(lines[1..6].iter().all(|l| !l.contains("]->")));
    assert!(lines[7..].iter().all(|l| l.contains("]->")));
    assert!(lines.iter().skip(1).filter(|l| !l.starts_with("//")).all(|l| l.ends_with(';')));
}

#[test]
fn test_same_seed_same_script() {
    let run = |seed| {
        let mut rng = StdRng::seed_from_u64(seed);
        generate_script(COMPANY, &company_counts(), &Synthesizer::default(), &mut rng).unwrap()
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn test_generate_script_matches_phases() {
    let model = schema::parse(COMPANY).unwrap();
    let mut rng = StdRng::seed_from_u64(7);
    let generated = generate(&model, &company_counts(), &Synthesizer::default(), &mut rng).unwrap();
    let by_phase = export::render(&generated);

    let mut rng = StdRng::seed_from_u64(7);
    let script = generate_script(COMPANY, &company_counts(), &Synthesizer::default(), &mut rng).unwrap();
    assert_eq!(script, by_phase);

    let mut buf = Vec::new();
    script.write_to(&mut buf).unwrap();
    let text = String::from_utf8(buf).unwrap();
    assert_eq!(text.lines().count(), script.nodes.len() + script.edges.len() + 2);
}

// ============================================================================
// Parsing
// ============================================================================

#[test]
fn test_parse_completeness() {
    let schema = "CREATE GRAPH TYPE Social STRICT {
        (PostType: Post {content STRING, post_id INT}),
        (PersonType: Person {name STRING}),
        (PlaceType: Place {}),
        (:PostType)-[IsLocatedInType: isLocatedIn]->(:PlaceType),
        (:PersonType)-[KnowsType: knows]->(:PersonType),
        (:PersonType)-[LikesType: likes]->(:PostType)
    }";
    let model = schema::parse(schema).unwrap();
    let labels: HashSet<_> = model.internal_labels().collect();
    let expected: HashSet<_> = [
        "PostType", "PersonType", "PlaceType",
        "IsLocatedInType", "KnowsType", "LikesType",
    ].into_iter().collect();
    assert_eq!(labels, expected);
    assert_eq!(model.graph_name, "Social");
}

#[test]
fn test_missing_closing_brace_yields_no_output() {
    let schema = "CREATE GRAPH TYPE Broken STRICT {
        (EmployeeType: Employee {name STRING, employee_id INT),
        (DepartmentType: Department {name STRING})
    }";
    let mut rng = StdRng::seed_from_u64(0);
    let result = generate_script(schema, &CountResolver::new(2, 2), &Synthesizer::default(), &mut rng);
    assert!(matches!(result, Err(Error::SchemaSyntax { .. })), "{result:?}");
}

#[test]
fn test_unrecognized_fragment_named_in_error() {
    let schema = "CREATE GRAPH TYPE G STRICT { (AType: A {}), (:AType)=[R: r]=>(:AType) }";
    let err = schema::parse(schema).unwrap_err();
    assert!(err.to_string().contains("Unexpected character"), "{err}");

    let schema = "CREATE GRAPH TYPE G STRICT { (AType: A {}), (AType A) }";
    let err = schema::parse(schema).unwrap_err();
    assert!(err.to_string().contains("(AType A)"), "{err}");
}

#[test]
fn test_unsupported_type_reported() {
    let schema = "CREATE GRAPH TYPE G STRICT { (AType: A {when DATE}) }";
    let err = schema::parse(schema).unwrap_err();
    assert!(matches!(err, Error::UnsupportedType { ref token, .. } if token == "DATE"));
}

#[test]
fn test_unknown_endpoint_reported() {
    let schema = "CREATE GRAPH TYPE G STRICT { (AType: A {}), (:AType)-[R: r]->(:BType) }";
    let err = schema::parse(schema).unwrap_err();
    assert!(matches!(err, Error::UnknownLabel { ref label, .. } if label == "BType"));
}

// ============================================================================
// Counts
// ============================================================================

#[test]
fn test_override_for_absent_label_ignored() {
    let counts = CountResolver::new(2, 1).with_override("GhostType", 50);
    let mut rng = StdRng::seed_from_u64(0);
    let script = generate_script(COMPANY, &counts, &Synthesizer::default(), &mut rng).unwrap();
    assert_eq!(script.nodes.len(), 4);
    assert_eq!(script.edges.len(), 1);
}

#[test]
fn test_self_referencing_single_instance_fails() {
    let schema = "CREATE GRAPH TYPE G STRICT {
        (PersonType: Person {name STRING}),
        (:PersonType)-[KnowsType: knows]->(:PersonType)
    }";
    let counts = CountResolver::new(1, 3);
    let mut rng = StdRng::seed_from_u64(0);
    let err = generate_script(schema, &counts, &Synthesizer::default(), &mut rng).unwrap_err();
    assert!(matches!(err, Error::InsufficientInstances { ref edge, .. } if edge == "KnowsType"));
}

#[test]
fn test_empty_node_type_renders_without_block() {
    let schema = "CREATE GRAPH TYPE G STRICT { (TagType: Tag {}) }";
    let mut rng = StdRng::seed_from_u64(0);
    let script = generate_script(schema, &CountResolver::new(2, 0), &Synthesizer::default(), &mut rng).unwrap();
    assert_eq!(script.nodes, vec!["CREATE (TagType_0:Tag);", "CREATE (TagType_1:Tag);"]);
    assert!(script.edges.is_empty());
}

#[test]
fn test_string_values_quoted_ints_bare() {
    let schema = "CREATE GRAPH TYPE G STRICT { (AType: A {s STRING, i INT}) }";
    let synth = Synthesizer::new(3, 5..=5).unwrap();
    let mut rng = StdRng::seed_from_u64(0);
    let script = generate_script(schema, &CountResolver::new(1, 0), &synth, &mut rng).unwrap();
    let (_, _, block) = split_node_statement(&script.nodes[0]);
    let block = block.unwrap();
    assert!(block.starts_with("{s: '") && block.ends_with("', i: 5}"), "{block}");
    let props = parse_property_block(block).unwrap();
    assert_eq!(props["i"], Value::Int(5));
}

#[test]
fn test_negative_ints_read_back() {
    let schema = "CREATE GRAPH TYPE G STRICT { (AType: A {i INT}) }";
    let synth = Synthesizer::new(3, -20..=-10).unwrap();
    let mut rng = StdRng::seed_from_u64(3);
    let script = generate_script(schema, &CountResolver::new(5, 0), &synth, &mut rng).unwrap();
    for stmt in &script.nodes {
        let (_, _, block) = split_node_statement(stmt);
        let props = parse_property_block(block.unwrap()).unwrap();
        assert!(matches!(props["i"], Value::Int(i) if (-20..=-10).contains(&i)), "{stmt}");
    }
}
