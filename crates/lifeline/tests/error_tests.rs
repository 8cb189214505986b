//! Tests for core error types and how configuration errors surface

use lifeline::core::DiagramError;
use lifeline::primitives::sequence::{
    Actor, Message, SequenceConfig, SequenceDatabase, SequenceDiagram,
};

fn diagram_error(err: anyhow::Error) -> DiagramError {
    err.downcast::<DiagramError>()
        .expect("error should be a DiagramError")
}

#[test]
fn test_error_messages() {
    let error = DiagramError::unknown_actor("m3", "kafka");
    let msg = error.to_string();
    assert!(msg.contains("'kafka'"));
    assert!(msg.contains("'m3'"));

    assert_eq!(
        DiagramError::EmptyActors.to_string(),
        "Sequence diagram has no actors"
    );

    let parse = DiagramError::parse_error("expected value".to_string(), 3, 7);
    assert_eq!(
        parse.to_string(),
        "Parse error: expected value at line 3, column 7"
    );

    assert!(DiagramError::render_error("boom".to_string())
        .to_string()
        .starts_with("Render error"));
}

#[test]
fn test_configuration_classification() {
    assert!(DiagramError::EmptyActors.is_configuration());
    assert!(DiagramError::unknown_actor("m", "a").is_configuration());
    assert!(DiagramError::invalid_config("spacing").is_configuration());
    assert!(!DiagramError::render_error("x".to_string()).is_configuration());
    assert!(!DiagramError::parse_error("x".to_string(), 1, 1).is_configuration());
}

#[test]
fn test_cramped_header_is_configuration_error() {
    let err = SequenceDiagram::with_config(
        vec![Actor::new("pg", "PostgreSQL")],
        Vec::new(),
        SequenceConfig::default().with_header_height(30.0),
    )
    .unwrap_err();
    let err = diagram_error(err);
    assert!(err.is_configuration());
    assert!(err.to_string().contains("actor boxes"));
}

#[test]
fn test_dangling_reference_fails_at_construction() {
    let err = SequenceDiagram::new(
        vec![Actor::new("pg", "PostgreSQL")],
        vec![Message::new("m1", "pg", "kafka", "publish")],
    )
    .unwrap_err();
    match diagram_error(err) {
        DiagramError::UnknownActor { message, actor } => {
            assert_eq!(message, "m1");
            assert_eq!(actor, "kafka");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_dangling_source_is_reported() {
    let err = SequenceDiagram::new(
        vec![Actor::new("pg", "PostgreSQL")],
        vec![Message::new("m1", "ghost", "pg", "read")],
    )
    .unwrap_err();
    assert!(matches!(
        diagram_error(err),
        DiagramError::UnknownActor { actor, .. } if actor == "ghost"
    ));
}

#[test]
fn test_empty_actors_rejected() {
    let err = SequenceDiagram::new(vec![], vec![]).unwrap_err();
    assert!(matches!(diagram_error(err), DiagramError::EmptyActors));
}

#[test]
fn test_duplicate_ids_rejected() {
    let err = SequenceDiagram::new(
        vec![Actor::new("a", "A"), Actor::new("a", "Again")],
        vec![],
    )
    .unwrap_err();
    assert!(matches!(
        diagram_error(err),
        DiagramError::DuplicateActor { id } if id == "a"
    ));

    let mut db = SequenceDatabase::new();
    db.add_actor(Actor::new("a", "A")).unwrap();
    db.add_message(Message::new("m1", "a", "a", "x")).unwrap();
    let err = db.add_message(Message::new("m1", "a", "a", "y")).unwrap_err();
    assert!(matches!(
        diagram_error(err),
        DiagramError::DuplicateMessage { id } if id == "m1"
    ));
}

#[test]
fn test_bad_spacing_rejected() {
    for spacing in [-1.0, f64::NAN, f64::INFINITY] {
        let err = SequenceDiagram::with_config(
            vec![Actor::new("a", "A")],
            vec![],
            SequenceConfig::default().with_message_spacing(spacing),
        )
        .unwrap_err();
        assert!(matches!(
            diagram_error(err),
            DiagramError::InvalidConfig { .. }
        ));
    }
}

#[test]
fn test_zero_column_width_rejected() {
    let err = SequenceDiagram::with_config(
        vec![Actor::new("a", "A")],
        vec![],
        SequenceConfig::default().with_column_width(0.0),
    )
    .unwrap_err();
    assert!(matches!(
        diagram_error(err),
        DiagramError::InvalidConfig { .. }
    ));
}
