//! Layout properties and reference scenarios for sequence diagrams

use lifeline::primitives::ArrowDirection;
use lifeline::primitives::sequence::{
    Actor, Message, MessageGeometry, MessageVariant, SequenceConfig, SequenceDatabase,
    SequenceDiagram, SequenceLayoutAlgorithm,
};
use proptest::prelude::*;

fn actors(count: usize) -> Vec<Actor> {
    (0..count)
        .map(|i| Actor::new(format!("a{i}"), format!("Actor {i}")))
        .collect()
}

fn messages(pairs: &[(usize, usize, usize)], actor_count: usize) -> Vec<Message> {
    pairs
        .iter()
        .enumerate()
        .map(|(i, &(from, to, variant))| {
            Message::new(
                format!("m{i}"),
                format!("a{}", from % actor_count),
                format!("a{}", to % actor_count),
                format!("msg {i}"),
            )
            .with_variant(MessageVariant::ALL[variant % MessageVariant::ALL.len()])
        })
        .collect()
}

fn diagram_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize, usize)>, f64)> {
    (
        1usize..6,
        prop::collection::vec((0usize..6, 0usize..6, 0usize..3), 0..12),
        0.0f64..200.0,
    )
}

proptest! {
    #[test]
    fn arrows_span_their_actor_columns((count, pairs, spacing) in diagram_strategy()) {
        let config = SequenceConfig::default().with_message_spacing(spacing);
        let db = SequenceDatabase::from_parts(actors(count), messages(&pairs, count)).unwrap();
        let layout = SequenceLayoutAlgorithm::with_config(config).layout(&db).unwrap();

        let column_x = |id: &str| {
            let index = db.actors().iter().position(|a| a.id == id).unwrap();
            index as f64 * config.column_width + config.column_width / 2.0
        };

        for (actor, positioned) in db.actors().iter().zip(&layout.actors) {
            prop_assert_eq!(&actor.id, &positioned.id);
            prop_assert_eq!(positioned.x, column_x(&actor.id));
        }

        for (message, positioned) in db.messages().iter().zip(&layout.messages) {
            match positioned.geometry {
                MessageGeometry::Arrow { from_x, to_x, direction } => {
                    prop_assert_eq!(from_x, column_x(&message.from));
                    prop_assert_eq!(to_x, column_x(&message.to));
                    prop_assert!(from_x != to_x);
                    let expected = if from_x < to_x {
                        ArrowDirection::Right
                    } else {
                        ArrowDirection::Left
                    };
                    prop_assert_eq!(direction, expected);
                }
                MessageGeometry::SelfLoop { x, width, height } => {
                    prop_assert_eq!(&message.from, &message.to);
                    prop_assert_eq!(x, column_x(&message.from));
                    prop_assert!(width > 0.0);
                    prop_assert!(height != 0.0);
                    let end = positioned.line_y + height;
                    prop_assert!(end >= 0.0 && end <= layout.height);
                }
            }
        }
    }

    #[test]
    fn hit_regions_stay_inside_the_diagram((count, pairs, spacing) in diagram_strategy()) {
        let config = SequenceConfig::default().with_message_spacing(spacing);
        let db = SequenceDatabase::from_parts(actors(count), messages(&pairs, count)).unwrap();
        let layout = SequenceLayoutAlgorithm::with_config(config).layout(&db).unwrap();

        for positioned in &layout.messages {
            let hit = positioned.hit_rect;
            prop_assert!(hit.x >= 0.0 && hit.y >= 0.0);
            prop_assert!(hit.right() <= layout.width + 1e-9);
            prop_assert!(hit.bottom() <= layout.height + 1e-9);
            prop_assert!(hit.width > 0.0 && hit.height > 0.0);
        }
    }

    #[test]
    fn rows_are_linear_in_index((count, pairs, spacing) in diagram_strategy()) {
        let config = SequenceConfig::default().with_message_spacing(spacing);
        let db = SequenceDatabase::from_parts(actors(count), messages(&pairs, count)).unwrap();
        let layout = SequenceLayoutAlgorithm::with_config(config).layout(&db).unwrap();

        prop_assert_eq!(layout.messages.len(), pairs.len());
        for (i, message) in layout.messages.iter().enumerate() {
            prop_assert_eq!(message.index, i);
            prop_assert_eq!(&message.id, &format!("m{i}"));
            prop_assert_eq!(message.y, i as f64 * spacing);
            prop_assert_eq!(message.line_y, config.header_height + message.y);
        }
        if spacing > 0.0 {
            for pair in layout.messages.windows(2) {
                prop_assert!(pair[1].y > pair[0].y);
            }
        }
    }

    #[test]
    fn self_messages_never_become_arrows((count, pairs, spacing) in diagram_strategy()) {
        let config = SequenceConfig::default().with_message_spacing(spacing);
        let db = SequenceDatabase::from_parts(actors(count), messages(&pairs, count)).unwrap();
        let layout = SequenceLayoutAlgorithm::with_config(config).layout(&db).unwrap();

        for (message, positioned) in db.messages().iter().zip(&layout.messages) {
            prop_assert_eq!(message.is_self_message(), positioned.geometry.is_self_loop());
            prop_assert!(positioned.geometry.span() > 0.0);
        }
    }

    #[test]
    fn dimensions_follow_counts((count, pairs, spacing) in diagram_strategy()) {
        let config = SequenceConfig::default().with_message_spacing(spacing);
        let db = SequenceDatabase::from_parts(actors(count), messages(&pairs, count)).unwrap();
        let layout = SequenceLayoutAlgorithm::with_config(config).layout(&db).unwrap();

        prop_assert_eq!(
            layout.height,
            pairs.len() as f64 * spacing + config.header_height
        );
        prop_assert_eq!(layout.width, count as f64 * config.column_width);
    }

    #[test]
    fn layout_is_idempotent((count, pairs, spacing) in diagram_strategy()) {
        let config = SequenceConfig::default().with_message_spacing(spacing);
        let db = SequenceDatabase::from_parts(actors(count), messages(&pairs, count)).unwrap();
        let algorithm = SequenceLayoutAlgorithm::with_config(config);
        prop_assert_eq!(algorithm.layout(&db).unwrap(), algorithm.layout(&db).unwrap());
    }

    #[test]
    fn unknown_targets_fail_validation(count in 1usize..5, target in 5usize..20) {
        let result = SequenceDiagram::new(
            actors(count),
            vec![Message::new("m0", "a0", format!("a{target}"), "lost")],
        );
        prop_assert!(result.is_err());
    }
}

#[test]
fn scenario_request_and_return() {
    let diagram = SequenceDiagram::with_config(
        vec![Actor::new("A", "A"), Actor::new("B", "B")],
        vec![
            Message::new("req", "A", "B", "req"),
            Message::new("resp", "B", "A", "resp").with_variant(MessageVariant::Return),
        ],
        SequenceConfig::default().with_message_spacing(50.0),
    )
    .unwrap();

    let layout = diagram.layout().unwrap();
    let req = layout.message("req").unwrap();
    let resp = layout.message("resp").unwrap();
    assert_eq!(req.y, 0.0);
    assert_eq!(resp.y, 50.0);
    assert_eq!(
        req.geometry,
        MessageGeometry::Arrow {
            from_x: 80.0,
            to_x: 240.0,
            direction: ArrowDirection::Right
        }
    );
    assert_eq!(
        resp.geometry,
        MessageGeometry::Arrow {
            from_x: 240.0,
            to_x: 80.0,
            direction: ArrowDirection::Left
        }
    );

    let svg = diagram.render().unwrap();
    let arrows: Vec<_> = svg.find_by_class("message-arrow").collect();
    assert_eq!(arrows.len(), 2);
    assert_eq!(arrows[0].get_attr("stroke-dasharray"), None);
    assert_eq!(arrows[1].get_attr("stroke-dasharray"), Some("6 4"));
    assert_eq!(arrows[0].num_attr("y1"), Some(60.0));
    assert_eq!(arrows[1].num_attr("y1"), Some(110.0));
    assert!(arrows[0]
        .get_attr("marker-end")
        .unwrap()
        .contains("lifeline-head-sync"));
    assert!(arrows[1]
        .get_attr("marker-end")
        .unwrap()
        .contains("lifeline-head-return"));
}

#[test]
fn scenario_single_actor_self_message() {
    let diagram = SequenceDiagram::new(
        vec![Actor::new("A", "A")],
        vec![Message::new("tick", "A", "A", "tick")],
    )
    .unwrap();

    let svg = diagram.render().unwrap();
    assert_eq!(svg.find_by_class("self-loop").count(), 1);
    assert_eq!(svg.find_by_class("message-arrow").count(), 0);
    assert!(svg.to_markup().contains(">tick</text>"));
}

#[test]
fn scenario_no_messages() {
    let diagram = SequenceDiagram::new(
        vec![Actor::new("A", "A"), Actor::new("B", "B"), Actor::new("C", "C")],
        vec![],
    )
    .unwrap();

    let layout = diagram.layout().unwrap();
    assert_eq!(layout.height, SequenceConfig::default().header_height);
    assert!(layout.height > 0.0);

    let svg = diagram.render().unwrap();
    assert_eq!(svg.find_by_class("lifeline").count(), 3);
    assert_eq!(svg.find_by_class("message").count(), 0);
}
