mod common;

use approx::assert_relative_eq;
use orrery::{
    animation::tween::{Axis, Channel, TweenTarget},
    cgmath::Vector3,
    config::{Appearance, BodyDescriptor, Preset, SceneConfig},
    data_structures::{
        material::TextureSlot,
        model::Content,
        scene_graph::{Node, NodeId},
    },
    layout::{self, SYSTEM_PIVOT},
    resources::AssetRequest,
};

fn body(name: &str, parent: Option<&str>, orbit: Option<[f32; 3]>) -> BodyDescriptor {
    BodyDescriptor {
        name: name.to_string(),
        parent: parent.map(str::to_string),
        orbit,
        scale: 1.0,
        rotation: [0.0; 3],
        appearance: Appearance::Pivot,
        spin_orbit: true,
        spin_body: true,
    }
}

fn config_with(bodies: Vec<BodyDescriptor>) -> SceneConfig {
    SceneConfig {
        name: "test".to_string(),
        bodies,
        ..SceneConfig::default()
    }
}

#[test]
fn presets_parse() {
    let classic = SceneConfig::preset(Preset::Classic).unwrap();
    assert_eq!(classic.rotation_rate, 0.001);
    assert_eq!(classic.bodies.len(), 8);
    assert!(classic.tweens.is_empty());

    let shuttle = SceneConfig::preset(Preset::Shuttle).unwrap();
    assert_eq!(shuttle.rotation_rate, 0.0001);
    assert_eq!(shuttle.tweens.len(), 3);

    assert_eq!("Shuttle".parse::<Preset>().unwrap(), Preset::Shuttle);
    assert!("pluto".parse::<Preset>().is_err());
}

#[test]
fn config_survives_a_ron_round_trip() {
    let classic = SceneConfig::preset(Preset::Classic).unwrap();
    let text = classic.to_ron().unwrap();
    assert_eq!(SceneConfig::from_ron(&text).unwrap(), classic);
}

#[test]
fn partial_config_fills_in_defaults() {
    let config = SceneConfig::from_ron(r#"(name: "tiny", bodies: [(name: "rock", orbit: Some((1.0, 2.0, 3.0)))])"#).unwrap();
    assert_eq!(config.rotation_rate, 0.001);
    assert_eq!(config.bodies[0].scale, 1.0);
    assert!(config.bodies[0].spin_orbit);
    assert_eq!(config.bodies[0].appearance, Appearance::Pivot);
}

#[test]
fn classic_layout_matches_the_body_table() {
    let config = SceneConfig::preset(Preset::Classic).unwrap();
    let build = layout::build(&config).unwrap();
    let graph = &build.context.graph;

    assert_eq!(graph.get(build.system).unwrap().name(), SYSTEM_PIVOT);
    assert!(graph.is_animated(build.system));

    let mercury = build.body("mercury").unwrap();
    let pivot = graph.get(mercury.pivot.unwrap()).unwrap();
    assert_eq!(pivot.name(), "mercury_orbit");
    assert_eq!(pivot.transform.position, Vector3::new(6.5, 0.0, 3.0));
    assert_eq!(pivot.children()[0].id(), mercury.body);
    assert_relative_eq!(graph.get(mercury.body).unwrap().transform.scale.x, 0.5);

    // the sun sits directly on the system pivot
    let sun = build.body("sun").unwrap();
    assert_eq!(sun.pivot, None);
    assert!(graph.is_animated(sun.body));
}

#[test]
fn moons_are_carried_by_their_planet_without_orbiting() {
    let config = SceneConfig::preset(Preset::Classic).unwrap();
    let build = layout::build(&config).unwrap();
    let graph = &build.context.graph;

    for (moon, planet) in [("moon", "earth"), ("phobos", "mars"), ("deimos", "mars")] {
        let moon = build.body(moon).unwrap();
        let planet = build.body(planet).unwrap();
        let moon_pivot = moon.pivot.unwrap();
        assert!(!graph.is_animated(moon_pivot));
        assert!(graph.is_animated(moon.body));
        let planet_pivot = graph.get(planet.pivot.unwrap()).unwrap();
        assert!(planet_pivot.children().iter().any(|n| n.id() == moon_pivot));
    }
}

#[test]
fn every_node_is_registered_at_most_once() {
    let config = SceneConfig::preset(Preset::Classic).unwrap();
    let build = layout::build(&config).unwrap();
    let animated = build.context.graph.animated();

    let mut unique = animated.to_vec();
    unique.sort();
    unique.dedup();
    assert_eq!(unique.len(), animated.len());
    // system, 8 bodies and the 4 planet pivots
    assert_eq!(animated.len(), 13);
}

#[test]
fn traversal_visits_every_node_and_every_spinner_once() {
    for preset in [Preset::Classic, Preset::Shuttle] {
        let config = SceneConfig::preset(preset).unwrap();
        let build = layout::build(&config).unwrap();
        let graph = &build.context.graph;

        let visited: Vec<NodeId> = graph.iter().map(Node::id).collect();
        let mut unique = visited.clone();
        unique.sort();
        unique.dedup();
        // a node reachable through two parents would show up twice
        assert_eq!(unique.len(), visited.len(), "{:?}", preset);
        assert_eq!(visited.len(), graph.len());

        for id in graph.animated() {
            let seen = visited.iter().filter(|v| *v == id).count();
            assert_eq!(seen, 1, "{:?}: animated node {} seen {} times", preset, id, seen);
        }
    }
}

#[test]
fn classic_layout_requests_models_textures_and_background() {
    let config = SceneConfig::preset(Preset::Classic).unwrap();
    let build = layout::build(&config).unwrap();

    let models: Vec<&str> = build
        .requests
        .iter()
        .filter(|r| matches!(r, AssetRequest::Model { .. }))
        .map(AssetRequest::path)
        .collect();
    assert_eq!(models.len(), 4);
    assert!(models.contains(&"models/Skull/scene.gltf"));

    let textures = build
        .requests
        .iter()
        .filter(|r| matches!(r, AssetRequest::Texture { .. }))
        .count();
    assert_eq!(textures, 4);
    assert!(matches!(build.requests[0], AssetRequest::Environment { .. }));

    let venus = build.body("venus").unwrap().body;
    assert!(build.requests.contains(&AssetRequest::Texture {
        node: venus,
        slot: TextureSlot::Normal,
        path: "textures/aerial_wood_snips_1k/textures/aerial_wood_snips_nor_dx_1k.jpg".to_string(),
    }));
}

#[test]
fn models_start_empty_and_meshes_start_filled() {
    let config = SceneConfig::preset(Preset::Classic).unwrap();
    let build = layout::build(&config).unwrap();
    let graph = &build.context.graph;

    let sun = build.body("sun").unwrap().body;
    assert!(graph.get(sun).unwrap().content().is_none());

    let earth = build.body("earth").unwrap().body;
    match graph.get(earth).unwrap().content() {
        Some(Content::Mesh(mesh)) => {
            assert_eq!(mesh.material.colour.to_hex(), 0x2233FF);
            assert_eq!(mesh.material.emissive.to_hex(), 0x112244);
        }
        _ => panic!("earth should be a sphere"),
    }
}

#[test]
fn shuttle_tweens_resolve_to_nodes() {
    let config = SceneConfig::preset(Preset::Shuttle).unwrap();
    let build = layout::build(&config).unwrap();
    let spaceship = build.body("spaceship").unwrap();
    let shuttle = build.body("shuttle").unwrap();

    let targets: Vec<TweenTarget> = build.animation.tracks().iter().map(|t| t.target).collect();
    assert_eq!(
        targets,
        vec![
            TweenTarget::Node(shuttle.body, Channel::Position(Axis::X)),
            TweenTarget::Node(spaceship.pivot.unwrap(), Channel::Position(Axis::Y)),
            TweenTarget::Camera(Axis::Y),
        ]
    );
    assert!(!build.context.graph.is_animated(shuttle.body));
    assert!(build.context.graph.is_animated(spaceship.pivot.unwrap()));
    assert_relative_eq!(build.animation.rate(), 0.0001);
}

#[test]
fn unknown_parent_is_rejected() {
    let config = config_with(vec![body("moon", Some("earth"), Some([2.0, 0.0, 0.0]))]);
    let err = layout::build(&config).unwrap_err();
    assert!(format!("{:#}", err).contains("earth"));
}

#[test]
fn parent_declared_later_is_rejected() {
    let config = config_with(vec![
        body("moon", Some("earth"), Some([2.0, 0.0, 0.0])),
        body("earth", None, Some([20.0, 0.0, 0.0])),
    ]);
    assert!(layout::build(&config).is_err());
}

#[test]
fn duplicate_bodies_are_rejected() {
    let config = config_with(vec![body("earth", None, None), body("earth", None, None)]);
    assert!(layout::build(&config).is_err());
}

#[test]
fn pivot_tween_needs_an_orbit() {
    let mut config = config_with(vec![body("rock", None, None)]);
    config.tweens = SceneConfig::from_ron(
        r#"(tweens: [(target: Pivot(body: "rock", channel: Pitch), to: 1.0, duration_secs: 1.0)])"#,
    )
    .unwrap()
    .tweens;
    assert!(layout::build(&config).is_err());
}

#[test]
fn system_spin_can_be_turned_off() {
    let config = SceneConfig {
        spin_system: false,
        ..config_with(vec![body("rock", None, Some([1.0, 0.0, 0.0]))])
    };
    let build = layout::build(&config).unwrap();
    assert!(!build.context.graph.is_animated(build.system));
    assert_eq!(build.context.graph.get(NodeId::ROOT).unwrap().children().len(), 1);
}

#[test]
fn out_of_range_tween_duration_is_an_error() {
    for duration in ["1e30", "-1.0"] {
        let mut config = config_with(vec![body("rock", None, Some([1.0, 0.0, 0.0]))]);
        config.tweens = SceneConfig::from_ron(&format!(
            r#"(tweens: [(target: Pivot(body: "rock", channel: Position(Y)), to: 1.0, duration_secs: {})])"#,
            duration
        ))
        .unwrap()
        .tweens;
        let err = layout::build(&config).unwrap_err();
        assert!(format!("{:#}", err).contains("duration"), "{}", duration);
    }
}
