use playfield::config::Config;
use playfield::engine::Engine;
use playfield::geometry::Bounds;
use playfield::scene::Role;
use std::path::PathBuf;

fn config_toml(seed: u64) -> String {
    String::new()
        + "[field]\n"
        + "size = 400.0\n"
        + "cell = 10.0\n"
        + "\n"
        + "[nodes]\n"
        + "count = 10\n"
        + "height = 1.5\n"
        + "speed = 5.0\n"
        + &format!("seed = {seed}\n")
        + "\n"
        + "[layout]\n"
        + "anchors = [ [ 300.0, 300.0, 15.0,],]\n"
        + "obstacles = [ [ 0.0, 60.0, 96.0, 104.0, 0.0, 10.0,],]\n"
        + "\n"
        + "[output]\n"
        + "window = 5.0\n"
        + "tick = 0.5\n"
        + "\n"
        + "[[moves]]\n"
        + "time = 2.0\n"
        + "obstacle = 0\n"
        + "x = 150.0\n"
        + "y = 180.0\n"
        + "width = 60.0\n"
        + "height = 8.0\n"
}

#[test]
fn parses_and_validates_config() {
    let cfg = Config::from_toml(&config_toml(7)).unwrap();

    assert_eq!(cfg.nodes.count, 10);
    assert_eq!(cfg.moves.len(), 1);
    assert_eq!(cfg.moves[0].obstacle, 0);
}

#[test]
fn moves_default_to_empty() {
    let text = config_toml(7);
    let text = text.split("[[moves]]").next().unwrap();

    let cfg = Config::from_toml(text).unwrap();
    assert!(cfg.moves.is_empty());
}

#[test]
fn rejects_empty_anchor_list() {
    let text = config_toml(7).replace(
        "anchors = [ [ 300.0, 300.0, 15.0,],]",
        "anchors = []",
    );
    assert!(Config::from_toml(&text).is_err());
}

#[test]
fn rejects_move_with_unknown_obstacle() {
    let text = config_toml(7).replace("obstacle = 0", "obstacle = 5");
    assert!(Config::from_toml(&text).is_err());
}

#[test]
fn rejects_inverted_obstacle_box() {
    let text = config_toml(7).replace(
        "obstacles = [ [ 0.0, 60.0, 96.0, 104.0, 0.0, 10.0,],]",
        "obstacles = [ [ 60.0, 0.0, 96.0, 104.0, 0.0, 10.0,],]",
    );
    assert!(Config::from_toml(&text).is_err());
}

#[test]
fn rejects_cell_larger_than_field() {
    let text = config_toml(7).replace("cell = 10.0", "cell = 500.0");
    assert!(Config::from_toml(&text).is_err());
}

#[test]
fn initial_layout_pins_endpoints_to_corners() {
    let cfg = Config::from_toml(&config_toml(7)).unwrap();
    let engine = Engine::generate_initial_layout(cfg).unwrap();
    let nodes = &engine.scene().nodes;

    assert_eq!(nodes.len(), 10);

    assert_eq!(nodes[0].role, Role::Source);
    assert_eq!(nodes[0].pos.x, 0.0);
    assert_eq!(nodes[0].pos.y, 0.0);

    assert_eq!(nodes[9].role, Role::Destination);
    assert_eq!(nodes[9].pos.x, 400.0);
    assert_eq!(nodes[9].pos.y, 400.0);

    for node in &nodes[1..9] {
        assert_eq!(node.role, Role::Plain);
        assert_eq!(node.pos.x, node.pos.y);
        assert!(node.pos.x > 0.0 && node.pos.x < 400.0);
    }
}

#[test]
fn due_relocations_fire_during_advance() {
    let cfg = Config::from_toml(&config_toml(7)).unwrap();
    let mut engine = Engine::generate_initial_layout(cfg).unwrap();

    engine.advance_window().unwrap();

    // The anchor at (300, 300) is clear of the target, so the box lands
    // exactly on the desired origin with the fixed vertical extent.
    let expected = Bounds::new(150.0, 210.0, 180.0, 188.0, 0.0, 10.0).unwrap();
    assert_eq!(engine.scene().obstacles.bounds()[0], expected);
}

#[test]
fn relocations_do_not_fire_before_their_time() {
    let text = config_toml(7).replace("time = 2.0", "time = 7.0");
    let cfg = Config::from_toml(&text).unwrap();
    let mut engine = Engine::generate_initial_layout(cfg).unwrap();

    let initial = Bounds::new(0.0, 60.0, 96.0, 104.0, 0.0, 10.0).unwrap();

    engine.advance_window().unwrap();
    assert_eq!(engine.scene().obstacles.bounds()[0], initial);

    engine.advance_window().unwrap();
    assert_ne!(engine.scene().obstacles.bounds()[0], initial);
}

#[test]
fn endpoints_do_not_move() {
    let cfg = Config::from_toml(&config_toml(7)).unwrap();
    let mut engine = Engine::generate_initial_layout(cfg).unwrap();

    engine.advance_window().unwrap();

    let nodes = &engine.scene().nodes;
    assert_eq!((nodes[0].pos.x, nodes[0].pos.y), (0.0, 0.0));
    assert_eq!((nodes[9].pos.x, nodes[9].pos.y), (400.0, 400.0));
}

#[test]
fn mobile_nodes_stay_inside_the_field() {
    let cfg = Config::from_toml(&config_toml(7)).unwrap();
    let mut engine = Engine::generate_initial_layout(cfg).unwrap();

    for _ in 0..10 {
        engine.advance_window().unwrap();
    }

    for node in &engine.scene().nodes {
        assert!(node.pos.x >= 0.0 && node.pos.x <= 400.0);
        assert!(node.pos.y >= 0.0 && node.pos.y <= 400.0);
    }
}

#[test]
fn seeded_runs_are_reproducible() {
    let mut first = Engine::generate_initial_layout(Config::from_toml(&config_toml(7)).unwrap())
        .unwrap();
    let mut second = Engine::generate_initial_layout(Config::from_toml(&config_toml(7)).unwrap())
        .unwrap();

    first.advance_window().unwrap();
    second.advance_window().unwrap();

    assert_eq!(first.render_map(), second.render_map());
}

#[test]
fn checkpoint_roundtrip_preserves_the_walk() {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR"));
    let checkpoint = test_dir.join("checkpoint_roundtrip.msgpack");

    let mut engine = Engine::generate_initial_layout(Config::from_toml(&config_toml(7)).unwrap())
        .unwrap();
    engine.advance_window().unwrap();

    engine.save_checkpoint(&checkpoint).unwrap();
    let mut restored = Engine::load_checkpoint(&checkpoint).unwrap();

    assert_eq!(restored.cfg(), engine.cfg());
    assert_eq!(restored.render_map(), engine.render_map());

    // The RNG state travels with the checkpoint, so both walks continue
    // identically.
    engine.advance_window().unwrap();
    restored.advance_window().unwrap();
    assert_eq!(restored.render_map(), engine.render_map());

    std::fs::remove_file(&checkpoint).ok();
}

#[test]
fn attachments_point_at_the_single_anchor() {
    let cfg = Config::from_toml(&config_toml(7)).unwrap();
    let engine = Engine::generate_initial_layout(cfg).unwrap();

    let assignment = engine.compute_attachments().unwrap();
    assert_eq!(assignment, vec![0; 10]);
}
