//! Full frames: tick, update and draw driven together

use approx::assert_relative_eq;

use crate::config::SceneConfig;
use crate::foundation::math::{Bounds, Vec2};
use crate::scene::testing::{fixture, fixture_with, Probe};
use crate::scene::{Node, NodeFlags, SortAxis, TransformStack};

#[cfg(test)]
mod tests {
    use super::*;

    fn clip() -> Bounds {
        Bounds::new(Vec2::zeros(), Vec2::new(800.0, 600.0))
    }

    #[test]
    fn test_draw_follows_sorted_order() {
        let (mut scene, handles) = fixture();
        let root = scene.root();
        let mut logs = Vec::new();
        for (name, z) in [("back", 1.0), ("front", 5.0), ("middle", 3.0)] {
            let (probe, log) = Probe::new(name);
            let id = scene.spawn(Node::object(probe).with_z(z).with_name(name));
            scene.add_child(root, id).unwrap();
            logs.push(log);
        }

        scene.tick();
        scene.update(0.016);
        scene.draw(&mut TransformStack::new(), &clip()).unwrap();

        let names: Vec<_> = scene
            .children(root)
            .unwrap()
            .iter()
            .filter_map(|&id| scene.node(id).and_then(Node::name))
            .collect();
        assert_eq!(names, vec!["front", "middle", "back"]);
        assert!(logs.iter().all(|log| log.borrow().draws.len() == 1));
        assert_eq!(scene.draw_count(root), Ok(3));
        assert_eq!(handles.repaint.count(), 1);
    }

    #[test]
    fn test_camera_pan_changes_what_is_drawn() {
        let (mut scene, handles) = fixture();
        let root = scene.root();
        let (left, left_log) = Probe::new("left");
        let (right, right_log) = Probe::new("right");
        let left = scene.spawn(Node::object(left).with_position(Vec2::new(100.0, 100.0)));
        let right = scene.spawn(Node::object(right).with_position(Vec2::new(1500.0, 100.0)));
        scene.add_child(root, left).unwrap();
        scene.add_child(root, right).unwrap();
        let mut surface = TransformStack::new();

        scene.update(0.016);
        scene.draw(&mut surface, &clip()).unwrap();
        handles.viewport.borrow_mut().move_to(Vec2::new(1000.0, 0.0));
        scene.update(0.016);
        scene.draw(&mut surface, &clip()).unwrap();

        assert_eq!(left_log.borrow().draws.len(), 1);
        assert_eq!(right_log.borrow().draws.len(), 1);
        assert_eq!(scene.draw_count(root), Ok(1));
        assert_relative_eq!(surface.translation(), Vec2::zeros());
    }

    #[test]
    fn test_hud_layer_over_world() {
        let (mut scene, handles) = fixture();
        let root = scene.root();
        let hud = scene.create_container(Vec2::new(10.0, 10.0), Some(Vec2::new(200.0, 50.0)));
        scene.node_mut(hud).unwrap().flags |= NodeFlags::FLOATING | NodeFlags::UPDATE_WHEN_PAUSED;
        scene.node_mut(hud).unwrap().z = 100.0;
        scene.add_child(root, hud).unwrap();

        let (score, score_log) = Probe::new("score");
        let score = scene.spawn(
            Node::object(score.dirty())
                .with_position(Vec2::new(4.0, 4.0))
                .with_flag(NodeFlags::UPDATE_WHEN_PAUSED),
        );
        scene.add_child(hud, score).unwrap();

        let (ship, ship_log) = Probe::new("ship");
        let ship = scene.spawn(Node::object(ship).with_position(Vec2::new(1200.0, 300.0)));
        scene.add_child(root, ship).unwrap();

        handles.viewport.borrow_mut().move_to(Vec2::new(1000.0, 0.0));
        scene.tick();
        assert!(scene.update(0.016));
        scene.draw(&mut TransformStack::new(), &clip()).unwrap();

        assert_eq!(scene.children(root).unwrap()[0], hud);
        // Screen origin (1000, 0), hud floats at (10, 10) on top of it
        assert_relative_eq!(score_log.borrow().draws[0], Vec2::new(1010.0, 10.0));
        assert_relative_eq!(ship_log.borrow().draws[0], Vec2::zeros());

        // Paused: only the hud keeps updating
        handles.paused.set(true);
        scene.update(0.016);
        assert_eq!(score_log.borrow().updates, 2);
        assert_eq!(ship_log.borrow().updates, 1);
    }

    #[test]
    fn test_manual_sorting_container() {
        let config = SceneConfig { sort_axis: SortAxis::Y, auto_sort: false, ..SceneConfig::default() };
        let (mut scene, handles) = fixture_with(config);
        let root = scene.root();
        let ids: Vec<_> = [10.0, 300.0, 150.0]
            .into_iter()
            .map(|y| scene.spawn(Node::empty().with_position(Vec2::new(0.0, y))))
            .collect();
        for &id in &ids {
            scene.add_child(root, id).unwrap();
        }
        scene.tick();
        let after_add = handles.repaint.count();

        // Equal depth: the Y axis breaks ties by descending y
        assert_eq!(scene.children(root).unwrap(), &[ids[1], ids[2], ids[0]]);

        scene.node_mut(ids[0]).unwrap().position.y = 500.0;
        scene.sort(root, false).unwrap();
        scene.tick();
        assert_eq!(scene.children(root).unwrap(), &[ids[0], ids[1], ids[2]]);
        assert_eq!(handles.repaint.count(), after_add + 1);
    }
}
