//! Property-based tests for the rasterizer, sliders and engines.

use std::time::Duration;

use kinematics::Point;
use physics_lab::prelude::*;
use physics_lab::{Color, Paint, ParamSpec, TextAlign};
use proptest::prelude::*;

fn any_coord() -> impl Strategy<Value = f64> {
    prop_oneof![
        8 => -2000.0..3000.0f64,
        1 => any::<f64>(),
        1 => Just(f64::NAN),
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
    ]
}

fn any_point() -> impl Strategy<Value = Point> {
    (any_coord(), any_coord()).prop_map(|(x, y)| Point::new(x, y))
}

const VELOCITY: ParamSpec = ParamSpec {
    name: "velocity",
    label: "Initial Velocity",
    unit: "m/s",
    min: 10.0,
    max: 100.0,
    step: 1.0,
    default: 50.0,
};

proptest! {
    #[test]
    fn raster_never_escapes_the_grid(
        a in any_point(),
        b in any_point(),
        c in any_point(),
        radius in any_coord(),
        w in any_coord(),
        h in any_coord(),
    ) {
        let mut canvas = TerminalCanvas::with_size(800.0, 200.0);
        canvas.stroke_path(&[a, b, c], Color::GREEN, 3.0);
        canvas.fill_path(&[a, b, c], Color::PURPLE);
        canvas.fill_circle(a, radius, Paint::glowing(Color::RED, Color::WHITE));
        canvas.fill_rect(b.x, b.y, w, h, Paint::glowing(Color::RED, Color::RED));
        canvas.fill_text("2 kg", c, TextAlign::Center, Color::WHITE);
        canvas.clear_rect(c.x, c.y, w, h);

        let text = canvas.render(false);
        prop_assert_eq!(text.lines().count(), canvas.rows());
        for line in text.lines() {
            prop_assert_eq!(line.chars().count(), canvas.cols());
        }
        prop_assert!(canvas.ink() <= canvas.cols() * canvas.rows());
    }

    #[test]
    fn slider_values_stay_in_range(value in any::<f64>(), steps in -500i32..500) {
        let clamped = VELOCITY.clamp(value);
        prop_assert!((VELOCITY.min..=VELOCITY.max).contains(&clamped));

        let nudged = VELOCITY.nudge(clamped, steps);
        prop_assert!((VELOCITY.min..=VELOCITY.max).contains(&nudged));
        prop_assert_eq!(nudged, nudged.round());
    }

    #[test]
    fn metrics_stay_finite_for_any_slider_input(
        demo_index in 0usize..4,
        values in proptest::collection::vec(any::<f64>(), 4),
        frames in 1u32..60,
    ) {
        let demo = Demo::all()[demo_index];
        let mut tabs = TabController::<RecordingSurface>::new(demo);
        let names: Vec<_> = tabs.current().params().specs().iter().map(|s| s.name).collect();
        for (name, value) in names.into_iter().zip(values) {
            tabs.set_param(&ParamChange::new(demo, name, value)).unwrap();
        }
        tabs.start(demo, Duration::ZERO);
        for n in 1..=frames {
            tabs.pump(Duration::from_millis(16) * n);
        }
        for metric in tabs.current().metrics() {
            prop_assert!(metric.value.is_finite(), "{} on {}", metric, demo);
        }
    }

    #[test]
    fn tab_switch_always_leaves_one_or_zero_runs(
        path in proptest::collection::vec(0usize..4, 1..12),
    ) {
        let mut tabs = TabController::<RecordingSurface>::new(Demo::Projectile);
        let mut now = Duration::ZERO;
        for index in path {
            let demo = Demo::all()[index];
            tabs.switch_to(demo);
            tabs.start(demo, now);
            now += Duration::from_millis(16);
            tabs.pump(now);

            let running = Demo::all()
                .into_iter()
                .filter(|d| tabs.simulation(*d).run_state() == RunState::Running)
                .count();
            prop_assert!(running <= 1);
            prop_assert!(tabs.queue().pending_count() <= 1);
        }
    }
}
