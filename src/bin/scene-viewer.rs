use macroquad::prelude::*;
use std::env;

use log::{error, info, warn};
use vector_scene::{
    common_traits::*,
    shapes::Primitive,
    Scene, SceneError, ShapeRef,
};

type Color = macroquad::color::Color;

const STEP: f64 = 10.0;

trait Draw {
    fn draw(&self, clr: Color);
}

impl Draw for Primitive {
    fn draw(&self, clr: Color) {
        match self {
            Primitive::Rectangle(r) => draw_rectangle_lines(
                r.origin.x() as f32, r.origin.y() as f32,
                r.w as f32, r.h as f32,
                2.0, clr),
            Primitive::Square(s) => draw_rectangle_lines(
                s.origin.x() as f32, s.origin.y() as f32,
                s.side as f32, s.side as f32,
                2.0, clr),
            Primitive::Line(l) => draw_line(
                l.a.x() as f32, l.a.y() as f32,
                l.b.x() as f32, l.b.y() as f32,
                2.0, clr),
            Primitive::Circle(c) => draw_circle_lines(
                c.center.x() as f32, c.center.y() as f32,
                c.radius as f32,
                2.0, clr),
        }
    }
}

impl Draw for ShapeRef<'_> {
    fn draw(&self, clr: Color) {
        for leaf in self.leaves() {
            leaf.draw(clr);
        }
    }
}

fn seed(scene: &mut Scene) -> Result<(), SceneError> {
    scene.create_rectangle("frame", 60.0, 60.0, 300.0, 200.0)?;
    scene.create_circle("sun", 420.0, 120.0, 50.0)?;
    scene.create_line("ray", 380.0, 200.0, 300.0, 320.0)?;
    scene.create_square("box", 120.0, 300.0, 80.0)?;
    scene.create_circle("wheel", 160.0, 340.0, 30.0)?;
    scene.group("cart", &["box", "wheel"])?;
    Ok(())
}

fn report(result: Result<(), SceneError>) {
    if let Err(e) = result {
        warn!("{e}");
    }
}

#[macroquad::main("scene-viewer")]
async fn main() {
    let args: Vec<String> = env::args().collect();
    let verbosity = args
        .get(1)
        .and_then(|v| v.parse::<log::LevelFilter>().ok())
        .unwrap_or(log::LevelFilter::Info);

    if let Err(e) = stderrlog::new()
        .module(module_path!())
        .module("vector_scene")
        .verbosity(verbosity)
        .init()
    {
        eprintln!("couldn't set up logging: {e}");
    }

    let mut scene = Scene::new();
    if let Err(e) = seed(&mut scene) {
        error!("couldn't build the demo scene: {e}");
    }

    let mut selected: Option<String> = None;
    let mut groups_made = 0usize;

    loop {
        if is_quit_requested() { break }
        clear_background(BLACK);

        if is_mouse_button_pressed(MouseButton::Left) {
            let (mx, my) = mouse_position();
            selected = scene.shape_at(mx as f64, my as f64).map(str::to_owned);
            info!("clicked {mx},{my}: {:?}", selected);
        }

        if let Some(name) = selected.clone() {
            let offset = [
                (KeyCode::Left, (-STEP, 0.0)),
                (KeyCode::Right, (STEP, 0.0)),
                (KeyCode::Up, (0.0, -STEP)),
                (KeyCode::Down, (0.0, STEP)),
            ]
            .into_iter()
            .find(|(key, _)| is_key_pressed(*key))
            .map(|(_, d)| d);
            if let Some((dx, dy)) = offset {
                report(scene.move_shape(&name, dx, dy));
            }
            if is_key_pressed(KeyCode::Delete) || is_key_pressed(KeyCode::Backspace) {
                report(scene.delete(&name));
                selected = None;
            } else if is_key_pressed(KeyCode::U) {
                report(scene.ungroup(&name));
                selected = None;
            }
        }

        if is_key_pressed(KeyCode::G) {
            let top: Vec<String> = scene.all().map(|s| s.name().to_owned()).collect();
            groups_made += 1;
            let name = format!("group{groups_made}");
            match scene.group(&name, &top[..]) {
                Ok(group) => info!("made {group}"),
                Err(e) => warn!("{e}"),
            }
        }

        if is_key_released(KeyCode::L) {
            info!("scene:\n{}", scene.list_all());
        }

        for shape in scene.all() {
            let is_selected = selected.as_deref() == Some(shape.name());
            shape.draw(if is_selected { YELLOW } else { WHITE });
            if is_selected {
                let bb = shape.compute_aabb();
                draw_rectangle_lines(
                    bb.x() as f32, bb.y() as f32,
                    bb.w() as f32, bb.h() as f32,
                    1.0, GRAY);
                draw_text(&format!("{} [{bb}]", shape.name()), bb.x() as f32, bb.y() as f32 - 4.0, 20.0, GRAY);
            }
        }

        draw_text("click: select  arrows: move  del: delete  g: group  u: ungroup  l: list", 20.0, 20.0, 20.0, DARKGRAY);
        next_frame().await
    }
}
