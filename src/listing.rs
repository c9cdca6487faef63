//! Hierarchical text dump of a whole scene.

use fnv::FnvHashSet;

use crate::scene::{Scene, ShapeId, ShapeRef};

const INDENT: &str = "  ";

impl Scene {
    /// One line per live shape: top-level shapes topmost first, each
    /// followed by its members (also topmost first) one indent deeper.
    ///
    /// Lines are joined with `\n`; an empty scene lists as `""`.
    pub fn list_all(&self) -> String {
        let mut lines = Vec::with_capacity(self.len());
        let mut visited = FnvHashSet::default();
        for shape in by_descending_z(self.all()) {
            append(shape, 0, &mut lines, &mut visited);
        }
        lines.join("\n")
    }
}

fn by_descending_z<'a>(shapes: impl Iterator<Item = ShapeRef<'a>>) -> Vec<ShapeRef<'a>> {
    let mut shapes: Vec<_> = shapes.collect();
    shapes.sort_by(|a, b| b.z().cmp(&a.z()));
    shapes
}

fn append(shape: ShapeRef<'_>, depth: usize, lines: &mut Vec<String>, visited: &mut FnvHashSet<ShapeId>) {
    if !visited.insert(shape.id()) {
        return;
    }
    lines.push(format!("{}{}", INDENT.repeat(depth), shape.describe()));
    for member in by_descending_z(shape.members()) {
        append(member, depth + 1, lines, visited);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_scene_lists_nothing() {
        assert_eq!(Scene::new().list_all(), "");
    }

    #[test]
    fn topmost_first() {
        let mut scene = Scene::new();
        scene.create_rectangle("r1", 0.0, 0.0, 2.0, 2.0).unwrap();
        scene.create_circle("c1", 1.0, 1.0, 0.5).unwrap();
        assert_eq!(
            scene.list_all(),
            "c1 circle 1.00 1.00 0.50\nr1 rectangle 0.00 0.00 2.00 2.00"
        );
    }

    #[test]
    fn nested_groups_are_indented() {
        let mut scene = Scene::new();
        scene.create_rectangle("r1", 0.0, 0.0, 2.0, 2.0).unwrap();
        scene.create_circle("c1", 1.0, 1.0, 1.0).unwrap();
        scene.create_line("l1", 0.0, 0.0, 3.0, 4.0).unwrap();
        scene.create_square("s1", 5.0, 5.0, 1.0).unwrap();
        scene.group("g1", &["r1", "c1"]).unwrap();
        scene.group("g2", &["g1", "l1"]).unwrap();
        let expected = [
            "g2 group g1 l1",
            "  g1 group r1 c1",
            "    c1 circle 1.00 1.00 1.00",
            "    r1 rectangle 0.00 0.00 2.00 2.00",
            "  l1 line 0.00 0.00 3.00 4.00",
            "s1 square 5.00 5.00 1.00",
        ]
        .join("\n");
        assert_eq!(scene.list_all(), expected);
    }
}
