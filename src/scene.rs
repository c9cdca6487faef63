//! The scene registry.
//!
//! Shapes live in an arena and are addressed internally by [`ShapeId`].
//! Names map to ids, top-level ids are kept in draw order (ascending z), and
//! group membership is stored on both ends: the group lists its member ids
//! and each member points back at its parent. A grouped shape is absent from
//! the draw order but keeps its name reserved.
//!
//! Every operation validates all of its inputs before touching any of the
//! collections, so a failed call leaves the scene unchanged.

use fnv::{FnvHashMap, FnvHashSet};
use log::{debug, trace};
use slab::Slab;
use std::fmt;

use crate::{
    bbox::BoundingBox,
    common_traits::*,
    config::SceneConfig,
    error::{Result, SceneError},
    point::Point,
    shapes::{Circle, Line, Primitive, Rectangle, Square},
};

/// Stable handle of a live shape inside one [`Scene`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId(usize);

/// Creation rank of a shape. Higher values are drawn on top.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct ZOrder(pub u64);

impl fmt::Display for ZOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone)]
enum Body {
    Primitive(Primitive),
    Group(Vec<ShapeId>),
}

#[derive(Debug, Clone)]
struct Node {
    name: String,
    z: ZOrder,
    parent: Option<ShapeId>,
    body: Body,
}

#[derive(Debug)]
pub struct Scene {
    config: SceneConfig,
    nodes: Slab<Node>,
    names: FnvHashMap<String, ShapeId>,
    draw_order: Vec<ShapeId>,
    next_z: u64,
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl Scene {
    pub fn new() -> Self {
        Self::with_config(SceneConfig::default())
    }

    pub fn with_config(config: SceneConfig) -> Self {
        Self {
            config,
            nodes: Slab::new(),
            names: FnvHashMap::default(),
            draw_order: Vec::new(),
            next_z: 1,
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn create_rectangle(&mut self, name: &str, x: f64, y: f64, w: f64, h: f64) -> Result<ShapeRef<'_>> {
        self.ensure_available(name)?;
        let shape = Rectangle::new(x, y, w, h)?;
        Ok(self.insert_primitive(name, shape.into()))
    }

    pub fn create_line(&mut self, name: &str, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<ShapeRef<'_>> {
        self.ensure_available(name)?;
        let shape = Line::new(x1, y1, x2, y2)?;
        Ok(self.insert_primitive(name, shape.into()))
    }

    pub fn create_circle(&mut self, name: &str, cx: f64, cy: f64, r: f64) -> Result<ShapeRef<'_>> {
        self.ensure_available(name)?;
        let shape = Circle::new(cx, cy, r)?;
        Ok(self.insert_primitive(name, shape.into()))
    }

    pub fn create_square(&mut self, name: &str, x: f64, y: f64, side: f64) -> Result<ShapeRef<'_>> {
        self.ensure_available(name)?;
        let shape = Square::new(x, y, side)?;
        Ok(self.insert_primitive(name, shape.into()))
    }

    /// Adds an already validated primitive under `name`.
    pub fn create(&mut self, name: &str, shape: impl Into<Primitive>) -> Result<ShapeRef<'_>> {
        self.ensure_available(name)?;
        Ok(self.insert_primitive(name, shape.into()))
    }

    /// Bundles the named top-level shapes, in the listed order, into a new group.
    ///
    /// The members leave the draw order; the group takes the next z.
    pub fn group<S: AsRef<str>>(&mut self, group_name: &str, member_names: &[S]) -> Result<ShapeRef<'_>> {
        self.ensure_available(group_name)?;
        let required = self.config.required_members();
        if member_names.len() < required {
            return Err(SceneError::TooFewMembers {
                name: group_name.to_owned(),
                required,
                given: member_names.len(),
            });
        }

        let mut members = Vec::with_capacity(member_names.len());
        for name in member_names {
            let name = name.as_ref();
            let id = self.resolve(name)?;
            if self.node(id).parent.is_some() || members.contains(&id) {
                return Err(SceneError::AlreadyGrouped(name.to_owned()));
            }
            members.push(id);
        }

        for &id in &members {
            self.hide(id);
        }
        let group = self.insert_node(group_name, Body::Group(members.clone()));
        for &id in &members {
            self.nodes[id.0].parent = Some(group);
        }
        debug!("grouped {} shape(s) into `{}` at z {}", members.len(), group_name, self.node(group).z);
        Ok(self.shape(group))
    }

    /// Dissolves a top-level group. Members return to the draw order with
    /// their own z; nested groups stay intact.
    pub fn ungroup(&mut self, group_name: &str) -> Result<()> {
        let id = self.resolve(group_name)?;
        let node = self.node(id);
        let Body::Group(members) = &node.body else {
            return Err(SceneError::NotAGroup(group_name.to_owned()));
        };
        if node.parent.is_some() {
            return Err(SceneError::AlreadyGrouped(group_name.to_owned()));
        }
        let members = members.clone();

        self.hide(id);
        self.names.remove(group_name);
        self.nodes.try_remove(id.0);
        for &member in &members {
            self.nodes[member.0].parent = None;
            self.show(member);
        }
        debug!("ungrouped `{}`, restored {} shape(s)", group_name, members.len());
        Ok(())
    }

    /// Removes a top-level shape. Groups take every transitive member with them.
    pub fn delete(&mut self, name: &str) -> Result<()> {
        let id = self.resolve(name)?;
        if self.node(id).parent.is_some() {
            return Err(SceneError::AlreadyGrouped(name.to_owned()));
        }

        let doomed = self.subtree(id);
        self.hide(id);
        for &victim in &doomed {
            if let Some(node) = self.nodes.try_remove(victim.0) {
                trace!("removing `{}`", node.name);
                self.names.remove(&node.name);
            }
        }
        debug!("deleted `{}` ({} shape(s))", name, doomed.len());
        Ok(())
    }

    /// Translates a shape in place. Groups move every transitive member.
    pub fn move_shape(&mut self, name: &str, dx: f64, dy: f64) -> Result<()> {
        let id = self.resolve(name)?;
        if !dx.is_finite() || !dy.is_finite() {
            return Err(SceneError::InvalidGeometry {
                kind: "translation",
                reason: "offsets must be finite",
            });
        }
        if dx == 0.0 && dy == 0.0 {
            return Ok(());
        }

        let mut moved = Vec::new();
        for target in self.subtree(id) {
            if let Body::Primitive(shape) = &self.nodes[target.0].body {
                let mut shape = *shape;
                shape.translate(dx, dy);
                if !shape.is_finite() {
                    return Err(SceneError::InvalidGeometry {
                        kind: "translation",
                        reason: "moved geometry must stay finite",
                    });
                }
                moved.push((target, shape));
            }
        }
        for (target, shape) in moved {
            self.nodes[target.0].body = Body::Primitive(shape);
        }
        debug!("moved `{}` by ({}, {})", name, dx, dy);
        Ok(())
    }

    pub fn bounding_box(&self, name: &str) -> Result<BoundingBox> {
        Ok(self.shape(self.resolve(name)?).compute_aabb())
    }

    /// Name of the topmost top-level shape whose outline passes within the
    /// hit tolerance of `(x, y)`.
    pub fn shape_at(&self, x: f64, y: f64) -> Option<&str> {
        self.top_at(Point::new(x, y)).map(|shape| shape.name())
    }

    /// Scans the whole draw order and keeps the highest z among the hits.
    pub fn top_at(&self, p: Point) -> Option<ShapeRef<'_>> {
        let tolerance = self.config.hit_tolerance;
        self.all()
            .filter(|shape| shape.covers(p, tolerance))
            .max_by_key(|shape| shape.z())
    }

    /// Exact geometric intersection of two shapes (groups through their members).
    pub fn intersect(&self, name1: &str, name2: &str) -> Result<bool> {
        let a = self.shape(self.resolve(name1)?);
        let b = self.shape(self.resolve(name2)?);
        Ok(a.intersects(&b))
    }

    pub fn list(&self, name: &str) -> Result<String> {
        Ok(self.shape(self.resolve(name)?).describe())
    }

    /// Live top-level shapes in draw order, bottom first.
    pub fn all(&self) -> impl Iterator<Item = ShapeRef<'_>> + '_ {
        self.draw_order.iter().map(move |&id| self.shape(id))
    }

    /// Any live shape, grouped members included.
    pub fn get(&self, name: &str) -> Option<ShapeRef<'_>> {
        self.names.get(name).map(|&id| self.shape(id))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains_key(name)
    }

    pub fn is_grouped(&self, name: &str) -> Result<bool> {
        Ok(self.node(self.resolve(name)?).parent.is_some())
    }

    /// Number of live shapes, grouped members and groups included.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    fn ensure_available(&self, name: &str) -> Result<()> {
        if name.trim().is_empty() || self.names.contains_key(name) {
            Err(SceneError::DuplicateName(name.to_owned()))
        } else {
            Ok(())
        }
    }

    fn resolve(&self, name: &str) -> Result<ShapeId> {
        self.names
            .get(name)
            .copied()
            .ok_or_else(|| SceneError::NotFound(name.to_owned()))
    }

    fn node(&self, id: ShapeId) -> &Node {
        &self.nodes[id.0]
    }

    fn shape(&self, id: ShapeId) -> ShapeRef<'_> {
        ShapeRef { scene: self, id }
    }

    fn take_z(&mut self) -> ZOrder {
        let z = ZOrder(self.next_z);
        self.next_z += 1;
        z
    }

    fn insert_node(&mut self, name: &str, body: Body) -> ShapeId {
        let z = self.take_z();
        let id = ShapeId(self.nodes.insert(Node {
            name: name.to_owned(),
            z,
            parent: None,
            body,
        }));
        self.names.insert(name.to_owned(), id);
        self.show(id);
        id
    }

    fn insert_primitive(&mut self, name: &str, shape: Primitive) -> ShapeRef<'_> {
        let id = self.insert_node(name, Body::Primitive(shape));
        debug!("created {} `{}` at z {}", shape.kind(), name, self.node(id).z);
        self.shape(id)
    }

    /// Puts a top-level shape into the draw order, keeping it sorted by z.
    fn show(&mut self, id: ShapeId) {
        let z = self.nodes[id.0].z;
        let nodes = &self.nodes;
        let at = self.draw_order.partition_point(|other| nodes[other.0].z < z);
        self.draw_order.insert(at, id);
    }

    fn hide(&mut self, id: ShapeId) {
        self.draw_order.retain(|&other| other != id);
    }

    /// Every node reachable from `root`, root first, members in listed order.
    fn subtree(&self, root: ShapeId) -> Vec<ShapeId> {
        let mut visited = FnvHashSet::default();
        let mut out = vec![];
        let mut stack = vec![root];
        while let Some(id) = stack.pop() {
            if !visited.insert(id) {
                continue;
            }
            out.push(id);
            if let Some(Node { body: Body::Group(members), .. }) = self.nodes.get(id.0) {
                stack.extend(members.iter().rev().copied());
            }
        }
        out
    }
}

/// Borrowed view of one live shape.
#[derive(Clone, Copy)]
pub struct ShapeRef<'a> {
    scene: &'a Scene,
    id: ShapeId,
}

impl<'a> ShapeRef<'a> {
    fn node(&self) -> &'a Node {
        &self.scene.nodes[self.id.0]
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn name(&self) -> &'a str {
        &self.node().name
    }

    pub fn z(&self) -> ZOrder {
        self.node().z
    }

    pub fn kind(&self) -> &'static str {
        match &self.node().body {
            Body::Primitive(shape) => shape.kind(),
            Body::Group(_) => "group",
        }
    }

    /// The geometry of a leaf shape, `None` for groups.
    pub fn primitive(&self) -> Option<&'a Primitive> {
        match &self.node().body {
            Body::Primitive(shape) => Some(shape),
            Body::Group(_) => None,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self.node().body, Body::Group(_))
    }

    /// The group holding this shape, if any.
    pub fn parent(&self) -> Option<ShapeRef<'a>> {
        let scene = self.scene;
        self.node().parent.map(|id| ShapeRef { scene, id })
    }

    /// Direct members in listed order; empty for primitives.
    pub fn members(&self) -> impl Iterator<Item = ShapeRef<'a>> + 'a {
        let scene = self.scene;
        let ids: &'a [ShapeId] = match &self.node().body {
            Body::Group(members) => members,
            Body::Primitive(_) => &[],
        };
        ids.iter().map(move |&id| ShapeRef { scene, id })
    }

    /// Every primitive at or below this shape.
    pub fn leaves(&self) -> impl Iterator<Item = &'a Primitive> + 'a {
        let scene = self.scene;
        scene.subtree(self.id).into_iter().filter_map(move |id| match &scene.nodes[id.0].body {
            Body::Primitive(shape) => Some(shape),
            Body::Group(_) => None,
        })
    }

    pub fn intersects(&self, other: &ShapeRef<'_>) -> bool {
        self.leaves().any(|a| other.leaves().any(|b| a.intersects(b)))
    }

    pub fn describe(&self) -> String {
        match &self.node().body {
            Body::Primitive(shape) => shape.describe(self.name()),
            Body::Group(_) => {
                let mut out = format!("{} group", self.name());
                for member in self.members() {
                    out.push(' ');
                    out.push_str(member.name());
                }
                out
            }
        }
    }
}

impl Select for ShapeRef<'_> {
    /// Union of the member boxes for groups.
    fn compute_aabb(&self) -> BoundingBox {
        self.leaves()
            .map(|shape| shape.compute_aabb())
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or_else(|| BoundingBox::new(0.0, 0.0, 0.0, 0.0))
    }

    fn distance_to_outline(&self, p: Point) -> f64 {
        self.leaves()
            .map(|shape| shape.distance_to_outline(p))
            .fold(f64::INFINITY, f64::min)
    }
}

impl fmt::Display for ShapeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl fmt::Debug for ShapeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ShapeRef")
            .field("id", &self.id)
            .field("name", &self.name())
            .field("z", &self.z())
            .finish()
    }
}
