/// Stateful wireframe projection engine with change tracking
use log::trace;
use nalgebra::Point2;

use crate::geometry::Mesh;
use crate::surface::{Style, Surface};
use crate::transform::Rotation;
use crate::view::{Direction, ViewState};

/// Owns the current mesh and view state, and re-projects only when the
/// view actually changed.
///
/// The engine is driven synchronously, once per tick, by whatever host
/// owns the drawing surface. A tick where nothing changed leaves the
/// surface untouched and costs no arithmetic. Until a mesh is installed
/// every call is a no-op.
pub struct Projector {
    mesh: Option<Mesh>,
    view: ViewState,
    style: Style,
    /// One entry per vertex, index-aligned with the mesh. `None` marks a
    /// degenerate projection (rotated Z hit the zoom plane).
    projected: Vec<Option<Point2<f32>>>,
    dirty: bool,
    recomputes: u64,
}

impl Projector {
    pub fn new() -> Self {
        Self::with_view(ViewState::default(), Style::default())
    }

    pub fn with_view(view: ViewState, style: Style) -> Self {
        Self {
            mesh: None,
            view,
            style,
            projected: Vec::new(),
            dirty: false,
            recomputes: 0,
        }
    }

    /// Install new geometry, replacing (never merging with) the old.
    pub fn set_mesh(&mut self, mesh: Mesh) {
        self.projected.clear();
        self.mesh = Some(mesh);
        self.dirty = true;
    }

    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn set_style(&mut self, style: Style) {
        self.style = style;
        self.dirty = true;
    }

    /// Cached screen coordinates from the last recompute, index-aligned
    /// with the mesh vertices.
    pub fn projected_points(&self) -> &[Option<Point2<f32>>] {
        &self.projected
    }

    /// How many full re-projections have run since construction.
    pub fn recompute_count(&self) -> u64 {
        self.recomputes
    }

    /// One render tick.
    ///
    /// `zoom` is the current absolute zoom. With `spin` off, `rotation`
    /// is an absolute angle triple that replaces the stored one; with
    /// `spin` on it is a delta added to it, and a tick with no delta
    /// doubles the current angles instead. If nothing changed the call
    /// returns without touching the surface.
    pub fn render(
        &mut self,
        surface: &mut dyn Surface,
        zoom: f32,
        rotation: Option<Rotation>,
        spin: bool,
    ) {
        if self.mesh.is_none() {
            return;
        }
        if zoom != self.view.zoom {
            self.view.zoom = zoom;
            self.dirty = true;
        }
        self.view.spin = spin;
        if spin {
            match rotation {
                Some(delta) => self.view.rotation.rotate(delta.x, delta.y, delta.z),
                None => self.view.rotation = self.view.rotation.scaled(2.0),
            }
            self.dirty = true;
        } else if let Some(rotation) = rotation {
            if rotation != self.view.rotation {
                self.view.rotation = rotation;
                self.dirty = true;
            }
        }
        if !self.dirty {
            return;
        }

        self.recompute();
        self.emit(surface);
        self.dirty = false;
    }

    /// Shift the pan offset. Unclamped; the mesh may move off-surface.
    pub fn move_by(&mut self, direction: Direction, amount: f32) {
        if self.mesh.is_none() {
            return;
        }
        self.view.pan(direction, amount);
        self.dirty = true;
    }

    /// Zero all three rotation angles.
    pub fn reset_rotation(&mut self) {
        if self.mesh.is_none() {
            return;
        }
        self.view.rotation = Rotation::zero();
        self.dirty = true;
    }

    fn recompute(&mut self) {
        let mesh = match &self.mesh {
            Some(mesh) => mesh,
            None => return,
        };
        // one matrix product covers every vertex
        let rotated = self.view.rotation.matrix() * mesh.vertices();
        self.projected.clear();
        self.projected.reserve(rotated.ncols());
        for column in rotated.column_iter() {
            let factor = self.view.scale / (self.view.zoom - column[2]);
            self.projected.push(if factor.is_finite() {
                // screen Y grows downward, model Y grows upward
                Some(Point2::new(
                    column[0] * factor + self.view.position.x,
                    -column[1] * factor + self.view.position.y,
                ))
            } else {
                None
            });
        }
        self.recomputes += 1;
        trace!(
            "projected {} points (recompute #{})",
            self.projected.len(),
            self.recomputes
        );
    }

    fn emit(&self, surface: &mut dyn Surface) {
        let mesh = match &self.mesh {
            Some(mesh) => mesh,
            None => return,
        };
        surface.clear();
        for point in self.projected.iter().flatten() {
            surface.draw_point(*point, self.style.point_size, self.style.point_colour);
        }
        for face in mesh.faces() {
            let outline: Option<Vec<_>> = face
                .indices()
                .iter()
                .map(|&index| self.projected[index])
                .collect();
            // a face touching a degenerate vertex is skipped this frame
            if let Some(outline) = outline {
                surface.draw_polygon(&outline, self.style.line_colour);
            }
        }
    }
}

impl Default for Projector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::obj::parse_obj;
    use crate::surface::Colour;
    use nalgebra::Vector2;
    use std::io::Cursor;

    #[derive(Debug, Clone, PartialEq)]
    enum Command {
        Clear,
        Point(Point2<f32>),
        Polygon(Vec<Point2<f32>>),
    }

    #[derive(Default)]
    struct RecordingSurface {
        commands: Vec<Command>,
    }

    impl Surface for RecordingSurface {
        fn clear(&mut self) {
            self.commands.push(Command::Clear);
        }

        fn draw_point(&mut self, point: Point2<f32>, _size: f32, _colour: Colour) {
            self.commands.push(Command::Point(point));
        }

        fn draw_polygon(&mut self, points: &[Point2<f32>], _outline: Colour) {
            self.commands.push(Command::Polygon(points.to_vec()));
        }
    }

    fn unit_square() -> Mesh {
        parse_obj(Cursor::new(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        ))
        .unwrap()
    }

    #[test]
    fn square_scenario_matches_hand_computation() {
        // zoom 20, scale 2500 -> every point scales by 125, Y flipped,
        // offset by the default (420, 540) pan
        let mut projector = Projector::new();
        projector.set_mesh(unit_square());
        let mut surface = RecordingSurface::default();
        projector.render(&mut surface, 20.0, None, false);

        let expected = [
            Point2::new(420.0, 540.0),
            Point2::new(545.0, 540.0),
            Point2::new(545.0, 415.0),
            Point2::new(420.0, 415.0),
        ];
        assert_eq!(surface.commands.len(), 6);
        assert_eq!(surface.commands[0], Command::Clear);
        for (i, point) in expected.iter().enumerate() {
            assert_eq!(surface.commands[1 + i], Command::Point(*point));
        }
        assert_eq!(surface.commands[5], Command::Polygon(expected.to_vec()));
    }

    #[test]
    fn zero_rotation_is_scale_and_flip() {
        // zoom = scale / k with planar geometry reduces projection to a
        // pure scale by k and a Y flip, faces notwithstanding
        let k = 5.0;
        let view = ViewState::new(2500.0 / k, 2500.0, Vector2::zeros());
        let mut projector = Projector::with_view(view, Style::default());
        projector.set_mesh(unit_square());
        let mut surface = RecordingSurface::default();
        projector.render(&mut surface, view.zoom, None, false);

        let mesh = projector.mesh().unwrap().clone();
        for (i, point) in projector.projected_points().iter().enumerate() {
            let point = point.unwrap();
            assert!((point.x - mesh.vertices()[(0, i)] * k).abs() < 1e-3);
            assert!((point.y + mesh.vertices()[(1, i)] * k).abs() < 1e-3);
        }
    }

    #[test]
    fn unchanged_inputs_recompute_at_most_once() {
        let mut projector = Projector::new();
        projector.set_mesh(unit_square());
        let mut surface = RecordingSurface::default();
        projector.render(&mut surface, 20.0, Some(Rotation::new(0.1, 0.2, 0.3)), false);
        assert_eq!(projector.recompute_count(), 1);
        let emitted = surface.commands.len();

        projector.render(&mut surface, 20.0, Some(Rotation::new(0.1, 0.2, 0.3)), false);
        assert_eq!(projector.recompute_count(), 1);
        assert_eq!(surface.commands.len(), emitted, "clean tick must not draw");
    }

    #[test]
    fn zoom_change_triggers_recompute() {
        let mut projector = Projector::new();
        projector.set_mesh(unit_square());
        let mut surface = RecordingSurface::default();
        projector.render(&mut surface, 20.0, None, false);
        projector.render(&mut surface, 25.0, None, false);
        assert_eq!(projector.recompute_count(), 2);
    }

    #[test]
    fn spin_without_delta_doubles_rotation() {
        let mut projector = Projector::new();
        projector.set_mesh(unit_square());
        let mut surface = RecordingSurface::default();
        projector.render(&mut surface, 20.0, Some(Rotation::new(0.1, 0.2, 0.3)), false);

        projector.render(&mut surface, 20.0, None, true);
        assert_eq!(projector.view().rotation, Rotation::new(0.2, 0.4, 0.6));
        projector.render(&mut surface, 20.0, None, true);
        assert_eq!(projector.view().rotation, Rotation::new(0.4, 0.8, 1.2));
        // spinning recomputes every tick even with identical zoom
        assert_eq!(projector.recompute_count(), 3);
    }

    #[test]
    fn spin_with_delta_accumulates() {
        let mut projector = Projector::new();
        projector.set_mesh(unit_square());
        let mut surface = RecordingSurface::default();
        projector.render(&mut surface, 20.0, Some(Rotation::new(0.1, 0.0, 0.0)), false);
        projector.render(&mut surface, 20.0, Some(Rotation::new(0.05, 0.1, 0.0)), true);
        assert_eq!(projector.view().rotation, Rotation::new(0.15, 0.1, 0.0));
    }

    #[test]
    fn move_up_then_down_restores_offset() {
        let mut projector = Projector::new();
        projector.set_mesh(unit_square());
        let start = projector.view().position;
        projector.move_by(Direction::Up, 20.0);
        assert_eq!(projector.view().position.y, start.y - 20.0);
        projector.move_by(Direction::Down, 20.0);
        assert_eq!(projector.view().position, start);
    }

    #[test]
    fn move_marks_dirty() {
        let mut projector = Projector::new();
        projector.set_mesh(unit_square());
        let mut surface = RecordingSurface::default();
        projector.render(&mut surface, 20.0, None, false);
        projector.move_by(Direction::Right, 5.0);
        projector.render(&mut surface, 20.0, None, false);
        assert_eq!(projector.recompute_count(), 2);
    }

    #[test]
    fn reset_rotation_zeroes_and_redraws() {
        let mut projector = Projector::new();
        projector.set_mesh(unit_square());
        let mut surface = RecordingSurface::default();
        projector.render(&mut surface, 20.0, Some(Rotation::new(0.5, 0.5, 0.5)), false);
        projector.reset_rotation();
        assert_eq!(projector.view().rotation, Rotation::zero());
        projector.render(&mut surface, 20.0, None, false);
        assert_eq!(projector.recompute_count(), 2);
    }

    #[test]
    fn no_mesh_means_no_ops() {
        let mut projector = Projector::new();
        let mut surface = RecordingSurface::default();
        projector.render(&mut surface, 20.0, Some(Rotation::new(1.0, 0.0, 0.0)), true);
        projector.move_by(Direction::Left, 10.0);
        projector.reset_rotation();
        assert!(surface.commands.is_empty());
        assert_eq!(projector.recompute_count(), 0);
        assert_eq!(projector.view().position, ViewState::default().position);
    }

    #[test]
    fn degenerate_vertex_skips_point_and_face() {
        // one vertex sits exactly on the zoom plane (z == 20)
        let mesh = parse_obj(Cursor::new(
            "v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 0 20\nf 1 2 3 4\nf 1 2 3\n",
        ))
        .unwrap();
        let mut projector = Projector::new();
        projector.set_mesh(mesh);
        let mut surface = RecordingSurface::default();
        projector.render(&mut surface, 20.0, None, false);

        let points = surface
            .commands
            .iter()
            .filter(|c| matches!(c, Command::Point(_)))
            .count();
        let polygons = surface
            .commands
            .iter()
            .filter(|c| matches!(c, Command::Polygon(_)))
            .count();
        assert_eq!(points, 3);
        assert_eq!(polygons, 1, "only the face avoiding the bad vertex draws");
        assert!(projector.projected_points()[3].is_none());
    }

    #[test]
    fn failed_load_leaves_previous_mesh_untouched() {
        let mut projector = Projector::new();
        projector.set_mesh(unit_square());
        // the bad file never reaches set_mesh
        let result = parse_obj(Cursor::new("v 0 0 0\nf 1 2 99\n"));
        assert!(result.is_err());
        assert_eq!(projector.mesh().unwrap().vertex_count(), 4);
    }

    #[test]
    fn set_mesh_replaces_geometry() {
        let mut projector = Projector::new();
        projector.set_mesh(unit_square());
        projector.set_mesh(Mesh::cube(2.0));
        assert_eq!(projector.mesh().unwrap().vertex_count(), 8);
        let mut surface = RecordingSurface::default();
        projector.render(&mut surface, 20.0, None, false);
        assert_eq!(projector.projected_points().len(), 8);
    }
}
