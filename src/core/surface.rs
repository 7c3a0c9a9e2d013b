/// Drawing boundary between the animation core and whatever puts pixels on screen.
use std::collections::BTreeMap;

use ratatui::style::Color;

/// A position on the virtual overlay canvas. `y` grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pos {
    pub x: f64,
    pub y: f64,
}

impl Pos {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Linear interpolation: `t = 0` is `self`, `t = 1` is `to`.
    pub fn lerp(self, to: Pos, t: f64) -> Pos {
        Pos::new(self.x + (to.x - self.x) * t, self.y + (to.y - self.y) * t)
    }
}

/// Handle to a point drawn on a [`Surface`]. Never reused within a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PointId(u64);

/// Primitive drawing operations the celebration animation relies on.
///
/// Every operation is best-effort: moving or removing a point that is
/// already gone does nothing.
pub trait Surface {
    fn show_overlay(&mut self);
    fn hide_overlay(&mut self);
    fn draw_point(&mut self, pos: Pos, color: Color) -> PointId;
    fn move_point(&mut self, id: PointId, pos: Pos);
    fn remove_point(&mut self, id: PointId);
}

/// In-memory overlay the renderer paints on top of the quiz.
#[derive(Debug, Default)]
pub struct Overlay {
    visible: bool,
    points: BTreeMap<PointId, (Pos, Color)>,
    next_id: u64,
}

impl Overlay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn points(&self) -> impl Iterator<Item = (Pos, Color)> + '_ {
        self.points.values().copied()
    }

    pub fn point(&self, id: PointId) -> Option<Pos> {
        self.points.get(&id).map(|(pos, _)| *pos)
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl Surface for Overlay {
    fn show_overlay(&mut self) {
        self.visible = true;
    }

    fn hide_overlay(&mut self) {
        self.visible = false;
    }

    fn draw_point(&mut self, pos: Pos, color: Color) -> PointId {
        let id = PointId(self.next_id);
        self.next_id += 1;
        self.points.insert(id, (pos, color));
        id
    }

    fn move_point(&mut self, id: PointId, pos: Pos) {
        if let Some(entry) = self.points.get_mut(&id) {
            entry.0 = pos;
        }
    }

    fn remove_point(&mut self, id: PointId) {
        self.points.remove(&id);
    }
}
