use crate::math::Vector2;

use super::curve::NurbsCurve;

/// Default pick radius in normalized device coordinates.
const PICK_RADIUS: f32 = 0.04;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PickState {
    Idle,
    Moving(usize),
}

/// Click-driven editor for a [`NurbsCurve`].
///
/// Editing is a two-phase gesture: the first click either picks up an
/// existing control point or, if nothing is in range, drops a new one; while
/// a point is held, the next click places it at the cursor. The point does
/// not follow the cursor in between, so a pick can be abandoned by clicking
/// where the point should stay.
pub struct CurveEditor {
    pub curve: NurbsCurve,
    state: PickState,
    pick_radius: f32,
    pub show_construction: bool,
}

impl CurveEditor {
    pub fn new() -> Self {
        CurveEditor {
            curve: NurbsCurve::new(),
            state: PickState::Idle,
            pick_radius: PICK_RADIUS,
            show_construction: false,
        }
    }

    /// Feeds one click at `cursor` (normalized device coordinates) through
    /// the gesture state machine.
    pub fn click(&mut self, cursor: Vector2) {
        match self.state {
            PickState::Idle => match self.pick(cursor) {
                Some(index) => self.state = PickState::Moving(index),
                None => self.curve.add_point(cursor),
            },
            PickState::Moving(index) => {
                self.curve.move_point(index, cursor);
                self.state = PickState::Idle;
            }
        }
    }

    /// Control point under the cursor, if any. Used by weight-editing keys.
    pub fn point_at(&self, cursor: Vector2) -> Option<usize> {
        self.pick(cursor)
    }

    /// Index of the held point, if a move is in progress.
    pub fn moving_point(&self) -> Option<usize> {
        match self.state {
            PickState::Idle => None,
            PickState::Moving(index) => Some(index),
        }
    }

    /// First control point within pick range of the cursor. The pick radius
    /// scales with the point's weight so that heavy (large) points are as
    /// easy to grab as they look, with a floor so that weightless points
    /// remain selectable at all.
    fn pick(&self, cursor: Vector2) -> Option<usize> {
        self.curve
            .control_points
            .iter()
            .enumerate()
            .position(|(i, point)| {
                cursor.distance(*point) <= self.pick_radius * self.curve.weight(i).max(0.5)
            })
    }
}

impl Default for CurveEditor {
    fn default() -> Self {
        CurveEditor::new()
    }
}
