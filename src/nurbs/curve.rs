use crate::math::Vector2;

/// Knot-span denominators below this are treated as zero.
const FLOAT_ERR: f32 = 1e-5;

/// A rational B-spline curve in the 2D overlay plane.
///
/// Control points carry individual weights; the curve is evaluated with the
/// efficient de Boor recurrence on weighted points and de-homogenized at the
/// end. The knot vector is clamped uniform and rebuilt from scratch whenever
/// the control polygon or the order changes.
pub struct NurbsCurve {
    pub control_points: Vec<Vector2>,
    pub weights: Vec<f32>,
    order: usize,
    knots: Vec<f32>,
    pub spline: Vec<Vector2>,
    u_step: f32,
    pub u_display: f32,
}

impl NurbsCurve {
    pub fn new() -> Self {
        NurbsCurve {
            control_points: Vec::new(),
            weights: Vec::new(),
            order: 2,
            knots: Vec::new(),
            spline: Vec::new(),
            u_step: 0.01,
            u_display: 0.45,
        }
    }

    pub fn point_count(&self) -> usize {
        self.control_points.len()
    }

    pub fn order(&self) -> usize {
        self.order
    }

    /// Clamps the requested order to `[2, max(2, point_count)]`.
    pub fn set_order(&mut self, requested: usize) {
        self.order = requested.clamp(2, self.point_count().max(2));
        self.rebuild();
    }

    /// New points enter with unit weight.
    pub fn add_point(&mut self, point: Vector2) {
        self.control_points.push(point);
        self.weights.push(1.0);
        self.rebuild();
    }

    pub fn move_point(&mut self, index: usize, point: Vector2) {
        if index < self.control_points.len() {
            self.control_points[index] = point;
            self.rebuild();
        }
    }

    /// Weights never go negative. A weight of exactly zero is legal and the
    /// evaluator's epsilon guard handles the degenerate spans it produces.
    pub fn adjust_weight(&mut self, index: usize, delta: f32) {
        if let Some(weight) = self.weights.get_mut(index) {
            *weight = (*weight + delta).max(0.0);
            self.rebuild();
        }
    }

    pub fn weight(&self, index: usize) -> f32 {
        self.weights.get(index).copied().unwrap_or(1.0)
    }

    pub fn knots(&self) -> &[f32] {
        &self.knots
    }

    /// Rebuilds the knot vector and resamples the spline polyline. With fewer
    /// than two control points (or fewer points than the order) there is no
    /// curve yet and both outputs are cleared until more points arrive.
    pub fn rebuild(&mut self) {
        self.knots.clear();
        self.spline.clear();

        let n = self.point_count();
        if n < 2 || n < self.order {
            return;
        }

        // Clamped uniform knots: `order` zeros, an even interior ramp, then
        // ones, for a total of n + order entries.
        let knot_count = n + self.order;
        let interior_step = 1.0 / (n - self.order + 1) as f32;
        for i in 0..knot_count {
            if i < self.order {
                self.knots.push(0.0);
            } else if i > n {
                self.knots.push(1.0);
            } else {
                self.knots.push(self.knots[i - 1] + interior_step);
            }
        }

        // Sampling stops short of u = 1 and appends the last control point
        // exactly, so the curve always ends on it regardless of floating
        // point accumulation in the loop variable.
        let mut u = 0.0;
        while u < 1.0 {
            self.spline.push(self.evaluate(u));
            u += self.u_step;
        }
        if let Some(&last) = self.control_points.last() {
            self.spline.push(last);
        }
    }

    /// Evaluates the curve at `u` with the de Boor recurrence.
    ///
    /// Call only after a successful [`rebuild`](Self::rebuild); the knot
    /// vector must be populated.
    pub fn evaluate(&self, u: f32) -> Vector2 {
        let delta = self.find_span(u);

        // Weighted seeds, newest-first: c[i] covers control point delta - i.
        let mut c: Vec<Vector2> = Vec::with_capacity(self.order);
        let mut w: Vec<f32> = Vec::with_capacity(self.order);
        for i in 0..self.order {
            c.push(self.control_points[delta - i] * self.weights[delta - i]);
            w.push(self.weights[delta - i]);
        }

        for r in (2..=self.order).rev() {
            let mut i = delta;
            for s in 0..r - 1 {
                let omega = self.omega(u, i, r);
                c[s] = c[s] * omega + c[s + 1] * (1.0 - omega);
                w[s] = w[s] * omega + w[s + 1] * (1.0 - omega);
                i -= 1;
            }
        }

        c[0] / w[0]
    }

    /// All intermediate stages of the de Boor recurrence at `u`, outermost
    /// first: the de-homogenized seed points, then one shrinking polyline per
    /// elimination round. Yields exactly `order` layers.
    pub fn construction_layers(&self, u: f32) -> Vec<Vec<Vector2>> {
        let mut layers = Vec::with_capacity(self.order);
        let delta = self.find_span(u);

        let mut c: Vec<Vector2> = Vec::with_capacity(self.order);
        let mut w: Vec<f32> = Vec::with_capacity(self.order);
        let mut layer: Vec<Vector2> = Vec::with_capacity(self.order);
        for i in 0..self.order {
            c.push(self.control_points[delta - i] * self.weights[delta - i]);
            w.push(self.weights[delta - i]);
            layer.push(c[i] / w[i]);
        }
        layers.push(std::mem::take(&mut layer));

        for r in (2..=self.order).rev() {
            let mut i = delta;
            for s in 0..r - 1 {
                let omega = self.omega(u, i, r);
                c[s] = c[s] * omega + c[s + 1] * (1.0 - omega);
                w[s] = w[s] * omega + w[s + 1] * (1.0 - omega);
                layer.push(c[s] / w[s]);
                i -= 1;
            }
            layers.push(std::mem::take(&mut layer));
        }

        layers
    }

    /// Index of the knot span containing `u`. Every span start below `u` is
    /// walked over; the leading clamp guarantees the result is at least
    /// order - 1, and the upper bound keeps u = 1 inside the last real span.
    fn find_span(&self, u: f32) -> usize {
        let mut delta = 0;
        while delta + 1 < self.knots.len() && u >= self.knots[delta + 1] {
            delta += 1;
        }
        delta.clamp(self.order - 1, self.point_count() - 1)
    }

    fn omega(&self, u: f32, i: usize, r: usize) -> f32 {
        let denominator = self.knots[i + r - 1] - self.knots[i];
        if denominator > FLOAT_ERR {
            (u - self.knots[i]) / denominator
        } else {
            0.0
        }
    }
}

impl Default for NurbsCurve {
    fn default() -> Self {
        NurbsCurve::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn curve_with(points: &[(f32, f32)], order: usize) -> NurbsCurve {
        let mut curve = NurbsCurve::new();
        for &(x, y) in points {
            curve.add_point(Vector2::new(x, y));
        }
        curve.set_order(order);
        curve
    }

    fn assert_close(a: Vector2, b: Vector2) {
        assert!(
            a.distance(b) < 1e-4,
            "expected ({}, {}) to be near ({}, {})",
            a.x,
            a.y,
            b.x,
            b.y
        );
    }

    #[test]
    fn knot_vector_is_clamped_uniform() {
        let curve = curve_with(
            &[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (3.0, 0.0), (4.0, 0.0)],
            3,
        );
        let expected = [0.0, 0.0, 0.0, 1.0 / 3.0, 2.0 / 3.0, 1.0, 1.0, 1.0];
        assert_eq!(curve.knots().len(), expected.len());
        for (got, want) in curve.knots().iter().zip(expected) {
            assert!((got - want).abs() < 1e-6);
        }
    }

    #[test]
    fn curve_interpolates_both_endpoints() {
        let curve = curve_with(&[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)], 3);
        assert_close(curve.evaluate(0.0), Vector2::new(0.0, 0.0));
        assert_close(
            *curve.spline.last().expect("spline should not be empty"),
            Vector2::new(1.0, 0.0),
        );
    }

    #[test]
    fn sampled_spline_ends_exactly_on_the_last_control_point() {
        let curve = curve_with(&[(0.0, 0.0), (0.3, 0.7), (0.9, -0.2)], 2);
        let last = *curve.spline.last().expect("spline should not be empty");
        assert_eq!(last.x, 0.9);
        assert_eq!(last.y, -0.2);
    }

    #[test]
    fn order_two_traces_the_control_polygon() {
        let curve = curve_with(&[(0.0, 0.0), (1.0, 1.0)], 2);
        assert_close(curve.evaluate(0.5), Vector2::new(0.5, 0.5));
    }

    #[test]
    fn heavier_weights_pull_the_curve_toward_their_point() {
        let points = [(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)];
        let plain = curve_with(&points, 3);

        let mut weighted = curve_with(&points, 3);
        weighted.adjust_weight(1, 4.0);

        let middle = Vector2::new(0.5, 1.0);
        let d_plain = plain.evaluate(0.5).distance(middle);
        let d_weighted = weighted.evaluate(0.5).distance(middle);
        assert!(d_weighted < d_plain);
    }

    #[test]
    fn zero_weight_does_not_produce_nan() {
        let mut curve = curve_with(&[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)], 2);
        curve.adjust_weight(1, -1.0);
        assert_eq!(curve.weight(1), 0.0);
        for point in &curve.spline {
            assert!(point.x.is_finite() && point.y.is_finite());
        }
    }

    #[test]
    fn weights_never_go_negative() {
        let mut curve = curve_with(&[(0.0, 0.0), (1.0, 0.0)], 2);
        curve.adjust_weight(0, -5.0);
        assert_eq!(curve.weight(0), 0.0);
    }

    #[test]
    fn order_clamps_to_the_control_point_count() {
        let mut curve = curve_with(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)], 2);
        curve.set_order(10);
        assert_eq!(curve.order(), 3);
        curve.set_order(0);
        assert_eq!(curve.order(), 2);
    }

    #[test]
    fn too_few_points_defers_the_curve() {
        let mut curve = NurbsCurve::new();
        curve.add_point(Vector2::new(0.0, 0.0));
        assert!(curve.spline.is_empty());
        assert!(curve.knots().is_empty());

        curve.add_point(Vector2::new(1.0, 1.0));
        assert!(!curve.spline.is_empty());
    }

    #[test]
    fn construction_layers_match_the_order() {
        let curve = curve_with(
            &[(0.0, 0.0), (0.5, 1.0), (1.0, 0.5), (1.5, -0.5)],
            3,
        );
        let layers = curve.construction_layers(curve.u_display);
        assert_eq!(layers.len(), 3);
        assert_eq!(layers[0].len(), 3);
        assert_eq!(layers[1].len(), 2);
        assert_eq!(layers[2].len(), 1);

        // The innermost layer is the evaluated curve point itself.
        assert_close(layers[2][0], curve.evaluate(curve.u_display));
    }

    #[test]
    fn evaluation_at_one_stays_in_bounds() {
        let curve = curve_with(&[(0.0, 0.0), (0.5, 1.0), (1.0, 0.0)], 3);
        let end = curve.evaluate(1.0);
        assert!(end.x.is_finite() && end.y.is_finite());
    }
}
