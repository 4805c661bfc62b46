use std::f64::consts::FRAC_PI_2;

use glam::DVec2;

/// Position, velocity and acceleration are all plain 2D double precision
/// vectors. Arithmetic comes from glam (`+`, `-`, `* s`, `/ s`, `length`,
/// `distance`), none of which mutate the operands.
///
/// Division by zero is not guarded anywhere: `v / 0.` yields `Inf` or `NaN`
/// per IEEE-754 and the value is carried on.
pub type Vector = DVec2;

/// Steering helpers on top of glam's vector arithmetic.
pub trait VectorExt: Sized {
    /// `self / |self|`. A zero vector produces `(NaN, NaN)`.
    fn unit(self) -> Self;

    /// Like [`VectorExt::unit`], but a zero (or non-finite length) vector maps
    /// to the zero vector.
    fn unit_or_zero(self) -> Self;

    /// Scales the vector down to `max_speed` when it is longer, otherwise
    /// returns it untouched.
    fn cap_speed(self, max_speed: f64) -> Self;

    /// Facing angle for a sprite that points "up" at rotation 0.
    fn heading(self) -> f64;
}

impl VectorExt for Vector {
    #[inline]
    fn unit(self) -> Self {
        self / self.length()
    }

    #[inline]
    fn unit_or_zero(self) -> Self {
        let length = self.length();
        if length > 0. && length.is_finite() {
            self / length
        } else {
            Vector::ZERO
        }
    }

    #[inline]
    fn cap_speed(self, max_speed: f64) -> Self {
        if self.length() > max_speed {
            self.unit() * max_speed
        } else {
            self
        }
    }

    #[inline]
    fn heading(self) -> f64 {
        self.y.atan2(self.x) + FRAC_PI_2
    }
}

/// Normalizes either faithfully or with the zero fallback, depending on
/// whether the numeric guard is enabled for the run.
#[inline]
pub(crate) fn unit_with(v: Vector, guarded: bool) -> Vector {
    if guarded {
        v.unit_or_zero()
    } else {
        v.unit()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use rstest::rstest;

    use super::{unit_with, Vector, VectorExt};

    macro_rules! assert_eqf64 {
        ($x:expr, $y:expr) => {
            assert_relative_eq!($x, $y, epsilon = 1e-9_f64)
        };
    }

    #[test]
    fn arithmetic_leaves_operands_untouched() {
        let a = Vector::new(1., 2.);
        let b = Vector::new(3., -4.);

        assert_eq!(a + b, Vector::new(4., -2.));
        assert_eq!(a - b, Vector::new(-2., 6.));
        assert_eq!(a * 2., Vector::new(2., 4.));
        assert_eq!(b / 2., Vector::new(1.5, -2.));
        assert_eq!(a, Vector::new(1., 2.));
        assert_eq!(b, Vector::new(3., -4.));
    }

    #[test]
    fn magnitude_and_distance() {
        let a = Vector::new(3., 4.);
        assert_eqf64!(a.length(), 5.);
        assert_eqf64!(a.distance(Vector::ZERO), 5.);
        assert_eqf64!((a - Vector::ZERO).length(), a.distance(Vector::ZERO));
    }

    #[rstest]
    #[case(Vector::new(10., 10.), Vector::new(90., 90.))]
    #[case(Vector::new(-3., 2.5), Vector::new(7., -1.))]
    #[case(Vector::new(0., 0.), Vector::new(1e-3, 0.))]
    fn distance_is_symmetric_and_non_negative(#[case] a: Vector, #[case] b: Vector) {
        assert_eq!(a.distance(b), b.distance(a));
        assert!(a.distance(b) >= 0.);
    }

    #[test]
    fn division_by_zero_is_not_guarded() {
        let v = Vector::new(1., 0.) / 0.;
        assert!(v.x.is_infinite());
        assert!(v.y.is_nan());
    }

    #[test]
    fn unit_of_zero_is_nan() {
        let v = Vector::ZERO.unit();
        assert!(v.x.is_nan() && v.y.is_nan());
    }

    #[test]
    fn unit_or_zero_falls_back() {
        assert_eq!(Vector::ZERO.unit_or_zero(), Vector::ZERO);
        assert_eq!(unit_with(Vector::ZERO, true), Vector::ZERO);
        assert!(unit_with(Vector::ZERO, false).is_nan());

        let v = Vector::new(0., -2.).unit_or_zero();
        assert_eqf64!(v.y, -1.);
    }

    #[rstest]
    #[case(Vector::new(30., 40.), 6.)]
    #[case(Vector::new(-0.1, 0.2), 6.)]
    #[case(Vector::new(6., 0.), 6.)]
    #[case(Vector::new(1., 1.), 0.5)]
    fn cap_speed_never_exceeds_max(#[case] v: Vector, #[case] max_speed: f64) {
        let capped = v.cap_speed(max_speed);
        assert!(capped.length() <= max_speed + 1e-12);

        if v.length() <= max_speed {
            assert_eq!(capped, v);
        } else {
            assert_eqf64!(capped.length(), max_speed);
            assert_eqf64!(capped.unit().dot(v.unit()), 1.);
        }
    }

    #[test]
    fn heading_points_along_velocity() {
        assert_eqf64!(Vector::new(0., -1.).heading(), 0.);
        assert_eqf64!(Vector::new(1., 0.).heading(), std::f64::consts::FRAC_PI_2);
    }
}
