mod tests {
    use myrtio_zigbee_light::math::{dimming_curve, nth_root, power, round_half_up};

    fn close(a: f32, b: f32, tolerance: f32) -> bool {
        (a - b).abs() < tolerance
    }

    #[test]
    fn test_power() {
        assert_eq!(power(2.0, 10), 1024.0);
        assert_eq!(power(3.0, 0), 1.0);
        assert_eq!(power(-2.0, 3), -8.0);
    }

    #[test]
    fn test_nth_root() {
        assert!(close(nth_root(27.0, 3), 3.0, 1e-3));
        assert!(close(nth_root(-8.0, 3), -2.0, 1e-3));
        assert!(close(nth_root(2.0, 2), core::f32::consts::SQRT_2, 1e-3));
        assert_eq!(nth_root(0.0, 4), 0.0);
    }

    #[test]
    fn test_nth_root_invalid() {
        assert!(nth_root(-8.0, 2).is_nan());
        assert!(nth_root(5.0, 0).is_nan());
        assert!(nth_root(5.0, -3).is_nan());
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3);
        assert_eq!(round_half_up(1.49), 1);
        assert_eq!(round_half_up(-2.5), -2);
        assert_eq!(round_half_up(254.6), 255);
    }

    #[test]
    fn test_dimming_curve() {
        assert!(close(dimming_curve(1), 0.001, 1e-4));
        assert!(close(dimming_curve(254), 1.0, 1e-2));

        let mut previous = 0.0;
        for level in 1..=254 {
            let output = dimming_curve(level);
            assert!(output > previous);
            previous = output;
        }
    }
}
