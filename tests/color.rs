mod tests {
    use myrtio_zigbee_light::color::{
        ColorOutput, CoolWarm, Duty, HueDomain, MiredsRange, Rgb, gamma_correct, hsv_to_rgb,
        linear_to_srgb, temperature_to_cool_warm, xy_to_rgb,
    };

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const PHYSICAL: MiredsRange = MiredsRange { min: 154, max: 370 };

    #[test]
    fn test_hsv_to_rgb() {
        assert_eq!(hsv_to_rgb(0, 255, 255, HueDomain::Standard), RED);
        assert_eq!(hsv_to_rgb(85, 255, 255, HueDomain::Standard), GREEN);
        assert_eq!(hsv_to_rgb(21845, 255, 255, HueDomain::Enhanced), GREEN);
        assert_eq!(
            hsv_to_rgb(100, 0, 128, HueDomain::Standard),
            Rgb::new(128, 128, 128)
        );
    }

    #[test]
    fn test_hsv_full_turn_is_red() {
        assert_eq!(hsv_to_rgb(254, 255, 255, HueDomain::Standard), RED);
        assert_eq!(hsv_to_rgb(0xFFFF, 255, 255, HueDomain::Enhanced), RED);
    }

    #[test]
    fn test_xy_white_point() {
        let white = xy_to_rgb(20493, 21561, 254);
        let channels = [white.r, white.g, white.b];
        let min = *channels.iter().min().unwrap();
        let max = *channels.iter().max().unwrap();
        assert!(min >= 250);
        assert!(max - min <= 3);
    }

    #[test]
    fn test_xy_out_of_gamut_keeps_hue() {
        assert_eq!(xy_to_rgb(0, 0, 254), GREEN);
    }

    #[test]
    fn test_linear_to_srgb() {
        assert_eq!(linear_to_srgb(0.0), 0.0);
        assert!((linear_to_srgb(0.002) - 0.025_84).abs() < 1e-4);
        assert!((linear_to_srgb(1.0) - 1.0).abs() < 1e-3);
    }

    #[test]
    fn test_temperature_to_cool_warm() {
        assert_eq!(
            temperature_to_cool_warm(154, 254, PHYSICAL),
            CoolWarm { cool: 254, warm: 0 }
        );
        assert_eq!(
            temperature_to_cool_warm(370, 254, PHYSICAL),
            CoolWarm { cool: 0, warm: 254 }
        );
        assert_eq!(
            temperature_to_cool_warm(262, 254, PHYSICAL),
            CoolWarm {
                cool: 127,
                warm: 127
            }
        );
        // Out of range temperatures are clamped first
        assert_eq!(
            temperature_to_cool_warm(500, 100, PHYSICAL),
            CoolWarm { cool: 0, warm: 100 }
        );
    }

    #[test]
    fn test_temperature_empty_range() {
        let range = MiredsRange { min: 200, max: 200 };
        assert_eq!(
            temperature_to_cool_warm(200, 80, range),
            CoolWarm { cool: 80, warm: 0 }
        );
    }

    #[test]
    fn test_gamma_and_duty() {
        assert_eq!(gamma_correct(254), 254);
        assert_eq!(gamma_correct(127), 63);
        assert_eq!(gamma_correct(0), 0);

        assert_eq!(Duty::from_channel(0), Duty::OFF);
        assert_eq!(Duty::from_channel(254).percent(), 100);
        assert_eq!(Duty::from_channel(255).percent(), 100);
        assert_eq!(Duty::from_channel(254).compare_ticks(1000), 1000);
        assert_eq!(Duty::from_channel(180).compare_ticks(1000), 500);
    }

    #[test]
    fn test_color_output_paths_are_exclusive() {
        let rgb = ColorOutput::from_rgb(RED);
        assert_eq!(rgb.red, Duty::from_channel(255));
        assert_eq!(rgb.cool, Duty::OFF);
        assert_eq!(rgb.warm, Duty::OFF);

        let white = ColorOutput::from_cool_warm(CoolWarm {
            cool: 100,
            warm: 154,
        });
        assert_eq!(white.red, Duty::OFF);
        assert_eq!(white.cool, Duty::from_channel(100));
        assert_eq!(white.warm, Duty::from_channel(154));
    }
}
