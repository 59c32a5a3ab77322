mod common;

mod tests {
    use myrtio_zigbee_light::TimerEvent;
    use myrtio_zigbee_light::attributes::{LEVEL_MAX, LEVEL_MIN};
    use myrtio_zigbee_light::command::{
        LevelDirection, MoveLevel, MoveToLevel, Status, StepLevel, StopLevel,
    };
    use myrtio_zigbee_light::{CommandQueue, LightAttributes, PwmChannel};

    use super::common::{ENDPOINT, OTHER_ENDPOINT, at, light, light_with, run_ticks};

    fn dimmed(level: u8, on: bool) -> LightAttributes {
        let mut attributes = LightAttributes::default();
        attributes.level.current_level = level;
        attributes.on_off.on_off = on;
        attributes
    }

    #[test]
    fn test_move_to_level_transition() {
        let queue = CommandQueue::new();
        let mut light = light(&queue);
        assert_eq!(light.attributes().level.current_level, LEVEL_MAX);

        let status = light.move_to_level(
            ENDPOINT,
            MoveToLevel {
                level: 100,
                transition_time: 10,
                with_on_off: false,
            },
        );
        assert_eq!(status, Status::Success);

        // 1 s at 50 ticks per second, the first tick runs immediately
        assert_eq!(light.attributes().level.current_level, 250);
        assert_eq!(light.attributes().level.remaining_time, 49);
        assert!(light.is_timer_running(TimerEvent::Level));

        let now = run_ticks(&mut light, 0, 25);
        let halfway = light.attributes().level.current_level;
        assert!(halfway > 100 && halfway < 250);

        run_ticks(&mut light, now, 30);
        assert_eq!(light.attributes().level.current_level, 100);
        assert_eq!(light.attributes().level.remaining_time, 0);
        assert!(!light.level_ramp().is_active());
        assert_eq!(light.level_ramp().axis.step_fixed, 0);
        assert_eq!(light.level_ramp().axis.current_fixed, 100 << 8);
        assert!(!light.is_timer_running(TimerEvent::Level));
    }

    #[test]
    fn test_move_to_level_zero_switches_off() {
        let queue = CommandQueue::new();
        let mut light = light_with(&queue, dimmed(LEVEL_MAX, true));

        light.move_to_level(
            ENDPOINT,
            MoveToLevel {
                level: 0,
                transition_time: 0,
                with_on_off: true,
            },
        );

        let attributes = light.attributes();
        assert_eq!(attributes.level.current_level, LEVEL_MIN);
        assert_eq!(attributes.level.remaining_time, 0);
        assert!(!attributes.on_off.on_off);
        assert!(!light.is_timer_running(TimerEvent::Level));
        assert!(light.driver().all_stopped());
    }

    #[test]
    fn test_move_to_level_without_on_off_keeps_state() {
        let queue = CommandQueue::new();
        let mut light = light_with(&queue, dimmed(LEVEL_MAX, true));

        light.move_to_level(
            ENDPOINT,
            MoveToLevel {
                level: 0,
                transition_time: 0,
                with_on_off: false,
            },
        );

        assert_eq!(light.attributes().level.current_level, LEVEL_MIN);
        assert!(light.attributes().on_off.on_off);
        assert!(light.driver().all_running());
    }

    #[test]
    fn test_stop_during_move() {
        let queue = CommandQueue::new();
        let mut light = light(&queue);

        light.move_level(
            ENDPOINT,
            MoveLevel {
                direction: LevelDirection::Down,
                rate: 10,
                with_on_off: false,
            },
        );
        assert_eq!(light.attributes().level.current_level, 253);
        assert!(light.level_ramp().is_active());
        assert!(light.is_timer_running(TimerEvent::Level));

        let now = run_ticks(&mut light, 0, 3);
        assert_eq!(light.attributes().level.current_level, 250);

        light.stop_level(ENDPOINT, StopLevel { with_on_off: false });
        assert!(!light.level_ramp().is_active());
        assert_eq!(light.level_ramp().axis.step_fixed, 0);
        assert_eq!(light.level_ramp().axis.current_fixed, 250 << 8);
        assert_eq!(light.attributes().level.remaining_time, 0);
        assert!(!light.is_timer_running(TimerEvent::Level));

        run_ticks(&mut light, now, 10);
        assert_eq!(light.attributes().level.current_level, 250);
    }

    #[test]
    fn test_move_rate_zero_stops() {
        let queue = CommandQueue::new();
        let mut light = light_with(&queue, dimmed(100, true));

        light.move_level(
            ENDPOINT,
            MoveLevel {
                direction: LevelDirection::Up,
                rate: 20,
                with_on_off: false,
            },
        );
        assert!(light.is_timer_running(TimerEvent::Level));

        light.move_level(
            ENDPOINT,
            MoveLevel {
                direction: LevelDirection::Up,
                rate: 0,
                with_on_off: false,
            },
        );
        assert!(!light.level_ramp().is_active());
        assert!(!light.is_timer_running(TimerEvent::Level));
    }

    #[test]
    fn test_move_up_reaches_max() {
        let queue = CommandQueue::new();
        let mut light = light_with(&queue, dimmed(200, true));

        // 54 units at 27 units per second
        light.move_level(
            ENDPOINT,
            MoveLevel {
                direction: LevelDirection::Up,
                rate: 27,
                with_on_off: false,
            },
        );
        run_ticks(&mut light, 0, 40);

        assert_eq!(light.attributes().level.current_level, LEVEL_MAX);
        assert!(!light.is_timer_running(TimerEvent::Level));
    }

    #[test]
    fn test_step_up_with_on_off_switches_on() {
        let queue = CommandQueue::new();
        let mut light = light_with(&queue, dimmed(100, false));

        light.step_level(
            ENDPOINT,
            StepLevel {
                direction: LevelDirection::Up,
                step_size: 10,
                transition_time: 0,
                with_on_off: true,
            },
        );

        assert_eq!(light.attributes().level.current_level, 110);
        assert!(light.attributes().on_off.on_off);
        assert!(light.driver().all_running());
    }

    #[test]
    fn test_step_down_clamps_at_min() {
        let queue = CommandQueue::new();
        let mut light = light_with(&queue, dimmed(5, true));

        light.step_level(
            ENDPOINT,
            StepLevel {
                direction: LevelDirection::Down,
                step_size: 50,
                transition_time: 0,
                with_on_off: true,
            },
        );

        assert_eq!(light.attributes().level.current_level, LEVEL_MIN);
        assert!(!light.attributes().on_off.on_off);
        assert!(!light.level_ramp().is_active());
    }

    #[test]
    fn test_other_endpoint_is_ignored() {
        let queue = CommandQueue::new();
        let mut light = light(&queue);

        let status = light.move_to_level(
            OTHER_ENDPOINT,
            MoveToLevel {
                level: 10,
                transition_time: 0,
                with_on_off: true,
            },
        );

        assert_eq!(status, Status::Success);
        assert_eq!(light.attributes().level.current_level, LEVEL_MAX);
        assert_eq!(light.driver().writes, 0);
        assert!(!light.take_changed());
    }

    #[test]
    fn test_on_off_toggle() {
        let queue = CommandQueue::new();
        let mut light = light(&queue);

        light.toggle(ENDPOINT);
        assert!(light.attributes().on_off.on_off);
        assert!(light.driver().all_running());
        assert!(light.take_changed());
        assert!(!light.take_changed());

        light.off(ENDPOINT);
        assert!(!light.attributes().on_off.on_off);
        assert!(light.driver().all_stopped());

        light.on(ENDPOINT);
        assert!(light.driver().is_running(PwmChannel::Warm));
    }

    #[test]
    fn test_adjust_drives_color_temperature() {
        let queue = CommandQueue::new();
        let mut light = light_with(&queue, dimmed(LEVEL_MAX, true));

        light.adjust();

        let driver = light.driver();
        assert!(driver.all_running());
        assert_eq!(driver.duty(PwmChannel::Red).raw(), 0);
        assert!(driver.duty(PwmChannel::Cool).raw() > 0);
        assert!(driver.duty(PwmChannel::Warm).raw() > 0);
        assert_eq!(light.poll(at(0)).next_deadline, None);
    }
}
