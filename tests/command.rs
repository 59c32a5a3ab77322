mod common;

mod tests {
    use myrtio_zigbee_light::command::{
        COLOR_CLUSTER, ColorCommand, HueDirection, LEVEL_CLUSTER, LevelCommand, LevelDirection,
        MoveHue, MoveLevel, MoveMode, MoveToHue, MoveToLevel, ON_OFF_CLUSTER, OnOffCommand,
        StepColorTemperature, StepHue, StepMode, StopLevel,
    };
    use myrtio_zigbee_light::queue::QueueFull;
    use myrtio_zigbee_light::{Command, CommandEnvelope, CommandQueue, DecodeError, Status};

    use super::common::{ENDPOINT, OTHER_ENDPOINT, QUEUE_SIZE, at, light};

    #[test]
    fn test_decode_on_off() {
        assert_eq!(
            Command::decode(ON_OFF_CLUSTER, 0x02, &[]),
            Ok(Command::OnOff(OnOffCommand::Toggle))
        );
        assert_eq!(
            Command::decode(ON_OFF_CLUSTER, 0x40, &[]),
            Err(DecodeError::UnknownCommand(0x40))
        );
    }

    #[test]
    fn test_decode_level() {
        assert_eq!(
            Command::decode(LEVEL_CLUSTER, 0x04, &[0x80, 0x0A, 0x00]),
            Ok(Command::Level(LevelCommand::MoveToLevel(MoveToLevel {
                level: 0x80,
                transition_time: 10,
                with_on_off: true,
            })))
        );
        assert_eq!(
            Command::decode(LEVEL_CLUSTER, 0x01, &[0x01, 0x20]),
            Ok(Command::Level(LevelCommand::Move(MoveLevel {
                direction: LevelDirection::Down,
                rate: 0x20,
                with_on_off: false,
            })))
        );
        assert_eq!(
            Command::decode(LEVEL_CLUSTER, 0x07, &[]),
            Ok(Command::Level(LevelCommand::Stop(StopLevel {
                with_on_off: true
            })))
        );
    }

    #[test]
    fn test_decode_color() {
        assert_eq!(
            Command::decode(COLOR_CLUSTER, 0x00, &[0x20, 0x01, 0x14, 0x00]),
            Ok(Command::Color(ColorCommand::MoveToHue(MoveToHue {
                hue: 0x20,
                direction: HueDirection::LongestDistance,
                transition_time: 20,
            })))
        );
        // Step hue carries an 8-bit transition time
        assert_eq!(
            Command::decode(COLOR_CLUSTER, 0x02, &[0x03, 0x10, 0x05]),
            Ok(Command::Color(ColorCommand::StepHue(StepHue {
                mode: StepMode::Down,
                step_size: 0x10,
                transition_time: 5,
            })))
        );
        assert_eq!(
            Command::decode(
                COLOR_CLUSTER,
                0x4C,
                &[0x01, 0x0A, 0x00, 0x05, 0x00, 0x00, 0x00, 0x2C, 0x01]
            ),
            Ok(Command::Color(ColorCommand::StepColorTemperature(
                StepColorTemperature {
                    mode: StepMode::Up,
                    step_size: 10,
                    transition_time: 5,
                    min_mireds: 0,
                    max_mireds: 300,
                }
            )))
        );
        assert_eq!(
            Command::decode(COLOR_CLUSTER, 0x47, &[0x00, 0x00]),
            Ok(Command::Color(ColorCommand::StopMoveStep))
        );
    }

    #[test]
    fn test_decode_ignores_trailing_options() {
        assert_eq!(
            Command::decode(COLOR_CLUSTER, 0x01, &[0x01, 0x0A, 0x00, 0x00]),
            Command::decode(COLOR_CLUSTER, 0x01, &[0x01, 0x0A])
        );
    }

    #[test]
    fn test_decode_errors() {
        assert_eq!(
            Command::decode(COLOR_CLUSTER, 0x00, &[0x20]),
            Err(DecodeError::Truncated)
        );
        assert_eq!(
            Command::decode(COLOR_CLUSTER, 0x01, &[0x02, 0x0A]),
            Err(DecodeError::InvalidField)
        );
        assert_eq!(
            Command::decode(COLOR_CLUSTER, 0x30, &[]),
            Err(DecodeError::UnknownCommand(0x30))
        );
        assert_eq!(
            Command::decode(0x0004, 0x00, &[]),
            Err(DecodeError::UnknownCluster(0x0004))
        );
    }

    #[test]
    fn test_handle_frame() {
        let queue = CommandQueue::new();
        let mut light = light(&queue);

        assert_eq!(
            light.handle_frame(ENDPOINT, LEVEL_CLUSTER, 0x00, &[0x64, 0x00, 0x00]),
            Status::Success
        );
        assert_eq!(light.attributes().level.current_level, 0x64);

        // Undecodable frames are still answered with success
        assert_eq!(
            light.handle_frame(ENDPOINT, LEVEL_CLUSTER, 0x00, &[0x10]),
            Status::Success
        );
        assert_eq!(light.attributes().level.current_level, 0x64);
    }

    #[test]
    fn test_queued_commands_run_on_poll() {
        let queue: CommandQueue<QUEUE_SIZE> = CommandQueue::new();
        let sender = queue.sender();
        let mut light = light(&queue);

        sender
            .try_send(ENDPOINT, Command::OnOff(OnOffCommand::On))
            .unwrap();
        sender
            .try_send(
                OTHER_ENDPOINT,
                Command::Color(ColorCommand::MoveHue(MoveHue {
                    mode: MoveMode::Up,
                    rate: 10,
                })),
            )
            .unwrap();
        assert_eq!(queue.len(), 2);
        assert!(!light.attributes().on_off.on_off);

        let result = light.poll(at(0));
        assert!(queue.is_empty());
        assert!(light.attributes().on_off.on_off);
        assert!(light.driver().all_running());
        assert_eq!(result.next_deadline, None);
        assert_eq!(result.sleep_duration, None);
    }

    #[test]
    fn test_poll_reports_next_deadline() {
        let queue = CommandQueue::new();
        let mut light = light(&queue);

        queue
            .sender()
            .try_send(
                ENDPOINT,
                Command::Level(LevelCommand::MoveToLevel(MoveToLevel {
                    level: 10,
                    transition_time: 10,
                    with_on_off: false,
                })),
            )
            .unwrap();

        let result = light.poll(at(5));
        assert_eq!(result.next_deadline, Some(at(25)));
        assert_eq!(result.sleep_duration, Some(at(25) - at(5)));
    }

    #[test]
    fn test_queue_full_returns_command() {
        let queue: CommandQueue<1> = CommandQueue::new();
        let command = Command::OnOff(OnOffCommand::Off);
        queue.sender().try_send(ENDPOINT, command).unwrap();

        let rejected = CommandEnvelope {
            address: ENDPOINT,
            command: Command::OnOff(OnOffCommand::On),
        };
        assert_eq!(queue.try_send(rejected), Err(QueueFull(rejected)));
        assert_eq!(queue.try_receive().map(|envelope| envelope.command), Ok(command));
    }
}
