//! Modes, sequencer slots, scripts, playback and the trigger pin.

mod common;

use embassy_futures::block_on;
use embassy_time::Duration;

use common::{setup, setup_with, FakeChip, FakeDelay, FakePin, Transaction};
use haptic_driver::registers::*;
use haptic_driver::{
    ActuatorType, HapticConfig, HapticDriver, HapticError, Library, Mode, Script, ScriptError,
    ScriptStep, SlotEntry, TriggerConfig, TriggerPolarity,
};

// ---------------------------------------------------------------------------
// Modes
// ---------------------------------------------------------------------------

#[test]
fn every_mode_reads_back_after_set() {
    let (mut haptic, chip, _) = setup();

    for mode in Mode::ALL {
        block_on(haptic.set_mode(mode)).unwrap();
        assert_eq!(haptic.mode(), mode);
        let expected = mode.register_value(TriggerPolarity::default());
        assert_eq!(chip.reg(MODE), expected, "{:?}", mode);
    }
}

#[test]
fn set_mode_index_rejects_unknown_modes() {
    let (mut haptic, chip, _) = setup();

    assert_eq!(block_on(haptic.set_mode_index(9)), Err(HapticError::InvalidMode));
    assert!(chip.log().is_empty());

    block_on(haptic.set_mode_index(1)).unwrap();
    assert_eq!(haptic.mode(), Mode::Stream);
    assert_eq!(chip.reg(MODE), 0x05);
}

#[test]
fn pwm_and_audio_switch_input_coupling() {
    let (mut haptic, chip, _) = setup();

    block_on(haptic.set_mode(Mode::Audio)).unwrap();
    assert_eq!(chip.reg(CONTROL3) & CONTROL3_N_PWM_ANALOG, CONTROL3_N_PWM_ANALOG);
    assert_eq!(chip.reg(CONTROL1) & CONTROL1_AC_COUPLE, CONTROL1_AC_COUPLE);

    block_on(haptic.set_mode(Mode::Pwm)).unwrap();
    assert_eq!(chip.reg(CONTROL3) & CONTROL3_N_PWM_ANALOG, 0);
    assert_eq!(chip.reg(CONTROL1) & CONTROL1_AC_COUPLE, 0);
    // Other control bits survive
    assert_eq!(chip.reg(CONTROL3), 0xA0);
    assert_eq!(chip.reg(CONTROL1), 0x93);
}

#[test]
fn gpio_mode_loads_trigger_sequence() {
    let config = HapticConfig {
        trigger: TriggerConfig {
            sequence_id: 3,
            polarity: TriggerPolarity::LevelHigh,
            ..TriggerConfig::default()
        },
        ..HapticConfig::default()
    };
    let (mut haptic, chip, _) = setup_with(config);

    block_on(haptic.set_mode(Mode::Gpio)).unwrap();

    assert_eq!(
        chip.log(),
        vec![
            Transaction::Write {
                register: WAVESEQ1,
                data: vec![3, 0],
            },
            Transaction::write(MODE, 0x02),
        ]
    );
    assert_eq!(haptic.script(), 3);
}

#[test]
fn failed_mode_write_keeps_cached_mode() {
    let (mut haptic, chip, _) = setup();
    chip.fail_after(0);

    assert!(block_on(haptic.set_mode(Mode::Stream)).is_err());
    assert_eq!(haptic.mode(), Mode::Register);
}

// ---------------------------------------------------------------------------
// Actuator and library
// ---------------------------------------------------------------------------

#[test]
fn actuator_type_only_touches_feedback_bit() {
    let (mut haptic, chip, _) = setup();

    block_on(haptic.set_actuator_type(ActuatorType::LraDma)).unwrap();
    assert_eq!(haptic.actuator_type(), ActuatorType::LraDma);
    assert_eq!(chip.reg(FEEDBACK), 0x36 | FEEDBACK_N_ERM_LRA);

    block_on(haptic.set_actuator_type_index(2)).unwrap();
    assert_eq!(haptic.actuator_type(), ActuatorType::ErmCoin);
    assert_eq!(chip.reg(FEEDBACK), 0x36);
}

#[test]
fn actuator_type_index_out_of_range() {
    let (mut haptic, chip, _) = setup();

    assert_eq!(
        block_on(haptic.set_actuator_type_index(5)),
        Err(HapticError::InvalidActuatorType)
    );
    assert_eq!(haptic.actuator_type(), ActuatorType::Erm);
    assert!(chip.log().is_empty());
}

#[test]
fn library_selection_keeps_high_impedance_bit() {
    let (mut haptic, chip, _) = setup();
    chip.set_reg(LIBRARY_SEL, LIBRARY_HI_Z | 0x01);

    block_on(haptic.set_library(Library::Lra)).unwrap();

    assert_eq!(chip.reg(LIBRARY_SEL), LIBRARY_HI_Z | 0x06);
    assert_eq!(haptic.config().library(), Library::Lra);
}

#[test]
fn realtime_value_goes_to_rtp_register() {
    let (mut haptic, chip, _) = setup();

    block_on(haptic.set_realtime_value(0x40)).unwrap();

    assert_eq!(chip.log(), vec![Transaction::write(RTP_INPUT, 0x40)]);
}

// ---------------------------------------------------------------------------
// Sequencer slots
// ---------------------------------------------------------------------------

#[test]
fn waveform_reads_back_what_was_written() {
    let (mut haptic, chip, _) = setup();

    for slot in 0..8 {
        block_on(haptic.set_waveform(slot, 10 + slot)).unwrap();
    }
    for slot in 0..8 {
        assert_eq!(block_on(haptic.waveform(slot)), Ok(10 + slot));
    }
    assert_eq!(chip.reg(WAVESEQ1 + 7), 17);
    assert_eq!(haptic.effect(), 17);
}

#[test]
fn waveform_rejects_bad_slot_and_effect() {
    let (mut haptic, chip, _) = setup();

    assert_eq!(block_on(haptic.set_waveform(8, 1)), Err(HapticError::InvalidSlot));
    assert_eq!(block_on(haptic.set_waveform(0, 124)), Err(HapticError::InvalidEffect));
    assert_eq!(block_on(haptic.waveform(8)), Err(HapticError::InvalidSlot));
    assert!(chip.log().is_empty());

    block_on(haptic.set_waveform(7, 123)).unwrap();
    block_on(haptic.set_waveform(0, 0)).unwrap();
}

#[test]
fn configured_slot_count_narrows_the_sequencer() {
    let config = HapticConfig {
        slot_count: 4,
        effects_max: 50,
        ..HapticConfig::default()
    };
    let (mut haptic, _, _) = setup_with(config);

    assert_eq!(block_on(haptic.set_waveform(4, 1)), Err(HapticError::InvalidSlot));
    assert_eq!(block_on(haptic.set_waveform(3, 51)), Err(HapticError::InvalidEffect));
    block_on(haptic.set_waveform(3, 50)).unwrap();
}

#[test]
fn wait_entries_decode_as_waits() {
    let (mut haptic, chip, _) = setup();

    block_on(haptic.set_wait(1, 25)).unwrap();
    assert_eq!(chip.reg(WAVESEQ1 + 1), 0x80 | 25);
    assert_eq!(block_on(haptic.waveform_entry(1)), Ok(SlotEntry::Wait(25)));
    assert_eq!(block_on(haptic.waveform_entry(2)), Ok(SlotEntry::Stop));

    assert_eq!(block_on(haptic.set_wait(1, 128)), Err(HapticError::InvalidEffect));
}

#[test]
fn bulk_slot_write_validates_every_entry() {
    let (mut haptic, chip, _) = setup();

    assert_eq!(
        block_on(haptic.write_waveforms(0, &[1, 200, 0])),
        Err(HapticError::InvalidEffect)
    );
    assert_eq!(
        block_on(haptic.write_waveforms(6, &[1, 2, 3])),
        Err(HapticError::InvalidSlot)
    );
    assert!(chip.log().is_empty());

    // Wait entries above the effect range are fine
    block_on(haptic.write_waveforms(0, &[47, 0x80 | 100, 47, 0])).unwrap();
    let mut entries = [0u8; 4];
    block_on(haptic.read_waveforms(0, &mut entries)).unwrap();
    assert_eq!(entries, [47, 0x80 | 100, 47, 0]);
}

// ---------------------------------------------------------------------------
// Scripts
// ---------------------------------------------------------------------------

#[test]
fn script_steps_apply_in_order() {
    let (mut haptic, chip, delay) = setup();
    chip.set_reg(CONTROL2, 0xF5);
    let script = Script::new()
        .write(RTP_INPUT, 0x11)
        .unwrap()
        .delay()
        .unwrap()
        .update(CONTROL2, 0x80, 0x00)
        .unwrap()
        .write(RTP_INPUT, 0x22)
        .unwrap();

    block_on(haptic.apply_script(&script)).unwrap();

    assert_eq!(
        chip.log(),
        vec![
            Transaction::write(RTP_INPUT, 0x11),
            Transaction::read(CONTROL2),
            Transaction::write(CONTROL2, 0x75),
            Transaction::write(RTP_INPUT, 0x22),
        ]
    );
    assert_eq!(delay.count(), 1);
    assert_eq!(delay.total_us(), 100_000);
}

#[test]
fn script_end_marker_stops_early() {
    let (mut haptic, chip, _) = setup();
    let script = Script::from_table(&[(RTP_INPUT, 1), (0xFF, 0), (RTP_INPUT, 2)]).unwrap();
    assert_eq!(script.steps(), &[ScriptStep::Write { register: RTP_INPUT, value: 1 }]);

    block_on(haptic.apply_script(&script)).unwrap();

    assert_eq!(chip.log(), vec![Transaction::write(RTP_INPUT, 1)]);
}

#[test]
fn script_aborts_on_first_failure() {
    let (mut haptic, chip, _) = setup();
    let script = Script::new()
        .write(RTP_INPUT, 1)
        .unwrap()
        .write(RATED_VOLTAGE, 2)
        .unwrap()
        .write(OVERDRIVE_CLAMP, 3)
        .unwrap();
    chip.fail_after(1);

    assert!(block_on(haptic.apply_script(&script)).is_err());

    // The first step stays applied, nothing after the failure is sent
    assert_eq!(chip.reg(RTP_INPUT), 1);
    assert_eq!(chip.reg(OVERDRIVE_CLAMP), 0);
    assert_eq!(chip.state.borrow().attempts, 2);
}

#[test]
fn script_rejects_registers_outside_the_map() {
    assert_eq!(
        Script::new().write(0x23, 0).err(),
        Some(ScriptError::InvalidRegister(0x23))
    );
}

#[test]
fn select_script_loads_sequence_and_terminator() {
    let (mut haptic, chip, _) = setup();

    block_on(haptic.select_script(12)).unwrap();

    assert_eq!(haptic.script(), 12);
    assert_eq!(
        chip.log(),
        vec![Transaction::Write {
            register: WAVESEQ1,
            data: vec![12, 0],
        }]
    );
}

#[test]
fn select_script_rejects_index_above_max() {
    let (mut haptic, chip, _) = setup();

    assert_eq!(
        block_on(haptic.select_script(haptic.scripts_max() + 1)),
        Err(HapticError::InvalidScript)
    );
    assert_eq!(haptic.script(), 7);
    assert!(chip.log().is_empty());
}

#[test]
fn play_script_index_selects_then_starts() {
    let (mut haptic, chip, _) = setup();

    block_on(haptic.play_script_index(1)).unwrap();

    assert_eq!(
        chip.log(),
        vec![
            Transaction::Write {
                register: WAVESEQ1,
                data: vec![1, 0],
            },
            Transaction::write(GO, GO_BIT),
        ]
    );
    assert!(haptic.is_started());
}

// ---------------------------------------------------------------------------
// Playback
// ---------------------------------------------------------------------------

#[test]
fn go_then_stop_is_exactly_two_writes() {
    let (mut haptic, chip, _) = setup();

    block_on(haptic.go()).unwrap();
    assert!(haptic.is_started());
    block_on(haptic.stop()).unwrap();
    assert!(!haptic.is_started());

    assert_eq!(
        chip.log(),
        vec![Transaction::write(GO, 1), Transaction::write(GO, 0)]
    );
}

#[test]
fn completion_is_polled_at_the_configured_interval() {
    let (mut haptic, chip, delay) = setup();
    chip.state.borrow_mut().go_busy_reads = Some(2);

    block_on(haptic.go()).unwrap();
    block_on(haptic.wait_for_completion(Duration::from_millis(100))).unwrap();

    assert!(!haptic.is_started());
    assert!(!block_on(haptic.is_playing()).unwrap());
    assert_eq!(delay.count(), 2);
    assert_eq!(delay.total_us(), 20_000);
}

#[test]
fn completion_times_out_when_go_never_clears() {
    let (mut haptic, chip, delay) = setup();

    block_on(haptic.go()).unwrap();
    assert_eq!(
        block_on(haptic.wait_for_completion(Duration::from_millis(30))),
        Err(HapticError::Timeout)
    );
    assert!(block_on(haptic.is_playing()).unwrap());
    assert_eq!(delay.total_us(), 30_000);
    assert!(chip.reg(GO) & GO_BIT != 0);
}

// ---------------------------------------------------------------------------
// Trigger pin
// ---------------------------------------------------------------------------

#[test]
fn trigger_without_pin_is_an_error() {
    let (mut haptic, _, _) = setup();

    assert_eq!(haptic.set_trigger(true), Err(HapticError::NoTriggerPin));
    assert_eq!(block_on(haptic.fire_trigger()), Err(HapticError::NoTriggerPin));
}

#[test]
fn fire_trigger_pulses_the_active_level() {
    let chip = FakeChip::new();
    let delay = FakeDelay::default();
    let pin = FakePin::default();
    let config = HapticConfig {
        trigger: TriggerConfig {
            polarity: TriggerPolarity::LevelLow,
            ..TriggerConfig::default()
        },
        ..HapticConfig::default()
    };
    let mut haptic = HapticDriver::with_trigger_pin(chip.clone(), delay.clone(), pin.clone(), config);

    block_on(haptic.fire_trigger()).unwrap();

    // Active-low: asserted drives the pin low
    assert_eq!(pin.history(), vec![false, true]);
    assert_eq!(delay.total_us(), 1_000);
    assert!(chip.log().is_empty());
}
