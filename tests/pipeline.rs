use papertape::random::random_tape;
use papertape::{FIGS, LTRS, NUL, RenderOptions, Tape, TapeWidth, TitleStyle};
use pretty_assertions::assert_eq;

#[test]
fn baudot_message_renders_on_five_level_tape() {
    let mut tape = Tape::encode_ita2(b"RY 73");
    assert_eq!(tape.as_bytes(), &[LTRS, 0x0A, 0x15, 0x04, FIGS, 0x1C, 0x10]);
    tape.add_leader(2, NUL);
    tape.add_trailer(1, NUL);

    let art = tape.render_ascii(&RenderOptions::new(TapeWidth::Level5));
    let expected = "\
+------+
|   .  |
|   .  |
|ooo.oo|
| o .o |
|o o. o|
|  o.  |
|oo .oo|
|  o.oo|
|   . o|
|   .  |
+------+
";
    assert_eq!(art, expected);
    assert_eq!(tape.decode_ita2(), b"\0\0RY 73\0".to_vec());
}

#[test]
fn source_tape_cleanup() {
    let mut tape = Tape::from_bytes(b"\0\0\0PRINT\r\n\0\0".to_vec());
    tape.pad_crlf();
    tape.set_msb_except_nul();
    assert_eq!(&tape.as_bytes()[..4], &[0x00, 0x00, 0x00, 0xD0]);
    assert_eq!(tape.len(), 3 + 5 + 2 + 2 + 2);

    tape.trim(NUL);
    assert_eq!(tape.to_text(), b"PRINT\r\n\x7f\x7f".to_vec());
}

#[test]
fn parity_tape_has_even_rows() {
    let mut tape = random_tape(256, 99);
    tape.apply_even_parity(TapeWidth::Level8);
    assert!(tape.as_bytes().iter().all(|b| b.count_ones() % 2 == 0));

    let mut five = random_tape(256, 99);
    five.apply_even_parity(TapeWidth::Level5);
    assert!(five.as_bytes().iter().all(|b| (b & 0x1F).count_ones() % 2 == 0));
}

#[test]
fn inverting_twice_restores_tape() {
    let original = random_tape(64, 3);
    let mut tape = original.clone();
    tape.invert();
    assert_ne!(tape, original);
    tape.invert();
    assert_eq!(tape, original);
}

#[test]
fn titled_tape_summary_serialises() {
    let mut tape = Tape::from_bytes(b"HI".to_vec());
    tape.add_title("A", TitleStyle::default());
    let summary = tape.summary(TapeWidth::Level8);
    assert_eq!(summary.rows, 1 + 6 + 2);

    let json = serde_json::to_value(&summary).unwrap();
    assert_eq!(json["rows"], 9);
    assert_eq!(json["level"], 8);
    assert_eq!(json["sha256"], tape.digest());
}
