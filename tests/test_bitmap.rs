use quibble::bitmap::*;
use quibble::rng::Rng;

// ── transpose ─────────────────────────────────────────────────────────────────

#[test]
fn authored_sprites_survive_round_trip() {
    for sprite in [&TOM, &JERRY, &SUPER_JERRY, &CHEESE, &TRAP, &MILK, &DOOR, &FIREWORK] {
        let direct = DirectBitmap::from_rows(MAX_SIDE, sprite.rows);
        assert_eq!(direct.to_rows().as_slice(), sprite.rows);
    }
}

#[test]
fn arbitrary_full_width_patterns_are_involutive() {
    let mut rng = Rng::new(99);
    for height in 1..=MAX_SIDE {
        let rows: Vec<u8> = (0..height).map(|_| rng.next_u32() as u8).collect();
        let direct = DirectBitmap::from_rows(MAX_SIDE, &rows);
        assert_eq!(direct.to_rows().as_slice(), rows.as_slice());
    }
}

#[test]
fn narrow_patterns_keep_only_their_columns() {
    let mut rng = Rng::new(3);
    for cols in 1..MAX_SIDE {
        let mask = ((1u16 << cols) - 1) as u8;
        let rows: Vec<u8> = (0..4).map(|_| rng.next_u32() as u8 & mask).collect();
        let direct = DirectBitmap::from_rows(cols, &rows);
        assert_eq!(direct.cols(), cols);
        assert_eq!(direct.to_rows().as_slice(), rows.as_slice());
    }
}

// ── direct layout ─────────────────────────────────────────────────────────────

#[test]
fn column_bits_follow_rows() {
    // door: solid top row, hollow below
    let door = DirectBitmap::from_rows(MAX_SIDE, DOOR.rows);
    assert_eq!(door.column(0), 0b11111);
    assert_eq!(door.column(1), 0b00001);
    assert_eq!(door.column(4), 0b11111);
    assert_eq!(door.column(5), 0);
}

#[test]
fn sprite_boxes_match_authored_sizes() {
    let s = Sprites::prepare();
    assert_eq!((s.jerry.width, s.jerry.height), (5, 6));
    assert_eq!((s.tom.width, s.tom.height), (5, 7));
    assert_eq!((s.cheese.width, s.cheese.height), (3, 3));
    assert_eq!((s.door.width, s.door.height), (5, 5));
    assert_eq!((s.firework.width, s.firework.height), (1, 1));
}
