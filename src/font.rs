//! Fixed 3x5 bitmap font for framebuffer text
//!
//! Glyphs are packed row-major into a `u16`: bit `y * 3 + x` is the pixel
//! at `(x, y)` with the origin at the top-left. Letters map case-insensitively
//! to a single set of shapes. Characters without a glyph are skipped by the
//! framebuffer, advancing the pen as if they were drawn.

pub(crate) const GLYPH_WIDTH: u32 = 3;
pub(crate) const GLYPH_HEIGHT: u32 = 5;

/// Horizontal pen advance per character (glyph plus one column of spacing).
pub(crate) const GLYPH_PITCH: i32 = 4;

/// Pack five 3-bit rows (written MSB-leftmost) into glyph bits.
const fn rows(r0: u16, r1: u16, r2: u16, r3: u16, r4: u16) -> u16 {
    rev3(r0) | rev3(r1) << 3 | rev3(r2) << 6 | rev3(r3) << 9 | rev3(r4) << 12
}

const fn rev3(r: u16) -> u16 {
    ((r & 0b100) >> 2) | (r & 0b010) | ((r & 0b001) << 2)
}

/// Whether pixel `(x, y)` of a glyph is lit.
pub(crate) fn pixel_set(bits: u16, x: u32, y: u32) -> bool {
    x < GLYPH_WIDTH && y < GLYPH_HEIGHT && bits & (1 << (y * GLYPH_WIDTH + x)) != 0
}

/// Look up the bitmap for a character, if the font covers it.
pub(crate) fn glyph(c: char) -> Option<u16> {
    let bits = match c.to_ascii_lowercase() {
        ' ' => rows(0b000, 0b000, 0b000, 0b000, 0b000),
        '0' => rows(0b111, 0b101, 0b101, 0b101, 0b111),
        '1' => rows(0b010, 0b110, 0b010, 0b010, 0b111),
        '2' => rows(0b111, 0b001, 0b111, 0b100, 0b111),
        '3' => rows(0b111, 0b001, 0b011, 0b001, 0b111),
        '4' => rows(0b101, 0b101, 0b111, 0b001, 0b001),
        '5' => rows(0b111, 0b100, 0b111, 0b001, 0b111),
        '6' => rows(0b111, 0b100, 0b111, 0b101, 0b111),
        '7' => rows(0b111, 0b001, 0b001, 0b001, 0b001),
        '8' => rows(0b111, 0b101, 0b111, 0b101, 0b111),
        '9' => rows(0b111, 0b101, 0b111, 0b001, 0b111),
        'a' => rows(0b111, 0b101, 0b111, 0b101, 0b101),
        'b' => rows(0b110, 0b101, 0b110, 0b101, 0b110),
        'c' => rows(0b011, 0b100, 0b100, 0b100, 0b011),
        'd' => rows(0b110, 0b101, 0b101, 0b101, 0b110),
        'e' => rows(0b111, 0b100, 0b110, 0b100, 0b111),
        'f' => rows(0b111, 0b100, 0b110, 0b100, 0b100),
        'g' => rows(0b011, 0b100, 0b101, 0b101, 0b011),
        'h' => rows(0b101, 0b101, 0b111, 0b101, 0b101),
        'i' => rows(0b111, 0b010, 0b010, 0b010, 0b111),
        'j' => rows(0b011, 0b001, 0b001, 0b101, 0b010),
        'k' => rows(0b101, 0b101, 0b110, 0b101, 0b101),
        'l' => rows(0b100, 0b100, 0b100, 0b100, 0b111),
        'm' => rows(0b101, 0b111, 0b111, 0b101, 0b101),
        'n' => rows(0b110, 0b101, 0b101, 0b101, 0b101),
        'o' => rows(0b010, 0b101, 0b101, 0b101, 0b010),
        'p' => rows(0b110, 0b101, 0b110, 0b100, 0b100),
        'q' => rows(0b010, 0b101, 0b101, 0b110, 0b011),
        'r' => rows(0b110, 0b101, 0b110, 0b101, 0b101),
        's' => rows(0b011, 0b100, 0b010, 0b001, 0b110),
        't' => rows(0b111, 0b010, 0b010, 0b010, 0b010),
        'u' => rows(0b101, 0b101, 0b101, 0b101, 0b111),
        'v' => rows(0b101, 0b101, 0b101, 0b101, 0b010),
        'w' => rows(0b101, 0b101, 0b111, 0b111, 0b101),
        'x' => rows(0b101, 0b101, 0b010, 0b101, 0b101),
        'y' => rows(0b101, 0b101, 0b010, 0b010, 0b010),
        'z' => rows(0b111, 0b001, 0b010, 0b100, 0b111),
        '!' => rows(0b010, 0b010, 0b010, 0b000, 0b010),
        '?' => rows(0b110, 0b001, 0b010, 0b000, 0b010),
        '.' => rows(0b000, 0b000, 0b000, 0b000, 0b010),
        ',' => rows(0b000, 0b000, 0b000, 0b010, 0b100),
        ':' => rows(0b000, 0b010, 0b000, 0b010, 0b000),
        '-' => rows(0b000, 0b000, 0b111, 0b000, 0b000),
        '+' => rows(0b000, 0b010, 0b111, 0b010, 0b000),
        '/' => rows(0b001, 0b001, 0b010, 0b100, 0b100),
        '\'' => rows(0b010, 0b100, 0b000, 0b000, 0b000),
        '"' => rows(0b101, 0b101, 0b000, 0b000, 0b000),
        '%' => rows(0b101, 0b001, 0b010, 0b100, 0b101),
        '=' => rows(0b000, 0b111, 0b000, 0b111, 0b000),
        '(' => rows(0b010, 0b100, 0b100, 0b100, 0b010),
        ')' => rows(0b010, 0b001, 0b001, 0b001, 0b010),
        '°' => rows(0b110, 0b110, 0b000, 0b000, 0b000),
        _ => return None,
    };
    Some(bits)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letters_are_case_insensitive() {
        assert_eq!(glyph('a'), glyph('A'));
        assert_eq!(glyph('z'), glyph('Z'));
    }

    #[test]
    fn uncovered_characters_have_no_glyph() {
        assert_eq!(glyph('€'), None);
        assert_eq!(glyph('\n'), None);
    }

    #[test]
    fn pixel_addressing_matches_row_order() {
        // 'l' is a left column with a full bottom row.
        let l = glyph('l').unwrap();
        for y in 0..GLYPH_HEIGHT {
            assert!(pixel_set(l, 0, y));
        }
        assert!(pixel_set(l, 2, 4));
        assert!(!pixel_set(l, 2, 0));
        // Out of glyph bounds is never lit.
        assert!(!pixel_set(l, 3, 0));
        assert!(!pixel_set(l, 0, 5));
    }

    #[test]
    fn space_is_blank_but_present() {
        let space = glyph(' ').unwrap();
        for y in 0..GLYPH_HEIGHT {
            for x in 0..GLYPH_WIDTH {
                assert!(!pixel_set(space, x, y));
            }
        }
    }
}
