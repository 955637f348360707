//! Text splitting for per-glyph reveals
//!
//! Headlines animated with the character preset are split into glyph units.
//! Combining marks, variation selectors and zero-width joiners stay attached
//! to the glyph they modify. Whitespace keeps its slot in the layout but is
//! never animated.

/// One visual unit of a split string
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphUnit {
    /// Position among all units, whitespace included
    pub index: u32,
    pub text: String,
    /// Position among animated units; `None` for whitespace
    pub order: Option<u32>,
}

impl GlyphUnit {
    pub fn is_animated(&self) -> bool {
        self.order.is_some()
    }
}

fn extends_previous(c: char) -> bool {
    matches!(c,
        '\u{0300}'..='\u{036F}'
        | '\u{1AB0}'..='\u{1AFF}'
        | '\u{1DC0}'..='\u{1DFF}'
        | '\u{20D0}'..='\u{20FF}'
        | '\u{FE00}'..='\u{FE0F}'
        | '\u{FE20}'..='\u{FE2F}'
        | '\u{200D}'
        | '\u{1F3FB}'..='\u{1F3FF}'
    )
}

/// Split text into glyph units
pub fn split_glyphs(text: &str) -> Vec<GlyphUnit> {
    let mut clusters: Vec<String> = Vec::new();
    let mut join_next = false;
    for c in text.chars() {
        match clusters.last_mut() {
            Some(last) if join_next || extends_previous(c) => {
                last.push(c);
                join_next = c == '\u{200D}';
            }
            _ => {
                clusters.push(c.to_string());
                join_next = false;
            }
        }
    }

    let mut animated = 0u32;
    clusters
        .into_iter()
        .enumerate()
        .map(|(index, text)| {
            let order = if text.chars().all(char::is_whitespace) {
                None
            } else {
                animated += 1;
                Some(animated - 1)
            };
            GlyphUnit {
                index: index as u32,
                text,
                order,
            }
        })
        .collect()
}

/// Number of units that will animate
pub fn animated_count(units: &[GlyphUnit]) -> usize {
    units.iter().filter(|unit| unit.is_animated()).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spaces_hold_position_but_do_not_animate() {
        let units = split_glyphs("Hi there");
        assert_eq!(units.len(), 8);
        assert_eq!(units[2].text, " ");
        assert!(!units[2].is_animated());
        assert_eq!(units[3].order, Some(2));
        assert_eq!(animated_count(&units), 7);
    }

    #[test]
    fn test_combining_marks_stay_attached() {
        let units = split_glyphs("e\u{0301}a");
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].text, "e\u{0301}");
    }

    #[test]
    fn test_zwj_sequence_is_one_unit() {
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let units = split_glyphs(&format!("{family}!"));
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].text, family);
    }

    #[test]
    fn test_empty_text() {
        assert!(split_glyphs("").is_empty());
    }
}
