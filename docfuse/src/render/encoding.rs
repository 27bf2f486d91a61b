//! WinAnsiEncoding for the standard-14 fonts.
//!
//! Latin-1 maps onto itself except for the 0x80-0x9F block, where
//! Windows-1252 puts typographic punctuation. Anything else cannot be shown
//! by a non-embedded Type1 font and becomes `?`.

/// Byte for `c` in WinAnsiEncoding, if it has one.
pub fn winansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' => c as u8,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        _ => return None,
    };
    Some(byte)
}

/// Encode a line of text, replacing unmappable characters with `?`.
pub fn encode_winansi(text: &str) -> Vec<u8> {
    text.chars().map(|c| winansi_byte(c).unwrap_or(b'?')).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case('A', Some(0x41))]
    #[case('é', Some(0xE9))]
    #[case('•', Some(0x95))]
    #[case('€', Some(0x80))]
    #[case('\u{201C}', Some(0x93))]
    #[case('\u{A0}', Some(0xA0))]
    #[case('日', None)]
    #[case('\u{7}', None)]
    fn test_winansi_byte(#[case] c: char, #[case] expected: Option<u8>) {
        assert_eq!(winansi_byte(c), expected);
    }

    #[test]
    fn test_encode_replaces_unmappable() {
        assert_eq!(encode_winansi("a→b"), b"a?b".to_vec());
        assert_eq!(encode_winansi("• item"), vec![0x95, b' ', b'i', b't', b'e', b'm']);
    }
}
