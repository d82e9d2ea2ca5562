//! Code 128 set B symbol encoding
//!
//! Converts text into the sequence of symbol values (start, data, checksum,
//! stop) and expands those into individual modules, `true` for a bar and
//! `false` for a space.

use crate::error::EncodingError;

/// Symbol value of the "Start B" character
pub const START_B: u8 = 104;

/// Symbol value of the stop character
pub const STOP: u8 = 106;

/// Blank modules required on either side of the symbol
pub const QUIET_ZONE: usize = 10;

/// Bar/space widths for every symbol value, starting with a bar
const PATTERNS: [&str; 107] = [
    "212222", "222122", "222221", "121223", "121322", "131222", "122213", "122312", "132212",
    "221213", "221312", "231212", "112232", "122132", "122231", "113222", "123122", "123221",
    "223211", "221132", "221231", "213212", "223112", "312131", "311222", "321122", "321221",
    "312212", "322112", "322211", "212123", "212321", "232121", "111323", "131123", "131321",
    "112313", "132113", "132311", "211313", "231113", "231311", "112133", "112331", "132131",
    "113123", "113321", "133121", "313121", "211331", "231131", "213113", "213311", "213131",
    "311123", "311321", "331121", "312113", "312311", "332111", "314111", "221411", "431111",
    "111224", "111422", "121124", "121421", "141122", "141221", "112214", "112412", "122114",
    "122411", "142112", "142211", "241211", "221114", "413111", "241112", "134111", "111242",
    "121142", "121241", "114212", "124112", "124211", "411212", "421112", "421211", "212141",
    "214121", "412121", "111143", "111341", "131141", "114113", "114311", "411113", "411311",
    "113141", "114131", "311141", "411131", "211412", "211214", "211232", "2331112",
];

/// Encode text as Code 128-B symbol values
///
/// # Parameters
/// * `data` - Text made of ASCII characters 32 through 127
///
/// # Returns
/// * `Ok(Vec<u8>)` - Start, data, checksum and stop symbol values
/// * `Err(EncodingError)` - The text is empty or contains an unsupported character
pub fn symbol_values(data: &str) -> Result<Vec<u8>, EncodingError> {
    if data.is_empty() {
        return Err(EncodingError::Empty);
    }

    let mut values = Vec::with_capacity(data.len() + 3);
    values.push(START_B);

    for (position, character) in data.chars().enumerate() {
        let code = u32::from(character);
        if !(32..=127).contains(&code) {
            return Err(EncodingError::UnsupportedCharacter {
                character,
                position,
            });
        }
        values.push((code - 32) as u8);
    }

    values.push(checksum(&values));
    values.push(STOP);

    Ok(values)
}

/// Weighted modulo-103 checksum over the start symbol and the data symbols
fn checksum(values: &[u8]) -> u8 {
    let sum: usize = values
        .iter()
        .enumerate()
        .map(|(i, &value)| i.max(1) * usize::from(value))
        .sum();
    (sum % 103) as u8
}

/// Expand symbol values into modules, including the quiet zones
pub fn modules(values: &[u8]) -> Vec<bool> {
    let mut modules = vec![false; QUIET_ZONE];

    for &value in values {
        let pattern = PATTERNS[usize::from(value)];
        for (i, width) in pattern.bytes().enumerate() {
            let is_bar = i % 2 == 0;
            let width = usize::from(width - b'0');
            modules.extend(std::iter::repeat(is_bar).take(width));
        }
    }

    modules.extend(std::iter::repeat(false).take(QUIET_ZONE));
    modules
}
