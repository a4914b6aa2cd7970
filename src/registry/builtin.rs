//! Builtin style tables.

use crate::error::Result;
use crate::types::{level_cube, Colour, Palette, QuantizeMode, UpscaleMode};

const GAME_BOY: [Colour; 4] = [
    Colour::rgb(15, 56, 15),
    Colour::rgb(48, 98, 48),
    Colour::rgb(139, 172, 15),
    Colour::rgb(155, 188, 15),
];

const CGA: [Colour; 16] = [
    Colour::rgb(0, 0, 0),
    Colour::rgb(0, 0, 170),
    Colour::rgb(0, 170, 0),
    Colour::rgb(0, 170, 170),
    Colour::rgb(170, 0, 0),
    Colour::rgb(170, 0, 170),
    Colour::rgb(170, 85, 0),
    Colour::rgb(170, 170, 170),
    Colour::rgb(85, 85, 85),
    Colour::rgb(85, 85, 255),
    Colour::rgb(85, 255, 85),
    Colour::rgb(85, 255, 255),
    Colour::rgb(255, 85, 85),
    Colour::rgb(255, 85, 255),
    Colour::rgb(255, 255, 85),
    Colour::rgb(255, 255, 255),
];

/// 4 levels per channel, 64 colours.
pub const NES_LEVELS: [u8; 4] = [0, 85, 170, 255];

/// 6 levels per channel, 216 colours.
pub const SNES_LEVELS: [u8; 6] = [0, 51, 102, 153, 204, 255];

#[rustfmt::skip]
const VINTAGE_CRT: [[u8; 3]; 40] = [
    // sepia ramp
    [44, 33, 24], [67, 52, 38], [95, 75, 56], [120, 97, 72], [150, 120, 90],
    [180, 148, 108], [210, 178, 130], [235, 210, 160], [250, 235, 200], [255, 248, 230],
    // rust
    [80, 45, 30], [110, 60, 35], [140, 80, 40], [170, 100, 50], [200, 130, 65],
    // khaki
    [60, 50, 40], [90, 80, 60], [130, 115, 85], [170, 155, 120], [210, 195, 160],
    // brick
    [50, 35, 35], [80, 50, 45], [110, 70, 55], [145, 90, 65], [180, 115, 80],
    // slate
    [40, 40, 50], [65, 65, 80], [90, 90, 110], [120, 115, 140], [155, 150, 175],
    // moss
    [55, 70, 55], [80, 100, 75], [110, 135, 100], [145, 170, 130], [180, 200, 165],
    // plum
    [70, 55, 70], [100, 80, 95], [135, 110, 125], [170, 145, 160], [200, 180, 190],
];

#[rustfmt::skip]
const MINIMAL_FLAT: [[u8; 3]; 36] = [
    // paper and ink
    [255, 255, 255], [250, 250, 248], [240, 240, 237], [227, 226, 224], [211, 209, 203],
    [159, 164, 169], [145, 145, 142], [120, 119, 116], [93, 93, 90], [55, 53, 47],
    [235, 236, 233], [241, 241, 239],
    // yellow
    [253, 236, 200], [250, 222, 166], [245, 200, 120],
    // red
    [255, 226, 221], [245, 195, 185], [235, 160, 150],
    // pink
    [253, 222, 238], [245, 190, 220], [235, 155, 200],
    // purple
    [232, 222, 250], [210, 195, 240], [185, 165, 225],
    // blue
    [211, 229, 239], [175, 210, 230], [140, 190, 220],
    // green
    [219, 237, 219], [185, 220, 185], [150, 200, 150],
    // orange
    [255, 243, 221], [245, 225, 185], [230, 200, 150],
    // lavender
    [245, 235, 255], [230, 220, 245], [215, 200, 235],
];

/// Build every builtin palette, in listing order.
pub fn all() -> Result<Vec<Palette>> {
    Ok(vec![
        Palette::new(
            "1bit",
            "1-Bit",
            "Monochrome",
            vec![Colour::BLACK, Colour::WHITE],
            QuantizeMode::Threshold2,
            UpscaleMode::Hard,
        )?,
        Palette::new(
            "2bit",
            "2-Bit",
            "Game Boy",
            GAME_BOY.to_vec(),
            QuantizeMode::Threshold4,
            UpscaleMode::Hard,
        )?,
        Palette::new(
            "4bit",
            "4-Bit",
            "CGA",
            CGA.to_vec(),
            QuantizeMode::Nearest,
            UpscaleMode::Hard,
        )?,
        Palette::new(
            "8bit",
            "8-Bit",
            "NES",
            level_cube(&NES_LEVELS),
            QuantizeMode::Nearest,
            UpscaleMode::Hard,
        )?,
        Palette::new(
            "16bit",
            "16-Bit",
            "SNES",
            level_cube(&SNES_LEVELS),
            QuantizeMode::Nearest,
            UpscaleMode::Hard,
        )?,
        Palette::new(
            "retro",
            "Retro",
            "Vintage CRT",
            VINTAGE_CRT.iter().copied().map(Colour::from).collect(),
            QuantizeMode::Nearest,
            UpscaleMode::Hard,
        )?,
        Palette::new(
            "notion",
            "Notion",
            "Minimal Flat",
            MINIMAL_FLAT.iter().copied().map(Colour::from).collect(),
            QuantizeMode::Nearest,
            UpscaleMode::Smooth,
        )?,
    ])
}
