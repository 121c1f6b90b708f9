//! Dracula
//! https://draculatheme.com/

use ratatui::style::Color;

use crate::theme::Theme;

pub fn default() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x2a, 0x36),
        bg1: Color::Rgb(0x34, 0x37, 0x46),
        bg2: Color::Rgb(0x44, 0x47, 0x5a),
        fg0: Color::Rgb(0xf8, 0xf8, 0xf2),
        fg1: Color::Rgb(0xe6, 0xe6, 0xe6),
        grey0: Color::Rgb(0x62, 0x72, 0xa4),
        grey1: Color::Rgb(0xbf, 0xbf, 0xbf),
        accent: Color::Rgb(0xbd, 0x93, 0xf9),
        selection: Color::Rgb(0x44, 0x47, 0x5a),
        user: Color::Rgb(0x8b, 0xe9, 0xfd),
        bot: Color::Rgb(0x50, 0xfa, 0x7b),
        highlight: Color::Rgb(0xf1, 0xfa, 0x8c),
        error: Color::Rgb(0xff, 0x55, 0x55),
        success: Color::Rgb(0x50, 0xfa, 0x7b),
        warning: Color::Rgb(0xff, 0xb8, 0x6c),
        info: Color::Rgb(0x8b, 0xe9, 0xfd),
    }
}
