use ratatui::style::Color;

/// Colors used by the viewer widgets
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub grey2: Color,

    /// Outline of the frame the camera is on
    pub current_cell: Color,
    /// Outline of every other frame
    pub cell: Color,
    /// Status bar hint while the camera moves
    pub moving: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        // Gruvbox Dark
        Self {
            bg0: Color::Rgb(0x28, 0x28, 0x28),
            bg2: Color::Rgb(0x45, 0x40, 0x3d),
            fg0: Color::Rgb(0xd4, 0xbe, 0x98),
            grey2: Color::Rgb(0xa8, 0x99, 0x84),
            current_cell: Color::Rgb(0xd8, 0xa6, 0x57),
            cell: Color::Rgb(0x7d, 0xae, 0xa3),
            moving: Color::Rgb(0xe7, 0x8a, 0x4e),
            error: Color::Rgb(0xea, 0x69, 0x62),
        }
    }
}
