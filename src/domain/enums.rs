use ratatui::style::Color;

/// Pomodoro countdown mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Mode {
    Work,
    ShortBreak,
    LongBreak,
}

impl Mode {
    /// Display label shown above the countdown
    pub fn label(&self) -> &'static str {
        match self {
            Self::Work => "Work",
            Self::ShortBreak => "Short Break",
            Self::LongBreak => "Long Break",
        }
    }

    /// Accent color for the progress gauge
    pub fn color(&self) -> Color {
        match self {
            Self::Work => Color::Rgb(0x4C, 0xAF, 0x50),
            Self::ShortBreak => Color::Rgb(0x1E, 0x90, 0xFF),
            Self::LongBreak => Color::Rgb(0x8A, 0x2B, 0xE2),
        }
    }

    pub fn is_break(&self) -> bool {
        matches!(self, Self::ShortBreak | Self::LongBreak)
    }
}

/// UI mode for the to-do window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    AddingTask,
    EditingTask,
    ConfirmDelete,
    ConfirmClear,
}

impl UiMode {
    /// Whether the input form owns the keyboard
    pub fn is_form(&self) -> bool {
        matches!(self, Self::AddingTask | Self::EditingTask)
    }

    /// Whether a yes/no confirmation is showing
    pub fn is_confirm(&self) -> bool {
        matches!(self, Self::ConfirmDelete | Self::ConfirmClear)
    }
}
