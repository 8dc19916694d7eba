/// A color for terminal output.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Color {
    Cyan,
    Green,
    Magenta,
    Red,
    White,
    Yellow,
}

#[cfg(feature = "console")]
fn write_text(text: &str, color: Option<Color>) {
    if console::colors_enabled() {
        if let Some(clr) = color {
            let styled = console::style(text).bright();
            let colored = match clr {
                Color::Cyan => styled.cyan(),
                Color::Green => styled.green(),
                Color::Magenta => styled.magenta(),
                Color::Red => styled.red(),
                Color::White => styled.white(),
                Color::Yellow => styled.yellow(),
            };
            print!("{}", colored);
            return;
        }
    }

    print!("{}", text);
}

#[cfg(not(feature = "console"))]
fn write_text(text: &str, _color: Option<Color>) {
    print!("{}", text);
}

/// Outputs text, optionally in a given color, padded with spaces at the end to the given width.
pub fn write_in_color<S: AsRef<str>>(text: S, color: Option<Color>, pad_to: usize) {
    let mut padded = String::from(text.as_ref());
    while padded.len() < pad_to {
        padded.push(' ');
    }
    write_text(&padded, color);
}
