//! Startup banner: "SIGNAL SCAN" in figlet's standard font, shaded row by row.

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use figlet_rs::FIGfont;
use std::io::{self, Write, stdout};
use tracing::debug;

const TITLE: &str = "SIGNAL SCAN";

/// Two-stop vertical shade, alert red at the top fading to scanner cyan.
#[derive(Debug, Clone, Copy)]
struct Shade {
    top: [u8; 3],
    bottom: [u8; 3],
}

const SHADE: Shade = Shade {
    top: [0xff, 0x5f, 0x57],
    bottom: [0x0f, 0xf0, 0xfc],
};

impl Shade {
    /// Color for `row` of `rows`. A single row gets the bottom color.
    fn row_color(self, row: usize, rows: usize) -> Color {
        let span = rows.saturating_sub(1);
        let t = if span == 0 {
            1.0
        } else {
            row.min(span) as f64 / span as f64
        };
        let mix = |from: u8, to: u8| {
            (f64::from(from) + (f64::from(to) - f64::from(from)) * t).round() as u8
        };
        Color::Rgb {
            r: mix(self.top[0], self.bottom[0]),
            g: mix(self.top[1], self.bottom[1]),
            b: mix(self.top[2], self.bottom[2]),
        }
    }

    fn tail(self) -> Color {
        let [r, g, b] = self.bottom;
        Color::Rgb { r, g, b }
    }
}

fn art_rows() -> Vec<String> {
    match FIGfont::standard() {
        Ok(font) => font
            .convert(TITLE)
            .map(|fig| fig.to_string().lines().map(str::to_string).collect())
            .unwrap_or_else(|| vec![TITLE.to_string()]),
        Err(_) => vec![TITLE.to_string()],
    }
}

fn write_banner<W: Write>(out: &mut W, rows: &[String]) -> io::Result<()> {
    for (row, text) in rows.iter().enumerate() {
        queue!(
            out,
            SetForegroundColor(SHADE.row_color(row, rows.len())),
            Print(text),
            Print("\r\n")
        )?;
    }
    queue!(
        out,
        SetForegroundColor(SHADE.tail()),
        Print(format!(
            "v{}  competitor signal scanner\r\n",
            env!("CARGO_PKG_VERSION")
        )),
        ResetColor
    )?;
    out.flush()
}

pub fn print_welcome() {
    if let Err(e) = write_banner(&mut stdout(), &art_rows()) {
        debug!(error = %e, "banner not printed");
    }
}
