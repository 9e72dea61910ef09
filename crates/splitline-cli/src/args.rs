use clap::Parser;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Html,
    Preview,
}

/// Split text into character, word and line wrappers and print the resulting HTML
#[derive(Parser, Debug, Clone, Default, PartialEq)]
#[command(name = "splitline")]
#[command(version)]
pub struct Args {
    /// Container width in pixels, `120` or `120px` (default: from config)
    #[arg(long, value_name = "PX", value_parser = parse_width)]
    pub width: Option<f32>,

    /// Reveal the split text in the terminal instead
    #[arg(long, conflicts_with = "html")]
    pub preview: bool,

    /// Print the split HTML (default)
    #[arg(long)]
    pub html: bool,

    /// Class for character wrappers
    #[arg(long, value_name = "NAME")]
    pub char_class: Option<String>,

    /// Class for word wrappers
    #[arg(long, value_name = "NAME")]
    pub word_class: Option<String>,

    /// Class for line wrappers
    #[arg(long, value_name = "NAME")]
    pub line_class: Option<String>,

    /// Text to split, read from stdin when omitted
    #[arg(value_name = "TEXT")]
    pub text: Vec<String>,
}

impl Args {
    pub fn mode(&self) -> Mode {
        if self.preview {
            Mode::Preview
        } else {
            Mode::Html
        }
    }

    /// Positional words joined by single spaces, `None` means read stdin
    pub fn joined_text(&self) -> Option<String> {
        (!self.text.is_empty()).then(|| self.text.join(" "))
    }
}

fn parse_width(value: &str) -> Result<f32, String> {
    let width: f32 = value
        .trim_end_matches("px")
        .parse()
        .map_err(|_| format!("invalid width '{value}'"))?;
    if width > 0.0 {
        Ok(width)
    } else {
        Err(format!("width must be positive, got {value}"))
    }
}
