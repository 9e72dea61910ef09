mod args;
mod preview;

use anyhow::{Context, Result};
use clap::Parser;
use args::{Args, Mode};
use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use preview::RevealPlan;
use ratatui::{Terminal, backend::CrosstermBackend};
use splitline_config::Config;
use splitline_engine::{Document, InlineFlowLayout, NodeId, SplitOptions, SplitResult, split_text};
use std::io::{Read, stdout};

const TARGET_ID: &str = "split-target";

/// A document holding one split container
struct SplitDocument {
    doc: Document,
    container: NodeId,
    result: SplitResult,
}

impl SplitDocument {
    fn build(
        text: &str,
        width: f32,
        options: &SplitOptions,
        layout: InlineFlowLayout,
    ) -> Result<Self> {
        let mut doc = Document::new();
        let container = doc.create_element("div");
        doc.set_attribute(container, "id", TARGET_ID);
        doc.set_attribute(container, "style", &format!("width: {width}px"));
        doc.set_text_content(container, text);
        let root = doc.root();
        doc.append_child(root, container);

        let result = split_text(&mut doc, format!("#{TARGET_ID}"), options, layout)
            .context("Failed to split text")?;
        Ok(Self {
            doc,
            container,
            result,
        })
    }
}

fn split_options(config: &Config, args: &Args) -> SplitOptions {
    let mut options = config.split_options();
    if let Some(class) = &args.char_class {
        options = options.with_char_class(class.as_str());
    }
    if let Some(class) = &args.word_class {
        options = options.with_word_class(class.as_str());
    }
    if let Some(class) = &args.line_class {
        options = options.with_line_class(class.as_str());
    }
    options
}

fn read_text(args: &Args) -> Result<String> {
    if let Some(text) = args.joined_text() {
        return Ok(text);
    }
    let mut text = String::new();
    std::io::stdin()
        .read_to_string(&mut text)
        .context("Failed to read text from stdin")?;
    Ok(text.trim_end_matches(['\n', '\r']).to_string())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mode = args.mode();

    // The preview owns the terminal, so only the HTML mode logs
    if mode == Mode::Html {
        env_logger::Builder::from_default_env()
            .filter_level(log::LevelFilter::Info)
            .parse_default_env()
            .init();
    }

    let config = Config::load()
        .context("Failed to load config file")?
        .inspect(|_| log::info!("Loaded config from {}", Config::config_path().display()))
        .unwrap_or_default();
    let options = split_options(&config, &args);
    let metrics = config.flow_metrics();
    let text = read_text(&args)?;

    match mode {
        Mode::Html => {
            let width = args.width.unwrap_or(config.layout.width);
            let split = SplitDocument::build(&text, width, &options, InlineFlowLayout::new(metrics))?;
            log::info!(
                "Split into {} lines, {} words, {} chars",
                split.result.lines.len(),
                split.result.words.len(),
                split.result.chars.len()
            );
            println!("{}", split.doc.to_html(split.container));
        }
        Mode::Preview => {
            // Default to the terminal width so lines match what is drawn
            let width = match args.width {
                Some(width) => width,
                None => {
                    let (columns, _) = crossterm::terminal::size()?;
                    f32::from(columns.saturating_sub(4).max(1)) * metrics.char_width
                }
            };
            let split = SplitDocument::build(&text, width, &options, InlineFlowLayout::new(metrics))?;
            let plan = RevealPlan::from_split(&split.doc, &split.result);

            // Setup terminal
            enable_raw_mode()?;
            let mut stdout = stdout();
            execute!(stdout, EnterAlternateScreen)?;
            let backend = CrosstermBackend::new(stdout);
            let mut terminal = Terminal::new(backend)?;

            let res = preview::run(&mut terminal, plan);

            // Restore terminal
            disable_raw_mode()?;
            execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
            terminal.show_cursor()?;

            if let Err(err) = res {
                println!("{err:?}");
            }
        }
    }

    Ok(())
}
