mod paths;

use std::fs::{self, File};
use std::{env, io};

use crossterm::event::{Event as CtEvent, KeyCode, KeyEventKind, MouseButton as CtButton, MouseEventKind};
use select_menu::{ComponentRegistry, SelectMenuConfig, SelectMenuError};
use simplelog::{Config, LevelFilter, WriteLogger};
use termdom::{
    Color, Direction, Document, DomError, Edges, Element, MouseButton, NodeId, Style, StyleSheet,
    Terminal, hit_test,
};
use thiserror::Error;

const SAMPLE: &str = r#"
<div class="menus">
  <select-menu id="fruit" title="Fruit">
    <select-item value="apple" text="Apple">Apple</select-item>
    <select-item value="pear" text="Pear">Pear</select-item>
    <select-item value="plum" text="Plum">Plum &amp; co.</select-item>
  </select-menu>
  <select-menu id="size">
    <select-item value="s" text="Small">S</select-item>
    <select-item value="m" text="Medium">M</select-item>
    <select-item value="l" text="Large">L</select-item>
  </select-menu>
</div>
"#;

#[derive(Debug, Error)]
enum DemoError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),

    #[error("failed to initialize logger: {0}")]
    Logger(#[from] log::SetLoggerError),

    #[error(transparent)]
    Dom(#[from] DomError),

    #[error(transparent)]
    Menu(#[from] SelectMenuError),
}

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), DemoError> {
    init_logging()?;

    let markup = match env::args().nth(1) {
        Some(path) => {
            log::info!("loading markup from {path}");
            fs::read_to_string(path)?
        }
        None => SAMPLE.to_string(),
    };

    let mut doc = Document::new();
    doc.set_stylesheet(stylesheet()?);
    let body = doc.body();
    doc.mount(
        body,
        &Element::div()
            .class("hint")
            .text("Click a menu to open it. Press q or Esc to quit."),
    )?;
    doc.append_markup(body, &markup)?;
    let status = doc.mount(body, &Element::div().id("status"))?;

    let mut registry = ComponentRegistry::new(SelectMenuConfig::default());
    registry.process(&mut doc)?;
    update_status(&mut doc, &registry, status)?;

    let mut terminal = Terminal::new()?;
    loop {
        terminal.render(&doc)?;

        for event in terminal.poll(None)? {
            match event {
                CtEvent::Key(key) if key.kind == KeyEventKind::Press => {
                    if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                        log::info!("quit requested");
                        return Ok(());
                    }
                }
                CtEvent::Mouse(mouse) if mouse.kind == MouseEventKind::Down(CtButton::Left) => {
                    let (x, y) = (mouse.column, mouse.row);
                    // Clicks on empty space still count as outside clicks.
                    let target = hit_test(terminal.layout(), x, y).unwrap_or(body);
                    log::debug!("click at ({x}, {y}) on {target}");

                    doc.dispatch_click(target, x, y, MouseButton::Left)?;
                    if let Err(err) = registry.process(&mut doc) {
                        log::warn!("failed to process lifecycle: {err}");
                    }
                    update_status(&mut doc, &registry, status)?;
                }
                _ => {}
            }
        }
    }
}

fn init_logging() -> Result<(), DemoError> {
    let path = paths::log_file();
    let log_file = File::create(&path)?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)?;
    log::info!("logging to {}", path.display());
    Ok(())
}

fn stylesheet() -> Result<StyleSheet, DomError> {
    StyleSheet::new()
        .rule(
            "body",
            Style::new()
                .padding(Edges::symmetric(1, 2))
                .gap(1)
                .background(Color::hex(0x111827)),
        )?
        .rule(".hint", Style::new().dim())?
        .rule(".menus", Style::new().direction(Direction::Row).gap(4))?
        .rule("#status", Style::new().foreground(Color::oklch(0.8, 0.1, 150.0)))
}

/// Show every menu's selection under the menus.
fn update_status(
    doc: &mut Document,
    registry: &ComponentRegistry,
    status: NodeId,
) -> Result<(), DomError> {
    let parts: Vec<String> = registry
        .menus()
        .map(|menu| {
            let name = doc
                .get_attribute(menu.host(), "id")
                .unwrap_or_else(|| menu.host().to_string());
            match menu.selection(doc) {
                Some(selection) => format!("{name}: {} ({})", selection.label, selection.value),
                None => format!("{name}: -"),
            }
        })
        .collect();
    doc.set_text_content(status, &parts.join("   "))
}
