use std::error::Error;
use std::fs::File;

use dotline::builder::EditorBuilder;
use dotline::complete::WordCompleter;
use dotline::core::LineRead;
use dotline::sys::Tty;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

static COMMANDS: [&str; 8] = [
    "cat", "cd", "echo", "exit", "grep", "ls", "--help", "--verbose",
];

/// Log to a file, the terminal belongs to the editor.
fn init_logger() -> Result<(), Box<dyn Error>> {
    let path = std::env::temp_dir().join("dotline-demo.log");
    let config = ConfigBuilder::new().set_target_level(LevelFilter::Error).build();

    WriteLogger::init(LevelFilter::Trace, config, File::create(path)?)?;

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logger()?;

    let mut editor = EditorBuilder::new()
        .with_completer(WordCompleter::new(&COMMANDS))
        .with_source_label("<demo>")
        .build(Tty::open()?)?;

    let mut count = 0;

    let result = loop {
        let rprompt = format!("#{count}");

        match editor.readline("> ", &rprompt) {
            LineRead::Line(line) if line == "exit" => break Ok(()),
            LineRead::Line(line) => {
                println!("Read: '{line}'");
                count += 1;
            }
            LineRead::Eof => break Ok(()),
            LineRead::Error(err) => break Err(err),
        }
    };

    editor.release()?;
    log::info!("read {count} lines");

    result?;

    Ok(())
}
