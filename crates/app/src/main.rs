use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use services::{AppServices, highlight_cards};
use storage::{InMemoryCompletion, Storage};
use study_core::model::{ChapterId, LevelName, ModuleId, SlideId, ValidationOptions};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, PartialEq, Eq)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    UnknownCommand(String),
    MissingOperand { command: &'static str, operand: &'static str },
    UnexpectedOperand(String),
    InvalidId { raw: String },
    InvalidLevel { raw: String },
    InvalidSlideList { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::UnknownCommand(cmd) => write!(f, "unknown subcommand: {cmd}"),
            ArgsError::MissingOperand { command, operand } => {
                write!(f, "{command} requires <{operand}>")
            }
            ArgsError::UnexpectedOperand(arg) => write!(f, "unexpected operand: {arg}"),
            ArgsError::InvalidId { raw } => write!(f, "invalid id: {raw}"),
            ArgsError::InvalidLevel { raw } => {
                write!(f, "invalid level: {raw} (expected hustler, mastermind or unstoppable)")
            }
            ArgsError::InvalidSlideList { raw } => write!(f, "invalid slide id list: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [modules]                          [options]");
    eprintln!("  cargo run -p app -- module <module-id>                 [options]");
    eprintln!("  cargo run -p app -- chapter <module-id> <level> <chapter-id> [options]");
    eprintln!("  cargo run -p app -- highlights                         [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --content <path>          Curriculum JSON (default: bundled content)");
    eprintln!("  --completed <ids>         Comma-separated completed slide ids");
    eprintln!("  --strict-ids              Reject documents with duplicate sibling ids");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  STUDY_CONTENT_PATH, STUDY_COMPLETED_SLIDES, STUDY_STRICT_IDS, RUST_LOG");
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Modules,
    Module(ModuleId),
    Chapter {
        module_id: ModuleId,
        level: LevelName,
        chapter_id: ChapterId,
    },
    Highlights,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Args {
    content_path: Option<PathBuf>,
    completed: Vec<SlideId>,
    strict_ids: bool,
}

impl Args {
    /// Defaults taken from the environment; flags override them.
    fn from_env() -> Result<Self, ArgsError> {
        let content_path = std::env::var_os("STUDY_CONTENT_PATH").map(PathBuf::from);
        let completed = match std::env::var("STUDY_COMPLETED_SLIDES") {
            Ok(raw) => parse_slide_list(&raw)?,
            Err(_) => Vec::new(),
        };
        let strict_ids = std::env::var("STUDY_STRICT_IDS")
            .is_ok_and(|v| matches!(v.trim(), "1" | "true" | "yes"));
        Ok(Self {
            content_path,
            completed,
            strict_ids,
        })
    }

    fn parse(
        mut self,
        args: &mut impl Iterator<Item = String>,
    ) -> Result<(Command, Self), ArgsError> {
        let mut operands = Vec::new();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--content" => {
                    let value = require_value(args, "--content")?;
                    self.content_path = Some(PathBuf::from(value));
                }
                "--completed" => {
                    let value = require_value(args, "--completed")?;
                    self.completed = parse_slide_list(&value)?;
                }
                "--strict-ids" => self.strict_ids = true,
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ if arg.starts_with("--") => return Err(ArgsError::UnknownArg(arg)),
                _ => operands.push(arg),
            }
        }

        let command = Command::from_operands(operands)?;
        Ok((command, self))
    }

    fn storage(&self) -> Storage {
        let storage = match &self.content_path {
            Some(path) => Storage::file(path.clone()),
            None => Storage::bundled(),
        };
        storage.with_completion(Arc::new(InMemoryCompletion::with_completed(
            self.completed.iter().copied(),
        )))
    }

    fn validation(&self) -> ValidationOptions {
        ValidationOptions {
            unique_ids: self.strict_ids,
        }
    }
}

impl Command {
    fn from_operands(operands: Vec<String>) -> Result<Self, ArgsError> {
        let mut operands = operands.into_iter();
        let command = match operands.next().as_deref() {
            None | Some("modules") => Command::Modules,
            Some("highlights") => Command::Highlights,
            Some("module") => {
                Command::Module(ModuleId::new(operand(&mut operands, "module", "module-id")?))
            }
            Some("chapter") => {
                let module_id = ModuleId::new(operand(&mut operands, "chapter", "module-id")?);
                let raw = operands.next().ok_or(ArgsError::MissingOperand {
                    command: "chapter",
                    operand: "level",
                })?;
                let level = raw
                    .parse::<LevelName>()
                    .map_err(|_| ArgsError::InvalidLevel { raw: raw.clone() })?;
                let chapter_id = ChapterId::new(operand(&mut operands, "chapter", "chapter-id")?);
                Command::Chapter {
                    module_id,
                    level,
                    chapter_id,
                }
            }
            Some(other) => return Err(ArgsError::UnknownCommand(other.to_owned())),
        };

        match operands.next() {
            Some(extra) => Err(ArgsError::UnexpectedOperand(extra)),
            None => Ok(command),
        }
    }
}

fn operand(
    operands: &mut impl Iterator<Item = String>,
    command: &'static str,
    name: &'static str,
) -> Result<i64, ArgsError> {
    let raw = operands.next().ok_or(ArgsError::MissingOperand {
        command,
        operand: name,
    })?;
    raw.parse().map_err(|_| ArgsError::InvalidId { raw })
}

fn parse_slide_list(raw: &str) -> Result<Vec<SlideId>, ArgsError> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(|part| {
            part.parse::<i64>()
                .map(SlideId::new)
                .map_err(|_| ArgsError::InvalidSlideList {
                    raw: raw.to_owned(),
                })
        })
        .collect()
}

fn percent(fraction: f32) -> String {
    format!("{:.0}%", fraction * 100.0)
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let mut argv = std::env::args().skip(1);
    let (command, args) = Args::from_env()
        .and_then(|defaults| defaults.parse(&mut argv))
        .inspect_err(|e| {
            eprintln!("{e}");
            print_usage();
        })?;
    debug!(?command, ?args, "parsed arguments");

    let services = AppServices::new(args.storage(), args.validation());
    let store = services.content();

    match command {
        Command::Modules => {
            let doc = store.content().await?;
            println!("Curriculum v{}", doc.version());
            for module in doc.modules() {
                println!(
                    "{:>4}  {}  ({} levels)",
                    module.id(),
                    module.title(),
                    module.levels().len()
                );
            }
        }
        Command::Module(module_id) => {
            let module = store.module(module_id).await?;
            println!("{}", module.title());
            if let Some(description) = module.description() {
                println!("{description}");
            }
            println!();
            for level in services.progress().module_overview(module_id).await? {
                println!(
                    "{:>4}  {:<12} {:>2} chapters  {:>4}",
                    level.level_id,
                    level.name,
                    level.chapter_count,
                    percent(level.progress)
                );
            }
        }
        Command::Chapter {
            module_id,
            level,
            chapter_id,
        } => {
            let chapter = store.chapter(module_id, level, chapter_id).await?;
            let progress = services
                .progress()
                .chapter_progress(module_id, level, chapter_id)
                .await?;
            println!(
                "{}  [{}/{} slides, {}]",
                chapter.title(),
                progress.completed_slides(),
                progress.total_slides(),
                percent(progress.fraction())
            );
            for (slide, state) in chapter.slides().iter().zip(&progress.slides) {
                let kinds: Vec<&str> = slide
                    .blocks()
                    .iter()
                    .map(|b| b.kind().as_str())
                    .collect();
                let mark = if state.is_completed { 'x' } else { ' ' };
                println!(
                    "  [{mark}] {:>4}  {}  ({})",
                    slide.id(),
                    slide.title(),
                    kinds.join(", ")
                );
            }
        }
        Command::Highlights => {
            let images = services.images();
            for section in store.highlights().await?.iter() {
                println!("{}", section.title());
                for card in highlight_cards(section, images.as_ref()) {
                    println!(
                        "  {}  {}  [{}]",
                        card.heading,
                        card.description,
                        card.image.as_str()
                    );
                }
            }
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = run().await {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Result<(Command, Args), ArgsError> {
        let mut iter = argv.iter().map(|s| (*s).to_owned());
        Args::default().parse(&mut iter)
    }

    #[test]
    fn defaults_to_module_list_over_bundled_content() {
        let (command, args) = parse(&[]).unwrap();
        assert_eq!(command, Command::Modules);
        assert_eq!(args, Args::default());
    }

    #[test]
    fn parses_chapter_with_case_insensitive_level() {
        let (command, args) = parse(&[
            "chapter",
            "1",
            "Hustler",
            "2",
            "--completed",
            "4, 5",
            "--strict-ids",
        ])
        .unwrap();
        assert_eq!(
            command,
            Command::Chapter {
                module_id: ModuleId::new(1),
                level: LevelName::Hustler,
                chapter_id: ChapterId::new(2),
            }
        );
        assert_eq!(args.completed, [SlideId::new(4), SlideId::new(5)]);
        assert!(args.validation().unique_ids);
    }

    #[test]
    fn flags_may_precede_the_command() {
        let (command, args) = parse(&["--content", "/tmp/content.json", "module", "7"]).unwrap();
        assert_eq!(command, Command::Module(ModuleId::new(7)));
        assert_eq!(args.content_path, Some(PathBuf::from("/tmp/content.json")));
    }

    #[test]
    fn accepts_negative_ids() {
        let (command, args) = parse(&["module", "-5", "--completed", "-1,2"]).unwrap();
        assert_eq!(command, Command::Module(ModuleId::new(-5)));
        assert_eq!(args.completed, [SlideId::new(-1), SlideId::new(2)]);
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(
            parse(&["module"]).unwrap_err(),
            ArgsError::MissingOperand {
                command: "module",
                operand: "module-id"
            }
        );
        assert_eq!(
            parse(&["chapter", "1", "legend", "2"]).unwrap_err(),
            ArgsError::InvalidLevel {
                raw: "legend".into()
            }
        );
        assert_eq!(
            parse(&["--completed"]).unwrap_err(),
            ArgsError::MissingValue {
                flag: "--completed"
            }
        );
        assert_eq!(
            parse(&["lessons"]).unwrap_err(),
            ArgsError::UnknownCommand("lessons".into())
        );
        assert_eq!(
            parse(&["modules", "extra"]).unwrap_err(),
            ArgsError::UnexpectedOperand("extra".into())
        );
        assert!(matches!(
            parse(&["--completed", "1,x"]).unwrap_err(),
            ArgsError::InvalidSlideList { .. }
        ));
    }

    #[test]
    fn formats_percent_without_decimals() {
        assert_eq!(percent(1.0 / 3.0), "33%");
        assert_eq!(percent(0.0), "0%");
    }
}
