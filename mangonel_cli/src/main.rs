use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
};

use anyhow::Context as _;
use clap::Parser;
use mangonel_core::{
    DisplayState, ProviderRegistry, Session,
    key_event::{Action, InputEvent},
    provider::Outcome,
};
use mangonel_providers::{ApplicationsProvider, PathsProvider, ShellProvider};
use mangonel_store::{Config, TomlHistoryStore};
use tracing_subscriber::EnvFilter;

/// 行模式的 mangonel 启动器
#[derive(Parser)]
#[command(name = "mangonel")]
#[command(about = "Type-ahead launcher (line-driven demo front-end)")]
#[command(version)]
struct Args {
    /// 配置文件路径（默认 <config_dir>/mangonel/config.toml）
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 历史文件路径（默认 <data_dir>/mangonel/history.toml）
    #[arg(long)]
    history: Option<PathBuf>,

    /// 日志级别（RUST_LOG 优先）
    #[arg(long, default_value = "warn", env = "MANGONEL_LOG")]
    log_level: String,
}

fn setup_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    setup_logging(&args.log_level);

    let config_path = match args.config {
        Some(p) => p,
        None => Config::default_path()?,
    };
    let config = Config::load(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;
    let history_path = match args.history {
        Some(p) => p,
        None => TomlHistoryStore::default_path()?,
    };
    let store = TomlHistoryStore::new(history_path);

    let registry = build_registry(&config)?;
    let mut session = Session::new(registry, config.session.clone());
    if let Err(e) = session.restore_history(&store) {
        tracing::warn!(error = %e, "history not restored, starting empty");
    }

    session.show();
    repl(&mut session, &config_path)?;

    session
        .persist_history(&store)
        .with_context(|| format!("saving history {}", store.path().display()))?;
    Ok(())
}

fn build_registry(config: &Config) -> anyhow::Result<ProviderRegistry> {
    let mut registry = ProviderRegistry::new();
    registry.register(
        "applications",
        ApplicationsProvider::new(config.applications.clone()),
    )?;
    if config.paths.enabled {
        registry.register("paths", PathsProvider::new(&config.paths))?;
    }
    if config.shell.enabled {
        registry.register("shell", ShellProvider::new(&config.shell))?;
    }
    Ok(registry)
}

/// 一行输入解析出来的指令。
#[derive(Debug, Clone, PartialEq, Eq)]
enum Command {
    Event(InputEvent),
    Quit,
}

/// 解析一行：`:left :right :tab :up :down :bs :enter :esc :paste <其余> :q`，
/// 其他内容逐字符输入（相邻文本之间补一个空格）。
fn parse_line(line: &str) -> Vec<Command> {
    let mut out = Vec::new();
    let mut prev_text = false;
    let mut rest = line.trim_start();
    while !rest.is_empty() {
        let (token, tail) = match rest.find(char::is_whitespace) {
            Some(i) => (&rest[..i], rest[i..].trim_start()),
            None => (rest, ""),
        };
        let command = match token {
            ":left" => Some(InputEvent::Left),
            ":right" => Some(InputEvent::Right),
            ":tab" => Some(InputEvent::Tab),
            ":up" => Some(InputEvent::Up),
            ":down" => Some(InputEvent::Down),
            ":bs" => Some(InputEvent::Backspace),
            ":enter" => Some(InputEvent::Enter),
            ":esc" => Some(InputEvent::Escape),
            ":paste" => {
                out.push(Command::Event(InputEvent::Paste(tail.to_owned())));
                break;
            }
            ":q" | ":quit" => {
                out.push(Command::Quit);
                break;
            }
            _ => None,
        };
        match command {
            Some(ev) => {
                out.push(Command::Event(ev));
                prev_text = false;
            }
            None => {
                if prev_text {
                    out.push(Command::Event(InputEvent::Char(' ')));
                }
                out.extend(token.chars().map(|c| Command::Event(InputEvent::Char(c))));
                prev_text = true;
            }
        }
        rest = tail;
    }
    out
}

fn render(state: &DisplayState) -> String {
    let mut s = format!("> {}", state.text);
    if !state.composition.is_empty() {
        s.push_str(&format!("[{}]", state.composition));
    }
    if !state.completion.is_empty() {
        s.push_str(&format!("    (tab: {})", state.completion));
    }
    s.push('\n');
    for (i, c) in state.candidates.iter().enumerate() {
        let mark = if state.selected == Some(i) { '*' } else { ' ' };
        match &c.comment {
            Some(comment) => s.push_str(&format!("{mark} {}. {}\t({comment})\n", i + 1, c.name)),
            None => s.push_str(&format!("{mark} {}. {}\n", i + 1, c.name)),
        }
    }
    s
}

fn repl(session: &mut Session, config_path: &std::path::Path) -> io::Result<()> {
    let mut out = io::stdout();
    writeln!(out, "mangonel (line mode) | config: {}", config_path.display())?;
    writeln!(
        out,
        "输入文本逐字输入；:left :right :tab :up :down :bs :enter :esc :paste <text>；:q 退出。"
    )?;
    out.flush()?;

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        line.clear();
        write!(out, "mangonel> ")?;
        out.flush()?;
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let mut quit = false;
        for cmd in parse_line(line.trim_end_matches(['\n', '\r'])) {
            let ev = match cmd {
                Command::Quit => {
                    quit = true;
                    break;
                }
                Command::Event(ev) => ev,
            };
            let (_, actions) = session.handle(ev);
            for action in actions {
                report(&mut out, &action)?;
            }
            if !session.is_visible() {
                session.show();
            }
        }
        if quit {
            break;
        }
        write!(out, "{}", render(&session.display_state()))?;
    }
    Ok(())
}

fn report(out: &mut impl Write, action: &Action) -> io::Result<()> {
    match action {
        Action::Activated {
            provider,
            name,
            outcome: Outcome::Success,
        } => writeln!(out, "launched: {name} ({provider})"),
        Action::Activated {
            provider,
            name,
            outcome: Outcome::Failure(reason),
        } => writeln!(out, "failed: {name} ({provider}): {reason}"),
        Action::Hidden => writeln!(out, "--------------------"),
        Action::SelectionChanged { .. } => Ok(()),
    }
}
