//! # Cipher CLI
//!
//! 在终端中播放 cipher text 动画。
//!
//! ## 用法
//!
//! ```bash
//! cargo run -p host-cli -- "SIGNAL LOST"
//! cargo run -p host-cli -- "ACCESS GRANTED" --action transform --target "ACCESS DENIED"
//! cargo run -p host-cli -- "loading" --action scramble --charset matrix --max-iterations 40
//! cargo run -p host-cli -- --config presets/title-transform.json --json
//! cargo run -p host-cli -- "LOADING" --action scramble --chunk 3
//! cargo run -p host-cli -- --list-charsets
//! ```
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件（`--config`）
//! 3. 默认值（最低）

use std::cell::Cell;
use std::fmt::Display;
use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::rc::Rc;
use std::thread;

use anyhow::{Context, Result};
use cipher_text::charset::available_paths;
use cipher_text::{
    Action, CipherConfig, CipherRuntime, Frame, RandomSource, RngSource, chunk_text_with_colors,
};
use clap::Parser;
use serde_json::{Map, Value};
use tracing::{Level, debug, warn};

#[derive(Parser, Debug)]
#[command(name = "cipher")]
#[command(about = "在终端中播放字符级文本动画")]
#[command(version)]
struct Cli {
    /// 源文本（使用 --config 时可省略）
    text: Option<String>,

    /// 目标文本（transform 必填）
    #[arg(short, long)]
    target: Option<String>,

    /// 动作：decode/encode/transform/scramble/wave
    #[arg(short, long)]
    action: Option<Action>,

    /// 迭代间隔（毫秒）
    #[arg(long)]
    speed_ms: Option<u64>,

    /// 最大迭代次数
    #[arg(long)]
    max_iterations: Option<u32>,

    /// 以空格切分的词元为单元
    #[arg(long)]
    preserve_spaces: bool,

    /// 按单词上色
    #[arg(long)]
    colorize: bool,

    /// 字符集路径（可重复，如 --charset matrix.katakana）
    #[arg(long = "charset")]
    charsets: Vec<String>,

    /// 追加到字符集末尾的字符
    #[arg(long)]
    extra: Option<String>,

    /// 随机种子
    #[arg(long)]
    seed: Option<u64>,

    /// 每帧输出一行 JSON
    #[arg(long)]
    json: bool,

    /// 按随机片段上色，参数为片段最大长度（仅纯文本输出）
    #[arg(long, value_name = "MAX_LEN")]
    chunk: Option<usize>,

    /// JSON 配置文件
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 列出可用字符集路径
    #[arg(long)]
    list_charsets: bool,

    /// 输出调试日志
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = real_main(cli) {
        eprintln!("cipher error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn init_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn real_main(cli: Cli) -> Result<()> {
    if cli.list_charsets {
        for path in available_paths() {
            println!("{path}");
        }
        return Ok(());
    }

    let config = build_config(&cli)?;
    let finished = Rc::new(Cell::new(false));
    let flag = finished.clone();
    let mut runtime = CipherRuntime::new(config)
        .context("无法创建动画")?
        .with_on_finish(move || flag.set(true));

    let mut renderer = Renderer::new(&cli, runtime.config());
    let mut out = io::stdout().lock();
    renderer.render(&runtime.frame(), &mut out)?;

    while let Some(ticket) = runtime.schedule() {
        thread::sleep(ticket.delay());
        if let Some(frame) = runtime.fire(ticket) {
            renderer.render(&frame, &mut out)?;
        }
    }

    if !cli.json {
        writeln!(out)?;
    }
    if finished.get() {
        debug!(iterations = runtime.state().iteration, "播放结束");
    } else {
        warn!("动画未调度（间隔为 0 或已暂停）");
    }
    Ok(())
}

/// 合并配置：文件作为底，命令行参数覆盖
fn build_config(cli: &Cli) -> Result<CipherConfig> {
    let mut map = match &cli.config {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("无法读取配置文件: {}", path.display()))?;
            match serde_json::from_str::<Value>(&content)
                .with_context(|| format!("配置文件解析失败: {}", path.display()))?
            {
                Value::Object(map) => map,
                _ => anyhow::bail!("配置文件必须是 JSON 对象: {}", path.display()),
            }
        }
        None => Map::new(),
    };

    let mut set = |key: &str, value: Value| {
        map.insert(key.to_string(), value);
    };
    if let Some(text) = &cli.text {
        set("source_text", Value::from(text.as_str()));
    }
    if let Some(target) = &cli.target {
        set("target_text", Value::from(target.as_str()));
    }
    if let Some(action) = cli.action {
        set("action", Value::from(action.as_str()));
    }
    if let Some(speed_ms) = cli.speed_ms {
        set("iteration_speed_ms", Value::from(speed_ms));
    }
    if let Some(max_iterations) = cli.max_iterations {
        set("max_iterations", Value::from(max_iterations));
    }
    if cli.preserve_spaces {
        set("preserve_spaces", Value::Bool(true));
    }
    if cli.colorize {
        set("colorize_units", Value::Bool(true));
    }
    if !cli.charsets.is_empty() {
        set("charsets", Value::from(cli.charsets.clone()));
    }
    if let Some(extra) = &cli.extra {
        set("extra_alphabet", Value::from(extra.as_str()));
    }
    if let Some(seed) = cli.seed {
        set("seed", Value::from(seed));
    }

    let config = CipherConfig::from_value(Value::Object(map)).context("无效配置")?;
    debug!(action = %config.action, budget = ?config.budget(), "配置加载完成");
    Ok(config)
}

/// 随机分块上色
struct ChunkColors {
    max_len: usize,
    palette: Vec<String>,
    rng: Box<dyn RandomSource>,
}

/// 帧输出
struct Renderer {
    json: bool,
    chunks: Option<ChunkColors>,
}

impl Renderer {
    fn new(cli: &Cli, config: &CipherConfig) -> Self {
        let chunks = cli.chunk.map(|max_len| ChunkColors {
            max_len,
            palette: config.palette.clone(),
            rng: match config.seed {
                Some(seed) => Box::new(RngSource::seeded(seed)),
                None => Box::new(RngSource::from_entropy()),
            },
        });
        Self {
            json: cli.json,
            chunks,
        }
    }

    /// 输出一帧
    ///
    /// 分块上色优先于逐字符的颜色标签。
    fn render(&mut self, frame: &Frame, out: &mut impl Write) -> Result<()> {
        if self.json {
            writeln!(out, "{}", serde_json::to_string(frame)?)?;
            return Ok(());
        }

        write!(out, "\r")?;
        match (self.chunks.as_mut(), &frame.colors) {
            (Some(chunks), _) => {
                let colored = chunk_text_with_colors(
                    &frame.text,
                    chunks.max_len,
                    &chunks.palette,
                    chunks.rng.as_mut(),
                );
                for chunk in colored {
                    paint(out, &chunk.text, chunk.color.as_deref())?;
                }
            }
            (None, Some(colors)) => {
                for (c, tag) in frame.text.chars().zip(colors.iter()) {
                    paint(out, c, tag.as_deref())?;
                }
            }
            (None, None) => write!(out, "{}", frame.text)?,
        }
        write!(out, "\x1b[K")?;
        out.flush()?;
        Ok(())
    }
}

/// 按标签输出一段文本
fn paint(out: &mut impl Write, text: impl Display, tag: Option<&str>) -> io::Result<()> {
    match tag {
        Some(tag) => write!(out, "\x1b[{}m{text}\x1b[0m", ansi_code(tag)),
        None => write!(out, "{text}"),
    }
}

/// 调色板标签到 ANSI 前景色
fn ansi_code(tag: &str) -> u8 {
    match tag.split('-').next().unwrap_or(tag) {
        "gray" => 90,
        "red" => 31,
        "green" | "emerald" => 32,
        "yellow" => 33,
        "blue" => 34,
        "pink" | "magenta" => 95,
        "cyan" => 36,
        "teal" => 96,
        _ => 37,
    }
}
