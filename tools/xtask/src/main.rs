//! # xtask - 开发辅助工具
//!
//! 提供本地质量门禁与开发辅助命令。
//!
//! ## 命令
//!
//! - `check-all`: 运行 fmt、clippy、test
//! - `cov-core`: 运行 cipher-text 覆盖率
//! - `preset-check`: 检查动画预设文件（JSON 格式、配置校验、试运行）

use std::path::{Path, PathBuf};
use std::process::{Command, ExitCode};

use cipher_text::{CipherConfig, CipherRuntime};
use walkdir::WalkDir;

/// 试运行时最多推进的 tick 数（无上限的动作只检查能否推进）
const DRY_RUN_TICKS: usize = 256;

fn run(step: &str, cmd: &mut Command) -> anyhow::Result<()> {
    eprintln!("\n==> {step}");
    let status = cmd.status()?;
    if !status.success() {
        anyhow::bail!("{step} failed with {status}");
    }
    Ok(())
}

fn ensure_cargo_llvm_cov_available() -> anyhow::Result<()> {
    let mut cmd = Command::new("cargo");
    cmd.args(["llvm-cov", "--version"]);
    match cmd.status() {
        Ok(s) if s.success() => Ok(()),
        _ => anyhow::bail!(
            "cargo llvm-cov 不可用。\n\
请先安装：\n\
  - cargo install cargo-llvm-cov\n\
  - rustup component add llvm-tools-preview\n\
然后重试。"
        ),
    }
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        eprintln!("xtask error: {e:#}");
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let sub = args.next().unwrap_or_else(|| "help".to_string());

    match sub.as_str() {
        "check-all" => {
            let mut fmt = Command::new("cargo");
            fmt.args(["fmt", "--all", "--", "--check"]);
            run("cargo fmt --all -- --check", &mut fmt)?;

            let mut clippy = Command::new("cargo");
            clippy.args(["clippy", "--workspace", "--all-targets"]);
            run("cargo clippy --workspace --all-targets", &mut clippy)?;

            let mut test = Command::new("cargo");
            test.args(["test", "--workspace"]);
            run("cargo test --workspace", &mut test)?;
        }
        "cov-core" => {
            ensure_cargo_llvm_cov_available()?;

            let mut cov = Command::new("cargo");
            cov.args(["llvm-cov", "-p", "cipher-text", "--all-features", "--html"]);
            run(
                "cargo llvm-cov -p cipher-text --all-features --html",
                &mut cov,
            )?;

            eprintln!("\nCoverage HTML: target/llvm-cov/html/index.html");
        }
        "preset-check" => {
            let path = args.next();
            preset_check(path.as_deref())?;
        }
        "help" | "-h" | "--help" => {
            print_help();
        }
        other => anyhow::bail!("unknown xtask subcommand: {other}"),
    }

    Ok(())
}

fn print_help() {
    eprintln!(
        r#"xtask - 开发辅助工具

USAGE:
  cargo xtask <command>

COMMANDS:
  check-all       运行 fmt、clippy、test 门禁检查
  cov-core        运行 cipher-text 覆盖率报告
  preset-check    检查动画预设文件

PRESET-CHECK:
  cargo xtask preset-check [path]

  不带参数：检查 presets/ 下所有 .json 文件
  带路径参数：检查指定文件或目录

  检查内容：
    - JSON 格式与配置字段
    - transform 是否提供 target_text、字符集是否有效
    - 有上限的动作能否在预算内完成

ALIASES (in .cargo/config.toml):
  cargo check-all     -> cargo xtask check-all
  cargo cov-core      -> cargo xtask cov-core
  cargo preset-check  -> cargo xtask preset-check
"#
    );
}

//=============================================================================
// preset-check 命令实现
//=============================================================================

/// 单个预设的检查结果
enum PresetOutcome {
    /// 在给定 tick 数内完成
    Finished { ticks: usize },
    /// 无上限动作，试运行后仍在进行
    Running,
}

/// 执行预设检查
fn preset_check(path: Option<&str>) -> anyhow::Result<()> {
    let root = PathBuf::from(path.unwrap_or("presets"));
    if !root.exists() {
        anyhow::bail!(
            "路径不存在: {}\n请在 workspace 根目录运行，或指定预设路径",
            root.display()
        );
    }

    let files = collect_preset_files(&root)?;
    if files.is_empty() {
        eprintln!("未找到预设文件（.json）");
        return Ok(());
    }

    eprintln!("==> 检查 {} 个预设文件...\n", files.len());

    let mut errors = 0usize;
    for file in &files {
        match check_preset_file(file) {
            Ok(PresetOutcome::Finished { ticks }) => {
                eprintln!("[OK] {}: {} 个 tick 后完成", file.display(), ticks);
            }
            Ok(PresetOutcome::Running) => {
                eprintln!("[OK] {}: 无上限动画，试运行正常", file.display());
            }
            Err(e) => {
                eprintln!("[ERROR] {}: {e:#}", file.display());
                errors += 1;
            }
        }
    }

    eprintln!("─────────────────────────────────────────────────────");
    if errors > 0 {
        eprintln!("❌ {} 个错误", errors);
        anyhow::bail!("预设检查发现错误");
    }
    eprintln!("✅ 检查通过，无错误");
    Ok(())
}

/// 收集目录下的所有预设文件
fn collect_preset_files(root: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if root.is_file() {
        return Ok(vec![root.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(root) {
        let entry = entry?;
        let path = entry.path();
        if entry.file_type().is_file() && path.extension().is_some_and(|ext| ext == "json") {
            files.push(path.to_path_buf());
        }
    }
    files.sort();
    Ok(files)
}

/// 检查单个预设：解析、构造 Runtime、试运行
fn check_preset_file(file: &Path) -> anyhow::Result<PresetOutcome> {
    let content = std::fs::read_to_string(file)?;
    let config = CipherConfig::from_json(&content)?;
    let bounded = config.budget().max_iterations;
    // 到期后最多再需要两个 tick：一次强制收敛，一次确认完成
    let limit = bounded.map_or(DRY_RUN_TICKS, |max| max as usize + 2);

    // 试运行不受暂停与随机性影响
    let config = config.with_paused(false).with_seed(0);
    let mut runtime = CipherRuntime::new(config)?;

    let mut ticks = 0;
    while runtime.tick().is_some() {
        ticks += 1;
        if runtime.state().is_done() {
            return Ok(PresetOutcome::Finished { ticks });
        }
        if ticks >= limit {
            break;
        }
    }

    match bounded {
        Some(max) => anyhow::bail!("最大迭代 {max}，但 {ticks} 个 tick 后仍未完成"),
        None => Ok(PresetOutcome::Running),
    }
}
