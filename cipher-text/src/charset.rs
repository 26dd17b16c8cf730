//! # Charset 模块
//!
//! 预置的“神秘字符”表，以及按路径组合字符集。
//!
//! ## 路径语法
//!
//! - `"matrix"`：整组，按顺序拼接组内所有字符
//! - `"matrix.kanji"`：组内单项
//! - `"cursed"`：单项
//!
//! ```rust,ignore
//! let characters = generate_character_set(&["matrix.symbols", "blocks"]);
//! let alphabet = Alphabet::new(&characters)?;
//! ```

use tracing::warn;

use crate::error::ConfigError;

/// 字符表条目
#[derive(Debug, Clone, Copy)]
enum Entry {
    /// 单项字符串
    Leaf(&'static str),
    /// 命名子项
    Group(&'static [(&'static str, &'static str)]),
}

impl Entry {
    fn collect_into(&self, out: &mut String) {
        match self {
            Entry::Leaf(chars) => out.push_str(chars),
            Entry::Group(items) => items.iter().for_each(|(_, chars)| out.push_str(chars)),
        }
    }
}

const ESOTERIC_CHARACTERS: &[(&str, Entry)] = &[
    (
        "matrix",
        Entry::Group(&[
            ("kanji", "日二"),
            ("katakana", "ﾊﾐﾋｰｳｼﾅﾓﾆｻﾜﾂｵﾘｱﾎﾃﾏｹﾒｴｶｷﾑﾕﾗｾﾈｽﾀﾇﾍコソヤ"),
            ("numbers", "012345789"),
            ("roman", "ACDEFGHJKLMNPSTUVWX"),
            ("symbols", ":・.\"=*+-<>|$#&~?!^@¦"),
        ]),
    ),
    ("cursed", Entry::Leaf("A̸̡̬̺͝B̶̨̬̟̉̈́C̸̪̙̣̒̎D̶͕̱̜̆͑̚͝E̶̜̞̳̽͐̔͜F̶̧̝̳̜̅̋͝Ģ̴̱͖͌H̴̻̩̪̰͆̒Ḯ̵̧̖̜͝J̴̗͚̝̈̓K̷̦͍͎̮̃͛͂͋L̶͙̦͉̉ͅM̶̢̀́͝N̶͕̣̕O̴̠̔͜Ṕ̶̘̱̀Q̷̡̻̼̩͗̌́R̴̞̼͑̅Ṡ̶̪̜T̵̳͎͑̅̀̿Ȕ̸̩͔̣͈̚V̸̩̹͝W̴̠͎̾̃Ẍ̵͓͙̯̱́Ÿ̶̗̼̙́͋̂Z̶̙̰̟̉͠")),
    (
        "runes",
        Entry::Group(&[
            ("angloSaxon", "ᚳ᛫ᛗᚨᚷᛚᛋᛖᚩᛏᚪᚾᛞᚻᛁᚱᚧ᛬ᚠᛇᛒᛦᚦᚢᚹᚳᚫ"),
            ("oldIrish", "᚛ᚉᚑᚅᚔᚋᚈᚍᚂᚐᚌᚓ᚜"),
        ]),
    ),
    ("blocks", Entry::Leaf("▒░█▚▞▜▝")),
    ("mathSymbols", Entry::Leaf("⏀⏁⏂⏃⏄⏅⏆⏇⏈⏉⏊⏋⏌⏍")),
    ("miscSymbols", Entry::Leaf("çﾘｸƵツᐊ╌¿£⭔")),
    (
        "lang",
        Entry::Group(&[
            ("ru", "ЯУ"),
            ("si", "සිංහල"),
            ("zh", "中文"),
            ("ja", "日文"),
            ("ko", "한글"),
            ("ar", "العربية"),
            ("hi", "मैकाँखासता"),
        ]),
    ),
];

/// 解析单个路径
fn resolve(path: &str) -> Option<String> {
    let mut parts = path.split('.');
    let root = parts.next()?;
    let (_, entry) = ESOTERIC_CHARACTERS.iter().find(|(name, _)| *name == root)?;

    let mut out = String::new();
    match (entry, parts.next()) {
        (entry, None) => entry.collect_into(&mut out),
        (Entry::Group(items), Some(leaf)) => {
            let (_, chars) = items.iter().find(|(name, _)| *name == leaf)?;
            out.push_str(chars);
        }
        (Entry::Leaf(_), Some(_)) => return None,
    }

    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

/// 按路径组合字符集（宽松模式）
///
/// 未知路径不贡献任何字符，并记录一条警告。
pub fn generate_character_set<S: AsRef<str>>(paths: &[S]) -> String {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            resolve(path).unwrap_or_else(|| {
                warn!(path = %path, "未知字符集路径，已忽略");
                String::new()
            })
        })
        .collect()
}

/// 按路径组合字符集（严格模式）
///
/// 遇到未知路径时返回 [`ConfigError::UnknownCharset`]。
pub fn try_generate_character_set<S: AsRef<str>>(paths: &[S]) -> Result<String, ConfigError> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref();
            resolve(path).ok_or_else(|| ConfigError::UnknownCharset {
                path: path.to_string(),
            })
        })
        .collect()
}

/// 所有可用路径（组名与 `组.项`）
pub fn available_paths() -> Vec<String> {
    let mut paths = Vec::new();
    for (name, entry) in ESOTERIC_CHARACTERS {
        paths.push(name.to_string());
        if let Entry::Group(items) = entry {
            paths.extend(items.iter().map(|(leaf, _)| format!("{name}.{leaf}")));
        }
    }
    paths
}

// ========== 预置组合 ==========

/// 矩阵字符
pub fn matrix_character_set() -> String {
    generate_character_set(&["matrix"])
}

/// 带组合附加符的“诅咒”字符
pub fn cursed_character_set() -> String {
    generate_character_set(&["cursed"])
}

/// 卢恩字符
pub fn runes_character_set() -> String {
    generate_character_set(&["runes"])
}

/// 方块字符
pub fn blocks_character_set() -> String {
    generate_character_set(&["blocks"])
}

/// 数学符号
pub fn math_symbols_character_set() -> String {
    generate_character_set(&["mathSymbols"])
}

/// 所有符号类字符
pub fn all_symbols_character_set() -> String {
    generate_character_set(&["matrix.symbols", "mathSymbols", "miscSymbols", "matrix.kanji"])
}

/// 全部字符
pub fn full_character_set() -> String {
    generate_character_set(&[
        "matrix",
        "cursed",
        "runes",
        "blocks",
        "mathSymbols",
        "miscSymbols",
        "lang",
    ])
}
