use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::note_file::ExistingFileAction;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConfigFlags {
    pub plain: bool,
    pub on_existing: Option<ExistingFileAction>,
    pub rule_char: Option<char>,
    pub scrollback: Option<usize>,
    pub log: Option<PathBuf>,
}

impl ConfigFlags {
    pub fn union(&self, other: &Self) -> Self {
        Self {
            plain: self.plain || other.plain,
            on_existing: other.on_existing.or(self.on_existing),
            rule_char: other.rule_char.or(self.rule_char),
            scrollback: other.scrollback.or(self.scrollback),
            log: other.log.clone().or_else(|| self.log.clone()),
        }
    }
}

pub fn global_config_path() -> PathBuf {
    #[cfg(target_os = "windows")]
    {
        if let Some(appdata) = std::env::var_os("APPDATA") {
            return PathBuf::from(appdata).join("cnote").join("config");
        }
    }

    #[cfg(target_os = "macos")]
    {
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("cnote")
                .join("config");
        }
    }

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    {
        if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME") {
            return PathBuf::from(xdg).join("cnote").join("config");
        }
        if let Some(home) = std::env::var_os("HOME") {
            return PathBuf::from(home).join(".config").join("cnote").join("config");
        }
    }

    PathBuf::from(".cnoterc")
}

pub fn local_override_path() -> PathBuf {
    PathBuf::from(".cnoterc")
}

pub fn load_config_flags(path: &Path) -> Result<ConfigFlags> {
    if !path.exists() {
        return Ok(ConfigFlags::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let tokens = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .flat_map(|line| line.split_whitespace().map(ToOwned::to_owned))
        .collect::<Vec<_>>();
    Ok(parse_flag_tokens(&tokens))
}

pub fn save_config_flags(path: &Path, flags: &ConfigFlags) -> Result<()> {
    let mut lines = Vec::new();
    lines.push("# cnote defaults (saved with --save)".to_string());
    if flags.plain {
        lines.push("--plain".to_string());
    }
    match flags.on_existing {
        Some(ExistingFileAction::Append) => lines.push("--append".to_string()),
        Some(ExistingFileAction::Overwrite) => lines.push("--overwrite".to_string()),
        Some(ExistingFileAction::Abort) | None => {}
    }
    if let Some(c) = flags.rule_char {
        lines.push(format!("--rule-char {c}"));
    }
    if let Some(n) = flags.scrollback {
        lines.push(format!("--scrollback {n}"));
    }
    if let Some(path) = &flags.log {
        lines.push(format!("--log {}", path.display()));
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create config dir {}", parent.display()))?;
    }
    fs::write(path, format!("{}\n", lines.join("\n")))
        .with_context(|| format!("Failed to write config {}", path.display()))
}

pub fn clear_config_flags(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path).with_context(|| format!("Failed to remove {}", path.display()))?;
    }
    Ok(())
}

pub fn parse_flag_tokens(tokens: &[String]) -> ConfigFlags {
    let mut flags = ConfigFlags::default();
    let mut i = 0;
    while i < tokens.len() {
        let token = &tokens[i];
        if token == "--plain" {
            flags.plain = true;
        } else if token == "--append" {
            flags.on_existing = Some(ExistingFileAction::Append);
        } else if token == "--overwrite" {
            flags.on_existing = Some(ExistingFileAction::Overwrite);
        } else if token == "--rule-char" {
            if let Some(next) = tokens.get(i + 1) {
                flags.rule_char = parse_rule_char(next);
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--rule-char=") {
            flags.rule_char = parse_rule_char(value);
        } else if token == "--scrollback" {
            if let Some(next) = tokens.get(i + 1) {
                flags.scrollback = next.parse().ok();
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--scrollback=") {
            flags.scrollback = value.parse().ok();
        } else if token == "--log" {
            if let Some(next) = tokens.get(i + 1) {
                flags.log = Some(PathBuf::from(next));
                i += 1;
            }
        } else if let Some(value) = token.strip_prefix("--log=") {
            flags.log = Some(PathBuf::from(value));
        }
        i += 1;
    }
    flags
}

/// Accept exactly one visible character.
pub fn parse_rule_char(s: &str) -> Option<char> {
    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if !c.is_whitespace() && !c.is_control() => Some(c),
        _ => None,
    }
}
