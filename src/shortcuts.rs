//! ショートカット設定の管理。

use anyhow::{Context, Result};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// ショートカット設定の全体。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shortcuts {
    pub main: MainPageShortcuts,
}

/// メイン画面のショートカット。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MainPageShortcuts {
    pub quit: Vec<String>,
    pub next: Vec<String>,
    pub previous: Vec<String>,
    pub first: Vec<String>,
    pub last: Vec<String>,
}

impl Shortcuts {
    /// TOMLから読み込み、無ければデフォルトを返す。
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }
}

impl Default for Shortcuts {
    fn default() -> Self {
        let keys = |ks: &[&str]| ks.iter().map(|k| k.to_string()).collect::<Vec<_>>();
        Self {
            main: MainPageShortcuts {
                quit: keys(&["q", "Esc"]),
                next: keys(&["Down", "j", "Tab"]),
                previous: keys(&["Up", "k", "Shift+BackTab"]),
                first: keys(&["Home", "g"]),
                last: keys(&["End", "G"]),
            },
        }
    }
}

/// KeyEventがいずれかのショートカット文字列と一致するか判定する。
pub fn matches_shortcut(key: &KeyEvent, shortcuts: &[String]) -> bool {
    shortcuts
        .iter()
        .filter_map(|s| parse_binding(s))
        .any(|(modifiers, code)| binding_matches(key, modifiers, code))
}

/// 数字キー `1..9` を0始まりのページ番号へ変換する。
pub fn digit_page(key: &KeyEvent) -> Option<usize> {
    if !key.modifiers.is_empty() {
        return None;
    }
    match key.code {
        KeyCode::Char(c @ '1'..='9') => c.to_digit(10).map(|d| d as usize - 1),
        _ => None,
    }
}

/// "Ctrl+u" や "Enter" のような文字列を修飾キーとキーコードに分解する。
fn parse_binding(shortcut: &str) -> Option<(KeyModifiers, KeyCode)> {
    let mut parts: Vec<&str> = shortcut.split('+').collect();
    let key_str = parts.pop()?;

    let mut modifiers = KeyModifiers::empty();
    for m in parts {
        modifiers |= match m.to_ascii_lowercase().as_str() {
            "ctrl" => KeyModifiers::CONTROL,
            "alt" => KeyModifiers::ALT,
            "shift" => KeyModifiers::SHIFT,
            _ => return None,
        };
    }

    // 1文字のキーは大文字小文字を区別する（"g" と "G" は別物）。
    let mut chars = key_str.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some((modifiers, KeyCode::Char(c)));
    }

    let code = match key_str.to_ascii_lowercase().as_str() {
        "enter" => KeyCode::Enter,
        "esc" => KeyCode::Esc,
        "tab" => KeyCode::Tab,
        "backtab" => KeyCode::BackTab,
        "backspace" => KeyCode::Backspace,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "pageup" => KeyCode::PageUp,
        "pagedown" => KeyCode::PageDown,
        _ => return None,
    };
    Some((modifiers, code))
}

fn binding_matches(key: &KeyEvent, modifiers: KeyModifiers, code: KeyCode) -> bool {
    if key.code != code {
        return false;
    }
    // 大文字はSHIFT付きで届く端末があるため、文字キーではSHIFTを無視する。
    let actual = match key.code {
        KeyCode::Char(_) => key.modifiers - KeyModifiers::SHIFT,
        _ => key.modifiers,
    };
    let expected = match code {
        KeyCode::Char(_) => modifiers - KeyModifiers::SHIFT,
        _ => modifiers,
    };
    actual == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode, modifiers: KeyModifiers) -> KeyEvent {
        KeyEvent::new(code, modifiers)
    }

    #[test]
    fn test_matches_char_is_case_sensitive() {
        let g = key(KeyCode::Char('g'), KeyModifiers::empty());
        let big_g = key(KeyCode::Char('G'), KeyModifiers::SHIFT);

        assert!(matches_shortcut(&g, &["g".to_string()]));
        assert!(!matches_shortcut(&g, &["G".to_string()]));
        assert!(matches_shortcut(&big_g, &["G".to_string()]));
    }

    #[test]
    fn test_matches_named_keys_any_case() {
        let home = key(KeyCode::Home, KeyModifiers::empty());
        assert!(matches_shortcut(&home, &["Home".to_string()]));
        assert!(matches_shortcut(&home, &["home".to_string()]));
        assert!(!matches_shortcut(&home, &["End".to_string()]));
    }

    #[test]
    fn test_modifiers_must_match() {
        let ctrl_n = key(KeyCode::Char('n'), KeyModifiers::CONTROL);
        assert!(matches_shortcut(&ctrl_n, &["Ctrl+n".to_string()]));
        assert!(!matches_shortcut(&ctrl_n, &["n".to_string()]));

        let back_tab = key(KeyCode::BackTab, KeyModifiers::SHIFT);
        assert!(matches_shortcut(&back_tab, &["Shift+BackTab".to_string()]));
        assert!(!matches_shortcut(&back_tab, &["BackTab".to_string()]));
    }

    #[test]
    fn test_unknown_bindings_never_match() {
        let q = key(KeyCode::Char('q'), KeyModifiers::empty());
        assert!(!matches_shortcut(&q, &["Hyper+q".to_string()]));
        assert!(!matches_shortcut(&q, &["".to_string()]));
    }

    #[test]
    fn test_digit_page() {
        assert_eq!(
            digit_page(&key(KeyCode::Char('1'), KeyModifiers::empty())),
            Some(0)
        );
        assert_eq!(
            digit_page(&key(KeyCode::Char('9'), KeyModifiers::empty())),
            Some(8)
        );
        assert_eq!(digit_page(&key(KeyCode::Char('0'), KeyModifiers::empty())), None);
        assert_eq!(digit_page(&key(KeyCode::Char('3'), KeyModifiers::ALT)), None);
    }

    #[test]
    fn test_default_shortcuts_round_trip_through_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shortcut.toml");
        assert_eq!(Shortcuts::load_or_default(&path).unwrap(), Shortcuts::default());

        std::fs::write(
            &path,
            "[main]\nquit = [\"x\"]\nnext = [\"n\"]\nprevious = [\"p\"]\nfirst = [\"a\"]\nlast = [\"z\"]\n",
        )
        .unwrap();
        let loaded = Shortcuts::load_or_default(&path).unwrap();
        assert_eq!(loaded.main.quit, vec!["x".to_string()]);
        assert_eq!(loaded.main.last, vec!["z".to_string()]);
    }

    #[test]
    fn test_load_errors_name_the_file() {
        // ディレクトリは存在するが読めないので読込エラーになる。
        let dir = tempfile::tempdir().unwrap();
        let err = Shortcuts::load_or_default(dir.path()).unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));

        let path = dir.path().join("shortcut.toml");
        std::fs::write(&path, "[main]\nquit = ").unwrap();
        let err = Shortcuts::load_or_default(&path).unwrap_err();
        assert!(err.to_string().contains("shortcut.toml"));
    }
}
