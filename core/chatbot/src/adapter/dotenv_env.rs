//! `.env` ファイルを下敷きにした EnvResolver
//!
//! プロセスの環境変数を優先し、無いものだけ `.env` の値で補う。
//! プロセス環境そのものは書き換えない。

use common::error::Error;
use common::ports::outbound::EnvResolver;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

pub const DEFAULT_DOTENV_FILE: &str = ".env";

pub struct DotenvEnvResolver {
    primary: Arc<dyn EnvResolver>,
    file_vars: HashMap<String, String>,
    warnings: Vec<String>,
}

impl DotenvEnvResolver {
    /// `.env` を読み込む
    ///
    /// * `path` - 明示されたファイル。読めない・解釈できない行があればエラー
    /// * None のときはカレントディレクトリの `.env`（`load_optional` を参照）
    pub fn load(primary: Arc<dyn EnvResolver>, path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(p) => Ok(Self {
                primary,
                file_vars: read_dotenv_strict(p)?,
                warnings: Vec::new(),
            }),
            None => Ok(Self::load_optional(primary, Path::new(DEFAULT_DOTENV_FILE))),
        }
    }

    /// 省略可能な `.env` を読み込む
    ///
    /// ファイルが無ければ何も補わない。解釈できない行は読み飛ばし、`warnings` に残す。
    pub fn load_optional(primary: Arc<dyn EnvResolver>, path: &Path) -> Self {
        let mut file_vars = HashMap::new();
        let mut warnings = Vec::new();
        if path.is_file() {
            match dotenvy::from_path_iter(path) {
                Ok(iter) => {
                    for item in iter {
                        match item {
                            Ok((key, value)) => {
                                file_vars.insert(key, value);
                            }
                            Err(e @ dotenvy::Error::LineParse(..)) => {
                                warnings.push(format!("Skipped line in {}: {}", path.display(), e));
                            }
                            Err(e) => {
                                warnings.push(format!("Stopped reading {}: {}", path.display(), e));
                                break;
                            }
                        }
                    }
                }
                Err(e) => warnings.push(format!("Failed to read {}: {}", path.display(), e)),
            }
        }
        Self {
            primary,
            file_vars,
            warnings,
        }
    }

    /// 読み込み時に読み飛ばした行などの警告
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

fn read_dotenv_strict(path: &Path) -> Result<HashMap<String, String>, Error> {
    let iter = dotenvy::from_path_iter(path)
        .map_err(|e| Error::env(format!("Failed to read {}: {}", path.display(), e)))?;
    let mut vars = HashMap::new();
    for item in iter {
        let (key, value) = item
            .map_err(|e| Error::env(format!("Failed to parse {}: {}", path.display(), e)))?;
        vars.insert(key, value);
    }
    Ok(vars)
}

impl EnvResolver for DotenvEnvResolver {
    fn var(&self, name: &str) -> Option<String> {
        self.primary
            .var(name)
            .or_else(|| self.file_vars.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::adapter::MapEnvResolver;
    use std::fs;

    #[test]
    fn test_file_values_fill_missing_vars() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "GROQ_API_KEY=from_file\nGROQ_MODEL=\"m-1\"\n").unwrap();

        let primary = Arc::new(MapEnvResolver::new().with("GROQ_MODEL", "from_env"));
        let env = DotenvEnvResolver::load(primary, Some(&path)).unwrap();
        assert_eq!(env.var("GROQ_API_KEY").as_deref(), Some("from_file"));
        // プロセス環境が優先
        assert_eq!(env.var("GROQ_MODEL").as_deref(), Some("from_env"));
        assert_eq!(env.var("OTHER"), None);
    }

    #[test]
    fn test_explicit_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nope.env");
        let result = DotenvEnvResolver::load(Arc::new(MapEnvResolver::new()), Some(&path));
        assert!(matches!(result, Err(Error::Env(_))));
    }

    #[test]
    fn test_explicit_file_with_bad_line_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("chatbot.env");
        fs::write(&path, "GROQ_API_KEY=abc\nthis is not valid\n").unwrap();
        let result = DotenvEnvResolver::load(Arc::new(MapEnvResolver::new()), Some(&path));
        assert!(matches!(result, Err(Error::Env(ref m)) if m.contains("Failed to parse")));
    }

    #[test]
    fn test_optional_file_skips_bad_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        fs::write(&path, "GROQ_API_KEY=abc\nthis is not valid\nGROQ_MODEL=m-2\n").unwrap();

        let env = DotenvEnvResolver::load_optional(Arc::new(MapEnvResolver::new()), &path);
        assert_eq!(env.var("GROQ_API_KEY").as_deref(), Some("abc"));
        assert_eq!(env.var("GROQ_MODEL").as_deref(), Some("m-2"));
        assert_eq!(env.warnings().len(), 1);
        assert!(env.warnings()[0].contains("this is not valid"));
    }

    #[test]
    fn test_optional_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let primary = Arc::new(MapEnvResolver::new().with("GROQ_API_KEY", "k"));
        let env = DotenvEnvResolver::load_optional(primary, &dir.path().join(".env"));
        assert_eq!(env.var("GROQ_API_KEY").as_deref(), Some("k"));
        assert!(env.warnings().is_empty());
    }
}
